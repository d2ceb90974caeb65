//! Glint scanner
//!
//! Turns source text into tokens on demand; keywords are recognised through
//! a shared trie.

pub mod scanner;
pub mod token_kind;
pub mod trie;

pub use scanner::{Scanner, Token};
pub use token_kind::TokenKind;
pub use trie::{KeywordTrie, KEYWORDS};
