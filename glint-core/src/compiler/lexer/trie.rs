//! Keyword trie
//!
//! Keywords are matched by walking a small trie over lowercase ASCII letters.
//! The walk never goes deeper than the longest keyword, so a long identifier
//! is rejected after at most `depth + 1` steps.

use super::token_kind::TokenKind;
use once_cell::sync::Lazy;

const ALPHABET: usize = 26;

/// Process-wide keyword trie, built on first use
pub static KEYWORDS: Lazy<KeywordTrie> = Lazy::new(|| {
    let mut trie = KeywordTrie::new();
    for (word, kind) in TokenKind::KEYWORDS {
        trie.insert(word, kind);
    }
    trie
});

#[derive(Debug, Default)]
struct TrieNode {
    children: [Option<u16>; ALPHABET],
    kind: Option<TokenKind>,
}

#[derive(Debug)]
pub struct KeywordTrie {
    nodes: Vec<TrieNode>,
    depth: usize,
}

fn slot(byte: u8) -> Option<usize> {
    byte.is_ascii_lowercase().then(|| (byte - b'a') as usize)
}

impl KeywordTrie {
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            depth: 0,
        }
    }

    /// Insert a word. Returns false (leaving the trie untouched) if the word
    /// contains anything other than lowercase ASCII letters.
    pub fn insert(&mut self, word: &str, kind: TokenKind) -> bool {
        if word.is_empty() || !word.bytes().all(|b| b.is_ascii_lowercase()) {
            return false;
        }

        let mut node = 0usize;
        for byte in word.bytes() {
            let Some(idx) = slot(byte) else {
                return false;
            };
            node = match self.nodes[node].children[idx] {
                Some(next) => next as usize,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children[idx] = Some(next as u16);
                    next
                }
            };
        }
        self.nodes[node].kind = Some(kind);
        self.depth = self.depth.max(word.len());
        true
    }

    /// Exact-match lookup
    pub fn find(&self, word: &str) -> Option<TokenKind> {
        if word.len() > self.depth {
            return None;
        }
        let mut node = 0usize;
        for byte in word.bytes() {
            let idx = slot(byte)?;
            node = self.nodes[node].children[idx]? as usize;
        }
        self.nodes[node].kind
    }

    /// Length of the longest keyword
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Default for KeywordTrie {
    fn default() -> Self {
        Self::new()
    }
}
