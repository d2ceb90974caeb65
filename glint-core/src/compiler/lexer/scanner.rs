//! On-demand scanner
//!
//! Produces one token per call over a borrowed source buffer. Lexemes are
//! slices of that buffer and are never copied.

use super::token_kind::TokenKind;
use super::trie::KEYWORDS;
use tracing::trace;

/// A scanned token
///
/// For `TokenKind::Error` the lexeme holds the diagnostic message instead of
/// a span of the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src str,
    pub line: usize,
}

impl<'src> Token<'src> {
    /// Placeholder used before the first token has been read
    pub fn synthetic(kind: TokenKind) -> Self {
        Self {
            kind,
            lexeme: "",
            line: 1,
        }
    }
}

pub struct Scanner<'src> {
    source: &'src str,
    /// Byte offset of the token being scanned
    start: usize,
    /// Byte offset of the next unread byte
    current: usize,
    line: usize,
    /// Set once `Eof` has been handed out through the iterator
    finished: bool,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            line: 1,
            finished: false,
        }
    }

    /// Current source line
    pub fn line(&self) -> usize {
        self.line
    }

    /// Scan the next token. After the end of input every call returns `Eof`.
    pub fn next_token(&mut self) -> Token<'src> {
        self.skip_whitespace();
        self.start = self.current;

        let token = match self.advance() {
            None => self.make_token(TokenKind::Eof),
            Some(c) => self.scan_from(c),
        };

        trace!(
            target: "glint::lexer",
            kind = ?token.kind,
            lexeme = token.lexeme,
            line = token.line,
            "token"
        );
        token
    }

    fn scan_from(&mut self, c: u8) -> Token<'src> {
        match c {
            b'(' => self.make_token(TokenKind::LeftParen),
            b')' => self.make_token(TokenKind::RightParen),
            b'{' => self.make_token(TokenKind::LeftBrace),
            b'}' => self.make_token(TokenKind::RightBrace),
            b',' => self.make_token(TokenKind::Comma),
            b'.' => self.make_token(TokenKind::Dot),
            b'-' => self.make_token(TokenKind::Minus),
            b'+' => self.make_token(TokenKind::Plus),
            b';' => self.make_token(TokenKind::Semicolon),
            b'/' => self.make_token(TokenKind::Slash),
            b'*' => self.make_token(TokenKind::Star),
            b'%' => self.make_token(TokenKind::Percent),
            b'!' => self.make_pair(b'=', TokenKind::BangEqual, TokenKind::Bang),
            b'=' => self.make_pair(b'=', TokenKind::EqualEqual, TokenKind::Equal),
            b'<' => self.make_pair(b'=', TokenKind::LessEqual, TokenKind::Less),
            b'>' => self.make_pair(b'=', TokenKind::GreaterEqual, TokenKind::Greater),
            b'"' => self.string(),
            b'0'..=b'9' => self.number(),
            c if is_identifier_start(c) => self.identifier(),
            _ => {
                // Step over the rest of a multi-byte character so the cursor
                // stays on a char boundary.
                while !self.source.is_char_boundary(self.current) {
                    self.current += 1;
                }
                self.error_token("Unexpected character.")
            }
        }
    }

    // ==================== Cursor ====================

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.current).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.source.as_bytes().get(self.current + 1).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.current += 1;
        Some(c)
    }

    fn matches(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                b' ' | b'\r' | b'\t' => {
                    self.current += 1;
                }
                b'\n' => {
                    self.line += 1;
                    self.current += 1;
                }
                b'/' if self.peek_next() == Some(b'/') => {
                    while self.peek().is_some_and(|c| c != b'\n') {
                        self.current += 1;
                    }
                }
                _ => return,
            }
        }
    }

    // ==================== Token builders ====================

    fn make_token(&self, kind: TokenKind) -> Token<'src> {
        Token {
            kind,
            lexeme: &self.source[self.start..self.current],
            line: self.line,
        }
    }

    fn make_pair(&mut self, second: u8, matched: TokenKind, single: TokenKind) -> Token<'src> {
        let kind = if self.matches(second) { matched } else { single };
        self.make_token(kind)
    }

    fn error_token(&self, message: &'static str) -> Token<'src> {
        Token {
            kind: TokenKind::Error,
            lexeme: message,
            line: self.line,
        }
    }

    // ==================== Literals ====================

    fn string(&mut self) -> Token<'src> {
        while let Some(c) = self.peek() {
            if c == b'"' {
                break;
            }
            if c == b'\n' {
                self.line += 1;
            }
            self.current += 1;
        }

        if self.is_at_end() {
            return self.error_token("Unterminated string.");
        }

        // Closing quote
        self.current += 1;
        self.make_token(TokenKind::String)
    }

    /// Digits with at most one interior `.`; the whole run of digits and dots
    /// is consumed even when it turns out malformed.
    fn number(&mut self) -> Token<'src> {
        let mut seen_dot = false;
        let mut malformed = false;

        while let Some(c) = self.peek() {
            match c {
                b'0'..=b'9' => {}
                b'.' if seen_dot => malformed = true,
                b'.' => seen_dot = true,
                _ => break,
            }
            self.current += 1;
        }

        let ends_with_dot = self.source.as_bytes()[self.current - 1] == b'.';
        if malformed || ends_with_dot {
            return self.error_token("Invalid number literal.");
        }
        self.make_token(TokenKind::Number)
    }

    fn identifier(&mut self) -> Token<'src> {
        while self.peek().is_some_and(is_identifier_continue) {
            self.current += 1;
        }

        let text = &self.source[self.start..self.current];
        let kind = KEYWORDS.find(text).unwrap_or(TokenKind::Identifier);
        self.make_token(kind)
    }
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Token<'src>;

    /// Yields every token up to and including `Eof`, then stops.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}

/// Check whether a byte may start an identifier
pub fn is_identifier_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

/// Check whether a byte may continue an identifier
pub fn is_identifier_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Scanner::new(source).map(|t| t.kind).collect()
    }

    fn single(source: &str) -> Token<'_> {
        Scanner::new(source).next_token()
    }

    #[test]
    fn test_punctuation_and_operators() {
        use TokenKind::*;
        assert_eq!(
            kinds("(){},.-+;/*% ! != = == < <= > >="),
            vec![
                LeftParen, RightParen, LeftBrace, RightBrace, Comma, Dot, Minus, Plus, Semicolon,
                Slash, Star, Percent, Bang, BangEqual, Equal, EqualEqual, Less, LessEqual, Greater,
                GreaterEqual, Eof
            ]
        );
    }

    #[test]
    fn test_greedy_two_char_operators() {
        use TokenKind::*;
        assert_eq!(kinds("!==="), vec![BangEqual, EqualEqual, Eof]);
        assert_eq!(kinds("<=="), vec![LessEqual, Equal, Eof]);
    }

    #[test]
    fn test_keywords_consume_exact_length() {
        for (word, kind) in TokenKind::KEYWORDS {
            let source = format!("{word} rest");
            let mut scanner = Scanner::new(&source);
            let token = scanner.next_token();
            assert_eq!(token.kind, kind);
            assert_eq!(token.lexeme, word);
            let next = scanner.next_token();
            assert_eq!(next.kind, TokenKind::Identifier);
            assert_eq!(next.lexeme, "rest");
        }
    }

    #[test]
    fn test_identifier_shaped_non_keywords() {
        for word in ["variable", "_var", "orchid", "nil_", "Print", "x1", "fo"] {
            let token = single(word);
            assert_eq!(token.kind, TokenKind::Identifier, "{word}");
            assert_eq!(token.lexeme, word);
        }
    }

    #[test]
    fn test_numbers() {
        let token = single("123.456");
        assert_eq!(token.kind, TokenKind::Number);
        assert_eq!(token.lexeme, "123.456");

        let token = single("42;");
        assert_eq!(token.kind, TokenKind::Number);
        assert_eq!(token.lexeme, "42");
    }

    #[test]
    fn test_malformed_numbers() {
        let token = single("123.");
        assert_eq!(token.kind, TokenKind::Error);
        assert_eq!(token.lexeme, "Invalid number literal.");

        let mut scanner = Scanner::new("123..456");
        assert_eq!(scanner.next_token().kind, TokenKind::Error);
        assert_eq!(scanner.next_token().kind, TokenKind::Eof);

        assert_eq!(single("1.2.3").kind, TokenKind::Error);
    }

    #[test]
    fn test_string_literal_keeps_quotes_in_lexeme() {
        let token = single("\"hello\"");
        assert_eq!(token.kind, TokenKind::String);
        assert_eq!(token.lexeme, "\"hello\"");
    }

    #[test]
    fn test_unterminated_string() {
        let mut scanner = Scanner::new("\"abc");
        let token = scanner.next_token();
        assert_eq!(token.kind, TokenKind::Error);
        assert_eq!(token.lexeme, "Unterminated string.");
        assert_eq!(scanner.next_token().kind, TokenKind::Eof);
        assert_eq!(scanner.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn test_comments_and_lines() {
        let source = "// leading comment\nvar x; // trailing\n\nprint x;";
        let tokens: Vec<_> = Scanner::new(source).collect();
        assert_eq!(tokens[0].kind, TokenKind::Var);
        assert_eq!(tokens[0].line, 2);
        let print = tokens.iter().find(|t| t.kind == TokenKind::Print).unwrap();
        assert_eq!(print.line, 4);
    }

    #[test]
    fn test_multiline_string_advances_line() {
        let mut scanner = Scanner::new("\"a\nb\" x");
        let string = scanner.next_token();
        assert_eq!(string.kind, TokenKind::String);
        let x = scanner.next_token();
        assert_eq!(x.line, 2);
    }

    #[test]
    fn test_slash_is_not_a_comment() {
        assert_eq!(
            kinds("4 / 2"),
            vec![TokenKind::Number, TokenKind::Slash, TokenKind::Number, TokenKind::Eof]
        );
    }

    #[test]
    fn test_unexpected_character() {
        let mut scanner = Scanner::new("@ é 1");
        let first = scanner.next_token();
        assert_eq!(first.kind, TokenKind::Error);
        assert_eq!(first.lexeme, "Unexpected character.");
        assert_eq!(scanner.next_token().kind, TokenKind::Error);
        assert_eq!(scanner.next_token().kind, TokenKind::Number);
    }

    #[test]
    fn test_iterator_is_finite() {
        let tokens: Vec<_> = Scanner::new("").collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }
}
