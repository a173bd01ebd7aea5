/*
    This module scans C-like expressions into classified lexemes. It is
    independent of the grammar engine: an ordered table of patterns is tried
    against the text that is left, after skipping whitespace, and anything no
    pattern matches becomes a one-character unknown token
*/

use std::fmt::Display;

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Keyword,
    Number,
    String,
    Comment,
    Operator,
    SpecialChar,
    Unknown,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Comment => "COMMENT",
            TokenKind::Operator => "OPERATOR",
            TokenKind::SpecialChar => "SPECIAL_CHAR",
            TokenKind::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: &'a str,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token: {:<15} Type: {}", self.lexeme, self.kind)
    }
}

pub const KEYWORDS: &[&str] = &["int", "float", "return", "if", "else", "while", "for", "char"];

// Patterns in the order they are tried, each anchored at the start of the
// remaining text
static PATTERNS: Lazy<Vec<(TokenKind, Regex)>> = Lazy::new(|| {
    [
        (TokenKind::Identifier, r"^[a-zA-Z_][a-zA-Z0-9_]*"),
        (TokenKind::Number, r"^\d+"),
        (TokenKind::String, r#"^"(.*?)""#),
        (TokenKind::Comment, r"^//.*"),
        (TokenKind::Operator, r"^[+\-*/=<>!&|]+"),
        (TokenKind::SpecialChar, r"^[;,(){}]"),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).unwrap()))
    .collect()
});

fn classify_lexeme(kind: TokenKind, lexeme: &str) -> TokenKind {
    if kind == TokenKind::Identifier && KEYWORDS.contains(&lexeme) {
        TokenKind::Keyword
    } else {
        kind
    }
}

// A lazy iterator over the tokens of `text`. A clone restarts from where it
// was taken
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Scanner { rest: text }
    }

    // Splits the next lexeme off the front of `rest`
    fn take(&mut self, len: usize) -> &'a str {
        let (lexeme, rest) = self.rest.split_at(len);
        self.rest = rest;
        lexeme
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rest = self.rest.trim_start();
        let first = self.rest.chars().next()?;

        let matched = PATTERNS
            .iter()
            .find_map(|(kind, regex)| regex.find(self.rest).map(|m| (*kind, m.end())));

        let token = match matched {
            Some((kind, len)) => {
                let lexeme = self.take(len);
                Token { kind: classify_lexeme(kind, lexeme), lexeme }
            }
            None => Token { kind: TokenKind::Unknown, lexeme: self.take(first.len_utf8()) },
        };
        Some(token)
    }
}

pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    Scanner::new(text).collect()
}
