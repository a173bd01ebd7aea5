use itertools::PeekingNext;

use crate::grammar::EPSILON;

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Token {
    Arrow,
    Or,
    Epsilon,
    Symbol(char)
}

// Lexes a `-`, which is either the start of an arrow or a terminal of its own
pub fn lex_dash(line: &mut impl PeekingNext<Item = char>) -> Token {
    line.next(); // Consume the dash
    if line.peeking_next(|&c| c == '>').is_some() {
        Token::Arrow
    } else {
        Token::Symbol('-')
    }
}

pub fn lex_line(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    let mut line_chars = line.chars().peekable();

    while let Some(&c) = line_chars.peek() {
        if c == '-' {
            tokens.push(lex_dash(&mut line_chars));
            continue;
        }

        line_chars.next();
        if c == '|' {
            tokens.push(Token::Or);
        } else if c == EPSILON {
            tokens.push(Token::Epsilon);
        } else if !c.is_whitespace() {
            tokens.push(Token::Symbol(c));
        }
    }

    tokens
}
