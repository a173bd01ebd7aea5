/*
    This module recognizes sentences of a simple grammar by simulating the
    leftmost derivation with an explicit stack
*/

use std::fmt::Display;

use tracing::trace;

use crate::grammar::*;

// Why a sentence was not recognized
#[derive(Debug, PartialEq, Clone)]
pub enum Rejection {
    // Symbols were still pending when the input ran out
    InputExhausted { pending: Symbol },
    // No alternative of the nonterminal starts with the lookahead
    NoApplicableRule { nonterminal: char, lookahead: char, position: usize },
    // A terminal on the stack did not match the input
    TerminalMismatch { expected: char, found: char, position: usize },
    // The derivation finished before the input did
    TrailingInput { position: usize },
}

impl Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::InputExhausted { pending } =>
                write!(f, "Input ended while `{}` was still expected", pending),
            Rejection::NoApplicableRule { nonterminal, lookahead, position } =>
                write!(f, "No rule for `{}` starts with `{}` (position {})", nonterminal, lookahead, position),
            Rejection::TerminalMismatch { expected, found, position } =>
                write!(f, "Expected `{}` but found `{}` (position {})", expected, found, position),
            Rejection::TrailingInput { position } =>
                write!(f, "Unconsumed input from position {}", position),
        }
    }
}

// One expansion of the leftmost derivation: the nonterminal and the index of
// the alternative chosen for it
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Step {
    pub nonterminal: char,
    pub alternative: usize,
}

pub type Derivation = Vec<Step>;

// Finds the alternative of `nonterminal` starting with the terminal `lookahead`
fn select_alternative(grammar: &Grammar, nonterminal: char, lookahead: char) -> Option<(usize, &Alternative)> {
    grammar
        .rewrite(nonterminal)?
        .iter()
        .enumerate()
        .find(|(_, rule)| rule.first() == Some(&Symbol::Terminal(lookahead)))
}

// Runs the derivation of `input` from `start`, returning the alternatives
// chosen on success. The grammar is assumed to be simple: otherwise the first
// matching alternative is taken without backtracking. A start symbol with no
// rules, or an unknown one, is rejected as having no applicable rule
pub fn derive(grammar: &Grammar, input: &str, start: char) -> Result<Derivation, Rejection> {
    let input: Vec<char> = input.chars().collect();
    let mut stack = vec![Symbol::from_char(start)];
    let mut position = 0;
    let mut derivation = Derivation::new();

    while let Some(&top) = stack.last() {
        let Some(&lookahead) = input.get(position) else {
            return Err(Rejection::InputExhausted { pending: top });
        };
        stack.pop();

        match top {
            Symbol::Nonterminal(nonterminal) => {
                let (alternative, rule) = select_alternative(grammar, nonterminal, lookahead)
                    .ok_or(Rejection::NoApplicableRule { nonterminal, lookahead, position })?;
                trace!(%nonterminal, rule = %display_rule(rule), position, "expand");
                stack.extend(rule.iter().rev());
                derivation.push(Step { nonterminal, alternative });
            }
            Symbol::Terminal(expected) if expected == lookahead => position += 1,
            Symbol::Terminal(expected) => {
                return Err(Rejection::TerminalMismatch { expected, found: lookahead, position });
            }
        }
    }

    if position < input.len() {
        return Err(Rejection::TrailingInput { position });
    }
    Ok(derivation)
}

pub fn recognize(grammar: &Grammar, input: &str, start: char) -> bool {
    derive(grammar, input, start)
        .inspect_err(|rejection| trace!(%rejection, input, "rejected"))
        .is_ok()
}
