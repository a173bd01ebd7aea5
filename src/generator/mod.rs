/*
    This module generates sentences
*/

use rand::prelude::*;
use std::fmt::Display;

use crate::grammar::*;
use crate::error_handling::*;

#[derive(Debug, PartialEq)]
pub enum GenerateErrorType {
    // An undefined nonterminal was used
    UndefinedNonterminal(char),
    // A nonterminal was declared without any rules
    NoRules(char),
    // Expansion kept going past the hard depth limit
    DepthExceeded(char),
}

impl ErrorType for GenerateErrorType {}

impl Display for GenerateErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateErrorType::UndefinedNonterminal(nonterminal) => write!(f, "No definition for nonterminal `{}`", nonterminal),
            GenerateErrorType::NoRules(nonterminal) => write!(f, "Nonterminal `{}` has no rules to expand", nonterminal),
            GenerateErrorType::DepthExceeded(nonterminal) => write!(f, "Gave up expanding `{}`: the grammar does not terminate quickly enough", nonterminal),
        }
    }
}

pub type GenerateError = Error<GenerateErrorType>;
pub type GenResult = Result<String, GenerateError>;

pub const DEFAULT_MAX_DEPTH: usize = 32;

struct Generator<'a, R: Rng> {
    grammar: &'a Grammar,
    rng: &'a mut R,
    max_depth: usize,
    location: Location,
}

// Generates a random sentence of `grammar` derived from `start`. Past
// `max_depth` nested expansions, alternatives without a nonterminal are
// preferred; past twice that depth generation gives up
pub fn generate(grammar: &Grammar, start: char, rng: &mut impl Rng, max_depth: usize) -> GenResult {
    let mut generator = Generator {
        grammar,
        rng,
        max_depth,
        location: Location::whole("<grammar>"),
    };
    let mut result = String::new();
    generator.generate_symbol(Symbol::from_char(start), 0, &mut result)?;
    Ok(result)
}

impl<R: Rng> Generator<'_, R> {
    fn error(&self, error: GenerateErrorType) -> GenerateError {
        GenerateError::at(&self.location, error)
    }

    fn generate_nonterminal(&mut self, nonterminal: char, depth: usize, result: &mut String) -> Result<(), GenerateError> {
        let rewrite = self.grammar
            .rewrite(nonterminal)
            .ok_or_else(|| self.error(GenerateErrorType::UndefinedNonterminal(nonterminal)))?;
        if depth > self.max_depth.saturating_mul(2) {
            return Err(self.error(GenerateErrorType::DepthExceeded(nonterminal)));
        }
        let alternative = self.choose_alternative(rewrite, depth)
            .ok_or_else(|| self.error(GenerateErrorType::NoRules(nonterminal)))?;

        for symbol in alternative {
            self.generate_symbol(*symbol, depth + 1, result)?;
        }
        Ok(())
    }

    fn choose_alternative<'g>(&mut self, rewrite: &'g Rewrite, depth: usize) -> Option<&'g Alternative> {
        if depth >= self.max_depth {
            let terminating = rewrite
                .iter()
                .filter(|alternative| !alternative.iter().any(Symbol::is_nonterminal))
                .collect::<Vec<_>>();
            if let Some(alternative) = terminating.choose(&mut *self.rng) {
                return Some(*alternative);
            }
        }
        rewrite.choose(&mut *self.rng)
    }

    fn generate_symbol(&mut self, symbol: Symbol, depth: usize, result: &mut String) -> Result<(), GenerateError> {
        match symbol {
            Symbol::Nonterminal(n) => self.generate_nonterminal(n, depth, result),
            Symbol::Terminal(t) => {
                result.push(t);
                Ok(())
            }
        }
    }
}
