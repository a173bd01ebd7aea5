use std::collections::HashMap;

use crate::grammar::Symbol::Nonterminal;
use super::CompileErrorType::UndefinedNonterminal;
use super::{Alternative, CompileError, CompileErrors, FileResult, Location, Rewrite};

// Each nonterminal with the rewrite of every line defining it
pub type IntermediateRuleset = HashMap<char, Vec<(Rewrite, Location)>>;

fn get_alternative_undefined_symbols(alternative: &Alternative, location: &Location, rules: &IntermediateRuleset) -> CompileErrors {
    // Keep only the nonterminals, then only the undefined ones
    alternative.iter()
        .filter_map(|symbol| match symbol {
            Nonterminal(symbol) => Some(*symbol),
            _ => None
        })
        .filter(|symbol| !rules.contains_key(symbol))
        .map(|symbol| CompileError::at(location, UndefinedNonterminal(symbol)))
        .collect()
}

fn get_rewrite_undefined_symbols(rewrite: &Rewrite, location: &Location, rules: &IntermediateRuleset) -> CompileErrors {
    rewrite.iter()
        .flat_map(|alternative| get_alternative_undefined_symbols(alternative, location, rules))
        .collect()
}

fn get_undefined_symbols(rules: &IntermediateRuleset) -> CompileErrors {
    let mut errors: CompileErrors = rules.values()
        .flatten()
        .flat_map(|(rewrite, location)| get_rewrite_undefined_symbols(rewrite, location, rules))
        .collect();
    // The ruleset is unordered; report in file order
    errors.sort_by_key(|error| error.location.line);
    errors
}

pub fn verify_rules(rules: &IntermediateRuleset) -> FileResult<()> {
    let errors = get_undefined_symbols(rules);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
