/*
    This module decides whether a grammar is simple: ε-free, every rule of
    the form `terminal* [nonterminal]`, and the alternatives of each
    nonterminal starting with pairwise distinct symbols
*/

use std::collections::HashSet;
use std::fmt::Display;

use tracing::debug;

use crate::error_handling::*;
use crate::grammar::*;

#[derive(Debug, PartialEq, Clone)]
pub enum ClassifyErrorType {
    // An ε production
    EmptyRule { nonterminal: char },
    // More than one nonterminal in a single alternative
    TooManyNonterminals { nonterminal: char, rule: Alternative },
    // A nonterminal followed by more symbols
    MisplacedNonterminal { nonterminal: char, rule: Alternative },
    // Two alternatives of a nonterminal start with the same symbol
    SelectionOverlap { nonterminal: char, rule: Alternative, symbol: Symbol },
}

impl ErrorType for ClassifyErrorType {}

impl Display for ClassifyErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifyErrorType::EmptyRule { nonterminal } =>
                write!(f, "Rule `{} -> {}` violates the no-{} rule", nonterminal, EPSILON, EPSILON),
            ClassifyErrorType::TooManyNonterminals { nonterminal, rule } =>
                write!(f, "Rule `{} -> {}` has more than one nonterminal", nonterminal, display_rule(rule)),
            ClassifyErrorType::MisplacedNonterminal { nonterminal, rule } =>
                write!(f, "Rule `{} -> {}` has a nonterminal before its last symbol", nonterminal, display_rule(rule)),
            ClassifyErrorType::SelectionOverlap { nonterminal, rule, symbol } =>
                write!(f, "Rule `{} -> {}` overlaps an earlier alternative on `{}`", nonterminal, display_rule(rule), symbol),
        }
    }
}

pub type ClassifyError = Error<ClassifyErrorType>;
pub type ClassifyErrors = Errors<ClassifyErrorType>;

// The first symbols of the alternatives of one nonterminal
pub type SelectionSet = HashSet<Symbol>;

pub fn selection_set(rewrite: &Rewrite) -> SelectionSet {
    rewrite.iter().filter_map(|rule| rule.first().copied()).collect()
}

// Checks invariants 1 and 2 on a single alternative
fn check_shape(nonterminal: char, rule: &Alternative) -> Option<ClassifyErrorType> {
    let last = rule.last()?;

    match rule.iter().filter(|symbol| symbol.is_nonterminal()).count() {
        0 => None,
        1 if last.is_nonterminal() => None,
        1 => Some(ClassifyErrorType::MisplacedNonterminal { nonterminal, rule: rule.clone() }),
        _ => Some(ClassifyErrorType::TooManyNonterminals { nonterminal, rule: rule.clone() }),
    }
}

fn check_rewrite(nonterminal: char, rewrite: &Rewrite) -> Vec<ClassifyErrorType> {
    let mut violations = Vec::new();
    let mut seen = SelectionSet::with_capacity(rewrite.len());

    for rule in rewrite {
        let Some(first) = rule.first() else {
            violations.push(ClassifyErrorType::EmptyRule { nonterminal });
            continue;
        };

        violations.extend(check_shape(nonterminal, rule));

        if !seen.insert(*first) {
            violations.push(ClassifyErrorType::SelectionOverlap {
                nonterminal,
                rule: rule.clone(),
                symbol: *first
            });
        }
    }

    violations
}

// Collects every violation, nonterminals in sorted order and their rules in
// the order given. `origin` names the grammar in the reported locations
pub fn check_at(grammar: &Grammar, origin: &Location) -> Result<(), ClassifyErrors> {
    let errors: ClassifyErrors = grammar
        .nonterminals()
        .flat_map(|nonterminal| check_rewrite(nonterminal, &grammar.rules[&nonterminal]))
        .inspect(|violation| debug!(%violation, "grammar is not simple"))
        .map(|violation| ClassifyError::at(origin, violation))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn check(grammar: &Grammar) -> Result<(), ClassifyErrors> {
    check_at(grammar, &Location::whole("<grammar>"))
}

pub fn classify(grammar: &Grammar) -> bool {
    check(grammar).is_ok()
}
