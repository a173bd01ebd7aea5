/*
    This module is for storing and manipulating grammars
*/

use std::collections::HashMap;
use std::fmt::Display;

use itertools::Itertools;

// The marker standing for the empty production at the text boundary
pub const EPSILON: char = 'ε';

// The base unit in a grammar rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(char),
    Nonterminal(char),
}

impl Symbol {
    // Uppercase letters are nonterminals, everything else is a terminal.
    // Nothing else in the crate looks at case
    pub fn from_char(c: char) -> Self {
        if c.is_uppercase() {
            Symbol::Nonterminal(c)
        } else {
            Symbol::Terminal(c)
        }
    }

    pub fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::Nonterminal(_))
    }

    pub fn as_char(&self) -> char {
        match self {
            Symbol::Terminal(c) | Symbol::Nonterminal(c) => *c,
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// The symbols in a single alternative. Empty means the ε production
pub type Alternative = Vec<Symbol>;

// The alternatives of a rewrite rule
pub type Rewrite = Vec<Alternative>;

pub fn display_rule(rule: &[Symbol]) -> String {
    if rule.is_empty() {
        EPSILON.to_string()
    } else {
        rule.iter().join("")
    }
}

// Converts rule text into an alternative, `ε` being the empty one
pub fn alternative_from_str(text: &str) -> Alternative {
    if text == EPSILON.to_string() {
        Vec::new()
    } else {
        text.chars().map(Symbol::from_char).collect()
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Grammar {
    // First nonterminal defined; only a default for drivers
    pub start_symbol: Option<char>,
    pub rules: HashMap<char, Rewrite>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    // Declares `nonterminal` without adding any rule to it
    pub fn declare(&mut self, nonterminal: char) -> &mut Rewrite {
        self.start_symbol.get_or_insert(nonterminal);
        self.rules.entry(nonterminal).or_default()
    }

    // Appends a rule written as text, e.g. `add_rule('S', "aB")`
    pub fn add_rule(&mut self, nonterminal: char, rule: &str) -> &mut Self {
        self.add_alternative(nonterminal, alternative_from_str(rule))
    }

    pub fn add_alternative(&mut self, nonterminal: char, alternative: Alternative) -> &mut Self {
        self.declare(nonterminal).push(alternative);
        self
    }

    pub fn rewrite(&self, nonterminal: char) -> Option<&Rewrite> {
        self.rules.get(&nonterminal)
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = char> + '_ {
        self.rules.keys().copied().sorted()
    }

    // Builds a grammar from `(nonterminal, rules)` pairs, in order
    pub fn from_rules(definitions: &[(char, &[&str])]) -> Self {
        let mut grammar = Grammar::new();
        for (nonterminal, rules) in definitions {
            grammar.declare(*nonterminal);
            for rule in *rules {
                grammar.add_rule(*nonterminal, rule);
            }
        }
        grammar
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let start = self.start_symbol;
        // Start symbol first, the rest alphabetically
        let order = start.into_iter().chain(self.nonterminals().filter(|n| Some(*n) != start));
        for nonterminal in order {
            let rewrite = self.rules.get(&nonterminal).map(Vec::as_slice).unwrap_or_default();
            writeln!(f, "{} -> {}", nonterminal, rewrite.iter().map(|r| display_rule(r)).join(" | "))?;
        }
        Ok(())
    }
}
