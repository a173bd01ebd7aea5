/*
    This module parses grammar files of the form `S -> aB | c`
*/

mod lexer;
mod verifier;

use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::grammar::*;
use crate::error_handling::*;
use itertools::Itertools;
use lexer::*;
use tracing::debug;
use verifier::verify_rules;
use verifier::IntermediateRuleset;

#[derive(Debug)]
pub enum CompileErrorType {
    // A line which should contain a rule does not
    MissingArrow,
    // A rule has multiple arrows
    UnexpectedArrow,
    // The user starts a rule line with something other than a nonterminal
    MissingNonterminal,
    // `ε` written next to other symbols
    EmbeddedEpsilon,
    // An undefined nonterminal was used
    UndefinedNonterminal(char),
    // Somehow a full rewrite was parsed as a base alternative
    // This is a problem with simplegram, not the grammar
    UnsplitRewrite,
    // A blank line got too deep into the parser
    // This is a problem with simplegram, not the grammar
    UnexpectedBlankLine,
    // There was an issue with reading a file
    FileError(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CompileErrorType::FileError(a), CompileErrorType::FileError(b)) => a.kind() == b.kind(),
            (CompileErrorType::UndefinedNonterminal(a), CompileErrorType::UndefinedNonterminal(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::MissingArrow => write!(f, "Expected `->` after nonterminal"),
            CompileErrorType::UnexpectedArrow => write!(f, "Unexpected `->` encountered"),
            CompileErrorType::MissingNonterminal => write!(f, "Tried to define something other than a nonterminal"),
            CompileErrorType::EmbeddedEpsilon => write!(f, "`{}` must be an alternative on its own", EPSILON),
            CompileErrorType::UndefinedNonterminal(nonterminal) => write!(f, "Could not find definition for `{}`", nonterminal),
            CompileErrorType::UnsplitRewrite => write!(f, "Rewrite was not fully split (this is a problem with simplegram, not the grammar)"),
            CompileErrorType::UnexpectedBlankLine => write!(f, "Blank line encountered in rule parser (this is a problem with simplegram, not the grammar)"),
            CompileErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;
pub type CompileErrors = Errors<CompileErrorType>;

fn io_error(error: std::io::Error, file: &Path) -> CompileError {
    CompileError {
        location: Location::whole(file),
        error: CompileErrorType::FileError(error)
    }
}

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;
pub type FileResult<T> = std::result::Result<T, CompileErrors>;

#[derive(PartialEq, Debug)]
struct Rule {
    symbol: char,
    rewrite: Rewrite,
    location: Location
}

fn parse_alternative(tokens: &[Token]) -> Result<Alternative> {
    if tokens.len() > 1 && tokens.contains(&Token::Epsilon) {
        return Err(CompileErrorType::EmbeddedEpsilon);
    }

    tokens.iter().filter_map(|t| match t {
        Token::Arrow => Some(Err(CompileErrorType::UnexpectedArrow)),
        Token::Or => Some(Err(CompileErrorType::UnsplitRewrite)),
        Token::Epsilon => None,
        Token::Symbol(c) => Some(Ok(Symbol::from_char(*c)))
    }).collect()
}

fn parse_rewrite(tokens: &[Token]) -> Result<Rewrite> {
    // Nothing after the arrow declares a nonterminal with no rules
    if tokens.is_empty() {
        return Ok(Vec::new());
    }
    tokens.split(|t| *t == Token::Or).map(parse_alternative).collect()
}

fn parse_line(tokens: &[Token], location: Location) -> Result<Rule> {
    let symbol = match tokens.first() {
        Some(Token::Symbol(c)) if Symbol::from_char(*c).is_nonterminal() => Ok(*c),
        Some(_) => Err(CompileErrorType::MissingNonterminal),
        None => Err(CompileErrorType::UnexpectedBlankLine)
    }?;

    if tokens.get(1) != Some(&Token::Arrow) {
        return Err(CompileErrorType::MissingArrow)
    }

    let rewrite = parse_rewrite(&tokens[2..])?;

    Ok(Rule {
        symbol,
        rewrite,
        location
    })
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Rule> {
    parse_line(&lexer::lex_line(line), location.clone())
        .map_err(|error| CompileError { location, error })
}

fn is_rule_line(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with(';')
}

// Merges rules into a ruleset, appending the rules of repeated definitions
fn ruleset_from_rules(rules: Vec<Rule>) -> FileResult<Grammar> {
    let mut grammar = Grammar::new();
    let mut test_ruleset = IntermediateRuleset::with_capacity(rules.len());
    for rule in rules {
        grammar.declare(rule.symbol);
        test_ruleset
            .entry(rule.symbol)
            .or_default()
            .push((rule.rewrite, rule.location));
    }

    verify_rules(&test_ruleset)?;

    for (symbol, definitions) in test_ruleset.drain() {
        let rewrite = definitions.into_iter().flat_map(|(rewrite, _)| rewrite).collect();
        grammar.rules.insert(symbol, rewrite);
    }

    Ok(grammar)
}

fn grammar_from_lines(lines: impl Iterator<Item = (usize, LineResult<String>)>, origin: &Path) -> FileResult<Grammar> {
    let parsed_lines = lines
        .filter(|(_, line)| line.as_ref().map_or(true, |l| is_rule_line(l)))
        .map(|(num, line_res)| {
            line_res.and_then(|line| parse_lex_line(&line, Location {
                file: origin.to_path_buf(),
                line: num
            }))
        });

    let (rules, errors): (Vec<_>, Vec<_>) = parsed_lines.partition_result();
    if !errors.is_empty() {
        return Err(errors);
    }

    let grammar = ruleset_from_rules(rules)?;
    debug!(origin = %origin.display(), nonterminals = grammar.rules.len(), "loaded grammar");
    Ok(grammar)
}

// Parses grammar text; `origin` names the text in error locations
pub fn parse_str(text: &str, origin: impl AsRef<Path>) -> FileResult<Grammar> {
    let lines = text
        .lines()
        .enumerate()
        .map(|(num, line)| (num + 1, Ok(line.to_string())));
    grammar_from_lines(lines, origin.as_ref())
}

pub fn parse_file(path: &PathBuf) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path)])?;
    let lines = std::io::BufReader::new(file)
        .lines()
        .map(|line| line.map_err(|e| io_error(e, path)))
        .enumerate()
        .map(|(num, line)| (num + 1, line));

    grammar_from_lines(lines, path)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::iter::zip;

    use super::*;

    fn nowhere() -> Location {
        Location::whole(PathBuf::new())
    }

    fn s_nonterminal(c: char) -> Symbol {
        Symbol::Nonterminal(c)
    }

    fn s_terminal(c: char) -> Symbol {
        Symbol::Terminal(c)
    }

    #[test]
    fn parse_normal_alternative() {
        let lines = vec![
            vec![Token::Symbol('a'), Token::Symbol('b'), Token::Symbol('B')],
            vec![Token::Epsilon],
            vec![]
        ];
        let answers = vec![
            vec![s_terminal('a'), s_terminal('b'), s_nonterminal('B')],
            vec![],
            vec![]
        ];

        for (line, answer) in zip(lines, answers) {
            assert_eq!(parse_alternative(&line[..]).unwrap(), answer);
        }
    }

    #[test]
    fn parse_malformed_alternative() {
        assert_eq!(parse_alternative(&[Token::Arrow]), Err(CompileErrorType::UnexpectedArrow));
        assert_eq!(parse_alternative(&[Token::Or]), Err(CompileErrorType::UnsplitRewrite));
        assert_eq!(parse_alternative(&[Token::Symbol('a'), Token::Epsilon]), Err(CompileErrorType::EmbeddedEpsilon));
    }

    #[test]
    fn parse_normal_line() {
        let lexed = lexer::lex_line("S -> aB | c | ε");

        let answer = Rule {
            symbol: 'S',
            rewrite: vec![
                vec![s_terminal('a'), s_nonterminal('B')],
                vec![s_terminal('c')],
                vec![]
            ],
            location: nowhere()
        };

        assert_eq!(parse_line(&lexed[..], nowhere()), Ok(answer));
    }

    #[test]
    fn parse_declaration_line() {
        let lexed = lexer::lex_line("A ->");
        assert_eq!(parse_line(&lexed[..], nowhere()).unwrap().rewrite, Vec::<Alternative>::new());
    }

    #[test]
    fn parse_malformed_line() {
        // Blank
        assert_eq!(parse_line(&[], nowhere()), Err(CompileErrorType::UnexpectedBlankLine));

        // Missing arrow
        assert_eq!(parse_line(&lexer::lex_line("S aB")[..], nowhere()), Err(CompileErrorType::MissingArrow));

        // Improper definition
        assert_eq!(parse_line(&lexer::lex_line("s -> aB")[..], nowhere()), Err(CompileErrorType::MissingNonterminal));
        assert_eq!(parse_line(&lexer::lex_line("| -> a")[..], nowhere()), Err(CompileErrorType::MissingNonterminal));
        assert_eq!(parse_line(&lexer::lex_line("-> a")[..], nowhere()), Err(CompileErrorType::MissingNonterminal));

        // Second arrow
        assert_eq!(parse_line(&lexer::lex_line("S -> a -> b")[..], nowhere()), Err(CompileErrorType::UnexpectedArrow));
    }

    #[test]
    fn parse_text_merges_repeated_definitions() {
        let grammar = parse_str("S -> aS\n\n; more rules for S\nS -> b\n", "inline").unwrap();

        assert_eq!(grammar.start_symbol, Some('S'));
        assert_eq!(grammar.rewrite('S').unwrap(), &vec![
            vec![s_terminal('a'), s_nonterminal('S')],
            vec![s_terminal('b')]
        ]);
    }

    #[test]
    fn parse_text_reports_undefined_nonterminals() {
        let errors = parse_str("S -> aB\nC -> cD", "inline").unwrap_err();

        assert_eq!(errors, vec![
            CompileError::at(&Location { file: PathBuf::from("inline"), line: 1 }, CompileErrorType::UndefinedNonterminal('B')),
            CompileError::at(&Location { file: PathBuf::from("inline"), line: 2 }, CompileErrorType::UndefinedNonterminal('D'))
        ]);
    }

    #[test]
    fn parse_text_locates_errors_in_repeated_definitions() {
        let errors = parse_str("S -> a\nS -> bX", "inline").unwrap_err();

        assert_eq!(errors, vec![
            CompileError::at(&Location { file: PathBuf::from("inline"), line: 2 }, CompileErrorType::UndefinedNonterminal('X'))
        ]);
    }

    #[test]
    fn parse_normal_file() {
        let example_path = PathBuf::from("example_data/simple.grammar");
        let example_parsed = parse_file(&example_path).unwrap();

        let mut rules = HashMap::new();
        rules.insert('S', vec![
            vec![s_terminal('a'), s_nonterminal('B')],
            vec![s_terminal('c')]
        ]);
        rules.insert('B', vec![
            vec![s_terminal('a'), s_nonterminal('B')],
            vec![s_terminal('b')]
        ]);

        assert_eq!(example_parsed, Grammar {
            start_symbol: Some('S'),
            rules
        });
    }

    #[test]
    fn parse_malformed_file() {
        let example_path = PathBuf::from("example_data/malformed.grammar");
        let example_parsed = parse_file(&example_path).unwrap_err();

        assert_eq!(example_parsed, vec![
            CompileError {
                location: Location {
                    file: example_path.clone(),
                    line: 3
                },
                error: CompileErrorType::MissingNonterminal
            },
            CompileError {
                location: Location {
                    file: example_path.clone(),
                    line: 5
                },
                error: CompileErrorType::MissingArrow
            },
            CompileError {
                location: Location {
                    file: example_path,
                    line: 7
                },
                error: CompileErrorType::EmbeddedEpsilon
            }
        ]);
    }

    #[test]
    fn parse_missing_file() {
        let errors = parse_file(&PathBuf::from("example_data/does_not_exist.grammar")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].error, CompileErrorType::FileError(std::io::ErrorKind::NotFound.into()));
    }
}
