use std::fmt::Display;
use std::io::BufRead;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use simplegram::cli::{Cli, Command};
use simplegram::error_handling::Location;
use simplegram::grammar::{display_rule, Grammar};
use simplegram::parser::{CompileError, CompileErrorType};
use simplegram::recognizer::Derivation;
use simplegram::{classifier, generator, parser, recognizer, scanner};

// Exit statuses
const REJECTED: u8 = 1;
const MALFORMED: u8 = 2;

fn print_errors<T: Display>(errors: &[T]) {
    for error in errors {
        eprintln!("{}", error);
    }
}

fn load_grammar(file: &PathBuf) -> Result<Grammar, ExitCode> {
    parser::parse_file(file).map_err(|errors| {
        print_errors(&errors);
        ExitCode::from(MALFORMED)
    })
}

fn start_symbol(grammar: &Grammar, start: Option<char>, file: &PathBuf) -> Result<char, ExitCode> {
    start.or(grammar.start_symbol).ok_or_else(|| {
        eprintln!("{} defines no nonterminal to start from", file.display());
        ExitCode::from(MALFORMED)
    })
}

// Each positional input, or each line of stdin when there are none
fn inputs_or_stdin(inputs: Vec<String>) -> Box<dyn Iterator<Item = std::io::Result<String>>> {
    if inputs.is_empty() {
        Box::new(std::io::stdin().lock().lines())
    } else {
        Box::new(inputs.into_iter().map(Ok))
    }
}

fn read_input(input: std::io::Result<String>) -> Result<String, ExitCode> {
    input.map_err(|e| {
        eprintln!("{}", CompileError::at(&Location::whole("<stdin>"), CompileErrorType::FileError(e)));
        ExitCode::from(MALFORMED)
    })
}

fn print_derivation(grammar: &Grammar, derivation: &Derivation) {
    for step in derivation {
        let rule = &grammar.rules[&step.nonterminal][step.alternative];
        println!("    {} -> {}", step.nonterminal, display_rule(rule));
    }
}

fn check(file: PathBuf) -> Result<(), ExitCode> {
    let grammar = load_grammar(&file)?;

    match classifier::check_at(&grammar, &Location::whole(&file)) {
        Ok(()) => {
            println!("The grammar is simple");
            Ok(())
        }
        Err(errors) => {
            print_errors(&errors);
            println!("The grammar isn't simple");
            Err(ExitCode::from(REJECTED))
        }
    }
}

fn recognize(file: PathBuf, start: Option<char>, trace: bool, inputs: Vec<String>) -> Result<(), ExitCode> {
    let grammar = load_grammar(&file)?;
    if let Err(errors) = classifier::check_at(&grammar, &Location::whole(&file)) {
        print_errors(&errors);
        println!("The grammar isn't simple");
        return Err(ExitCode::from(REJECTED));
    }
    let start = start_symbol(&grammar, start, &file)?;

    for input in inputs_or_stdin(inputs) {
        let input = read_input(input)?;
        let result = recognizer::derive(&grammar, &input, start);
        println!("{:?}: {}", input, if result.is_ok() { "Accepted" } else { "Rejected" });

        if trace {
            match result {
                Ok(derivation) => print_derivation(&grammar, &derivation),
                Err(rejection) => println!("    {}", rejection),
            }
        }
    }
    Ok(())
}

fn generate(file: PathBuf, start: Option<char>, amount: u32, seed: Option<u64>, max_depth: usize) -> Result<(), ExitCode> {
    let grammar = load_grammar(&file)?;
    let start = start_symbol(&grammar, start, &file)?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for _ in 0..amount {
        match generator::generate(&grammar, start, &mut rng, max_depth) {
            Ok(sentence) => println!("{}", sentence),
            Err(error) => {
                eprintln!("{}", error);
                return Err(ExitCode::from(MALFORMED));
            }
        }
    }
    Ok(())
}

fn scan(text: Option<String>) -> Result<(), ExitCode> {
    for line in inputs_or_stdin(text.into_iter().collect()) {
        let line = read_input(line)?;
        for token in scanner::Scanner::new(&line) {
            println!("{}", token);
        }
        println!();
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Check { file } => check(file),
        Command::Recognize { file, start, trace, inputs } => recognize(file, start, trace, inputs),
        Command::Generate { file, start, amount, seed, max_depth } => generate(file, start, amount, seed, max_depth),
        Command::Scan { text } => scan(text),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => code,
    }
}
