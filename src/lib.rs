/*
    Simple grammars: checking that a grammar is simple, and recognizing its
    sentences with a deterministic stack-driven derivation
*/

pub mod classifier;
pub mod cli;
pub mod error_handling;
pub mod generator;
pub mod grammar;
pub mod parser;
pub mod recognizer;
pub mod scanner;

pub use classifier::classify;
pub use grammar::{Grammar, Symbol};
pub use recognizer::recognize;
