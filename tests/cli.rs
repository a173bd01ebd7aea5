use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::PathBuf;

fn grammar_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("example_data")
        .join(name)
}

#[test]
fn check_simple_grammar() {
    let mut cmd = cargo_bin_cmd!("simplegram");
    cmd.arg("check").arg(grammar_path("simple.grammar"));

    cmd.assert().success().stdout(predicate::str::contains("The grammar is simple"));
}

#[test]
fn check_overlapping_grammar_fails_with_status_1() {
    let mut cmd = cargo_bin_cmd!("simplegram");
    cmd.arg("check").arg(grammar_path("overlap.grammar"));

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("The grammar isn't simple"))
        .stderr(predicate::str::contains("S -> a` overlaps an earlier alternative on `a`"));
}

#[test]
fn check_malformed_grammar_fails_with_status_2() {
    let mut cmd = cargo_bin_cmd!("simplegram");
    cmd.arg("check").arg(grammar_path("malformed.grammar"));

    let located = predicate::str::contains("malformed.grammar:3]")
        .and(predicate::str::contains("malformed.grammar:5]"))
        .and(predicate::str::contains("malformed.grammar:7]"));

    cmd.assert().code(2).stderr(located);
}

#[test]
fn check_missing_file_fails_with_status_2() {
    let mut cmd = cargo_bin_cmd!("simplegram");
    cmd.arg("check").arg(grammar_path("does_not_exist.grammar"));

    cmd.assert().code(2).stderr(predicate::str::contains("File error"));
}

#[test]
fn recognize_reads_stdin_lines() {
    let mut cmd = cargo_bin_cmd!("simplegram");
    cmd.arg("recognize").arg(grammar_path("simple.grammar"));
    cmd.write_stdin("aab\naa\nc\nac\n");

    let verdicts = predicate::str::contains("\"aab\": Accepted")
        .and(predicate::str::contains("\"aa\": Rejected"))
        .and(predicate::str::contains("\"c\": Accepted"))
        .and(predicate::str::contains("\"ac\": Rejected"));

    cmd.assert().success().stdout(verdicts);
}

#[test]
fn recognize_starts_from_the_first_nonterminal() {
    // `b` is a sentence of B but not of S, the first nonterminal in the file
    let mut cmd = cargo_bin_cmd!("simplegram");
    cmd.arg("recognize").arg(grammar_path("simple.grammar")).arg("b");
    cmd.assert().success().stdout(predicate::str::contains("\"b\": Rejected"));

    let mut cmd = cargo_bin_cmd!("simplegram");
    cmd.arg("recognize").arg(grammar_path("simple.grammar")).arg("-s").arg("B").arg("b");
    cmd.assert().success().stdout(predicate::str::contains("\"b\": Accepted"));
}

#[test]
fn recognize_trace_shows_the_derivation() {
    let mut cmd = cargo_bin_cmd!("simplegram");
    cmd.arg("recognize").arg(grammar_path("simple.grammar")).arg("--trace").arg("ab").arg("ac");

    let trace = predicate::str::contains("    S -> aB")
        .and(predicate::str::contains("    B -> b"))
        .and(predicate::str::contains("No rule for `B` starts with `c`"));

    cmd.assert().success().stdout(trace);
}

#[test]
fn recognize_refuses_grammars_that_are_not_simple() {
    let mut cmd = cargo_bin_cmd!("simplegram");
    cmd.arg("recognize").arg(grammar_path("shape.grammar")).arg("a");

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("Accepted").not())
        .stderr(predicate::str::contains("more than one nonterminal"));
}

#[test]
fn unreadable_stdin_fails_with_status_2() {
    let mut cmd = cargo_bin_cmd!("simplegram");
    cmd.arg("recognize").arg(grammar_path("simple.grammar"));
    cmd.write_stdin(b"aab\n\xff\xfe\nc\n".to_vec());

    cmd.assert()
        .code(2)
        .stdout(predicate::str::contains("\"aab\": Accepted"))
        .stdout(predicate::str::contains("\"c\"").not())
        .stderr(predicate::str::contains("<stdin>").and(predicate::str::contains("File error")));
}

#[test]
fn generate_prints_the_requested_amount() {
    let mut cmd = cargo_bin_cmd!("simplegram");
    cmd.arg("generate").arg(grammar_path("list.grammar")).arg("-n").arg("3").arg("--seed").arg("7");

    let output = cmd.assert().success().get_output().stdout.clone();
    let sentences = String::from_utf8(output).unwrap();

    assert_eq!(sentences.lines().count(), 3);
    assert!(sentences.lines().all(|sentence| sentence.starts_with('i') && sentence.ends_with(';')));
}

#[test]
fn scan_argument_text() {
    let mut cmd = cargo_bin_cmd!("simplegram");
    cmd.arg("scan").arg("int x = 42;");

    let tokens = predicate::str::contains("Type: KEYWORD")
        .and(predicate::str::contains("Type: IDENTIFIER"))
        .and(predicate::str::contains("Type: NUMBER"))
        .and(predicate::str::contains("Type: SPECIAL_CHAR"));

    cmd.assert().success().stdout(tokens);
}
