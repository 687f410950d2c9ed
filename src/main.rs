use std::{
    fs,
    io::{self, BufRead, Write},
    process::ExitCode,
};

use clap::Parser;
use simian::{RunError, interpreter::environment::Environment, run_program};

/// simian is a tree-walking interpreter for a Monkey dialect with floats,
/// constants and while loops.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a script to run. Starts the REPL when omitted.
    file: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match args.file {
        Some(path) => run_file(&path),
        None => repl(),
    }
}

/// Runs a script file in a fresh environment and prints its final value.
fn run_file(path: &str) -> ExitCode {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(_) => {
            eprintln!("Failed to read the input file '{path}'. Perhaps this file does not exist?");
            return ExitCode::FAILURE;
        },
    };

    let env = Environment::root();
    match run_program(&source, &env) {
        Ok(Some(value)) => {
            println!("{value}");
            ExitCode::SUCCESS
        },
        Ok(None) => ExitCode::SUCCESS,
        Err(RunError::Parse(errors)) => {
            for error in errors {
                eprintln!("parser error: {error}");
            }
            ExitCode::FAILURE
        },
        Err(RunError::Runtime(error)) => {
            eprintln!("ERROR: {error}");
            ExitCode::FAILURE
        },
    }
}

/// Reads lines from standard input and evaluates them in one persistent
/// environment, echoing each produced value.
fn repl() -> ExitCode {
    println!("simian {} (type exit() to leave)", env!("CARGO_PKG_VERSION"));

    let env = Environment::root();
    let stdin = io::stdin();

    loop {
        print!(">> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {},
        }

        if line.trim().is_empty() {
            continue;
        }

        match run_program(&line, &env) {
            Ok(Some(value)) => println!("{value}"),
            Ok(None) => {},
            Err(RunError::Parse(errors)) => {
                for error in errors {
                    println!("parser error: {error}");
                }
            },
            Err(RunError::Runtime(error)) => println!("ERROR: {error}"),
        }
    }

    ExitCode::SUCCESS
}
