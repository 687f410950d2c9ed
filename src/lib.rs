//! # simian
//!
//! simian is a tree-walking interpreter for a Monkey dialect extended with
//! floating-point numbers, modulo, string equality, mutable bindings,
//! constants, `while` loops, and a small library of builtin functions.
//!
//! Source text flows one way: text is lexed into tokens, parsed into an
//! abstract syntax tree, and evaluated against a lexically scoped
//! environment. Functions are first-class closures capturing the environment
//! they were defined in.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::{environment::EnvRef, evaluator, lexer, parser, value::core::Value};

/// Defines the structure of parsed code.
///
/// This module declares the `Statement` and `Expr` enums and related types
/// that represent the syntactic structure of source code as a tree. The AST
/// is built by the parser and traversed by the evaluator; every node knows
/// how to print itself back as canonical source text.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing,
/// or evaluating code. Parse errors carry source lines; runtime errors carry
/// the exact messages programs observe.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and environments to provide a complete runtime for source
/// code evaluation.
pub mod interpreter;
/// General utilities for numeric conversion and formatting.
pub mod util;

pub use error::RunError;

/// Runs a source string in the given environment.
///
/// The source is lexed and parsed in one pass that accumulates errors; when
/// any are found, evaluation does not start and all of them are returned
/// together. Otherwise the program is evaluated in `env`, which keeps any
/// bindings it defines, so a persistent environment gives REPL semantics and
/// a fresh one gives script semantics.
///
/// # Parameters
/// - `source`: The program text.
/// - `env`: The environment to evaluate in.
///
/// # Returns
/// The final value the program produced, or `None` for programs ending in a
/// binding (or producing nothing at all).
///
/// # Errors
/// - [`RunError::Parse`]: The collected lexing and parsing errors.
/// - [`RunError::Runtime`]: The runtime error that stopped evaluation.
///
/// # Example
/// ```
/// use simian::{interpreter::environment::Environment, run_program};
///
/// let env = Environment::root();
///
/// let result = run_program("let x = 2; x * 3", &env).unwrap();
/// assert_eq!(result.unwrap().to_string(), "6");
///
/// // The environment persists between runs.
/// let result = run_program("x + 1", &env).unwrap();
/// assert_eq!(result.unwrap().to_string(), "3");
///
/// // Undefined names are runtime errors.
/// let result = run_program("y", &env);
/// assert!(result.is_err());
/// ```
pub fn run_program(source: &str, env: &EnvRef) -> Result<Option<Value>, RunError> {
    let (tokens, mut errors) = lexer::lex(source);

    let (program, parse_errors) = parser::parse_program(&tokens);
    errors.extend(parse_errors);

    if !errors.is_empty() {
        return Err(RunError::Parse(errors));
    }

    evaluator::core::eval_program(&program, env).map_err(RunError::Runtime)
}
