/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Parse errors include illegal tokens, unexpected tokens, and
/// truncated input.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Runtime
/// errors include unknown identifiers, type mismatches, unsupported
/// operators, division by zero, and misused builtins.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// The combined failure type of the `run_program` entry point.
///
/// A program either fails to parse, in which case every error collected in
/// the single parsing pass is reported, or it fails at runtime with exactly
/// one error.
#[derive(Debug)]
pub enum RunError {
    /// One or more errors from the lexing and parsing stage.
    Parse(Vec<ParseError>),
    /// The runtime error that stopped evaluation.
    Runtime(RuntimeError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(errors) => {
                for (i, error) in errors.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "parser error: {error}")?;
                }
                Ok(())
            },
            Self::Runtime(error) => write!(f, "ERROR: {error}"),
        }
    }
}

impl std::error::Error for RunError {}
