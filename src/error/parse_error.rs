#[derive(Debug)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// The lexer could not match the input against any token rule.
    IllegalToken {
        /// The offending source slice.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Found a token other than the one the grammar requires here.
    UnexpectedToken {
        /// Description of what was expected.
        expected: &'static str,
        /// The token encountered.
        found:    String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// No expression can start with the current token.
    NoPrefixRule {
        /// The token encountered.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Reached the end of input while a construct was still open.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IllegalToken { token, line } => {
                write!(f, "line {line}: illegal token '{token}'")
            },

            Self::UnexpectedToken { expected,
                                    found,
                                    line, } => {
                write!(f, "line {line}: expected {expected}, found '{found}'")
            },

            Self::NoPrefixRule { token, line } => {
                write!(f, "line {line}: no expression may start with '{token}'")
            },

            Self::UnexpectedEndOfInput { line } => {
                write!(f, "line {line}: unexpected end of input")
            },
        }
    }
}

impl std::error::Error for ParseError {}
