use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Floating-point literal tokens, such as `3.14`. A digit sequence with a
    /// trailing `.` but no fractional digits is rejected as illegal.
    #[regex(r"[0-9]+\.[0-9]+", parse_float)]
    #[regex(r"[0-9]+\.", malformed_number)]
    Float(f64),
    /// Integer literal tokens, such as `42`. Literals outside the `i64`
    /// range are rejected as illegal.
    #[regex(r"[0-9]+", parse_integer)]
    Int(i64),
    /// String literal tokens. The stored value has escape sequences
    /// processed; the unterminated form (no closing `"` before the end of the
    /// line) is rejected as illegal.
    #[regex(r#""([^"\\]|\\.)*""#, parse_string)]
    #[regex(r#""([^"\\\n]|\\[^\n])*"#, unterminated_string)]
    Str(String),
    /// Boolean literal tokens: `true` or `false`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// `fn`
    #[token("fn")]
    Function,
    /// `let`
    #[token("let")]
    Let,
    /// `const`
    #[token("const")]
    Const,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `return`
    #[token("return")]
    Return,
    /// `while`
    #[token("while")]
    While,
    /// Identifier tokens; binding names such as `x` or `counter`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `==`
    #[token("==")]
    Equal,
    /// `!=`
    #[token("!=")]
    NotEqual,
    /// `=`
    #[token("=")]
    Assign,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `!`
    #[token("!")]
    Bang,
    /// `*`
    #[token("*")]
    Asterisk,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `:`
    #[token(":")]
    Colon,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip)]
    Comment,
    /// Newlines are whitespace, but advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Tokenizes a complete source string.
///
/// Every recognized token is paired with the line it started on. Input the
/// lexer cannot match (malformed numbers, unterminated strings, stray
/// characters) is collected as [`ParseError::IllegalToken`] entries carrying
/// the offending slice; lexing continues behind the bad input so several
/// problems are reported in one pass.
///
/// # Parameters
/// - `source`: The source text.
///
/// # Returns
/// The token stream and any illegal-token errors.
///
/// # Example
/// ```
/// use simian::interpreter::lexer::{Token, lex};
///
/// let (tokens, errors) = lex("let five = 5;");
///
/// assert!(errors.is_empty());
/// assert_eq!(tokens[0].0, Token::Let);
/// assert_eq!(tokens[1].0, Token::Identifier("five".to_string()));
/// assert_eq!(tokens[2].0, Token::Assign);
/// assert_eq!(tokens[3].0, Token::Int(5));
/// ```
#[must_use]
pub fn lex(source: &str) -> (Vec<(Token, usize)>, Vec<ParseError>) {
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    while let Some(item) = lexer.next() {
        match item {
            Ok(token) => tokens.push((token, lexer.extras.line)),
            Err(()) => {
                errors.push(ParseError::IllegalToken { token: lexer.slice().to_string(),
                                                       line:  lexer.extras.line, });
            },
        }
    }

    (tokens, errors)
}

/// Parses a floating-point literal from the current token slice.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Rejects a digit sequence with a trailing `.` but no fractional digits.
fn malformed_number(_: &mut logos::Lexer<Token>) -> Option<f64> {
    None
}

/// Rejects a string literal that never closes before the end of the line.
fn unterminated_string(_: &mut logos::Lexer<Token>) -> Option<String> {
    None
}

/// Parses an integer literal from the current token slice.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Parses a boolean literal from the current token slice.
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Processes the escape sequences of a string literal.
///
/// The surrounding quotes are dropped. `\"`, `\\`, `\n` and `\t` translate to
/// their characters; an unrecognized escape keeps its backslash verbatim.
/// Literal newlines inside the string advance the lexer's line counter.
fn parse_string(lex: &mut logos::Lexer<Token>) -> Option<String> {
    let slice = lex.slice();
    let raw = &slice[1..slice.len() - 1];

    lex.extras.line += raw.chars().filter(|&c| c == '\n').count();

    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => value.push('"'),
            Some('\\') => value.push('\\'),
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some(other) => {
                value.push('\\');
                value.push(other);
            },
            None => value.push('\\'),
        }
    }

    Some(value)
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Float(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "\"{value}\""),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::Function => write!(f, "fn"),
            Self::Let => write!(f, "let"),
            Self::Const => write!(f, "const"),
            Self::If => write!(f, "if"),
            Self::Else => write!(f, "else"),
            Self::Return => write!(f, "return"),
            Self::While => write!(f, "while"),
            Self::Equal => write!(f, "=="),
            Self::NotEqual => write!(f, "!="),
            Self::Assign => write!(f, "="),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Bang => write!(f, "!"),
            Self::Asterisk => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Percent => write!(f, "%"),
            Self::Less => write!(f, "<"),
            Self::Greater => write!(f, ">"),
            Self::Comma => write!(f, ","),
            Self::Semicolon => write!(f, ";"),
            Self::Colon => write!(f, ":"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LBrace => write!(f, "{{"),
            Self::RBrace => write!(f, "}}"),
            Self::LBracket => write!(f, "["),
            Self::RBracket => write!(f, "]"),
            Self::Comment | Self::NewLine | Self::Ignored => Ok(()),
        }
    }
}
