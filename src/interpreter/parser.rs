use std::iter::Peekable;

use crate::{
    ast::Program,
    error::ParseError,
    interpreter::{lexer::Token, parser::statement::parse_statement},
};

/// The Pratt expression parser.
///
/// Declares the precedence ladder and the precedence-driven expression loop
/// that prefix and infix rules plug into.
pub mod core;
/// Prefix and infix expression rules.
///
/// Literals, identifiers, grouping, operators, conditionals, function
/// literals, calls, indexing, and array and hash literals.
pub mod expression;
/// Statement parsing.
///
/// Bindings, `return`, `while`, reassignment detection and expression
/// statements, plus brace-delimited blocks.
pub mod statement;
/// Shared parsing helpers for lists, identifiers and expected tokens.
pub mod utils;

/// Parses a complete token stream into a program.
///
/// Parsing keeps going after a failed statement: the error is recorded, the
/// stream is synchronized to the next statement boundary, and parsing
/// resumes, so one pass reports as many independent errors as possible.
///
/// # Parameters
/// - `tokens`: The `(token, line)` stream produced by the lexer.
///
/// # Returns
/// The program built from every statement that parsed, together with all
/// collected errors. Callers treat a non-empty error list as failure.
///
/// # Example
/// ```
/// use simian::interpreter::{lexer::lex, parser::parse_program};
///
/// let (tokens, _) = lex("let x = 1; x + 2");
/// let (program, errors) = parse_program(&tokens);
///
/// assert!(errors.is_empty());
/// assert_eq!(program.statements.len(), 2);
/// ```
#[must_use]
pub fn parse_program(tokens: &[(Token, usize)]) -> (Program, Vec<ParseError>) {
    let mut iter = tokens.iter().peekable();
    let mut statements = Vec::new();
    let mut errors = Vec::new();

    while iter.peek().is_some() {
        match parse_statement(&mut iter) {
            Ok(statement) => statements.push(statement),
            Err(error) => {
                errors.push(error);
                synchronize(&mut iter);
            },
        }
    }

    (Program { statements }, errors)
}

/// Skips tokens up to the next statement boundary after a parse error.
///
/// The boundary is the token after the next `;`, or the next token that can
/// only begin a statement. Always consumes at least one token so the parsing
/// loop makes progress.
fn synchronize<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, usize)>
{
    while let Some((token, _)) = tokens.next() {
        if *token == Token::Semicolon {
            return;
        }

        if let Some((next, _)) = tokens.peek()
           && matches!(next, Token::Let | Token::Const | Token::Return | Token::While)
        {
            return;
        }
    }
}
