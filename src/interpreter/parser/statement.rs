use std::iter::Peekable;

use crate::{
    ast::{Block, Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, Precedence, parse_expression},
            utils::{expect_token, parse_identifier},
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a binding (`let` or `const`),
/// - a `return` statement,
/// - a `while` loop,
/// - a reassignment (`<identifier> = <expression>`),
/// - an expression used as a statement.
///
/// Dispatch is on the current token; reassignment needs one extra token of
/// lookahead to distinguish `x = 1` from the expression `x`. A trailing `;`
/// is consumed when present.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let statement = match tokens.peek() {
        Some((Token::Let, _)) => parse_binding(tokens, true)?,
        Some((Token::Const, _)) => parse_binding(tokens, false)?,
        Some((Token::Return, _)) => parse_return(tokens)?,
        Some((Token::While, _)) => parse_while(tokens)?,
        _ => parse_expression_statement(tokens)?,
    };

    if let Some((Token::Semicolon, _)) = tokens.peek() {
        tokens.next();
    }

    Ok(statement)
}

/// Parses a binding statement: `let <name> = <expression>` or
/// `const <name> = <expression>`.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the `let` or `const` keyword.
/// - `mutable`: `true` for `let`, `false` for `const`.
///
/// # Returns
/// A `Statement::Let` node carrying the mutability flag.
///
/// # Errors
/// Returns a `ParseError` if the name or `=` is missing, or the initializer
/// fails to parse.
fn parse_binding<'a, I>(tokens: &mut Peekable<I>, mutable: bool) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = match tokens.next() {
        Some((_, line)) => *line,
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    let name = parse_identifier(tokens)?;
    expect_token(tokens, &Token::Assign, "'=' after the binding name")?;
    let value = parse_expression(tokens, Precedence::Lowest)?;

    Ok(Statement::Let { name,
                        value,
                        mutable,
                        line })
}

/// Parses a `return` statement: `return <expression>`.
fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = match tokens.next() {
        Some((_, line)) => *line,
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    let value = parse_expression(tokens, Precedence::Lowest)?;

    Ok(Statement::Return { value, line })
}

/// Parses a `while` loop: `while (<condition>) { <body> }`.
///
/// # Errors
/// Returns a `ParseError` if the parentheses or body braces are missing, or
/// the condition fails to parse.
fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = match tokens.next() {
        Some((_, line)) => *line,
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    expect_token(tokens, &Token::LParen, "'(' after 'while'")?;
    let condition = parse_expression(tokens, Precedence::Lowest)?;
    expect_token(tokens, &Token::RParen, "')' after the condition")?;
    let body = parse_block(tokens)?;

    Ok(Statement::While { condition,
                          body,
                          line })
}

/// Parses an expression statement, recognizing reassignment first.
///
/// The reassignment form `<identifier> = <expression>` is detected with a
/// cloned one-token lookahead: an identifier directly followed by `=`. It
/// parses to an expression statement whose expression is an `Expr::Assign`
/// node, so a reassignment yields the assigned value. Everything else is a
/// plain expression statement.
fn parse_expression_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Identifier(_), _)) = tokens.peek() {
        let mut lookahead = tokens.clone();
        lookahead.next();

        if let Some((Token::Assign, _)) = lookahead.peek() {
            let (name, line) = match tokens.next() {
                Some((Token::Identifier(name), line)) => (name.clone(), *line),
                _ => unreachable!("peeked an identifier"),
            };
            tokens.next();

            let value = parse_expression(tokens, Precedence::Lowest)?;
            let expr = Expr::Assign { name,
                                      value: Box::new(value),
                                      line };

            return Ok(Statement::Expression { expr, line });
        }
    }

    let line = tokens.peek().map_or(0, |(_, line)| *line);
    let expr = parse_expression(tokens, Precedence::Lowest)?;

    Ok(Statement::Expression { expr, line })
}

/// Parses a brace-delimited block of statements.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the opening `{`.
///
/// # Returns
/// A [`Block`] with its statements in source order.
///
/// # Errors
/// Returns a `ParseError` if the braces are missing or unbalanced, or a
/// contained statement fails to parse.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Block>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect_token(tokens, &Token::LBrace, "'{'")?;
    let mut statements = Vec::new();

    loop {
        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                return Ok(Block { statements, line });
            },
            Some(_) => statements.push(parse_statement(tokens)?),
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }
}
