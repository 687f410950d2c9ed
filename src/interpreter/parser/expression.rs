use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Expr, PrefixOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, Precedence, parse_expression, parse_grouped},
            statement::parse_block,
            utils::{expect_token, parse_comma_separated, parse_identifier},
        },
    },
};

/// Parses the prefix position of an expression.
///
/// The consumed token selects the rule: literals and identifiers stand for
/// themselves, `!` and `-` wrap their operand, `(` groups, `if` and `fn`
/// introduce their composite forms, and `[` and `{` open the container
/// literals.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of an expression.
///
/// # Returns
/// The parsed expression node.
///
/// # Errors
/// - [`ParseError::NoPrefixRule`] when the token cannot start an expression.
/// - [`ParseError::UnexpectedEndOfInput`] when the stream is exhausted.
/// - Propagated errors from nested rules.
pub fn parse_prefix<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Int(value), line)) => Ok(Expr::IntegerLiteral { value: *value,
                                                                     line:  *line, }),

        Some((Token::Float(value), line)) => Ok(Expr::FloatLiteral { value: *value,
                                                                     line:  *line, }),

        Some((Token::Str(value), line)) => Ok(Expr::StringLiteral { value: value.clone(),
                                                                    line:  *line, }),

        Some((Token::Bool(value), line)) => Ok(Expr::BooleanLiteral { value: *value,
                                                                      line:  *line, }),

        Some((Token::Identifier(name), line)) => Ok(Expr::Identifier { name: name.clone(),
                                                                       line: *line, }),

        Some((Token::Bang, line)) => parse_prefix_operator(tokens, PrefixOperator::Not, *line),

        Some((Token::Minus, line)) => parse_prefix_operator(tokens, PrefixOperator::Negate, *line),

        Some((Token::LParen, _)) => parse_grouped(tokens),

        Some((Token::If, line)) => parse_if(tokens, *line),

        Some((Token::Function, line)) => parse_function_literal(tokens, *line),

        Some((Token::LBracket, line)) => {
            let elements = parse_comma_separated(tokens,
                                                 |tokens| {
                                                     parse_expression(tokens, Precedence::Lowest)
                                                 },
                                                 &Token::RBracket)?;
            Ok(Expr::Array { elements,
                             line: *line })
        },

        Some((Token::LBrace, line)) => parse_hash_literal(tokens, *line),

        Some((token, line)) => Err(ParseError::NoPrefixRule { token: token.to_string(),
                                                              line:  *line, }),

        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses the operand of a prefix operator, which binds tighter than any
/// binary operator.
fn parse_prefix_operator<'a, I>(tokens: &mut Peekable<I>,
                                op: PrefixOperator,
                                line: usize)
                                -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let right = parse_expression(tokens, Precedence::Prefix)?;
    Ok(Expr::Prefix { op,
                      right: Box::new(right),
                      line })
}

/// Parses an `if` expression with an optional `else` branch.
///
/// Syntax:
/// ```text
///     if (<condition>) { <consequence> }
///     if (<condition>) { <consequence> } else { <alternative> }
/// ```
/// Both branches are blocks; the whole form is an expression producing the
/// chosen branch's value.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `if` keyword.
/// - `line`: Line number of the `if` token.
///
/// # Returns
/// An `Expr::If` node.
///
/// # Errors
/// - `UnexpectedToken` if the parentheses or braces are missing.
/// - Propagates any errors from sub-expression parsing.
fn parse_if<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect_token(tokens, &Token::LParen, "'(' after 'if'")?;
    let condition = parse_expression(tokens, Precedence::Lowest)?;
    expect_token(tokens, &Token::RParen, "')' after the condition")?;

    let consequence = parse_block(tokens)?;

    let alternative = if let Some((Token::Else, _)) = tokens.peek() {
        tokens.next();
        Some(parse_block(tokens)?)
    } else {
        None
    };

    Ok(Expr::If { condition: Box::new(condition),
                  consequence,
                  alternative,
                  line })
}

/// Parses a function literal: `fn(<params>) { <body> }`.
///
/// Parameters are a possibly empty comma-separated list of identifiers.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `fn` keyword.
/// - `line`: Line number of the `fn` token.
///
/// # Returns
/// An `Expr::Function` node.
///
/// # Errors
/// - `UnexpectedToken` if the parameter list or body delimiters are missing.
/// - Propagates any errors from the body.
fn parse_function_literal<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect_token(tokens, &Token::LParen, "'(' after 'fn'")?;
    let parameters = parse_comma_separated(tokens, parse_identifier, &Token::RParen)?;
    let body = parse_block(tokens)?;

    Ok(Expr::Function { parameters,
                        body: Rc::new(body),
                        line })
}

/// Parses a hash literal: `{ <key>: <value>, ... }`.
///
/// The empty form `{}` is the empty hash. A trailing comma is not permitted.
/// Pair order is preserved; duplicate keys are resolved at evaluation time.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the opening `{`.
/// - `line`: Line number of the `{` token.
///
/// # Returns
/// An `Expr::Hash` node with its pairs in source order.
///
/// # Errors
/// - `UnexpectedToken` if a `:` is missing or a pair is not followed by `,`
///   or `}`.
/// - Propagates any errors from key and value expressions.
fn parse_hash_literal<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut pairs = Vec::new();

    if let Some((Token::RBrace, _)) = tokens.peek() {
        tokens.next();
        return Ok(Expr::Hash { pairs, line });
    }

    loop {
        let key = parse_expression(tokens, Precedence::Lowest)?;
        expect_token(tokens, &Token::Colon, "':' after a hash key")?;
        let value = parse_expression(tokens, Precedence::Lowest)?;
        pairs.push((key, value));

        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((Token::RBrace, _)) => break,
            Some((token, line)) => {
                return Err(ParseError::UnexpectedToken { expected: "',' or '}'",
                                                         found:    token.to_string(),
                                                         line:     *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }

    Ok(Expr::Hash { pairs, line })
}

/// Parses a call expression in infix position.
///
/// `left` is the callee; the upcoming `(` is consumed here, followed by a
/// possibly empty comma-separated argument list.
pub fn parse_call<'a, I>(tokens: &mut Peekable<I>, left: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = match tokens.next() {
        Some((Token::LParen, line)) => *line,
        _ => unreachable!("the caller peeked '('"),
    };

    let arguments = parse_comma_separated(tokens,
                                          |tokens| parse_expression(tokens, Precedence::Lowest),
                                          &Token::RParen)?;

    Ok(Expr::Call { function: Box::new(left),
                    arguments,
                    line })
}

/// Parses an index expression in infix position: `left[index]`.
pub fn parse_index<'a, I>(tokens: &mut Peekable<I>, left: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = match tokens.next() {
        Some((Token::LBracket, line)) => *line,
        _ => unreachable!("the caller peeked '['"),
    };

    let index = parse_expression(tokens, Precedence::Lowest)?;
    expect_token(tokens, &Token::RBracket, "']' after the index")?;

    Ok(Expr::Index { left: Box::new(left),
                     index: Box::new(index),
                     line })
}
