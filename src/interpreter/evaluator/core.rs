use std::rc::Rc;

use crate::{
    ast::{Block, Expr, Program, Statement},
    error::RuntimeError,
    interpreter::{
        environment::{EnvRef, Environment},
        evaluator::{builtins, operators},
        value::{
            core::{FunctionValue, Value},
            hash_key::{HashKey, HashValue},
        },
    },
    util::num::index_to_usize,
};

/// A non-local exit traveling up the evaluation stack.
///
/// `return` statements and runtime errors short-circuit every enclosing
/// block, loop and container literal the same way; modeling both as the error
/// side of [`EvalResult`] lets `?` implement the propagation rule, and makes
/// it impossible for a container to hold a wrapped return or error.
#[derive(Debug)]
pub enum Interrupt {
    /// A `return` unwinding to the nearest function call (or the program).
    Return(Value),
    /// A runtime error unwinding to the top level.
    Error(RuntimeError),
}

impl From<RuntimeError> for Interrupt {
    fn from(error: RuntimeError) -> Self {
        Self::Error(error)
    }
}

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// [`Interrupt`] describing the non-local exit in progress.
pub type EvalResult<T> = Result<T, Interrupt>;

/// Evaluates a complete program.
///
/// Statements run in order. A top-level `return` stops the program and
/// unwraps to its value; a runtime error stops the program and is reported.
/// Otherwise the result is the value of the last statement that produced
/// one, or `None` for programs ending in a binding (or empty programs).
///
/// # Parameters
/// - `program`: The parsed program.
/// - `env`: The environment statements execute in.
///
/// # Returns
/// The final value, if any.
///
/// # Errors
/// Returns the first [`RuntimeError`] raised during evaluation.
///
/// # Example
/// ```
/// use simian::interpreter::{
///     environment::Environment,
///     evaluator::core::eval_program,
///     lexer::lex,
///     parser::parse_program,
///     value::core::Value,
/// };
///
/// let (tokens, _) = lex("let x = 2; x * 21");
/// let (program, errors) = parse_program(&tokens);
/// assert!(errors.is_empty());
///
/// let env = Environment::root();
/// let result = eval_program(&program, &env).unwrap();
///
/// assert_eq!(result, Some(Value::Integer(42)));
/// ```
pub fn eval_program(program: &Program, env: &EnvRef) -> Result<Option<Value>, RuntimeError> {
    let mut last = None;

    for statement in &program.statements {
        match eval_statement(statement, env) {
            Ok(value) => last = value,
            Err(Interrupt::Return(value)) => return Ok(Some(value)),
            Err(Interrupt::Error(error)) => return Err(error),
        }
    }

    Ok(last)
}

/// Evaluates a single statement.
///
/// Bindings produce no value; `while` loops produce `null`; expression
/// statements produce their expression's value; `return` raises a
/// [`Interrupt::Return`].
///
/// # Parameters
/// - `statement`: Statement to evaluate.
/// - `env`: The current environment.
///
/// # Returns
/// `Some(Value)` for statements that yield a result, or `None` when no value
/// is produced.
pub fn eval_statement(statement: &Statement, env: &EnvRef) -> EvalResult<Option<Value>> {
    match statement {
        Statement::Let { name,
                         value,
                         mutable,
                         .. } => {
            let value = eval_expression(value, env)?;
            env.borrow_mut().define(name, value, *mutable);
            Ok(None)
        },

        Statement::Return { value, .. } => {
            let value = eval_expression(value, env)?;
            Err(Interrupt::Return(value))
        },

        Statement::While { condition, body, .. } => {
            while eval_expression(condition, env)?.is_truthy() {
                eval_block(body, env)?;
            }
            Ok(Some(Value::Null))
        },

        Statement::Expression { expr, .. } => Ok(Some(eval_expression(expr, env)?)),
    }
}

/// Evaluates the statements of a block in order.
///
/// Blocks share the surrounding environment; only function calls open a new
/// frame. Interrupts pass through unhandled, so a `return` inside a nested
/// block still exits the enclosing function.
///
/// # Parameters
/// - `block`: The block to evaluate.
/// - `env`: The current environment.
///
/// # Returns
/// The value of the last statement that produced one.
pub fn eval_block(block: &Block, env: &EnvRef) -> EvalResult<Option<Value>> {
    let mut last = None;

    for statement in &block.statements {
        last = eval_statement(statement, env)?;
    }

    Ok(last)
}

/// Evaluates an expression to a value.
///
/// This is the evaluator's main dispatch: every expression variant either
/// produces a value or raises an [`Interrupt`].
///
/// # Parameters
/// - `expr`: Expression to evaluate.
/// - `env`: The current environment.
///
/// # Returns
/// The computed value.
pub fn eval_expression(expr: &Expr, env: &EnvRef) -> EvalResult<Value> {
    match expr {
        Expr::Identifier { name, .. } => Ok(eval_identifier(name, env)?),

        Expr::IntegerLiteral { value, .. } => Ok(Value::Integer(*value)),
        Expr::FloatLiteral { value, .. } => Ok(Value::Float(*value)),
        Expr::BooleanLiteral { value, .. } => Ok(Value::Bool(*value)),
        Expr::StringLiteral { value, .. } => Ok(Value::from(value.as_str())),

        Expr::Prefix { op, right, .. } => {
            let right = eval_expression(right, env)?;
            Ok(operators::eval_prefix(*op, &right)?)
        },

        Expr::Infix { left, op, right, .. } => {
            let left = eval_expression(left, env)?;
            let right = eval_expression(right, env)?;
            Ok(operators::eval_infix(*op, &left, &right)?)
        },

        Expr::If { condition,
                   consequence,
                   alternative,
                   .. } => eval_if(condition, consequence, alternative.as_ref(), env),

        Expr::Function { parameters, body, .. } => {
            Ok(Value::Function(Rc::new(FunctionValue { parameters: parameters.clone(),
                                                       body:       Rc::clone(body),
                                                       env:        Rc::clone(env), })))
        },

        Expr::Call { function, arguments, .. } => {
            let callee = eval_expression(function, env)?;

            let mut args = Vec::with_capacity(arguments.len());
            for argument in arguments {
                args.push(eval_expression(argument, env)?);
            }

            apply_function(&callee, args)
        },

        Expr::Array { elements, .. } => {
            let mut values = Vec::with_capacity(elements.len());
            for element in elements {
                values.push(eval_expression(element, env)?);
            }
            Ok(Value::from(values))
        },

        Expr::Index { left, index, .. } => {
            let left = eval_expression(left, env)?;
            let index = eval_expression(index, env)?;
            Ok(eval_index(&left, &index)?)
        },

        Expr::Hash { pairs, .. } => eval_hash_literal(pairs, env),

        Expr::Assign { name, value, .. } => {
            let value = eval_expression(value, env)?;
            env.borrow_mut().reassign(name, value.clone())?;
            Ok(value)
        },
    }
}

/// Resolves an identifier.
///
/// The environment chain is searched first; a miss falls back to the builtin
/// table, which is how builtins stay available without being bound anywhere.
fn eval_identifier(name: &str, env: &EnvRef) -> Result<Value, RuntimeError> {
    if let Some(value) = env.borrow().get(name) {
        return Ok(value);
    }

    if let Some(builtin) = builtins::lookup(name) {
        return Ok(Value::Builtin(builtin));
    }

    Err(RuntimeError::IdentifierNotFound { name: name.to_string(), })
}

/// Evaluates a conditional expression.
///
/// A truthy condition selects the consequence; otherwise the alternative is
/// selected when present. An unselected or empty branch yields `null`.
fn eval_if(condition: &Expr,
           consequence: &Block,
           alternative: Option<&Block>,
           env: &EnvRef)
           -> EvalResult<Value> {
    let condition = eval_expression(condition, env)?;

    if condition.is_truthy() {
        Ok(eval_block(consequence, env)?.unwrap_or(Value::Null))
    } else if let Some(alternative) = alternative {
        Ok(eval_block(alternative, env)?.unwrap_or(Value::Null))
    } else {
        Ok(Value::Null)
    }
}

/// Applies a callable value to already-evaluated arguments.
///
/// A user-defined function gets a fresh frame extending its captured
/// environment, with parameters bound positionally; its body's `return`
/// interrupt is unwrapped here, and a body without an explicit return yields
/// its last value (or `null`). Builtins check their arity contract and run
/// directly.
///
/// # Parameters
/// - `callee`: The value in call position.
/// - `args`: Evaluated arguments in call order.
///
/// # Returns
/// The call's result value.
///
/// # Errors
/// - [`RuntimeError::WrongNumberOfArguments`] on an arity mismatch.
/// - [`RuntimeError::NotAFunction`] when `callee` is not callable.
/// - Whatever the body or builtin raises.
pub fn apply_function(callee: &Value, args: Vec<Value>) -> EvalResult<Value> {
    match callee {
        Value::Function(function) => {
            if args.len() != function.parameters.len() {
                return Err(RuntimeError::WrongNumberOfArguments { expected:
                                                                      function.parameters.len(),
                                                                  got:      args.len(), }.into());
            }

            let env = Environment::enclosed(&function.env);
            for (parameter, argument) in function.parameters.iter().zip(args) {
                env.borrow_mut().define(parameter, argument, true);
            }

            match eval_block(&function.body, &env) {
                Ok(value) => Ok(value.unwrap_or(Value::Null)),
                Err(Interrupt::Return(value)) => Ok(value),
                Err(error) => Err(error),
            }
        },

        Value::Builtin(builtin) => {
            builtin.arity.check(args.len())?;
            Ok((builtin.func)(args)?)
        },

        other => Err(RuntimeError::NotAFunction { type_name: other.type_name(), }.into()),
    }
}

/// Evaluates an index operation on already-evaluated operands.
///
/// Array indices must be integers; negative and past-the-end indices yield
/// `null`. Hash lookups require a hashable key and yield `null` on a miss.
/// Indexing any other value is an error naming the container's type.
fn eval_index(left: &Value, index: &Value) -> Result<Value, RuntimeError> {
    match (left, index) {
        (Value::Array(elements), Value::Integer(i)) => {
            Ok(index_to_usize(*i).and_then(|i| elements.get(i))
                                 .cloned()
                                 .unwrap_or(Value::Null))
        },

        (Value::Hash(hash), key) => {
            let key = HashKey::try_from(key)?;
            Ok(hash.get(&key).cloned().unwrap_or(Value::Null))
        },

        (other, _) => Err(RuntimeError::IndexNotSupported { type_name: other.type_name(), }),
    }
}

/// Evaluates a hash literal.
///
/// Each key evaluates before its value; an unhashable key stops evaluation
/// before its value expression runs. Duplicate keys overwrite the earlier
/// entry while keeping its position.
fn eval_hash_literal(pairs: &[(Expr, Expr)], env: &EnvRef) -> EvalResult<Value> {
    let mut hash = HashValue::with_capacity(pairs.len());

    for (key_expr, value_expr) in pairs {
        let key_value = eval_expression(key_expr, env)?;
        let key = HashKey::try_from(&key_value)?;
        let value = eval_expression(value_expr, env)?;
        hash.insert(key, key_value, value);
    }

    Ok(Value::Hash(Rc::new(hash)))
}
