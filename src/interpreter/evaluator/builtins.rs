use std::io::{self, BufRead, Write};

use crate::{
    error::RuntimeError,
    interpreter::value::core::{Arity, Builtin, Value},
    util::num::{f64_to_i64_truncated, float_literal},
};

/// Defines the builtin functions by generating the static lookup table.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the builtin,
/// - a one-line description for `help()`.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr,
                help: $help:literal $(,)?
            }
        ),* $(,)?
    ) => {
        static BUILTIN_TABLE: &[Builtin] = &[
            $(
                Builtin { name: $name, arity: $arity, func: $func, help: $help },
            )*
        ];
        /// The names of every builtin function.
        pub const BUILTIN_NAMES: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "len"    => { arity: Arity::Exact(1),  func: len,      help: "length of a string, array or hash" },
    "first"  => { arity: Arity::Exact(1),  func: first,    help: "first element of an array, null when empty" },
    "last"   => { arity: Arity::Exact(1),  func: last,     help: "last element of an array, null when empty" },
    "rest"   => { arity: Arity::Exact(1),  func: rest,     help: "a new array without the first element" },
    "push"   => { arity: Arity::Exact(2),  func: push,     help: "a new array with an element appended" },
    "puts"   => { arity: Arity::Variadic,  func: puts,     help: "print each argument on its own line" },
    "gets"   => { arity: Arity::AtMost(1), func: gets,     help: "read one line of input, with an optional prompt" },
    "type"   => { arity: Arity::Exact(1),  func: type_of,  help: "the type name of a value as a string" },
    "int"    => { arity: Arity::Exact(1),  func: int,      help: "convert a string or number to an integer" },
    "str"    => { arity: Arity::Exact(1),  func: str_of,   help: "the display form of a value as a string" },
    "abs"    => { arity: Arity::Exact(1),  func: abs,      help: "absolute value of a number" },
    "sumarr" => { arity: Arity::Exact(1),  func: sumarr,   help: "sum of an array of numbers" },
    "zip"    => { arity: Arity::Exact(2),  func: zip,      help: "pair up two arrays, truncated to the shorter" },
    "exit"   => { arity: Arity::AtMost(1), func: exit,     help: "terminate with an optional status code" },
    "help"   => { arity: Arity::Exact(0),  func: help,     help: "print this overview" },
}

/// Looks a builtin up by name.
///
/// Identifier resolution calls this after the environment chain misses, so
/// builtins behave like globals that can be shadowed by bindings.
///
/// # Example
/// ```
/// use simian::interpreter::evaluator::builtins::lookup;
///
/// assert!(lookup("len").is_some());
/// assert!(lookup("frobnicate").is_none());
/// ```
#[must_use]
pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTIN_TABLE.iter().find(|builtin| builtin.name == name)
}

/// Gives the length of a string (in characters), array, or hash.
fn len(args: Vec<Value>) -> Result<Value, RuntimeError> {
    let length = match &args[0] {
        Value::Str(s) => s.chars().count(),
        Value::Array(elements) => elements.len(),
        Value::Hash(hash) => hash.len(),
        other => {
            return Err(RuntimeError::ArgumentNotSupported { builtin:   "len",
                                                            type_name: other.type_name(), });
        },
    };

    i64::try_from(length).map(Value::Integer)
                         .map_err(|_| RuntimeError::IntegerOverflow)
}

/// Returns the first element of an array.
fn first(args: Vec<Value>) -> Result<Value, RuntimeError> {
    match &args[0] {
        Value::Array(elements) => Ok(elements.first().cloned().unwrap_or(Value::Null)),
        other => Err(RuntimeError::ArgumentNotSupported { builtin:   "first",
                                                          type_name: other.type_name(), }),
    }
}

/// Returns the last element of an array.
fn last(args: Vec<Value>) -> Result<Value, RuntimeError> {
    match &args[0] {
        Value::Array(elements) => Ok(elements.last().cloned().unwrap_or(Value::Null)),
        other => Err(RuntimeError::ArgumentNotSupported { builtin:   "last",
                                                          type_name: other.type_name(), }),
    }
}

/// Returns a new array holding every element but the first.
fn rest(args: Vec<Value>) -> Result<Value, RuntimeError> {
    match &args[0] {
        Value::Array(elements) => {
            if elements.is_empty() {
                Ok(Value::Null)
            } else {
                Ok(Value::from(elements[1..].to_vec()))
            }
        },
        other => Err(RuntimeError::ArgumentNotSupported { builtin:   "rest",
                                                          type_name: other.type_name(), }),
    }
}

/// Returns a new array with an element appended; the original is unchanged.
fn push(args: Vec<Value>) -> Result<Value, RuntimeError> {
    match &args[0] {
        Value::Array(elements) => {
            let mut pushed = elements.as_ref().clone();
            pushed.push(args[1].clone());
            Ok(Value::from(pushed))
        },
        other => Err(RuntimeError::ArgumentNotSupported { builtin:   "push",
                                                          type_name: other.type_name(), }),
    }
}

/// Prints each argument's display form followed by a newline.
#[allow(clippy::unnecessary_wraps)]
fn puts(args: Vec<Value>) -> Result<Value, RuntimeError> {
    for arg in &args {
        println!("{arg}");
    }

    Ok(Value::Null)
}

/// Reads one line from standard input, without its trailing newline.
///
/// An optional string argument is written first, as a prompt. A closed input
/// yields the empty string.
fn gets(args: Vec<Value>) -> Result<Value, RuntimeError> {
    if let Some(prompt) = args.first() {
        match prompt {
            Value::Str(prompt) => {
                print!("{prompt}");
                io::stdout().flush().ok();
            },
            other => {
                return Err(RuntimeError::ArgumentNotSupported { builtin:   "gets",
                                                                type_name: other.type_name(), });
            },
        }
    }

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).ok();

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }

    Ok(Value::from(line.as_str()))
}

/// Returns the type name of a value.
#[allow(clippy::unnecessary_wraps)]
fn type_of(args: Vec<Value>) -> Result<Value, RuntimeError> {
    Ok(Value::from(args[0].type_name()))
}

/// Converts a string or number to an integer.
///
/// Strings parse as decimal integers; floats truncate toward zero; integers
/// pass through. Anything unparseable or unrepresentable is an error.
fn int(args: Vec<Value>) -> Result<Value, RuntimeError> {
    match &args[0] {
        Value::Integer(n) => Ok(Value::Integer(*n)),

        Value::Float(r) => {
            f64_to_i64_truncated(*r).map(Value::Integer)
                                    .ok_or_else(|| RuntimeError::IntegerConversion {
                                        literal: float_literal(*r),
                                    })
        },

        Value::Str(s) => {
            s.trim()
             .parse::<i64>()
             .map(Value::Integer)
             .map_err(|_| RuntimeError::IntegerConversion { literal: s.to_string(), })
        },

        other => Err(RuntimeError::ArgumentNotSupported { builtin:   "int",
                                                          type_name: other.type_name(), }),
    }
}

/// Converts any value to its display form as a string.
#[allow(clippy::unnecessary_wraps)]
fn str_of(args: Vec<Value>) -> Result<Value, RuntimeError> {
    Ok(Value::from(args[0].to_string().as_str()))
}

/// Gives the absolute value of a number.
fn abs(args: Vec<Value>) -> Result<Value, RuntimeError> {
    match &args[0] {
        Value::Integer(n) => {
            n.checked_abs()
             .map(Value::Integer)
             .ok_or(RuntimeError::IntegerOverflow)
        },
        Value::Float(r) => Ok(Value::Float(r.abs())),
        other => Err(RuntimeError::ArgumentNotSupported { builtin:   "abs",
                                                          type_name: other.type_name(), }),
    }
}

/// Sums an array of numbers.
///
/// An all-integer array sums with checked `i64` arithmetic; any float
/// switches the sum to `f64`. The empty array sums to `Integer(0)`.
fn sumarr(args: Vec<Value>) -> Result<Value, RuntimeError> {
    let Value::Array(elements) = &args[0] else {
        return Err(RuntimeError::ArgumentNotSupported { builtin:   "sumarr",
                                                        type_name: args[0].type_name(), });
    };

    for element in elements.iter() {
        if !element.is_numeric() {
            return Err(RuntimeError::ArgumentNotSupported { builtin:   "sumarr",
                                                            type_name: element.type_name(), });
        }
    }

    if elements.iter().all(Value::is_integer) {
        let mut sum = 0i64;
        for element in elements.iter() {
            if let Value::Integer(n) = element {
                sum = sum.checked_add(*n).ok_or(RuntimeError::IntegerOverflow)?;
            }
        }
        return Ok(Value::Integer(sum));
    }

    #[allow(clippy::cast_precision_loss)]
    let sum = elements.iter()
                      .map(|element| match element {
                          Value::Integer(n) => *n as f64,
                          Value::Float(r) => *r,
                          _ => unreachable!("non-numbers were rejected above"),
                      })
                      .sum();

    Ok(Value::Float(sum))
}

/// Pairs up the elements of two arrays.
///
/// The result is an array of two-element arrays, truncated to the shorter
/// input.
fn zip(args: Vec<Value>) -> Result<Value, RuntimeError> {
    let Value::Array(left) = &args[0] else {
        return Err(RuntimeError::ArgumentNotSupported { builtin:   "zip",
                                                        type_name: args[0].type_name(), });
    };
    let Value::Array(right) = &args[1] else {
        return Err(RuntimeError::ArgumentNotSupported { builtin:   "zip",
                                                        type_name: args[1].type_name(), });
    };

    let pairs = left.iter()
                    .zip(right.iter())
                    .map(|(a, b)| Value::from(vec![a.clone(), b.clone()]))
                    .collect::<Vec<_>>();

    Ok(Value::from(pairs))
}

/// Terminates the host process.
///
/// The optional integer argument becomes the exit code; the default is 0.
/// This builtin never returns a value.
fn exit(args: Vec<Value>) -> Result<Value, RuntimeError> {
    let code = match args.first() {
        None => 0,
        Some(Value::Integer(code)) => i32::try_from(*code).unwrap_or(i32::MAX),
        Some(other) => {
            return Err(RuntimeError::ArgumentNotSupported { builtin:   "exit",
                                                            type_name: other.type_name(), });
        },
    };

    std::process::exit(code);
}

/// Prints one line per builtin: its name and what it does.
#[allow(clippy::unnecessary_wraps)]
fn help(_args: Vec<Value>) -> Result<Value, RuntimeError> {
    for builtin in BUILTIN_TABLE {
        println!("{:<8}{}", builtin.name, builtin.help);
    }

    Ok(Value::Null)
}
