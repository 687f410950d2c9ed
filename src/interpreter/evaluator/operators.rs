use std::rc::Rc;

use crate::{
    ast::{InfixOperator, PrefixOperator},
    error::RuntimeError,
    interpreter::value::core::Value,
};

/// Evaluates a prefix operator applied to a value.
///
/// `!` maps any value to the negation of its truthiness. `-` negates
/// integers (checked) and floats; every other operand type is an error.
///
/// # Parameters
/// - `op`: The prefix operator.
/// - `right`: The evaluated operand.
///
/// # Returns
/// The computed value.
///
/// # Errors
/// - [`RuntimeError::UnknownPrefixOperator`] for `-` on a non-number.
/// - [`RuntimeError::IntegerOverflow`] for `-` on `i64::MIN`.
///
/// # Example
/// ```
/// use simian::{
///     ast::PrefixOperator,
///     interpreter::{evaluator::operators::eval_prefix, value::core::Value},
/// };
///
/// let value = eval_prefix(PrefixOperator::Negate, &Value::Integer(5)).unwrap();
/// assert_eq!(value, Value::Integer(-5));
///
/// let value = eval_prefix(PrefixOperator::Not, &Value::Integer(5)).unwrap();
/// assert_eq!(value, Value::Bool(false));
/// ```
pub fn eval_prefix(op: PrefixOperator, right: &Value) -> Result<Value, RuntimeError> {
    match op {
        PrefixOperator::Not => Ok(Value::Bool(!right.is_truthy())),

        PrefixOperator::Negate => match right {
            Value::Integer(n) => {
                n.checked_neg()
                 .map(Value::Integer)
                 .ok_or(RuntimeError::IntegerOverflow)
            },
            Value::Float(r) => Ok(Value::Float(-r)),
            other => Err(RuntimeError::UnknownPrefixOperator { op,
                                                               type_name: other.type_name(), }),
        },
    }
}

/// Evaluates an infix operator applied to two values.
///
/// Operand types resolve in a fixed order: two integers use integer
/// arithmetic; any numeric mix promotes to floats; two strings support
/// concatenation and equality; two booleans support equality. Everything
/// else is a type mismatch when the operand types differ, or an unknown
/// operator when they match.
///
/// # Parameters
/// - `op`: The infix operator.
/// - `left`: The evaluated left operand.
/// - `right`: The evaluated right operand.
///
/// # Returns
/// The computed value.
///
/// # Errors
/// - [`RuntimeError::DivisionByZero`] for `/` or `%` with a zero divisor.
/// - [`RuntimeError::IntegerOverflow`] when integer arithmetic leaves `i64`.
/// - [`RuntimeError::TypeMismatch`] for operands of differing types.
/// - [`RuntimeError::UnknownInfixOperator`] for unsupported operators.
///
/// # Example
/// ```
/// use simian::{
///     ast::InfixOperator,
///     interpreter::{evaluator::operators::eval_infix, value::core::Value},
/// };
///
/// let value = eval_infix(InfixOperator::Add, &Value::Integer(1), &Value::Float(2.0)).unwrap();
/// assert_eq!(value, Value::Float(3.0));
///
/// let value = eval_infix(InfixOperator::Equal, &Value::Integer(1), &Value::Float(1.0)).unwrap();
/// assert_eq!(value, Value::Bool(true));
/// ```
pub fn eval_infix(op: InfixOperator, left: &Value, right: &Value) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => eval_integer_infix(op, *a, *b),

        (a, b) if a.is_numeric() && b.is_numeric() => {
            eval_float_infix(op, numeric_as_f64(a), numeric_as_f64(b))
        },

        (Value::Str(a), Value::Str(b)) => eval_string_infix(op, a, b),

        (Value::Bool(a), Value::Bool(b)) => match op {
            InfixOperator::Equal => Ok(Value::Bool(a == b)),
            InfixOperator::NotEqual => Ok(Value::Bool(a != b)),
            _ => Err(RuntimeError::UnknownInfixOperator { left: left.type_name(),
                                                          op,
                                                          right: right.type_name() }),
        },

        _ => {
            if left.type_name() == right.type_name() {
                Err(RuntimeError::UnknownInfixOperator { left: left.type_name(),
                                                         op,
                                                         right: right.type_name() })
            } else {
                Err(RuntimeError::TypeMismatch { left: left.type_name(),
                                                 op,
                                                 right: right.type_name() })
            }
        },
    }
}

/// Evaluates an operator over two integers with checked arithmetic.
///
/// Division truncates toward zero. The sign of `%` follows the dividend.
fn eval_integer_infix(op: InfixOperator, a: i64, b: i64) -> Result<Value, RuntimeError> {
    use InfixOperator::{Add, Div, Equal, Greater, Less, Mod, Mul, NotEqual, Sub};

    match op {
        Add => a.checked_add(b)
                .map(Value::Integer)
                .ok_or(RuntimeError::IntegerOverflow),
        Sub => a.checked_sub(b)
                .map(Value::Integer)
                .ok_or(RuntimeError::IntegerOverflow),
        Mul => a.checked_mul(b)
                .map(Value::Integer)
                .ok_or(RuntimeError::IntegerOverflow),
        Div => {
            if b == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            a.checked_div(b)
             .map(Value::Integer)
             .ok_or(RuntimeError::IntegerOverflow)
        },
        Mod => {
            if b == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            a.checked_rem(b)
             .map(Value::Integer)
             .ok_or(RuntimeError::IntegerOverflow)
        },
        Less => Ok(Value::Bool(a < b)),
        Greater => Ok(Value::Bool(a > b)),
        Equal => Ok(Value::Bool(a == b)),
        NotEqual => Ok(Value::Bool(a != b)),
    }
}

/// Evaluates an operator over two floats.
///
/// Mixed integer and float operands arrive here already promoted. `%` is the
/// truncating float modulo `a - b * trunc(a / b)`.
fn eval_float_infix(op: InfixOperator, a: f64, b: f64) -> Result<Value, RuntimeError> {
    use InfixOperator::{Add, Div, Equal, Greater, Less, Mod, Mul, NotEqual, Sub};

    match op {
        Add => Ok(Value::Float(a + b)),
        Sub => Ok(Value::Float(a - b)),
        Mul => Ok(Value::Float(a * b)),
        Div => {
            if b == 0.0 {
                return Err(RuntimeError::DivisionByZero);
            }
            Ok(Value::Float(a / b))
        },
        Mod => {
            if b == 0.0 {
                return Err(RuntimeError::DivisionByZero);
            }
            Ok(Value::Float(a % b))
        },
        Less => Ok(Value::Bool(a < b)),
        Greater => Ok(Value::Bool(a > b)),
        Equal => Ok(Value::Bool(a == b)),
        NotEqual => Ok(Value::Bool(a != b)),
    }
}

/// Evaluates an operator over two strings.
fn eval_string_infix(op: InfixOperator, a: &Rc<str>, b: &Rc<str>) -> Result<Value, RuntimeError> {
    match op {
        InfixOperator::Add => Ok(Value::Str(Rc::from(format!("{a}{b}")))),
        InfixOperator::Equal => Ok(Value::Bool(a == b)),
        InfixOperator::NotEqual => Ok(Value::Bool(a != b)),
        _ => Err(RuntimeError::UnknownInfixOperator { left: "STRING",
                                                      op,
                                                      right: "STRING" }),
    }
}

/// Widens a numeric value to `f64` for promoted arithmetic.
#[allow(clippy::cast_precision_loss)]
fn numeric_as_f64(value: &Value) -> f64 {
    match value {
        Value::Integer(n) => *n as f64,
        Value::Float(r) => *r,
        _ => unreachable!("caller checked both operands are numeric"),
    }
}
