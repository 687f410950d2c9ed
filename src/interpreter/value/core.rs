use std::rc::Rc;

use crate::{
    ast::Block,
    error::RuntimeError,
    interpreter::{environment::EnvRef, value::hash_key::HashValue},
    util::num::float_literal,
};

/// Represents a runtime value in the interpreter.
///
/// This enum models all the possible types that can appear in expressions,
/// bindings, function returns, and conditional evaluations. Containers share
/// their storage through `Rc`, so cloning a value is cheap and builtins that
/// "modify" a container actually build a new one.
#[derive(Debug, Clone)]
pub enum Value {
    /// A 64-bit signed integer value.
    Integer(i64),
    /// A double-precision floating-point value.
    Float(f64),
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// A string value.
    Str(Rc<str>),
    /// The absence of a value.
    Null,
    /// An ordered array of values.
    Array(Rc<Vec<Self>>),
    /// An insertion-ordered hash of hashable keys to values.
    Hash(Rc<HashValue>),
    /// A user-defined function together with its captured environment.
    Function(Rc<FunctionValue>),
    /// A builtin function from the static table.
    Builtin(&'static Builtin),
}

/// A user-defined function value.
///
/// The environment captured at the function literal's definition site stays
/// alive for as long as the function value does; calls extend it rather than
/// the caller's environment.
pub struct FunctionValue {
    /// Parameter names in declaration order.
    pub parameters: Vec<String>,
    /// The body shared with the AST node that produced this value.
    pub body:       Rc<Block>,
    /// The environment captured at definition time.
    pub env:        EnvRef,
}

/// Type alias for builtin function handlers.
///
/// A builtin receives its already-evaluated arguments by value and returns
/// either a result value or a runtime error.
pub type BuiltinFn = fn(Vec<Value>) -> Result<Value, RuntimeError>;

/// A builtin function definition.
///
/// Builtins live in a static table and are first-class: looking one up by
/// name yields a `Value::Builtin` that can be bound, passed and called like
/// any function value.
pub struct Builtin {
    /// The name the builtin is looked up under.
    pub name:  &'static str,
    /// The number of arguments the builtin accepts.
    pub arity: Arity,
    /// The handler invoked with the evaluated arguments.
    pub func:  BuiltinFn,
    /// One-line description printed by `help()`.
    pub help:  &'static str,
}

/// Specifies the allowed number of arguments for a builtin.
#[derive(Clone, Copy, Debug)]
pub enum Arity {
    /// The builtin must receive exactly this many arguments.
    Exact(usize),
    /// The builtin accepts between zero and this many arguments.
    AtMost(usize),
    /// The builtin accepts any number of arguments.
    Variadic,
}

impl Arity {
    /// Checks an argument count against this arity contract.
    ///
    /// # Parameters
    /// - `got`: The number of arguments supplied.
    ///
    /// # Errors
    /// Returns [`RuntimeError::WrongNumberOfArguments`] when the count is not
    /// permitted.
    pub const fn check(self, got: usize) -> Result<(), RuntimeError> {
        let allowed = match self {
            Self::Exact(expected) => got == expected,
            Self::AtMost(expected) => got <= expected,
            Self::Variadic => true,
        };

        if allowed {
            Ok(())
        } else {
            let expected = match self {
                Self::Exact(expected) | Self::AtMost(expected) => expected,
                Self::Variadic => 0,
            };
            Err(RuntimeError::WrongNumberOfArguments { expected, got })
        }
    }
}

impl Value {
    /// Returns the language-level type name of this value.
    ///
    /// These names appear verbatim in runtime error messages and as the
    /// result of the `type` builtin.
    ///
    /// # Example
    /// ```
    /// use simian::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Integer(1).type_name(), "INTEGER");
    /// assert_eq!(Value::Null.type_name(), "NULL");
    /// ```
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "INTEGER",
            Self::Float(_) => "FLOAT",
            Self::Bool(_) => "BOOLEAN",
            Self::Str(_) => "STRING",
            Self::Null => "NULL",
            Self::Array(_) => "ARRAY",
            Self::Hash(_) => "HASH",
            Self::Function(_) => "FUNCTION",
            Self::Builtin(_) => "BUILTIN",
        }
    }

    /// Maps this value to a boolean for conditionals.
    ///
    /// Only `null` and `false` are falsy; every other value is truthy,
    /// including `0`, `0.0`, and the empty string, array and hash.
    ///
    /// # Example
    /// ```
    /// use simian::interpreter::value::core::Value;
    ///
    /// assert!(Value::Integer(0).is_truthy());
    /// assert!(!Value::Bool(false).is_truthy());
    /// assert!(!Value::Null.is_truthy());
    /// ```
    #[must_use]
    pub const fn is_truthy(&self) -> bool {
        !matches!(self, Self::Null | Self::Bool(false))
    }

    /// Returns `true` if the value is [`Integer`](Self::Integer).
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(..))
    }

    /// Returns `true` if the value is numeric ([`Integer`](Self::Integer) or
    /// [`Float`](Self::Float)).
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer(..) | Self::Float(..))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(Rc::from(v))
    }
}

impl From<Vec<Self>> for Value {
    fn from(v: Vec<Self>) -> Self {
        Self::Array(Rc::new(v))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Null, Self::Null) => true,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Hash(a), Self::Hash(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Builtin(a), Self::Builtin(b)) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(r) => write!(f, "{}", float_literal(*r)),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Null => write!(f, "null"),
            Self::Array(a) => {
                write!(f, "[")?;

                for (index, value) in a.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{value}")?;
                }

                write!(f, "]")
            },
            Self::Hash(h) => write!(f, "{h}"),
            Self::Function(function) => {
                write!(f,
                       "fn({}) {{ {} }}",
                       function.parameters.join(", "),
                       function.body)
            },
            Self::Builtin(builtin) => write!(f, "builtin function {}", builtin.name),
        }
    }
}

impl std::fmt::Debug for FunctionValue {
    // The captured environment is omitted: it can reference this very value
    // through a recursive binding.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionValue")
         .field("parameters", &self.parameters)
         .field("body", &self.body)
         .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtin")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}
