use crate::ast::{InfixOperator, PrefixOperator};

#[derive(Debug)]
/// Represents all errors that can be raised during evaluation.
///
/// The `Display` form of each variant is part of the language's observable
/// behavior: the REPL and file runner print it verbatim after an `ERROR: `
/// prefix, and programs can provoke each message deliberately.
pub enum RuntimeError {
    /// A name was neither bound in any enclosing environment nor a builtin.
    IdentifierNotFound {
        /// The name that failed to resolve.
        name: String,
    },
    /// A call expression's callee was not a function or builtin.
    NotAFunction {
        /// Type name of the value that was called.
        type_name: &'static str,
    },
    /// A function or builtin received the wrong number of arguments.
    WrongNumberOfArguments {
        /// How many arguments the callee accepts.
        expected: usize,
        /// How many arguments were supplied.
        got:      usize,
    },
    /// A builtin received an argument of a type it does not handle.
    ArgumentNotSupported {
        /// Name of the builtin.
        builtin:   &'static str,
        /// Type name of the rejected argument.
        type_name: &'static str,
    },
    /// A prefix operator was applied to an unsupported operand.
    UnknownPrefixOperator {
        /// The operator.
        op:        PrefixOperator,
        /// Type name of the operand.
        type_name: &'static str,
    },
    /// An infix operator was applied to operands of matching but unsupported
    /// types.
    UnknownInfixOperator {
        /// Type name of the left operand.
        left:  &'static str,
        /// The operator.
        op:    InfixOperator,
        /// Type name of the right operand.
        right: &'static str,
    },
    /// An infix operator was applied to operands of differing types.
    TypeMismatch {
        /// Type name of the left operand.
        left:  &'static str,
        /// The operator.
        op:    InfixOperator,
        /// Type name of the right operand.
        right: &'static str,
    },
    /// Division or modulo by zero.
    DivisionByZero,
    /// Integer arithmetic left the `i64` range.
    IntegerOverflow,
    /// Reassignment targeted a `const` binding.
    CannotReassignConst {
        /// Name of the immutable binding.
        name: String,
    },
    /// A hash key expression produced a value that cannot be hashed.
    UnusableHashKey {
        /// Type name of the rejected key.
        type_name: &'static str,
    },
    /// The index operator was applied to a value that is not indexable.
    IndexNotSupported {
        /// Type name of the indexed value.
        type_name: &'static str,
    },
    /// The `int` builtin could not parse its argument.
    IntegerConversion {
        /// Display form of the unconvertible value.
        literal: String,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IdentifierNotFound { name } => write!(f, "identifier not found: {name}"),

            Self::NotAFunction { type_name } => write!(f, "not a function: {type_name}"),

            Self::WrongNumberOfArguments { expected, got } => {
                write!(f, "wrong number of arguments: expected={expected}, got={got}")
            },

            Self::ArgumentNotSupported { builtin, type_name } => {
                write!(f, "argument to `{builtin}` not supported, got {type_name}")
            },

            Self::UnknownPrefixOperator { op, type_name } => {
                write!(f, "unknown operator: {op}{type_name}")
            },

            Self::UnknownInfixOperator { left, op, right } => {
                write!(f, "unknown operator: {left} {op} {right}")
            },

            Self::TypeMismatch { left, op, right } => {
                write!(f, "type mismatch: {left} {op} {right}")
            },

            Self::DivisionByZero => write!(f, "division by zero"),

            Self::IntegerOverflow => write!(f, "integer overflow"),

            Self::CannotReassignConst { name } => {
                write!(f, "cannot reassign to const: {name}")
            },

            Self::UnusableHashKey { type_name } => {
                write!(f, "unusable as hash key: {type_name}")
            },

            Self::IndexNotSupported { type_name } => {
                write!(f, "index operator not supported: {type_name}")
            },

            Self::IntegerConversion { literal } => {
                write!(f, "cannot convert {literal} to INTEGER")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
