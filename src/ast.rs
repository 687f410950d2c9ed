use std::rc::Rc;

use crate::util::num::float_literal;

/// An abstract syntax tree node representing an expression.
///
/// `Expr` covers every expression form of the language: literals,
/// identifiers, prefix and infix operations, conditionals, function literals,
/// calls, arrays, hashes, indexing and reassignment. Each variant carries the
/// line of the token it originated from for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Reference to a binding by name.
    Identifier {
        /// Name of the binding.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A 64-bit signed integer literal.
    IntegerLiteral {
        /// The literal value.
        value: i64,
        /// Line number in the source code.
        line:  usize,
    },
    /// A 64-bit floating-point literal.
    FloatLiteral {
        /// The literal value.
        value: f64,
        /// Line number in the source code.
        line:  usize,
    },
    /// A boolean literal: `true` or `false`.
    BooleanLiteral {
        /// The literal value.
        value: bool,
        /// Line number in the source code.
        line:  usize,
    },
    /// A string literal, with escape sequences already processed.
    StringLiteral {
        /// The literal contents.
        value: String,
        /// Line number in the source code.
        line:  usize,
    },
    /// A prefix operation such as `-x` or `!ok`.
    Prefix {
        /// The prefix operator.
        op:    PrefixOperator,
        /// The operand expression.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// An infix operation such as `a + b`.
    Infix {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    InfixOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A conditional expression with an optional `else` branch.
    If {
        /// The condition expression.
        condition:   Box<Self>,
        /// Block evaluated when the condition is truthy.
        consequence: Block,
        /// Block evaluated when the condition is falsy, if present.
        alternative: Option<Block>,
        /// Line number in the source code.
        line:        usize,
    },
    /// A function literal: `fn(x, y) { ... }`.
    Function {
        /// Parameter names in declaration order.
        parameters: Vec<String>,
        /// The function body. Shared so function values can reference it
        /// without cloning the tree.
        body:       Rc<Block>,
        /// Line number in the source code.
        line:       usize,
    },
    /// A call expression: `f(a, b)`.
    Call {
        /// Expression producing the callee.
        function:  Box<Self>,
        /// Argument expressions in call order.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// An array literal: `[1, 2, 3]`.
    Array {
        /// Element expressions.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// An index expression: `container[index]`.
    Index {
        /// Expression producing the container.
        left:  Box<Self>,
        /// Expression producing the index or key.
        index: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// A hash literal: `{"a": 1, true: 2}`. Pairs keep source order.
    Hash {
        /// Key and value expressions in source order.
        pairs: Vec<(Self, Self)>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reassignment of an existing mutable binding: `x = value`.
    Assign {
        /// Name of the binding.
        name:  String,
        /// The new value expression.
        value: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use simian::ast::Expr;
    ///
    /// let expr = Expr::Identifier { name: "x".to_string(),
    ///                               line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Identifier { line, .. }
            | Self::IntegerLiteral { line, .. }
            | Self::FloatLiteral { line, .. }
            | Self::BooleanLiteral { line, .. }
            | Self::StringLiteral { line, .. }
            | Self::Prefix { line, .. }
            | Self::Infix { line, .. }
            | Self::If { line, .. }
            | Self::Function { line, .. }
            | Self::Call { line, .. }
            | Self::Array { line, .. }
            | Self::Index { line, .. }
            | Self::Hash { line, .. }
            | Self::Assign { line, .. } => *line,
        }
    }
}

/// A top-level statement.
///
/// Statements are the units a program is made of. Expression statements wrap
/// an expression evaluated for its value; the other forms bind names, return
/// from functions or loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A binding introduced with `let` (mutable) or `const` (immutable).
    Let {
        /// Name of the binding.
        name:    String,
        /// The initial value expression.
        value:   Expr,
        /// Whether the binding may be reassigned later.
        mutable: bool,
        /// Line number in the source code.
        line:    usize,
    },
    /// A `return` statement inside a function body.
    Return {
        /// The returned value expression.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// A `while` loop.
    While {
        /// The loop condition, re-evaluated before every iteration.
        condition: Expr,
        /// The loop body.
        body:      Block,
        /// Line number in the source code.
        line:      usize,
    },
    /// A standalone expression evaluated for its result.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
}

/// A braced sequence of statements.
///
/// Blocks appear as conditional branches, loop bodies and function bodies.
/// They do not open a new scope; only function calls do.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Statements inside the block.
    pub statements: Vec<Statement>,
    /// Line number of the opening brace.
    pub line:       usize,
}

/// A complete parsed program.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Top-level statements in source order.
    pub statements: Vec<Statement>,
}

/// Represents an infix operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InfixOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
}

/// Represents a prefix operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrefixOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
}

impl std::fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use InfixOperator::{Add, Div, Equal, Greater, Less, Mod, Mul, NotEqual, Sub};
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Less => "<",
            Greater => ">",
            Equal => "==",
            NotEqual => "!=",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Negate => "-",
            Self::Not => "!",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier { name, .. } => write!(f, "{name}"),
            Self::IntegerLiteral { value, .. } => write!(f, "{value}"),
            Self::FloatLiteral { value, .. } => write!(f, "{}", float_literal(*value)),
            Self::BooleanLiteral { value, .. } => write!(f, "{value}"),
            Self::StringLiteral { value, .. } => write_quoted(f, value),
            Self::Prefix { op, right, .. } => write!(f, "({op}{right})"),
            Self::Infix { left, op, right, .. } => write!(f, "({left} {op} {right})"),
            Self::If { condition,
                       consequence,
                       alternative,
                       .. } => {
                write!(f, "if ({condition}) {{ {consequence} }}")?;
                if let Some(alternative) = alternative {
                    write!(f, " else {{ {alternative} }}")?;
                }
                Ok(())
            },
            Self::Function { parameters, body, .. } => {
                write!(f, "fn({}) {{ {body} }}", parameters.join(", "))
            },
            Self::Call { function, arguments, .. } => {
                write!(f, "{function}(")?;
                write_joined(f, arguments)?;
                write!(f, ")")
            },
            Self::Array { elements, .. } => {
                write!(f, "[")?;
                write_joined(f, elements)?;
                write!(f, "]")
            },
            Self::Index { left, index, .. } => write!(f, "({left}[{index}])"),
            Self::Hash { pairs, .. } => {
                write!(f, "{{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            },
            Self::Assign { name, value, .. } => write!(f, "{name} = {value}"),
        }
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Let { name,
                        value,
                        mutable,
                        .. } => {
                let keyword = if *mutable { "let" } else { "const" };
                write!(f, "{keyword} {name} = {value};")
            },
            Self::Return { value, .. } => write!(f, "return {value};"),
            Self::While { condition, body, .. } => write!(f, "while ({condition}) {{ {body} }}"),
            Self::Expression { expr, .. } => write!(f, "{expr}"),
        }
    }
}

impl std::fmt::Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

/// Writes a comma-separated list of displayable items.
fn write_joined<T: std::fmt::Display>(f: &mut std::fmt::Formatter<'_>,
                                      items: &[T])
                                      -> std::fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Writes a string literal back in source form, re-escaping the characters
/// the lexer unescapes.
fn write_quoted(f: &mut std::fmt::Formatter<'_>, value: &str) -> std::fmt::Result {
    write!(f, "\"")?;
    for c in value.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\t' => write!(f, "\\t")?,
            _ => write!(f, "{c}")?,
        }
    }
    write!(f, "\"")
}
