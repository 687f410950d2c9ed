/// Numeric helpers shared across the interpreter.
///
/// Provides the canonical float formatting used by both the AST printer and
/// the value printer, and checked conversions used by indexing and by the
/// `int` builtin.
pub mod num;
