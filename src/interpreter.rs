/// Lexically scoped environment frames.
///
/// Declares the reference-counted frame type mapping names to bindings, with
/// an optional outer link used for lexical scope resolution and closure
/// capture.
pub mod environment;
/// The tree-walking evaluator.
///
/// Walks the AST producing runtime values, maintaining scopes, executing
/// control flow and closures, and dispatching builtin calls.
pub mod evaluator;
/// The lexer.
///
/// Converts a source string into a stream of tokens with line information,
/// reporting unlexable input as illegal tokens.
pub mod lexer;
/// The parser.
///
/// Consumes the token stream and produces an AST, using recursive descent
/// for statements and Pratt parsing for expressions. Errors accumulate so a
/// single pass reports as many problems as possible.
pub mod parser;
/// Runtime values.
///
/// Declares the value variants programs compute with, their display forms,
/// and the hashable key subset used by hashes.
pub mod value;
