//! Galach: a forgiving query-string parser.
//!
//! Turns a search-box style query string into a syntax tree, recovering
//! from malformed input instead of rejecting it — unbalanced groups,
//! dangling operators, and unrecognized runs are corrected and logged
//! rather than raising a parse error (there is no parse error; see
//! [`parse`]).
//!
//! ```
//! let tree = galach::parse("+must NOT this OR (that AND other)");
//! assert!(tree.is_clean());
//! ```
//!
//! Facade crate over `galach-core`/`galach-lexer`/`galach-parser`/
//! `galach-gen`, re-exporting the public types and convenience entry
//! points so callers need only one dependency.

pub use galach_core::{
    Correction, CorrectionKind, CorrectionLog, KindSet, Node, NodeKind, Position, SyntaxTree,
    Token, TokenKind, TokenSequence,
};
pub use galach_gen::{Dispatcher, NativeGenerator, NodeVisitor, generate};

/// Tokenizes and parses `input`, recovering from any malformed input along
/// the way. Never fails — see [`SyntaxTree::is_clean`] to check whether
/// any recovery was needed.
pub fn parse(input: &str) -> SyntaxTree {
    galach_parser::parse(galach_lexer::tokenize(input))
}

/// Tokenizes `input` without parsing it.
pub fn tokenize(input: &str) -> TokenSequence {
    galach_lexer::tokenize(input)
}
