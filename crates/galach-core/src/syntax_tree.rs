//! The parser's public result type.

use crate::ast::Node;
use crate::correction::Correction;
use crate::token::TokenSequence;

/// `parse`'s output: the root `Query` node, the original token sequence
/// (for reconstruction / generators that want raw lexemes), and the
/// correction log recorded while recovering from malformed input.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SyntaxTree {
    pub root: Node,
    pub tokens: TokenSequence,
    pub corrections: Vec<Correction>,
}

impl SyntaxTree {
    pub fn new(root: Node, tokens: TokenSequence, corrections: Vec<Correction>) -> Self {
        debug_assert!(matches!(root, Node::Query { .. }), "SyntaxTree root must be a Query node");
        Self {
            root,
            tokens,
            corrections,
        }
    }

    /// `true` when the parse required no recovery at all: every balanced,
    /// well-formed input leaves the corrections list empty.
    pub fn is_clean(&self) -> bool {
        self.corrections.is_empty()
    }
}
