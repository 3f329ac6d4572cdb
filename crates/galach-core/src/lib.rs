//! Token, AST, and correction-log types shared by the Galach tokenizer,
//! parser, and generator crates.
//!
//! This crate has no parsing logic of its own, only the types the
//! tokenizer and parser trade in.

pub mod ast;
pub mod correction;
pub mod position;
pub mod syntax_tree;
pub mod token;

pub use ast::{Node, NodeKind};
pub use correction::{Correction, CorrectionKind, CorrectionLog};
pub use position::Position;
pub use syntax_tree::SyntaxTree;
pub use token::{KindSet, Token, TokenKind, TokenSequence};
