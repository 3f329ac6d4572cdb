//! The Galach shift/reduce parser.
//!
//! A single mutable struct driving a loop over an explicit stack, recovering
//! from malformed input instead of failing. The stack is heterogeneous
//! (`StackEntry::Token`/`StackEntry::Node`) since the result is an owned
//! tagged AST, built directly rather than via a separate lossless tree.

mod delimiters;

use std::cell::Cell;
use std::collections::VecDeque;

use galach_core::token::composite;
use galach_core::{CorrectionKind, CorrectionLog, Node, NodeKind, SyntaxTree, Token, TokenKind, TokenSequence};

/// Debug-only stuck-loop guard for the reduce sub-loop. Every real
/// reduction consumes a stack entry, so this should never trip; if it
/// does, that is a bug in the reduction table, not malformed input.
#[cfg(debug_assertions)]
const REDUCE_FUEL: u32 = 4096;

enum StackEntry {
    Token(Token),
    Node(Node),
}

impl StackEntry {
    fn token_kind(&self) -> Option<TokenKind> {
        match self {
            StackEntry::Token(token) => Some(token.kind()),
            StackEntry::Node(_) => None,
        }
    }
}

struct Parser {
    stack: Vec<StackEntry>,
    queue: VecDeque<Token>,
    corrections: CorrectionLog,
    #[cfg(debug_assertions)]
    fuel: Cell<u32>,
}

/// `parse(tokens: TokenSequence) -> SyntaxTree`. Infallible apart from a
/// `panic!` on internal inconsistency — a bug in the reduction table, not
/// malformed input.
pub fn parse(tokens: TokenSequence) -> SyntaxTree {
    let mut corrections = CorrectionLog::new();
    let balanced = delimiters::balance(tokens.tokens().to_vec(), &mut corrections);

    let mut parser = Parser {
        stack: Vec::new(),
        queue: VecDeque::from(balanced),
        corrections,
        #[cfg(debug_assertions)]
        fuel: Cell::new(REDUCE_FUEL),
    };

    while let Some(token) = parser.queue.pop_front() {
        parser.shift(token);
    }

    let (root, corrections) = parser.finalize();
    match root {
        Node::Query { .. } => SyntaxTree::new(root, tokens, corrections.into_vec()),
        other => panic!(
            "galach-parser: internal inconsistency — finalization left a {:?} node instead of Query",
            other.kind()
        ),
    }
}

impl Parser {
    fn shift(&mut self, token: Token) {
        match token.kind() {
            TokenKind::Whitespace => self.shift_whitespace(token),
            TokenKind::Word | TokenKind::Phrase | TokenKind::User | TokenKind::Tag => {
                self.reduce_loop(Node::Term { token });
            }
            TokenKind::GroupBegin => self.stack.push(StackEntry::Token(token)),
            TokenKind::GroupEnd => {
                if let Some(group) = self.reduce_group(token) {
                    self.reduce_loop(group);
                }
            }
            TokenKind::LogicalAnd | TokenKind::LogicalOr => self.shift_binary(token),
            TokenKind::LogicalNot => self.stack.push(StackEntry::Token(token)),
            TokenKind::LogicalNot2 => self.shift_prefix_peeking(token, true),
            TokenKind::Include | TokenKind::Exclude => self.shift_prefix_peeking(token, false),
            TokenKind::Bailout => {
                self.corrections.record(CorrectionKind::BailoutTokenIgnored, vec![token]);
            }
        }
    }

    fn shift_whitespace(&mut self, _token: Token) {
        let is_prefix_op = matches!(self.stack.last().and_then(StackEntry::token_kind), Some(k) if composite::OPERATOR_PREFIX.contains(k));
        if is_prefix_op {
            let Some(StackEntry::Token(dangling)) = self.stack.pop() else {
                unreachable!()
            };
            self.corrections
                .record(CorrectionKind::UnaryOpMissingOperandIgnored, vec![dangling]);
        }
    }

    fn shift_binary(&mut self, token: Token) {
        let top_kind = self.stack.last().and_then(StackEntry::token_kind);
        if self.stack.is_empty() || top_kind == Some(TokenKind::GroupBegin) {
            self.corrections
                .record(CorrectionKind::BinaryOpMissingLeftOperandIgnored, vec![token]);
        } else if matches!(top_kind, Some(k) if composite::OPERATOR.contains(k)) {
            self.corrections
                .record(CorrectionKind::BinaryOpFollowingOpIgnored, vec![token]);
        } else {
            self.stack.push(StackEntry::Token(token));
        }
    }

    /// Shared shape of the `!`/`+`/`-` shift routines: peek the next raw
    /// input token and drop self if it is another operator. `allow_not2`
    /// distinguishes `!`'s exemption for a following `!` from `+`/`-`,
    /// which have no such exemption.
    fn shift_prefix_peeking(&mut self, token: Token, allow_not2: bool) {
        let drops = match self.queue.front().map(Token::kind) {
            Some(k) if composite::OPERATOR.contains(k) => !(allow_not2 && k == TokenKind::LogicalNot2),
            _ => false,
        };
        if drops {
            self.corrections
                .record(CorrectionKind::UnaryOpPrecedingOpIgnored, vec![token]);
        } else {
            self.stack.push(StackEntry::Token(token));
        }
    }

    /// Drains `self.stack`'s prioritized reduction list for `node`'s kind,
    /// replacing `node` each time a reduction fires and restarting from
    /// the new node's own list, until nothing fires — at which point
    /// `node` is pushed.
    fn reduce_loop(&mut self, mut node: Node) {
        #[cfg(debug_assertions)]
        self.fuel.set(REDUCE_FUEL);
        loop {
            #[cfg(debug_assertions)]
            {
                let remaining = self.fuel.get();
                assert!(remaining > 0, "galach-parser: reduce loop exceeded its fuel budget — likely a reduction that doesn't consume a stack entry");
                self.fuel.set(remaining - 1);
            }
            let (next, fired) = self.apply_reductions(node);
            node = next;
            if !fired {
                self.stack.push(StackEntry::Node(node));
                return;
            }
        }
    }

    fn apply_reductions(&mut self, node: Node) -> (Node, bool) {
        match node.kind() {
            NodeKind::Group | NodeKind::Term => {
                let (node, fired) = self.reduce_inclusivity(node);
                if fired {
                    return (node, true);
                }
                let (node, fired) = self.reduce_logical_not(node);
                if fired {
                    return (node, true);
                }
                let (node, fired) = self.reduce_logical_and(node);
                if fired {
                    return (node, true);
                }
                self.reduce_logical_or(node, false)
            }
            NodeKind::Include | NodeKind::Exclude | NodeKind::LogicalNot => {
                let (node, fired) = self.reduce_logical_not(node);
                if fired {
                    return (node, true);
                }
                let (node, fired) = self.reduce_logical_and(node);
                if fired {
                    return (node, true);
                }
                self.reduce_logical_or(node, false)
            }
            NodeKind::LogicalAnd => self.reduce_logical_or(node, false),
            NodeKind::LogicalOr | NodeKind::Query => (node, false),
        }
    }

    fn reduce_inclusivity(&mut self, node: Node) -> (Node, bool) {
        match self.stack.last().and_then(StackEntry::token_kind) {
            Some(TokenKind::Include) => {
                let Some(StackEntry::Token(token)) = self.stack.pop() else {
                    unreachable!()
                };
                (
                    Node::Include {
                        token,
                        operand: Box::new(node),
                    },
                    true,
                )
            }
            Some(TokenKind::Exclude) => {
                let Some(StackEntry::Token(token)) = self.stack.pop() else {
                    unreachable!()
                };
                (
                    Node::Exclude {
                        token,
                        operand: Box::new(node),
                    },
                    true,
                )
            }
            _ => (node, false),
        }
    }

    fn reduce_logical_not(&mut self, node: Node) -> (Node, bool) {
        let is_not = matches!(
            self.stack.last().and_then(StackEntry::token_kind),
            Some(TokenKind::LogicalNot) | Some(TokenKind::LogicalNot2)
        );
        if !is_not {
            return (node, false);
        }
        if matches!(node.kind(), NodeKind::Include | NodeKind::Exclude) {
            let popped = self.strip_contiguous(composite::OPERATOR_NOT);
            self.corrections
                .record(CorrectionKind::LogicalNotPrecedingInclusivityIgnored, popped);
            return (node, true);
        }
        let Some(StackEntry::Token(token)) = self.stack.pop() else {
            unreachable!()
        };
        (
            Node::LogicalNot {
                token,
                operand: Box::new(node),
            },
            true,
        )
    }

    fn reduce_logical_and(&mut self, node: Node) -> (Node, bool) {
        if self.stack.len() < 2 || self.stack.last().and_then(StackEntry::token_kind) != Some(TokenKind::LogicalAnd) {
            return (node, false);
        }
        let Some(StackEntry::Token(token)) = self.stack.pop() else {
            unreachable!()
        };
        let Some(StackEntry::Node(left)) = self.stack.pop() else {
            panic!("galach-parser: internal inconsistency — AND operator with no left-hand node beneath it");
        };
        (
            Node::LogicalAnd {
                token,
                left: Box::new(left),
                right: Box::new(node),
            },
            true,
        )
    }

    /// `in_group` disables the AND-lookahead precedence check: inside a
    /// group, a pending OR chain is always collapsed once the group closes,
    /// since there is no outer AND left to contend with.
    fn reduce_logical_or(&mut self, node: Node, in_group: bool) -> (Node, bool) {
        if self.stack.len() < 2 || self.stack.last().and_then(StackEntry::token_kind) != Some(TokenKind::LogicalOr) {
            return (node, false);
        }
        if !in_group && self.next_significant_is_and() {
            // AND binds tighter: leave the OR (and its left operand) on the
            // stack for a later, outer reduction to pick up.
            return (node, false);
        }
        let Some(StackEntry::Token(token)) = self.stack.pop() else {
            unreachable!()
        };
        let Some(StackEntry::Node(left)) = self.stack.pop() else {
            panic!("galach-parser: internal inconsistency — OR operator with no left-hand node beneath it");
        };
        (
            Node::LogicalOr {
                token,
                left: Box::new(left),
                right: Box::new(node),
            },
            true,
        )
    }

    /// Reduces `)`. Returns the completed `Group` node to feed back into
    /// `reduce_loop`, or `None` when the group was empty (fully handled
    /// here — nothing left to push).
    fn reduce_group(&mut self, close_token: Token) -> Option<Node> {
        for token in self.strip_contiguous(composite::OPERATOR) {
            let kind = if composite::OPERATOR_UNARY.contains(token.kind()) {
                CorrectionKind::UnaryOpMissingOperandIgnored
            } else {
                CorrectionKind::BinaryOpMissingRightOperandIgnored
            };
            self.corrections.record(kind, vec![token]);
        }

        if self.stack.last().and_then(StackEntry::token_kind) == Some(TokenKind::GroupBegin) {
            let Some(StackEntry::Token(open_token)) = self.stack.pop() else {
                unreachable!()
            };
            let preceding = self.strip_contiguous(composite::OPERATOR);
            let mut following = Vec::new();
            loop {
                match self.queue.front().map(Token::kind) {
                    Some(TokenKind::Whitespace) => {
                        self.queue.pop_front();
                    }
                    Some(TokenKind::LogicalAnd) | Some(TokenKind::LogicalOr) => {
                        following.push(self.queue.pop_front().expect("front just matched"));
                    }
                    _ => break,
                }
            }
            let mut all = Vec::with_capacity(preceding.len() + 2 + following.len());
            all.extend(preceding);
            all.push(open_token);
            all.push(close_token);
            all.extend(following);
            self.corrections.record(CorrectionKind::EmptyGroupIgnored, all);
            return None;
        }

        if let Some(StackEntry::Node(top)) = self.stack.pop() {
            let (reduced, _) = self.reduce_logical_or(top, true);
            self.stack.push(StackEntry::Node(reduced));
        }

        let mut children = Vec::new();
        while matches!(self.stack.last(), Some(StackEntry::Node(_))) {
            let Some(StackEntry::Node(child)) = self.stack.pop() else {
                unreachable!()
            };
            children.push(child);
        }
        children.reverse();

        let Some(StackEntry::Token(open_token)) = self.stack.pop() else {
            panic!("galach-parser: internal inconsistency — group close has no matching '(' on the stack");
        };
        let domain = match &open_token {
            Token::GroupBegin { domain, .. } => domain.clone(),
            _ => None,
        };
        Some(Node::Group {
            token_left: open_token,
            token_right: close_token,
            domain,
            nodes: children,
        })
    }

    /// Pops every contiguous token at the stack top whose kind is in `set`,
    /// returning them in source (oldest-first) order.
    fn strip_contiguous(&mut self, set: galach_core::KindSet) -> Vec<Token> {
        let mut out = Vec::new();
        while matches!(self.stack.last().and_then(StackEntry::token_kind), Some(k) if set.contains(k)) {
            let Some(StackEntry::Token(token)) = self.stack.pop() else {
                unreachable!()
            };
            out.push(token);
        }
        out.reverse();
        out
    }

    fn next_significant_is_and(&self) -> bool {
        self.queue
            .iter()
            .find(|token| token.kind() != TokenKind::Whitespace)
            .is_some_and(|token| token.kind() == TokenKind::LogicalAnd)
    }

    /// Final reduction: strip trailing operators, collapse any remaining OR
    /// chain, then wrap everything left-to-right in `Query`.
    fn finalize(mut self) -> (Node, CorrectionLog) {
        for token in self.strip_contiguous(composite::OPERATOR) {
            let kind = if composite::OPERATOR_UNARY.contains(token.kind()) {
                CorrectionKind::UnaryOpMissingOperandIgnored
            } else {
                CorrectionKind::BinaryOpMissingRightOperandIgnored
            };
            self.corrections.record(kind, vec![token]);
        }

        loop {
            match self.stack.pop() {
                Some(StackEntry::Node(top)) => {
                    let (reduced, fired) = self.reduce_logical_or(top, false);
                    self.stack.push(StackEntry::Node(reduced));
                    if !fired {
                        break;
                    }
                }
                Some(other) => {
                    self.stack.push(other);
                    break;
                }
                None => break,
            }
        }

        let mut nodes = Vec::with_capacity(self.stack.len());
        for entry in self.stack.drain(..) {
            match entry {
                StackEntry::Node(node) => nodes.push(node),
                StackEntry::Token(token) => panic!(
                    "galach-parser: internal inconsistency — leftover token {:?} on the stack at finalization",
                    token
                ),
            }
        }
        (Node::Query { nodes }, self.corrections)
    }
}
