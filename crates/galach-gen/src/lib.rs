//! Generator dispatcher and a concrete `NativeGenerator`.
//!
//! An ordered list of single-purpose visitors probed via `accept`, rather
//! than one big trait with a default `visit_*` method per node shape: this
//! crate ships exactly one concrete generator, plus the dispatcher
//! machinery any further generator would plug into.

mod native;

use galach_core::Node;

pub use native::{NativeGenerator, generate};

/// One stop in a [`Dispatcher`]'s probe order: claims the node kinds it
/// knows how to render and recurses back through the dispatcher for any
/// children it needs to render itself.
pub trait NodeVisitor {
    fn accept(&self, node: &Node) -> bool;
    fn visit(&self, node: &Node, dispatcher: &Dispatcher) -> String;
}

/// Probes its visitors in registration order and returns the first
/// `accept`ing one's `visit` result. Absence of a matching visitor is a
/// programming error — every `NodeKind` must have a visitor registered
/// for a generator to be complete.
pub struct Dispatcher {
    visitors: Vec<Box<dyn NodeVisitor>>,
}

impl Dispatcher {
    pub fn new(visitors: Vec<Box<dyn NodeVisitor>>) -> Self {
        Self { visitors }
    }

    pub fn dispatch(&self, node: &Node) -> String {
        for visitor in &self.visitors {
            if visitor.accept(node) {
                return visitor.visit(node, self);
            }
        }
        panic!(
            "galach-gen: no visitor registered for node kind {:?}",
            node.kind()
        );
    }
}
