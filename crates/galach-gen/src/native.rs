//! The one concrete generator this crate ships: renders an AST back to
//! Galach surface syntax well enough that re-parsing what it emits yields
//! a structurally equal AST, though not necessarily a token-for-token
//! identical one.

use galach_core::{Node, NodeKind};

use crate::{Dispatcher, NodeVisitor};

/// Renders `root` back to Galach query syntax.
pub fn generate(root: &Node) -> String {
    native_dispatcher().dispatch(root)
}

fn native_dispatcher() -> Dispatcher {
    Dispatcher::new(vec![
        Box::new(TermVisitor),
        Box::new(IncludeVisitor),
        Box::new(ExcludeVisitor),
        Box::new(LogicalNotVisitor),
        Box::new(LogicalAndVisitor),
        Box::new(LogicalOrVisitor),
        Box::new(GroupVisitor),
        Box::new(QueryVisitor),
    ])
}

/// Convenience handle around [`generate`] for callers that want an
/// object they can hold onto (the CLI, mainly) rather than a bare function.
pub struct NativeGenerator;

impl NativeGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, root: &Node) -> String {
        generate(root)
    }
}

impl Default for NativeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

struct TermVisitor;
impl NodeVisitor for TermVisitor {
    fn accept(&self, node: &Node) -> bool {
        node.kind() == NodeKind::Term
    }

    fn visit(&self, node: &Node, _dispatcher: &Dispatcher) -> String {
        let Node::Term { token } = node else {
            unreachable!("TermVisitor only accepts Term nodes")
        };
        token.lexeme().to_string()
    }
}

struct IncludeVisitor;
impl NodeVisitor for IncludeVisitor {
    fn accept(&self, node: &Node) -> bool {
        node.kind() == NodeKind::Include
    }

    fn visit(&self, node: &Node, dispatcher: &Dispatcher) -> String {
        let Node::Include { operand, .. } = node else {
            unreachable!("IncludeVisitor only accepts Include nodes")
        };
        format!("+{}", dispatcher.dispatch(operand))
    }
}

struct ExcludeVisitor;
impl NodeVisitor for ExcludeVisitor {
    fn accept(&self, node: &Node) -> bool {
        node.kind() == NodeKind::Exclude
    }

    fn visit(&self, node: &Node, dispatcher: &Dispatcher) -> String {
        let Node::Exclude { operand, .. } = node else {
            unreachable!("ExcludeVisitor only accepts Exclude nodes")
        };
        format!("-{}", dispatcher.dispatch(operand))
    }
}

struct LogicalNotVisitor;
impl NodeVisitor for LogicalNotVisitor {
    fn accept(&self, node: &Node) -> bool {
        node.kind() == NodeKind::LogicalNot
    }

    fn visit(&self, node: &Node, dispatcher: &Dispatcher) -> String {
        let Node::LogicalNot { operand, .. } = node else {
            unreachable!("LogicalNotVisitor only accepts LogicalNot nodes")
        };
        format!("!{}", dispatcher.dispatch(operand))
    }
}

struct LogicalAndVisitor;
impl NodeVisitor for LogicalAndVisitor {
    fn accept(&self, node: &Node) -> bool {
        node.kind() == NodeKind::LogicalAnd
    }

    fn visit(&self, node: &Node, dispatcher: &Dispatcher) -> String {
        let Node::LogicalAnd { left, right, .. } = node else {
            unreachable!("LogicalAndVisitor only accepts LogicalAnd nodes")
        };
        format!("{} AND {}", dispatcher.dispatch(left), dispatcher.dispatch(right))
    }
}

struct LogicalOrVisitor;
impl NodeVisitor for LogicalOrVisitor {
    fn accept(&self, node: &Node) -> bool {
        node.kind() == NodeKind::LogicalOr
    }

    fn visit(&self, node: &Node, dispatcher: &Dispatcher) -> String {
        let Node::LogicalOr { left, right, .. } = node else {
            unreachable!("LogicalOrVisitor only accepts LogicalOr nodes")
        };
        format!("{} OR {}", dispatcher.dispatch(left), dispatcher.dispatch(right))
    }
}

struct GroupVisitor;
impl NodeVisitor for GroupVisitor {
    fn accept(&self, node: &Node) -> bool {
        node.kind() == NodeKind::Group
    }

    fn visit(&self, node: &Node, dispatcher: &Dispatcher) -> String {
        let Node::Group { domain, nodes, .. } = node else {
            unreachable!("GroupVisitor only accepts Group nodes")
        };
        let body = nodes
            .iter()
            .map(|child| dispatcher.dispatch(child))
            .collect::<Vec<_>>()
            .join(" ");
        match domain {
            Some(domain) => format!("{domain}:({body})"),
            None => format!("({body})"),
        }
    }
}

struct QueryVisitor;
impl NodeVisitor for QueryVisitor {
    fn accept(&self, node: &Node) -> bool {
        node.kind() == NodeKind::Query
    }

    fn visit(&self, node: &Node, dispatcher: &Dispatcher) -> String {
        let Node::Query { nodes } = node else {
            unreachable!("QueryVisitor only accepts Query nodes")
        };
        nodes
            .iter()
            .map(|child| dispatcher.dispatch(child))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
