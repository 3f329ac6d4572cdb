//! Parse a query and show its AST plus any corrections made.

use std::path::PathBuf;

use galach_core::{Node, SyntaxTree};

use crate::input::load_query;

pub struct AstArgs {
    pub query_path: Option<PathBuf>,
    pub query_text: Option<String>,
    pub json: bool,
    pub color: bool,
}

pub fn run(args: AstArgs) {
    let source = load_query(args.query_path.as_deref(), args.query_text.as_deref()).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    let tree = galach_parser::parse(galach_lexer::tokenize(&source));

    if args.json {
        let rendered = serde_json::to_string_pretty(&tree).expect("SyntaxTree serializes");
        println!("{rendered}");
        return;
    }

    print!("{}", dump_node(&tree.root, 0));

    if !tree.corrections.is_empty() {
        eprintln!("\n{}", heading("corrections:", args.color));
        eprint!("{}", render_corrections(&tree, args.color));
    }
}

/// Wraps `text` in yellow ANSI codes when `color` is set; a plain label
/// otherwise, matching the teacher's `should_colorize`-gated printer.
fn heading(text: &str, color: bool) -> String {
    if color { format!("\x1b[33m{text}\x1b[0m") } else { text.to_string() }
}

fn render_corrections(tree: &SyntaxTree, color: bool) -> String {
    tree.corrections
        .iter()
        .map(|c| {
            if color {
                format!("  \x1b[33m{c}\x1b[0m\n")
            } else {
                format!("  {c}\n")
            }
        })
        .collect()
}

fn dump_node(node: &Node, depth: usize) -> String {
    let indent = "  ".repeat(depth);
    match node {
        Node::Term { token } => format!("{indent}({:?} {:?})\n", token.kind(), token.lexeme()),
        Node::Include { operand, .. } => {
            format!("{indent}(Include\n{}{indent})\n", dump_node(operand, depth + 1))
        }
        Node::Exclude { operand, .. } => {
            format!("{indent}(Exclude\n{}{indent})\n", dump_node(operand, depth + 1))
        }
        Node::LogicalNot { operand, .. } => {
            format!("{indent}(LogicalNot\n{}{indent})\n", dump_node(operand, depth + 1))
        }
        Node::LogicalAnd { left, right, .. } => format!(
            "{indent}(LogicalAnd\n{}{}{indent})\n",
            dump_node(left, depth + 1),
            dump_node(right, depth + 1)
        ),
        Node::LogicalOr { left, right, .. } => format!(
            "{indent}(LogicalOr\n{}{}{indent})\n",
            dump_node(left, depth + 1),
            dump_node(right, depth + 1)
        ),
        Node::Group { domain, nodes, .. } => {
            let header = match domain {
                Some(domain) => format!("{indent}(Group domain={domain:?}\n"),
                None => format!("{indent}(Group\n"),
            };
            let body: String = nodes.iter().map(|n| dump_node(n, depth + 1)).collect();
            format!("{header}{body}{indent})\n")
        }
        Node::Query { nodes } => {
            let body: String = nodes.iter().map(|n| dump_node(n, depth + 1)).collect();
            format!("{indent}(Query\n{body}{indent})\n")
        }
    }
}
