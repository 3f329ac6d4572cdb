//! End-to-end scenarios against the public `galach` facade.

use galach::{CorrectionKind, Node, NodeKind};

fn children(source: &str) -> (Vec<Node>, Vec<CorrectionKind>) {
    let tree = galach::parse(source);
    let Node::Query { nodes } = tree.root else {
        panic!("expected Query root")
    };
    let corrections = tree.corrections.iter().map(|c| c.kind).collect();
    (nodes, corrections)
}

#[test]
fn plain_adjacency_is_three_sibling_terms() {
    let (nodes, corrections) = children("one two three");
    assert_eq!(nodes.len(), 3);
    assert!(nodes.iter().all(|n| n.kind() == NodeKind::Term));
    assert!(corrections.is_empty());
}

#[test]
fn and_binds_tighter_than_or_both_directions() {
    let (nodes, corrections) = children("a AND b OR c AND d");
    assert_eq!(nodes.len(), 1);
    match &nodes[0] {
        Node::LogicalOr { left, right, .. } => {
            assert_eq!(left.kind(), NodeKind::LogicalAnd);
            assert_eq!(right.kind(), NodeKind::LogicalAnd);
        }
        other => panic!("expected LogicalOr, got {other:?}"),
    }
    assert!(corrections.is_empty());
}

#[test]
fn inclusivity_prefixes_attach_to_their_operand() {
    let (nodes, corrections) = children("+foo -bar");
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].kind(), NodeKind::Include);
    assert_eq!(nodes[1].kind(), NodeKind::Exclude);
    assert!(corrections.is_empty());
}

#[test]
fn repeated_not_before_inclusivity_collapses_to_one_correction() {
    let (nodes, corrections) = children("NOT NOT +x");
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].kind(), NodeKind::Include);
    assert_eq!(
        corrections,
        vec![CorrectionKind::LogicalNotPrecedingInclusivityIgnored]
    );
}

#[test]
fn trailing_and_with_no_right_operand_is_stripped() {
    let (nodes, corrections) = children("foo AND");
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].kind(), NodeKind::Term);
    assert_eq!(
        corrections,
        vec![CorrectionKind::BinaryOpMissingRightOperandIgnored]
    );
}

#[test]
fn unmatched_left_paren_is_dropped_and_the_rest_parses() {
    let (nodes, corrections) = children("(a OR b");
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].kind(), NodeKind::LogicalOr);
    assert_eq!(
        corrections,
        vec![CorrectionKind::UnmatchedGroupLeftDelimiterIgnored]
    );
}

#[test]
fn domain_prefixed_group_binds_before_a_trailing_or() {
    let (nodes, corrections) = children("field:(a b) OR c");
    assert_eq!(nodes.len(), 1);
    match &nodes[0] {
        Node::LogicalOr { left, .. } => {
            assert_eq!(left.kind(), NodeKind::Group);
            assert_eq!(left.domain(), Some("field"));
            assert_eq!(left.children().len(), 2);
        }
        other => panic!("expected LogicalOr, got {other:?}"),
    }
    assert!(corrections.is_empty());
}

#[test]
fn empty_group_is_ignored_with_siblings_intact() {
    let (nodes, corrections) = children("a () b");
    assert_eq!(nodes.len(), 2);
    assert_eq!(corrections, vec![CorrectionKind::EmptyGroupIgnored]);
}

#[test]
fn no_token_is_double_counted_between_ast_and_corrections() {
    let tree = galach::parse("a AND () NOT NOT +b (c OR d");
    let mut ast_token_positions = Vec::new();
    collect_token_positions(&tree.root, &mut ast_token_positions);
    let mut correction_token_positions: Vec<_> = tree
        .corrections
        .iter()
        .flat_map(|c| c.tokens.iter().map(|t| t.position()))
        .collect();
    ast_token_positions.sort_by_key(|p| p.offset());
    correction_token_positions.sort_by_key(|p| p.offset());

    let overlap: Vec<_> = ast_token_positions
        .iter()
        .filter(|p| correction_token_positions.contains(p))
        .collect();
    assert!(overlap.is_empty(), "a token offset appeared in both the AST and a correction");
}

fn collect_token_positions(node: &Node, out: &mut Vec<galach::Position>) {
    match node {
        Node::Term { token } => out.push(token.position()),
        Node::Include { token, operand } | Node::Exclude { token, operand } => {
            out.push(token.position());
            collect_token_positions(operand, out);
        }
        Node::LogicalNot { token, operand } => {
            out.push(token.position());
            collect_token_positions(operand, out);
        }
        Node::LogicalAnd { token, left, right } | Node::LogicalOr { token, left, right } => {
            out.push(token.position());
            collect_token_positions(left, out);
            collect_token_positions(right, out);
        }
        Node::Group {
            token_left,
            token_right,
            nodes,
            ..
        } => {
            out.push(token_left.position());
            out.push(token_right.position());
            for child in nodes {
                collect_token_positions(child, out);
            }
        }
        Node::Query { nodes } => {
            for child in nodes {
                collect_token_positions(child, out);
            }
        }
    }
}

#[test]
fn round_trip_preserves_structure_across_several_shapes() {
    for source in [
        "one two three",
        "a AND b OR c AND d",
        "+foo -bar",
        "field:(a b) OR c",
        "NOT (x OR y)",
    ] {
        let tree = galach::parse(source);
        let rendered = galach::generate(&tree.root);
        let reparsed = galach::parse(&rendered);
        assert!(
            structurally_equal(&tree.root, &reparsed.root),
            "source {source:?} rendered as {rendered:?}"
        );
    }
}

/// Round-tripping only promises structural equality: token positions may
/// shift, and `NOT`/`!` are interchangeable spellings of the same operator,
/// so `Node`'s derived `PartialEq` (which also compares lexeme/position) is
/// too strict for this comparison.
fn structurally_equal(a: &Node, b: &Node) -> bool {
    use galach::Token;

    fn terms_equal(a: &Token, b: &Token) -> bool {
        match (a, b) {
            (Token::Word { word: wa, domain: da, .. }, Token::Word { word: wb, domain: db, .. }) => {
                wa == wb && da == db
            }
            (
                Token::Phrase { phrase: pa, domain: da, .. },
                Token::Phrase { phrase: pb, domain: db, .. },
            ) => pa == pb && da == db,
            (Token::User { name: na, .. }, Token::User { name: nb, .. }) => na == nb,
            (Token::Tag { name: na, .. }, Token::Tag { name: nb, .. }) => na == nb,
            _ => false,
        }
    }

    fn children_equal(a: &[Node], b: &[Node]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| structurally_equal(x, y))
    }

    match (a, b) {
        (Node::Term { token: ta }, Node::Term { token: tb }) => terms_equal(ta, tb),
        (Node::Include { operand: oa, .. }, Node::Include { operand: ob, .. })
        | (Node::Exclude { operand: oa, .. }, Node::Exclude { operand: ob, .. })
        | (Node::LogicalNot { operand: oa, .. }, Node::LogicalNot { operand: ob, .. }) => {
            structurally_equal(oa, ob)
        }
        (
            Node::LogicalAnd { left: la, right: ra, .. },
            Node::LogicalAnd { left: lb, right: rb, .. },
        )
        | (
            Node::LogicalOr { left: la, right: ra, .. },
            Node::LogicalOr { left: lb, right: rb, .. },
        ) => structurally_equal(la, lb) && structurally_equal(ra, rb),
        (Node::Group { domain: da, nodes: na, .. }, Node::Group { domain: db, nodes: nb, .. }) => {
            da == db && children_equal(na, nb)
        }
        (Node::Query { nodes: na }, Node::Query { nodes: nb }) => children_equal(na, nb),
        _ => false,
    }
}
