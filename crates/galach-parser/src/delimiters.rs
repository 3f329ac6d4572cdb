//! Group delimiter balancing pre-pass.
//!
//! Runs once, before the shift/reduce main loop, so that the loop itself
//! can assume every `(`/`)` it sees has a partner.

use std::collections::HashSet;

use galach_core::{CorrectionKind, CorrectionLog, Token, TokenKind};

pub fn balance(tokens: Vec<Token>, corrections: &mut CorrectionLog) -> Vec<Token> {
    let mut open_stack: Vec<usize> = Vec::new();
    let mut unmatched: HashSet<usize> = HashSet::new();

    for (i, token) in tokens.iter().enumerate() {
        match token.kind() {
            TokenKind::GroupBegin => open_stack.push(i),
            TokenKind::GroupEnd => {
                if open_stack.pop().is_none() {
                    unmatched.insert(i);
                }
            }
            _ => {}
        }
    }
    // Closest delimiters match first by construction (LIFO), so anything
    // still open here never found a partner.
    unmatched.extend(open_stack);

    if unmatched.is_empty() {
        return tokens;
    }

    let mut kept = Vec::with_capacity(tokens.len());
    for (i, token) in tokens.into_iter().enumerate() {
        if unmatched.contains(&i) {
            let kind = if token.kind() == TokenKind::GroupBegin {
                CorrectionKind::UnmatchedGroupLeftDelimiterIgnored
            } else {
                CorrectionKind::UnmatchedGroupRightDelimiterIgnored
            };
            corrections.record(kind, vec![token]);
        } else {
            kept.push(token);
        }
    }
    kept
}
