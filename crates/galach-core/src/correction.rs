//! The correction log.
//!
//! An append-only `Vec` wrapper with `push`/`len`/`is_empty`/`iter`/
//! `into_vec`, plus a small plain-text rendering helper for displaying
//! what the parser had to fix.

use crate::token::Token;

/// The reason the parser discarded one or more tokens. Ordinals are part
/// of the public contract — downstream consumers key on them, so the
/// declaration order here must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum CorrectionKind {
    UnaryOpPrecedingOpIgnored = 0,
    UnaryOpMissingOperandIgnored = 1,
    BinaryOpMissingLeftOperandIgnored = 2,
    BinaryOpMissingRightOperandIgnored = 3,
    BinaryOpFollowingOpIgnored = 4,
    LogicalNotPrecedingInclusivityIgnored = 5,
    EmptyGroupIgnored = 6,
    UnmatchedGroupLeftDelimiterIgnored = 7,
    UnmatchedGroupRightDelimiterIgnored = 8,
    BailoutTokenIgnored = 9,
}

impl CorrectionKind {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    fn label(self) -> &'static str {
        match self {
            CorrectionKind::UnaryOpPrecedingOpIgnored => "unary operator preceding another operator",
            CorrectionKind::UnaryOpMissingOperandIgnored => "unary operator missing its operand",
            CorrectionKind::BinaryOpMissingLeftOperandIgnored => {
                "binary operator missing its left operand"
            }
            CorrectionKind::BinaryOpMissingRightOperandIgnored => {
                "binary operator missing its right operand"
            }
            CorrectionKind::BinaryOpFollowingOpIgnored => "binary operator following another operator",
            CorrectionKind::LogicalNotPrecedingInclusivityIgnored => {
                "NOT/! immediately preceding +/- is illegal"
            }
            CorrectionKind::EmptyGroupIgnored => "empty group",
            CorrectionKind::UnmatchedGroupLeftDelimiterIgnored => "unmatched '('",
            CorrectionKind::UnmatchedGroupRightDelimiterIgnored => "unmatched ')'",
            CorrectionKind::BailoutTokenIgnored => "unrecognized input",
        }
    }
}

/// A single recovery action the parser took to accept malformed input.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Correction {
    pub kind: CorrectionKind,
    pub tokens: Vec<Token>,
}

impl Correction {
    pub fn new(kind: CorrectionKind, tokens: Vec<Token>) -> Self {
        Self { kind, tokens }
    }
}

impl std::fmt::Display for Correction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ", self.kind.label())?;
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?} @ {}", token.lexeme(), token.position())?;
        }
        Ok(())
    }
}

/// Ordered, append-only log of every recovery action taken during a parse.
/// Order is the temporal order in which the parser noticed each defect;
/// duplicate entries for the same defect kind are expected.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CorrectionLog(Vec<Correction>);

impl CorrectionLog {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn record(&mut self, kind: CorrectionKind, tokens: Vec<Token>) {
        self.0.push(Correction::new(kind, tokens));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Correction> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Correction] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Correction> {
        self.0
    }

    /// A one-line-per-correction rendering, standing in for the teacher's
    /// `DiagnosticsPrinter` in contexts (the CLI) that want human output.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for correction in &self.0 {
            out.push_str(&correction.to_string());
            out.push('\n');
        }
        out
    }
}

impl IntoIterator for CorrectionLog {
    type Item = Correction;
    type IntoIter = std::vec::IntoIter<Correction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CorrectionLog {
    type Item = &'a Correction;
    type IntoIter = std::slice::Iter<'a, Correction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Correction> for CorrectionLog {
    fn from_iter<T: IntoIterator<Item = Correction>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    fn and_token() -> Token {
        Token::LogicalAnd {
            lexeme: "AND".into(),
            position: Position::new(4),
        }
    }

    #[test]
    fn ordinals_match_the_stable_table() {
        assert_eq!(CorrectionKind::UnaryOpPrecedingOpIgnored.ordinal(), 0);
        assert_eq!(CorrectionKind::BinaryOpFollowingOpIgnored.ordinal(), 4);
        assert_eq!(CorrectionKind::BailoutTokenIgnored.ordinal(), 9);
    }

    #[test]
    fn record_appends_in_order() {
        let mut log = CorrectionLog::new();
        assert!(log.is_empty());
        log.record(CorrectionKind::BinaryOpMissingRightOperandIgnored, vec![and_token()]);
        log.record(CorrectionKind::BailoutTokenIgnored, vec![]);
        assert_eq!(log.len(), 2);
        let kinds: Vec<_> = log.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CorrectionKind::BinaryOpMissingRightOperandIgnored,
                CorrectionKind::BailoutTokenIgnored
            ]
        );
    }

    #[test]
    fn render_produces_one_line_per_correction() {
        let mut log = CorrectionLog::new();
        log.record(CorrectionKind::BinaryOpMissingRightOperandIgnored, vec![and_token()]);
        let rendered = log.render();
        assert_eq!(rendered.lines().count(), 1);
        assert!(rendered.contains("AND"));
    }
}
