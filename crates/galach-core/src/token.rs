//! Token model.
//!
//! [`Token`] is a tagged union with one variant per terminal the tokenizer
//! can emit. [`TokenKind`] is a fieldless companion enum used purely for
//! bitset membership tests via [`KindSet`].

use crate::position::Position;

/// One lexical terminal, carrying its original text and byte offset plus
/// whatever extra fields its kind needs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Token {
    /// A run of inter-token spacing. Never survives into the AST.
    Whitespace { lexeme: String, position: Position },
    /// An unquoted term, optionally domain-prefixed (`field:value`).
    Word {
        lexeme: String,
        position: Position,
        word: String,
        domain: Option<String>,
    },
    /// A quoted term, optionally domain-prefixed.
    Phrase {
        lexeme: String,
        position: Position,
        phrase: String,
        domain: Option<String>,
        quote: char,
    },
    /// `@name` mention.
    User {
        lexeme: String,
        position: Position,
        marker: char,
        name: String,
    },
    /// `#name` tag.
    Tag {
        lexeme: String,
        position: Position,
        marker: char,
        name: String,
    },
    /// Opening `(` of a group, possibly domain-prefixed.
    GroupBegin {
        lexeme: String,
        position: Position,
        domain: Option<String>,
    },
    /// Closing `)` of a group.
    GroupEnd { lexeme: String, position: Position },
    /// Textual `AND`, word-bounded.
    LogicalAnd { lexeme: String, position: Position },
    /// Textual `OR`, word-bounded.
    LogicalOr { lexeme: String, position: Position },
    /// Textual `NOT`, word-bounded.
    LogicalNot { lexeme: String, position: Position },
    /// Symbolic `!` negation.
    LogicalNot2 { lexeme: String, position: Position },
    /// `+` inclusivity prefix.
    Include { lexeme: String, position: Position },
    /// `-` inclusivity prefix.
    Exclude { lexeme: String, position: Position },
    /// Catch-all terminal for anything no pattern matched. Always stripped
    /// by the parser with a `BailoutTokenIgnored` correction.
    Bailout { lexeme: String, position: Position },
}

impl Token {
    /// The fieldless discriminant, for bitset membership tests.
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Whitespace { .. } => TokenKind::Whitespace,
            Token::Word { .. } => TokenKind::Word,
            Token::Phrase { .. } => TokenKind::Phrase,
            Token::User { .. } => TokenKind::User,
            Token::Tag { .. } => TokenKind::Tag,
            Token::GroupBegin { .. } => TokenKind::GroupBegin,
            Token::GroupEnd { .. } => TokenKind::GroupEnd,
            Token::LogicalAnd { .. } => TokenKind::LogicalAnd,
            Token::LogicalOr { .. } => TokenKind::LogicalOr,
            Token::LogicalNot { .. } => TokenKind::LogicalNot,
            Token::LogicalNot2 { .. } => TokenKind::LogicalNot2,
            Token::Include { .. } => TokenKind::Include,
            Token::Exclude { .. } => TokenKind::Exclude,
            Token::Bailout { .. } => TokenKind::Bailout,
        }
    }

    pub fn lexeme(&self) -> &str {
        match self {
            Token::Whitespace { lexeme, .. }
            | Token::Word { lexeme, .. }
            | Token::Phrase { lexeme, .. }
            | Token::User { lexeme, .. }
            | Token::Tag { lexeme, .. }
            | Token::GroupBegin { lexeme, .. }
            | Token::GroupEnd { lexeme, .. }
            | Token::LogicalAnd { lexeme, .. }
            | Token::LogicalOr { lexeme, .. }
            | Token::LogicalNot { lexeme, .. }
            | Token::LogicalNot2 { lexeme, .. }
            | Token::Include { lexeme, .. }
            | Token::Exclude { lexeme, .. }
            | Token::Bailout { lexeme, .. } => lexeme,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Token::Whitespace { position, .. }
            | Token::Word { position, .. }
            | Token::Phrase { position, .. }
            | Token::User { position, .. }
            | Token::Tag { position, .. }
            | Token::GroupBegin { position, .. }
            | Token::GroupEnd { position, .. }
            | Token::LogicalAnd { position, .. }
            | Token::LogicalOr { position, .. }
            | Token::LogicalNot { position, .. }
            | Token::LogicalNot2 { position, .. }
            | Token::Include { position, .. }
            | Token::Exclude { position, .. }
            | Token::Bailout { position, .. } => *position,
        }
    }

    pub fn is(&self, set: KindSet) -> bool {
        set.contains(self.kind())
    }
}

/// Fieldless discriminant of [`Token`]. One bit per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u32)]
pub enum TokenKind {
    Whitespace = 0,
    Word,
    Phrase,
    User,
    Tag,
    GroupBegin,
    GroupEnd,
    LogicalAnd,
    LogicalOr,
    LogicalNot,
    LogicalNot2,
    Include,
    Exclude,
    Bailout,
}

impl TokenKind {
    pub const fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

/// A bitset of [`TokenKind`]s, for O(1) membership tests.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KindSet(u32);

impl KindSet {
    pub const EMPTY: KindSet = KindSet(0);

    pub const fn new(kinds: &[TokenKind]) -> Self {
        let mut bits = 0u32;
        let mut i = 0;
        while i < kinds.len() {
            bits |= kinds[i].bit();
            i += 1;
        }
        KindSet(bits)
    }

    pub const fn single(kind: TokenKind) -> Self {
        KindSet(kind.bit())
    }

    pub const fn contains(&self, kind: TokenKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub const fn union(self, other: KindSet) -> KindSet {
        KindSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for KindSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for kind in [
            TokenKind::Whitespace,
            TokenKind::Word,
            TokenKind::Phrase,
            TokenKind::User,
            TokenKind::Tag,
            TokenKind::GroupBegin,
            TokenKind::GroupEnd,
            TokenKind::LogicalAnd,
            TokenKind::LogicalOr,
            TokenKind::LogicalNot,
            TokenKind::LogicalNot2,
            TokenKind::Include,
            TokenKind::Exclude,
            TokenKind::Bailout,
        ] {
            if self.contains(kind) {
                list.entry(&kind);
            }
        }
        list.finish()
    }
}

/// Composite [`KindSet`]s used throughout the parser.
pub mod composite {
    use super::{KindSet, TokenKind};

    pub const OPERATOR_NOT: KindSet = KindSet::new(&[TokenKind::LogicalNot, TokenKind::LogicalNot2]);
    pub const OPERATOR_INCLUSIVITY: KindSet =
        KindSet::new(&[TokenKind::Include, TokenKind::Exclude]);
    pub const OPERATOR_PREFIX: KindSet = KindSet::new(&[
        TokenKind::Include,
        TokenKind::Exclude,
        TokenKind::LogicalNot2,
    ]);
    pub const OPERATOR_UNARY: KindSet = KindSet::new(&[
        TokenKind::Include,
        TokenKind::Exclude,
        TokenKind::LogicalNot,
        TokenKind::LogicalNot2,
    ]);
    pub const OPERATOR_BINARY: KindSet = KindSet::new(&[TokenKind::LogicalAnd, TokenKind::LogicalOr]);
    pub const OPERATOR: KindSet = KindSet::new(&[
        TokenKind::Include,
        TokenKind::Exclude,
        TokenKind::LogicalNot,
        TokenKind::LogicalNot2,
        TokenKind::LogicalAnd,
        TokenKind::LogicalOr,
    ]);
    pub const GROUP_DELIMITER: KindSet = KindSet::new(&[TokenKind::GroupBegin, TokenKind::GroupEnd]);
    /// Terminal kinds that can stand as the sole content of a `Term` node.
    pub const TERM: KindSet = KindSet::new(&[
        TokenKind::Word,
        TokenKind::Phrase,
        TokenKind::User,
        TokenKind::Tag,
    ]);
}

/// An ordered list of tokens plus the source text they were lexed from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TokenSequence {
    tokens: Vec<Token>,
    source: String,
}

impl TokenSequence {
    pub fn new(tokens: Vec<Token>, source: String) -> Self {
        Self { tokens, source }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_set_contains_and_union() {
        let set = KindSet::new(&[TokenKind::GroupBegin, TokenKind::GroupEnd]);
        assert!(set.contains(TokenKind::GroupBegin));
        assert!(set.contains(TokenKind::GroupEnd));
        assert!(!set.contains(TokenKind::Word));

        let union = KindSet::single(TokenKind::Include).union(KindSet::single(TokenKind::Exclude));
        assert!(union.contains(TokenKind::Include));
        assert!(union.contains(TokenKind::Exclude));
        assert!(!union.contains(TokenKind::LogicalNot));
    }

    #[test]
    fn composite_operator_set_covers_all_operators() {
        use composite::*;
        assert!(OPERATOR.contains(TokenKind::Include));
        assert!(OPERATOR.contains(TokenKind::Exclude));
        assert!(OPERATOR.contains(TokenKind::LogicalNot));
        assert!(OPERATOR.contains(TokenKind::LogicalNot2));
        assert!(OPERATOR.contains(TokenKind::LogicalAnd));
        assert!(OPERATOR.contains(TokenKind::LogicalOr));
        assert!(!OPERATOR.contains(TokenKind::Word));
        assert!(!OPERATOR.contains(TokenKind::GroupBegin));
    }

    #[test]
    fn operator_prefix_excludes_logical_not_textual() {
        assert!(composite::OPERATOR_PREFIX.contains(TokenKind::LogicalNot2));
        assert!(!composite::OPERATOR_PREFIX.contains(TokenKind::LogicalNot));
    }

    #[test]
    fn token_kind_roundtrips_through_token() {
        let tok = Token::Word {
            lexeme: "foo".into(),
            position: Position::new(0),
            word: "foo".into(),
            domain: None,
        };
        assert_eq!(tok.kind(), TokenKind::Word);
        assert_eq!(tok.lexeme(), "foo");
        assert!(tok.is(composite::TERM));
        assert!(!tok.is(composite::OPERATOR));
    }
}
