//! The Galach tokenizer.
//!
//! An iterator wrapping an underlying per-position matcher, merging runs of
//! unrecognized input into a single token instead of emitting one per byte.
//! Rules are matched with `regex` rather than a generated DFA so that match
//! order at a given cursor position stays under our control.

mod rules;

use galach_core::{Position, Token, TokenSequence};

/// Streams `Token`s out of a source string left to right, never failing.
pub struct Tokenizer<'src> {
    input: &'src str,
    pos: usize,
    /// Byte offset where the current bailout run started, if one is open.
    bailout_start: Option<usize>,
    /// A token matched while a bailout run was open; flushed out after the
    /// bailout token is returned.
    pending: Option<Token>,
}

impl<'src> Tokenizer<'src> {
    pub fn new(input: &'src str) -> Self {
        Self {
            input,
            pos: 0,
            bailout_start: None,
            pending: None,
        }
    }

    fn make_bailout(&self, start: usize, end: usize) -> Token {
        Token::Bailout {
            lexeme: self.input[start..end].to_string(),
            position: Position::new(start as u32),
        }
    }

    fn next_char_len(&self) -> usize {
        self.input[self.pos..]
            .chars()
            .next()
            .map(char::len_utf8)
            .unwrap_or(1)
    }
}

impl<'src> Iterator for Tokenizer<'src> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if let Some(token) = self.pending.take() {
            return Some(token);
        }

        loop {
            if self.pos >= self.input.len() {
                return self
                    .bailout_start
                    .take()
                    .map(|start| self.make_bailout(start, self.pos));
            }

            match rules::next_token(self.input, self.pos) {
                Some((token, new_pos)) => {
                    debug_assert!(
                        new_pos > self.pos,
                        "tokenizer rule matched without advancing the cursor"
                    );
                    if let Some(start) = self.bailout_start.take() {
                        let bailout = self.make_bailout(start, self.pos);
                        self.pos = new_pos;
                        self.pending = Some(token);
                        return Some(bailout);
                    }
                    self.pos = new_pos;
                    return Some(token);
                }
                None => {
                    if self.bailout_start.is_none() {
                        self.bailout_start = Some(self.pos);
                    }
                    self.pos += self.next_char_len();
                }
            }
        }
    }
}

/// Tokenizes `input` into a full token sequence. Never fails.
pub fn tokenize(input: &str) -> TokenSequence {
    let tokens: Vec<Token> = Tokenizer::new(input).collect();
    TokenSequence::new(tokens, input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use galach_core::TokenKind;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).tokens().iter().map(Token::kind).collect()
    }

    #[test]
    fn plain_words_separated_by_whitespace() {
        use TokenKind::*;
        assert_eq!(kinds("one two three"), vec![Word, Whitespace, Word, Whitespace, Word]);
    }

    #[test]
    fn textual_operators_require_word_boundaries() {
        use TokenKind::*;
        assert_eq!(
            kinds("a AND b"),
            vec![Word, Whitespace, LogicalAnd, Whitespace, Word]
        );
        // "ANDROID" is not a boundary-delimited "AND".
        assert_eq!(kinds("ANDROID"), vec![Word]);
    }

    #[test]
    fn include_and_exclude_prefixes() {
        use TokenKind::*;
        assert_eq!(
            kinds("+foo -bar"),
            vec![Include, Word, Whitespace, Exclude, Word]
        );
        // Mid-word hyphen is absorbed into the word, not read as Exclude.
        assert_eq!(kinds("well-known"), vec![Word]);
    }

    #[test]
    fn logical_not_symbolic_and_textual() {
        use TokenKind::*;
        assert_eq!(
            kinds("NOT NOT +x"),
            vec![LogicalNot, Whitespace, LogicalNot, Whitespace, Include, Word]
        );
        assert_eq!(kinds("!foo"), vec![LogicalNot2, Word]);
    }

    #[test]
    fn domain_prefixed_group_wins_over_domain_prefixed_word() {
        use TokenKind::*;
        assert_eq!(
            kinds("field:(a b)"),
            vec![GroupBegin, Word, Whitespace, Word, GroupEnd]
        );
        let tokens = tokenize("field:(a b)").into_tokens();
        match &tokens[0] {
            Token::GroupBegin { domain, lexeme, .. } => {
                assert_eq!(domain.as_deref(), Some("field"));
                assert_eq!(lexeme, "field:(");
            }
            other => panic!("expected GroupBegin, got {other:?}"),
        }
    }

    #[test]
    fn domain_prefixed_word() {
        let tokens = tokenize("field:value").into_tokens();
        assert_eq!(tokens.len(), 1);
        match &tokens[0] {
            Token::Word { domain, word, .. } => {
                assert_eq!(domain.as_deref(), Some("field"));
                assert_eq!(word, "value");
            }
            other => panic!("expected Word, got {other:?}"),
        }
    }

    #[test]
    fn phrase_with_escapes() {
        let tokens = tokenize(r#""a \"quoted\" \\word""#).into_tokens();
        assert_eq!(tokens.len(), 1);
        match &tokens[0] {
            Token::Phrase { phrase, domain, .. } => {
                assert_eq!(domain, &None);
                assert_eq!(phrase, r#"a "quoted" \word"#);
            }
            other => panic!("expected Phrase, got {other:?}"),
        }
    }

    #[test]
    fn user_and_tag_mentions() {
        use TokenKind::*;
        assert_eq!(kinds("@alice #rust"), vec![User, Whitespace, Tag]);
    }

    #[test]
    fn unrecognized_input_merges_into_one_bailout_token() {
        // A bare '!' followed by whitespace satisfies neither rule 4's
        // lookahead nor the word pattern (which refuses '!' as a leading
        // character so rule 4 gets first refusal on it), so it bails out.
        let tokens = tokenize("a ! b").into_tokens();
        use TokenKind::*;
        assert_eq!(
            tokens.iter().map(Token::kind).collect::<Vec<_>>(),
            vec![Word, Whitespace, Bailout, Whitespace, Word]
        );
        match &tokens[2] {
            Token::Bailout { lexeme, .. } => assert_eq!(lexeme, "!"),
            other => panic!("expected Bailout, got {other:?}"),
        }
    }

    #[test]
    fn operator_gated_on_non_whitespace_lookahead_becomes_bailout() {
        // a bare '+' with nothing non-whitespace immediately after does not
        // satisfy rule 5's lookahead, so it falls through to Bailout.
        let tokens = tokenize("+ foo").into_tokens();
        use TokenKind::*;
        assert_eq!(
            tokens.iter().map(Token::kind).collect::<Vec<_>>(),
            vec![Bailout, Whitespace, Word]
        );
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokenize("").is_empty());
    }
}
