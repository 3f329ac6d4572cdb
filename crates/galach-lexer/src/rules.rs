//! The ordered pattern table. `next_token` tries each rule in declared
//! order and returns the first match at `pos`; the tokenizer loop in
//! `lib.rs` owns the bailout-run accumulation for whatever matches nothing.

use std::sync::LazyLock;

use regex::Regex;

use galach_core::Position;
use galach_core::Token;

static IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]*").unwrap());

/// First-char class for an unquoted word: anything that isn't whitespace,
/// a group delimiter, a quote, or the lead character of a prefix operator.
/// `@`/`#` are excluded here so rule 11 gets first refusal on them, but they
/// remain legal *inside* a word (e.g. `foo@bar.com`).
static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[^\s()"+!@#][^\s()"+!]*"#).unwrap());

static PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^"(?:[^"\\]|\\.)*""#).unwrap());

fn char_at(input: &str, pos: usize) -> Option<char> {
    input[pos..].chars().next()
}

fn char_before(input: &str, pos: usize) -> Option<char> {
    input[..pos].chars().next_back()
}

fn is_ws_or_delim(c: char) -> bool {
    c.is_whitespace() || c == '(' || c == ')'
}

/// "W-boundary": start/end of input, whitespace, or a group delimiter.
fn boundary_before(input: &str, pos: usize) -> bool {
    pos == 0 || char_before(input, pos).is_some_and(is_ws_or_delim)
}

fn boundary_after(input: &str, pos: usize) -> bool {
    pos == input.len() || char_at(input, pos).is_some_and(is_ws_or_delim)
}

/// `-`'s "prefix context": start of input, whitespace, or `(` immediately
/// before. `)` does not count, so a bare `-` right after a closing group is
/// absorbed into the word that follows rather than read as `Exclude`.
fn exclude_prefix_context(input: &str, pos: usize) -> bool {
    pos == 0 || char_before(input, pos).is_some_and(|c| c.is_whitespace() || c == '(')
}

fn keyword_match(input: &str, pos: usize, keyword: &str) -> bool {
    boundary_before(input, pos)
        && input[pos..].len() >= keyword.len()
        && &input[pos..pos + keyword.len()] == keyword
        && boundary_after(input, pos + keyword.len())
}

/// Matches an optional `<ident>:` prefix at `pos`. Returns `(domain, rest)`
/// where `rest` is the byte offset right after the consumed prefix (`pos`
/// itself when there is no prefix).
fn match_domain_prefix(input: &str, pos: usize) -> (Option<String>, usize) {
    let Some(m) = IDENT_RE.find(&input[pos..]) else {
        return (None, pos);
    };
    let after_ident = pos + m.end();
    if char_at(input, after_ident) != Some(':') {
        return (None, pos);
    }
    (Some(m.as_str().to_string()), after_ident + 1)
}

fn make_position(pos: usize) -> Position {
    Position::new(pos as u32)
}

fn try_and(input: &str, pos: usize) -> Option<(Token, usize)> {
    keyword_match(input, pos, "AND").then(|| {
        (
            Token::LogicalAnd {
                lexeme: "AND".to_string(),
                position: make_position(pos),
            },
            pos + 3,
        )
    })
}

fn try_or(input: &str, pos: usize) -> Option<(Token, usize)> {
    keyword_match(input, pos, "OR").then(|| {
        (
            Token::LogicalOr {
                lexeme: "OR".to_string(),
                position: make_position(pos),
            },
            pos + 2,
        )
    })
}

fn try_not(input: &str, pos: usize) -> Option<(Token, usize)> {
    keyword_match(input, pos, "NOT").then(|| {
        (
            Token::LogicalNot {
                lexeme: "NOT".to_string(),
                position: make_position(pos),
            },
            pos + 3,
        )
    })
}

fn try_not2(input: &str, pos: usize) -> Option<(Token, usize)> {
    if char_at(input, pos) != Some('!') {
        return None;
    }
    char_at(input, pos + 1).filter(|c| !c.is_whitespace())?;
    Some((
        Token::LogicalNot2 {
            lexeme: "!".to_string(),
            position: make_position(pos),
        },
        pos + 1,
    ))
}

fn try_include(input: &str, pos: usize) -> Option<(Token, usize)> {
    if char_at(input, pos) != Some('+') {
        return None;
    }
    char_at(input, pos + 1).filter(|c| !c.is_whitespace())?;
    Some((
        Token::Include {
            lexeme: "+".to_string(),
            position: make_position(pos),
        },
        pos + 1,
    ))
}

fn try_exclude(input: &str, pos: usize) -> Option<(Token, usize)> {
    if char_at(input, pos) != Some('-') || !exclude_prefix_context(input, pos) {
        return None;
    }
    char_at(input, pos + 1).filter(|c| !c.is_whitespace())?;
    Some((
        Token::Exclude {
            lexeme: "-".to_string(),
            position: make_position(pos),
        },
        pos + 1,
    ))
}

fn try_group_begin(input: &str, pos: usize) -> Option<(Token, usize)> {
    let (domain, rest) = match_domain_prefix(input, pos);
    if char_at(input, rest) != Some('(') {
        return None;
    }
    let end = rest + 1;
    Some((
        Token::GroupBegin {
            lexeme: input[pos..end].to_string(),
            position: make_position(pos),
            domain,
        },
        end,
    ))
}

fn try_group_end(input: &str, pos: usize) -> Option<(Token, usize)> {
    (char_at(input, pos) == Some(')')).then(|| {
        (
            Token::GroupEnd {
                lexeme: ")".to_string(),
                position: make_position(pos),
            },
            pos + 1,
        )
    })
}

/// Decodes `\"` and `\\`; any other `\x` keeps its backslash literally.
fn decode_phrase_body(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('"') => {
                    out.push('"');
                    chars.next();
                }
                Some('\\') => {
                    out.push('\\');
                    chars.next();
                }
                _ => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn try_phrase(input: &str, pos: usize) -> Option<(Token, usize)> {
    let (domain, rest) = match_domain_prefix(input, pos);
    let m = PHRASE_RE.find(&input[rest..])?;
    let end = rest + m.end();
    let body = &input[rest + 1..end - 1];
    Some((
        Token::Phrase {
            lexeme: input[pos..end].to_string(),
            position: make_position(pos),
            phrase: decode_phrase_body(body),
            domain,
            quote: '"',
        },
        end,
    ))
}

fn try_word(input: &str, pos: usize) -> Option<(Token, usize)> {
    let (domain, rest) = match_domain_prefix(input, pos);
    let m = WORD_RE.find(&input[rest..])?;
    let end = rest + m.end();
    Some((
        Token::Word {
            lexeme: input[pos..end].to_string(),
            position: make_position(pos),
            word: m.as_str().to_string(),
            domain,
        },
        end,
    ))
}

fn try_user_or_tag(input: &str, pos: usize) -> Option<(Token, usize)> {
    let marker = char_at(input, pos).filter(|c| *c == '@' || *c == '#')?;
    let m = IDENT_RE.find(&input[pos + 1..])?;
    let end = pos + 1 + m.end();
    let lexeme = input[pos..end].to_string();
    let name = m.as_str().to_string();
    let position = make_position(pos);
    Some(if marker == '@' {
        (
            Token::User {
                lexeme,
                position,
                marker,
                name,
            },
            end,
        )
    } else {
        (
            Token::Tag {
                lexeme,
                position,
                marker,
                name,
            },
            end,
        )
    })
}

fn try_whitespace(input: &str, pos: usize) -> Option<(Token, usize)> {
    let end = input[pos..]
        .char_indices()
        .take_while(|(_, c)| matches!(c, ' ' | '\t' | '\n' | '\r'))
        .last()
        .map(|(i, c)| pos + i + c.len_utf8())?;
    Some((
        Token::Whitespace {
            lexeme: input[pos..end].to_string(),
            position: make_position(pos),
        },
        end,
    ))
}

/// Tries every rule in declared order, returning the first match. `None`
/// means the tokenizer loop should start (or extend) a bailout run at
/// `pos`.
pub fn next_token(input: &str, pos: usize) -> Option<(Token, usize)> {
    try_and(input, pos)
        .or_else(|| try_or(input, pos))
        .or_else(|| try_not(input, pos))
        .or_else(|| try_not2(input, pos))
        .or_else(|| try_include(input, pos))
        .or_else(|| try_exclude(input, pos))
        .or_else(|| try_group_begin(input, pos))
        .or_else(|| try_group_end(input, pos))
        .or_else(|| try_phrase(input, pos))
        .or_else(|| try_word(input, pos))
        .or_else(|| try_user_or_tag(input, pos))
        .or_else(|| try_whitespace(input, pos))
}
