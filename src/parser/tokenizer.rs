//! Lexical rules for feature location descriptors
//!
//! The rule table is compiled once and shared read-only by every parse call.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{LocationError, LocationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Remote accession prefix including its colon, `J12345.1:`
    Accession,
    /// Bare identifier such as `complement` or `join`
    Word,
    Number,
    /// `..`
    Range,
    /// `^`
    Caret,
    /// `<`
    Less,
    /// `>`
    Greater,
    LParen,
    RParen,
    Comma,
}

impl TokenKind {
    #[must_use]
    pub const fn is_marker(&self) -> bool {
        matches!(self, Self::Less | Self::Greater)
    }
}

/// One lexeme borrowed from the descriptor text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of `text` in the trimmed descriptor
    pub offset: usize,
    /// Whitespace separated this token from the previous one
    pub space_before: bool,
}

impl Token<'_> {
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Word && self.text == word
    }
}

struct Rule {
    /// `None` for whitespace, which is skipped
    kind: Option<TokenKind>,
    pattern: Regex,
}

impl Rule {
    fn new(kind: Option<TokenKind>, pattern: &str) -> Self {
        Self {
            kind,
            pattern: Regex::new(&format!("^(?:{pattern})")).expect("token patterns are valid"),
        }
    }
}

// Accession must be tried before Word so `AB1.2:` is not split at the dot.
static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(None, r"\s+"),
        Rule::new(
            Some(TokenKind::Accession),
            r"[A-Za-z][A-Za-z0-9_]*(?:\.[A-Za-z0-9]+)?:",
        ),
        Rule::new(Some(TokenKind::Word), r"[A-Za-z][A-Za-z0-9_]*"),
        Rule::new(Some(TokenKind::Number), r"\d+"),
        Rule::new(Some(TokenKind::Range), r"\.\."),
        Rule::new(Some(TokenKind::Caret), r"\^"),
        Rule::new(Some(TokenKind::Less), r"<"),
        Rule::new(Some(TokenKind::Greater), r">"),
        Rule::new(Some(TokenKind::LParen), r"\("),
        Rule::new(Some(TokenKind::RParen), r"\)"),
        Rule::new(Some(TokenKind::Comma), r","),
    ]
});

/// Split a descriptor into tokens
///
/// # Errors
///
/// Returns a `Tokenize` error at the first character no rule accepts
pub fn tokenize(source: &str) -> LocationResult<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut space_before = false;

    'scan: while pos < source.len() {
        let rest = &source[pos..];

        for rule in RULES.iter() {
            let Some(found) = rule.pattern.find(rest) else {
                continue;
            };

            match rule.kind {
                None => space_before = true,
                Some(kind) => {
                    tokens.push(Token {
                        kind,
                        text: found.as_str(),
                        offset: pos,
                        space_before,
                    });
                    space_before = false;
                }
            }

            pos += found.end();
            continue 'scan;
        }

        let bad = rest.chars().next().unwrap_or_default();
        return Err(LocationError::tokenize(
            rest,
            format!("unexpected character `{bad}` at offset {pos}"),
        ));
    }

    Ok(tokens)
}

/// Source text covered by a run of tokens, or `fallback` for an empty run
#[must_use]
pub fn fragment<'a>(source: &'a str, tokens: &[Token<'_>], fallback: &'a str) -> &'a str {
    match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => source.get(first.offset..last.end()).unwrap_or(fallback),
        _ => fallback,
    }
}
