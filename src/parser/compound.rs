//! Member splitting for `join`, `order` and `bond` locations

use tracing::trace;

use crate::error::{LocationError, LocationResult};
use crate::models::{Span, Strand};

use super::classifier::unwrap_call;
use super::simple::parse_simple_span;
use super::tokenizer::{Token, TokenKind, fragment};

/// Split a member list on commas that are not nested inside parentheses
///
/// # Errors
///
/// Returns a `Decompose` error for an empty list, an empty member (`a,,b`,
/// leading or trailing comma) or a stray `)`
pub fn split_members<'t>(
    source: &str,
    tokens: &'t [Token<'t>],
) -> LocationResult<Vec<&'t [Token<'t>]>> {
    let text = fragment(source, tokens, source);
    if tokens.is_empty() {
        return Err(LocationError::decompose(text, "empty member list"));
    }

    let mut members = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| LocationError::decompose(text, "unexpected `)`"))?;
            }
            TokenKind::Comma if depth == 0 => {
                members.push(&tokens[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    members.push(&tokens[start..]);

    if members.iter().any(|member| member.is_empty()) {
        return Err(LocationError::decompose(text, "empty member"));
    }

    trace!(members = members.len(), list = text, "split compound members");
    Ok(members)
}

/// Parse every member of a compound location in textual order
///
/// A member is either a simple location or `complement(simple)`; complemented
/// members come back on the reverse strand.
///
/// # Errors
///
/// Returns the first member's error; nothing is returned for the other members
pub fn decompose(
    source: &str,
    tokens: &[Token<'_>],
    record_accession: &str,
) -> LocationResult<Vec<Span>> {
    split_members(source, tokens)?
        .into_iter()
        .map(|member| parse_member(source, member, record_accession))
        .collect()
}

fn parse_member(
    source: &str,
    member: &[Token<'_>],
    record_accession: &str,
) -> LocationResult<Span> {
    let inner = unwrap_call(source, member, "complement")
        .map_err(|err| LocationError::decompose(err.fragment(), err.reason()))?;

    if let Some(inner) = inner {
        reject_nested(source, inner)?;
        let span = parse_simple_span(source, inner, record_accession)?;
        return Ok(span.with_strand(Strand::Reverse));
    }

    reject_nested(source, member)?;
    parse_simple_span(source, member, record_accession)
}

fn reject_nested(source: &str, tokens: &[Token<'_>]) -> LocationResult<()> {
    let Some(head) = tokens.first().filter(|t| t.is(TokenKind::Word)) else {
        return Ok(());
    };
    if !tokens.get(1).is_some_and(|t| t.is(TokenKind::LParen)) {
        return Ok(());
    }

    Err(LocationError::decompose(
        fragment(source, tokens, source),
        format!("`{}(...)` cannot be nested in a compound member", head.text),
    ))
}
