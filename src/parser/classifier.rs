//! Decides which of the four descriptor shapes a token stream has

use crate::error::{LocationError, LocationResult};
use crate::models::{CompoundOperator, Strand};

use super::tokenizer::{Token, TokenKind, fragment};

/// The syntactic shape of a descriptor together with the tokens inside its
/// outermost wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationShape<'t> {
    /// `N..M`
    Simple(&'t [Token<'t>]),
    /// `complement(N..M)`
    ComplementedSimple(&'t [Token<'t>]),
    /// `join(a,b,...)`, members still comma-separated
    Compound {
        operator: CompoundOperator,
        members: &'t [Token<'t>],
    },
    /// `complement(join(a,b,...))`
    ComplementedCompound {
        operator: CompoundOperator,
        members: &'t [Token<'t>],
    },
}

impl LocationShape<'_> {
    #[must_use]
    pub const fn name(&self) -> &str {
        match self {
            Self::Simple(_) => "simple",
            Self::ComplementedSimple(_) => "complemented simple",
            Self::Compound { .. } => "compound",
            Self::ComplementedCompound { .. } => "complemented compound",
        }
    }

    /// Strand implied by the outermost `complement`
    #[must_use]
    pub const fn strand(&self) -> Strand {
        match self {
            Self::Simple(_) | Self::Compound { .. } => Strand::Forward,
            Self::ComplementedSimple(_) | Self::ComplementedCompound { .. } => Strand::Reverse,
        }
    }

    #[must_use]
    pub const fn is_compound(&self) -> bool {
        matches!(
            self,
            Self::Compound { .. } | Self::ComplementedCompound { .. }
        )
    }
}

/// Classify a whole descriptor
///
/// Shapes are tried in order: complemented compound, compound, complemented
/// simple, simple. A simple shape is only checked for stray parentheses here;
/// its content is validated by the simple span parser.
///
/// # Errors
///
/// Returns a `Classify` error for empty input, unbalanced parentheses, unknown
/// operators or wrappers nested in ways the grammar does not allow
pub fn classify<'t>(source: &str, tokens: &'t [Token<'t>]) -> LocationResult<LocationShape<'t>> {
    if tokens.is_empty() {
        return Err(LocationError::classify(source, "empty descriptor"));
    }
    check_balance(source, tokens)?;

    if let Some(inner) = unwrap_call(source, tokens, "complement")? {
        if let Some((operator, members)) = compound_body(source, inner)? {
            return Ok(LocationShape::ComplementedCompound { operator, members });
        }
        reject_wrapper(source, inner)?;
        return Ok(LocationShape::ComplementedSimple(inner));
    }

    if let Some((operator, members)) = compound_body(source, tokens)? {
        return Ok(LocationShape::Compound { operator, members });
    }

    reject_wrapper(source, tokens)?;
    Ok(LocationShape::Simple(tokens))
}

/// If `tokens` is exactly `keyword( ... )`, return the tokens between the
/// parentheses
///
/// # Errors
///
/// Returns a `Classify` error when the keyword is present but not followed by
/// a parenthesised body spanning the rest of the tokens
pub fn unwrap_call<'t>(
    source: &str,
    tokens: &'t [Token<'t>],
    keyword: &str,
) -> LocationResult<Option<&'t [Token<'t>]>> {
    let Some(head) = tokens.first().filter(|t| t.is_word(keyword)) else {
        return Ok(None);
    };
    let text = fragment(source, tokens, source);

    if !tokens.get(1).is_some_and(|t| t.is(TokenKind::LParen)) {
        return Err(LocationError::classify(
            text,
            format!("expected `(` after `{}`", head.text),
        ));
    }

    let close = matching_close(tokens, 1)
        .ok_or_else(|| LocationError::classify(text, format!("unclosed `{}(`", head.text)))?;

    if close != tokens.len() - 1 {
        return Err(LocationError::classify(
            text,
            format!("unexpected text after `{}(...)`", head.text),
        ));
    }

    Ok(Some(&tokens[2..close]))
}

/// Index of the `)` matching the `(` at `open`
#[must_use]
pub fn matching_close(tokens: &[Token<'_>], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate().skip(open) {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

fn compound_body<'t>(
    source: &str,
    tokens: &'t [Token<'t>],
) -> LocationResult<Option<(CompoundOperator, &'t [Token<'t>])>> {
    let Some(operator) = tokens
        .first()
        .filter(|t| t.is(TokenKind::Word))
        .and_then(|t| CompoundOperator::from_keyword(t.text))
    else {
        return Ok(None);
    };

    let members = unwrap_call(source, tokens, operator.keyword())?;
    Ok(members.map(|members| (operator, members)))
}

fn check_balance(source: &str, tokens: &[Token<'_>]) -> LocationResult<()> {
    let mut depth = 0usize;
    for token in tokens {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    LocationError::classify(
                        &source[..token.end()],
                        "unbalanced parentheses: unexpected `)`",
                    )
                })?;
            }
            _ => {}
        }
    }

    if depth > 0 {
        return Err(LocationError::classify(
            source,
            "unbalanced parentheses: missing `)`",
        ));
    }
    Ok(())
}

/// Fail if a shape that must be simple still contains a wrapper
fn reject_wrapper(source: &str, tokens: &[Token<'_>]) -> LocationResult<()> {
    if !tokens
        .iter()
        .any(|t| t.is(TokenKind::LParen) || t.is(TokenKind::RParen))
    {
        return Ok(());
    }

    let text = fragment(source, tokens, source);
    let reason = match tokens.first() {
        Some(head) if head.is_word("complement") => "nested `complement` is not allowed".to_string(),
        Some(head) if head.is(TokenKind::Word) => format!("unknown operator `{}`", head.text),
        _ => "unexpected parenthesis".to_string(),
    };
    Err(LocationError::classify(text, reason))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseStage;
    use crate::parser::tokenizer::tokenize;

    fn shape_name(source: &str) -> LocationResult<&'static str> {
        let tokens = tokenize(source)?;
        let shape = classify(source, &tokens)?;
        Ok(match shape {
            LocationShape::Simple(_) => "simple",
            LocationShape::ComplementedSimple(_) => "complemented simple",
            LocationShape::Compound { .. } => "compound",
            LocationShape::ComplementedCompound { .. } => "complemented compound",
        })
    }

    #[test]
    fn classify_four_shapes() {
        assert_eq!(shape_name("1..10").unwrap(), "simple");
        assert_eq!(shape_name("complement(1..10)").unwrap(), "complemented simple");
        assert_eq!(shape_name("join(1..10,20..30)").unwrap(), "compound");
        assert_eq!(
            shape_name("complement(order(1..10,20..30))").unwrap(),
            "complemented compound"
        );
    }

    #[test]
    fn classify_extracts_inner_tokens_and_strand() {
        let source = "complement(bond(5,9))";
        let tokens = tokenize(source).unwrap();
        let shape = classify(source, &tokens).unwrap();
        assert_eq!(shape.strand(), Strand::Reverse);
        assert!(shape.is_compound());
        let LocationShape::ComplementedCompound { operator, members } = shape else {
            panic!("expected complemented compound, got {shape:?}");
        };
        assert_eq!(operator, CompoundOperator::Bond);
        assert_eq!(fragment(source, members, ""), "5,9");
    }

    #[test]
    fn classify_rejects_unbalanced_parentheses() {
        for source in ["join(1..2", "join(1..2))", "complement(1..2", ")1..2("] {
            let err = shape_name(source).unwrap_err();
            assert_eq!(err.stage(), ParseStage::Classify, "{source}");
        }
    }

    #[test]
    fn classify_rejects_unknown_operator() {
        let err = shape_name("merge(1..2,3..4)").unwrap_err();
        assert!(err.reason().contains("merge"));
    }

    #[test]
    fn classify_rejects_nested_complement() {
        let err = shape_name("complement(complement(1..2))").unwrap_err();
        assert!(err.reason().contains("nested"));
    }

    #[test]
    fn classify_rejects_trailing_text() {
        assert!(shape_name("join(1..2)3..4").is_err());
        assert!(shape_name("complement(1..2),5").is_err());
    }

    #[test]
    fn classify_rejects_missing_parenthesis_after_keyword() {
        assert!(shape_name("complement 1..2").is_err());
    }

    #[test]
    fn matching_close_respects_nesting() {
        let tokens = tokenize("join(complement(1..2),3)").unwrap();
        assert_eq!(matching_close(&tokens, 1), Some(tokens.len() - 1));
        assert_eq!(matching_close(&tokens, 3), Some(7));
    }
}
