//! Parser for a single unit location: `N`, `N..M`, `<N..>M`, `N^M`, each
//! optionally prefixed with a remote accession `ACC[.v]:`

use crate::error::{LocationError, LocationResult};
use crate::models::{Fuzzy, Span};

use super::tokenizer::{Token, TokenKind, fragment};

struct Cursor<'t> {
    tokens: &'t [Token<'t>],
    pos: usize,
}

impl<'t> Cursor<'t> {
    const fn new(tokens: &'t [Token<'t>]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'t Token<'t>> {
        self.tokens.get(self.pos)
    }

    fn eat(&mut self, kind: TokenKind) -> Option<&'t Token<'t>> {
        let token = self.peek().filter(|t| t.is(kind))?;
        self.pos += 1;
        Some(token)
    }

    fn eat_marker(&mut self) -> Option<TokenKind> {
        let token = self.peek().filter(|t| t.kind.is_marker())?;
        self.pos += 1;
        Some(token.kind)
    }
}

/// Parse one non-compound, non-complemented location
///
/// Spans without an accession prefix are placed on `record_accession`. The
/// result is always on the forward strand; complementation is applied by the
/// caller.
///
/// # Errors
///
/// Returns a `SimpleSpan` error carrying the offending text when the tokens do
/// not form one of the accepted unit shapes
pub fn parse_simple_span(
    source: &str,
    tokens: &[Token<'_>],
    record_accession: &str,
) -> LocationResult<Span> {
    let text = fragment(source, tokens, source);
    let fail = |reason: String| LocationError::simple_span(text, reason);

    if tokens.is_empty() {
        return Err(fail("empty location".to_string()));
    }
    if tokens.iter().skip(1).any(|t| t.space_before) {
        return Err(fail("whitespace inside a simple location".to_string()));
    }

    let mut cursor = Cursor::new(tokens);
    let accession = cursor
        .eat(TokenKind::Accession)
        .map(|t| t.text.trim_end_matches(':'));

    let start_marker = cursor.eat_marker();
    let start = number(&mut cursor).map_err(fail)?;

    let span = if cursor.eat(TokenKind::Range).is_some() {
        let end_marker = cursor.eat_marker();
        let end = number(&mut cursor).map_err(fail)?;

        if start_marker == Some(TokenKind::Greater) {
            return Err(fail("`>` cannot mark a range start".to_string()));
        }
        if end_marker == Some(TokenKind::Less) {
            return Err(fail("`<` cannot mark a range end".to_string()));
        }

        Span::range(start, end).with_fuzzy(Fuzzy::new(
            start_marker.is_some(),
            end_marker.is_some(),
        ))
    } else if cursor.eat(TokenKind::Caret).is_some() {
        if start_marker.is_some() || cursor.eat_marker().is_some() {
            return Err(fail("between-bases sites cannot be fuzzy".to_string()));
        }
        let end = number(&mut cursor).map_err(fail)?;
        Span::between_bases(start, end)
    } else {
        Span::point(start).with_fuzzy(Fuzzy::new(
            start_marker == Some(TokenKind::Less),
            start_marker == Some(TokenKind::Greater),
        ))
    };

    if let Some(extra) = cursor.peek() {
        return Err(fail(format!("unexpected `{}` after location", extra.text)));
    }

    Ok(match accession {
        Some(accession) => span.with_remote(accession),
        None => span.with_local(record_accession),
    })
}

fn number(cursor: &mut Cursor<'_>) -> Result<u64, String> {
    let Some(token) = cursor.peek() else {
        return Err("expected a base number".to_string());
    };
    if !token.is(TokenKind::Number) {
        return Err(format!("expected a base number, found `{}`", token.text));
    }
    cursor.pos += 1;
    token
        .text
        .parse()
        .map_err(|_| format!("base number `{}` is out of range", token.text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseStage;
    use crate::models::{SpanKind, Strand};
    use crate::parser::tokenizer::tokenize;

    fn parse(source: &str) -> LocationResult<Span> {
        let tokens = tokenize(source)?;
        parse_simple_span(source, &tokens, "")
    }

    #[test]
    fn parse_plain_range() {
        let span = parse("34..456").unwrap();
        assert_eq!(span.kind, SpanKind::Range);
        assert_eq!((span.start(), span.end()), (34, 456));
        assert_eq!(span.strand, Strand::Forward);
        assert!(span.fuzzy.is_exact());
        assert!(!span.is_remote);
    }

    #[test]
    fn parse_fuzzy_ranges() {
        assert_eq!(parse("<5..10").unwrap().fuzzy, Fuzzy::new(true, false));
        assert_eq!(parse("5..>10").unwrap().fuzzy, Fuzzy::new(false, true));
        assert_eq!(parse("<5..>10").unwrap().fuzzy, Fuzzy::new(true, true));
    }

    #[test]
    fn parse_point() {
        let span = parse("7").unwrap();
        assert!(span.is_point());
        assert_eq!((span.start(), span.end()), (7, 7));
    }

    #[test]
    fn parse_fuzzy_points() {
        assert_eq!(parse("<1").unwrap().fuzzy, Fuzzy::new(true, false));
        assert_eq!(parse(">90").unwrap().fuzzy, Fuzzy::new(false, true));
    }

    #[test]
    fn parse_between_bases_keeps_both_numbers() {
        let span = parse("55^56").unwrap();
        assert!(span.is_between_bases());
        assert_eq!((span.start(), span.end()), (55, 56));

        let wrap = parse("1000^1").unwrap();
        assert_eq!((wrap.start(), wrap.end()), (1000, 1));
    }

    #[test]
    fn parse_remote_accession() {
        let span = parse("J12345.1:1..15").unwrap();
        assert_eq!(span.accession, "J12345.1");
        assert!(span.is_remote);
        assert_eq!((span.start(), span.end()), (1, 15));
    }

    #[test]
    fn local_span_inherits_record_accession() {
        let source = "3..9";
        let tokens = tokenize(source).unwrap();
        let span = parse_simple_span(source, &tokens, "NC_000913.3").unwrap();
        assert_eq!(span.accession, "NC_000913.3");
        assert!(!span.is_remote);
    }

    #[test]
    fn reject_markers_on_wrong_side() {
        let err = parse(">5..10").unwrap_err();
        assert_eq!(err.stage(), ParseStage::SimpleSpan);
        assert_eq!(err.fragment(), ">5..10");
        assert!(parse("5..<10").is_err());
    }

    #[test]
    fn reject_fuzzy_between_bases() {
        assert!(parse("<55^56").is_err());
        assert!(parse("55^>56").is_err());
    }

    #[test]
    fn reject_incomplete_or_trailing_tokens() {
        assert!(parse("5..").is_err());
        assert!(parse("..5").is_err());
        assert!(parse("5..10..20").is_err());
        assert!(parse("join").is_err());
    }

    #[test]
    fn reject_inner_whitespace() {
        let err = parse("5 ..10").unwrap_err();
        assert!(err.reason().contains("whitespace"));
    }

    #[test]
    fn reject_overflowing_number() {
        let err = parse("1..99999999999999999999999").unwrap_err();
        assert!(err.reason().contains("out of range"));
    }
}
