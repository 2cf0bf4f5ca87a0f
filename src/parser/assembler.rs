//! Builds the final `FeatureLocation` from parsed spans

use crate::error::{LocationError, LocationResult};
use crate::models::{CompoundOperator, FeatureLocation, Span, SpanKind, Strand};

use super::ParserConfig;

/// Combines the classifier's decision with the parsed spans
#[derive(Debug, Clone, Copy)]
pub struct Assembler<'c> {
    config: &'c ParserConfig,
}

impl<'c> Assembler<'c> {
    #[must_use]
    pub const fn new(config: &'c ParserConfig) -> Self {
        Self { config }
    }

    /// Wrap a single span, giving it the strand the classifier detected
    ///
    /// # Errors
    ///
    /// Returns an `Assemble` error if the span fails the configured checks
    pub fn simple(&self, span: Span, strand: Strand) -> LocationResult<FeatureLocation> {
        let span = span.with_strand(strand);
        self.validate(&span)?;
        Ok(FeatureLocation::simple(span))
    }

    /// Combine the members of a compound location
    ///
    /// An outer `complement` reverses member order and puts every member on
    /// the reverse strand, whatever the member's own wrapping was.
    ///
    /// # Errors
    ///
    /// Returns an `Assemble` error for an empty member list or a member that
    /// fails the configured checks
    pub fn compound(
        &self,
        operator: CompoundOperator,
        spans: Vec<Span>,
        complemented: bool,
    ) -> LocationResult<FeatureLocation> {
        if spans.is_empty() {
            return Err(LocationError::assemble(
                format!("{}()", operator.keyword()),
                "compound location without members",
            ));
        }
        for span in &spans {
            self.validate(span)?;
        }

        let spans = if complemented {
            spans
                .into_iter()
                .rev()
                .map(|span| span.with_strand(Strand::Reverse))
                .collect()
        } else {
            spans
        };

        Ok(FeatureLocation::compound(operator, spans, complemented))
    }

    fn validate(&self, span: &Span) -> LocationResult<()> {
        let (start, end) = (span.start(), span.end());

        match span.kind {
            SpanKind::Range if !self.config.allow_descending_ranges && start > end => {
                Err(LocationError::assemble(
                    span.to_string(),
                    format!("range start {start} is after end {end}"),
                ))
            }
            SpanKind::BetweenBases if !span.is_remote => {
                let Some(length) = self.config.molecule_length else {
                    return Ok(());
                };
                let adjacent = start.checked_add(1) == Some(end) && end <= length;
                let wraps = start == length && end == 1;
                if adjacent || wraps {
                    Ok(())
                } else {
                    Err(LocationError::assemble(
                        span.to_string(),
                        format!("site must lie between adjoining bases of a {length} bp molecule"),
                    ))
                }
            }
            _ => Ok(()),
        }
    }
}
