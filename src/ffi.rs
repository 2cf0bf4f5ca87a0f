//! `UniFFI` bindings for the feature location parser
//!
//! This module translates parsed locations into records a host runtime can
//! consume (Swift, Kotlin, Python, etc.). The core types stay plain data; the
//! flattening and error mapping live here.
#![allow(clippy::needless_pass_by_value)]

use std::fmt;

use crate::error::{FeatureError, LocationError, ParseStage, SerializationError};
use crate::feature_table::{self, FeatureEntry};
use crate::models::{FeatureLocation, Span, SpanKind};
use crate::parser::{LocationParser, ParserConfig};

/// A flattened span for hosts without nested record support
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct FfiSpan {
    pub start: u64,
    pub end: u64,
    pub fuzzy_start: bool,
    pub fuzzy_end: bool,
    /// `1` or `-1`
    pub strand: i8,
    pub accession: String,
    pub is_remote: bool,
    pub kind: SpanKind,
}

impl FfiSpan {
    /// Create FFI span from `Span`
    fn from_span(span: &Span) -> Self {
        Self {
            start: span.bounds.start,
            end: span.bounds.end,
            fuzzy_start: span.fuzzy.start,
            fuzzy_end: span.fuzzy.end,
            strand: span.strand.sign(),
            accession: span.accession.clone(),
            is_remote: span.is_remote,
            kind: span.kind,
        }
    }
}

/// Error type for `GenbankParser` operations
#[derive(Debug, uniffi::Error)]
pub enum GenbankError {
    MalformedLocation {
        stage: ParseStage,
        fragment: String,
        reason: String,
    },
    MalformedFeature {
        reason: String,
    },
    Serialization {
        reason: String,
    },
}

impl fmt::Display for GenbankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLocation {
                stage,
                fragment,
                reason,
            } => write!(f, "Malformed location at {stage} stage: {reason} in `{fragment}`"),
            Self::MalformedFeature { reason } => write!(f, "Malformed feature: {reason}"),
            Self::Serialization { reason } => write!(f, "Serialization failed: {reason}"),
        }
    }
}

impl std::error::Error for GenbankError {}

impl From<LocationError> for GenbankError {
    fn from(err: LocationError) -> Self {
        match err {
            LocationError::MalformedLocation {
                stage,
                fragment,
                reason,
            } => Self::MalformedLocation {
                stage,
                fragment,
                reason,
            },
        }
    }
}

impl From<FeatureError> for GenbankError {
    fn from(err: FeatureError) -> Self {
        match err {
            FeatureError::Location(err) => err.into(),
            other => Self::MalformedFeature {
                reason: other.to_string(),
            },
        }
    }
}

impl From<SerializationError> for GenbankError {
    fn from(err: SerializationError) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

/// Host-facing parser handle
#[derive(Debug, uniffi::Object)]
pub struct GenbankParser {
    parser: LocationParser,
}

#[uniffi::export]
impl GenbankParser {
    /// Create a parser with default configuration
    #[uniffi::constructor]
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser: LocationParser::new(),
        }
    }

    /// Create a parser with custom configuration
    #[uniffi::constructor]
    #[must_use]
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            parser: LocationParser::with_config(config),
        }
    }

    /// Parse a location descriptor
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor is malformed
    pub fn parse_location(
        &self,
        descriptor: &str,
        accession: &str,
    ) -> Result<FeatureLocation, GenbankError> {
        Ok(self.parser.parse(descriptor, accession)?)
    }

    /// Parse a location descriptor into flat span records
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor is malformed
    pub fn parse_spans(
        &self,
        descriptor: &str,
        accession: &str,
    ) -> Result<Vec<FfiSpan>, GenbankError> {
        let location = self.parser.parse(descriptor, accession)?;
        Ok(location.spans.iter().map(FfiSpan::from_span).collect())
    }

    /// Parse the lines of one feature table entry
    ///
    /// # Errors
    ///
    /// Returns an error if the key or location is missing or malformed
    pub fn parse_feature(
        &self,
        lines: Vec<String>,
        accession: &str,
    ) -> Result<FeatureEntry, GenbankError> {
        let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
        Ok(feature_table::parse_feature_entry(
            &self.parser,
            &lines,
            accession,
        )?)
    }

    /// Split a raw qualifier block into individual qualifier strings
    pub fn split_qualifiers(&self, block: &str) -> Vec<String> {
        feature_table::split_qualifiers(block)
    }

    /// Render a location back to GenBank text
    pub fn render_location(&self, location: FeatureLocation) -> String {
        location.to_string()
    }

    /// Encode a location as CBOR bytes
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails
    pub fn encode_location(&self, location: FeatureLocation) -> Result<Vec<u8>, GenbankError> {
        Ok(location.to_cbor()?)
    }

    /// Decode a location from CBOR bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not an encoded location
    pub fn decode_location(&self, data: Vec<u8>) -> Result<FeatureLocation, GenbankError> {
        Ok(FeatureLocation::from_cbor(&data)?)
    }
}

impl Default for GenbankParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_spans_flattens_fields() {
        let parser = GenbankParser::new();
        let spans = parser
            .parse_spans("complement(join(<1..10,J12345.1:20^21))", "REC1")
            .unwrap();

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].kind, SpanKind::BetweenBases);
        assert_eq!(spans[0].accession, "J12345.1");
        assert!(spans[0].is_remote);
        assert_eq!(spans[0].strand, -1);
        assert_eq!((spans[1].start, spans[1].end), (1, 10));
        assert!(spans[1].fuzzy_start);
        assert!(!spans[1].fuzzy_end);
        assert_eq!(spans[1].accession, "REC1");
    }

    #[test]
    fn location_error_keeps_stage() {
        let err = GenbankParser::new().parse_location("join()", "").unwrap_err();
        assert!(matches!(
            err,
            GenbankError::MalformedLocation {
                stage: ParseStage::Decompose,
                ..
            }
        ));
        assert!(err.to_string().contains("join()"));
    }

    #[test]
    fn feature_errors_map_to_flat_variants() {
        let parser = GenbankParser::new();
        let missing = parser.parse_feature(vec![], "").unwrap_err();
        assert!(matches!(missing, GenbankError::MalformedFeature { .. }));

        let bad = parser
            .parse_feature(vec!["gene 5..<9".to_string()], "")
            .unwrap_err();
        assert!(matches!(bad, GenbankError::MalformedLocation { .. }));
    }

    #[test]
    fn encode_decode_and_render() {
        let parser = GenbankParser::new();
        let location = parser.parse_location("join(1..10,complement(20..30))", "").unwrap();
        let bytes = parser.encode_location(location.clone()).unwrap();
        let decoded = parser.decode_location(bytes).unwrap();
        assert_eq!(decoded, location);
        assert_eq!(
            parser.render_location(decoded),
            "join(1..10,complement(20..30))"
        );
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = GenbankParser::new().decode_location(vec![0xff]).unwrap_err();
        assert!(matches!(err, GenbankError::Serialization { .. }));
    }

    #[test]
    fn configured_parser_rejects_bad_site() {
        let parser = GenbankParser::with_config(ParserConfig::default().with_molecule_length(10));
        assert!(parser.parse_location("4^9", "").is_err());
        assert!(parser.parse_location("10^1", "").is_ok());
    }
}
