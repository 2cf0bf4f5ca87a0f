//! GenBank/GenPept feature location parser
//!
//! A descriptor flows one way through the pipeline:
//! - tokenize the text against a shared, read-only rule table
//! - classify it as simple, complemented simple, compound or complemented compound
//! - split compound member lists on top-level commas
//! - parse each unit location into a `Span`
//! - assemble the spans, applying outer complementation, into a `FeatureLocation`
//!
//! Any stage may reject the descriptor; the error names the stage and the
//! offending text. There is no partial result.

pub mod assembler;
pub mod classifier;
pub mod compound;
pub mod config;
pub mod simple;
pub mod tokenizer;

pub use assembler::Assembler;
pub use classifier::{LocationShape, classify};
pub use compound::{decompose, split_members};
pub use config::ParserConfig;
pub use simple::parse_simple_span;
pub use tokenizer::{Token, TokenKind, tokenize};

use tracing::{debug, trace};

use crate::error::LocationResult;
use crate::models::FeatureLocation;

/// Feature location parser with its validation settings
///
/// Holds no mutable state, so one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct LocationParser {
    config: ParserConfig,
}

impl LocationParser {
    /// Create a parser with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration
    #[must_use]
    pub const fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse one descriptor
    ///
    /// `accession` is the record the feature belongs to; spans without an
    /// explicit remote prefix are placed on it.
    ///
    /// # Errors
    ///
    /// Returns a `MalformedLocation` error naming the failing stage and text
    pub fn parse(&self, descriptor: &str, accession: &str) -> LocationResult<FeatureLocation> {
        self.parse_trimmed(descriptor.trim(), accession)
            .inspect_err(|err| debug!(descriptor, %err, "rejected feature location"))
    }

    fn parse_trimmed(&self, source: &str, accession: &str) -> LocationResult<FeatureLocation> {
        let tokens = tokenize(source)?;
        let shape = classify(source, &tokens)?;
        trace!(descriptor = source, shape = shape.name(), "classified location");

        let assembler = Assembler::new(&self.config);
        match shape {
            LocationShape::Simple(span) | LocationShape::ComplementedSimple(span) => {
                let span = parse_simple_span(source, span, accession)?;
                assembler.simple(span, shape.strand())
            }
            LocationShape::Compound { operator, members } => {
                assembler.compound(operator, decompose(source, members, accession)?, false)
            }
            LocationShape::ComplementedCompound { operator, members } => {
                assembler.compound(operator, decompose(source, members, accession)?, true)
            }
        }
    }
}

/// Parse one descriptor with the default configuration
///
/// # Errors
///
/// Returns a `MalformedLocation` error naming the failing stage and text
pub fn parse_location(descriptor: &str, accession: &str) -> LocationResult<FeatureLocation> {
    LocationParser::new().parse(descriptor, accession)
}
