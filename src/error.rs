//! Error types for the gbloc library
//!
//! This module provides centralized error handling using `thiserror` across all components

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pipeline stage at which a descriptor was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
pub enum ParseStage {
    /// Lexing the raw text into tokens
    Tokenize,
    /// Deciding which of the four descriptor shapes the text has
    Classify,
    /// Splitting a compound member list
    Decompose,
    /// Parsing one unit location
    SimpleSpan,
    /// Building and validating the final location
    Assemble,
}

impl ParseStage {
    /// Get a human-readable name for this stage
    #[must_use]
    pub const fn name(&self) -> &str {
        match self {
            Self::Tokenize => "tokenize",
            Self::Classify => "classify",
            Self::Decompose => "decompose",
            Self::SimpleSpan => "simple span",
            Self::Assemble => "assemble",
        }
    }
}

impl fmt::Display for ParseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Location parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The text does not match any accepted grammar production
    #[error("Malformed location at {stage} stage: {reason} in `{fragment}`")]
    MalformedLocation {
        stage: ParseStage,
        fragment: String,
        reason: String,
    },
}

impl LocationError {
    /// Create a malformed location error
    pub fn malformed(
        stage: ParseStage,
        fragment: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedLocation {
            stage,
            fragment: fragment.into(),
            reason: reason.into(),
        }
    }

    /// Create a tokenizer error
    pub fn tokenize(fragment: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::malformed(ParseStage::Tokenize, fragment, reason)
    }

    /// Create a classifier error
    pub fn classify(fragment: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::malformed(ParseStage::Classify, fragment, reason)
    }

    /// Create a member splitting error
    pub fn decompose(fragment: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::malformed(ParseStage::Decompose, fragment, reason)
    }

    /// Create a simple span error
    pub fn simple_span(fragment: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::malformed(ParseStage::SimpleSpan, fragment, reason)
    }

    /// Create an assembly error
    pub fn assemble(fragment: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::malformed(ParseStage::Assemble, fragment, reason)
    }

    /// Stage at which parsing failed
    #[must_use]
    pub const fn stage(&self) -> ParseStage {
        match self {
            Self::MalformedLocation { stage, .. } => *stage,
        }
    }

    /// Offending substring
    #[must_use]
    pub fn fragment(&self) -> &str {
        match self {
            Self::MalformedLocation { fragment, .. } => fragment,
        }
    }

    /// Why the fragment was rejected
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            Self::MalformedLocation { reason, .. } => reason,
        }
    }
}

/// Result type for location parsing
pub type LocationResult<T> = Result<T, LocationError>;

/// Feature table entry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    /// Entry has no feature key
    #[error("Feature entry has no key")]
    MissingKey,

    /// Entry has a key but no location descriptor
    #[error("Feature `{0}` has no location")]
    MissingLocation(String),

    /// Location descriptor failed to parse
    #[error(transparent)]
    Location(#[from] LocationError),
}

impl FeatureError {
    /// Create a missing location error
    pub fn missing_location(key: impl Into<String>) -> Self {
        Self::MissingLocation(key.into())
    }
}

/// Result type for feature table operations
pub type FeatureResult<T> = Result<T, FeatureError>;

/// Serialization-related errors
#[derive(Debug, Error)]
pub enum SerializationError {
    /// Serialization failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),
}

impl SerializationError {
    /// Create a serialization failed error
    pub fn serialization_failed(reason: impl Into<String>) -> Self {
        Self::SerializationFailed(reason.into())
    }

    /// Create a deserialization failed error
    pub fn deserialization_failed(reason: impl Into<String>) -> Self {
        Self::DeserializationFailed(reason.into())
    }
}

/// Result type for serialization operations
pub type SerializationResult<T> = Result<T, SerializationError>;
