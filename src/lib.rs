#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

uniffi::setup_scaffolding!();

pub mod error;
pub mod feature_table;
pub mod ffi;
pub mod models;
pub mod parser;

// Re-export common types for convenience
pub use error::{
    FeatureError, FeatureResult, LocationError, LocationResult, ParseStage, SerializationError,
    SerializationResult,
};
pub use feature_table::{FeatureEntry, parse_feature_entry, split_qualifiers};
pub use models::{Bounds, CompoundOperator, FeatureLocation, Fuzzy, Span, SpanKind, Strand};
pub use parser::{LocationParser, ParserConfig, parse_location};
