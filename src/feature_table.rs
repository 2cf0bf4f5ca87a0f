//! Feature table helpers: splitting an entry into key, location and qualifiers
//!
//! Qualifier text is only cut into individual `/key=value` strings; their
//! meaning is left to the consumer.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{FeatureError, FeatureResult};
use crate::models::FeatureLocation;
use crate::parser::LocationParser;

/// One feature table entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, uniffi::Record)]
pub struct FeatureEntry {
    /// Feature key such as `CDS` or `mRNA`
    pub key: String,
    pub location: FeatureLocation,
    /// Raw qualifier strings, each starting with `/`
    pub qualifiers: Vec<String>,
}

/// Split a raw qualifier block into individual qualifiers
///
/// A qualifier starts on a line whose first non-blank character is `/`,
/// unless a quoted value is still open. Continuation lines are joined with a
/// single space.
#[must_use]
pub fn split_qualifiers(block: &str) -> Vec<String> {
    let mut qualifiers = Vec::new();
    let mut current: Option<String> = None;
    let mut in_quotes = false;

    for line in block.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if !in_quotes && trimmed.starts_with('/') {
            qualifiers.extend(current.take());
            current = Some(trimmed.to_string());
        } else if let Some(qualifier) = current.as_mut() {
            qualifier.push(' ');
            qualifier.push_str(trimmed);
        } else {
            trace!(line = trimmed, "skipping text before first qualifier");
            continue;
        }

        // `""` is an escaped quote and leaves the parity unchanged
        if trimmed.matches('"').count() % 2 == 1 {
            in_quotes = !in_quotes;
        }
    }

    qualifiers.extend(current);
    qualifiers
}

/// Parse the lines of one feature table entry
///
/// The first line holds the key followed by the start of the location. Lines
/// up to the first qualifier continue the location and are concatenated
/// without separators.
///
/// # Errors
///
/// Returns an error if the key or location is missing, or the location is
/// malformed
pub fn parse_feature_entry(
    parser: &LocationParser,
    lines: &[&str],
    accession: &str,
) -> FeatureResult<FeatureEntry> {
    let mut lines = lines.iter().map(|line| line.trim()).filter(|line| !line.is_empty());

    let first = lines.next().ok_or(FeatureError::MissingKey)?;
    if first.starts_with('/') {
        return Err(FeatureError::MissingKey);
    }
    let (key, rest) = first
        .split_once(char::is_whitespace)
        .map_or((first, ""), |(key, rest)| (key, rest.trim()));

    let mut descriptor = rest.to_string();
    let mut qualifier_lines = Vec::new();
    for line in lines {
        if qualifier_lines.is_empty() && !line.starts_with('/') {
            descriptor.push_str(line);
        } else {
            qualifier_lines.push(line);
        }
    }

    if descriptor.is_empty() {
        return Err(FeatureError::missing_location(key));
    }

    Ok(FeatureEntry {
        key: key.to_string(),
        location: parser.parse(&descriptor, accession)?,
        qualifiers: split_qualifiers(&qualifier_lines.join("\n")),
    })
}
