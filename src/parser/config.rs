//! Parser configuration

use serde::{Deserialize, Serialize};

/// Checks applied when assembling a location
///
/// The defaults reject descending ranges and leave between-bases arithmetic
/// unchecked, since the molecule length is not part of the descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
pub struct ParserConfig {
    /// Accept `N..M` with `N > M`, keeping the numbers as written
    pub allow_descending_ranges: bool,
    /// Length of the record's molecule; enables `n^n+1` / `n^1` validation
    pub molecule_length: Option<u64>,
}

impl ParserConfig {
    #[must_use]
    pub const fn with_descending_ranges(mut self, allow: bool) -> Self {
        self.allow_descending_ranges = allow;
        self
    }

    #[must_use]
    pub const fn with_molecule_length(mut self, length: u64) -> Self {
        self.molecule_length = Some(length);
        self
    }
}
