use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LocationError, SerializationError, SerializationResult};

/// Start and end coordinates of a span, 1-based and inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, uniffi::Record)]
pub struct Bounds {
    pub start: u64,
    pub end: u64,
}

impl Bounds {
    #[must_use]
    pub const fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        self.start <= self.end
    }
}

/// Per-bound "beyond" markers (`<` on the start, `>` on the end)
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, uniffi::Record,
)]
pub struct Fuzzy {
    pub start: bool,
    pub end: bool,
}

impl Fuzzy {
    pub const EXACT: Self = Self {
        start: false,
        end: false,
    };

    #[must_use]
    pub const fn new(start: bool, end: bool) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn is_exact(&self) -> bool {
        !self.start && !self.end
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, uniffi::Enum,
)]
pub enum Strand {
    #[default]
    Forward,
    Reverse,
}

impl Strand {
    /// `+1` for forward, `-1` for reverse
    #[must_use]
    pub const fn sign(&self) -> i8 {
        match self {
            Self::Forward => 1,
            Self::Reverse => -1,
        }
    }

    #[must_use]
    pub const fn from_sign(sign: i8) -> Option<Self> {
        match sign {
            1 => Some(Self::Forward),
            -1 => Some(Self::Reverse),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_reverse(&self) -> bool {
        matches!(self, Self::Reverse)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, uniffi::Enum)]
pub enum SpanKind {
    /// A single base, `N`
    Point,
    /// A run of bases, `N..M`
    Range,
    /// A site between two adjoining bases, `N^M`
    BetweenBases,
}

impl SpanKind {
    #[must_use]
    pub const fn name(&self) -> &str {
        match self {
            Self::Point => "point",
            Self::Range => "range",
            Self::BetweenBases => "between-bases",
        }
    }
}

/// One contiguous or point segment of a feature location
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, uniffi::Record)]
pub struct Span {
    pub bounds: Bounds,
    pub fuzzy: Fuzzy,
    pub strand: Strand,
    /// Coordinate system of the bounds; the record's own accession unless remote
    pub accession: String,
    /// Set only when the descriptor named an explicit `ACC[.v]:` prefix
    pub is_remote: bool,
    pub kind: SpanKind,
}

impl Span {
    #[must_use]
    pub const fn new(kind: SpanKind, bounds: Bounds) -> Self {
        Self {
            bounds,
            fuzzy: Fuzzy::EXACT,
            strand: Strand::Forward,
            accession: String::new(),
            is_remote: false,
            kind,
        }
    }

    #[must_use]
    pub const fn point(position: u64) -> Self {
        Self::new(SpanKind::Point, Bounds::new(position, position))
    }

    #[must_use]
    pub const fn range(start: u64, end: u64) -> Self {
        Self::new(SpanKind::Range, Bounds::new(start, end))
    }

    #[must_use]
    pub const fn between_bases(start: u64, end: u64) -> Self {
        Self::new(SpanKind::BetweenBases, Bounds::new(start, end))
    }

    #[must_use]
    pub fn with_fuzzy(mut self, fuzzy: Fuzzy) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    #[must_use]
    pub fn with_strand(mut self, strand: Strand) -> Self {
        self.strand = strand;
        self
    }

    /// Place the span on a remote record
    #[must_use]
    pub fn with_remote(mut self, accession: impl Into<String>) -> Self {
        self.accession = accession.into();
        self.is_remote = true;
        self
    }

    /// Place the span on the caller's own record
    #[must_use]
    pub fn with_local(mut self, accession: impl Into<String>) -> Self {
        self.accession = accession.into();
        self.is_remote = false;
        self
    }

    #[must_use]
    pub const fn start(&self) -> u64 {
        self.bounds.start
    }

    #[must_use]
    pub const fn end(&self) -> u64 {
        self.bounds.end
    }
}

macro_rules! impl_kind_helpers {
    ($($variant:ident),*) => {
        $(
            impl Span {
                paste::paste! {
                    #[must_use]
                    pub const fn [<is_ $variant:snake>](&self) -> bool {
                        matches!(self.kind, SpanKind::$variant)
                    }
                }
            }
        )*
    };
}

impl_kind_helpers!(Point, Range, BetweenBases);

/// Renders the unit location only; strand is written by the enclosing location
impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_remote {
            write!(f, "{}:", self.accession)?;
        }

        let Bounds { start, end } = self.bounds;
        match self.kind {
            SpanKind::Point => {
                if self.fuzzy.start {
                    f.write_str("<")?;
                } else if self.fuzzy.end {
                    f.write_str(">")?;
                }
                write!(f, "{start}")
            }
            SpanKind::Range => {
                let lt = if self.fuzzy.start { "<" } else { "" };
                let gt = if self.fuzzy.end { ">" } else { "" };
                write!(f, "{lt}{start}..{gt}{end}")
            }
            SpanKind::BetweenBases => write!(f, "{start}^{end}"),
        }
    }
}

/// Keyword of a compound location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, uniffi::Enum)]
pub enum CompoundOperator {
    /// Segments concatenated in the given order
    Join,
    /// Segments grouped with no implied order
    Order,
    /// Bond linkage between residues (GenPept only)
    Bond,
}

impl CompoundOperator {
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Order => "order",
            Self::Bond => "bond",
        }
    }

    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "join" => Some(Self::Join),
            "order" => Some(Self::Order),
            "bond" => Some(Self::Bond),
            _ => None,
        }
    }
}

/// The full parsed location of one feature
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, uniffi::Record)]
pub struct FeatureLocation {
    /// Segments in the order they are concatenated to rebuild the feature
    pub spans: Vec<Span>,
    /// `join`/`order`/`bond` keyword, `None` for simple locations
    pub operator: Option<CompoundOperator>,
    /// Whether the outermost wrapper was `complement(...)`
    pub complemented: bool,
}

impl FeatureLocation {
    #[must_use]
    pub fn simple(span: Span) -> Self {
        let complemented = span.strand.is_reverse();
        Self {
            spans: vec![span],
            operator: None,
            complemented,
        }
    }

    #[must_use]
    pub fn compound(
        operator: CompoundOperator,
        spans: Vec<Span>,
        complemented: bool,
    ) -> Self {
        Self {
            spans,
            operator: Some(operator),
            complemented,
        }
    }

    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    #[must_use]
    pub const fn is_compound(&self) -> bool {
        self.operator.is_some()
    }

    /// Check if any span points into another record
    #[must_use]
    pub fn has_remote(&self) -> bool {
        self.spans.iter().any(|span| span.is_remote)
    }

    /// Smallest start coordinate across all spans
    #[must_use]
    pub fn start(&self) -> Option<u64> {
        self.spans.iter().map(Span::start).min()
    }

    /// Largest end coordinate across all spans
    #[must_use]
    pub fn end(&self) -> Option<u64> {
        self.spans.iter().map(Span::end).max()
    }

    /// The shared strand of every span, or `None` when strands are mixed
    #[must_use]
    pub fn strand(&self) -> Option<Strand> {
        let first = self.spans.first()?.strand;
        self.spans
            .iter()
            .all(|span| span.strand == first)
            .then_some(first)
    }

    /// Serialize into CBOR bytes
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails
    pub fn to_cbor(&self) -> SerializationResult<Vec<u8>> {
        serde_cbor::to_vec(self)
            .map_err(|e| SerializationError::serialization_failed(e.to_string()))
    }

    /// Deserialize from CBOR bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid encoded location
    pub fn from_cbor(data: &[u8]) -> SerializationResult<Self> {
        serde_cbor::from_slice(data)
            .map_err(|e| SerializationError::deserialization_failed(e.to_string()))
    }
}

impl fmt::Display for FeatureLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(operator) = self.operator else {
            return match self.spans.first() {
                Some(span) if span.strand.is_reverse() => write!(f, "complement({span})"),
                Some(span) => write!(f, "{span}"),
                None => Ok(()),
            };
        };

        let members: Vec<String> = if self.complemented {
            self.spans.iter().rev().map(ToString::to_string).collect()
        } else {
            self.spans
                .iter()
                .map(|span| {
                    if span.strand.is_reverse() {
                        format!("complement({span})")
                    } else {
                        span.to_string()
                    }
                })
                .collect()
        };

        let body = format!("{}({})", operator.keyword(), members.join(","));
        if self.complemented {
            write!(f, "complement({body})")
        } else {
            f.write_str(&body)
        }
    }
}

impl FromStr for FeatureLocation {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_location(s, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_kind_helpers() {
        assert!(Span::point(7).is_point());
        assert!(Span::range(1, 10).is_range());
        assert!(Span::between_bases(55, 56).is_between_bases());
        assert!(!Span::range(1, 10).is_point());
    }

    #[test]
    fn test_span_display() {
        assert_eq!(Span::point(7).to_string(), "7");
        assert_eq!(
            Span::range(5, 10)
                .with_fuzzy(Fuzzy::new(true, true))
                .to_string(),
            "<5..>10"
        );
        assert_eq!(Span::between_bases(55, 56).to_string(), "55^56");
        assert_eq!(
            Span::range(1, 15).with_remote("J12345.1").to_string(),
            "J12345.1:1..15"
        );
        assert_eq!(Span::range(1, 15).with_local("X1").to_string(), "1..15");
    }

    #[test]
    fn test_fuzzy_point_display() {
        let lower = Span::point(1).with_fuzzy(Fuzzy::new(true, false));
        let upper = Span::point(9).with_fuzzy(Fuzzy::new(false, true));
        assert_eq!(lower.to_string(), "<1");
        assert_eq!(upper.to_string(), ">9");
    }

    #[test]
    fn test_strand_sign() {
        assert_eq!(Strand::Forward.sign(), 1);
        assert_eq!(Strand::Reverse.sign(), -1);
        assert_eq!(Strand::from_sign(-1), Some(Strand::Reverse));
        assert_eq!(Strand::from_sign(0), None);
    }

    #[test]
    fn test_compound_display_with_member_complement() {
        let location = FeatureLocation::compound(
            CompoundOperator::Join,
            vec![
                Span::range(1, 10),
                Span::range(20, 30).with_strand(Strand::Reverse),
            ],
            false,
        );
        assert_eq!(location.to_string(), "join(1..10,complement(20..30))");
    }

    #[test]
    fn test_complemented_compound_display_restores_text_order() {
        let location = FeatureLocation::compound(
            CompoundOperator::Order,
            vec![
                Span::range(20, 30).with_strand(Strand::Reverse),
                Span::range(1, 10).with_strand(Strand::Reverse),
            ],
            true,
        );
        assert_eq!(location.to_string(), "complement(order(1..10,20..30))");
    }

    #[test]
    fn test_location_summary_queries() {
        let location = FeatureLocation::compound(
            CompoundOperator::Join,
            vec![
                Span::range(100, 200),
                Span::range(5, 50).with_remote("AB000001.1"),
            ],
            false,
        );
        assert_eq!(location.len(), 2);
        assert!(location.is_compound());
        assert!(location.has_remote());
        assert_eq!(location.start(), Some(5));
        assert_eq!(location.end(), Some(200));
        assert_eq!(location.strand(), Some(Strand::Forward));
    }

    #[test]
    fn test_mixed_strand_is_none() {
        let location = FeatureLocation::compound(
            CompoundOperator::Join,
            vec![
                Span::range(1, 2),
                Span::range(3, 4).with_strand(Strand::Reverse),
            ],
            false,
        );
        assert_eq!(location.strand(), None);
    }

    #[test]
    fn test_cbor_roundtrip() {
        let location =
            FeatureLocation::simple(Span::between_bases(55, 56).with_strand(Strand::Reverse));
        let bytes = location.to_cbor().unwrap();
        assert_eq!(FeatureLocation::from_cbor(&bytes).unwrap(), location);
    }

    #[test]
    fn test_cbor_rejects_garbage() {
        assert!(FeatureLocation::from_cbor(&[0xff, 0x00, 0x13]).is_err());
    }
}
