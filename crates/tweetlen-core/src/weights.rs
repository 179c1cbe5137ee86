//! Per-code-point weights and the message length cap.
//!
//! Mirrors the twitter-text v3 configuration: every scalar defaults to weight
//! 2 and only a handful of ranges are discounted to weight 1. CJK, Hangul,
//! Hiragana, Katakana and emoji all sit outside those ranges.

use std::cmp::Ordering;

/// Maximum weighted length of a postable message.
pub const MAX_LENGTH: usize = 280;

/// Fixed cost of every detected URL, regardless of its literal length.
pub const URL_WEIGHT: usize = 23;

/// Fixed cost of a grapheme cluster classified as emoji.
pub const EMOJI_WEIGHT: usize = 2;

/// Weight of any scalar outside the discounted ranges.
pub const DEFAULT_WEIGHT: usize = 2;

/// An inclusive interval of Unicode scalar values sharing one weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightRange {
    /// First scalar value in the range.
    pub start: u32,
    /// Last scalar value in the range (inclusive).
    pub end: u32,
    /// Weight assigned to every scalar in the range.
    pub weight: usize,
}

impl WeightRange {
    const fn new(start: u32, end: u32, weight: usize) -> Self {
        Self { start, end, weight }
    }

    /// Returns `true` if `value` lies inside the range.
    pub const fn contains(&self, value: u32) -> bool {
        self.start <= value && value <= self.end
    }

    const fn compare(&self, value: u32) -> Ordering {
        if value < self.start {
            Ordering::Greater
        } else if value > self.end {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }
}

/// Discounted ranges, sorted and non-overlapping.
const STANDARD_RANGES: &[WeightRange] = &[
    // U+0000..U+10FF: Latin, Greek, Cyrillic, Armenian, Hebrew, Arabic, Thai, Georgian
    WeightRange::new(0, 4351, 1),
    // U+2000..U+200D: general punctuation spaces and the zero-width joiner
    WeightRange::new(8192, 8205, 1),
    // U+2010..U+201F: dashes and quotation marks
    WeightRange::new(8208, 8223, 1),
    // U+2032..U+2037: primes
    WeightRange::new(8242, 8247, 1),
];

/// Static weighting configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightTable {
    /// Maximum weighted length of a postable message.
    pub max_length: usize,
    /// Cost of each detected URL.
    pub url_weight: usize,
    /// Cost of each emoji cluster.
    pub emoji_weight: usize,
    /// Weight of scalars outside every range.
    pub default_weight: usize,
    ranges: &'static [WeightRange],
}

impl WeightTable {
    /// The twitter-text v3 table.
    pub const STANDARD: Self = Self {
        max_length: MAX_LENGTH,
        url_weight: URL_WEIGHT,
        emoji_weight: EMOJI_WEIGHT,
        default_weight: DEFAULT_WEIGHT,
        ranges: STANDARD_RANGES,
    };

    /// The discounted ranges, in ascending order.
    pub const fn ranges(&self) -> &'static [WeightRange] {
        self.ranges
    }

    /// Weight of a single scalar value.
    pub fn weight_of(&self, scalar: char) -> usize {
        let value = u32::from(scalar);
        self.ranges
            .binary_search_by(|range| range.compare(value))
            .map_or(self.default_weight, |idx| self.ranges[idx].weight)
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::STANDARD
    }
}
