//! Weighted length calculation.
//!
//! A message is measured in five steps:
//!
//! 1. NFC-normalize the text.
//! 2. Detect URL spans on the normalized text and cut them out, highest
//!    offset first.
//! 3. Walk what is left grapheme by grapheme. Emoji clusters cost
//!    [`EMOJI_WEIGHT`](crate::weights::EMOJI_WEIGHT); every other cluster
//!    costs the sum of its scalars' weights.
//! 4. Add [`URL_WEIGHT`](crate::weights::URL_WEIGHT) once per URL.
//! 5. Compare the total against the cap.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::emoji::{EmojiClassifier, EmojiClassifying};
use crate::urls::{UrlDetecting, UrlDetector, merge_spans};
use crate::weights::WeightTable;

/// Remaining-count threshold at or below which a counter should warn.
pub const DEFAULT_WARNING_THRESHOLD: usize = 20;

/// Measures messages against a length cap.
pub trait LengthCalculating: Send + Sync {
    /// Weighted length of `text`. Zero only for the empty string.
    fn weighted_length(&self, text: &str) -> usize;

    /// Cap this calculator validates against.
    fn max_length(&self) -> usize;

    /// Characters left before the cap. Negative when over the limit.
    fn remaining(&self, text: &str) -> i64 {
        self.max_length() as i64 - self.weighted_length(text) as i64
    }

    /// `true` when `0 < weighted_length(text) <= max_length()`.
    fn is_valid_length(&self, text: &str) -> bool {
        let length = self.weighted_length(text);
        length > 0 && length <= self.max_length()
    }
}

/// Breakdown of a single measurement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Total weighted length.
    pub weighted_length: usize,
    /// URLs charged the flat URL weight.
    pub url_count: usize,
    /// Grapheme clusters charged the flat emoji weight.
    pub emoji_count: usize,
}

/// The standard length calculator.
///
/// Generic over its URL detector and emoji classifier so either can be
/// swapped out; the defaults are the production implementations.
#[derive(Debug, Clone, Default)]
pub struct LengthCalculator<U = UrlDetector, E = EmojiClassifier> {
    table: WeightTable,
    urls: U,
    emoji: E,
}

impl LengthCalculator {
    /// Calculator with the standard table, detector and classifier.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<U: UrlDetecting, E: EmojiClassifying> LengthCalculator<U, E> {
    /// Calculator with the standard table and the given collaborators.
    pub const fn with_collaborators(urls: U, emoji: E) -> Self {
        Self {
            table: WeightTable::STANDARD,
            urls,
            emoji,
        }
    }

    /// The weight table in use.
    pub const fn table(&self) -> &WeightTable {
        &self.table
    }

    /// Measure `text`, keeping the URL and emoji counts.
    #[tracing::instrument(level = "debug", skip_all, fields(text_len = text.len()))]
    pub fn tally(&self, text: &str) -> Tally {
        if text.is_empty() {
            return Tally::default();
        }

        let normalized: String = text.nfc().collect();
        let mut spans = self.urls.detect(&normalized);
        spans.retain(|span| {
            span.start < span.end
                && span.end <= normalized.len()
                && normalized.is_char_boundary(span.start)
                && normalized.is_char_boundary(span.end)
        });
        let spans = merge_spans(spans);

        let mut remainder = normalized;
        for span in spans.iter().rev() {
            remainder.replace_range(span.clone(), "");
        }

        let mut tally = Tally {
            weighted_length: spans.len() * self.table.url_weight,
            url_count: spans.len(),
            emoji_count: 0,
        };

        for cluster in remainder.graphemes(true) {
            if self.emoji.is_emoji(cluster) {
                tally.emoji_count += 1;
                tally.weighted_length += self.table.emoji_weight;
            } else {
                tally.weighted_length += cluster
                    .chars()
                    .map(|scalar| self.table.weight_of(scalar))
                    .sum::<usize>();
            }
        }

        tracing::debug!(
            weighted_length = tally.weighted_length,
            urls = tally.url_count,
            emoji = tally.emoji_count,
            "measured text"
        );
        tally
    }
}

impl<U: UrlDetecting, E: EmojiClassifying> LengthCalculating for LengthCalculator<U, E> {
    fn weighted_length(&self, text: &str) -> usize {
        self.tally(text).weighted_length
    }

    fn max_length(&self) -> usize {
        self.table.max_length
    }
}

/// How close a message is to the cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LengthStatus {
    /// Comfortably under the cap.
    Ok,
    /// Within the warning threshold, but not over.
    Warning,
    /// Over the cap.
    OverLimit,
}

impl LengthStatus {
    /// Classify a remaining count.
    pub const fn from_remaining(remaining: i64, warning_threshold: usize) -> Self {
        if remaining < 0 {
            Self::OverLimit
        } else if remaining as u64 <= warning_threshold as u64 {
            Self::Warning
        } else {
            Self::Ok
        }
    }

    /// Lowercase name, matching the serialized form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::OverLimit => "over_limit",
        }
    }
}

impl std::fmt::Display for LengthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of measuring a message.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LengthReport {
    /// Weighted length of the message.
    pub weighted_length: usize,
    /// The cap it was measured against.
    pub max_length: usize,
    /// `max_length - weighted_length`; negative when over.
    pub remaining: i64,
    /// Number of URLs charged the flat URL weight.
    pub url_count: usize,
    /// Number of emoji clusters.
    pub emoji_count: usize,
    /// Whether the length alone is acceptable.
    pub valid_length: bool,
    /// Whether the message may be submitted.
    pub can_send: bool,
    /// Counter status for the remaining count.
    pub status: LengthStatus,
    /// Why the message cannot be sent, if it cannot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
