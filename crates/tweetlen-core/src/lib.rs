//! Core library for tweetlen.
//!
//! Computes the weighted length of a short message the way the twitter-text
//! v3 rules do, reports how much room is left under the 280 cap, and decides
//! whether a message may be posted.
//!
//! # Modules
//!
//! - [`weights`] - Per-code-point weights and the length constants
//! - [`emoji`] - Emoji classification of grapheme clusters
//! - [`urls`] - URL span detection
//! - [`length`] - Weighted length, remaining count and length reports
//! - [`validate`] - Submission policy (non-blank and within the cap)
//! - [`config`] - Settings from files and `TWEETLEN_*` variables
//! - [`error`] - Config and message errors
//!
//! # Example
//!
//! ```
//! use tweetlen_core::{MAX_LENGTH, can_send, remaining, weighted_length};
//!
//! assert_eq!(weighted_length("Hello 😀 https://example.com"), 32);
//! assert_eq!(remaining("hello"), MAX_LENGTH as i64 - 5);
//! assert!(!can_send("   "));
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod emoji;
pub mod error;
pub mod length;
pub mod urls;
pub mod validate;
pub mod weights;

pub use config::{Config, ConfigLoader, LogLevel};
pub use emoji::{EmojiClassifier, EmojiClassifying};
pub use error::{ConfigError, ConfigResult, MessageError, MessageResult};
pub use length::{
    DEFAULT_WARNING_THRESHOLD, LengthCalculating, LengthCalculator, LengthReport, LengthStatus,
    Tally,
};
pub use urls::{Span, UrlDetecting, UrlDetector};
pub use validate::{MessageValidating, MessageValidator};
pub use weights::{DEFAULT_WEIGHT, EMOJI_WEIGHT, MAX_LENGTH, URL_WEIGHT, WeightRange, WeightTable};

/// Default maximum input size for the CLI and MCP server (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// Weighted length of `text` under the standard rules.
pub fn weighted_length(text: &str) -> usize {
    LengthCalculator::new().weighted_length(text)
}

/// `MAX_LENGTH - weighted_length(text)`; negative when over the cap.
pub fn remaining(text: &str) -> i64 {
    LengthCalculator::new().remaining(text)
}

/// `true` when `0 < weighted_length(text) <= MAX_LENGTH`.
pub fn is_valid_length(text: &str) -> bool {
    LengthCalculator::new().is_valid_length(text)
}

/// `true` when `text` is non-blank and within the cap.
pub fn can_send(text: &str) -> bool {
    MessageValidator::standard().can_send(text)
}

/// Full length report for `text`.
pub fn measure(text: &str, warning_threshold: usize) -> LengthReport {
    MessageValidator::standard().report(text, warning_threshold)
}
