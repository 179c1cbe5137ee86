//! Submission policy: a message must be non-blank and within the cap.

use crate::error::{MessageError, MessageResult};
use crate::length::{LengthCalculating, LengthCalculator, LengthReport, LengthStatus};

/// Decides whether a message may be submitted.
pub trait MessageValidating: Send + Sync {
    /// Why `text` cannot be sent, or `Ok(())` if it can.
    fn check(&self, text: &str) -> MessageResult<()>;

    /// `true` when `text` is non-blank and its weighted length is valid.
    fn can_send(&self, text: &str) -> bool {
        self.check(text).is_ok()
    }
}

/// Validator layered on a length calculator.
///
/// The blank check trims leading and trailing whitespace, but the length
/// check always runs on the original text.
#[derive(Debug, Clone, Default)]
pub struct MessageValidator<C = LengthCalculator> {
    calculator: C,
}

impl<C: LengthCalculating> MessageValidator<C> {
    /// Wrap a calculator.
    pub const fn new(calculator: C) -> Self {
        Self { calculator }
    }

    /// The wrapped calculator.
    pub const fn calculator(&self) -> &C {
        &self.calculator
    }
}

impl<C: LengthCalculating> MessageValidating for MessageValidator<C> {
    fn check(&self, text: &str) -> MessageResult<()> {
        let length = self.calculator.weighted_length(text);
        rejection(text, length, self.calculator.max_length()).map_or(Ok(()), Err)
    }
}

impl MessageValidator<LengthCalculator> {
    /// Validator over the standard calculator.
    pub fn standard() -> Self {
        Self::new(LengthCalculator::new())
    }

    /// Measure `text` and collect everything a counter needs to display.
    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn report(&self, text: &str, warning_threshold: usize) -> LengthReport {
        let tally = self.calculator.tally(text);
        let max_length = self.calculator.max_length();
        let remaining = max_length as i64 - tally.weighted_length as i64;
        let reason = rejection(text, tally.weighted_length, max_length);

        LengthReport {
            weighted_length: tally.weighted_length,
            max_length,
            remaining,
            url_count: tally.url_count,
            emoji_count: tally.emoji_count,
            valid_length: tally.weighted_length > 0 && tally.weighted_length <= max_length,
            can_send: reason.is_none(),
            status: LengthStatus::from_remaining(remaining, warning_threshold),
            reason: reason.map(|e| e.to_string()),
        }
    }
}

fn rejection(text: &str, length: usize, max: usize) -> Option<MessageError> {
    if text.trim().is_empty() {
        Some(MessageError::Empty)
    } else if length > max {
        Some(MessageError::TooLong { length, max })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::length::DEFAULT_WARNING_THRESHOLD;

    fn validator() -> MessageValidator {
        MessageValidator::standard()
    }

    #[test]
    fn accepts_ordinary_text() {
        assert!(validator().can_send("Hello world"));
    }

    #[test]
    fn rejects_empty_and_blank() {
        let v = validator();
        assert!(!v.can_send(""));
        assert!(!v.can_send("   \n  "));
        assert_eq!(v.check("\t\r\n"), Err(MessageError::Empty));
    }

    #[test]
    fn length_boundaries() {
        let v = validator();
        assert!(v.can_send(&"a".repeat(280)));
        assert!(!v.can_send(&"a".repeat(281)));
        assert!(v.can_send(&"你".repeat(140)));
        assert_eq!(
            v.check(&"你".repeat(141)),
            Err(MessageError::TooLong {
                length: 282,
                max: 280
            })
        );
    }

    #[test]
    fn emoji_and_url_only_messages() {
        let v = validator();
        assert!(v.can_send("😀"));
        assert!(v.can_send("https://example.com"));
    }

    #[test]
    fn surrounding_whitespace_still_counts_toward_length() {
        let v = validator();
        let padded = format!("  {}  ", "a".repeat(278));
        assert_eq!(v.calculator().weighted_length(&padded), 282);
        assert!(!v.can_send(&padded));
    }

    #[test]
    fn whitespace_only_is_valid_length_but_not_sendable() {
        let v = validator();
        assert!(v.calculator().is_valid_length("   "));
        assert!(!v.can_send("   "));
    }

    struct Fixed(usize);

    impl LengthCalculating for Fixed {
        fn weighted_length(&self, _text: &str) -> usize {
            self.0
        }

        fn max_length(&self) -> usize {
            10
        }
    }

    #[test]
    fn works_with_any_calculator() {
        assert!(MessageValidator::new(Fixed(10)).can_send("x"));
        assert!(!MessageValidator::new(Fixed(11)).can_send("x"));
    }

    #[test]
    fn report_for_sendable_text() {
        let report = validator().report("Hello 😀 https://example.com", DEFAULT_WARNING_THRESHOLD);
        assert_eq!(report.weighted_length, 32);
        assert_eq!(report.remaining, 248);
        assert_eq!(report.url_count, 1);
        assert_eq!(report.emoji_count, 1);
        assert!(report.valid_length);
        assert!(report.can_send);
        assert_eq!(report.status, LengthStatus::Ok);
        assert!(report.reason.is_none());
    }

    #[test]
    fn report_for_rejected_text() {
        let v = validator();

        let blank = v.report("  ", DEFAULT_WARNING_THRESHOLD);
        assert!(blank.valid_length);
        assert!(!blank.can_send);
        assert_eq!(blank.reason.as_deref(), Some("message cannot be empty"));

        let long = v.report(&"a".repeat(290), DEFAULT_WARNING_THRESHOLD);
        assert_eq!(long.remaining, -10);
        assert_eq!(long.status, LengthStatus::OverLimit);
        assert!(!long.can_send);
    }

    #[test]
    fn standard_matches_default() {
        let text = "你好 https://example.com";
        let standard = MessageValidator::standard().report(text, DEFAULT_WARNING_THRESHOLD);
        let default = MessageValidator::<LengthCalculator>::default()
            .report(text, DEFAULT_WARNING_THRESHOLD);
        assert_eq!(standard.weighted_length, 28);
        assert_eq!(standard.weighted_length, default.weighted_length);
    }

    #[test]
    fn report_serializes_without_empty_reason() {
        let report = validator().report("hi", DEFAULT_WARNING_THRESHOLD);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["weighted_length"], 2);
        assert_eq!(json["status"], "ok");
        assert!(json.get("reason").is_none());
    }
}
