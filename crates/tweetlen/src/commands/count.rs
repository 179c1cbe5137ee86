//! Count command: show the weighted length of a message.

use owo_colors::{OwoColorize, Stream};
use tracing::{debug, instrument};

use tweetlen_core::{LengthReport, LengthStatus, measure};

use super::{InputArgs, read_message};

/// Measure a message and print `typed/max` plus the remaining count.
///
/// Over-limit text is reported, not treated as a failure; use `check` to gate.
#[instrument(name = "cmd_count", skip_all, fields(file = ?args.file))]
pub fn cmd_count(
    args: InputArgs,
    global_json: bool,
    warning_threshold: usize,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = ?args.file, inline = args.text.is_some(), "executing count command");

    let content = read_message(&args, max_input)?;
    let report = measure(&content, warning_threshold);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render(&report));
    }

    Ok(())
}

/// One-line human summary, e.g. `42/280 (238 remaining)`.
pub fn render(report: &LengthReport) -> String {
    let remaining = match report.status {
        LengthStatus::Ok => report.remaining.to_string(),
        LengthStatus::Warning => report
            .remaining
            .if_supports_color(Stream::Stdout, |r| r.yellow())
            .to_string(),
        LengthStatus::OverLimit => report
            .remaining
            .if_supports_color(Stream::Stdout, |r| r.red())
            .to_string(),
    };
    format!(
        "{}/{} ({remaining} remaining)",
        report.weighted_length, report.max_length,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tweetlen_core::DEFAULT_WARNING_THRESHOLD;

    fn text_args(text: &str) -> InputArgs {
        InputArgs {
            text: Some(text.to_string()),
            ..InputArgs::default()
        }
    }

    #[test]
    fn count_text_succeeds() {
        assert!(cmd_count(text_args("hello"), false, DEFAULT_WARNING_THRESHOLD, None).is_ok());
    }

    #[test]
    fn count_over_limit_still_succeeds() {
        let args = text_args(&"a".repeat(300));
        assert!(cmd_count(args, true, DEFAULT_WARNING_THRESHOLD, None).is_ok());
    }

    #[test]
    fn render_mentions_length_and_remaining() {
        let report = measure("hello", DEFAULT_WARNING_THRESHOLD);
        assert_eq!(render(&report), "5/280 (275 remaining)");
    }
}
