//! Check command: gate on whether a message can be posted.

use anyhow::bail;
use owo_colors::{OwoColorize, Stream};
use tracing::{debug, instrument};

use tweetlen_core::MessageValidator;

use super::{InputArgs, read_message};

/// Exit successfully only if the message is non-blank and within the cap.
#[instrument(name = "cmd_check", skip_all, fields(file = ?args.file))]
pub fn cmd_check(
    args: InputArgs,
    global_json: bool,
    warning_threshold: usize,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = ?args.file, inline = args.text.is_some(), "executing check command");

    let content = read_message(&args, max_input)?;
    let report = MessageValidator::standard().report(&content, warning_threshold);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    if let Some(reason) = report.reason.as_deref() {
        debug!(reason, "message rejected");
        bail!("{reason}");
    }

    if !global_json {
        println!(
            "{} {}/{} ({} remaining)",
            "PASS:".if_supports_color(Stream::Stdout, |s| s.green()),
            report.weighted_length,
            report.max_length,
            report.remaining,
        );
    }

    Ok(())
}
