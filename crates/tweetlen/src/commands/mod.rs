//! Subcommands and the input handling they share.

use std::io::Read;

use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;

pub mod check;
pub mod count;
pub mod info;
#[cfg(feature = "mcp")]
pub mod serve;

/// Where a command reads its message from.
#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// File containing the message (`-` for stdin).
    pub file: Option<Utf8PathBuf>,

    /// Message text given inline instead of a file.
    #[arg(long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Keep the final line ending of file or stdin input.
    #[arg(long)]
    pub keep_newline: bool,
}

/// Resolve the message text for a command.
///
/// Inline `--text` is used verbatim. File and stdin input lose a single
/// trailing line ending unless `--keep-newline` is given, since editors
/// add one that is not part of the message.
pub fn read_message(args: &InputArgs, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let content = match (&args.text, &args.file) {
        (Some(text), _) => {
            check_size("--text", text.len(), max_bytes)?;
            return Ok(text.clone());
        }
        (None, Some(path)) if path.as_str() == "-" => read_stdin(max_bytes)?,
        (None, Some(path)) => read_input_file(path, max_bytes)?,
        (None, None) => bail!("no input: pass a FILE, `-` for stdin, or --text"),
    };

    if args.keep_newline {
        Ok(content)
    } else {
        Ok(strip_final_newline(content))
    }
}

/// Read a message file, refusing it before reading if it is over `max_bytes`.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    check_size(path.as_str(), usize::try_from(metadata.len()).unwrap_or(usize::MAX), max_bytes)?;

    std::fs::read_to_string(path.as_std_path()).with_context(|| format!("failed to read {path}"))
}

fn read_stdin(max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut content = String::new();
    let stdin = std::io::stdin().lock();
    match max_bytes {
        Some(max) => {
            let limit = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1);
            stdin
                .take(limit)
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
            check_size("stdin", content.len(), max_bytes)?;
        }
        None => {
            let mut stdin = stdin;
            stdin
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
        }
    }
    Ok(content)
}

fn check_size(source: &str, size: usize, max_bytes: Option<usize>) -> anyhow::Result<()> {
    if let Some(max) = max_bytes
        && size > max
    {
        bail!("input too large: {source} is {size} bytes (limit: {max} bytes)");
    }
    Ok(())
}

fn strip_final_newline(mut content: String) -> String {
    if content.ends_with('\n') {
        content.pop();
        if content.ends_with('\r') {
            content.pop();
        }
    }
    content
}
