//! Argument parsing and subcommands for `tweetlen`.
//!
//! [`Cli`] is parsed by the binary; [`command()`] hands the same definition to
//! `xtask` for completions and man pages.

pub mod commands;

#[cfg(feature = "mcp")]
pub mod server;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// When to color the counter.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Color only when stdout is a terminal.
    #[default]
    Auto,
    #[allow(missing_docs)]
    Always,
    #[allow(missing_docs)]
    Never,
}

impl ColorChoice {
    /// Force colors on or off for the whole process. `Auto` leaves terminal
    /// detection to `owo-colors`.
    pub fn apply(self) {
        match self {
            Self::Auto => {}
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT:
    TWEETLEN_WARNING_THRESHOLD   Remaining count at which the counter warns
    TWEETLEN_MAX_INPUT_BYTES     Largest message read from a file or stdin
    TWEETLEN_LOG_LEVEL           Level used when no -q/-v flag is given
    TWEETLEN_LOG_DIR             Write JSON logs to DIR/tweetlen.jsonl
    TWEETLEN_LOG_PATH            Write JSON logs to this exact file
    RUST_LOG                     Full tracing filter, overrides everything else
";

/// Global flags and the chosen subcommand.
#[derive(Parser)]
#[command(name = "tweetlen")]
#[command(about = "Weighted length counting and validation for short social posts", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    #[allow(missing_docs)]
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print the bare version number and exit
    #[arg(long)]
    pub version_only: bool,

    /// Extra config file, merged over any discovered one
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Change to DIR before reading config or input
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Log errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Color the counter
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Print the length report as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

/// What to do with the message.
#[derive(Subcommand)]
pub enum Commands {
    /// Show the weighted length and remaining characters of a message
    Count(commands::InputArgs),

    /// Fail unless a message can be posted
    Check(commands::InputArgs),

    /// Show version, effective settings and weights
    Info(commands::info::InfoArgs),

    /// Serve the counter as MCP tools on stdio
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

impl Commands {
    /// Subcommand name as typed on the command line.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Count(_) => "count",
            Self::Check(_) => "check",
            Self::Info(_) => "info",
            #[cfg(feature = "mcp")]
            Self::Serve(_) => "serve",
        }
    }
}

/// The clap definition, for completions and man pages.
pub fn command() -> clap::Command {
    Cli::command()
}
