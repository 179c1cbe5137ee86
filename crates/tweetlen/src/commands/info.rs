//! `info`: version, effective settings and the weights a post is counted with.

use std::fmt::Display;

use clap::Args;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tracing::{debug, instrument};
use tweetlen_core::config::{Config, ConfigSources};
use tweetlen_core::{EMOJI_WEIGHT, MAX_LENGTH, URL_WEIGHT};

/// `info` takes only the global flags.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {}

/// Settings after files and environment are merged.
#[derive(Debug, Serialize)]
struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    warning_threshold: usize,
    /// Absent when the limit is disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
}

impl Settings {
    fn resolve(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            config_file: sources.primary_file().map(ToString::to_string),
            log_level: config.log_level.as_str(),
            log_dir: config.log_dir.as_ref().map(ToString::to_string),
            warning_threshold: config.warning_threshold(),
            max_input_bytes: config.input_limit(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Weights {
    max_length: usize,
    url_weight: usize,
    emoji_weight: usize,
}

#[derive(Debug, Serialize)]
struct Info {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    config: Settings,
    weights: Weights,
}

impl Info {
    fn gather(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            config: Settings::resolve(config, sources),
            weights: Weights {
                max_length: MAX_LENGTH,
                url_weight: URL_WEIGHT,
                emoji_weight: EMOJI_WEIGHT,
            },
        }
    }

    fn render(&self) -> String {
        let mut out = format!(
            "{} {}\n",
            self.name.if_supports_color(Stream::Stdout, |s| s.bold()),
            self.version.if_supports_color(Stream::Stdout, |s| s.green()),
        );
        if !self.description.is_empty() {
            out.push_str(self.description);
            out.push('\n');
        }

        heading(&mut out, "Settings");
        let file = match &self.config.config_file {
            Some(path) => path
                .if_supports_color(Stream::Stdout, |s| s.cyan())
                .to_string(),
            None => "none"
                .if_supports_color(Stream::Stdout, |s| s.yellow())
                .to_string(),
        };
        row(&mut out, "Config file", file);
        row(&mut out, "Log level", self.config.log_level);
        if let Some(dir) = &self.config.log_dir {
            row(&mut out, "Log directory", dir);
        }
        row(&mut out, "Warning threshold", self.config.warning_threshold);
        match self.config.max_input_bytes {
            Some(max) => row(&mut out, "Input limit", format!("{max} bytes")),
            None => row(
                &mut out,
                "Input limit",
                "disabled".if_supports_color(Stream::Stdout, |s| s.yellow()),
            ),
        }

        heading(&mut out, "Weights");
        row(&mut out, "Max length", self.weights.max_length);
        row(&mut out, "URL weight", self.weights.url_weight);
        row(&mut out, "Emoji weight", self.weights.emoji_weight);
        out
    }
}

fn heading(out: &mut String, title: &str) {
    let title = title.if_supports_color(Stream::Stdout, |s| s.bold());
    out.push_str(&format!("\n{title}\n"));
}

fn row(out: &mut String, label: &str, value: impl Display) {
    let label = label.if_supports_color(Stream::Stdout, |s| s.dimmed());
    out.push_str(&format!("{label}: {value}\n"));
}

/// Print what `tweetlen` would run with, as text or JSON.
#[instrument(name = "cmd_info", skip_all)]
pub fn cmd_info(
    _args: InfoArgs,
    json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    let info = Info::gather(config, sources);
    debug!(config_file = ?info.config.config_file, json, "info");
    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print!("{}", info.render());
    }
    Ok(())
}
