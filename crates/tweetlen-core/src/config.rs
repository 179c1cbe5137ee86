//! Settings for the tooling around the counter.
//!
//! The weighting constants are fixed; what can be configured is logging,
//! the warning threshold of the counter and the input size limit.
//!
//! Files are named `.tweetlen.<ext>` or `tweetlen.<ext>` with `ext` one of
//! `toml`, `yaml`, `yml`, `json`. Sources merge lowest to highest:
//!
//! 1. built-in defaults
//! 2. `config.<ext>` in the user config directory
//! 3. project files from the nearest directory (walking up from the search
//!    root, stopping at `.git`) that has any; dotfiles before plain names
//! 4. files passed with [`ConfigLoader::with_file`], in order
//! 5. `TWEETLEN_*` environment variables
//!
//! ```no_run
//! use camino::Utf8Path;
//! use tweetlen_core::config::ConfigLoader;
//!
//! let (config, sources) = ConfigLoader::new()
//!     .with_project_search(Utf8Path::new("."))
//!     .load()?;
//! println!("{:?} from {:?}", config.warning_threshold(), sources.primary_file());
//! # Ok::<(), tweetlen_core::ConfigError>(())
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::length::DEFAULT_WARNING_THRESHOLD;

const APP_NAME: &str = "tweetlen";
const ENV_PREFIX: &str = "TWEETLEN_";
const EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];
const DEFAULT_BOUNDARY: &str = ".git";

/// Effective settings after all sources are merged.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Level used when neither `RUST_LOG` nor `-q`/`-v` is given.
    pub log_level: LogLevel,
    /// Directory for JSONL log files. File logging is off when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// Remaining count at or below which the counter warns (default: 20).
    pub warning_threshold: Option<usize>,
    /// Largest accepted input in bytes (default: 5 MiB).
    pub max_input_bytes: Option<usize>,
    /// Skip the input size check altogether, whatever `max_input_bytes` says.
    pub disable_input_limit: bool,
}

impl Config {
    /// The configured warning threshold, or the default.
    pub fn warning_threshold(&self) -> usize {
        self.warning_threshold.unwrap_or(DEFAULT_WARNING_THRESHOLD)
    }

    /// The effective input size limit, `None` when disabled.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(crate::DEFAULT_MAX_INPUT_BYTES))
        }
    }
}

/// Default log verbosity.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Filter directive for this level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Files that contributed to a loaded [`Config`], lowest precedence first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Every merged file, in merge order.
    pub files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The file whose values win, if any file was loaded.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.files.last().map(Utf8PathBuf::as_path)
    }
}

/// Collects config sources and merges them with figment.
#[derive(Debug)]
pub struct ConfigLoader {
    search_root: Option<Utf8PathBuf>,
    user_config: bool,
    boundary: Option<String>,
    extra_files: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader that reads the user config and stops project search at `.git`.
    pub fn new() -> Self {
        Self {
            search_root: None,
            user_config: true,
            boundary: Some(DEFAULT_BOUNDARY.to_string()),
            extra_files: Vec::new(),
        }
    }

    /// Look for project files starting at `dir` and walking up.
    pub fn with_project_search(mut self, dir: impl AsRef<Utf8Path>) -> Self {
        self.search_root = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Include or skip the user config directory.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.user_config = include;
        self
    }

    /// Directory entry that ends the upward search; `None` walks to the root.
    pub fn stop_at(mut self, marker: Option<&str>) -> Self {
        self.boundary = marker.map(str::to_string);
        self
    }

    /// Merge `path` after everything discovered.
    pub fn with_file(mut self, path: impl AsRef<Utf8Path>) -> Self {
        self.extra_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Merge every source and extract the result.
    #[tracing::instrument(skip(self), fields(search_root = ?self.search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        let mut files = Vec::new();
        if self.user_config {
            files.extend(user_config_file());
        }
        if let Some(root) = &self.search_root {
            files.extend(self.project_files(root));
        }
        files.extend(self.extra_files);

        let figment = files
            .iter()
            .fold(
                Figment::from(Serialized::defaults(Config::default())),
                |figment, file| match file.extension() {
                    Some("yaml" | "yml") => figment.merge(Yaml::file_exact(file.as_str())),
                    Some("json") => figment.merge(Json::file_exact(file.as_str())),
                    _ => figment.merge(Toml::file_exact(file.as_str())),
                },
            )
            .merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::debug!(files = files.len(), log_level = config.log_level.as_str(), "configuration loaded");
        Ok((config, ConfigSources { files }))
    }

    /// Config files in the nearest directory that has any.
    fn project_files(&self, root: &Utf8Path) -> Vec<Utf8PathBuf> {
        for dir in root.ancestors() {
            let found: Vec<Utf8PathBuf> = [".", ""]
                .iter()
                .flat_map(|prefix| {
                    EXTENSIONS
                        .iter()
                        .map(move |ext| dir.join(format!("{prefix}{APP_NAME}.{ext}")))
                })
                .filter(|path| path.is_file())
                .collect();
            if !found.is_empty() {
                return found;
            }
            if let Some(marker) = &self.boundary
                && dir.join(marker).exists()
            {
                break;
            }
        }
        Vec::new()
    }
}

/// Per-user config directory, e.g. `~/.config/tweetlen` on Linux.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()
}

fn user_config_file() -> Option<Utf8PathBuf> {
    let dir = user_config_dir()?;
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}
