//! Entry point for the `tweetlen` binary.
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, anyhow};
use camino::Utf8PathBuf;
use clap::Parser;
use tracing::debug;
use tweetlen::{Cli, Commands, commands};
use tweetlen_core::config::{Config, ConfigLoader, ConfigSources};

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    // clap prints usage when neither a subcommand nor --version-only is given.
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(dir) = &cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let (config, sources) = load_config(cli.config.as_ref())?;
    let _log_guard = start_logging(&config, cli.quiet, cli.verbose)?;
    debug!(
        command = command.name(),
        config_file = ?sources.primary_file(),
        json = cli.json,
        "starting"
    );

    let result = run(command, cli.json, config, &sources);
    if let Err(err) = &result {
        tracing::error!(error = %err, "command failed");
    }
    result
}

/// Project search from the working directory, plus an explicit `--config`.
fn load_config(explicit: Option<&PathBuf>) -> anyhow::Result<(Config, ConfigSources)> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let mut loader = ConfigLoader::new().with_project_search(utf8(cwd, "current directory")?);
    if let Some(path) = explicit {
        loader = loader.with_file(utf8(path.clone(), "config path")?);
    }
    loader.load().context("failed to load configuration")
}

fn utf8(path: PathBuf, what: &str) -> anyhow::Result<Utf8PathBuf> {
    Utf8PathBuf::try_from(path)
        .map_err(|e| anyhow!("{what} is not valid UTF-8: {}", e.into_path_buf().display()))
}

fn start_logging(
    config: &Config,
    quiet: bool,
    verbose: u8,
) -> anyhow::Result<observability::ObservabilityGuard> {
    let log_dir = config.log_dir.as_ref().map(|dir| dir.as_std_path().to_path_buf());
    let settings = observability::ObservabilityConfig::from_env_with_overrides(log_dir);
    let filter = observability::env_filter(quiet, verbose, config.log_level.as_str());
    observability::init_observability(&settings, filter).context("failed to set up logging")
}

fn run(
    command: Commands,
    json: bool,
    config: Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    let threshold = config.warning_threshold();
    let max_input = config.input_limit();
    match command {
        Commands::Count(args) => commands::count::cmd_count(args, json, threshold, max_input),
        Commands::Check(args) => commands::check::cmd_check(args, json, threshold, max_input),
        Commands::Info(args) => commands::info::cmd_info(args, json, &config, sources),
        #[cfg(feature = "mcp")]
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .context("failed to start the async runtime")?
            .block_on(commands::serve::cmd_serve(args, config)),
    }
}
