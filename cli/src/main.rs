mod app;
mod cli;
mod commands;
mod config;
mod data;
mod input;
mod logging;
mod theme;
mod ui;

use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::warn;

use cli::{Cli, Commands, SourceArgs};
use commands::pipe::PipeOptions;
use config::{ensure_dirs, LogLevel, UserConfig};
use logging::LogMode;

fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = ensure_dirs();

    let cli = Cli::parse();
    let (config, load_error) = UserConfig::load();
    let log_level_override = cli.log_level.as_deref().map(LogLevel::from_str);

    let mode = match cli.command {
        None | Some(Commands::Ui { .. }) => LogMode::File,
        Some(_) => LogMode::Stderr,
    };
    let _guard = logging::init(config.log_level, mode, log_level_override);
    if let Some(e) = load_error {
        warn!(error = %e, "Invalid config, using defaults");
        if mode == LogMode::File {
            eprintln!("Warning: {e}; using defaults");
        }
    }

    match cli.command {
        Some(Commands::Summary { source, json }) => {
            commands::summary::run(&with_source_args(config, source, None), json)
        }
        Some(Commands::Pipe {
            source,
            samples,
            interval,
            compact,
            points,
        }) => {
            let options = PipeOptions {
                samples,
                interval: Duration::from_secs(interval),
                compact,
                points,
            };
            commands::pipe::run(&with_source_args(config, source, None), options)
        }
        Some(Commands::Debug { source }) => {
            commands::debug::run(&with_source_args(config, source, None))
        }
        Some(Commands::Config { path, reset, edit }) => {
            commands::config::run(&config, path, reset, edit)
        }
        Some(Commands::Logs { lines, follow }) => commands::logs::run(lines, follow),
        Some(Commands::Ui {
            source,
            refresh_secs,
        }) => app::run_tui(with_source_args(config, source, refresh_secs)),
        None => app::run_tui(config),
    }
}

fn with_source_args(
    mut config: UserConfig,
    source: SourceArgs,
    refresh_secs: Option<u64>,
) -> UserConfig {
    config.merge_with_args(source.days, refresh_secs, source.database);
    config
}
