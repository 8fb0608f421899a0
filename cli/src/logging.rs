//! Log setup.
//!
//! The dashboard owns the terminal, so it logs to a daily file in the runtime
//! dir. Every other command logs to stderr and keeps stdout for its output.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::OnceLock;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{runtime_dir, LogLevel};

pub const LOG_FILE_PREFIX: &str = "heatwatch";
const MAX_LOG_FILES: usize = 7;

/// Target of the per-refresh summary line (stride, rows, kWh, duration).
const REFRESH_TARGET: &str = "heatwatch_energy::refresh";

static INIT: OnceLock<()> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// Dashboard session. The file keeps one line per refresh even at the
    /// default level, so a session can be reconstructed afterwards.
    File,
    /// One-shot and pipe commands. Only the configured level applies.
    Stderr,
}

pub struct LogGuard {
    _guard: Option<WorkerGuard>,
}

pub fn init(level: LogLevel, mode: LogMode, cli_override: Option<LogLevel>) -> LogGuard {
    let mut guard = None;

    INIT.get_or_init(|| {
        let Some(tracing_level) = cli_override.unwrap_or(level).as_tracing_level() else {
            return;
        };

        let filter = build_env_filter(tracing_level, mode, std::env::var_os("RUST_LOG").is_some());
        guard = match mode {
            LogMode::File => init_file_logging(filter),
            LogMode::Stderr => {
                init_stderr_logging(filter);
                None
            }
        };
    });

    LogGuard { _guard: guard }
}

/// Directives layered on top of the base level. `RUST_LOG` replaces the
/// app defaults but SQLite noise stays capped.
fn default_directives(level: Level, mode: LogMode, env_override: bool) -> Vec<String> {
    let mut directives = vec!["rusqlite=warn".to_string()];

    if !env_override && mode == LogMode::File && level < Level::DEBUG {
        directives.push(format!("{}=debug", REFRESH_TARGET));
    }

    directives
}

fn build_env_filter(level: Level, mode: LogMode, env_override: bool) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    default_directives(level, mode, env_override)
        .iter()
        .filter_map(|d| d.parse::<Directive>().ok())
        .fold(filter, |filter, directive| filter.add_directive(directive))
}

fn init_file_logging(filter: EnvFilter) -> Option<WorkerGuard> {
    let log_dir = log_dir();

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Failed to create log directory {:?}: {}", log_dir, e);
        return None;
    }

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(&log_dir)
        .ok()?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    Some(guard)
}

/// Compact lines; colour only when stderr is a terminal, since pipe output
/// is usually redirected.
fn init_stderr_logging(filter: EnvFilter) {
    let stderr_layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}

pub fn log_dir() -> PathBuf {
    runtime_dir()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dashboard_file_keeps_refresh_lines_at_default_level() {
        assert_eq!(
            default_directives(Level::WARN, LogMode::File, false),
            vec!["rusqlite=warn", "heatwatch_energy::refresh=debug"]
        );
    }

    #[test]
    fn commands_only_cap_sqlite() {
        assert_eq!(
            default_directives(Level::WARN, LogMode::Stderr, false),
            vec!["rusqlite=warn"]
        );
    }

    #[test]
    fn verbose_levels_and_rust_log_skip_refresh_default() {
        assert_eq!(
            default_directives(Level::TRACE, LogMode::File, false),
            vec!["rusqlite=warn"]
        );
        assert_eq!(
            default_directives(Level::INFO, LogMode::File, true),
            vec!["rusqlite=warn"]
        );
    }

    #[test]
    fn default_directives_parse() {
        for directive in default_directives(Level::ERROR, LogMode::File, false) {
            assert!(directive.parse::<Directive>().is_ok(), "{directive}");
        }
    }
}
