use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use heatwatch_energy::{MAX_LOOKBACK_DAYS, MIN_LOOKBACK_DAYS};

/// Options shared by every command that reads the database.
#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Days to look back (1-100)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(MIN_LOOKBACK_DAYS as i64..=MAX_LOOKBACK_DAYS as i64))]
    pub days: Option<u32>,

    /// Path to the CT logger database
    #[arg(long, value_name = "PATH")]
    pub database: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interactive dashboard (default)
    #[command(alias = "tui")]
    Ui {
        #[command(flatten)]
        source: SourceArgs,

        /// Seconds between automatic refreshes
        #[arg(short, long, value_name = "SECS")]
        refresh_secs: Option<u64>,
    },

    /// Print the energy total for the window once
    Summary {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(short, long)]
        json: bool,
    },

    /// Stream refreshes as JSON lines
    #[command(alias = "raw")]
    Pipe {
        #[command(flatten)]
        source: SourceArgs,

        /// Number of refreshes to emit, 0 for no limit
        #[arg(short, long, default_value_t = 0)]
        samples: u32,

        /// Seconds between refreshes
        #[arg(short, long, default_value_t = 60)]
        interval: u64,

        #[arg(short, long)]
        compact: bool,

        /// Include the plotted points in each document
        #[arg(short, long)]
        points: bool,
    },

    Debug {
        #[command(flatten)]
        source: SourceArgs,
    },

    Config {
        #[arg(long)]
        path: bool,

        #[arg(long)]
        reset: bool,

        #[arg(short, long)]
        edit: bool,
    },

    Logs {
        #[arg(short, long, default_value_t = 50)]
        lines: usize,

        #[arg(short, long)]
        follow: bool,
    },
}

#[derive(Debug, Parser)]
#[command(name = "heatwatch", version, about, verbatim_doc_comment)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_dashboard() {
        let cli = Cli::try_parse_from(["heatwatch"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn days_must_be_in_range() {
        assert!(Cli::try_parse_from(["heatwatch", "summary", "--days", "0"]).is_err());
        assert!(Cli::try_parse_from(["heatwatch", "summary", "--days", "101"]).is_err());

        let cli = Cli::try_parse_from(["heatwatch", "summary", "-d", "7", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Summary { source, json }) => {
                assert_eq!(source.days, Some(7));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn log_level_is_global() {
        let cli = Cli::try_parse_from(["heatwatch", "pipe", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }
}
