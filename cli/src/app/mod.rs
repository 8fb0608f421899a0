//! Application core module.
//!
//! This module contains the main App struct and related types for the TUI application.

mod actions;
mod tui;
pub mod types;

pub use tui::run_tui;

use std::time::Duration;

use chrono_tz::Tz;
use color_eyre::eyre::Result;
use tracing::{error, info};

use heatwatch_energy::{refresh, Aggregator, Lookback, Snapshot, SystemClock, Trigger};

use crate::config::UserConfig;
use crate::data::SqliteSource;

pub use types::{Action, AppView};

/// Main application state for the TUI.
///
/// Owns the read-only database handle and the aggregator, and keeps the most
/// recent snapshot for rendering. Refreshes are requested with a [`Trigger`]
/// and run by the event loop one at a time.
pub struct App {
    pub config: UserConfig,
    pub view: AppView,
    pub days: Lookback,
    pub snapshot: Option<Snapshot>,
    /// Sticky across window changes; only timer refreshes replace it.
    pub last_updated: Option<String>,
    pub last_error: Option<String>,
    pub refresh_interval: Duration,
    pub timezone: Tz,
    source: SqliteSource,
    aggregator: Aggregator,
    clock: SystemClock,
    pending: Option<Trigger>,
}

impl App {
    /// Creates a new App, opening the configured database.
    pub fn new(user_config: UserConfig) -> Result<Self> {
        let source = SqliteSource::open(&user_config.database, user_config.table_layout())?;
        Ok(Self::with_source(user_config, source))
    }

    pub fn with_source(user_config: UserConfig, source: SqliteSource) -> Self {
        let days = user_config.lookback();
        let refresh_interval = user_config.refresh_interval();
        let energy = user_config.energy_config();

        info!(
            database = ?source.path(),
            days = days.days(),
            refresh_secs = refresh_interval.as_secs(),
            "Initializing app"
        );

        Self {
            view: AppView::Main,
            days,
            snapshot: None,
            last_updated: None,
            last_error: None,
            refresh_interval,
            timezone: energy.timezone,
            source,
            aggregator: Aggregator::new(energy),
            clock: SystemClock,
            // Startup behaves like a timer tick so "last updated" is shown.
            pending: Some(Trigger::Tick),
            config: user_config,
        }
    }

    pub fn source(&self) -> &SqliteSource {
        &self.source
    }

    /// Queues a refresh. A pending tick is never downgraded to a window
    /// change, so the "last updated" stamp is not lost.
    pub fn request_refresh(&mut self, trigger: Trigger) {
        self.pending = Some(match (self.pending, trigger) {
            (Some(Trigger::Tick), _) | (_, Trigger::Tick) => Trigger::Tick,
            _ => Trigger::WindowChanged,
        });
    }

    pub fn take_pending(&mut self) -> Option<Trigger> {
        self.pending.take()
    }

    /// Runs one refresh to completion. On failure the previous snapshot is
    /// kept and the error is shown instead.
    pub fn refresh(&mut self, trigger: Trigger) {
        match refresh(
            &self.source,
            &self.clock,
            &self.aggregator,
            self.days,
            trigger,
        ) {
            Ok(snapshot) => {
                if let Some(stamp) = &snapshot.last_updated {
                    self.last_updated = Some(stamp.clone());
                }
                self.snapshot = Some(snapshot);
                self.last_error = None;
            }
            Err(e) => {
                error!(error = %e, trigger = trigger.label(), "Refresh failed");
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Stride the aggregator will use for the current lookback.
    pub fn stride(&self) -> usize {
        self.aggregator.stride(self.days)
    }
}
