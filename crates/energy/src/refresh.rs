//! One fetch-aggregate cycle.
//!
//! A refresh is started either by the periodic timer or by the user changing
//! the lookback window. Which one fired is passed in as a [`Trigger`]; only
//! timer refreshes stamp a new "last updated" time.

use std::time::Instant;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::debug;

use crate::aggregate::{Aggregation, Aggregator};
use crate::lookback::Lookback;
use crate::reading::SampledSeries;
use crate::source::{Clock, ReadingSource};
use crate::summary::EnergySummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// The refresh timer fired.
    Tick,
    /// The lookback window was changed.
    WindowChanged,
}

impl Trigger {
    pub fn label(self) -> &'static str {
        match self {
            Trigger::Tick => "tick",
            Trigger::WindowChanged => "window changed",
        }
    }
}

/// Everything the presentation layer needs after one refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub days: Lookback,
    pub trigger: Trigger,
    pub window_start: DateTime<Utc>,
    /// Readings returned by the source before down-sampling.
    pub fetched: usize,
    pub sampled: SampledSeries,
    pub summary: EnergySummary,
    /// Set only for [`Trigger::Tick`].
    pub last_updated: Option<String>,
}

/// Queries `source` for the last `days` and aggregates the result.
///
/// Source errors are returned unchanged; nothing is retried.
pub fn refresh<S, C>(
    source: &S,
    clock: &C,
    aggregator: &Aggregator,
    days: Lookback,
    trigger: Trigger,
) -> Result<Snapshot, S::Error>
where
    S: ReadingSource + ?Sized,
    C: Clock + ?Sized,
{
    let started = Instant::now();
    let now = clock.now();
    let window_start = now - days.duration();

    let series = source.readings_since(window_start)?;
    let fetched = series.len();
    let Aggregation { sampled, summary } = aggregator.aggregate(&series, days);

    let last_updated = match trigger {
        Trigger::Tick => Some(format_last_updated(now, aggregator.config().timezone)),
        Trigger::WindowChanged => None,
    };

    debug!(
        trigger = trigger.label(),
        days = days.days(),
        stride = sampled.stride,
        fetched,
        sampled = sampled.len(),
        total_kwh = summary.total_kwh,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Refresh completed"
    );

    Ok(Snapshot {
        days,
        trigger,
        window_start,
        fetched,
        sampled,
        summary,
        last_updated,
    })
}

/// `Last updated: YYYY-MM-DD HH:MM:SS` in `tz`, without an offset suffix.
pub fn format_last_updated(now: DateTime<Utc>, tz: Tz) -> String {
    format!(
        "Last updated: {}",
        now.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn last_updated_is_local_wall_time() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 17, 30, 5).unwrap();
        assert_eq!(
            format_last_updated(now, chrono_tz::America::New_York),
            "Last updated: 2024-01-15 12:30:05"
        );
    }

    #[test]
    fn trigger_serializes_snake_case() {
        assert_eq!(Trigger::WindowChanged.label(), "window changed");
        assert_eq!(
            serde_json::to_string(&Trigger::WindowChanged).unwrap(),
            "\"window_changed\""
        );
        assert_eq!(serde_json::to_string(&Trigger::Tick).unwrap(), "\"tick\"");
    }
}
