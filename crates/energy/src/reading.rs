use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A single current measurement from the consumed CT channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub timestamp: DateTime<Utc>,
    /// Raw current-transformer units, proportional to load.
    pub current: f64,
}

impl Reading {
    pub fn new(timestamp: DateTime<Utc>, current: f64) -> Self {
        Self { timestamp, current }
    }

    pub fn local_time(&self, tz: Tz) -> DateTime<Tz> {
        self.timestamp.with_timezone(&tz)
    }
}

/// Readings kept after down-sampling, with the noise floor applied.
///
/// This is what gets plotted and integrated. The time zone is carried along
/// for display; none of the math depends on it.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledSeries {
    pub stride: usize,
    pub readings: Vec<Reading>,
    pub timezone: Tz,
}

impl SampledSeries {
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// `(unix seconds, current)` pairs, in series order.
    pub fn plot_points(&self) -> Vec<(f64, f64)> {
        self.readings
            .iter()
            .map(|r| (unix_seconds(r.timestamp), r.current))
            .collect()
    }

    /// Readings with their timestamps converted to the display time zone.
    pub fn local_points(&self) -> impl Iterator<Item = (DateTime<Tz>, f64)> + '_ {
        self.readings
            .iter()
            .map(|r| (r.local_time(self.timezone), r.current))
    }

    pub fn time_bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let first = self.readings.first()?;
        let last = self.readings.last()?;
        Some((first.timestamp, last.timestamp))
    }

    pub fn peak(&self) -> Option<f64> {
        self.readings
            .iter()
            .map(|r| r.current)
            .filter(|c| c.is_finite())
            .fold(None, |max, c| Some(max.map_or(c, |m: f64| m.max(c))))
    }
}

pub(crate) fn unix_seconds(timestamp: DateTime<Utc>) -> f64 {
    timestamp.timestamp() as f64 + f64::from(timestamp.timestamp_subsec_micros()) / 1_000_000.0
}
