use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::trace;

use crate::lookback::Lookback;
use crate::reading::{Reading, SampledSeries};
use crate::stride::{stride_for_days, DEFAULT_MAX_STRIDE};
use crate::summary::EnergySummary;

/// Raw CT units below which the channel is idle. Calibrated for the heat
/// pump's ct3 clamp; other sensors need their own value.
pub const DEFAULT_NOISE_FLOOR: f64 = 150.0;

/// Base rate plus the per-kWh energy efficiency charge.
pub const DEFAULT_COST_PER_KWH: f64 = 0.18 + 0.01;

pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;

const WATTS_PER_KILOWATT: f64 = 1000.0;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Tunables for [`Aggregator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyConfig {
    pub noise_floor: f64,
    pub max_stride: usize,
    pub cost_per_kwh: f64,
    /// Display zone for sampled timestamps.
    pub timezone: Tz,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            noise_floor: DEFAULT_NOISE_FLOOR,
            max_stride: DEFAULT_MAX_STRIDE,
            cost_per_kwh: DEFAULT_COST_PER_KWH,
            timezone: DEFAULT_TIMEZONE,
        }
    }
}

/// Output of one aggregation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub sampled: SampledSeries,
    pub summary: EnergySummary,
}

/// Down-samples a series, masks idle readings and integrates energy.
///
/// Holds only configuration, so aggregating the same input twice gives the
/// same output.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: EnergyConfig,
}

impl Aggregator {
    pub fn new(config: EnergyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EnergyConfig {
        &self.config
    }

    pub fn stride(&self, days: Lookback) -> usize {
        stride_for_days(days.days(), self.config.max_stride)
    }

    /// Aggregates `series`, which the caller has already limited to the
    /// lookback window.
    ///
    /// Integration runs on the down-sampled readings, so the kWh total depends
    /// on the stride and therefore on `days`.
    pub fn aggregate(&self, series: &[Reading], days: Lookback) -> Aggregation {
        let stride = self.stride(days);

        let readings: Vec<Reading> = downsample(series, stride)
            .into_iter()
            .map(|r| Reading {
                current: apply_noise_floor(r.current, self.config.noise_floor),
                ..r
            })
            .collect();

        let total_kwh = integrate_kwh(&readings);
        let summary = EnergySummary::new(total_kwh, self.config.cost_per_kwh);

        trace!(
            days = days.days(),
            stride,
            input = series.len(),
            sampled = readings.len(),
            total_kwh,
            "Aggregated series"
        );

        Aggregation {
            sampled: SampledSeries {
                stride,
                readings,
                timezone: self.config.timezone,
            },
            summary,
        }
    }
}

/// Keeps every `nth` reading starting with the first. A stride of zero keeps
/// everything.
pub fn downsample(series: &[Reading], nth: usize) -> Vec<Reading> {
    series.iter().step_by(nth.max(1)).copied().collect()
}

/// Clamps idle readings to exactly zero. Idle readings are kept so the time
/// gap they cover is still accounted for.
pub fn apply_noise_floor(current: f64, floor: f64) -> f64 {
    if current < floor {
        0.0
    } else {
        current
    }
}

/// Left-Riemann-style energy estimate in kWh.
///
/// Each gap between consecutive samples contributes its length in seconds
/// times the current of the sample that ends the gap, so the first sample
/// contributes nothing. The raw CT value is taken as watts, which assumes the
/// fixed voltage and power factor baked into the sensor calibration.
/// Non-finite contributions are skipped.
pub fn integrate_kwh(samples: &[Reading]) -> f64 {
    samples
        .windows(2)
        .map(|pair| {
            let elapsed = elapsed_seconds(pair[0].timestamp, pair[1].timestamp);
            elapsed * pair[1].current / WATTS_PER_KILOWATT / SECONDS_PER_HOUR
        })
        .filter(|kwh| kwh.is_finite())
        .fold(0.0, |total, kwh| total + kwh)
}

fn elapsed_seconds(previous: DateTime<Utc>, next: DateTime<Utc>) -> f64 {
    let delta = next - previous;
    delta
        .num_microseconds()
        .map(|micros| micros as f64 / 1_000_000.0)
        .unwrap_or_else(|| delta.num_seconds() as f64)
}
