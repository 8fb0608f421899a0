//! Energy aggregation for heat pump current-transformer readings.
//!
//! The crate turns a time-ordered series of raw CT readings into a
//! down-sampled series for charting and a kWh/cost summary. Fetching the
//! readings and deciding when to refresh are left to the caller through the
//! [`ReadingSource`] and [`Clock`] traits and the [`Trigger`] passed to
//! [`refresh`].

mod aggregate;
mod lookback;
mod reading;
mod refresh;
mod source;
mod stride;
mod summary;

pub use aggregate::{
    apply_noise_floor, downsample, integrate_kwh, Aggregation, Aggregator, EnergyConfig,
    DEFAULT_COST_PER_KWH, DEFAULT_NOISE_FLOOR, DEFAULT_TIMEZONE,
};
pub use lookback::{Lookback, LookbackError, MAX_LOOKBACK_DAYS, MIN_LOOKBACK_DAYS};
pub use reading::{Reading, SampledSeries};
pub use refresh::{format_last_updated, refresh, Snapshot, Trigger};
pub use source::{Clock, ReadingSource, SystemClock};
pub use stride::{stride_for_days, DEFAULT_MAX_STRIDE};
pub use summary::EnergySummary;
