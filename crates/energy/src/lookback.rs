use std::fmt;

use serde::{Deserialize, Serialize};

pub const MIN_LOOKBACK_DAYS: u32 = 1;
pub const MAX_LOOKBACK_DAYS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LookbackError {
    #[error("lookback must be between 1 and 100 days, got {0}")]
    OutOfRange(u32),
}

/// Number of days to look back from now, within `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Lookback(u32);

impl Lookback {
    pub const MIN: Lookback = Lookback(MIN_LOOKBACK_DAYS);
    pub const MAX: Lookback = Lookback(MAX_LOOKBACK_DAYS);

    pub fn new(days: u32) -> Result<Self, LookbackError> {
        if (MIN_LOOKBACK_DAYS..=MAX_LOOKBACK_DAYS).contains(&days) {
            Ok(Self(days))
        } else {
            Err(LookbackError::OutOfRange(days))
        }
    }

    /// Like [`Lookback::new`] but pins out-of-range values to the nearest bound.
    pub fn clamped(days: u32) -> Self {
        Self(days.clamp(MIN_LOOKBACK_DAYS, MAX_LOOKBACK_DAYS))
    }

    pub fn days(self) -> u32 {
        self.0
    }

    pub fn duration(self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.0))
    }

    /// Moves by `delta` days, stopping at the bounds.
    pub fn step(self, delta: i32) -> Self {
        let days = i64::from(self.0) + i64::from(delta);
        Self::clamped(days.clamp(0, i64::from(u32::MAX)) as u32)
    }
}

impl Default for Lookback {
    fn default() -> Self {
        Self::MIN
    }
}

impl TryFrom<u32> for Lookback {
    type Error = LookbackError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        Self::new(days)
    }
}

impl From<Lookback> for u32 {
    fn from(lookback: Lookback) -> Self {
        lookback.0
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 1 {
            write!(f, "1 day")
        } else {
            write!(f, "{} days", self.0)
        }
    }
}
