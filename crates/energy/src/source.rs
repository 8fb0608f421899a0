use chrono::{DateTime, Utc};

use crate::reading::Reading;

/// Read-only access to stored readings.
pub trait ReadingSource {
    type Error;

    /// All readings with `timestamp >= since`, oldest first.
    fn readings_since(&self, since: DateTime<Utc>) -> Result<Vec<Reading>, Self::Error>;
}

impl<S: ReadingSource + ?Sized> ReadingSource for &S {
    type Error = S::Error;

    fn readings_since(&self, since: DateTime<Utc>) -> Result<Vec<Reading>, Self::Error> {
        (**self).readings_since(since)
    }
}

/// Wall-clock provider.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
