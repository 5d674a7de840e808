use std::sync::Mutex;

use jiff::{SignedDuration, Zoned};

/// Source of the current local time used for generated filenames
pub trait Clock: Send + Sync {
    fn now(&self) -> Zoned;
}

/// Wall clock in the system time zone
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Zoned {
        Zoned::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Zoned>,
}

impl ManualClock {
    pub const fn new(start: Zoned) -> Self {
        Self { now: Mutex::new(start) }
    }

    /// Move the clock forward by `by`
    pub fn advance(&self, by: SignedDuration) {
        let mut now = self.now.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *now = now.saturating_add(by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Zoned {
        self.now
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

/// Format a time as `YYYYMMDD_HHMMSS`
///
/// Second resolution: two names generated within the same second are equal.
pub fn compact_timestamp(now: &Zoned) -> String {
    now.strftime("%Y%m%d_%H%M%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noon() -> Zoned {
        "2026-10-19T12:00:00[UTC]".parse().unwrap()
    }

    #[test]
    fn compact_timestamp_format() {
        assert_eq!(compact_timestamp(&noon()), "20261019_120000");
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(noon());
        assert_eq!(compact_timestamp(&clock.now()), "20261019_120000");

        clock.advance(SignedDuration::from_secs(1));
        assert_eq!(compact_timestamp(&clock.now()), "20261019_120001");
    }
}
