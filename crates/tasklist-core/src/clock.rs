use std::cell::Cell;

use chrono::{Local, Utc};

/// en-US `toLocaleString` shape, e.g. `10/17/2026, 3:04:05 PM`.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Source of time for id minting and display timestamps.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;

    /// Current local time rendered for display.
    fn timestamp(&self) -> String;
}

/// Wall clock backed by `chrono::Local`.
#[derive(Debug, Clone)]
pub struct SystemClock {
    format: String,
}

impl SystemClock {
    pub fn with_format(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
    }

    fn timestamp(&self) -> String {
        Local::now().format(&self.format).to_string()
    }
}

/// Deterministic clock for tests and replays. Every reading advances it by one tick.
#[derive(Debug)]
pub struct FixedClock {
    millis: Cell<u64>,
}

impl FixedClock {
    pub fn starting_at(millis: u64) -> Self {
        Self {
            millis: Cell::new(millis),
        }
    }

    fn tick(&self) -> u64 {
        let current = self.millis.get();
        self.millis.set(current + 1);
        current
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.tick()
    }

    fn timestamp(&self) -> String {
        format!("t{}", self.tick())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances_on_every_reading() {
        let clock = FixedClock::starting_at(10);
        assert_eq!(clock.now_millis(), 10);
        assert_eq!(clock.timestamp(), "t11");
        assert_eq!(clock.now_millis(), 12);
    }

    #[test]
    fn system_clock_uses_configured_format() {
        let clock = SystemClock::with_format("%Y");
        let year = clock.timestamp();
        assert_eq!(year.len(), 4);
        assert!(year.chars().all(|c| c.is_ascii_digit()));
        assert!(clock.now_millis() > 1_600_000_000_000);
    }
}
