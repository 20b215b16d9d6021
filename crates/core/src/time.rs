use chrono::{DateTime, Utc};

/// Time source threaded through the services so registration, result,
/// and follow-up timestamps stay deterministic under test.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    /// Real wall-clock time.
    #[default]
    System,
    /// A clock pinned to a single instant.
    Pinned(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock pinned at the given timestamp.
    #[must_use]
    pub fn pinned(at: DateTime<Utc>) -> Self {
        Self::Pinned(at)
    }

    /// Returns the current time according to the clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Pinned(at) => *at,
        }
    }
}

/// Timestamp used by the pinned test clock (2023-11-14T22:13:20Z).
const PINNED_TIMESTAMP: i64 = 1_700_000_000;

/// Returns the deterministic `DateTime<Utc>` the pinned test clock reports.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(PINNED_TIMESTAMP, 0).unwrap_or_default()
}

/// Returns a `Clock` pinned at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::pinned(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_clock_reports_its_instant() {
        let clock = fixed_clock();
        assert_eq!(clock.now(), fixed_now());
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn system_clock_moves_forward() {
        let clock = Clock::default();
        let before = Utc::now();
        assert!(clock.now() >= before);
    }
}
