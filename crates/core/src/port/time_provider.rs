// Time Provider Port (for testability)

use chrono::NaiveDateTime;

/// Time provider interface (allows mocking in tests)
pub trait TimeProvider: Send + Sync {
    /// Current local wall-clock time
    fn now_local(&self) -> NaiveDateTime;

    /// Current local hour as `YYYYMMDDHH`
    fn hour_stamp(&self) -> String {
        self.now_local().format("%Y%m%d%H").to_string()
    }
}

/// System time provider (production)
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_local(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Frozen clock (tests, token tooling)
pub struct FixedTimeProvider(pub NaiveDateTime);

impl TimeProvider for FixedTimeProvider {
    fn now_local(&self) -> NaiveDateTime {
        self.0
    }
}
