use chrono::Utc;

///
/// Clock
///
/// Source of the synchronization timestamp stamped onto list responses.
///

pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

///
/// SystemClock
///

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

///
/// FixedClock
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_after_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }

    #[test]
    fn fixed_clock_is_fixed() {
        let clock = FixedClock(42);
        assert_eq!(clock.now_millis(), clock.now_millis());
        assert_eq!(clock.now_millis(), 42);
    }
}
