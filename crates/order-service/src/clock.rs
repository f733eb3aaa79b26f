//! Wall-clock access and local-midnight arithmetic.
//!
//! Timestamps carry the UTC offset they were read with. The next midnight is
//! computed in that offset, so a sweep triggered at 23:00+02:00 waits one hour.

use chrono::{DateTime, Days, FixedOffset, Local, NaiveTime, TimeDelta, TimeZone};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Source of the current local time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// The host's local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl ManualClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now: Mutex::new(now) }
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The first instant strictly after `now` whose local time of day is `at`.
pub fn next_occurrence(now: DateTime<FixedOffset>, at: NaiveTime) -> DateTime<FixedOffset> {
    let today = now.date_naive().and_time(at);
    let candidate = if today > now.naive_local() {
        Some(today)
    } else {
        today.checked_add_days(Days::new(1))
    };

    candidate
        .and_then(|local| now.offset().from_local_datetime(&local).single())
        .unwrap_or_else(|| now + TimeDelta::days(1))
}

/// The next local midnight strictly after `now`.
pub fn next_local_midnight(now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    next_occurrence(now, NaiveTime::MIN)
}

/// Time left until `then`, zero if it already passed.
pub fn duration_until(now: DateTime<FixedOffset>, then: DateTime<FixedOffset>) -> Duration {
    (then - now).to_std().unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(offset_hours: i32, y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(offset_hours * 3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
    }

    #[test]
    fn midnight_is_computed_in_the_recorded_offset() {
        let now = at(2, 2024, 5, 6, 23, 0);
        let midnight = next_local_midnight(now);
        assert_eq!(midnight, at(2, 2024, 5, 7, 0, 0));
        assert_eq!(duration_until(now, midnight), Duration::from_secs(3600));
    }

    #[test]
    fn trigger_at_midnight_waits_a_full_day() {
        let now = at(0, 2024, 12, 31, 0, 0);
        assert_eq!(next_local_midnight(now), at(0, 2025, 1, 1, 0, 0));
    }

    #[test]
    fn next_occurrence_rolls_over_when_time_passed() {
        let at_nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert_eq!(next_occurrence(at(0, 2024, 5, 6, 8, 0), at_nine), at(0, 2024, 5, 6, 9, 0));
        assert_eq!(next_occurrence(at(0, 2024, 5, 6, 10, 0), at_nine), at(0, 2024, 5, 7, 9, 0));
    }

    #[test]
    fn manual_clock_moves_when_set() {
        let clock = ManualClock::new(at(0, 2024, 5, 6, 8, 0));
        clock.set(at(0, 2024, 5, 11, 8, 0));
        assert_eq!(clock.now(), at(0, 2024, 5, 11, 8, 0));
        assert_eq!(duration_until(clock.now(), at(0, 2024, 5, 6, 8, 0)), Duration::ZERO);
    }
}
