//! Recurring daily time-window evaluation for the rakeback override.
//!
//! The window is compared on UTC minute-of-day only; dates and seconds are
//! ignored so the window repeats every day. When both boundaries are set
//! and `end <= start`, the window spans midnight.

use chrono::{DateTime, NaiveTime, Timelike, Utc};

use crate::models::rakeback_override::GlobalRakebackOverride;

/// Reduces a time-of-day to minutes since midnight, dropping seconds.
fn minute_of_day(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

/// Returns whether `now` falls inside the daily window.
///
/// The four cases:
/// - no boundaries: always inside;
/// - both set, `end <= start`: spans midnight, inside when
///   `now >= start || now <= end`;
/// - both set, `end > start`: same-day window, inside when
///   `now >= start && now <= end`;
/// - only one boundary set: inside when on the bounded side of it.
pub fn window_contains(
    now: NaiveTime,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
) -> bool {
    let now = minute_of_day(now);
    let start = start_time.map(minute_of_day);
    let end = end_time.map(minute_of_day);

    match (start, end) {
        (None, None) => true,
        (Some(start), Some(end)) => {
            if end <= start {
                now >= start || now <= end
            } else {
                now >= start && now <= end
            }
        }
        (Some(start), None) => now >= start,
        (None, Some(end)) => now <= end,
    }
}

/// Whether the override applies at `now`: it must be flagged active and
/// `now` must fall inside its daily window.
pub fn is_override_active(override_: &GlobalRakebackOverride, now: DateTime<Utc>) -> bool {
    override_.is_active && window_contains(now.time(), override_.start_time, override_.end_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_no_boundaries_always_inside() {
        assert!(window_contains(t(0, 0), None, None));
        assert!(window_contains(t(12, 0), None, None));
        assert!(window_contains(t(23, 59), None, None));
    }

    #[test]
    fn test_same_day_window() {
        let start = Some(t(10, 0));
        let end = Some(t(14, 0));

        assert!(window_contains(t(12, 0), start, end));
        assert!(window_contains(t(10, 0), start, end));
        assert!(window_contains(t(14, 0), start, end));
        assert!(!window_contains(t(9, 59), start, end));
        assert!(!window_contains(t(14, 1), start, end));
    }

    #[test]
    fn test_midnight_spanning_window() {
        let start = Some(t(22, 0));
        let end = Some(t(2, 0));

        assert!(window_contains(t(23, 30), start, end));
        assert!(window_contains(t(1, 30), start, end));
        assert!(window_contains(t(22, 0), start, end));
        assert!(window_contains(t(2, 0), start, end));
        assert!(!window_contains(t(12, 0), start, end));
        assert!(!window_contains(t(21, 59), start, end));
        assert!(!window_contains(t(2, 1), start, end));
    }

    #[test]
    fn test_equal_boundaries_span_midnight() {
        // end == start triggers the spanning branch, so every minute of the
        // day is inside.
        let start = Some(t(8, 0));
        let end = Some(t(8, 0));
        assert!(window_contains(t(8, 0), start, end));
        assert!(window_contains(t(20, 0), start, end));
        assert!(window_contains(t(7, 59), start, end));
    }

    #[test]
    fn test_only_start_boundary() {
        let start = Some(t(18, 0));
        assert!(window_contains(t(18, 0), start, None));
        assert!(window_contains(t(23, 59), start, None));
        assert!(!window_contains(t(17, 59), start, None));
    }

    #[test]
    fn test_only_end_boundary() {
        let end = Some(t(6, 0));
        assert!(window_contains(t(0, 0), None, end));
        assert!(window_contains(t(6, 0), None, end));
        assert!(!window_contains(t(6, 1), None, end));
    }

    #[test]
    fn test_seconds_are_ignored() {
        let start = Some(t(10, 0));
        let end = Some(t(14, 0));
        let just_past_end = NaiveTime::from_hms_opt(14, 0, 59).unwrap();
        assert!(window_contains(just_past_end, start, end));
    }

    fn override_with_window(
        is_active: bool,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
    ) -> GlobalRakebackOverride {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        GlobalRakebackOverride {
            id: Uuid::new_v4(),
            is_active,
            rakeback_percentage: dec!(15),
            start_time,
            end_time,
            created_by: None,
            updated_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_inactive_override_never_applies() {
        let override_ = override_with_window(false, None, None);
        let noon = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        assert!(!is_override_active(&override_, noon));
    }

    #[test]
    fn test_active_override_without_window_always_applies() {
        let override_ = override_with_window(true, None, None);
        for hour in [0, 6, 12, 18, 23] {
            let now = Utc.with_ymd_and_hms(2025, 6, 1, hour, 30, 0).unwrap();
            assert!(is_override_active(&override_, now));
        }
    }

    #[test]
    fn test_active_override_respects_window() {
        let override_ = override_with_window(true, Some(t(22, 0)), Some(t(2, 0)));

        let late = Utc.with_ymd_and_hms(2025, 6, 1, 23, 30, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2025, 6, 2, 1, 30, 0).unwrap();
        let noon = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

        assert!(is_override_active(&override_, late));
        assert!(is_override_active(&override_, early));
        assert!(!is_override_active(&override_, noon));
    }
}
