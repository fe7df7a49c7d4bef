// SPDX-FileCopyrightText: 2026 Habitgrid Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Epoch-day and timestamp helpers.
//!
//! An epoch day is the integer count of days since 1970-01-01. Check dates
//! are stored this way so the same calendar day hashes to the same key
//! regardless of time zone.

use chrono::{NaiveDate, TimeDelta, Utc};

/// Days in one calendar week.
pub const DAYS_PER_WEEK: i64 = 7;

/// Convert a calendar date to its epoch day.
pub fn to_epoch_day(date: NaiveDate) -> i64 {
    // NaiveDate::default() is 1970-01-01.
    (date - NaiveDate::default()).num_days()
}

/// Convert an epoch day back to a calendar date.
///
/// Returns `None` if the day count is outside chrono's representable range.
pub fn from_epoch_day(day: i64) -> Option<NaiveDate> {
    NaiveDate::default().checked_add_signed(TimeDelta::try_days(day)?)
}

/// Current wall-clock time as epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_day_zero_is_unix_epoch() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(to_epoch_day(epoch), 0);
        assert_eq!(from_epoch_day(0), Some(epoch));
    }

    #[test]
    fn round_trips_a_modern_date() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let day = to_epoch_day(date);
        assert_eq!(day, 19875);
        assert_eq!(from_epoch_day(day), Some(date));
    }

    #[test]
    fn pre_epoch_dates_are_negative() {
        let date = NaiveDate::from_ymd_opt(1969, 12, 31).unwrap();
        assert_eq!(to_epoch_day(date), -1);
    }

    #[test]
    fn out_of_range_day_is_none() {
        assert!(from_epoch_day(i64::MAX).is_none());
    }
}
