//! Pure booking rules: the listing state filter, date-range checks and the
//! last/next booking selection used by the owner item listing.
//!
//! Nothing in here touches the database. The temporal buckets themselves are
//! evaluated in SQL by `repositories::booking_repository::list`.

use crate::{
    models::booking::{Booking, BookingStatus},
    services::error::ServiceError,
};
use chrono::NaiveDateTime;
use std::{fmt, str::FromStr};

/// Temporal bucket requested by the booking listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingState {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    pub const VALUES: [BookingState; 6] = [
        BookingState::All,
        BookingState::Current,
        BookingState::Past,
        BookingState::Future,
        BookingState::Waiting,
        BookingState::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BookingState::All => "ALL",
            BookingState::Current => "CURRENT",
            BookingState::Past => "PAST",
            BookingState::Future => "FUTURE",
            BookingState::Waiting => "WAITING",
            BookingState::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for BookingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingState {
    type Err = ServiceError;

    /// Case-sensitive: `"waiting"` is rejected.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        BookingState::VALUES
            .into_iter()
            .find(|state| state.as_str() == value)
            .ok_or_else(|| ServiceError::InvalidArgument(format!("Unknown state: {value}")))
    }
}

/// A booking range is valid when it ends strictly after it starts.
pub fn is_valid_range(start: NaiveDateTime, end: NaiveDateTime) -> bool {
    end > start
}

/// Pick the last and next approved bookings relative to `now`.
///
/// Last is the approved booking with the latest start before `now`, next the
/// one with the earliest start after `now`. Input order does not matter.
pub fn last_and_next(
    bookings: &[Booking],
    now: NaiveDateTime,
) -> (Option<&Booking>, Option<&Booking>) {
    let approved = || {
        bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Approved)
    };

    let last = approved()
        .filter(|b| b.start_time < now)
        .max_by_key(|b| (b.start_time, b.id));
    let next = approved()
        .filter(|b| b.start_time > now)
        .min_by_key(|b| (b.start_time, b.id));

    (last, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 8, day)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .expect("valid timestamp")
    }

    fn booking(id: i64, start: NaiveDateTime, end: NaiveDateTime, status: BookingStatus) -> Booking {
        Booking {
            id,
            item_id: 1,
            booker_id: 2,
            start_time: start,
            end_time: end,
            status,
        }
    }

    #[test]
    fn parses_known_states_case_sensitively() {
        for state in BookingState::VALUES {
            assert_eq!(state.as_str().parse::<BookingState>().ok(), Some(state));
        }

        let err = "waiting".parse::<BookingState>().unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(ref msg) if msg == "Unknown state: waiting"));
        assert!("UNSUPPORTED_STATUS".parse::<BookingState>().is_err());
    }

    #[test]
    fn range_must_end_after_start() {
        assert!(is_valid_range(at(21, 11), at(22, 11)));
        assert!(!is_valid_range(at(21, 11), at(21, 11)));
        assert!(!is_valid_range(at(22, 11), at(21, 11)));
    }

    #[test]
    fn last_and_next_only_consider_approved_bookings() {
        let now = at(22, 0);
        let bookings = vec![
            booking(1, at(18, 0), at(19, 0), BookingStatus::Approved),
            booking(2, at(20, 0), at(21, 0), BookingStatus::Approved),
            booking(3, at(21, 0), at(21, 12), BookingStatus::Rejected),
            booking(4, at(26, 0), at(27, 0), BookingStatus::Approved),
            booking(5, at(24, 0), at(25, 0), BookingStatus::Approved),
            booking(6, at(23, 0), at(23, 12), BookingStatus::Waiting),
        ];

        let (last, next) = last_and_next(&bookings, now);

        assert_eq!(last.map(|b| b.id), Some(2));
        assert_eq!(next.map(|b| b.id), Some(5));
    }

    #[test]
    fn last_and_next_are_empty_without_candidates() {
        let now = at(22, 0);
        let bookings = vec![booking(1, at(21, 0), at(23, 0), BookingStatus::Waiting)];

        assert_eq!(last_and_next(&bookings, now), (None, None));
        assert_eq!(last_and_next(&[], now), (None, None));
    }
}
