//! Represents a time-ranged reservation of an item.

use crate::models::{item::Item, user::User};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Lifecycle of a booking. A booking starts `Waiting` and is decided once.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
        }
    }

    /// Outcome of the owner's decision on a waiting booking.
    pub fn decided(approved: bool) -> Self {
        if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        }
    }
}

/// A booking row as stored in the `bookings` table.
#[derive(Serialize, Clone, FromRow, Debug, PartialEq, Eq)]
pub struct Booking {
    pub id: i64,
    pub item_id: i64,
    pub booker_id: i64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: BookingStatus,
}

/// A booking joined with its item and booker, as returned by the listing queries.
#[derive(Clone, FromRow, Debug)]
pub struct BookingRow {
    pub id: i64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: BookingStatus,
    pub item_id: i64,
    pub item_name: String,
    pub item_description: String,
    pub item_available: bool,
    pub item_owner_id: i64,
    pub item_request_id: Option<i64>,
    pub booker_id: i64,
    pub booker_name: String,
    pub booker_email: String,
}

/// Full booking representation returned by the `/bookings` endpoints.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    pub id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub status: BookingStatus,
    pub booker: User,
    pub item: Item,
}

impl From<BookingRow> for BookingView {
    fn from(row: BookingRow) -> Self {
        Self {
            id: row.id,
            start: row.start_time,
            end: row.end_time,
            status: row.status,
            booker: User {
                id: row.booker_id,
                name: row.booker_name,
                email: row.booker_email,
            },
            item: Item {
                id: row.item_id,
                name: row.item_name,
                description: row.item_description,
                available: row.item_available,
                owner_id: row.item_owner_id,
                request_id: row.item_request_id,
            },
        }
    }
}

/// Compact booking reference embedded in item views as last/next booking.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingShort {
    pub id: i64,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub booker_id: i64,
    pub status: BookingStatus,
}

impl From<&Booking> for BookingShort {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id,
            start: booking.start_time,
            end: booking.end_time,
            booker_id: booking.booker_id,
            status: booking.status,
        }
    }
}
