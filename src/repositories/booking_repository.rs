//! SQL access for the `bookings` table.
//!
//! The listing filter is table-driven from [`BookingState`]: CURRENT covers
//! `start <= now <= end`, PAST `end < now`, FUTURE `start > now`.

use crate::{
    models::{
        booking::{Booking, BookingRow, BookingStatus},
        page::Page,
    },
    services::booking_rules::BookingState,
};
use chrono::NaiveDateTime;
use sqlx::{QueryBuilder, SqliteConnection, sqlite::Sqlite};

const BOOKING_COLUMNS: &str = "id, item_id, booker_id, start_time, end_time, status";

const BOOKING_SELECT: &str = "SELECT b.id, b.start_time, b.end_time, b.status,
        i.id AS item_id, i.name AS item_name, i.description AS item_description,
        i.available AS item_available, i.owner_id AS item_owner_id,
        i.request_id AS item_request_id,
        u.id AS booker_id, u.name AS booker_name, u.email AS booker_email
     FROM bookings b
     JOIN items i ON i.id = b.item_id
     JOIN users u ON u.id = b.booker_id";

/// Whose bookings a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingScope {
    /// Bookings made by this user.
    Booker(i64),
    /// Bookings on items owned by this user.
    Owner(i64),
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<Option<BookingRow>> {
    sqlx::query_as::<_, BookingRow>(&format!("{BOOKING_SELECT} WHERE b.id = ?"))
        .bind(id)
        .fetch_optional(conn)
        .await
}

/// Insert a booking and return its id.
pub async fn insert(
    conn: &mut SqliteConnection,
    item_id: i64,
    booker_id: i64,
    start: NaiveDateTime,
    end: NaiveDateTime,
    status: BookingStatus,
) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO bookings (item_id, booker_id, start_time, end_time, status)
         VALUES (?, ?, ?, ?, ?)
         RETURNING id",
    )
    .bind(item_id)
    .bind(booker_id)
    .bind(start)
    .bind(end)
    .bind(status.as_str())
    .fetch_one(conn)
    .await
}

/// Move a waiting booking to `status`. Returns 0 when the booking is no longer waiting.
pub async fn set_status_if_waiting(
    conn: &mut SqliteConnection,
    id: i64,
    status: BookingStatus,
) -> sqlx::Result<u64> {
    let result = sqlx::query("UPDATE bookings SET status = ? WHERE id = ? AND status = 'WAITING'")
        .bind(status.as_str())
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

/// Active (waiting or approved) bookings on `item_id` intersecting `[start, end]`, bounds inclusive.
pub async fn find_overlapping(
    conn: &mut SqliteConnection,
    item_id: i64,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> sqlx::Result<Vec<Booking>> {
    sqlx::query_as::<_, Booking>(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings
         WHERE item_id = ?
           AND start_time <= ?
           AND end_time >= ?
           AND status IN ('WAITING', 'APPROVED')"
    ))
    .bind(item_id)
    .bind(end)
    .bind(start)
    .fetch_all(conn)
    .await
}

pub async fn find_latest_approved_before(
    conn: &mut SqliteConnection,
    item_id: i64,
    now: NaiveDateTime,
) -> sqlx::Result<Option<Booking>> {
    sqlx::query_as::<_, Booking>(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings
         WHERE item_id = ? AND status = 'APPROVED' AND start_time < ?
         ORDER BY start_time DESC, id DESC LIMIT 1"
    ))
    .bind(item_id)
    .bind(now)
    .fetch_optional(conn)
    .await
}

pub async fn find_earliest_approved_after(
    conn: &mut SqliteConnection,
    item_id: i64,
    now: NaiveDateTime,
) -> sqlx::Result<Option<Booking>> {
    sqlx::query_as::<_, Booking>(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings
         WHERE item_id = ? AND status = 'APPROVED' AND start_time > ?
         ORDER BY start_time ASC, id ASC LIMIT 1"
    ))
    .bind(item_id)
    .bind(now)
    .fetch_optional(conn)
    .await
}

/// Approved bookings for a batch of items, newest start first.
pub async fn find_approved_for_items(
    conn: &mut SqliteConnection,
    item_ids: &[i64],
) -> sqlx::Result<Vec<Booking>> {
    if item_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE status = 'APPROVED' AND item_id IN ("
    ));
    let mut ids = builder.separated(", ");
    for id in item_ids {
        ids.push_bind(*id);
    }
    ids.push_unseparated(") ORDER BY start_time DESC");

    builder.build_query_as::<Booking>().fetch_all(conn).await
}

/// True when `booker_id` holds an approved booking on `item_id` that ended before `now`.
pub async fn has_completed_rental(
    conn: &mut SqliteConnection,
    item_id: i64,
    booker_id: i64,
    now: NaiveDateTime,
) -> sqlx::Result<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM bookings
         WHERE item_id = ? AND booker_id = ? AND status = 'APPROVED' AND end_time < ?",
    )
    .bind(item_id)
    .bind(booker_id)
    .bind(now)
    .fetch_one(conn)
    .await?;
    Ok(count > 0)
}

/// List bookings for `scope` in the temporal bucket `state`, newest start first.
pub async fn list(
    conn: &mut SqliteConnection,
    scope: BookingScope,
    state: BookingState,
    now: NaiveDateTime,
    page: Page,
) -> sqlx::Result<Vec<BookingRow>> {
    let mut builder = QueryBuilder::<Sqlite>::new(BOOKING_SELECT);

    match scope {
        BookingScope::Booker(id) => builder.push(" WHERE b.booker_id = ").push_bind(id),
        BookingScope::Owner(id) => builder.push(" WHERE i.owner_id = ").push_bind(id),
    };

    match state {
        BookingState::All => &mut builder,
        BookingState::Current => builder
            .push(" AND b.start_time <= ")
            .push_bind(now)
            .push(" AND b.end_time >= ")
            .push_bind(now),
        BookingState::Past => builder.push(" AND b.end_time < ").push_bind(now),
        BookingState::Future => builder.push(" AND b.start_time > ").push_bind(now),
        BookingState::Waiting => builder
            .push(" AND b.status = ")
            .push_bind(BookingStatus::Waiting.as_str()),
        BookingState::Rejected => builder
            .push(" AND b.status = ")
            .push_bind(BookingStatus::Rejected.as_str()),
    };

    builder.push(" ORDER BY b.start_time DESC, b.id DESC LIMIT ");
    builder.push_bind(page.limit());
    builder.push(" OFFSET ");
    builder.push_bind(page.offset());

    builder.build_query_as::<BookingRow>().fetch_all(conn).await
}
