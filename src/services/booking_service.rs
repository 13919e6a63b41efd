//! src/services/booking_service.rs
//!
//! BookingService: creation, owner decision and listing of bookings.
//! Every mutating call runs inside one SQLite transaction so the overlap check
//! and the insert (or the status check and the update) cannot interleave with
//! a concurrent writer.

use crate::{
    models::{
        booking::{BookingStatus, BookingView},
        page::Page,
    },
    repositories::{
        booking_repository::{self, BookingScope},
        item_repository, user_repository,
    },
    services::{
        booking_rules::{self, BookingState},
        error::{ServiceError, ServiceResult},
        now,
    },
};
use chrono::NaiveDateTime;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct BookingService {
    pub db: Arc<SqlitePool>,
}

impl BookingService {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// Place a waiting booking on `item_id` for `[start, end]`.
    ///
    /// Self-booking is reported as not found, matching the public API.
    pub async fn create_booking(
        &self,
        booker_id: i64,
        item_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> ServiceResult<BookingView> {
        let mut tx = self.db.begin().await?;

        if !user_repository::exists(&mut tx, booker_id).await? {
            return Err(ServiceError::user_not_found(booker_id));
        }
        let item = item_repository::find_by_id(&mut tx, item_id)
            .await?
            .ok_or_else(|| ServiceError::item_not_found(item_id))?;

        if !item.available {
            return Err(ServiceError::Unavailable(format!(
                "item {item_id} is not available for booking"
            )));
        }
        if !booking_rules::is_valid_range(start, end) {
            return Err(ServiceError::Unavailable(
                "booking end must be after its start".into(),
            ));
        }
        if item.owner_id == booker_id {
            return Err(ServiceError::NotFound(format!(
                "owner cannot book their own item {item_id}"
            )));
        }

        let overlapping = booking_repository::find_overlapping(&mut tx, item_id, start, end).await?;
        if !overlapping.is_empty() {
            debug!(
                "booking {}..{} on item {} clashes with {:?}",
                start,
                end,
                item_id,
                overlapping.iter().map(|b| b.id).collect::<Vec<_>>()
            );
            return Err(ServiceError::Unavailable(format!(
                "item {item_id} is already booked for the requested dates"
            )));
        }

        let id = booking_repository::insert(
            &mut tx,
            item_id,
            booker_id,
            start,
            end,
            BookingStatus::Waiting,
        )
        .await?;
        let row = booking_repository::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| ServiceError::booking_not_found(id))?;
        tx.commit().await?;

        info!("user {} booked item {} as booking {}", booker_id, item_id, id);
        Ok(row.into())
    }

    /// Approve or reject a waiting booking. Only the item owner may decide, once.
    pub async fn approve_booking(
        &self,
        owner_id: i64,
        booking_id: i64,
        approved: bool,
    ) -> ServiceResult<BookingView> {
        let mut tx = self.db.begin().await?;

        if !user_repository::exists(&mut tx, owner_id).await? {
            return Err(ServiceError::user_not_found(owner_id));
        }
        let row = booking_repository::find_by_id(&mut tx, booking_id)
            .await?
            .ok_or_else(|| ServiceError::booking_not_found(booking_id))?;

        if row.item_owner_id != owner_id {
            return Err(ServiceError::NotFound(format!(
                "user {owner_id} does not own the item of booking {booking_id}"
            )));
        }

        let not_waiting = || {
            ServiceError::Unavailable(format!(
                "booking {booking_id} is not awaiting confirmation"
            ))
        };
        if row.status != BookingStatus::Waiting {
            return Err(not_waiting());
        }

        let status = BookingStatus::decided(approved);
        if booking_repository::set_status_if_waiting(&mut tx, booking_id, status).await? == 0 {
            return Err(not_waiting());
        }
        tx.commit().await?;

        info!("booking {} set to {} by owner {}", booking_id, status.as_str(), owner_id);
        let mut view = BookingView::from(row);
        view.status = status;
        Ok(view)
    }

    /// Visible to the booker and the item owner only; anyone else gets not found.
    pub async fn get_booking(&self, caller_id: i64, booking_id: i64) -> ServiceResult<BookingView> {
        let mut conn = self.db.acquire().await?;

        if !user_repository::exists(&mut conn, caller_id).await? {
            return Err(ServiceError::user_not_found(caller_id));
        }
        let row = booking_repository::find_by_id(&mut conn, booking_id)
            .await?
            .ok_or_else(|| ServiceError::booking_not_found(booking_id))?;

        if row.booker_id != caller_id && row.item_owner_id != caller_id {
            return Err(ServiceError::NotFound(format!(
                "booking {booking_id} is not visible to user {caller_id}"
            )));
        }

        Ok(row.into())
    }

    pub async fn list_for_booker(
        &self,
        booker_id: i64,
        state: BookingState,
        page: Page,
    ) -> ServiceResult<Vec<BookingView>> {
        let mut conn = self.db.acquire().await?;

        if !user_repository::exists(&mut conn, booker_id).await? {
            return Err(ServiceError::user_not_found(booker_id));
        }

        let rows = booking_repository::list(
            &mut conn,
            BookingScope::Booker(booker_id),
            state,
            now(),
            page,
        )
        .await?;

        info!("listed {} {} bookings of booker {}", rows.len(), state, booker_id);
        Ok(rows.into_iter().map(BookingView::from).collect())
    }

    /// Bookings on the caller's items. Fails when the caller owns nothing.
    pub async fn list_for_owner(
        &self,
        owner_id: i64,
        state: BookingState,
        page: Page,
    ) -> ServiceResult<Vec<BookingView>> {
        let mut conn = self.db.acquire().await?;

        if !user_repository::exists(&mut conn, owner_id).await? {
            return Err(ServiceError::user_not_found(owner_id));
        }
        if item_repository::count_by_owner(&mut conn, owner_id).await? == 0 {
            return Err(ServiceError::NotFound(format!(
                "user {owner_id} does not own any items"
            )));
        }

        let rows = booking_repository::list(
            &mut conn,
            BookingScope::Owner(owner_id),
            state,
            now(),
            page,
        )
        .await?;

        info!("listed {} {} bookings for owner {}", rows.len(), state, owner_id);
        Ok(rows.into_iter().map(BookingView::from).collect())
    }
}
