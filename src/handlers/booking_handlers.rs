//! HTTP handlers for `/bookings`.

use crate::{
    errors::AppError,
    handlers::extractors::{AppJson, AppPath, AppQuery, SharerId},
    models::{booking::BookingView, page::Page},
    services::{booking_rules::BookingState, now},
    state::AppState,
};
use axum::{
    Json,
    extract::State,
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingReq {
    #[validate(required)]
    pub item_id: Option<i64>,
    #[validate(required)]
    pub start: Option<NaiveDateTime>,
    #[validate(required)]
    pub end: Option<NaiveDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct ApproveQuery {
    pub approved: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BookingListQuery {
    pub state: Option<String>,
    #[validate(range(min = 0))]
    pub from: Option<i64>,
    #[validate(range(min = 1))]
    pub size: Option<i64>,
}

impl BookingListQuery {
    /// Validate the window and parse the state filter, `ALL` when absent.
    fn parse(&self) -> Result<(BookingState, Page), AppError> {
        self.validate()?;
        let state = match self.state.as_deref() {
            None => BookingState::All,
            Some(raw) => raw.parse::<BookingState>()?,
        };
        let page = Page::new(
            self.from.unwrap_or(0),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
        );
        Ok((state, page))
    }
}

/// `POST /bookings`
pub async fn create_booking(
    State(state): State<AppState>,
    SharerId(booker_id): SharerId,
    AppJson(req): AppJson<CreateBookingReq>,
) -> Result<Json<BookingView>, AppError> {
    req.validate()?;
    let (Some(item_id), Some(start), Some(end)) = (req.item_id, req.start, req.end) else {
        return Err(AppError::bad_request("itemId, start and end are required"));
    };

    let now = now();
    if start < now {
        return Err(AppError::bad_request("start must not be in the past"));
    }
    if end <= now {
        return Err(AppError::bad_request("end must be in the future"));
    }

    let booking = state
        .bookings
        .create_booking(booker_id, item_id, start, end)
        .await?;
    Ok(Json(booking))
}

/// `PATCH /bookings/{id}?approved=bool`
pub async fn approve_booking(
    State(state): State<AppState>,
    SharerId(owner_id): SharerId,
    AppPath(booking_id): AppPath<i64>,
    AppQuery(query): AppQuery<ApproveQuery>,
) -> Result<Json<BookingView>, AppError> {
    let booking = state
        .bookings
        .approve_booking(owner_id, booking_id, query.approved)
        .await?;
    Ok(Json(booking))
}

/// `GET /bookings/{id}`
pub async fn get_booking(
    State(state): State<AppState>,
    SharerId(caller_id): SharerId,
    AppPath(booking_id): AppPath<i64>,
) -> Result<Json<BookingView>, AppError> {
    Ok(Json(state.bookings.get_booking(caller_id, booking_id).await?))
}

/// `GET /bookings?state&from&size`
pub async fn list_booker_bookings(
    State(state): State<AppState>,
    SharerId(booker_id): SharerId,
    AppQuery(query): AppQuery<BookingListQuery>,
) -> Result<Json<Vec<BookingView>>, AppError> {
    let (filter, page) = query.parse()?;
    Ok(Json(
        state.bookings.list_for_booker(booker_id, filter, page).await?,
    ))
}

/// `GET /bookings/owner?state&from&size`
pub async fn list_owner_bookings(
    State(state): State<AppState>,
    SharerId(owner_id): SharerId,
    AppQuery(query): AppQuery<BookingListQuery>,
) -> Result<Json<Vec<BookingView>>, AppError> {
    let (filter, page) = query.parse()?;
    Ok(Json(
        state.bookings.list_for_owner(owner_id, filter, page).await?,
    ))
}
