//! Shared application state handed to every handler.

use crate::services::{
    booking_service::BookingService, item_service::ItemService,
    request_service::RequestService, user_service::UserService,
};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<SqlitePool>,
    pub users: UserService,
    pub items: ItemService,
    pub bookings: BookingService,
    pub requests: RequestService,
}

impl AppState {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self {
            users: UserService::new(db.clone()),
            items: ItemService::new(db.clone()),
            bookings: BookingService::new(db.clone()),
            requests: RequestService::new(db.clone()),
            db,
        }
    }
}
