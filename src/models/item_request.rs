//! A user's ask for an item that is not in the catalogue yet.

use crate::models::{item::Item, user::User};
use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// An item request joined with its requester.
#[derive(Clone, FromRow, Debug)]
pub struct ItemRequestRow {
    pub id: i64,
    pub description: String,
    pub created: NaiveDateTime,
    pub requester_id: i64,
    pub requester_name: String,
    pub requester_email: String,
}

/// Request plus every item listed in response to it.
#[derive(Serialize, Clone, Debug)]
pub struct ItemRequestView {
    pub id: i64,
    pub description: String,
    pub requester: User,
    pub created: NaiveDateTime,
    pub items: Vec<Item>,
}

impl ItemRequestView {
    pub fn new(row: ItemRequestRow, items: Vec<Item>) -> Self {
        Self {
            id: row.id,
            description: row.description,
            requester: User {
                id: row.requester_id,
                name: row.requester_name,
                email: row.requester_email,
            },
            created: row.created,
            items,
        }
    }
}
