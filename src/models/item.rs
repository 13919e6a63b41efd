//! Represents a lendable item and its aggregated views.

use crate::models::{booking::BookingShort, comment::CommentView};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An item owned by a user and possibly created in response to an item request.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Database identity.
    pub id: i64,

    /// Short name shown in search results.
    pub name: String,

    /// Free-form description.
    pub description: String,

    /// Whether the item can currently be booked.
    pub available: bool,

    /// Owning user.
    pub owner_id: i64,

    /// Request this item was listed in response to, if any.
    pub request_id: Option<i64>,
}

/// Fields needed to list a new item.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
}

/// Partial update for an item. Blank strings are ignored.
#[derive(Debug, Default, Clone)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

impl ItemPatch {
    /// Apply present, non-blank fields onto `item`.
    pub fn apply(self, item: &mut Item) {
        if let Some(name) = self.name.filter(|n| !n.trim().is_empty()) {
            item.name = name;
        }
        if let Some(description) = self.description.filter(|d| !d.trim().is_empty()) {
            item.description = description;
        }
        if let Some(available) = self.available {
            item.available = available;
        }
    }
}

/// Item as seen through `GET /items/{id}` and the owner listing.
///
/// `last_booking`/`next_booking` are only populated for the owner.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub owner_id: i64,
    pub request_id: Option<i64>,
    pub last_booking: Option<BookingShort>,
    pub next_booking: Option<BookingShort>,
    pub comments: Vec<CommentView>,
}

impl ItemView {
    pub fn new(
        item: Item,
        last_booking: Option<BookingShort>,
        next_booking: Option<BookingShort>,
        comments: Vec<CommentView>,
    ) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            owner_id: item.owner_id,
            request_id: item.request_id,
            last_booking,
            next_booking,
            comments,
        }
    }
}
