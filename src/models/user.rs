//! A registered ShareIt member.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user who can own items, book other users' items and leave comments.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug, PartialEq, Eq)]
pub struct User {
    /// Database identity.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Contact email, unique across users.
    pub email: String,
}

/// Partial update for a user. `None` or empty fields leave the stored value untouched.
#[derive(Debug, Default, Clone)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}
