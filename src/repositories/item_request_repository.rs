//! SQL access for the `item_requests` table.

use crate::models::{item_request::ItemRequestRow, page::Page};
use chrono::NaiveDateTime;
use sqlx::SqliteConnection;

const REQUEST_SELECT: &str = "SELECT r.id, r.description, r.created,
        u.id AS requester_id, u.name AS requester_name, u.email AS requester_email
     FROM item_requests r
     JOIN users u ON u.id = r.requester_id";

pub async fn find_by_id(
    conn: &mut SqliteConnection,
    id: i64,
) -> sqlx::Result<Option<ItemRequestRow>> {
    sqlx::query_as::<_, ItemRequestRow>(&format!("{REQUEST_SELECT} WHERE r.id = ?"))
        .bind(id)
        .fetch_optional(conn)
        .await
}

pub async fn exists(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<bool> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM item_requests WHERE id = ?")
        .bind(id)
        .fetch_one(conn)
        .await?;
    Ok(count > 0)
}

/// Insert a request and return its id.
pub async fn insert(
    conn: &mut SqliteConnection,
    requester_id: i64,
    description: &str,
    created: NaiveDateTime,
) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO item_requests (description, requester_id, created)
         VALUES (?, ?, ?)
         RETURNING id",
    )
    .bind(description)
    .bind(requester_id)
    .bind(created)
    .fetch_one(conn)
    .await
}

/// All requests made by `requester_id`, newest first.
pub async fn list_by_requester(
    conn: &mut SqliteConnection,
    requester_id: i64,
) -> sqlx::Result<Vec<ItemRequestRow>> {
    sqlx::query_as::<_, ItemRequestRow>(&format!(
        "{REQUEST_SELECT} WHERE r.requester_id = ? ORDER BY r.created DESC, r.id DESC"
    ))
    .bind(requester_id)
    .fetch_all(conn)
    .await
}

/// Requests made by anyone except `requester_id`, newest first.
pub async fn list_excluding(
    conn: &mut SqliteConnection,
    requester_id: i64,
    page: Page,
) -> sqlx::Result<Vec<ItemRequestRow>> {
    sqlx::query_as::<_, ItemRequestRow>(&format!(
        "{REQUEST_SELECT} WHERE r.requester_id <> ?
         ORDER BY r.created DESC, r.id DESC LIMIT ? OFFSET ?"
    ))
    .bind(requester_id)
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(conn)
    .await
}
