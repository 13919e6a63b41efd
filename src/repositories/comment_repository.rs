//! SQL access for the `comments` table.

use crate::models::comment::CommentRow;
use chrono::NaiveDateTime;
use sqlx::{QueryBuilder, SqliteConnection, sqlite::Sqlite};

const COMMENT_SELECT: &str = "SELECT c.id, c.text, c.created,
        i.id AS item_id, i.name AS item_name,
        u.name AS author_name
     FROM comments c
     JOIN items i ON i.id = c.item_id
     JOIN users u ON u.id = c.author_id";

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<Option<CommentRow>> {
    sqlx::query_as::<_, CommentRow>(&format!("{COMMENT_SELECT} WHERE c.id = ?"))
        .bind(id)
        .fetch_optional(conn)
        .await
}

/// Insert a comment and return its id.
pub async fn insert(
    conn: &mut SqliteConnection,
    item_id: i64,
    author_id: i64,
    text: &str,
    created: NaiveDateTime,
) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO comments (text, item_id, author_id, created)
         VALUES (?, ?, ?, ?)
         RETURNING id",
    )
    .bind(text)
    .bind(item_id)
    .bind(author_id)
    .bind(created)
    .fetch_one(conn)
    .await
}

/// Comments on one item, oldest first.
pub async fn list_by_item(conn: &mut SqliteConnection, item_id: i64) -> sqlx::Result<Vec<CommentRow>> {
    sqlx::query_as::<_, CommentRow>(&format!(
        "{COMMENT_SELECT} WHERE c.item_id = ? ORDER BY c.created ASC, c.id ASC"
    ))
    .bind(item_id)
    .fetch_all(conn)
    .await
}

/// Comments on any of `item_ids`, oldest first.
pub async fn list_by_items(
    conn: &mut SqliteConnection,
    item_ids: &[i64],
) -> sqlx::Result<Vec<CommentRow>> {
    if item_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = QueryBuilder::<Sqlite>::new(format!("{COMMENT_SELECT} WHERE c.item_id IN ("));
    let mut ids = builder.separated(", ");
    for id in item_ids {
        ids.push_bind(*id);
    }
    ids.push_unseparated(") ORDER BY c.created ASC, c.id ASC");

    builder.build_query_as::<CommentRow>().fetch_all(conn).await
}
