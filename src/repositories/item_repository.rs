//! SQL access for the `items` table.

use crate::models::{
    item::{Item, NewItem},
    page::Page,
};
use sqlx::{QueryBuilder, SqliteConnection, sqlite::Sqlite};

const ITEM_COLUMNS: &str = "id, name, description, available, owner_id, request_id";

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<Option<Item>> {
    sqlx::query_as::<_, Item>(&format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ?"))
        .bind(id)
        .fetch_optional(conn)
        .await
}

pub async fn insert(
    conn: &mut SqliteConnection,
    owner_id: i64,
    item: &NewItem,
) -> sqlx::Result<Item> {
    sqlx::query_as::<_, Item>(&format!(
        "INSERT INTO items (name, description, available, owner_id, request_id)
         VALUES (?, ?, ?, ?, ?)
         RETURNING {ITEM_COLUMNS}"
    ))
    .bind(&item.name)
    .bind(&item.description)
    .bind(item.available)
    .bind(owner_id)
    .bind(item.request_id)
    .fetch_one(conn)
    .await
}

/// Persist name, description and availability. Owner and request never change.
pub async fn update(conn: &mut SqliteConnection, item: &Item) -> sqlx::Result<Item> {
    sqlx::query_as::<_, Item>(&format!(
        "UPDATE items SET name = ?, description = ?, available = ? WHERE id = ?
         RETURNING {ITEM_COLUMNS}"
    ))
    .bind(&item.name)
    .bind(&item.description)
    .bind(item.available)
    .bind(item.id)
    .fetch_one(conn)
    .await
}

pub async fn list_by_owner(
    conn: &mut SqliteConnection,
    owner_id: i64,
    page: Page,
) -> sqlx::Result<Vec<Item>> {
    sqlx::query_as::<_, Item>(&format!(
        "SELECT {ITEM_COLUMNS} FROM items WHERE owner_id = ?
         ORDER BY id ASC LIMIT ? OFFSET ?"
    ))
    .bind(owner_id)
    .bind(page.limit())
    .bind(page.offset())
    .fetch_all(conn)
    .await
}

pub async fn count_by_owner(conn: &mut SqliteConnection, owner_id: i64) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM items WHERE owner_id = ?")
        .bind(owner_id)
        .fetch_one(conn)
        .await
}

/// Case-insensitive substring search over name and description, available items only.
pub async fn search_available(conn: &mut SqliteConnection, text: &str) -> sqlx::Result<Vec<Item>> {
    let pattern = format!("%{}%", escape_like(&text.to_lowercase()));
    sqlx::query_as::<_, Item>(&format!(
        "SELECT {ITEM_COLUMNS} FROM items
         WHERE available = 1
           AND (lower(name) LIKE ? ESCAPE '\\' OR lower(description) LIKE ? ESCAPE '\\')
         ORDER BY id ASC"
    ))
    .bind(&pattern)
    .bind(&pattern)
    .fetch_all(conn)
    .await
}

pub async fn list_by_request_ids(
    conn: &mut SqliteConnection,
    request_ids: &[i64],
) -> sqlx::Result<Vec<Item>> {
    if request_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {ITEM_COLUMNS} FROM items WHERE request_id IN ("
    ));
    let mut ids = builder.separated(", ");
    for id in request_ids {
        ids.push_bind(*id);
    }
    ids.push_unseparated(") ORDER BY id ASC");

    builder.build_query_as::<Item>().fetch_all(conn).await
}

/// Escape LIKE wildcards so user text is matched literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escapes_like_wildcards() {
        assert_eq!(escape_like("drill"), "drill");
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }
}
