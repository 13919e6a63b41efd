//! SQL access for the `users` table.

use crate::models::user::User;
use sqlx::SqliteConnection;

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await
}

pub async fn exists(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<bool> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE id = ?")
        .bind(id)
        .fetch_one(conn)
        .await?;
    Ok(count > 0)
}

pub async fn list_all(conn: &mut SqliteConnection) -> sqlx::Result<Vec<User>> {
    sqlx::query_as::<_, User>("SELECT id, name, email FROM users ORDER BY id")
        .fetch_all(conn)
        .await
}

pub async fn insert(conn: &mut SqliteConnection, name: &str, email: &str) -> sqlx::Result<User> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email) VALUES (?, ?)
         RETURNING id, name, email",
    )
    .bind(name)
    .bind(email)
    .fetch_one(conn)
    .await
}

pub async fn update(conn: &mut SqliteConnection, user: &User) -> sqlx::Result<User> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET name = ?, email = ? WHERE id = ?
         RETURNING id, name, email",
    )
    .bind(&user.name)
    .bind(&user.email)
    .bind(user.id)
    .fetch_one(conn)
    .await
}

/// Returns the number of deleted rows (0 or 1).
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> sqlx::Result<u64> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}
