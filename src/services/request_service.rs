//! src/services/request_service.rs
//!
//! RequestService: item requests and the items listed in answer to them.

use crate::{
    models::{
        item::Item,
        item_request::{ItemRequestRow, ItemRequestView},
        page::Page,
    },
    repositories::{item_repository, item_request_repository, user_repository},
    services::{
        error::{ServiceError, ServiceResult},
        group_by, now,
    },
};
use sqlx::{SqliteConnection, SqlitePool};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct RequestService {
    pub db: Arc<SqlitePool>,
}

impl RequestService {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    pub async fn create_request(
        &self,
        requester_id: i64,
        description: &str,
    ) -> ServiceResult<ItemRequestView> {
        let mut tx = self.db.begin().await?;

        if !user_repository::exists(&mut tx, requester_id).await? {
            return Err(ServiceError::user_not_found(requester_id));
        }

        let id = item_request_repository::insert(&mut tx, requester_id, description, now()).await?;
        let row = item_request_repository::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| ServiceError::request_not_found(id))?;
        tx.commit().await?;

        info!("user {} opened item request {}", requester_id, id);
        Ok(ItemRequestView::new(row, Vec::new()))
    }

    /// The caller's own requests, newest first, each with its answering items.
    pub async fn list_own(&self, requester_id: i64) -> ServiceResult<Vec<ItemRequestView>> {
        let mut conn = self.db.acquire().await?;

        if !user_repository::exists(&mut conn, requester_id).await? {
            return Err(ServiceError::user_not_found(requester_id));
        }

        let rows = item_request_repository::list_by_requester(&mut conn, requester_id).await?;
        Ok(annotate(&mut conn, rows).await?)
    }

    /// Everyone else's requests, newest first.
    pub async fn list_others(
        &self,
        caller_id: i64,
        page: Page,
    ) -> ServiceResult<Vec<ItemRequestView>> {
        let mut conn = self.db.acquire().await?;
        let rows = item_request_repository::list_excluding(&mut conn, caller_id, page).await?;
        Ok(annotate(&mut conn, rows).await?)
    }

    pub async fn get_request(
        &self,
        request_id: i64,
        caller_id: i64,
    ) -> ServiceResult<ItemRequestView> {
        let mut conn = self.db.acquire().await?;

        if !user_repository::exists(&mut conn, caller_id).await? {
            return Err(ServiceError::user_not_found(caller_id));
        }
        let row = item_request_repository::find_by_id(&mut conn, request_id)
            .await?
            .ok_or_else(|| ServiceError::request_not_found(request_id))?;

        let mut views = annotate(&mut conn, vec![row]).await?;
        views
            .pop()
            .ok_or_else(|| ServiceError::request_not_found(request_id))
    }
}

/// Attach answering items to each request with a single item query.
async fn annotate(
    conn: &mut SqliteConnection,
    rows: Vec<ItemRequestRow>,
) -> sqlx::Result<Vec<ItemRequestView>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let mut by_request = group_by(
        item_repository::list_by_request_ids(conn, &ids).await?,
        |item: &Item| item.request_id,
    );

    Ok(rows
        .into_iter()
        .map(|row| {
            let items = by_request.remove(&Some(row.id)).unwrap_or_default();
            ItemRequestView::new(row, items)
        })
        .collect())
}
