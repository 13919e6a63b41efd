//! src/services/item_service.rs
//!
//! ItemService: listing, editing, searching and commenting on items, and the
//! aggregated item views that attach last/next approved bookings and comments.

use crate::{
    models::{
        booking::{Booking, BookingShort},
        comment::{CommentRow, CommentView},
        item::{Item, ItemPatch, ItemView, NewItem},
        page::Page,
    },
    repositories::{
        booking_repository, comment_repository, item_repository, item_request_repository,
        user_repository,
    },
    services::{
        booking_rules,
        error::{ServiceError, ServiceResult},
        group_by, now,
    },
};
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct ItemService {
    pub db: Arc<SqlitePool>,
}

impl ItemService {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// List a new item for `owner_id`, optionally answering an item request.
    pub async fn create_item(&self, owner_id: i64, item: NewItem) -> ServiceResult<Item> {
        let mut tx = self.db.begin().await?;

        if !user_repository::exists(&mut tx, owner_id).await? {
            return Err(ServiceError::user_not_found(owner_id));
        }
        if let Some(request_id) = item.request_id {
            if !item_request_repository::exists(&mut tx, request_id).await? {
                return Err(ServiceError::request_not_found(request_id));
            }
        }

        let created = item_repository::insert(&mut tx, owner_id, &item).await?;
        tx.commit().await?;

        info!("user {} listed item {} ({})", owner_id, created.id, created.name);
        Ok(created)
    }

    /// Edit an item. Only the owner may edit; others get forbidden.
    pub async fn update_item(
        &self,
        item_id: i64,
        caller_id: i64,
        patch: ItemPatch,
    ) -> ServiceResult<Item> {
        let mut tx = self.db.begin().await?;

        let mut item = item_repository::find_by_id(&mut tx, item_id)
            .await?
            .ok_or_else(|| ServiceError::item_not_found(item_id))?;
        if item.owner_id != caller_id {
            return Err(ServiceError::Forbidden(format!(
                "user {caller_id} may only edit their own items"
            )));
        }

        patch.apply(&mut item);
        let updated = item_repository::update(&mut tx, &item).await?;
        tx.commit().await?;

        info!("user {} updated item {}", caller_id, item_id);
        Ok(updated)
    }

    /// Item with comments; the owner additionally sees last/next approved bookings.
    pub async fn get_item(&self, item_id: i64, caller_id: i64) -> ServiceResult<ItemView> {
        let mut conn = self.db.acquire().await?;

        if !user_repository::exists(&mut conn, caller_id).await? {
            return Err(ServiceError::user_not_found(caller_id));
        }
        let item = item_repository::find_by_id(&mut conn, item_id)
            .await?
            .ok_or_else(|| ServiceError::item_not_found(item_id))?;

        let (last, next) = if item.owner_id == caller_id {
            let now = now();
            let last = booking_repository::find_latest_approved_before(&mut conn, item_id, now).await?;
            let next = booking_repository::find_earliest_approved_after(&mut conn, item_id, now).await?;
            (last, next)
        } else {
            (None, None)
        };

        let comments = comment_repository::list_by_item(&mut conn, item_id)
            .await?
            .into_iter()
            .map(CommentView::from)
            .collect();

        debug!("user {} viewed item {}", caller_id, item_id);
        Ok(ItemView::new(
            item,
            last.as_ref().map(BookingShort::from),
            next.as_ref().map(BookingShort::from),
            comments,
        ))
    }

    /// The owner's items with per-item last/next bookings and comments, sorted by id.
    ///
    /// Bookings and comments are loaded in one query each for the whole page.
    pub async fn list_owner_items(&self, owner_id: i64, page: Page) -> ServiceResult<Vec<ItemView>> {
        let mut conn = self.db.acquire().await?;

        if !user_repository::exists(&mut conn, owner_id).await? {
            return Err(ServiceError::user_not_found(owner_id));
        }

        let items = item_repository::list_by_owner(&mut conn, owner_id, page).await?;
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();

        let mut bookings = group_by(
            booking_repository::find_approved_for_items(&mut conn, &ids).await?,
            |b: &Booking| b.item_id,
        );
        let mut comments = group_by(
            comment_repository::list_by_items(&mut conn, &ids).await?,
            |c: &CommentRow| c.item_id,
        );

        let now = now();
        let mut views: Vec<ItemView> = items
            .into_iter()
            .map(|item| {
                let item_bookings = bookings.remove(&item.id).unwrap_or_default();
                let (last, next) = booking_rules::last_and_next(&item_bookings, now);
                let item_comments = comments
                    .remove(&item.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(CommentView::from)
                    .collect();
                ItemView::new(
                    item,
                    last.map(BookingShort::from),
                    next.map(BookingShort::from),
                    item_comments,
                )
            })
            .collect();
        views.sort_by_key(|v| v.id);

        info!("listed {} items of owner {}", views.len(), owner_id);
        Ok(views)
    }

    /// Available items whose name or description contains `text`, ignoring case.
    /// Blank text matches nothing; otherwise the text is matched as given.
    pub async fn search(&self, text: &str) -> ServiceResult<Vec<Item>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.db.acquire().await?;
        let items = item_repository::search_available(&mut conn, text).await?;

        info!("search {:?} matched {} items", text, items.len());
        Ok(items)
    }

    /// Comment on an item the author has finished renting.
    pub async fn post_comment(
        &self,
        author_id: i64,
        item_id: i64,
        text: &str,
    ) -> ServiceResult<CommentView> {
        let mut tx = self.db.begin().await?;

        if !user_repository::exists(&mut tx, author_id).await? {
            return Err(ServiceError::user_not_found(author_id));
        }
        if item_repository::find_by_id(&mut tx, item_id).await?.is_none() {
            return Err(ServiceError::item_not_found(item_id));
        }

        let now = now();
        if !booking_repository::has_completed_rental(&mut tx, item_id, author_id, now).await? {
            return Err(ServiceError::Unavailable(format!(
                "user {author_id} did not rent item {item_id}"
            )));
        }

        let id = comment_repository::insert(&mut tx, item_id, author_id, text, now).await?;
        let row = comment_repository::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("comment {id} not found")))?;
        tx.commit().await?;

        info!("user {} commented on item {}", author_id, item_id);
        Ok(row.into())
    }
}
