//! HTTP handlers for `/items`: listing, editing, search and comments.

use crate::{
    errors::AppError,
    handlers::{
        extractors::{AppJson, AppPath, AppQuery, SharerId},
        validation::{PageQuery, not_blank},
    },
    models::{
        comment::CommentView,
        item::{Item, ItemPatch, ItemView, NewItem},
    },
    state::AppState,
};
use axum::{
    Json,
    extract::State,
};
use serde::Deserialize;
use validator::Validate;

const DEFAULT_PAGE_SIZE: i64 = 20;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemReq {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[validate(required)]
    pub available: Option<bool>,
    pub request_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemReq {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CommentReq {
    #[validate(custom(function = "not_blank"))]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub text: Option<String>,
}

/// `POST /items`
pub async fn create_item(
    State(state): State<AppState>,
    SharerId(owner_id): SharerId,
    AppJson(req): AppJson<CreateItemReq>,
) -> Result<Json<Item>, AppError> {
    req.validate()?;

    let item = state
        .items
        .create_item(
            owner_id,
            NewItem {
                name: req.name,
                description: req.description,
                available: req.available.unwrap_or_default(),
                request_id: req.request_id,
            },
        )
        .await?;
    Ok(Json(item))
}

/// `PATCH /items/{id}`
pub async fn update_item(
    State(state): State<AppState>,
    SharerId(caller_id): SharerId,
    AppPath(item_id): AppPath<i64>,
    AppJson(req): AppJson<UpdateItemReq>,
) -> Result<Json<Item>, AppError> {
    let patch = ItemPatch {
        name: req.name,
        description: req.description,
        available: req.available,
    };
    Ok(Json(state.items.update_item(item_id, caller_id, patch).await?))
}

/// `GET /items/{id}`
pub async fn get_item(
    State(state): State<AppState>,
    SharerId(caller_id): SharerId,
    AppPath(item_id): AppPath<i64>,
) -> Result<Json<ItemView>, AppError> {
    Ok(Json(state.items.get_item(item_id, caller_id).await?))
}

/// `GET /items?from&size`
pub async fn list_owner_items(
    State(state): State<AppState>,
    SharerId(owner_id): SharerId,
    AppQuery(query): AppQuery<PageQuery>,
) -> Result<Json<Vec<ItemView>>, AppError> {
    query.validate()?;
    let items = state
        .items
        .list_owner_items(owner_id, query.page(DEFAULT_PAGE_SIZE))
        .await?;
    Ok(Json(items))
}

/// `GET /items/search?text`
pub async fn search_items(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<SearchQuery>,
) -> Result<Json<Vec<Item>>, AppError> {
    let text = query.text.unwrap_or_default();
    Ok(Json(state.items.search(&text).await?))
}

/// `POST /items/{id}/comment`
pub async fn post_comment(
    State(state): State<AppState>,
    SharerId(author_id): SharerId,
    AppPath(item_id): AppPath<i64>,
    AppJson(req): AppJson<CommentReq>,
) -> Result<Json<CommentView>, AppError> {
    req.validate()?;
    let comment = state
        .items
        .post_comment(author_id, item_id, &req.text)
        .await?;
    Ok(Json(comment))
}
