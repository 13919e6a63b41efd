//! HTTP handlers for `/requests`.

use crate::{
    errors::AppError,
    handlers::{
        extractors::{AppJson, AppPath, AppQuery, SharerId},
        validation::{PageQuery, not_blank},
    },
    models::item_request::ItemRequestView,
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
pub struct CreateRequestReq {
    #[validate(custom(function = "not_blank"))]
    pub description: String,
}

/// `POST /requests`
pub async fn create_request(
    State(state): State<AppState>,
    SharerId(requester_id): SharerId,
    AppJson(req): AppJson<CreateRequestReq>,
) -> Result<Json<ItemRequestView>, AppError> {
    req.validate()?;
    let request = state
        .requests
        .create_request(requester_id, &req.description)
        .await?;
    Ok(Json(request))
}

/// `GET /requests`
pub async fn list_own_requests(
    State(state): State<AppState>,
    SharerId(requester_id): SharerId,
) -> Result<Json<Vec<ItemRequestView>>, AppError> {
    Ok(Json(state.requests.list_own(requester_id).await?))
}

/// `GET /requests/all?from&size`
pub async fn list_other_requests(
    State(state): State<AppState>,
    SharerId(caller_id): SharerId,
    AppQuery(query): AppQuery<PageQuery>,
) -> Result<Json<Vec<ItemRequestView>>, AppError> {
    query.validate()?;
    let requests = state
        .requests
        .list_others(caller_id, query.page(DEFAULT_PAGE_SIZE))
        .await?;
    Ok(Json(requests))
}

/// `GET /requests/{id}`
pub async fn get_request(
    State(state): State<AppState>,
    SharerId(caller_id): SharerId,
    AppPath(request_id): AppPath<i64>,
) -> Result<Json<ItemRequestView>, AppError> {
    Ok(Json(state.requests.get_request(request_id, caller_id).await?))
}
