//! HTTP handlers for `/users`.

use crate::{
    errors::AppError,
    handlers::{
        extractors::{AppJson, AppPath},
        validation::not_blank,
    },
    models::user::{User, UserPatch},
    state::AppState,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserReq {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserReq {
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

/// `POST /users`
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateUserReq>,
) -> Result<Json<User>, AppError> {
    req.validate()?;
    Ok(Json(state.users.create_user(&req.name, &req.email).await?))
}

/// `GET /users`
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.users.list_users().await?))
}

/// `GET /users/{id}`
pub async fn get_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.users.get_user(id).await?))
}

/// `PATCH /users/{id}`
pub async fn update_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<UpdateUserReq>,
) -> Result<Json<User>, AppError> {
    // An empty email means "leave unchanged" rather than "invalid".
    let email = req.email.filter(|e| !e.trim().is_empty());
    let req = UpdateUserReq { name: req.name, email };
    req.validate()?;

    let user = state
        .users
        .update_user(
            id,
            UserPatch {
                name: req.name,
                email: req.email,
            },
        )
        .await?;
    Ok(Json(user))
}

/// `DELETE /users/{id}`
pub async fn delete_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode, AppError> {
    state.users.delete_user(id).await?;
    Ok(StatusCode::OK)
}
