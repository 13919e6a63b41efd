//! Request extractors shared by the ShareIt handlers.
//!
//! `AppJson`, `AppQuery` and `AppPath` wrap the axum extractors so that
//! malformed input is answered with the JSON `AppError` body and a 400.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Header carrying the caller's user id.
pub const SHARER_HEADER: &str = "x-sharer-user-id";

/// Id of the user making the request, read from `X-Sharer-User-Id`.
///
/// Missing, non-numeric or non-positive values are rejected with 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharerId(pub i64);

impl<S> FromRequestParts<S> for SharerId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(SHARER_HEADER)
            .ok_or_else(|| AppError::bad_request(format!("missing {SHARER_HEADER} header")))?;

        raw.to_str()
            .ok()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|id| *id > 0)
            .map(SharerId)
            .ok_or_else(|| AppError::bad_request(format!("invalid {SHARER_HEADER} header")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};

    async fn extract(value: Option<&str>) -> Result<SharerId, AppError> {
        let mut builder = Request::builder().uri("/");
        if let Some(v) = value {
            builder = builder.header(SHARER_HEADER, v);
        }
        let (mut parts, _) = builder.body(()).expect("request").into_parts();
        SharerId::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn parses_positive_ids() {
        assert_eq!(extract(Some("42")).await.expect("id"), SharerId(42));
    }

    #[tokio::test]
    async fn rejects_missing_or_bad_values() {
        for value in [None, Some("abc"), Some("0"), Some("-3"), Some("")] {
            let err = extract(value).await.expect_err("rejected");
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
        }
    }
}
