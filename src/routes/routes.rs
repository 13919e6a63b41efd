//! Defines the ShareIt HTTP surface.
//!
//! ## Structure
//! - **Users**: `POST/GET /users`, `GET/PATCH/DELETE /users/{id}`
//! - **Items**: `POST/GET /items`, `GET /items/search`, `GET/PATCH /items/{id}`,
//!   `POST /items/{id}/comment`
//! - **Bookings**: `POST/GET /bookings`, `GET /bookings/owner`,
//!   `GET/PATCH /bookings/{id}`
//! - **Requests**: `POST/GET /requests`, `GET /requests/all`, `GET /requests/{id}`
//!
//! Static segments (`search`, `owner`, `all`) take precedence over `{id}`.

use crate::{
    handlers::{
        booking_handlers::{
            approve_booking, create_booking, get_booking, list_booker_bookings,
            list_owner_bookings,
        },
        health_handlers::{healthz, readyz},
        item_handlers::{
            create_item, get_item, list_owner_items, post_comment, search_items, update_item,
        },
        request_handlers::{create_request, get_request, list_other_requests, list_own_requests},
        user_handlers::{create_user, delete_user, get_user, list_users, update_user},
    },
    middleware::request_id,
    state::AppState,
};
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};

/// Build the router for every ShareIt route, tagged with request ids.
pub fn routes() -> Router<AppState> {
    Router::new()
        // health endpoints
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // users
        .route("/users", post(create_user).get(list_users))
        .route(
            "/users/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        // items
        .route("/items", post(create_item).get(list_owner_items))
        .route("/items/search", get(search_items))
        .route("/items/{id}", get(get_item).patch(update_item))
        .route("/items/{id}/comment", post(post_comment))
        // bookings
        .route("/bookings", post(create_booking).get(list_booker_bookings))
        .route("/bookings/owner", get(list_owner_bookings))
        .route("/bookings/{id}", get(get_booking).patch(approve_booking))
        // item requests
        .route("/requests", post(create_request).get(list_own_requests))
        .route("/requests/all", get(list_other_requests))
        .route("/requests/{id}", get(get_request))
        .layer(from_fn(request_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode},
    };
    use chrono::{Duration, NaiveDateTime};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct TestApp {
        router: Router,
    }

    impl TestApp {
        async fn new() -> Self {
            let state = AppState::new(Arc::new(test_pool().await));
            Self {
                router: routes().with_state(state),
            }
        }

        async fn call(
            &self,
            method: Method,
            uri: &str,
            user: Option<i64>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(id) = user {
                builder = builder.header("X-Sharer-User-Id", id.to_string());
            }
            let request = match body {
                Some(json) => builder
                    .header("content-type", "application/json")
                    .body(Body::from(json.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, value)
        }

        async fn user(&self, name: &str) -> i64 {
            let (status, body) = self
                .call(
                    Method::POST,
                    "/users",
                    None,
                    Some(json!({ "name": name, "email": format!("{name}@example.com") })),
                )
                .await;
            assert_eq!(status, StatusCode::OK, "{body}");
            body["id"].as_i64().unwrap()
        }

        async fn item(&self, owner: i64, name: &str) -> i64 {
            let (status, body) = self
                .call(
                    Method::POST,
                    "/items",
                    Some(owner),
                    Some(json!({ "name": name, "description": "cordless", "available": true })),
                )
                .await;
            assert_eq!(status, StatusCode::OK, "{body}");
            body["id"].as_i64().unwrap()
        }
    }

    fn stamp(t: NaiveDateTime) -> String {
        t.format("%Y-%m-%dT%H:%M:%S").to_string()
    }

    #[tokio::test]
    async fn health_endpoints_answer() {
        let app = TestApp::new().await;
        let (status, body) = app.call(Method::GET, "/healthz", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = app.call(Method::GET, "/readyz", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"]["sqlite"]["ok"], true);
    }

    #[tokio::test]
    async fn user_crud_and_validation() {
        let app = TestApp::new().await;
        let id = app.user("alice").await;

        let (status, body) = app
            .call(
                Method::POST,
                "/users",
                None,
                Some(json!({ "name": "alice2", "email": "alice@example.com" })),
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["status"], 409);

        let (status, _) = app
            .call(
                Method::POST,
                "/users",
                None,
                Some(json!({ "name": "bob", "email": "not-an-email" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = app
            .call(
                Method::PATCH,
                &format!("/users/{id}"),
                None,
                Some(json!({ "name": "Alice" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Alice");
        assert_eq!(body["email"], "alice@example.com");

        let (status, _) = app.call(Method::DELETE, &format!("/users/{id}"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = app.call(Method::GET, &format!("/users/{id}"), None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], format!("user {id} not found"));
    }

    #[tokio::test]
    async fn malformed_input_gets_json_bad_request() {
        let app = TestApp::new().await;
        let owner = app.user("owner").await;
        let item = app.item(owner, "Drill").await;
        let comment_uri = format!("/items/{item}/comment");

        let bodies = [
            ("/users", None, json!({ "name": "no email" })),
            ("/users", None, json!({})),
            ("/items", Some(owner), json!({})),
            ("/items", Some(owner), json!({ "description": "no name", "available": true })),
            (comment_uri.as_str(), Some(owner), json!({})),
            ("/requests", Some(owner), json!({})),
            ("/bookings", Some(owner), json!({ "itemId": "one" })),
        ];
        for (uri, user, body) in bodies {
            let (status, error) = app.call(Method::POST, uri, user, Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}: {error}");
            assert_eq!(error["status"], 400, "{uri}");
            assert!(error["error"].is_string(), "{uri}");
        }

        let (status, error) = app.call(Method::GET, "/users/abc", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["status"], 400);

        let (status, error) = app
            .call(Method::PATCH, "/bookings/1?approved=maybe", Some(owner), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["status"], 400);
    }

    #[tokio::test]
    async fn caller_header_is_required() {
        let app = TestApp::new().await;
        let (status, _) = app.call(Method::GET, "/items", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let request = Request::builder()
            .uri("/items")
            .header("X-Sharer-User-Id", "abc")
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn booking_flow_over_http() {
        let app = TestApp::new().await;
        let a = app.user("a").await;
        let b = app.user("b").await;
        let c = app.user("c").await;
        let drill = app.item(a, "Drill").await;
        let now = crate::services::now();
        let start = now + Duration::days(1);
        let end = now + Duration::days(2);

        let (status, booking) = app
            .call(
                Method::POST,
                "/bookings",
                Some(b),
                Some(json!({ "itemId": drill, "start": stamp(start), "end": stamp(end) })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{booking}");
        assert_eq!(booking["status"], "WAITING");
        assert_eq!(booking["item"]["name"], "Drill");
        assert_eq!(booking["booker"]["id"], b);
        let booking_id = booking["id"].as_i64().unwrap();

        let (status, _) = app
            .call(
                Method::POST,
                "/bookings",
                Some(c),
                Some(json!({
                    "itemId": drill,
                    "start": stamp(start + Duration::hours(7)),
                    "end": stamp(start + Duration::hours(9)),
                })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .call(
                Method::POST,
                "/bookings",
                Some(c),
                Some(json!({
                    "itemId": drill,
                    "start": stamp(now - Duration::days(1)),
                    "end": stamp(end),
                })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .call(
                Method::GET,
                &format!("/bookings/{booking_id}"),
                Some(c),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, approved) = app
            .call(
                Method::PATCH,
                &format!("/bookings/{booking_id}?approved=true"),
                Some(a),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(approved["status"], "APPROVED");

        let (status, _) = app
            .call(
                Method::PATCH,
                &format!("/bookings/{booking_id}?approved=false"),
                Some(a),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // The rental has not ended yet.
        let (status, _) = app
            .call(
                Method::POST,
                &format!("/items/{drill}/comment"),
                Some(b),
                Some(json!({ "text": "great" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, list) = app
            .call(Method::GET, "/bookings/owner?state=FUTURE", Some(a), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().map(Vec::len), Some(1));

        let (status, body) = app
            .call(Method::GET, "/bookings?state=waiting", Some(b), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Unknown state: waiting");

        let (status, _) = app
            .call(Method::GET, "/bookings/owner", Some(c), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, view) = app
            .call(Method::GET, &format!("/items/{drill}"), Some(a), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["nextBooking"]["id"], booking_id);
        assert_eq!(view["nextBooking"]["bookerId"], b);
        assert!(view["lastBooking"].is_null());
    }

    #[tokio::test]
    async fn items_search_and_requests_over_http() {
        let app = TestApp::new().await;
        let a = app.user("a").await;
        let b = app.user("b").await;

        let (status, request) = app
            .call(
                Method::POST,
                "/requests",
                Some(a),
                Some(json!({ "description": "need a drill" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let request_id = request["id"].as_i64().unwrap();

        let (status, item) = app
            .call(
                Method::POST,
                "/items",
                Some(b),
                Some(json!({
                    "name": "Drill",
                    "description": "cordless",
                    "available": true,
                    "requestId": request_id,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(item["requestId"], request_id);
        assert_eq!(item["ownerId"], b);

        let (status, _) = app
            .call(
                Method::POST,
                "/items",
                Some(b),
                Some(json!({ "name": "Saw", "description": "circular" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, found) = app
            .call(Method::GET, "/items/search?text=DRILL", Some(a), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found.as_array().map(Vec::len), Some(1));

        let (status, found) = app
            .call(Method::GET, "/items/search?text=", Some(a), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found, json!([]));

        let (status, view) = app
            .call(Method::GET, &format!("/requests/{request_id}"), Some(b), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["items"][0]["name"], "Drill");
        assert_eq!(view["requester"]["id"], a);

        let (status, others) = app
            .call(Method::GET, "/requests/all?from=0&size=5", Some(b), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(others.as_array().map(Vec::len), Some(1));

        let (status, _) = app
            .call(Method::GET, "/requests/all?from=-1", Some(b), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .call(Method::GET, "/items?size=0", Some(b), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
