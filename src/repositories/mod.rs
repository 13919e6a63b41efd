//! Persistence layer over the SQLite entity store.
//!
//! Every function takes a `&mut SqliteConnection` so services can run several
//! of them inside a single transaction (`&mut tx`) or on a pooled connection.

pub mod booking_repository;
pub mod comment_repository;
pub mod item_repository;
pub mod item_request_repository;
pub mod user_repository;
