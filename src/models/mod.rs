//! Core data models for the ShareIt lending service.
//!
//! Row types map to the SQLite tables via `sqlx::FromRow`; view types are the
//! JSON shapes returned by the HTTP layer and are assembled by the services.

pub mod booking;
pub mod comment;
pub mod item;
pub mod item_request;
pub mod page;
pub mod user;
