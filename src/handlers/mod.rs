pub mod booking_handlers;
pub mod extractors;
pub mod health_handlers;
pub mod item_handlers;
pub mod request_handlers;
pub mod user_handlers;
pub mod validation;
