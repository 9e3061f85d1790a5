//! API endpoint handlers.

pub mod health;
