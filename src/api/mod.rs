//! HTTP bootstrap.
//!
//! A minimal axum server: `api_router()` builds the routes, `serve()`
//! binds a listener and runs until Ctrl-C. Routes are nested under `/api/`.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::api_router;
pub use server::{serve, start_server, ApiServer};
