//! Inbound HTTP adapter (Axum).

pub mod handlers;
pub mod server;

pub use handlers::{ApiError, AppState};
pub use server::HttpServer;
