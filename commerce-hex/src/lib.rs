//! # Commerce Hex
//!
//! Application service layer and HTTP adapter for the commerce services.
//!
//! ## Architecture
//!
//! - `service` - Application services (orchestrate domain operations)
//! - `security` - Argon2 password hashing adapter
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The services are generic over the repository, gateway, and hasher
//! ports, allowing different adapter implementations to be injected.

pub mod inbound;
mod openapi;
pub mod security;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use inbound::HttpServer;
pub use security::Argon2Hasher;
pub use service::{PaymentService, UserService};
