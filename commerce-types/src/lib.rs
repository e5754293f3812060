//! # Commerce Types
//!
//! Domain types and port traits for the commerce payment and user services.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Money, Payment, User)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{Currency, Money, OrderId, Payment, PaymentId, PaymentStatus, User, UserId};
pub use dto::*;
pub use error::{AppError, DomainError, GatewayError, HashError, RepoError};
pub use ports::{
    Charge, ChargeRequest, PasswordHasher, PaymentGateway, PaymentRepository, UserRepository,
};
