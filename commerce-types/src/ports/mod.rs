//! Port traits implemented by adapters.

mod gateway;
mod hasher;
mod repository;

pub use gateway::{Charge, ChargeRequest, PaymentGateway};
pub use hasher::PasswordHasher;
pub use repository::{PaymentRepository, UserRepository};
