//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Currency, Money, OrderId, UserId};

// ─────────────────────────────────────────────────────────────────────────────
// Payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a new payment in PENDING state.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentRequest {
    /// Order the payment settles
    pub order_id: OrderId,
    /// User initiating the payment
    pub user_id: UserId,
    /// Decimal amount, e.g. "49.99"
    #[schema(example = "49.99")]
    pub amount: String,
    #[serde(default = "default_currency")]
    pub currency: Currency,
}

fn default_currency() -> Currency {
    Currency::USD
}

/// Request to process a pending payment through the gateway.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProcessPaymentRequest {
    /// Gateway payment-method token
    #[schema(example = "pm_card_visa")]
    pub payment_method_id: String,
    /// Optional caller-supplied idempotency key; derived from the payment
    /// id and attempt counter when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

/// Validated payment fields handed to the repository for insertion.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub amount: Money,
}

// ─────────────────────────────────────────────────────────────────────────────
// User DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to register a new account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterUserRequest {
    #[schema(example = "alice@example.com")]
    pub email: String,
    pub password: String,
    #[schema(example = "Alice")]
    pub first_name: String,
    #[schema(example = "Smith")]
    pub last_name: String,
}

/// Acknowledgment returned after a successful registration.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterUserResponse {
    #[schema(example = "User registered successfully")]
    pub message: String,
}

/// Validated user fields handed to the repository for insertion.
///
/// `password_hash` is already a digest; plaintext never crosses this
/// boundary.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}
