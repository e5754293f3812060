//! Payment domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity_id;
use super::money::Money;
use super::user::UserId;

entity_id! {
    /// Unique identifier for a Payment.
    PaymentId
}

entity_id! {
    /// Opaque reference to an order owned by the order service.
    ///
    /// Not a foreign key: the order service owns its own store.
    OrderId
}

/// Lifecycle state of a payment attempt.
///
/// `Pending` on creation, `Submitted` while a gateway call is in flight,
/// then whatever the gateway reports (uppercased). Statuses the gateway
/// invents that we do not model explicitly are carried in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Submitted,
    Succeeded,
    Failed,
    Other(String),
}

impl PaymentStatus {
    /// Maps a gateway-reported status string, uppercasing it first.
    pub fn from_gateway(s: &str) -> Self {
        Self::parse(&s.to_ascii_uppercase())
    }

    /// Parses a stored status string.
    pub fn parse(s: &str) -> Self {
        match s {
            "PENDING" => PaymentStatus::Pending,
            "SUBMITTED" => PaymentStatus::Submitted,
            "SUCCEEDED" => PaymentStatus::Succeeded,
            "FAILED" => PaymentStatus::Failed,
            other => PaymentStatus::Other(other.to_string()),
        }
    }

    /// Returns the canonical uppercase string for storage and wire format.
    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Submitted => "SUBMITTED",
            PaymentStatus::Succeeded => "SUCCEEDED",
            PaymentStatus::Failed => "FAILED",
            PaymentStatus::Other(s) => s,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for PaymentStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaymentStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(PaymentStatus::parse(&s))
    }
}

/// One payment attempt tied to an order and a user.
///
/// Created in `Pending` with no gateway identifier; only the processing
/// operation mutates it. A payment with a populated `gateway_payment_id`
/// has been submitted to the gateway at least once.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Order this payment settles
    pub order_id: OrderId,
    /// User who initiated the payment
    pub user_id: UserId,
    /// Amount in minor units with embedded currency
    pub amount: Money,
    /// Current lifecycle state, uppercased
    #[schema(value_type = String, example = "PENDING")]
    pub status: PaymentStatus,
    /// Gateway transaction id, null until a submission succeeds
    pub gateway_payment_id: Option<String>,
    /// Number of processing attempts made so far
    pub attempts: i64,
    /// When the payment record was created
    pub created_at: DateTime<Utc>,
    /// When the record was last mutated
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a new pending payment with no gateway identifier.
    pub fn new(order_id: OrderId, user_id: UserId, amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: PaymentId::new(),
            order_id,
            user_id,
            amount,
            status: PaymentStatus::Pending,
            gateway_payment_id: None,
            attempts: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstructs a payment from database fields.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: PaymentId,
        order_id: OrderId,
        user_id: UserId,
        amount: Money,
        status: PaymentStatus,
        gateway_payment_id: Option<String>,
        attempts: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            order_id,
            user_id,
            amount,
            status,
            gateway_payment_id,
            attempts,
            created_at,
            updated_at,
        }
    }
}
