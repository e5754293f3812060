//! Shared database row types with feature-gated fields for SQLite and PostgreSQL.

use sqlx::FromRow;

use commerce_types::{
    Currency, Money, OrderId, Payment, PaymentId, PaymentStatus, RepoError, User, UserId,
};

// ─────────────────────────────────────────────────────────────────────────────
// Feature-gated imports
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(not(feature = "sqlite"))]
use chrono::{DateTime, Utc};
#[cfg(not(feature = "sqlite"))]
use uuid::Uuid;

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Payment row from database.
#[derive(FromRow)]
pub struct DbPayment {
    #[cfg(not(feature = "sqlite"))]
    pub id: Uuid,
    #[cfg(feature = "sqlite")]
    pub id: String,

    #[cfg(not(feature = "sqlite"))]
    pub order_id: Uuid,
    #[cfg(feature = "sqlite")]
    pub order_id: String,

    #[cfg(not(feature = "sqlite"))]
    pub user_id: Uuid,
    #[cfg(feature = "sqlite")]
    pub user_id: String,

    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub gateway_payment_id: Option<String>,
    pub attempts: i64,

    #[cfg(not(feature = "sqlite"))]
    pub created_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub created_at: String,

    #[cfg(not(feature = "sqlite"))]
    pub updated_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub updated_at: String,
}

/// User row from database.
#[derive(FromRow)]
pub struct DbUser {
    #[cfg(not(feature = "sqlite"))]
    pub id: Uuid,
    #[cfg(feature = "sqlite")]
    pub id: String,

    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,

    #[cfg(not(feature = "sqlite"))]
    pub created_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub created_at: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing helpers
// ─────────────────────────────────────────────────────────────────────────────

pub fn parse_currency(s: &str) -> Result<Currency, RepoError> {
    s.parse()
        .map_err(|_| RepoError::Database(format!("Unknown currency: {}", s)))
}

#[cfg(feature = "sqlite")]
fn parse_uuid(s: &str) -> Result<uuid::Uuid, RepoError> {
    uuid::Uuid::parse_str(s).map_err(|e| RepoError::Database(e.to_string()))
}

#[cfg(feature = "sqlite")]
fn parse_datetime(s: &str) -> Result<chrono::DateTime<chrono::Utc>, RepoError> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| RepoError::Database(e.to_string()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Domain conversion (feature-gated implementations)
// ─────────────────────────────────────────────────────────────────────────────

impl DbPayment {
    /// Convert database row to domain Payment.
    pub fn into_domain(self) -> Result<Payment, RepoError> {
        let currency = parse_currency(&self.currency)?;
        let amount = Money::from_minor_units(self.amount, currency).map_err(RepoError::Domain)?;
        let status = PaymentStatus::parse(&self.status);

        #[cfg(not(feature = "sqlite"))]
        let (id, order_id, user_id, created_at, updated_at) = (
            PaymentId::from_uuid(self.id),
            OrderId::from_uuid(self.order_id),
            UserId::from_uuid(self.user_id),
            self.created_at,
            self.updated_at,
        );

        #[cfg(feature = "sqlite")]
        let (id, order_id, user_id, created_at, updated_at) = (
            PaymentId::from_uuid(parse_uuid(&self.id)?),
            OrderId::from_uuid(parse_uuid(&self.order_id)?),
            UserId::from_uuid(parse_uuid(&self.user_id)?),
            parse_datetime(&self.created_at)?,
            parse_datetime(&self.updated_at)?,
        );

        Ok(Payment::from_parts(
            id,
            order_id,
            user_id,
            amount,
            status,
            self.gateway_payment_id,
            self.attempts,
            created_at,
            updated_at,
        ))
    }
}

impl DbUser {
    /// Convert database row to domain User.
    pub fn into_domain(self) -> Result<User, RepoError> {
        #[cfg(not(feature = "sqlite"))]
        let (id, created_at) = (UserId::from_uuid(self.id), self.created_at);

        #[cfg(feature = "sqlite")]
        let (id, created_at) = (
            UserId::from_uuid(parse_uuid(&self.id)?),
            parse_datetime(&self.created_at)?,
        );

        Ok(User::from_parts(
            id,
            self.email,
            self.password_hash,
            self.first_name,
            self.last_name,
            self.role,
            created_at,
        ))
    }
}
