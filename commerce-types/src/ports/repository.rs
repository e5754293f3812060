//! Repository port traits.
//!
//! These are the primary ports in the hexagonal architecture.
//! Adapters (Postgres, SQLite, in-memory test doubles) implement them.

use crate::domain::{OrderId, Payment, PaymentId, PaymentStatus, User, UserId};
use crate::dto::{NewPayment, NewUser};
use crate::error::RepoError;

/// Persistence port for the payment service.
///
/// Every mutating method is a single short transaction; nothing here may
/// hold a storage transaction open across a network call.
#[async_trait::async_trait]
pub trait PaymentRepository: Send + Sync + 'static {
    /// Inserts a new payment in PENDING state with no gateway id.
    async fn create_payment(&self, new: NewPayment) -> Result<Payment, RepoError>;

    /// Fetches a payment by id.
    async fn get_payment(&self, id: PaymentId) -> Result<Option<Payment>, RepoError>;

    /// Marks a payment SUBMITTED and increments its attempt counter.
    ///
    /// Returns the payment as it stood before the gateway call together
    /// with the new attempt number. Fails with `NotFound` for unknown ids.
    async fn begin_attempt(&self, id: PaymentId) -> Result<(Payment, i64), RepoError>;

    /// Records a successful gateway submission: transaction id plus the
    /// gateway-reported status. Returns the updated payment.
    async fn record_gateway_result(
        &self,
        id: PaymentId,
        gateway_payment_id: &str,
        status: PaymentStatus,
    ) -> Result<Payment, RepoError>;

    /// Resets a failed attempt back to PENDING.
    ///
    /// Only touches rows that never received a gateway id, so a concurrent
    /// successful attempt is never clobbered.
    async fn record_attempt_failure(&self, id: PaymentId) -> Result<(), RepoError>;

    /// Lists payments for an order, newest first.
    async fn list_payments_for_order(&self, order_id: OrderId) -> Result<Vec<Payment>, RepoError>;

    /// Lists payments for a user, newest first.
    async fn list_payments_for_user(&self, user_id: UserId) -> Result<Vec<Payment>, RepoError>;

    /// Cheap round-trip to the backing store, for liveness checks.
    async fn ping(&self) -> Result<(), RepoError>;
}

/// Persistence port for the user service.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Inserts a new user.
    ///
    /// Email uniqueness is enforced by a storage-level unique constraint;
    /// a violation surfaces as `RepoError::Conflict`, not as a pre-check.
    async fn create_user(&self, new: NewUser) -> Result<User, RepoError>;

    /// Fetches a user by email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}
