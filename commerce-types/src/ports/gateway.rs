//! External payment gateway port.

use crate::domain::Currency;
use crate::error::GatewayError;

/// One charge submission to the external gateway.
#[derive(Debug, Clone)]
pub struct ChargeRequest {
    /// Amount in the currency's minor unit
    pub amount_minor: i64,
    pub currency: Currency,
    /// Gateway payment-method token supplied by the caller
    pub payment_method_id: String,
    /// Ask the gateway to attempt settlement in the same call rather than
    /// a separate authorize/capture step
    pub confirm: bool,
    /// Deduplication key forwarded to the gateway
    pub idempotency_key: String,
}

/// The gateway's answer to a charge submission.
#[derive(Debug, Clone)]
pub struct Charge {
    /// Gateway-assigned transaction identifier
    pub id: String,
    /// Gateway-reported status string, verbatim
    pub status: String,
}

/// Outbound port for the external payment gateway.
///
/// One synchronous request per call; retries and deduplication are the
/// caller's concern (via the idempotency key).
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
    async fn charge(&self, req: ChargeRequest) -> Result<Charge, GatewayError>;
}
