//! # Commerce Gateway
//!
//! Outbound HTTP adapter for the external payment gateway. Implements the
//! `PaymentGateway` port with a single synchronous charge call using
//! confirm semantics: the gateway is asked to attempt settlement in the
//! same request rather than a separate authorize/capture step.
//!
//! The wire format follows the provider's intents API: a form-encoded
//! POST authenticated with a bearer secret key, deduplicated with an
//! `Idempotency-Key` header.

use async_trait::async_trait;
use serde::Deserialize;

use commerce_types::{Charge, ChargeRequest, GatewayError, PaymentGateway};

/// HTTP client for the payment gateway.
pub struct GatewayClient {
    base_url: String,
    secret_key: String,
    http: reqwest::Client,
}

impl GatewayClient {
    /// Creates a new gateway client.
    pub fn new(base_url: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
            http: reqwest::Client::new(),
        }
    }
}

/// Successful intent creation response.
#[derive(Debug, Deserialize)]
struct IntentResponse {
    id: String,
    status: String,
}

/// Error envelope the gateway wraps failures in.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    decline_code: Option<String>,
}

#[async_trait]
impl PaymentGateway for GatewayClient {
    #[tracing::instrument(skip(self, req), fields(amount = req.amount_minor, currency = %req.currency))]
    async fn charge(&self, req: ChargeRequest) -> Result<Charge, GatewayError> {
        let form = [
            ("amount", req.amount_minor.to_string()),
            ("currency", req.currency.gateway_code().to_string()),
            ("payment_method", req.payment_method_id.clone()),
            ("confirm", req.confirm.to_string()),
        ];

        let resp = self
            .http
            .post(format!("{}/v1/payment_intents", self.base_url))
            .bearer_auth(&self.secret_key)
            .header("Idempotency-Key", &req.idempotency_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        if status.is_success() {
            let intent: IntentResponse = serde_json::from_str(&body)
                .map_err(|e| GatewayError::InvalidResponse(format!("{}: {}", e, body)))?;
            Ok(Charge {
                id: intent.id,
                status: intent.status,
            })
        } else {
            match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) => Err(GatewayError::Declined {
                    code: err.error.decline_code.or(err.error.code),
                    message: err.error.message,
                }),
                Err(_) => Err(GatewayError::Request(format!("HTTP {}: {}", status, body))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = GatewayClient::new("https://gateway.test/", "sk_test_123");
        assert_eq!(client.base_url, "https://gateway.test");
    }

    #[test]
    fn test_error_envelope_parsing() {
        let body = r#"{"error":{"message":"Your card was declined.","code":"card_error","decline_code":"generic_decline"}}"#;
        let parsed: ErrorResponse = serde_json::from_str(body).unwrap();

        assert_eq!(parsed.error.message, "Your card was declined.");
        assert_eq!(parsed.error.decline_code.as_deref(), Some("generic_decline"));
    }

    #[test]
    fn test_error_envelope_without_codes() {
        let body = r#"{"error":{"message":"No such payment_method"}}"#;
        let parsed: ErrorResponse = serde_json::from_str(body).unwrap();

        assert!(parsed.error.code.is_none());
        assert!(parsed.error.decline_code.is_none());
    }
}
