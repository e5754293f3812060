//! # Commerce Client SDK
//!
//! A typed Rust client for the Commerce API.

use commerce_types::{
    CreatePaymentRequest, Currency, OrderId, Payment, PaymentId, ProcessPaymentRequest,
    RegisterUserRequest, RegisterUserResponse, UserId,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Commerce API client.
pub struct CommerceClient {
    base_url: String,
    http: Client,
}

impl CommerceClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Creates a new payment in PENDING state.
    pub async fn create_payment(
        &self,
        order_id: OrderId,
        user_id: UserId,
        amount: &str,
        currency: Currency,
    ) -> Result<Payment, ClientError> {
        let req = CreatePaymentRequest {
            order_id,
            user_id,
            amount: amount.to_string(),
            currency,
        };
        self.post("/api/payments", &req).await
    }

    /// Gets a payment by ID.
    pub async fn get_payment(&self, id: PaymentId) -> Result<Payment, ClientError> {
        self.get(&format!("/api/payments/{}", id)).await
    }

    /// Submits a pending payment to the gateway.
    pub async fn process_payment(
        &self,
        id: PaymentId,
        payment_method_id: &str,
        idempotency_key: Option<String>,
    ) -> Result<Payment, ClientError> {
        let req = ProcessPaymentRequest {
            payment_method_id: payment_method_id.to_string(),
            idempotency_key,
        };
        self.post(&format!("/api/payments/{}/process", id), &req)
            .await
    }

    /// Lists payments for an order, newest first.
    pub async fn payments_for_order(&self, order_id: OrderId) -> Result<Vec<Payment>, ClientError> {
        self.get(&format!("/api/payments/order/{}", order_id)).await
    }

    /// Lists payments for a user, newest first.
    pub async fn payments_for_user(&self, user_id: UserId) -> Result<Vec<Payment>, ClientError> {
        self.get(&format!("/api/payments/user/{}", user_id)).await
    }

    /// Registers a new user.
    pub async fn register_user(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<RegisterUserResponse, ClientError> {
        let req = RegisterUserRequest {
            email: email.to_string(),
            password: password.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        };
        self.post("/api/users/register", &req).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = CommerceClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = CommerceClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
