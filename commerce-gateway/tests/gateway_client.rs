//! Gateway client tests against a local fake gateway.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;

use commerce_gateway::GatewayClient;
use commerce_types::{ChargeRequest, Currency, GatewayError, PaymentGateway};

/// What the fake gateway should answer with.
#[derive(Clone)]
struct FakeResponse {
    status: StatusCode,
    body: &'static str,
}

#[derive(Clone)]
struct FakeState {
    response: FakeResponse,
    seen: Arc<Mutex<Option<HashMap<String, String>>>>,
}

async fn intents_handler(
    State(state): State<FakeState>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    *state.seen.lock().unwrap() = Some(form);
    (state.response.status, state.response.body)
}

/// Spawns a fake gateway and returns its base URL plus the captured form.
async fn spawn_gateway(response: FakeResponse) -> (String, Arc<Mutex<Option<HashMap<String, String>>>>) {
    let seen = Arc::new(Mutex::new(None));
    let state = FakeState {
        response,
        seen: seen.clone(),
    };
    let app = Router::new()
        .route("/v1/payment_intents", post(intents_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), seen)
}

fn charge_request() -> ChargeRequest {
    ChargeRequest {
        amount_minor: 4999,
        currency: Currency::USD,
        payment_method_id: "pm_card_visa".to_string(),
        confirm: true,
        idempotency_key: "pay-1".to_string(),
    }
}

#[tokio::test]
async fn test_charge_success_maps_id_and_status() {
    let (base_url, seen) = spawn_gateway(FakeResponse {
        status: StatusCode::OK,
        body: r#"{"id":"pi_123","status":"succeeded"}"#,
    })
    .await;

    let client = GatewayClient::new(base_url, "sk_test_123");
    let charge = client.charge(charge_request()).await.unwrap();

    assert_eq!(charge.id, "pi_123");
    assert_eq!(charge.status, "succeeded");

    let form = seen.lock().unwrap().clone().unwrap();
    assert_eq!(form.get("amount").map(String::as_str), Some("4999"));
    assert_eq!(form.get("currency").map(String::as_str), Some("usd"));
    assert_eq!(form.get("payment_method").map(String::as_str), Some("pm_card_visa"));
    assert_eq!(form.get("confirm").map(String::as_str), Some("true"));
}

#[tokio::test]
async fn test_charge_decline_surfaces_provider_detail() {
    let (base_url, _seen) = spawn_gateway(FakeResponse {
        status: StatusCode::PAYMENT_REQUIRED,
        body: r#"{"error":{"message":"Your card was declined.","decline_code":"generic_decline"}}"#,
    })
    .await;

    let client = GatewayClient::new(base_url, "sk_test_123");
    let err = client.charge(charge_request()).await.unwrap_err();

    match err {
        GatewayError::Declined { code, message } => {
            assert_eq!(code.as_deref(), Some("generic_decline"));
            assert_eq!(message, "Your card was declined.");
        }
        other => panic!("expected Declined, got {:?}", other),
    }
}

#[tokio::test]
async fn test_charge_malformed_success_body_is_invalid_response() {
    let (base_url, _seen) = spawn_gateway(FakeResponse {
        status: StatusCode::OK,
        body: "not json",
    })
    .await;

    let client = GatewayClient::new(base_url, "sk_test_123");
    let err = client.charge(charge_request()).await.unwrap_err();

    assert!(matches!(err, GatewayError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_charge_non_envelope_error_is_request_error() {
    let (base_url, _seen) = spawn_gateway(FakeResponse {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        body: "gateway exploded",
    })
    .await;

    let client = GatewayClient::new(base_url, "sk_test_123");
    let err = client.charge(charge_request()).await.unwrap_err();

    assert!(matches!(err, GatewayError::Request(_)));
}
