//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use commerce_types::domain::{Currency, Money, OrderId, Payment, PaymentId, UserId};
use commerce_types::dto::{
    CreatePaymentRequest, ProcessPaymentRequest, RegisterUserRequest, RegisterUserResponse,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Backing store reachable", body = inline(serde_json::Value), example = json!({"status": "up"})),
        (status = 503, description = "Backing store unreachable", body = inline(serde_json::Value), example = json!({"status": "down", "error": "..."}))
    )
)]
async fn health() {}

/// Create a payment in PENDING state
#[utoipa::path(
    post,
    path = "/api/payments",
    tag = "payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 200, description = "Payment created", body = Payment),
        (status = 400, description = "Invalid amount or currency")
    )
)]
async fn create_payment() {}

/// Get a payment by ID
#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    tag = "payments",
    params(
        ("id" = String, Path, description = "Payment ID (UUID)")
    ),
    responses(
        (status = 200, description = "Payment found", body = Payment),
        (status = 404, description = "Payment not found")
    )
)]
async fn get_payment() {}

/// Submit a pending payment to the external gateway
#[utoipa::path(
    post,
    path = "/api/payments/{id}/process",
    tag = "payments",
    request_body = ProcessPaymentRequest,
    params(
        ("id" = String, Path, description = "Payment ID (UUID)")
    ),
    responses(
        (status = 200, description = "Payment processed", body = Payment),
        (status = 404, description = "Payment not found"),
        (status = 502, description = "Gateway failure, payment reset to PENDING")
    )
)]
async fn process_payment() {}

/// List payments for an order, newest first
#[utoipa::path(
    get,
    path = "/api/payments/order/{id}",
    tag = "payments",
    params(
        ("id" = String, Path, description = "Order ID (UUID)")
    ),
    responses(
        (status = 200, description = "Payments for the order", body = Vec<Payment>)
    )
)]
async fn payments_for_order() {}

/// List payments for a user, newest first
#[utoipa::path(
    get,
    path = "/api/payments/user/{id}",
    tag = "payments",
    params(
        ("id" = String, Path, description = "User ID (UUID)")
    ),
    responses(
        (status = 200, description = "Payments for the user", body = Vec<Payment>)
    )
)]
async fn payments_for_user() {}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/users/register",
    tag = "users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterUserResponse),
        (status = 400, description = "Missing or blank field"),
        (status = 409, description = "Email already in use")
    )
)]
async fn register_user() {}

/// OpenAPI documentation for the Commerce API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Commerce Payment Service API",
        version = "1.0.0",
        description = "Payment creation and gateway processing plus user registration for the commerce platform.",
        license(name = "MIT"),
    ),
    paths(
        health,
        create_payment,
        get_payment,
        process_payment,
        payments_for_order,
        payments_for_user,
        register_user,
    ),
    components(
        schemas(
            CreatePaymentRequest,
            ProcessPaymentRequest,
            RegisterUserRequest,
            RegisterUserResponse,
            Payment,
            Money,
            Currency,
            PaymentId,
            OrderId,
            UserId,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "payments", description = "Payment creation, processing, and lookups"),
        (name = "users", description = "User registration"),
    )
)]
pub struct ApiDoc;
