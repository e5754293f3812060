//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use commerce_types::{
    AppError, CreatePaymentRequest, OrderId, PasswordHasher, PaymentGateway, PaymentId,
    PaymentRepository, ProcessPaymentRequest, RegisterUserRequest, RegisterUserResponse, UserId,
    UserRepository,
};

use crate::{PaymentService, UserService};

/// Application state shared across handlers.
pub struct AppState<R, G, H>
where
    R: PaymentRepository + UserRepository,
    G: PaymentGateway,
    H: PasswordHasher,
{
    pub payments: PaymentService<R, G>,
    pub users: UserService<R, H>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.0.to_string(),
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint. Failures are reported, never propagated.
#[tracing::instrument(skip(state))]
pub async fn health<R, G, H>(State(state): State<Arc<AppState<R, G, H>>>) -> Response
where
    R: PaymentRepository + UserRepository,
    G: PaymentGateway,
    H: PasswordHasher,
{
    match state.payments.health().await {
        Ok(()) => Json(serde_json::json!({ "status": "up" })).into_response(),
        Err(err) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "status": "down", "error": err.to_string() })),
        )
            .into_response(),
    }
}

/// Create a payment in PENDING state.
#[tracing::instrument(skip(state), fields(order_id = %req.order_id, amount = %req.amount))]
pub async fn create_payment<R, G, H>(
    State(state): State<Arc<AppState<R, G, H>>>,
    Json(req): Json<CreatePaymentRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: PaymentRepository + UserRepository,
    G: PaymentGateway,
    H: PasswordHasher,
{
    let payment = state.payments.create_payment(req).await?;
    Ok(Json(payment))
}

/// Get a payment by ID.
#[tracing::instrument(skip(state), fields(payment_id = %id))]
pub async fn get_payment<R, G, H>(
    State(state): State<Arc<AppState<R, G, H>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    R: PaymentRepository + UserRepository,
    G: PaymentGateway,
    H: PasswordHasher,
{
    let payment_id: PaymentId = id
        .parse()
        .map_err(|_| AppError::Validation("Invalid payment ID".into()))?;

    let payment = state.payments.get_payment(payment_id).await?;
    Ok(Json(payment))
}

/// Submit a pending payment to the gateway.
#[tracing::instrument(skip(state, req), fields(payment_id = %id))]
pub async fn process_payment<R, G, H>(
    State(state): State<Arc<AppState<R, G, H>>>,
    Path(id): Path<String>,
    Json(req): Json<ProcessPaymentRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: PaymentRepository + UserRepository,
    G: PaymentGateway,
    H: PasswordHasher,
{
    let payment_id: PaymentId = id
        .parse()
        .map_err(|_| AppError::Validation("Invalid payment ID".into()))?;

    let payment = state.payments.process_payment(payment_id, req).await?;
    Ok(Json(payment))
}

/// List payments for an order, newest first.
#[tracing::instrument(skip(state), fields(order_id = %id))]
pub async fn payments_for_order<R, G, H>(
    State(state): State<Arc<AppState<R, G, H>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    R: PaymentRepository + UserRepository,
    G: PaymentGateway,
    H: PasswordHasher,
{
    let order_id: OrderId = id
        .parse()
        .map_err(|_| AppError::Validation("Invalid order ID".into()))?;

    let payments = state.payments.payments_for_order(order_id).await?;
    Ok(Json(payments))
}

/// List payments for a user, newest first.
#[tracing::instrument(skip(state), fields(user_id = %id))]
pub async fn payments_for_user<R, G, H>(
    State(state): State<Arc<AppState<R, G, H>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    R: PaymentRepository + UserRepository,
    G: PaymentGateway,
    H: PasswordHasher,
{
    let user_id: UserId = id
        .parse()
        .map_err(|_| AppError::Validation("Invalid user ID".into()))?;

    let payments = state.payments.payments_for_user(user_id).await?;
    Ok(Json(payments))
}

/// Register a new user.
#[tracing::instrument(skip(state, req), fields(email = %req.email))]
pub async fn register_user<R, G, H>(
    State(state): State<Arc<AppState<R, G, H>>>,
    Json(req): Json<RegisterUserRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    R: PaymentRepository + UserRepository,
    G: PaymentGateway,
    H: PasswordHasher,
{
    state.users.register(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterUserResponse {
            message: "User registered successfully".into(),
        }),
    ))
}
