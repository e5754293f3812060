//! Application services.
//!
//! Orchestrate domain operations through the repository, gateway, and
//! hasher ports. Contains NO infrastructure logic - pure business
//! orchestration.

use commerce_types::{
    AppError, ChargeRequest, CreatePaymentRequest, Money, NewPayment, NewUser, OrderId,
    PasswordHasher, Payment, PaymentGateway, PaymentId, PaymentRepository, PaymentStatus,
    ProcessPaymentRequest, RegisterUserRequest, User, UserId, UserRepository,
};

// ─────────────────────────────────────────────────────────────────────────────
// Payment Service
// ─────────────────────────────────────────────────────────────────────────────

/// Application service for payment operations.
///
/// Generic over `R: PaymentRepository` and `G: PaymentGateway` - the
/// adapters are injected at compile time. This enables:
/// - Swapping repositories without code changes
/// - Testing with in-memory repo and a scripted gateway
/// - Compile-time checks for port implementation
pub struct PaymentService<R: PaymentRepository, G: PaymentGateway> {
    repo: R,
    gateway: G,
}

impl<R: PaymentRepository, G: PaymentGateway> PaymentService<R, G> {
    /// Creates a new payment service with the given adapters.
    pub fn new(repo: R, gateway: G) -> Self {
        Self { repo, gateway }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Creates a new payment in PENDING state.
    ///
    /// The decimal amount string is parsed exactly once, here. Anything the
    /// currency's minor unit cannot represent is rejected up front.
    pub async fn create_payment(&self, req: CreatePaymentRequest) -> Result<Payment, AppError> {
        let amount = Money::from_decimal_str(&req.amount, req.currency)?;

        self.repo
            .create_payment(NewPayment {
                order_id: req.order_id,
                user_id: req.user_id,
                amount,
            })
            .await
            .map_err(Into::into)
    }

    /// Gets a payment by ID.
    pub async fn get_payment(&self, id: PaymentId) -> Result<Payment, AppError> {
        self.repo
            .get_payment(id)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| AppError::NotFound(format!("Payment {}", id))))
    }

    /// Submits a pending payment to the external gateway.
    ///
    /// The flow keeps storage transactions short and never holds one open
    /// across the network call:
    /// 1. Mark the payment SUBMITTED and bump its attempt counter.
    /// 2. Charge the gateway (outside any storage transaction).
    /// 3. Record the gateway's verdict, or reset to PENDING on failure.
    pub async fn process_payment(
        &self,
        id: PaymentId,
        req: ProcessPaymentRequest,
    ) -> Result<Payment, AppError> {
        if req.payment_method_id.trim().is_empty() {
            return Err(AppError::Validation(
                "payment_method_id cannot be empty".into(),
            ));
        }

        let (payment, attempt) = self.repo.begin_attempt(id).await?;

        let idempotency_key = req
            .idempotency_key
            .unwrap_or_else(|| format!("{}-{}", id, attempt));

        let charge = ChargeRequest {
            amount_minor: payment.amount.minor_units(),
            currency: payment.amount.currency(),
            payment_method_id: req.payment_method_id,
            confirm: true,
            idempotency_key,
        };

        match self.gateway.charge(charge).await {
            Ok(result) => {
                let status = PaymentStatus::from_gateway(&result.status);
                self.repo
                    .record_gateway_result(id, &result.id, status)
                    .await
                    .map_err(Into::into)
            }
            Err(gateway_err) => {
                if let Err(repo_err) = self.repo.record_attempt_failure(id).await {
                    tracing::warn!(
                        payment_id = %id,
                        error = %repo_err,
                        "failed to reset payment after gateway error"
                    );
                }
                Err(gateway_err.into())
            }
        }
    }

    /// Lists payments for an order, newest first.
    pub async fn payments_for_order(&self, order_id: OrderId) -> Result<Vec<Payment>, AppError> {
        self.repo
            .list_payments_for_order(order_id)
            .await
            .map_err(Into::into)
    }

    /// Lists payments for a user, newest first.
    pub async fn payments_for_user(&self, user_id: UserId) -> Result<Vec<Payment>, AppError> {
        self.repo
            .list_payments_for_user(user_id)
            .await
            .map_err(Into::into)
    }

    /// Verifies the backing store is reachable.
    pub async fn health(&self) -> Result<(), AppError> {
        self.repo.ping().await.map_err(Into::into)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User Service
// ─────────────────────────────────────────────────────────────────────────────

/// Application service for user registration.
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repo: R,
    hasher: H,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    /// Creates a new user service with the given adapters.
    pub fn new(repo: R, hasher: H) -> Self {
        Self { repo, hasher }
    }

    /// Registers a new user.
    ///
    /// Email uniqueness is NOT pre-checked here; the repository's unique
    /// constraint is the single source of truth, so concurrent duplicate
    /// registrations cannot both succeed.
    pub async fn register(&self, req: RegisterUserRequest) -> Result<User, AppError> {
        if req.email.trim().is_empty()
            || req.password.trim().is_empty()
            || req.first_name.trim().is_empty()
            || req.last_name.trim().is_empty()
        {
            return Err(AppError::Validation("All fields are required".into()));
        }

        let password_hash = self.hasher.hash(&req.password)?;

        self.repo
            .create_user(NewUser {
                email: req.email,
                password_hash,
                first_name: req.first_name,
                last_name: req.last_name,
            })
            .await
            .map_err(Into::into)
    }

    /// Fetches a user by email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.repo.find_user_by_email(email).await.map_err(Into::into)
    }
}
