//! PaymentService and UserService unit tests.

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use commerce_types::{
        AppError, Charge, ChargeRequest, CreatePaymentRequest, Currency, GatewayError,
        NewPayment, NewUser, OrderId, PasswordHasher, Payment, PaymentGateway, PaymentId,
        PaymentRepository, PaymentStatus, ProcessPaymentRequest, RegisterUserRequest, RepoError,
        User, UserId, UserRepository,
    };

    use crate::security::Argon2Hasher;
    use crate::{PaymentService, UserService};

    /// Simple in-memory repository for testing the service layer.
    ///
    /// State lives behind `Arc` so a clone kept outside the service still
    /// observes writes made through it.
    #[derive(Clone, Default)]
    struct MockRepo {
        payments: Arc<Mutex<HashMap<PaymentId, Payment>>>,
        users: Arc<Mutex<HashMap<String, User>>>,
    }

    #[async_trait]
    impl PaymentRepository for MockRepo {
        async fn create_payment(&self, new: NewPayment) -> Result<Payment, RepoError> {
            let payment = Payment::new(new.order_id, new.user_id, new.amount);
            self.payments
                .lock()
                .unwrap()
                .insert(payment.id, payment.clone());
            Ok(payment)
        }

        async fn get_payment(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
            Ok(self.payments.lock().unwrap().get(&id).cloned())
        }

        async fn begin_attempt(&self, id: PaymentId) -> Result<(Payment, i64), RepoError> {
            let mut payments = self.payments.lock().unwrap();
            let payment = payments.get_mut(&id).ok_or(RepoError::NotFound)?;
            let before = payment.clone();
            payment.status = PaymentStatus::Submitted;
            payment.attempts += 1;
            Ok((before, payment.attempts))
        }

        async fn record_gateway_result(
            &self,
            id: PaymentId,
            gateway_payment_id: &str,
            status: PaymentStatus,
        ) -> Result<Payment, RepoError> {
            let mut payments = self.payments.lock().unwrap();
            let payment = payments.get_mut(&id).ok_or(RepoError::NotFound)?;
            payment.gateway_payment_id = Some(gateway_payment_id.to_string());
            payment.status = status;
            Ok(payment.clone())
        }

        async fn record_attempt_failure(&self, id: PaymentId) -> Result<(), RepoError> {
            let mut payments = self.payments.lock().unwrap();
            if let Some(payment) = payments.get_mut(&id) {
                if payment.gateway_payment_id.is_none() {
                    payment.status = PaymentStatus::Pending;
                }
            }
            Ok(())
        }

        async fn list_payments_for_order(
            &self,
            order_id: OrderId,
        ) -> Result<Vec<Payment>, RepoError> {
            Ok(self
                .payments
                .lock()
                .unwrap()
                .values()
                .filter(|p| p.order_id == order_id)
                .cloned()
                .collect())
        }

        async fn list_payments_for_user(&self, user_id: UserId) -> Result<Vec<Payment>, RepoError> {
            Ok(self
                .payments
                .lock()
                .unwrap()
                .values()
                .filter(|p| p.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn ping(&self) -> Result<(), RepoError> {
            Ok(())
        }
    }

    #[async_trait]
    impl UserRepository for MockRepo {
        async fn create_user(&self, new: NewUser) -> Result<User, RepoError> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(&new.email) {
                return Err(RepoError::Conflict("Email already in use".into()));
            }
            let user = User::new(new.email, new.password_hash, new.first_name, new.last_name);
            users.insert(user.email.clone(), user.clone());
            Ok(user)
        }

        async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
            Ok(self.users.lock().unwrap().get(email).cloned())
        }
    }

    /// Scripted gateway that records every charge request it receives.
    #[derive(Clone, Default)]
    struct MockGateway {
        responses: Arc<Mutex<VecDeque<Result<Charge, GatewayError>>>>,
        calls: Arc<Mutex<Vec<ChargeRequest>>>,
    }

    impl MockGateway {
        fn respond_with(self, result: Result<Charge, GatewayError>) -> Self {
            self.responses.lock().unwrap().push_back(result);
            self
        }
    }

    #[async_trait]
    impl PaymentGateway for MockGateway {
        async fn charge(&self, req: ChargeRequest) -> Result<Charge, GatewayError> {
            self.calls.lock().unwrap().push(req);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Request("no scripted response".into())))
        }
    }

    fn payment_service(
        gateway: MockGateway,
    ) -> (PaymentService<MockRepo, MockGateway>, MockRepo, MockGateway) {
        let repo = MockRepo::default();
        (
            PaymentService::new(repo.clone(), gateway.clone()),
            repo,
            gateway,
        )
    }

    fn create_req(amount: &str) -> CreatePaymentRequest {
        CreatePaymentRequest {
            order_id: OrderId::new(),
            user_id: UserId::new(),
            amount: amount.to_string(),
            currency: Currency::USD,
        }
    }

    fn process_req() -> ProcessPaymentRequest {
        ProcessPaymentRequest {
            payment_method_id: "pm_card_visa".to_string(),
            idempotency_key: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Payment creation
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_create_payment_parses_decimal_amount() {
        let (service, _, _) = payment_service(MockGateway::default());

        let payment = service.create_payment(create_req("49.99")).await.unwrap();

        assert_eq!(payment.amount.minor_units(), 4999);
        assert_eq!(payment.amount.currency(), Currency::USD);
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert!(payment.gateway_payment_id.is_none());
        assert_eq!(payment.attempts, 0);
    }

    #[tokio::test]
    async fn test_create_payment_rejects_precision_loss() {
        let (service, _, _) = payment_service(MockGateway::default());

        let err = service.create_payment(create_req("49.999")).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_payment_rejects_non_positive() {
        let (service, _, _) = payment_service(MockGateway::default());

        let err = service.create_payment(create_req("0")).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Payment processing
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_process_payment_success() {
        let gateway = MockGateway::default().respond_with(Ok(Charge {
            id: "pi_123".to_string(),
            status: "succeeded".to_string(),
        }));
        let (service, _, gateway) = payment_service(gateway);

        let created = service.create_payment(create_req("49.99")).await.unwrap();
        let processed = service
            .process_payment(created.id, process_req())
            .await
            .unwrap();

        assert_eq!(processed.status, PaymentStatus::Succeeded);
        assert_eq!(processed.gateway_payment_id.as_deref(), Some("pi_123"));

        let calls = gateway.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].amount_minor, 4999);
        assert_eq!(calls[0].currency, Currency::USD);
        assert!(calls[0].confirm);
        assert_eq!(calls[0].idempotency_key, format!("{}-1", created.id));
    }

    #[tokio::test]
    async fn test_process_payment_uppercases_unknown_status() {
        let gateway = MockGateway::default().respond_with(Ok(Charge {
            id: "pi_999".to_string(),
            status: "requires_action".to_string(),
        }));
        let (service, _, _) = payment_service(gateway);

        let created = service.create_payment(create_req("10.00")).await.unwrap();
        let processed = service
            .process_payment(created.id, process_req())
            .await
            .unwrap();

        assert_eq!(
            processed.status,
            PaymentStatus::Other("REQUIRES_ACTION".to_string())
        );
    }

    #[tokio::test]
    async fn test_process_payment_caller_idempotency_key_wins() {
        let gateway = MockGateway::default().respond_with(Ok(Charge {
            id: "pi_1".to_string(),
            status: "succeeded".to_string(),
        }));
        let (service, _, gateway) = payment_service(gateway);

        let created = service.create_payment(create_req("10.00")).await.unwrap();
        let req = ProcessPaymentRequest {
            payment_method_id: "pm_card_visa".to_string(),
            idempotency_key: Some("retry-abc".to_string()),
        };
        service.process_payment(created.id, req).await.unwrap();

        let calls = gateway.calls.lock().unwrap();
        assert_eq!(calls[0].idempotency_key, "retry-abc");
    }

    #[tokio::test]
    async fn test_process_payment_unknown_id() {
        let (service, _, gateway) = payment_service(MockGateway::default());

        let err = service
            .process_payment(PaymentId::new(), process_req())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(gateway.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_process_payment_gateway_decline_resets_to_pending() {
        let gateway = MockGateway::default().respond_with(Err(GatewayError::Declined {
            code: Some("card_declined".to_string()),
            message: "Your card was declined.".to_string(),
        }));
        let (service, repo, _) = payment_service(gateway);

        let created = service.create_payment(create_req("49.99")).await.unwrap();
        let err = service
            .process_payment(created.id, process_req())
            .await
            .unwrap_err();

        match err {
            AppError::Upstream(msg) => assert!(msg.contains("Your card was declined.")),
            other => panic!("expected Upstream, got {:?}", other),
        }

        let stored = repo.get_payment(created.id).await.unwrap().unwrap();
        assert_eq!(stored.status, PaymentStatus::Pending);
        assert!(stored.gateway_payment_id.is_none());
        assert_eq!(stored.attempts, 1);
    }

    #[tokio::test]
    async fn test_process_payment_blank_method_rejected_without_attempt() {
        let (service, repo, gateway) = payment_service(MockGateway::default());

        let created = service.create_payment(create_req("10.00")).await.unwrap();
        let req = ProcessPaymentRequest {
            payment_method_id: "  ".to_string(),
            idempotency_key: None,
        };
        let err = service.process_payment(created.id, req).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(gateway.calls.lock().unwrap().is_empty());

        let stored = repo.get_payment(created.id).await.unwrap().unwrap();
        assert_eq!(stored.attempts, 0);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Lookups
    // ─────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_lookups_empty_lists() {
        let (service, _, _) = payment_service(MockGateway::default());

        let by_order = service.payments_for_order(OrderId::new()).await.unwrap();
        let by_user = service.payments_for_user(UserId::new()).await.unwrap();

        assert!(by_order.is_empty());
        assert!(by_user.is_empty());
    }

    // ─────────────────────────────────────────────────────────────────────
    // User registration
    // ─────────────────────────────────────────────────────────────────────

    fn user_service() -> (UserService<MockRepo, Argon2Hasher>, MockRepo) {
        let repo = MockRepo::default();
        (UserService::new(repo.clone(), Argon2Hasher::new()), repo)
    }

    fn register_req(email: &str) -> RegisterUserRequest {
        RegisterUserRequest {
            email: email.to_string(),
            password: "CorrectHorse9!".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let (service, _) = user_service();

        let user = service.register(register_req("ada@example.com")).await.unwrap();

        assert_eq!(user.role, "USER");
        assert_ne!(user.password_hash, "CorrectHorse9!");
        assert!(Argon2Hasher::new().verify("CorrectHorse9!", &user.password_hash));
    }

    #[tokio::test]
    async fn test_register_blank_field_no_write() {
        let (service, repo) = user_service();

        let mut req = register_req("ada@example.com");
        req.first_name = "  ".to_string();
        let err = service.register(req).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(repo.users.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let (service, _) = user_service();

        service.register(register_req("dup@example.com")).await.unwrap();
        let err = service
            .register(register_req("dup@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }
}
