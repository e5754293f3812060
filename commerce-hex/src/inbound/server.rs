//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use commerce_types::{PasswordHasher, PaymentGateway, PaymentRepository, UserRepository};

use super::handlers::{self, AppState};
use crate::openapi::ApiDoc;
use crate::{PaymentService, UserService};

/// HTTP Server for the Commerce API.
pub struct HttpServer<R, G, H>
where
    R: PaymentRepository + UserRepository,
    G: PaymentGateway,
    H: PasswordHasher,
{
    state: Arc<AppState<R, G, H>>,
}

impl<R, G, H> HttpServer<R, G, H>
where
    R: PaymentRepository + UserRepository,
    G: PaymentGateway,
    H: PasswordHasher,
{
    /// Creates a new HTTP server with the given services.
    pub fn new(payments: PaymentService<R, G>, users: UserService<R, H>) -> Self {
        Self {
            state: Arc::new(AppState { payments, users }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/health", get(handlers::health::<R, G, H>))
            .route("/api/payments", post(handlers::create_payment::<R, G, H>))
            .route("/api/payments/{id}", get(handlers::get_payment::<R, G, H>))
            .route(
                "/api/payments/{id}/process",
                post(handlers::process_payment::<R, G, H>),
            )
            .route(
                "/api/payments/order/{id}",
                get(handlers::payments_for_order::<R, G, H>),
            )
            .route(
                "/api/payments/user/{id}",
                get(handlers::payments_for_user::<R, G, H>),
            )
            .route(
                "/api/users/register",
                post(handlers::register_user::<R, G, H>),
            )
            .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .layer(metrics)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
