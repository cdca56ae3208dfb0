use axum::{
    Router,
    http::{HeaderName, Method},
    routing::post,
};
use clinic_otp_adapters::{
    config::cors::ALLOWED_HEADERS,
    http::routes::{send_otp, verify_otp},
};
use clinic_otp_core::{CredentialStore, EmailClient, OtpPolicy};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::telemetry::{make_span_with_request_id, on_request, on_response};

/// OTP service exposing the issue and verify endpoints
pub struct OtpService {
    router: Router,
}

impl OtpService {
    /// Create a new OtpService with the provided store, email client and policy
    ///
    /// # Arguments
    /// * `credential_store` - Store for OTP records (must be Clone)
    /// * `email_client` - Client for sending emails (must be Clone)
    /// * `policy` - Code validity window and attempt limit
    pub fn new<S, E>(credential_store: S, email_client: E, policy: OtpPolicy) -> Self
    where
        S: CredentialStore + Clone + 'static,
        E: EmailClient + Clone + 'static,
    {
        let router = Router::new()
            // Issuing needs the store and the email client
            .route("/send-otp", post(send_otp::<S, E>))
            .with_state((credential_store.clone(), email_client, policy))
            // Verifying only needs the store
            .route("/verify-otp", post(verify_otp::<S>))
            .with_state((credential_store, policy));

        Self { router }
    }

    /// The CORS layer also answers every OPTIONS request, with or without an `Origin`.
    fn with_cors_layer(mut self) -> Self {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::POST, Method::OPTIONS])
            .allow_headers(ALLOWED_HEADERS.map(HeaderName::from_static));

        self.router = self.router.layer(cors);
        self
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the OtpService into a router that can be nested into another application
    pub fn into_router(self) -> Router {
        self.with_cors_layer().with_trace_layer().router
    }

    /// Run the OTP service as a standalone server until Ctrl-C is received
    pub async fn run_standalone(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let router = self.into_router();

        tracing::info!("OTP service listening on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down OTP service");
}
