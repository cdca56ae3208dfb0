mod helpers;
mod otp_service;
mod telemetry;

pub use helpers::{configure_postgresql, get_postgres_pool};
pub use otp_service::OtpService;

// Re-export commonly used types
pub use clinic_otp_core::{CredentialStore, Email, EmailClient, OtpPolicy};
