//! # Clinic OTP - Email verification service library
//!
//! This is a facade crate that re-exports all public APIs from the OTP service components.
//! Use this crate to get access to all verification functionality in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! clinic_otp = { path = "../clinic_otp" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `OtpCode`, `OtpRecord`, etc.
//! - **Repository traits**: `CredentialStore`
//! - **Use cases**: `IssueOtpUseCase`, `VerifyOtpUseCase`
//! - **Adapters**: `PostgresCredentialStore`, `HashMapCredentialStore`, `BrevoEmailClient`, etc.
//! - **Service**: `OtpService` - The main entry point for the OTP service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use clinic_otp_core::*;
}

// Re-export most commonly used core types at the root level
pub use clinic_otp_core::{
    DisplayName, Email, EmailError, NewOtpRecord, OtpCode, OtpCodeError, OtpPolicy,
    OtpPolicyError, OtpRecord, OtpRecordId,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use clinic_otp_core::{CredentialStore, CredentialStoreError};
}

// Re-export ports at root level
pub use clinic_otp_core::{Clock, CredentialStore, CredentialStoreError, EmailClient, SystemClock};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use clinic_otp_application::*;
}

// Re-export use cases at root level
pub use clinic_otp_application::{IssueOtpUseCase, VerifyOtpUseCase};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use clinic_otp_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use clinic_otp_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use clinic_otp_adapters::email::*;
    }

    /// Configuration
    pub mod config {
        pub use clinic_otp_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use clinic_otp_adapters::{
    config::OtpServiceSetting,
    email::{BrevoEmailClient, MockEmailClient},
    persistence::{HashMapCredentialStore, PostgresCredentialStore},
};

// ============================================================================
// OTP Service (Main Entry Point)
// ============================================================================

/// Main OTP service
pub use clinic_otp_service::{OtpService, configure_postgresql, get_postgres_pool};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
