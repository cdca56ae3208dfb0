use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use clinic_otp_application::{IssueOtpError, VerifyOtpError};
use clinic_otp_core::{CredentialStoreError, EmailError, OtpCodeError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Deserialize)]
pub struct VerifyOtpErrorResponse {
    pub error: String,
    pub verified: bool,
}

/// Every failure is reported as `400` with a caller-safe message; internal
/// details are only logged.
#[derive(Debug, Error)]
pub enum OtpApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("No valid OTP found. Please request a new one.")]
    NoActiveCode,

    #[error("Too many failed attempts. Please request a new OTP.")]
    TooManyAttempts,

    #[error("Invalid OTP code")]
    InvalidCode,

    #[error("Failed to process verification code")]
    StoreError(String),

    #[error("Failed to send verification email")]
    DeliveryError(String),
}

impl OtpApiError {
    fn log(&self) {
        match self {
            OtpApiError::StoreError(detail) => {
                tracing::error!(detail = %detail, "Credential store failure")
            }
            OtpApiError::DeliveryError(detail) => {
                tracing::error!(detail = %detail, "Email delivery failure")
            }
            _ => tracing::info!(error = %self, "Rejected OTP request"),
        }
    }
}

impl IntoResponse for OtpApiError {
    fn into_response(self) -> Response {
        self.log();

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

/// Verify endpoint flavour of [`OtpApiError`]; the body also carries `verified: false`.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct VerifyOtpApiError(#[from] pub OtpApiError);

impl IntoResponse for VerifyOtpApiError {
    fn into_response(self) -> Response {
        self.0.log();

        let body = Json(VerifyOtpErrorResponse {
            error: self.0.to_string(),
            verified: false,
        });

        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

impl From<EmailError> for OtpApiError {
    fn from(error: EmailError) -> Self {
        OtpApiError::InvalidInput(error.to_string())
    }
}

impl From<OtpCodeError> for OtpApiError {
    fn from(error: OtpCodeError) -> Self {
        OtpApiError::InvalidInput(error.to_string())
    }
}

impl From<JsonRejection> for OtpApiError {
    fn from(error: JsonRejection) -> Self {
        OtpApiError::InvalidInput(format!("Invalid request body: {}", error.body_text()))
    }
}

impl From<CredentialStoreError> for OtpApiError {
    fn from(error: CredentialStoreError) -> Self {
        OtpApiError::StoreError(error.to_string())
    }
}

impl From<IssueOtpError> for OtpApiError {
    fn from(error: IssueOtpError) -> Self {
        match error {
            IssueOtpError::CredentialStoreError(e) => e.into(),
            IssueOtpError::EmailError(e) => OtpApiError::DeliveryError(e),
        }
    }
}

impl From<VerifyOtpError> for OtpApiError {
    fn from(error: VerifyOtpError) -> Self {
        match error {
            VerifyOtpError::NoActiveCode => OtpApiError::NoActiveCode,
            VerifyOtpError::TooManyAttempts => OtpApiError::TooManyAttempts,
            VerifyOtpError::InvalidCode => OtpApiError::InvalidCode,
            VerifyOtpError::CredentialStoreError(e) => e.into(),
        }
    }
}

impl From<EmailError> for VerifyOtpApiError {
    fn from(error: EmailError) -> Self {
        OtpApiError::from(error).into()
    }
}

impl From<OtpCodeError> for VerifyOtpApiError {
    fn from(error: OtpCodeError) -> Self {
        OtpApiError::from(error).into()
    }
}

impl From<JsonRejection> for VerifyOtpApiError {
    fn from(error: JsonRejection) -> Self {
        OtpApiError::from(error).into()
    }
}

impl From<VerifyOtpError> for VerifyOtpApiError {
    fn from(error: VerifyOtpError) -> Self {
        OtpApiError::from(error).into()
    }
}
