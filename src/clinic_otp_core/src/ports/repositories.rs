use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::{
    email::Email,
    otp_record::{NewOtpRecord, OtpRecord, OtpRecordId},
};

// CredentialStore port trait and errors
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("OTP record not found")]
    RecordNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for CredentialStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::RecordNotFound, Self::RecordNotFound)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persists a new record, stamping `created_at` and `expires_at`.
    async fn insert(&self, record: NewOtpRecord) -> Result<OtpRecord, CredentialStoreError>;

    /// Newest record for `email` that is unverified and expires after `now`.
    async fn query_active(
        &self,
        email: &Email,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, CredentialStoreError>;

    /// Fails with `RecordNotFound` if the record is missing or already verified.
    async fn increment_attempts(&self, id: &OtpRecordId) -> Result<(), CredentialStoreError>;

    /// Fails with `RecordNotFound` if the record is missing or already verified.
    async fn mark_verified(&self, id: &OtpRecordId) -> Result<(), CredentialStoreError>;
}
