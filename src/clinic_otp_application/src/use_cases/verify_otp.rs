use clinic_otp_core::{
    Clock, CredentialStore, CredentialStoreError, Email, OtpCode, OtpPolicy, SystemClock,
};

/// Error types for verify OTP use case
#[derive(Debug, thiserror::Error)]
pub enum VerifyOtpError {
    #[error("No valid OTP found")]
    NoActiveCode,
    #[error("Too many failed attempts")]
    TooManyAttempts,
    #[error("Invalid OTP code")]
    InvalidCode,
    #[error("Credential store error: {0}")]
    CredentialStoreError(#[from] CredentialStoreError),
}

/// Verify OTP use case - checks a submitted code against the newest active record
pub struct VerifyOtpUseCase<S, C = SystemClock>
where
    S: CredentialStore,
    C: Clock,
{
    credential_store: S,
    policy: OtpPolicy,
    clock: C,
}

impl<S> VerifyOtpUseCase<S, SystemClock>
where
    S: CredentialStore,
{
    pub fn new(credential_store: S, policy: OtpPolicy) -> Self {
        Self::with_clock(credential_store, policy, SystemClock)
    }
}

impl<S, C> VerifyOtpUseCase<S, C>
where
    S: CredentialStore,
    C: Clock,
{
    pub fn with_clock(credential_store: S, policy: OtpPolicy, clock: C) -> Self {
        Self {
            credential_store,
            policy,
            clock,
        }
    }

    /// Execute the verify OTP use case
    ///
    /// # Arguments
    /// * `email` - Email the code was issued to
    /// * `submitted_code` - Code as typed by the user, compared verbatim
    ///
    /// # Returns
    /// Ok(Email) once the record has been durably marked verified, or VerifyOtpError
    #[tracing::instrument(name = "VerifyOtpUseCase::execute", skip(self, submitted_code))]
    pub async fn execute(
        &self,
        email: Email,
        submitted_code: OtpCode,
    ) -> Result<Email, VerifyOtpError> {
        let now = self.clock.now();

        // Lookup failures are reported like a missing code
        let record = match self.credential_store.query_active(&email, now).await {
            Ok(Some(record)) => record,
            Ok(None) => return Err(VerifyOtpError::NoActiveCode),
            Err(e) => {
                tracing::error!(error = %e, "Failed to look up active OTP record");
                return Err(VerifyOtpError::NoActiveCode);
            }
        };

        if record.is_locked(self.policy.max_attempts()) {
            tracing::warn!(record_id = %record.id, "OTP record is locked");
            return Err(VerifyOtpError::TooManyAttempts);
        }

        if record.otp_code != submitted_code {
            self.credential_store
                .increment_attempts(&record.id)
                .await
                .inspect_err(|e| tracing::error!(error = %e, "Failed to record OTP attempt"))?;
            return Err(VerifyOtpError::InvalidCode);
        }

        self.credential_store
            .mark_verified(&record.id)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to mark OTP as verified"))?;

        Ok(email)
    }
}
