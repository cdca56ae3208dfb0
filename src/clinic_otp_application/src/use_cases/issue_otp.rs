use askama::Template;
use clinic_otp_core::{
    CredentialStore, CredentialStoreError, DisplayName, Email, EmailClient, NewOtpRecord, OtpCode,
    OtpPolicy,
};

use crate::email_template::{VERIFICATION_EMAIL_SUBJECT, VerificationEmail};

/// Error types specific to the issue OTP use case
#[derive(Debug, thiserror::Error)]
pub enum IssueOtpError {
    #[error("Credential store error: {0}")]
    CredentialStoreError(#[from] CredentialStoreError),
    #[error("Failed to send email: {0}")]
    EmailError(String),
}

/// Issue OTP use case - generates, persists and delivers a one-time code
pub struct IssueOtpUseCase<S, E>
where
    S: CredentialStore,
    E: EmailClient,
{
    credential_store: S,
    email_client: E,
    policy: OtpPolicy,
}

impl<S, E> IssueOtpUseCase<S, E>
where
    S: CredentialStore,
    E: EmailClient,
{
    pub fn new(credential_store: S, email_client: E, policy: OtpPolicy) -> Self {
        Self {
            credential_store,
            email_client,
            policy,
        }
    }

    /// Execute the issue OTP use case
    ///
    /// A new record is written on every call, so earlier codes for the same
    /// email stay in the store and are superseded rather than replaced. The
    /// record is persisted before delivery is attempted and is kept if
    /// delivery fails.
    #[tracing::instrument(name = "IssueOtpUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        email: Email,
        display_name: DisplayName,
    ) -> Result<(), IssueOtpError> {
        let otp_code = OtpCode::generate();

        let record = self
            .credential_store
            .insert(NewOtpRecord {
                email: email.clone(),
                otp_code: otp_code.clone(),
                validity: self.policy.code_ttl(),
            })
            .await?;
        tracing::debug!(record_id = %record.id, "Stored OTP record");

        let html_content = VerificationEmail {
            name: display_name.as_str(),
            code: otp_code.as_str(),
            ttl_minutes: self.policy.code_ttl_minutes(),
        }
        .render()
        .map_err(|e| IssueOtpError::EmailError(e.to_string()))?;

        self.email_client
            .send_email(
                &email,
                &display_name,
                VERIFICATION_EMAIL_SUBJECT,
                &html_content,
            )
            .await
            .map_err(IssueOtpError::EmailError)?;

        Ok(())
    }
}
