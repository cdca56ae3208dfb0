use clinic_otp_core::{DisplayName, Email, EmailClient};

/// Logs every email instead of sending it. Only wired in when the service
/// runs with `email_client.log_only` enabled.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient;

impl MockEmailClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        _recipient: &Email,
        recipient_name: &DisplayName,
        subject: &str,
        html_content: &str,
    ) -> Result<(), String> {
        tracing::warn!(
            recipient_name = recipient_name.as_str(),
            subject,
            html_content,
            "Email delivery is log-only, message not sent"
        );
        Ok(())
    }
}
