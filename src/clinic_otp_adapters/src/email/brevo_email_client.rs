use clinic_otp_core::{DisplayName, Email, EmailClient};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

/// Sends transactional email through Brevo's SMTP API.
#[derive(Clone)]
pub struct BrevoEmailClient {
    http_client: Client,
    base_url: String,
    sender: Email,
    sender_name: String,
    api_key: Secret<String>,
}

impl BrevoEmailClient {
    pub fn new(
        base_url: String,
        sender: Email,
        sender_name: String,
        api_key: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            sender_name,
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl EmailClient for BrevoEmailClient {
    #[tracing::instrument(name = "Sending email", skip_all)]
    async fn send_email(
        &self,
        recipient: &Email,
        recipient_name: &DisplayName,
        subject: &str,
        html_content: &str,
    ) -> Result<(), String> {
        let base = Url::parse(&self.base_url).map_err(|e| e.to_string())?;
        let url = base.join(SEND_EMAIL_PATH).map_err(|e| e.to_string())?;

        let request_body = SendEmailRequest {
            sender: Contact {
                email: self.sender.as_ref().expose_secret(),
                name: &self.sender_name,
            },
            to: [Contact {
                email: recipient.as_ref().expose_secret(),
                name: recipient_name.as_str(),
            }],
            subject,
            html_content,
        };

        let request = self
            .http_client
            .post(url)
            .header(BREVO_AUTH_HEADER, self.api_key.expose_secret())
            .json(&request_body);

        request
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}

const SEND_EMAIL_PATH: &str = "v3/smtp/email";
const BREVO_AUTH_HEADER: &str = "api-key";

#[derive(serde::Serialize, Debug)]
struct Contact<'a> {
    email: &'a str,
    name: &'a str,
}

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SendEmailRequest<'a> {
    sender: Contact<'a>,
    to: [Contact<'a>; 1],
    subject: &'a str,
    html_content: &'a str,
}
