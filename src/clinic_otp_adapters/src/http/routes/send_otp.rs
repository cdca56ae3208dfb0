use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use clinic_otp_application::IssueOtpUseCase;
use clinic_otp_core::{CredentialStore, DisplayName, Email, EmailClient, EmailError, OtpPolicy};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use super::error::OtpApiError;

#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    #[serde(default)]
    pub email: Option<Secret<String>>,
    #[serde(default, rename = "firstName")]
    pub first_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendOtpResponse {
    pub success: bool,
    pub message: String,
}

#[tracing::instrument(name = "Send OTP", skip_all)]
pub async fn send_otp<S, E>(
    State((credential_store, email_client, policy)): State<(S, E, OtpPolicy)>,
    request: Result<Json<SendOtpRequest>, JsonRejection>,
) -> Result<impl IntoResponse, OtpApiError>
where
    S: CredentialStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let Json(request) = request?;

    let email = Email::try_from(request.email.ok_or(EmailError::Missing)?)?;
    let display_name = DisplayName::parse(request.first_name);

    let use_case = IssueOtpUseCase::new(credential_store, email_client, policy);
    use_case.execute(email, display_name).await?;

    Ok((
        StatusCode::OK,
        Json(SendOtpResponse {
            success: true,
            message: String::from("OTP sent successfully"),
        }),
    ))
}
