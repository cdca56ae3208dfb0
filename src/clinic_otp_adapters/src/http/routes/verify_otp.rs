use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use clinic_otp_application::VerifyOtpUseCase;
use clinic_otp_core::{CredentialStore, Email, EmailError, OtpCode, OtpCodeError, OtpPolicy};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use super::error::VerifyOtpApiError;

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub email: Option<Secret<String>>,
    #[serde(default)]
    pub otp: Option<Secret<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub message: String,
    pub verified: bool,
}

#[tracing::instrument(name = "Verify OTP", skip_all)]
pub async fn verify_otp<S>(
    State((credential_store, policy)): State<(S, OtpPolicy)>,
    request: Result<Json<VerifyOtpRequest>, JsonRejection>,
) -> Result<impl IntoResponse, VerifyOtpApiError>
where
    S: CredentialStore + Clone + 'static,
{
    let Json(request) = request?;

    let email = Email::try_from(request.email.ok_or(EmailError::Missing)?)?;
    let otp = request.otp.ok_or(OtpCodeError::Missing)?;
    let otp_code = OtpCode::parse(otp.expose_secret().as_str())?;

    let use_case = VerifyOtpUseCase::new(credential_store, policy);
    use_case.execute(email, otp_code).await?;

    Ok((
        StatusCode::OK,
        Json(VerifyOtpResponse {
            success: true,
            message: String::from("Email verified successfully"),
            verified: true,
        }),
    ))
}
