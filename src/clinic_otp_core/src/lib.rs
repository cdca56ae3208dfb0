pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    display_name::DisplayName,
    email::{Email, EmailError},
    otp_code::{OtpCode, OtpCodeError},
    otp_policy::{OtpPolicy, OtpPolicyError},
    otp_record::{NewOtpRecord, OtpRecord, OtpRecordId},
};

pub use ports::{
    repositories::{CredentialStore, CredentialStoreError},
    services::{Clock, EmailClient, SystemClock},
};
