pub mod email_template;
pub mod use_cases;

pub use email_template::{VERIFICATION_EMAIL_SUBJECT, VerificationEmail};
pub use use_cases::{
    issue_otp::{IssueOtpError, IssueOtpUseCase},
    verify_otp::{VerifyOtpError, VerifyOtpUseCase},
};
