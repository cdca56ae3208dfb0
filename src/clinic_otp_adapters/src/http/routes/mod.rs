pub mod error;
pub mod send_otp;
pub mod verify_otp;

pub use error::{ErrorResponse, OtpApiError, VerifyOtpApiError, VerifyOtpErrorResponse};
pub use send_otp::{SendOtpRequest, SendOtpResponse, send_otp};
pub use verify_otp::{VerifyOtpRequest, VerifyOtpResponse, verify_otp};
