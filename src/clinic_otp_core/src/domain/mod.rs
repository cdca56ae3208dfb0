pub mod display_name;
pub mod email;
pub mod otp_code;
pub mod otp_policy;
pub mod otp_record;
