use chrono::Duration;
use thiserror::Error;

pub const DEFAULT_CODE_TTL_MINUTES: i64 = 10;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const MAX_CODE_TTL_MINUTES: i64 = 24 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OtpPolicyError {
    #[error("Code validity must be between 1 and {MAX_CODE_TTL_MINUTES} minutes, got {0}")]
    InvalidCodeTtl(i64),
    #[error("At least one verification attempt must be allowed")]
    NoAttemptsAllowed,
}

/// Validity window and lockout threshold shared by issuance and verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtpPolicy {
    code_ttl: Duration,
    max_attempts: u32,
}

impl OtpPolicy {
    pub fn new(code_ttl_minutes: i64, max_attempts: u32) -> Result<Self, OtpPolicyError> {
        if !(1..=MAX_CODE_TTL_MINUTES).contains(&code_ttl_minutes) {
            return Err(OtpPolicyError::InvalidCodeTtl(code_ttl_minutes));
        }
        if max_attempts == 0 {
            return Err(OtpPolicyError::NoAttemptsAllowed);
        }

        Ok(Self {
            code_ttl: Duration::minutes(code_ttl_minutes),
            max_attempts,
        })
    }

    pub fn code_ttl(&self) -> Duration {
        self.code_ttl
    }

    pub fn code_ttl_minutes(&self) -> i64 {
        self.code_ttl.num_minutes()
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for OtpPolicy {
    fn default() -> Self {
        Self {
            code_ttl: Duration::minutes(DEFAULT_CODE_TTL_MINUTES),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}
