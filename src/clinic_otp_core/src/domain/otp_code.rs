use std::fmt;

use rand::Rng;
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

const OTP_CODE_MIN: u32 = 100_000;
const OTP_CODE_MAX: u32 = 999_999;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OtpCodeError {
    #[error("OTP code is required")]
    Missing,
}

/// A one-time passcode, either freshly generated or as submitted by a caller.
///
/// Equality is exact string equality: submitted codes are never trimmed or
/// otherwise normalised before comparison.
#[derive(Clone)]
pub struct OtpCode(Secret<String>);

impl OtpCode {
    /// Draws a 6-digit code uniformly from `100000..=999999` using the
    /// thread-local CSPRNG.
    pub fn generate() -> Self {
        let value = rand::rng().random_range(OTP_CODE_MIN..=OTP_CODE_MAX);
        Self(Secret::new(value.to_string()))
    }

    pub fn parse(raw: impl Into<String>) -> Result<Self, OtpCodeError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(OtpCodeError::Missing);
        }
        Ok(Self(Secret::new(raw)))
    }

    pub fn as_str(&self) -> &str {
        self.0.expose_secret()
    }
}

impl PartialEq for OtpCode {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Eq for OtpCode {}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode([REDACTED])")
    }
}
