use std::fmt;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::{email::Email, otp_code::OtpCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OtpRecordId(Uuid);

impl OtpRecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OtpRecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for OtpRecordId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for OtpRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// What the issuer hands to the store. The store stamps `created_at` and
/// derives `expires_at` from `validity`.
#[derive(Debug, Clone)]
pub struct NewOtpRecord {
    pub email: Email,
    pub otp_code: OtpCode,
    pub validity: Duration,
}

/// One row per issuance. Rows are never deleted here; a newer row for the
/// same email supersedes older ones.
#[derive(Debug, Clone)]
pub struct OtpRecord {
    pub id: OtpRecordId,
    pub email: Email,
    pub otp_code: OtpCode,
    pub verified: bool,
    pub attempts: u32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Builds a fresh, unverified record created at `now`.
    pub fn issue(new: NewOtpRecord, now: DateTime<Utc>) -> Self {
        Self {
            id: OtpRecordId::new(),
            email: new.email,
            otp_code: new.otp_code,
            verified: false,
            attempts: 0,
            created_at: now,
            expires_at: now + new.validity,
        }
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        !self.verified && self.expires_at > now
    }

    pub fn is_locked(&self, max_attempts: u32) -> bool {
        self.attempts >= max_attempts
    }
}
