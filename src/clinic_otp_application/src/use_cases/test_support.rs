use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use clinic_otp_core::{
    Clock, CredentialStore, CredentialStoreError, DisplayName, Email, EmailClient, NewOtpRecord,
    OtpRecord, OtpRecordId,
};

pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn new() -> Arc<Self> {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        Arc::new(Self(Mutex::new(start)))
    }

    pub fn advance(&self, by: Duration) {
        *self.0.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

#[derive(Clone, Default)]
pub struct Failures {
    pub insert: bool,
    pub query: bool,
    pub increment: bool,
    pub mark_verified: bool,
}

#[derive(Clone)]
pub struct MockCredentialStore {
    pub records: Arc<Mutex<Vec<OtpRecord>>>,
    pub clock: Arc<ManualClock>,
    pub failures: Failures,
}

impl MockCredentialStore {
    pub fn new(clock: Arc<ManualClock>) -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            clock,
            failures: Failures::default(),
        }
    }

    pub fn failing(clock: Arc<ManualClock>, failures: Failures) -> Self {
        Self {
            failures,
            ..Self::new(clock)
        }
    }

    pub fn records_for(&self, email: &Email) -> Vec<OtpRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| &r.email == email)
            .cloned()
            .collect()
    }

    fn update(
        &self,
        id: &OtpRecordId,
        apply: impl FnOnce(&mut OtpRecord),
    ) -> Result<(), CredentialStoreError> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| &r.id == id && !r.verified)
            .ok_or(CredentialStoreError::RecordNotFound)?;
        apply(record);
        Ok(())
    }
}

fn boom() -> CredentialStoreError {
    CredentialStoreError::UnexpectedError("connection reset".to_string())
}

#[async_trait::async_trait]
impl CredentialStore for MockCredentialStore {
    async fn insert(&self, record: NewOtpRecord) -> Result<OtpRecord, CredentialStoreError> {
        if self.failures.insert {
            return Err(boom());
        }
        // Step the clock so creation order is strictly increasing.
        self.clock.advance(Duration::milliseconds(1));
        let record = OtpRecord::issue(record, self.clock.now());
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn query_active(
        &self,
        email: &Email,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, CredentialStoreError> {
        if self.failures.query {
            return Err(boom());
        }
        Ok(self
            .records_for(email)
            .into_iter()
            .filter(|r| r.is_active_at(now))
            .max_by_key(|r| r.created_at))
    }

    async fn increment_attempts(&self, id: &OtpRecordId) -> Result<(), CredentialStoreError> {
        if self.failures.increment {
            return Err(boom());
        }
        self.update(id, |r| r.attempts += 1)
    }

    async fn mark_verified(&self, id: &OtpRecordId) -> Result<(), CredentialStoreError> {
        if self.failures.mark_verified {
            return Err(boom());
        }
        self.update(id, |r| r.verified = true)
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: Email,
    pub recipient_name: DisplayName,
    pub subject: String,
    pub html_content: String,
}

#[derive(Clone, Default)]
pub struct RecordingEmailClient {
    pub sent: Arc<Mutex<Vec<SentEmail>>>,
    pub fail: bool,
}

impl RecordingEmailClient {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn last(&self) -> Option<SentEmail> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl EmailClient for RecordingEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        recipient_name: &DisplayName,
        subject: &str,
        html_content: &str,
    ) -> Result<(), String> {
        if self.fail {
            return Err("provider returned 503".to_string());
        }
        self.sent.lock().unwrap().push(SentEmail {
            recipient: recipient.clone(),
            recipient_name: recipient_name.clone(),
            subject: subject.to_string(),
            html_content: html_content.to_string(),
        });
        Ok(())
    }
}

/// Pulls the first run of six digits out of a rendered email.
pub fn extract_code(html: &str) -> String {
    html.as_bytes()
        .windows(6)
        .find(|w| w.iter().all(u8::is_ascii_digit))
        .map(|w| String::from_utf8_lossy(w).into_owned())
        .expect("email contains a 6-digit code")
}

pub fn email(raw: &str) -> Email {
    Email::parse(raw).unwrap()
}
