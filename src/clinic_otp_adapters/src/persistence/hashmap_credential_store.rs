use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use clinic_otp_core::{
    Clock, CredentialStore, CredentialStoreError, Email, NewOtpRecord, OtpRecord, OtpRecordId,
    SystemClock,
};
use tokio::sync::RwLock;

#[derive(Default)]
struct Records {
    by_email: HashMap<Email, Vec<OtpRecord>>,
    email_by_id: HashMap<OtpRecordId, Email>,
}

/// In-memory credential store. Keeps every issued record, oldest first.
#[derive(Clone)]
pub struct HashMapCredentialStore {
    records: Arc<RwLock<Records>>,
    clock: Arc<dyn Clock>,
}

impl Default for HashMapCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HashMapCredentialStore {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            records: Arc::new(RwLock::new(Records::default())),
            clock: Arc::new(clock),
        }
    }

    /// Every record issued to `email`, in creation order.
    pub async fn records_for(&self, email: &Email) -> Vec<OtpRecord> {
        let records = self.records.read().await;
        records.by_email.get(email).cloned().unwrap_or_default()
    }

    async fn update_unverified(
        &self,
        id: &OtpRecordId,
        apply: impl FnOnce(&mut OtpRecord),
    ) -> Result<(), CredentialStoreError> {
        let mut guard = self.records.write().await;
        let Records {
            by_email,
            email_by_id,
        } = &mut *guard;

        let record = email_by_id
            .get(id)
            .and_then(|email| by_email.get_mut(email))
            .and_then(|history| history.iter_mut().find(|record| &record.id == id))
            .filter(|record| !record.verified)
            .ok_or(CredentialStoreError::RecordNotFound)?;
        apply(record);
        Ok(())
    }
}

#[async_trait::async_trait]
impl CredentialStore for HashMapCredentialStore {
    async fn insert(&self, record: NewOtpRecord) -> Result<OtpRecord, CredentialStoreError> {
        let record = OtpRecord::issue(record, self.clock.now());
        let mut records = self.records.write().await;
        records
            .email_by_id
            .insert(record.id, record.email.clone());
        records
            .by_email
            .entry(record.email.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn query_active(
        &self,
        email: &Email,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, CredentialStoreError> {
        let records = self.records.read().await;
        // max_by_key keeps the last of equal keys, i.e. the latest insert
        Ok(records.by_email.get(email).and_then(|history| {
            history
                .iter()
                .filter(|record| record.is_active_at(now))
                .max_by_key(|record| record.created_at)
                .cloned()
        }))
    }

    async fn increment_attempts(&self, id: &OtpRecordId) -> Result<(), CredentialStoreError> {
        self.update_unverified(id, |record| record.attempts += 1)
            .await
    }

    async fn mark_verified(&self, id: &OtpRecordId) -> Result<(), CredentialStoreError> {
        self.update_unverified(id, |record| record.verified = true)
            .await
    }
}
