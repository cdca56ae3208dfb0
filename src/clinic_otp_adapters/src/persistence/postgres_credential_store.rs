use std::sync::Arc;

use chrono::{DateTime, Utc};
use clinic_otp_core::{
    Clock, CredentialStore, CredentialStoreError, Email, NewOtpRecord, OtpCode, OtpRecord,
    OtpRecordId, SystemClock,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

/// Timestamps come from the application clock, the same one verification
/// compares `expires_at` against, never from the database's `NOW()`.
#[derive(Clone)]
pub struct PostgresCredentialStore {
    pool: PgPool,
    clock: Arc<dyn Clock>,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self::with_clock(pool, SystemClock)
    }

    pub fn with_clock(pool: PgPool, clock: impl Clock + 'static) -> Self {
        PostgresCredentialStore {
            pool,
            clock: Arc::new(clock),
        }
    }
}

#[derive(FromRow)]
struct OtpRecordRow {
    id: Uuid,
    email: String,
    otp_code: String,
    verified: bool,
    attempts: i32,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl TryFrom<OtpRecordRow> for OtpRecord {
    type Error = CredentialStoreError;

    fn try_from(row: OtpRecordRow) -> Result<Self, Self::Error> {
        let email = Email::try_from(Secret::from(row.email))
            .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;
        let otp_code = OtpCode::parse(row.otp_code)
            .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;
        let attempts = u32::try_from(row.attempts)
            .map_err(|e| CredentialStoreError::UnexpectedError(e.to_string()))?;

        Ok(OtpRecord {
            id: OtpRecordId::from(row.id),
            email,
            otp_code,
            verified: row.verified,
            attempts,
            created_at: row.created_at,
            expires_at: row.expires_at,
        })
    }
}

fn unexpected(e: sqlx::Error) -> CredentialStoreError {
    CredentialStoreError::UnexpectedError(e.to_string())
}

#[async_trait::async_trait]
impl CredentialStore for PostgresCredentialStore {
    #[tracing::instrument(name = "Inserting OTP record into PostgreSQL", skip_all)]
    async fn insert(&self, record: NewOtpRecord) -> Result<OtpRecord, CredentialStoreError> {
        let record = OtpRecord::issue(record, self.clock.now());

        let query = sqlx::query_as::<_, OtpRecordRow>(
            r#"
                INSERT INTO otp_records (id, email, otp_code, created_at, expires_at)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, email, otp_code, verified, attempts, created_at, expires_at
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.email.as_ref().expose_secret())
        .bind(record.otp_code.as_str())
        .bind(record.created_at)
        .bind(record.expires_at);

        query.fetch_one(&self.pool).await.map_err(unexpected)?.try_into()
    }

    #[tracing::instrument(name = "Querying active OTP record in PostgreSQL", skip_all)]
    async fn query_active(
        &self,
        email: &Email,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpRecord>, CredentialStoreError> {
        let query = sqlx::query_as::<_, OtpRecordRow>(
            r#"
                SELECT id, email, otp_code, verified, attempts, created_at, expires_at
                FROM otp_records
                WHERE email = $1 AND verified = FALSE AND expires_at > $2
                ORDER BY created_at DESC
                LIMIT 1
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .bind(now);

        query
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?
            .map(OtpRecord::try_from)
            .transpose()
    }

    #[tracing::instrument(name = "Incrementing OTP attempts in PostgreSQL", skip_all)]
    async fn increment_attempts(&self, id: &OtpRecordId) -> Result<(), CredentialStoreError> {
        // Single statement so concurrent mismatches are all counted
        let result = sqlx::query(
            r#"
                UPDATE otp_records
                SET attempts = attempts + 1
                WHERE id = $1 AND verified = FALSE
            "#,
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(CredentialStoreError::RecordNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Marking OTP record verified in PostgreSQL", skip_all)]
    async fn mark_verified(&self, id: &OtpRecordId) -> Result<(), CredentialStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE otp_records
                SET verified = TRUE
                WHERE id = $1 AND verified = FALSE
            "#,
        )
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(CredentialStoreError::RecordNotFound);
        }
        Ok(())
    }
}
