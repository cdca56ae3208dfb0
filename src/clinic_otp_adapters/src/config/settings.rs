use std::time::Duration;

use clinic_otp_core::OtpPolicy;
use clinic_otp_core::domain::otp_policy::{DEFAULT_CODE_TTL_MINUTES, DEFAULT_MAX_ATTEMPTS};
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, builder::DefaultState};
use secrecy::Secret;
use serde::Deserialize;

use crate::config::constants::{SETTINGS_FILE, env, prod};

#[derive(Debug, Clone, Deserialize)]
pub struct OtpServiceSetting {
    pub application: ApplicationSetting,
    pub otp: OtpSetting,
    /// Absent when no database is configured; the service then keeps records in memory.
    pub postgres: Option<PostgresSetting>,
    pub email_client: EmailClientSetting,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSetting {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtpSetting {
    pub code_ttl_minutes: i64,
    pub max_attempts: u32,
}

impl OtpSetting {
    pub fn policy(&self) -> Result<OtpPolicy, ConfigError> {
        OtpPolicy::new(self.code_ttl_minutes, self.max_attempts)
            .map_err(|e| ConfigError::Message(format!("otp: {e}")))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSetting {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    prod::MAX_DB_CONNECTIONS
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSetting {
    pub base_url: String,
    pub sender_email: String,
    pub sender_name: String,
    pub api_key: Option<Secret<String>>,
    /// Local development only: log outgoing email instead of sending it.
    pub log_only: bool,
    pub timeout_millis: u64,
}

/// How verification emails leave the service.
#[derive(Debug, Clone)]
pub enum EmailDelivery {
    Brevo(Secret<String>),
    LogOnly,
}

impl EmailClientSetting {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }

    /// A provider key always wins. Without one, start-up fails unless
    /// `log_only` was explicitly enabled.
    pub fn delivery(&self) -> Result<EmailDelivery, ConfigError> {
        match (&self.api_key, self.log_only) {
            (Some(api_key), _) => Ok(EmailDelivery::Brevo(api_key.clone())),
            (None, true) => Ok(EmailDelivery::LogOnly),
            (None, false) => Err(ConfigError::NotFound(format!(
                "email_client.api_key (set {})",
                env::BREVO_API_KEY_ENV_VAR
            ))),
        }
    }
}

impl OtpServiceSetting {
    /// Loads settings from built-in defaults, the optional `config/settings`
    /// file, `OTP_SERVICE_*` environment variables, and finally the plain
    /// `DATABASE_URL` / `BREVO_API_KEY` variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::with_defaults()?
            .add_source(File::with_name(SETTINGS_FILE).required(false))
            .add_source(
                Environment::with_prefix(env::ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("postgres.url", std::env::var(env::DATABASE_URL_ENV_VAR).ok())?
            .set_override_option(
                "email_client.api_key",
                std::env::var(env::BREVO_API_KEY_ENV_VAR).ok(),
            )?
            .build()?
            .try_deserialize()
    }

    /// Loads settings from a JSON document layered over the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::with_defaults()?
            .add_source(File::from_str(json, FileFormat::Json))
            .build()?
            .try_deserialize()
    }

    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("application.address", prod::APP_ADDRESS)?
            .set_default("otp.code_ttl_minutes", DEFAULT_CODE_TTL_MINUTES)?
            .set_default("otp.max_attempts", i64::from(DEFAULT_MAX_ATTEMPTS))?
            .set_default("email_client.base_url", prod::email_client::BASE_URL)?
            .set_default("email_client.sender_email", prod::email_client::SENDER_EMAIL)?
            .set_default("email_client.sender_name", prod::email_client::SENDER_NAME)?
            .set_default("email_client.log_only", false)?
            .set_default(
                "email_client.timeout_millis",
                prod::email_client::TIMEOUT.as_millis() as i64,
            )
    }
}
