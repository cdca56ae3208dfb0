use clinic_otp::{
    BrevoEmailClient, CredentialStore, Email, EmailClient, HashMapCredentialStore,
    MockEmailClient, OtpPolicy, OtpService, OtpServiceSetting, PostgresCredentialStore,
    adapters::config::EmailDelivery, configure_postgresql,
};
use color_eyre::eyre::Result;
use reqwest::Client as HttpClient;
use tokio::net::TcpListener;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let config = OtpServiceSetting::load()?;
    let policy = config.otp.policy()?;
    let delivery = config.email_client.delivery()?;

    match &config.postgres {
        Some(postgres) => {
            let pg_pool = configure_postgresql(postgres).await?;
            tracing::info!("Storing OTP records in PostgreSQL");
            let store = PostgresCredentialStore::new(pg_pool);
            with_email_client(&config, policy, delivery, store).await
        }
        None => {
            tracing::warn!("No database configured, OTP records are kept in memory");
            let store = HashMapCredentialStore::new();
            with_email_client(&config, policy, delivery, store).await
        }
    }
}

async fn with_email_client<S>(
    config: &OtpServiceSetting,
    policy: OtpPolicy,
    delivery: EmailDelivery,
    credential_store: S,
) -> Result<()>
where
    S: CredentialStore + Clone + 'static,
{
    let setting = &config.email_client;

    match delivery {
        EmailDelivery::Brevo(api_key) => {
            let http_client = HttpClient::builder().timeout(setting.timeout()).build()?;

            let email_client = BrevoEmailClient::new(
                setting.base_url.clone(),
                Email::parse(setting.sender_email.as_str())?,
                setting.sender_name.clone(),
                api_key,
                http_client,
            );
            run(config, policy, credential_store, email_client).await
        }
        EmailDelivery::LogOnly => {
            tracing::warn!("Email delivery is log-only, codes are written to the log");
            run(config, policy, credential_store, MockEmailClient::new()).await
        }
    }
}

async fn run<S, E>(
    config: &OtpServiceSetting,
    policy: OtpPolicy,
    credential_store: S,
    email_client: E,
) -> Result<()>
where
    S: CredentialStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let otp_service = OtpService::new(credential_store, email_client, policy);

    let listener = TcpListener::bind(&config.application.address).await?;
    tracing::info!("Starting OTP service...");

    otp_service.run_standalone(listener).await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
