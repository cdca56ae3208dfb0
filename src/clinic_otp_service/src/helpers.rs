use clinic_otp_adapters::config::PostgresSetting;
use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};

/// Configure and return a PostgreSQL connection pool
///
/// Creates the pool from the given settings and runs all pending migrations.
pub async fn configure_postgresql(setting: &PostgresSetting) -> Result<PgPool, sqlx::Error> {
    let pg_pool = get_postgres_pool(setting.url.expose_secret(), setting.max_connections).await?;

    sqlx::migrate!("../../migrations").run(&pg_pool).await?;

    Ok(pg_pool)
}

/// Create a PostgreSQL connection pool
pub async fn get_postgres_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}
