use careflow_adapters::config::{DatabaseSettings, EmailClientSettings, OAuthSettings};
use careflow_adapters::email::PostmarkEmailClient;
use careflow_adapters::oauth::GoogleOAuthProvider;
use careflow_adapters::persistence::migrate;
use careflow_core::Email;
use color_eyre::eyre::{Result, WrapErr};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, postgres::PgPoolOptions};

/// Connect to Postgres and run all pending migrations.
pub async fn configure_postgresql(settings: &DatabaseSettings) -> Result<PgPool> {
    let pg_pool = get_postgres_pool(settings.url.expose_secret(), settings.max_connections)
        .await
        .wrap_err("Failed to create Postgres connection pool")?;

    migrate(&pg_pool)
        .await
        .wrap_err("Failed to run migrations")?;

    Ok(pg_pool)
}

pub async fn get_postgres_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}

/// Postmark client with a bounded request timeout; delivery is never retried.
pub fn configure_postmark_email_client(settings: &EmailClientSettings) -> Result<PostmarkEmailClient> {
    let http_client = reqwest::Client::builder()
        .timeout(settings.timeout())
        .build()
        .wrap_err("Failed to build the email HTTP client")?;

    let sender = Email::try_from(Secret::from(settings.sender.clone()))
        .wrap_err("Configured email sender is not a valid address")?;

    Ok(PostmarkEmailClient::new(
        settings.base_url.clone(),
        sender,
        settings.auth_token.clone(),
        http_client,
    ))
}

pub fn configure_google_oauth_provider(settings: &OAuthSettings) -> Result<GoogleOAuthProvider> {
    let http_client = reqwest::Client::builder()
        .timeout(settings.timeout())
        .build()
        .wrap_err("Failed to build the OAuth HTTP client")?;

    Ok(GoogleOAuthProvider::new(
        settings.google_userinfo_url.clone(),
        http_client,
    ))
}
