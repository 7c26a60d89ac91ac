use careflow_adapters::{
    authentication::{AuthFlow, JwtConfig},
    config::AppSettings,
    http::DualChannelTransport,
    persistence::PostgresCredentialStore,
};
use careflow_service::{
    CareflowService,
    helpers::{configure_google_oauth_provider, configure_postgresql, configure_postmark_email_client},
    tracing::init_tracing,
};
use color_eyre::eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = AppSettings::load()?;

    let pg_pool = configure_postgresql(&settings.database).await?;
    let credential_store = PostgresCredentialStore::new(pg_pool);
    let email_client = configure_postmark_email_client(&settings.email_client)?;
    let oauth_provider = configure_google_oauth_provider(&settings.oauth)?;

    let flow = AuthFlow::new(
        credential_store,
        email_client,
        oauth_provider,
        JwtConfig::from(&settings.jwt),
        DualChannelTransport::from(&settings.application),
    );

    let listener = tokio::net::TcpListener::bind(&settings.application.address).await?;
    tracing::info!("Starting CareFlow identity service...");

    CareflowService::new(flow)
        .run_standalone(listener, Some(settings.application.allowed_origins.clone()))
        .await?;

    Ok(())
}
