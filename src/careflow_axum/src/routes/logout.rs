//! Axum-specific logout route.

use axum::extract::State;
use axum::response::Response;
use careflow_adapters::authentication::AuthFlow;
use careflow_adapters::handlers;
use careflow_core::{CredentialStore, EmailClient, OAuthProvider};

use crate::adapters::response_builder;

#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<S, E, O>(State(flow): State<AuthFlow<S, E, O>>) -> Response
where
    S: CredentialStore + 'static,
    E: EmailClient + 'static,
    O: OAuthProvider + 'static,
{
    handlers::handle_logout(&flow, response_builder())
}
