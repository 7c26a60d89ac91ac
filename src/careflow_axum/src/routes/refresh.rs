//! Axum-specific token refresh route.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use careflow_adapters::authentication::AuthFlow;
use careflow_adapters::handlers;
use careflow_core::{CredentialStore, EmailClient, OAuthProvider};

use super::respond;
use crate::adapters::{AxumRequest, response_builder};

/// The raw body is handed through untouched: web clients send none and
/// mobile clients send `{"refreshToken": ...}`.
#[tracing::instrument(name = "Refresh", skip_all)]
pub async fn refresh<S, E, O>(
    State(flow): State<AuthFlow<S, E, O>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    S: CredentialStore + 'static,
    E: EmailClient + 'static,
    O: OAuthProvider + 'static,
{
    let result =
        handlers::handle_refresh(&flow, &AxumRequest(&headers), &body, response_builder()).await;

    respond(result, flow.transport())
}
