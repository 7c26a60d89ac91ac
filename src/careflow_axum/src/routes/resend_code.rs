//! Axum-specific verification code resend route.

use axum::Json;
use axum::extract::{State, rejection::JsonRejection};
use axum::response::Response;
use careflow_adapters::authentication::AuthFlow;
use careflow_adapters::handlers::{self, ResendCodeBody};
use careflow_core::{CredentialStore, EmailClient, OAuthProvider};

use super::{json_body, respond};
use crate::adapters::response_builder;

#[tracing::instrument(name = "Resend Verification", skip_all)]
pub async fn resend_code<S, E, O>(
    State(flow): State<AuthFlow<S, E, O>>,
    body: Result<Json<ResendCodeBody>, JsonRejection>,
) -> Response
where
    S: CredentialStore + 'static,
    E: EmailClient + 'static,
    O: OAuthProvider + 'static,
{
    let result = match json_body(body) {
        Ok(body) => handlers::handle_resend_code(&flow, body, response_builder()).await,
        Err(e) => Err(e),
    };

    respond(result, flow.transport())
}
