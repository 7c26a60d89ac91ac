//! Axum-specific registration route.

use axum::Json;
use axum::extract::{State, rejection::JsonRejection};
use axum::response::Response;
use careflow_adapters::authentication::AuthFlow;
use careflow_adapters::handlers::{self, RegisterBody};
use careflow_core::{CredentialStore, EmailClient, OAuthProvider};

use super::{json_body, respond};
use crate::adapters::response_builder;

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<S, E, O>(
    State(flow): State<AuthFlow<S, E, O>>,
    body: Result<Json<RegisterBody>, JsonRejection>,
) -> Response
where
    S: CredentialStore + 'static,
    E: EmailClient + 'static,
    O: OAuthProvider + 'static,
{
    let result = match json_body(body) {
        Ok(body) => handlers::handle_register(&flow, body, response_builder()).await,
        Err(e) => Err(e),
    };

    respond(result, flow.transport())
}
