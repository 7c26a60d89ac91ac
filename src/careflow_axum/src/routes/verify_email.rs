//! Axum-specific email verification route.

use axum::Json;
use axum::extract::{State, rejection::JsonRejection};
use axum::http::HeaderMap;
use axum::response::Response;
use careflow_adapters::authentication::AuthFlow;
use careflow_adapters::handlers::{self, VerifyEmailBody};
use careflow_core::{CredentialStore, EmailClient, OAuthProvider};

use super::{json_body, respond};
use crate::adapters::{AxumRequest, response_builder};

#[tracing::instrument(name = "Verify Email", skip_all)]
pub async fn verify_email<S, E, O>(
    State(flow): State<AuthFlow<S, E, O>>,
    headers: HeaderMap,
    body: Result<Json<VerifyEmailBody>, JsonRejection>,
) -> Response
where
    S: CredentialStore + 'static,
    E: EmailClient + 'static,
    O: OAuthProvider + 'static,
{
    let result = match json_body(body) {
        Ok(body) => {
            handlers::handle_verify_email(&flow, &AxumRequest(&headers), body, response_builder())
                .await
        }
        Err(e) => Err(e),
    };

    respond(result, flow.transport())
}
