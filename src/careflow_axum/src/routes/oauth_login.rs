//! Axum-specific Google sign-in route.

use axum::Json;
use axum::extract::{State, rejection::JsonRejection};
use axum::http::HeaderMap;
use axum::response::Response;
use careflow_adapters::authentication::AuthFlow;
use careflow_adapters::handlers::{self, OAuthLoginBody};
use careflow_core::{CredentialStore, EmailClient, OAuthProvider};

use super::{json_body, respond};
use crate::adapters::{AxumRequest, response_builder};

#[tracing::instrument(name = "OAuth Login", skip_all)]
pub async fn oauth_login<S, E, O>(
    State(flow): State<AuthFlow<S, E, O>>,
    headers: HeaderMap,
    body: Result<Json<OAuthLoginBody>, JsonRejection>,
) -> Response
where
    S: CredentialStore + 'static,
    E: EmailClient + 'static,
    O: OAuthProvider + 'static,
{
    let result = match json_body(body) {
        Ok(body) => {
            handlers::handle_oauth_login(&flow, &AxumRequest(&headers), body, response_builder())
                .await
        }
        Err(e) => Err(e),
    };

    respond(result, flow.transport())
}
