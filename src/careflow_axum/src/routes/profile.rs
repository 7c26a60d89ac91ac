//! Axum-specific profile routes. All of them run behind the Role Gate.

use axum::extract::{State, rejection::JsonRejection};
use axum::response::Response;
use axum::{Extension, Json};
use careflow_adapters::authentication::AuthFlow;
use careflow_adapters::handlers::{self, UpdateProfileBody};
use careflow_core::{CredentialStore, EmailClient, OAuthProvider, SessionClaims};

use super::{json_body, respond};
use crate::adapters::response_builder;

#[tracing::instrument(name = "Get Me", skip_all, fields(user_id = claims.user_id))]
pub async fn get_me<S, E, O>(
    State(flow): State<AuthFlow<S, E, O>>,
    Extension(claims): Extension<SessionClaims>,
) -> Response
where
    S: CredentialStore + 'static,
    E: EmailClient + 'static,
    O: OAuthProvider + 'static,
{
    let result = handlers::handle_get_me(&flow, &claims, response_builder()).await;
    respond(result, flow.transport())
}

#[tracing::instrument(name = "Update Me", skip_all, fields(user_id = claims.user_id))]
pub async fn update_me<S, E, O>(
    State(flow): State<AuthFlow<S, E, O>>,
    Extension(claims): Extension<SessionClaims>,
    body: Result<Json<UpdateProfileBody>, JsonRejection>,
) -> Response
where
    S: CredentialStore + 'static,
    E: EmailClient + 'static,
    O: OAuthProvider + 'static,
{
    let result = match json_body(body) {
        Ok(body) => handlers::handle_update_me(&flow, &claims, body, response_builder()).await,
        Err(e) => Err(e),
    };

    respond(result, flow.transport())
}

#[tracing::instrument(name = "Patient Me", skip_all, fields(user_id = claims.user_id))]
pub async fn patient_me<S, E, O>(
    State(flow): State<AuthFlow<S, E, O>>,
    Extension(claims): Extension<SessionClaims>,
) -> Response
where
    S: CredentialStore + 'static,
    E: EmailClient + 'static,
    O: OAuthProvider + 'static,
{
    let result = handlers::handle_patient_profile(&flow, &claims, response_builder()).await;
    respond(result, flow.transport())
}

#[tracing::instrument(name = "Doctor Me", skip_all, fields(user_id = claims.user_id))]
pub async fn doctor_me<S, E, O>(
    State(flow): State<AuthFlow<S, E, O>>,
    Extension(claims): Extension<SessionClaims>,
) -> Response
where
    S: CredentialStore + 'static,
    E: EmailClient + 'static,
    O: OAuthProvider + 'static,
{
    let result = handlers::handle_doctor_profile(&flow, &claims, response_builder()).await;
    respond(result, flow.transport())
}
