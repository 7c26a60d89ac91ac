//! Axum-specific admin role change route.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::response::Response;
use careflow_adapters::authentication::AuthFlow;
use careflow_adapters::handlers::{self, ChangeRoleBody};
use careflow_adapters::http::AuthApiError;
use careflow_core::{CredentialStore, EmailClient, OAuthProvider, UserId};

use super::{json_body, respond};
use crate::adapters::response_builder;

#[tracing::instrument(name = "Change Role", skip_all)]
pub async fn change_role<S, E, O>(
    State(flow): State<AuthFlow<S, E, O>>,
    user_id: Result<Path<UserId>, PathRejection>,
    body: Result<Json<ChangeRoleBody>, JsonRejection>,
) -> Response
where
    S: CredentialStore + 'static,
    E: EmailClient + 'static,
    O: OAuthProvider + 'static,
{
    let user_id = user_id
        .map(|Path(id)| id)
        .map_err(|rejection| AuthApiError::Validation(rejection.body_text()));

    let result = match (user_id, json_body(body)) {
        (Ok(user_id), Ok(body)) => {
            handlers::handle_change_role(&flow, user_id, body, response_builder()).await
        }
        (Err(e), _) | (_, Err(e)) => Err(e),
    };

    respond(result, flow.transport())
}
