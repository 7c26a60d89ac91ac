//! Axum-specific route handlers.
//!
//! These routes use Axum's extractors to get data from requests, call the
//! framework-agnostic handlers, and convert results to Axum responses.
//! Malformed JSON bodies and path parameters are reported as `400` with the
//! usual `{"error": ...}` envelope.

pub mod change_role;
pub mod login;
pub mod logout;
pub mod oauth_login;
pub mod profile;
pub mod refresh;
pub mod register;
pub mod resend_code;
pub mod verify_email;
pub mod verify_token;

pub use change_role::change_role;
pub use login::login;
pub use logout::logout;
pub use oauth_login::oauth_login;
pub use profile::{doctor_me, get_me, patient_me, update_me};
pub use refresh::refresh;
pub use register::register;
pub use resend_code::resend_code;
pub use verify_email::verify_email;
pub use verify_token::verify_token;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::response::Response;
use careflow_adapters::http::{AuthApiError, DualChannelTransport};

use crate::adapters::render_error;

pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AuthApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AuthApiError::Validation(rejection.body_text()))
}

pub(crate) fn respond(
    result: Result<Response, AuthApiError>,
    transport: &DualChannelTransport,
) -> Response {
    result.unwrap_or_else(|e| render_error(e, transport))
}
