//! Axum framework adapters for the session flows.
//!
//! This module implements `AuthRequest` and `AuthResponseBuilder` for Axum's
//! types using newtype wrappers to avoid the orphan rule.
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │  careflow_core::AuthRequest (trait)        │
//! └────────────────┬───────────────────────────┘
//!                  │
//!                  ▼
//! ┌────────────────────────────────────────────┐
//! │  AxumRequest<'a>(&'a HeaderMap)            │
//! │  impl AuthRequest for AxumRequest { }      │
//! └────────────────────────────────────────────┘
//! ```
//!
//! The request side only borrows the header map, so a route can read the
//! body with another extractor without rebuilding the request.

use axum::body::Body;
use axum::http::{HeaderMap, Response, StatusCode};
use axum::response::IntoResponse;
use careflow_adapters::http::AuthApiError;
use careflow_core::{AuthRequest, AuthResponseBuilder, HttpSessionTransport};

/// Newtype wrapper around a borrowed Axum header map.
#[repr(transparent)]
pub struct AxumRequest<'a>(pub &'a HeaderMap);

impl<'a> From<&'a HeaderMap> for AxumRequest<'a> {
    fn from(headers: &'a HeaderMap) -> Self {
        AxumRequest(headers)
    }
}

impl AuthRequest for AxumRequest<'_> {
    fn header(&self, name: &str) -> Option<&str> {
        self.0.get(name)?.to_str().ok()
    }

    fn cookie(&self, name: &str) -> Option<&str> {
        // A request may carry several Cookie headers.
        self.0
            .get_all(axum::http::header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|header| header.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

/// Newtype wrapper around Axum's response builder.
pub struct AxumResponseBuilder {
    builder: axum::http::response::Builder,
    body: Option<String>,
}

impl AxumResponseBuilder {
    /// Create a new Axum response builder
    pub fn new() -> Self {
        Self {
            builder: Response::builder(),
            body: None,
        }
    }
}

impl Default for AxumResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthResponseBuilder for AxumResponseBuilder {
    type Response = Response<Body>;

    fn status(mut self, code: u16) -> Self {
        self.builder = self.builder.status(code);
        self
    }

    fn header(mut self, name: &str, value: &str) -> Self {
        self.builder = self.builder.header(name, value);
        self
    }

    fn json_body(mut self, body: serde_json::Value) -> Self {
        self.builder = self.builder.header("content-type", "application/json");
        self.body = Some(body.to_string());
        self
    }

    fn build(self) -> Self::Response {
        let body = self.body.unwrap_or_default();
        match self.builder.body(Body::from(body)) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "failed to build response");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Helper function to create an Axum response builder
pub fn response_builder() -> AxumResponseBuilder {
    AxumResponseBuilder::new()
}

/// Render an [`AuthApiError`] as an Axum response.
pub fn render_error<T: HttpSessionTransport>(error: AuthApiError, transport: &T) -> Response<Body> {
    error.into_auth_response(response_builder(), transport)
}
