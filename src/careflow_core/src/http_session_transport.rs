//! HTTP-level session delivery.
//!
//! The use cases produce an [`AuthSession`]; this trait decides how that
//! session reaches the client and where a presented refresh token is read
//! from. Both depend on the client shape of the request.

use secrecy::Secret;

use crate::domain::{client_shape::ClientShape, session::AuthSession};
use crate::http_abstraction::{AuthRequest, AuthResponseBuilder};

/// Framework-agnostic session transport.
///
/// Implementations use the zero-cost `AuthRequest` / `AuthResponseBuilder`
/// traits, so the same dispatch rules apply to any web framework.
///
/// # Example
///
/// ```ignore
/// let shape = transport.client_shape(&AxumRequest::new(&headers));
/// let session = login_use_case.execute(email, password).await?;
/// transport.create_session_response(response_builder(), shape, session, "Login successful")
/// ```
pub trait HttpSessionTransport: Clone + Send + Sync + 'static {
    /// Classify the request as a browser or a native client.
    fn client_shape<R: AuthRequest>(&self, req: &R) -> ClientShape;

    /// Deliver a freshly issued session.
    ///
    /// Mobile clients receive both tokens and the user profile in the body.
    /// Web clients receive the refresh token as an HTTP-only cookie and only
    /// the access token in the body.
    fn create_session_response<B: AuthResponseBuilder>(
        &self,
        builder: B,
        shape: ClientShape,
        session: AuthSession,
        message: &str,
    ) -> B::Response;

    /// Clear the session cookie. Mobile clients simply discard their tokens.
    fn create_logout_response<B: AuthResponseBuilder>(&self, builder: B) -> B::Response;

    /// Read the presented refresh token: the JSON body for mobile clients,
    /// the session cookie for web clients.
    fn extract_refresh_token<R: AuthRequest>(
        &self,
        req: &R,
        shape: ClientShape,
        body: &[u8],
    ) -> Option<Secret<String>>;

    /// A complete `Set-Cookie` value that expires the session cookie.
    fn clear_session_cookie(&self) -> String;
}
