use careflow_core::{
    AuthResponseBuilder, CredentialStore, EmailClient, HttpSessionTransport, OAuthProvider,
};

use crate::authentication::AuthFlow;

/// Expire the session cookie. Tokens are stateless, so nothing is revoked
/// server side.
pub fn handle_logout<S, E, O, B>(flow: &AuthFlow<S, E, O>, builder: B) -> B::Response
where
    S: CredentialStore + 'static,
    E: EmailClient + 'static,
    O: OAuthProvider + 'static,
    B: AuthResponseBuilder,
{
    flow.transport().create_logout_response(builder)
}
