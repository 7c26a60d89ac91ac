use careflow_core::{AuthResponseBuilder, AuthResponseHelpers, SessionClaims};

/// Echo the identity the Role Gate already verified.
pub fn handle_verify_token<B: AuthResponseBuilder>(claims: &SessionClaims, builder: B) -> B::Response {
    builder.success(200, "Token is valid", serde_json::to_value(claims).ok())
}
