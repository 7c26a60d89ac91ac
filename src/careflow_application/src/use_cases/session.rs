use careflow_core::{AuthSession, TokenError, TokenService, UserRecord};

/// Issue a brand-new access and refresh pair bound to the user's current role.
///
/// Every login-like transition ends here; refresh calls it too, so a refresh
/// always rotates both tokens.
pub fn issue_session<T>(tokens: &T, user: &UserRecord) -> Result<AuthSession, TokenError>
where
    T: TokenService + ?Sized,
{
    Ok(AuthSession {
        tokens: tokens.issue_pair(user.id, user.role)?,
        user: user.profile(),
    })
}
