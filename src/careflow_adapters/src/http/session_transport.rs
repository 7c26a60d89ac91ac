use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, SameSite};
use careflow_core::{
    AuthRequest, AuthResponseBuilder, AuthSession, ClientShape, HttpSessionTransport,
};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::config::{ApplicationSettings, SESSION_COOKIE_MAX_AGE_IN_SECONDS, SESSION_COOKIE_NAME};

/// Cookie-or-body session delivery keyed on the `User-Agent` header.
///
/// Web clients keep the refresh token in an HTTP-only, `SameSite=Lax`
/// cookie; native clients receive both tokens in the JSON body.
#[derive(Debug, Clone)]
pub struct DualChannelTransport {
    cookie_name: String,
    cookie_secure: bool,
    cookie_max_age_in_seconds: i64,
    mobile_markers: Arc<[String]>,
}

impl DualChannelTransport {
    pub fn new(cookie_secure: bool, mobile_markers: Vec<String>) -> Self {
        Self {
            cookie_name: SESSION_COOKIE_NAME.to_owned(),
            cookie_secure,
            cookie_max_age_in_seconds: SESSION_COOKIE_MAX_AGE_IN_SECONDS,
            mobile_markers: mobile_markers.into(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// The HTTP-only refresh cookie handed to web clients.
    pub fn session_cookie(&self, refresh_token: String) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), refresh_token))
            .path("/")
            .http_only(true)
            .secure(self.cookie_secure)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(self.cookie_max_age_in_seconds))
            .build()
    }

    /// Same name, path and flags as the session cookie, expired.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = self.session_cookie(String::new());
        cookie.make_removal();
        cookie
    }
}

impl From<&ApplicationSettings> for DualChannelTransport {
    fn from(settings: &ApplicationSettings) -> Self {
        Self::new(settings.cookie_secure, settings.mobile_markers.clone())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshTokenBody {
    refresh_token: Secret<String>,
}

impl HttpSessionTransport for DualChannelTransport {
    fn client_shape<R: AuthRequest>(&self, req: &R) -> ClientShape {
        ClientShape::from_user_agent(req.user_agent(), &self.mobile_markers[..])
    }

    fn create_session_response<B: AuthResponseBuilder>(
        &self,
        builder: B,
        shape: ClientShape,
        session: AuthSession,
        message: &str,
    ) -> B::Response {
        let AuthSession { tokens, user } = session;

        match shape {
            ClientShape::Mobile => builder
                .status(200)
                .json_body(serde_json::json!({
                    "message": message,
                    "data": {
                        "accessToken": tokens.access_token.expose_secret(),
                        "refreshToken": tokens.refresh_token.expose_secret(),
                        "user": user,
                    }
                }))
                .build(),
            ClientShape::Web => {
                let cookie = self.session_cookie(tokens.refresh_token.expose_secret().to_owned());

                builder
                    .status(200)
                    .cookie(&cookie.to_string())
                    .json_body(serde_json::json!({
                        "message": message,
                        "data": {
                            "accessToken": tokens.access_token.expose_secret(),
                        }
                    }))
                    .build()
            }
        }
    }

    fn create_logout_response<B: AuthResponseBuilder>(&self, builder: B) -> B::Response {
        builder
            .status(200)
            .cookie(&self.clear_session_cookie())
            .json_body(serde_json::json!({
                "message": "Logged out successfully"
            }))
            .build()
    }

    fn extract_refresh_token<R: AuthRequest>(
        &self,
        req: &R,
        shape: ClientShape,
        body: &[u8],
    ) -> Option<Secret<String>> {
        match shape {
            ClientShape::Mobile => serde_json::from_slice::<RefreshTokenBody>(body)
                .ok()
                .map(|body| body.refresh_token)
                .filter(|token| !token.expose_secret().is_empty()),
            ClientShape::Web => req
                .cookie(&self.cookie_name)
                .filter(|token| !token.is_empty())
                .map(|token| Secret::from(token.to_owned())),
        }
    }

    fn clear_session_cookie(&self) -> String {
        self.removal_cookie().to_string()
    }
}
