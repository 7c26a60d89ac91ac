use async_trait::async_trait;
use careflow_core::{ExternalProfile, OAuthError, OAuthProvider};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};

/// Exchanges a Google access token for the account's profile via the
/// userinfo endpoint.
pub struct GoogleOAuthProvider {
    http_client: Client,
    userinfo_url: String,
}

impl GoogleOAuthProvider {
    pub fn new(userinfo_url: String, http_client: Client) -> Self {
        Self {
            http_client,
            userinfo_url,
        }
    }
}

#[async_trait]
impl OAuthProvider for GoogleOAuthProvider {
    #[tracing::instrument(name = "Exchanging Google access token", skip_all)]
    async fn exchange(&self, access_token: &Secret<String>) -> Result<ExternalProfile, OAuthError> {
        let response = self
            .http_client
            .get(&self.userinfo_url)
            .bearer_auth(access_token.expose_secret())
            .send()
            .await
            .map_err(|e| OAuthError::ExchangeFailed(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(OAuthError::InvalidToken),
            status if !status.is_success() => {
                return Err(OAuthError::ExchangeFailed(format!(
                    "userinfo endpoint returned {status}"
                )));
            }
            _ => {}
        }

        response
            .json::<ExternalProfile>()
            .await
            .map_err(|e| OAuthError::InvalidResponse(e.to_string()))
    }
}
