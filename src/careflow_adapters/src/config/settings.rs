use std::time::Duration;

use config::{Config, Environment, File};
use http::HeaderValue;
use secrecy::Secret;
use serde::Deserialize;
use thiserror::Error;

use super::constants::{DEFAULT_MOBILE_MARKERS, env, prod};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub application: ApplicationSettings,
    pub jwt: JwtSettings,
    pub database: DatabaseSettings,
    pub email_client: EmailClientSettings,
    #[serde(default)]
    pub oauth: OAuthSettings,
}

impl AppSettings {
    /// Load settings from `config/base.json` (optional) overlaid with
    /// `CAREFLOW__SECTION__KEY` environment variables.
    ///
    /// A `.env` file in the working directory is loaded first when present.
    pub fn load() -> Result<Self, SettingsError> {
        let _ = dotenvy::dotenv();

        let settings = Config::builder()
            .add_source(File::with_name(env::CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(env::ENV_PREFIX)
                    .prefix_separator(env::ENV_SEPARATOR)
                    .separator(env::ENV_SEPARATOR)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("application.allowed_origins")
                    .with_list_parse_key("application.mobile_markers"),
            )
            .build()?;

        Ok(settings.try_deserialize::<AppSettings>()?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
    /// Set the `Secure` attribute on the session cookie; off for plain-http development.
    #[serde(default)]
    pub cookie_secure: bool,
    #[serde(default = "default_mobile_markers")]
    pub mobile_markers: Vec<String>,
}

impl Default for ApplicationSettings {
    fn default() -> Self {
        Self {
            address: default_address(),
            allowed_origins: AllowedOrigins::default(),
            cookie_secure: false,
            mobile_markers: default_mobile_markers(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    #[serde(default = "default_access_ttl")]
    pub access_ttl_in_seconds: i64,
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_in_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    #[serde(default = "default_email_base_url")]
    pub base_url: String,
    #[serde(default = "default_email_sender")]
    pub sender: String,
    pub auth_token: Secret<String>,
    #[serde(default = "default_email_timeout")]
    pub timeout_in_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OAuthSettings {
    #[serde(default = "default_google_userinfo_url")]
    pub google_userinfo_url: String,
    #[serde(default = "default_oauth_timeout")]
    pub timeout_in_millis: u64,
}

impl OAuthSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

impl Default for OAuthSettings {
    fn default() -> Self {
        Self {
            google_userinfo_url: default_google_userinfo_url(),
            timeout_in_millis: default_oauth_timeout(),
        }
    }
}

/// Origins allowed to make credentialed cross-origin requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn default_address() -> String {
    prod::APP_ADDRESS.to_owned()
}

fn default_mobile_markers() -> Vec<String> {
    DEFAULT_MOBILE_MARKERS.iter().map(|m| m.to_string()).collect()
}

fn default_access_ttl() -> i64 {
    prod::ACCESS_TOKEN_TTL_IN_SECONDS
}

fn default_refresh_ttl() -> i64 {
    prod::REFRESH_TOKEN_TTL_IN_SECONDS
}

fn default_max_connections() -> u32 {
    prod::DATABASE_MAX_CONNECTIONS
}

fn default_email_base_url() -> String {
    prod::email_client::BASE_URL.to_owned()
}

fn default_email_sender() -> String {
    prod::email_client::SENDER.to_owned()
}

fn default_email_timeout() -> u64 {
    prod::email_client::TIMEOUT_IN_MILLIS
}

fn default_google_userinfo_url() -> String {
    prod::oauth::GOOGLE_USERINFO_URL.to_owned()
}

fn default_oauth_timeout() -> u64 {
    prod::oauth::TIMEOUT_IN_MILLIS
}
