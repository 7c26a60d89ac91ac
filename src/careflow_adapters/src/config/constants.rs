pub mod env {
    pub const ENV_PREFIX: &str = "CAREFLOW";
    pub const ENV_SEPARATOR: &str = "__";
    pub const CONFIG_FILE: &str = "config/base";
}

pub const SESSION_COOKIE_NAME: &str = "auth_token";
pub const SESSION_COOKIE_MAX_AGE_IN_SECONDS: i64 = 60 * 60 * 24 * 30;
pub const DEFAULT_MOBILE_MARKERS: [&str; 2] = ["Android", "CareFlow"];

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub const ACCESS_TOKEN_TTL_IN_SECONDS: i64 = 15 * 60;
    pub const REFRESH_TOKEN_TTL_IN_SECONDS: i64 = super::SESSION_COOKIE_MAX_AGE_IN_SECONDS;
    pub const DATABASE_MAX_CONNECTIONS: u32 = 5;

    pub mod email_client {
        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const SENDER: &str = "no-reply@careflow.app";
        pub const TIMEOUT_IN_MILLIS: u64 = 10_000;
    }

    pub mod oauth {
        pub const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";
        pub const TIMEOUT_IN_MILLIS: u64 = 10_000;
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub const JWT_SECRET: &str = "test-secret-for-careflow-sessions";

    pub mod email_client {
        use std::time::Duration;

        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT: Duration = std::time::Duration::from_millis(200);
    }
}
