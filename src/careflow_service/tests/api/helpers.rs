use careflow_adapters::{
    authentication::{AuthFlow, JwtConfig},
    config::test,
    email::MockEmailClient,
    http::DualChannelTransport,
    oauth::GoogleOAuthProvider,
    persistence::HashMapCredentialStore,
};
use careflow_core::{
    CredentialStore, Email, NewUser, RoleProfileDraft, TokenClass, TokenService, UserRecord,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use careflow_service::CareflowService;
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use reqwest::Response;
use secrecy::{ExposeSecret, Secret};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use wiremock::MockServer;

pub const MOBILE_USER_AGENT: &str = "CareFlow/2.3 (Android 14)";
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) Firefox/131.0";
pub const PASSWORD: &str = "secret123";

pub type TestFlow = AuthFlow<HashMapCredentialStore, MockEmailClient, GoogleOAuthProvider>;

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub flow: TestFlow,
    pub oauth_server: MockServer,
}

impl TestApp {
    pub async fn new() -> Self {
        let oauth_server = MockServer::start().await;
        let oauth_provider = GoogleOAuthProvider::new(
            format!("{}/oauth2/v2/userinfo", oauth_server.uri()),
            reqwest::Client::new(),
        );

        let flow = AuthFlow::new(
            HashMapCredentialStore::new(),
            MockEmailClient::new(),
            oauth_provider,
            JwtConfig {
                jwt_secret: Secret::from(test::JWT_SECRET.to_owned()),
                access_ttl_in_seconds: 900,
                refresh_ttl_in_seconds: 3600,
            },
            DualChannelTransport::new(false, vec!["Android".to_owned(), "CareFlow".to_owned()]),
        );

        let listener = TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());
        let router = CareflowService::new(flow.clone()).as_nested_router(None);

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test server failed");
        });

        Self {
            address,
            http_client: reqwest::Client::new(),
            flow,
            oauth_server,
        }
    }

    pub fn unique_email() -> String {
        SafeEmail().fake()
    }

    pub async fn post_json(&self, path: &str, user_agent: &str, body: &Value) -> Response {
        self.http_client
            .post(format!("{}{}", self.address, path))
            .header("user-agent", user_agent)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_register(&self, body: &Value) -> Response {
        self.post_json("/auth/register", BROWSER_USER_AGENT, body).await
    }

    pub async fn post_login(&self, user_agent: &str, email: &str, password: &str) -> Response {
        self.post_json(
            "/auth/login",
            user_agent,
            &json!({ "email": email, "password": password }),
        )
        .await
    }

    pub async fn post_verify_email(&self, user_agent: &str, email: &str, code: &str) -> Response {
        self.post_json(
            "/auth/verify-email",
            user_agent,
            &json!({ "email": email, "code": code }),
        )
        .await
    }

    pub async fn post_resend(&self, email: &str) -> Response {
        self.post_json(
            "/auth/resend-verification",
            BROWSER_USER_AGENT,
            &json!({ "email": email }),
        )
        .await
    }

    pub async fn post_refresh_with_cookie(&self, cookie: &str) -> Response {
        self.http_client
            .post(format!("{}/auth/refresh-token", self.address))
            .header("user-agent", BROWSER_USER_AGENT)
            .header("cookie", cookie)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_refresh_mobile(&self, refresh_token: &str) -> Response {
        self.post_json(
            "/auth/refresh-token",
            MOBILE_USER_AGENT,
            &json!({ "refreshToken": refresh_token }),
        )
        .await
    }

    pub async fn get_with_bearer(&self, path: &str, access_token: &str) -> Response {
        self.http_client
            .get(format!("{}{}", self.address, path))
            .header("user-agent", BROWSER_USER_AGENT)
            .bearer_auth(access_token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_with_bearer(&self, path: &str, access_token: &str, body: &Value) -> Response {
        self.http_client
            .put(format!("{}{}", self.address, path))
            .header("user-agent", BROWSER_USER_AGENT)
            .bearer_auth(access_token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub fn last_code_for(&self, email: &str) -> String {
        self.flow
            .email_client()
            .last_code_for(email)
            .expect("No verification code was sent")
    }

    /// Register a patient over HTTP and verify it with the mailed code,
    /// returning the web access token.
    pub async fn verified_patient(&self, email: &str) -> String {
        let response = self.post_register(&patient_body(email)).await;
        assert_eq!(response.status().as_u16(), 201);

        let code = self.last_code_for(email);
        let response = self
            .post_verify_email(BROWSER_USER_AGENT, email, &code)
            .await;
        assert_eq!(response.status().as_u16(), 200);

        let body: Value = response.json().await.unwrap();
        body["data"]["accessToken"].as_str().unwrap().to_owned()
    }

    /// Store a verified account directly, bypassing registration.
    pub async fn seed_user(&self, email: &str, profile: RoleProfileDraft) -> UserRecord {
        self.flow
            .credential_store()
            .create_with_profile(NewUser {
                first_name: "Seeded".to_owned(),
                last_name: "Account".to_owned(),
                email: Email::try_from(Secret::from(email.to_owned())).unwrap(),
                image: None,
                password_hash: None,
                verified: true,
                verification: None,
                profile,
            })
            .await
            .unwrap()
    }

    pub fn token_for(&self, user: &UserRecord, class: TokenClass) -> String {
        self.flow
            .token_service()
            .issue(user.id, user.role, class)
            .unwrap()
            .expose_secret()
            .to_owned()
    }
}

pub fn patient_body(email: &str) -> Value {
    json!({
        "firstName": "Amina",
        "lastName": "Haddad",
        "email": email,
        "password": PASSWORD,
    })
}

pub fn doctor_body(email: &str) -> Value {
    json!({
        "firstName": "Mourad",
        "lastName": "Zitouni",
        "email": email,
        "password": PASSWORD,
        "role": "doctor",
        "specialtyId": 3,
        "licenseNumber": "TN-CARD-0042",
    })
}

/// All `Set-Cookie` values of a response.
pub fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_owned)
        .collect()
}

/// The `name=value` pair of the session cookie, ready for a `Cookie` header.
pub fn session_cookie_pair(response: &Response) -> Option<String> {
    set_cookies(response)
        .into_iter()
        .find(|cookie| cookie.starts_with("auth_token="))
        .and_then(|cookie| cookie.split(';').next().map(str::to_owned))
}

/// The response carries exactly one `Set-Cookie`, and it expires the session cookie.
pub fn assert_session_cleared(response: &Response) {
    let cookies = set_cookies(response);
    assert_eq!(cookies.len(), 1, "expected a single removal cookie, got {cookies:?}");

    let cookie = Cookie::parse(cookies[0].clone()).unwrap();
    assert_eq!(cookie.name(), "auth_token");
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.max_age().map(|age| age.whole_seconds()), Some(0));
}
