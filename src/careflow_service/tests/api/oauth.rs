use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{BROWSER_USER_AGENT, MOBILE_USER_AGENT, TestApp, session_cookie_pair};

fn google_profile(email: &str, verified: bool) -> Value {
    json!({
        "id": "1098765432",
        "email": email,
        "verified_email": verified,
        "given_name": "Nour",
        "family_name": "Belhadj",
        "picture": "https://lh3.googleusercontent.com/a/nour",
    })
}

#[tokio::test]
async fn first_google_login_provisions_a_verified_patient() {
    let app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/oauth2/v2/userinfo"))
        .and(header("authorization", "Bearer ya29.valid"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(google_profile("nour@gmail.com", true)),
        )
        .expect(2)
        .mount(&app.oauth_server)
        .await;

    let mobile = app
        .post_json(
            "/auth/oauth/google",
            MOBILE_USER_AGENT,
            &json!({ "accessToken": "ya29.valid" }),
        )
        .await;
    assert_eq!(mobile.status().as_u16(), 200);
    let body: Value = mobile.json().await.unwrap();
    assert_eq!(body["data"]["user"]["email"], "nour@gmail.com");
    assert_eq!(body["data"]["user"]["verified"], true);
    assert_eq!(
        body["data"]["user"]["image"],
        "https://lh3.googleusercontent.com/a/nour"
    );

    let web = app
        .post_json(
            "/auth/oauth/google",
            BROWSER_USER_AGENT,
            &json!({ "accessToken": "ya29.valid" }),
        )
        .await;
    assert_eq!(web.status().as_u16(), 200);
    assert!(session_cookie_pair(&web).is_some());

    assert_eq!(app.flow.credential_store().user_count().await, 1);
    assert_eq!(app.flow.credential_store().role_profile_count().await, 1);
    assert!(app.flow.email_client().sent().is_empty());
}

#[tokio::test]
async fn unverified_google_email_is_forbidden() {
    let app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/oauth2/v2/userinfo"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(google_profile("nour@gmail.com", false)),
        )
        .mount(&app.oauth_server)
        .await;

    let response = app
        .post_json(
            "/auth/oauth/google",
            BROWSER_USER_AGENT,
            &json!({ "accessToken": "ya29.valid" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 403);
    assert_eq!(app.flow.credential_store().user_count().await, 0);
}

#[tokio::test]
async fn rejected_google_token_is_unauthorized() {
    let app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path("/oauth2/v2/userinfo"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&app.oauth_server)
        .await;

    let response = app
        .post_json(
            "/auth/oauth/google",
            BROWSER_USER_AGENT,
            &json!({ "accessToken": "ya29.expired" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 401);
}
