use axum_extra::extract::cookie::{Cookie, SameSite};
use serde_json::Value;

use crate::helpers::{
    BROWSER_USER_AGENT, MOBILE_USER_AGENT, PASSWORD, TestApp, assert_session_cleared,
    patient_body, set_cookies,
};

#[tokio::test]
async fn unverified_login_is_forbidden_regardless_of_password() {
    let app = TestApp::new().await;
    let email = TestApp::unique_email();
    app.post_register(&patient_body(&email)).await;

    for password in [PASSWORD, "not-the-password", "abc", ""] {
        let response = app.post_login(BROWSER_USER_AGENT, &email, password).await;
        assert_eq!(response.status().as_u16(), 403, "password {password:?}");
    }
}

#[tokio::test]
async fn unknown_email_and_wrong_password_are_indistinguishable() {
    let app = TestApp::new().await;
    let email = TestApp::unique_email();
    app.verified_patient(&email).await;

    let unknown = app
        .post_login(BROWSER_USER_AGENT, "nobody@careflow.test", PASSWORD)
        .await;
    let wrong = app
        .post_login(BROWSER_USER_AGENT, &email, "wrong-password")
        .await;

    assert_eq!(unknown.status().as_u16(), 404);
    assert_eq!(unknown.status(), wrong.status());
    let unknown: Value = unknown.json().await.unwrap();
    let wrong: Value = wrong.json().await.unwrap();
    assert_eq!(unknown, wrong);
}

#[tokio::test]
async fn web_login_sets_http_only_cookie() {
    let app = TestApp::new().await;
    let email = TestApp::unique_email();
    app.verified_patient(&email).await;

    let response = app.post_login(BROWSER_USER_AGENT, &email, PASSWORD).await;

    assert_eq!(response.status().as_u16(), 200);
    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 1);
    let cookie = Cookie::parse(cookies[0].clone()).unwrap();
    assert_eq!(cookie.name(), "auth_token");
    assert_eq!(cookie.value().split('.').count(), 3);
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.max_age().map(|age| age.whole_seconds()), Some(2_592_000));

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Login successful");
    assert!(body["data"]["accessToken"].is_string());
    assert!(body["data"].get("refreshToken").is_none());
}

#[tokio::test]
async fn mobile_login_returns_tokens_and_user_in_body() {
    let app = TestApp::new().await;
    let email = TestApp::unique_email();
    app.verified_patient(&email).await;

    let response = app.post_login(MOBILE_USER_AGENT, &email, PASSWORD).await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(set_cookies(&response).is_empty());
    let body: Value = response.json().await.unwrap();
    assert!(body["data"]["accessToken"].is_string());
    assert!(body["data"]["refreshToken"].is_string());
    assert_eq!(body["data"]["user"]["email"], email.as_str());
    assert_eq!(body["data"]["user"]["role"], "patient");
    assert!(body["data"]["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn logout_clears_the_cookie() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .post(format!("{}/auth/logout", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_session_cleared(&response);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Logged out successfully");
}
