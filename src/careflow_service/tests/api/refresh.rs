use careflow_core::{Role, RoleProfileDraft, TokenClass};
use serde_json::Value;

use crate::helpers::{
    BROWSER_USER_AGENT, PASSWORD, TestApp, assert_session_cleared, session_cookie_pair,
    set_cookies,
};

#[tokio::test]
async fn web_refresh_rotates_the_cookie_and_issues_a_usable_access_token() {
    let app = TestApp::new().await;
    let email = TestApp::unique_email();
    app.verified_patient(&email).await;
    let login = app.post_login(BROWSER_USER_AGENT, &email, PASSWORD).await;
    let cookie = session_cookie_pair(&login).unwrap();

    let response = app.post_refresh_with_cookie(&cookie).await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(session_cookie_pair(&response).is_some());
    let body: Value = response.json().await.unwrap();
    let access_token = body["data"]["accessToken"].as_str().unwrap();

    let verified = app.get_with_bearer("/auth/verify", access_token).await;
    assert_eq!(verified.status().as_u16(), 200);
}

#[tokio::test]
async fn mobile_refresh_reads_the_token_from_the_body() {
    let app = TestApp::new().await;
    let user = app
        .seed_user("mobile@careflow.test", RoleProfileDraft::Patient)
        .await;
    let refresh_token = app.token_for(&user, TokenClass::Refresh);

    let response = app.post_refresh_mobile(&refresh_token).await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(set_cookies(&response).is_empty());
    let body: Value = response.json().await.unwrap();
    assert!(body["data"]["refreshToken"].is_string());
    assert_eq!(body["data"]["user"]["id"], user.id);
}

#[tokio::test]
async fn refresh_without_a_token_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .post(format!("{}/auth/refresh-token", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn access_token_cannot_be_used_to_refresh() {
    let app = TestApp::new().await;
    let user = app
        .seed_user("a@careflow.test", RoleProfileDraft::Patient)
        .await;
    let access_token = app.token_for(&user, TokenClass::Access);

    let response = app.post_refresh_mobile(&access_token).await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn role_drift_on_refresh_clears_the_web_cookie() {
    let app = TestApp::new().await;
    let user = app
        .seed_user("drift@careflow.test", RoleProfileDraft::Patient)
        .await;
    let refresh_token = app.token_for(&user, TokenClass::Refresh);
    app.flow.change_role(user.id, Role::Doctor).await.unwrap();

    let web = app
        .post_refresh_with_cookie(&format!("auth_token={refresh_token}"))
        .await;
    assert_eq!(web.status().as_u16(), 401);
    assert_session_cleared(&web);
    let body: Value = web.json().await.unwrap();
    assert_eq!(body["error"], "User role has changed. Please log in again.");

    let mobile = app.post_refresh_mobile(&refresh_token).await;
    assert_eq!(mobile.status().as_u16(), 401);
    assert!(set_cookies(&mobile).is_empty());
}
