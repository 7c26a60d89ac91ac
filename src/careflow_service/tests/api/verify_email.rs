use careflow_core::{CredentialStore, Email, PendingVerification, VerificationCode};
use chrono::{Duration, Utc};
use secrecy::Secret;
use serde_json::Value;

use crate::helpers::{BROWSER_USER_AGENT, PASSWORD, TestApp, patient_body};

#[tokio::test]
async fn register_verify_login_then_reach_patient_route() {
    let app = TestApp::new().await;
    let email = TestApp::unique_email();
    app.post_register(&patient_body(&email)).await;

    let code = app.last_code_for(&email);
    let verified = app.post_verify_email(BROWSER_USER_AGENT, &email, &code).await;
    assert_eq!(verified.status().as_u16(), 200);
    let body: Value = verified.json().await.unwrap();
    assert_eq!(body["message"], "Email verified successfully");

    let login = app.post_login(BROWSER_USER_AGENT, &email, PASSWORD).await;
    assert_eq!(login.status().as_u16(), 200);
    let body: Value = login.json().await.unwrap();
    let access_token = body["data"]["accessToken"].as_str().unwrap();

    let response = app.get_with_bearer("/patient/me", access_token).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert!(body["data"]["userId"].is_number());
}

#[tokio::test]
async fn verifying_twice_conflicts() {
    let app = TestApp::new().await;
    let email = TestApp::unique_email();
    app.post_register(&patient_body(&email)).await;
    let code = app.last_code_for(&email);

    app.post_verify_email(BROWSER_USER_AGENT, &email, &code).await;
    let response = app.post_verify_email(BROWSER_USER_AGENT, &email, &code).await;

    assert_eq!(response.status().as_u16(), 409);
}

#[tokio::test]
async fn expired_code_is_gone() {
    let app = TestApp::new().await;
    let email = TestApp::unique_email();
    app.post_register(&patient_body(&email)).await;
    let code = app.last_code_for(&email);

    app.flow
        .credential_store()
        .replace_verification(
            &Email::try_from(Secret::from(email.clone())).unwrap(),
            PendingVerification {
                code: VerificationCode::parse(code.clone()).unwrap(),
                expires_at: Utc::now() - Duration::minutes(1),
            },
        )
        .await
        .unwrap();

    let response = app.post_verify_email(BROWSER_USER_AGENT, &email, &code).await;

    assert_eq!(response.status().as_u16(), 410);
}

#[tokio::test]
async fn wrong_code_is_unauthorized_and_unknown_email_not_found() {
    let app = TestApp::new().await;
    let email = TestApp::unique_email();
    app.post_register(&patient_body(&email)).await;
    let code = app.last_code_for(&email);
    let wrong = if code == "123456" { "654321" } else { "123456" };

    let response = app.post_verify_email(BROWSER_USER_AGENT, &email, wrong).await;
    assert_eq!(response.status().as_u16(), 401);

    let response = app
        .post_verify_email(BROWSER_USER_AGENT, "ghost@careflow.test", &code)
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn resend_replaces_the_previous_code() {
    let app = TestApp::new().await;
    let email = TestApp::unique_email();
    app.post_register(&patient_body(&email)).await;
    let first = app.last_code_for(&email);

    let response = app.post_resend(&email).await;
    assert_eq!(response.status().as_u16(), 200);
    let second = app.last_code_for(&email);
    assert_eq!(app.flow.email_client().sent().len(), 2);

    if first != second {
        let response = app.post_verify_email(BROWSER_USER_AGENT, &email, &first).await;
        assert_eq!(response.status().as_u16(), 401);
    }
    let response = app.post_verify_email(BROWSER_USER_AGENT, &email, &second).await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.post_resend(&email).await;
    assert_eq!(response.status().as_u16(), 409);
}
