use serde_json::{Value, json};

use crate::helpers::{TestApp, doctor_body, patient_body, set_cookies};

#[tokio::test]
async fn register_returns_201_and_mails_a_code() {
    let app = TestApp::new().await;
    let email = TestApp::unique_email();

    let response = app.post_register(&patient_body(&email)).await;

    assert_eq!(response.status().as_u16(), 201);
    assert!(set_cookies(&response).is_empty());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Please validate your email" }));

    let code = app.last_code_for(&email);
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(app.flow.credential_store().user_count().await, 1);
    assert_eq!(app.flow.credential_store().role_profile_count().await, 1);
}

#[tokio::test]
async fn register_doctor_creates_doctor_profile() {
    let app = TestApp::new().await;

    let response = app.post_register(&doctor_body("doc@careflow.test")).await;

    assert_eq!(response.status().as_u16(), 201);
    assert_eq!(app.flow.credential_store().role_profile_count().await, 1);
}

#[tokio::test]
async fn register_duplicate_email_returns_409() {
    let app = TestApp::new().await;
    let email = TestApp::unique_email();
    app.post_register(&patient_body(&email)).await;

    let response = app.post_register(&patient_body(&email)).await;

    assert_eq!(response.status().as_u16(), 409);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "User already exists");
    assert_eq!(app.flow.credential_store().user_count().await, 1);
}

#[tokio::test]
async fn register_rejects_invalid_input_without_writing() {
    let app = TestApp::new().await;
    let email = TestApp::unique_email();

    let mut doctor_without_license = doctor_body(&email);
    doctor_without_license
        .as_object_mut()
        .unwrap()
        .remove("licenseNumber");
    let mut short_password = patient_body(&email);
    short_password["password"] = json!("12345");
    let mut admin = patient_body(&email);
    admin["role"] = json!("admin");
    let mut unknown_role = patient_body(&email);
    unknown_role["role"] = json!("nurse");
    let mut short_name = patient_body(&email);
    short_name["firstName"] = json!("Al");
    let mut unknown_specialty = doctor_body(&email);
    unknown_specialty["specialtyId"] = json!(999);

    let cases = [
        doctor_without_license,
        short_password,
        admin,
        unknown_role,
        short_name,
        unknown_specialty,
        json!({ "email": email }),
    ];

    for case in cases {
        let response = app.post_register(&case).await;
        assert_eq!(response.status().as_u16(), 400, "accepted {case}");
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string());
    }

    assert_eq!(app.flow.credential_store().user_count().await, 0);
    assert!(app.flow.email_client().sent().is_empty());
}

#[tokio::test]
async fn malformed_json_uses_the_error_envelope() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .post(format!("{}/auth/register", app.address))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}
