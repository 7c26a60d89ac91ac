use careflow_core::{RoleProfileDraft, TokenClass};
use serde_json::{Value, json};

use crate::helpers::{BROWSER_USER_AGENT, TestApp, assert_session_cleared, doctor_body};

#[tokio::test]
async fn verify_returns_the_callers_identity() {
    let app = TestApp::new().await;
    let user = app
        .seed_user("p@careflow.test", RoleProfileDraft::Patient)
        .await;

    let response = app
        .get_with_bearer("/auth/verify", &app.token_for(&user, TokenClass::Access))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"], json!({ "userId": user.id, "role": "patient" }));
}

#[tokio::test]
async fn get_me_returns_the_stored_profile() {
    let app = TestApp::new().await;
    let email = TestApp::unique_email();
    let access_token = app.verified_patient(&email).await;

    let response = app.get_with_bearer("/me", &access_token).await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["email"], email.as_str());
    assert_eq!(body["data"]["verified"], true);
    assert_eq!(
        body["data"]["image"],
        "https://avatar.iran.liara.run/public"
    );
}

#[tokio::test]
async fn doctor_updates_user_and_doctor_fields_together() {
    let app = TestApp::new().await;
    let email = "doc@careflow.test";
    app.post_register(&doctor_body(email)).await;
    let code = app.last_code_for(email);
    let verified = app
        .post_verify_email(BROWSER_USER_AGENT, email, &code)
        .await;
    let body: Value = verified.json().await.unwrap();
    let access_token = body["data"]["accessToken"].as_str().unwrap().to_owned();

    let response = app
        .put_with_bearer(
            "/me",
            &access_token,
            &json!({
                "lastName": "Zitouni-Ben",
                "bio": "Cardiologist with 12 years of practice",
                "consultationFee": 60.0,
                "isAvailable": true,
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["lastName"], "Zitouni-Ben");

    let response = app.get_with_bearer("/doctor/me", &access_token).await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["specialtyName"], "Cardiologist");
    assert_eq!(body["data"]["licenseNumber"], "TN-CARD-0042");
    assert_eq!(body["data"]["consultationFee"], 60.0);
    assert_eq!(body["data"]["isAvailable"], true);
}

#[tokio::test]
async fn invalid_profile_update_is_rejected() {
    let app = TestApp::new().await;
    let user = app
        .seed_user("p@careflow.test", RoleProfileDraft::Patient)
        .await;
    let access_token = app.token_for(&user, TokenClass::Access);

    for body in [
        json!({ "firstName": "Al" }),
        json!({ "image": "javascript:alert(1)" }),
        json!({ "consultationFee": -5.0 }),
    ] {
        let response = app.put_with_bearer("/me", &access_token, &body).await;
        assert_eq!(response.status().as_u16(), 400, "accepted {body}");
    }
}

#[tokio::test]
async fn logout_does_not_revoke_issued_access_tokens() {
    let app = TestApp::new().await;
    let user = app
        .seed_user("p@careflow.test", RoleProfileDraft::Patient)
        .await;
    let access_token = app.token_for(&user, TokenClass::Access);

    let logout = app
        .http_client
        .post(format!("{}/auth/logout", app.address))
        .send()
        .await
        .unwrap();
    assert_session_cleared(&logout);

    let response = app.get_with_bearer("/me", &access_token).await;
    assert_eq!(response.status().as_u16(), 200);
}
