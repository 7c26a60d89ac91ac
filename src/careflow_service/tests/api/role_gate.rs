use careflow_core::{Role, RoleProfileDraft, TokenClass};
use serde_json::{Value, json};

use crate::helpers::{MOBILE_USER_AGENT, TestApp, assert_session_cleared, set_cookies};

#[tokio::test]
async fn missing_or_malformed_header_is_unauthorized_without_clearing() {
    let app = TestApp::new().await;

    let missing = app
        .http_client
        .get(format!("{}/me", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 401);
    assert!(set_cookies(&missing).is_empty());
    let body: Value = missing.json().await.unwrap();
    assert_eq!(body["error"], "Missing Authorization header");

    for header in ["Token abc", "Bearer", "Bearer a b", "bearer abc"] {
        let response = app
            .http_client
            .get(format!("{}/me", app.address))
            .header("authorization", header)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 401, "accepted {header}");
        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body["error"],
            "Authorization header must be in 'Bearer <token>' format"
        );
    }
}

#[tokio::test]
async fn invalid_token_clears_the_cookie() {
    let app = TestApp::new().await;

    let response = app.get_with_bearer("/me", "not.a.jwt").await;

    assert_eq!(response.status().as_u16(), 401);
    assert_session_cleared(&response);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn mobile_callers_also_get_the_removal_cookie() {
    let app = TestApp::new().await;
    let patient = app
        .seed_user("p@careflow.test", RoleProfileDraft::Patient)
        .await;

    let invalid = app
        .http_client
        .get(format!("{}/me", app.address))
        .header("user-agent", MOBILE_USER_AGENT)
        .bearer_auth("not.a.jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(invalid.status().as_u16(), 401);
    assert_session_cleared(&invalid);

    let wrong_role = app
        .http_client
        .get(format!("{}/doctor/me", app.address))
        .header("user-agent", MOBILE_USER_AGENT)
        .bearer_auth(app.token_for(&patient, TokenClass::Access))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong_role.status().as_u16(), 401);
    assert_session_cleared(&wrong_role);
}

#[tokio::test]
async fn refresh_token_is_not_an_access_token() {
    let app = TestApp::new().await;
    let user = app
        .seed_user("p@careflow.test", RoleProfileDraft::Patient)
        .await;

    let response = app
        .get_with_bearer("/me", &app.token_for(&user, TokenClass::Refresh))
        .await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn wrong_role_is_rejected_like_an_unauthenticated_caller() {
    let app = TestApp::new().await;
    let patient = app
        .seed_user("p@careflow.test", RoleProfileDraft::Patient)
        .await;
    let access_token = app.token_for(&patient, TokenClass::Access);

    let response = app.get_with_bearer("/doctor/me", &access_token).await;
    assert_eq!(response.status().as_u16(), 401);
    assert_session_cleared(&response);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Insufficient permissions");

    let response = app
        .put_with_bearer(
            &format!("/admin/users/{}/role", patient.id),
            &access_token,
            &json!({ "role": "admin" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn access_token_is_refused_after_an_admin_role_change() {
    let app = TestApp::new().await;
    let admin = app
        .seed_user("root@careflow.test", RoleProfileDraft::None)
        .await;
    let patient = app
        .seed_user("p@careflow.test", RoleProfileDraft::Patient)
        .await;
    let admin_token = app.token_for(&admin, TokenClass::Access);
    let patient_token = app.token_for(&patient, TokenClass::Access);
    assert_eq!(
        app.get_with_bearer("/patient/me", &patient_token)
            .await
            .status()
            .as_u16(),
        200
    );

    let response = app
        .put_with_bearer(
            &format!("/admin/users/{}/role", patient.id),
            &admin_token,
            &json!({ "role": "doctor" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["role"], "doctor");

    let response = app.get_with_bearer("/patient/me", &patient_token).await;
    assert_eq!(response.status().as_u16(), 401);
    assert_session_cleared(&response);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "User role has changed. Please log in again.");

    let response = app.get_with_bearer("/me", &patient_token).await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn admin_role_change_validates_input() {
    let app = TestApp::new().await;
    let admin = app
        .seed_user("root@careflow.test", RoleProfileDraft::None)
        .await;
    let admin_token = app.token_for(&admin, TokenClass::Access);

    let unknown_user = app
        .put_with_bearer("/admin/users/9999/role", &admin_token, &json!({ "role": "doctor" }))
        .await;
    assert_eq!(unknown_user.status().as_u16(), 404);

    let bad_role = app
        .put_with_bearer(
            &format!("/admin/users/{}/role", admin.id),
            &admin_token,
            &json!({ "role": "superuser" }),
        )
        .await;
    assert_eq!(bad_role.status().as_u16(), 400);

    let bad_id = app
        .put_with_bearer("/admin/users/abc/role", &admin_token, &json!({ "role": "doctor" }))
        .await;
    assert_eq!(bad_id.status().as_u16(), 400);

    assert_eq!(
        app.flow.current_user(admin.id).await.unwrap().role,
        Role::Admin
    );
}
