//! Authentication and role checks, exercised without a database.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    admin_token, body_json, get, get_auth, offline_app, post_json, post_json_auth, send,
    student_token, token, warden_token,
};
use hostelia_core::roles::Role;
use serde_json::json;

#[tokio::test]
async fn missing_token_is_401_with_envelope() {
    let response = get(offline_app(), "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["message"], "Missing Authorization header");
}

#[tokio::test]
async fn garbage_token_is_401() {
    let response = get_auth(offline_app(), "/api/v1/complaints", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_with_unknown_role_is_401() {
    use hostelia_api::auth::jwt::Claims;
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: 9,
        role: "janitor".into(),
        hostel: None,
        exp: now + 600,
        iat: now,
        jti: "x".into(),
    };
    let forged = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(common::TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let response = get_auth(offline_app(), "/api/v1/dashboard", &forged).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_require_auth() {
    let routes = [
        (Method::GET, "/api/v1/complaints"),
        (Method::GET, "/api/v1/fee"),
        (Method::GET, "/api/v1/announcement"),
        (Method::GET, "/api/v1/mess/menu"),
        (Method::GET, "/api/v1/transit"),
        (Method::GET, "/api/v1/dashboard"),
        (Method::GET, "/api/v1/users/students"),
        (Method::DELETE, "/api/v1/users/3"),
    ];
    for (method, uri) in routes {
        let response = send(offline_app(), method.clone(), uri, None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
    }
}

#[tokio::test]
async fn students_cannot_call_staff_routes() {
    let t = student_token();
    let cases = [
        (Method::GET, "/api/v1/users/students", None),
        (Method::GET, "/api/v1/users/wardens", None),
        (Method::POST, "/api/v1/complaints/1/resolve", None),
        (Method::POST, "/api/v1/complaints/1/reject", None),
        (Method::GET, "/api/v1/fee/students/5", None),
        (Method::POST, "/api/v1/fee/students/5/hostel/approve", None),
        (Method::GET, "/api/v1/mess/feedback", None),
        (
            Method::POST,
            "/api/v1/announcement",
            Some(json!({ "title": "Hello", "message": "World" })),
        ),
    ];
    for (method, uri, body) in cases {
        let response = send(offline_app(), method.clone(), uri, Some(&t), body).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{method} {uri}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "FORBIDDEN");
    }
}

#[tokio::test]
async fn staff_cannot_call_student_routes() {
    let t = warden_token();
    let complaint = json!({
        "title": "Fan broken",
        "description": "Ceiling fan does not spin",
        "category": "Electrical"
    });
    let response = post_json_auth(offline_app(), "/api/v1/complaints", &t, complaint).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(offline_app(), "/api/v1/complaints/1/confirm", &t, json!({})).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let transit = json!({ "direction": "EXIT", "purpose": "Library" });
    let response = post_json_auth(offline_app(), "/api/v1/transit", &t, transit).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn only_admins_manage_users() {
    let user = json!({
        "name": "New Warden",
        "email": "warden@uni.edu",
        "password": "password123",
        "role": "warden",
        "hostel": "BH-2"
    });
    let response = post_json_auth(offline_app(), "/api/v1/users", &warden_token(), user).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(
        offline_app(),
        Method::DELETE,
        "/api/v1/users/1",
        Some(&admin_token()),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn warden_cannot_list_other_hostel() {
    let t = token(2, Role::Warden, Some("BH-1"));
    let response = get_auth(offline_app(), "/api/v1/users/students?hostel=BH-2", &t).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn login_validates_body() {
    let response = post_json(
        offline_app(),
        "/api/v1/auth/login",
        json!({ "email": "not-an-email", "password": "x" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["message"].as_str().unwrap().contains("email"));
}
