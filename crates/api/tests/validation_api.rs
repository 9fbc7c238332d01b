//! Request validation that happens before any database access.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{admin_token, body_json, get_auth, offline_app, post_json_auth, student_token, warden_token};
use serde_json::json;
use tower::ServiceExt;

async fn assert_validation_error(response: axum::http::Response<Body>, field: &str) {
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let message = json["message"].as_str().unwrap();
    assert!(message.contains(field), "message {message:?} should mention {field}");
}

#[tokio::test]
async fn complaint_title_and_description_lengths() {
    let body = json!({ "title": "ab", "description": "short", "category": "Plumbing" });
    let response = post_json_auth(offline_app(), "/api/v1/complaints", &student_token(), body).await;
    assert_validation_error(response, "title").await;
}

#[tokio::test]
async fn unknown_complaint_category_is_rejected() {
    let body = json!({
        "title": "Tap leaking",
        "description": "The bathroom tap leaks all night",
        "category": "Plumbing!"
    });
    let response = post_json_auth(offline_app(), "/api/v1/complaints", &student_token(), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/transit")
        .header("authorization", format!("Bearer {}", student_token()))
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = offline_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn user_creation_checks_email_and_password() {
    let body = json!({
        "name": "Ravi",
        "email": "ravi-at-uni",
        "password": "short",
        "role": "student",
        "hostel": "BH-1"
    });
    let response = post_json_auth(offline_app(), "/api/v1/users", &admin_token(), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let message = body_json(response).await["message"].as_str().unwrap().to_string();
    assert!(message.contains("email"));
    assert!(message.contains("password"));
}

#[tokio::test]
async fn student_needs_hostel() {
    let body = json!({
        "name": "Ravi Kumar",
        "email": "ravi@uni.edu",
        "password": "password123",
        "role": "student"
    });
    let response = post_json_auth(offline_app(), "/api/v1/users", &admin_token(), body).await;
    assert_validation_error(response, "hostel").await;
}

#[tokio::test]
async fn fee_submission_requires_valid_type_and_url() {
    let body = json!({ "documentUrl": "https://res.cloudinary.com/demo/raw/upload/v1/r.pdf" });
    let response = post_json_auth(offline_app(), "/api/v1/fee/laundry", &student_token(), body).await;
    assert_validation_error(response, "FeeType").await;

    let body = json!({ "documentUrl": "not a url" });
    let response = post_json_auth(offline_app(), "/api/v1/fee/hostel", &student_token(), body).await;
    assert_validation_error(response, "document").await;
}

#[tokio::test]
async fn fee_rejection_requires_reason() {
    let response = post_json_auth(
        offline_app(),
        "/api/v1/fee/students/5/mess/reject",
        &warden_token(),
        json!({ "reason": "" }),
    )
    .await;
    assert_validation_error(response, "reason").await;
}

#[tokio::test]
async fn feedback_rating_out_of_range() {
    let body = json!({ "meal": "lunch", "rating": 9 });
    let response = post_json_auth(offline_app(), "/api/v1/mess/feedback", &student_token(), body).await;
    assert_validation_error(response, "rating").await;
}

#[tokio::test]
async fn transit_purpose_required() {
    let body = json!({ "direction": "EXIT", "purpose": "" });
    let response = post_json_auth(offline_app(), "/api/v1/transit", &student_token(), body).await;
    assert_validation_error(response, "purpose").await;
}

#[tokio::test]
async fn complaint_filters_are_checked() {
    let response = get_auth(
        offline_app(),
        "/api/v1/complaints?status=Closed",
        &warden_token(),
    )
    .await;
    assert_validation_error(response, "ComplaintStatus").await;
}

#[tokio::test]
async fn menu_upsert_rejects_empty_items() {
    let request = Request::builder()
        .method("PUT")
        .uri("/api/v1/mess/menu")
        .header("authorization", format!("Bearer {}", warden_token()))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "day": "monday", "meal": "lunch", "items": ["  "] }).to_string(),
        ))
        .unwrap();
    let response = offline_app().oneshot(request).await.unwrap();
    assert_validation_error(response, "item").await;
}
