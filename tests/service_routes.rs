mod support;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use uuid::Uuid;

use college_erp::{
    config::ServiceKind,
    infrastructure::middleware::REQUEST_ID_HEADER,
    server::with_common_layers,
};
use support::{academic_app, academic_app_with_limit, admin_app, get_json, send_json, test_config, Campus};

#[tokio::test]
async fn test_health_on_both_services() {
    let (status, body) = get_json(academic_app(Campus::new().people()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "academic-backend");
    assert!(body["timestamp"].is_string());

    let (status, body) = get_json(admin_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "admin-backend");
}

#[tokio::test]
async fn test_readiness_pings_directory() {
    let (status, body) = get_json(academic_app(Campus::new().people()), "/health/ready").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_academic_placeholders() {
    let app = academic_app(Campus::new().people());

    let (status, body) = get_json(app.clone(), "/api/academic/v1/attendance/sessions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "List attendance sessions - to be implemented"}));

    let request = Request::builder()
        .method("POST")
        .uri("/api/academic/v1/attendance/sessions/abc/mark")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send_json(app.clone(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Mark attendance - to be implemented");

    let (_, body) = get_json(app, "/api/academic/v1/student/marks").await;
    assert_eq!(body["message"], "Get student marks summary - to be implemented");
}

#[tokio::test]
async fn test_admin_placeholders() {
    let (status, body) = get_json(admin_app(), "/api/admin/v1/professors/42").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Get professor - to be implemented");

    let request = Request::builder()
        .method("DELETE")
        .uri("/api/admin/v1/students/42")
        .body(Body::empty())
        .unwrap();
    let (_, body) = send_json(admin_app(), request).await;
    assert_eq!(body["message"], "Delete student - to be implemented");

    let (_, body) = get_json(admin_app(), "/api/admin/v1/academic/branches").await;
    assert_eq!(body["message"], "List branches - to be implemented");
}

#[tokio::test]
async fn test_rate_limit_applies_to_api_only() {
    let campus = Campus::new();
    let app = academic_app_with_limit(campus.people(), 2);
    let uri = format!("/api/academic/v1/student/profile?user_id={}", campus.student_user);

    for _ in 0..2 {
        let (status, _) = get_json(app.clone(), &uri).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = get_json(app.clone(), &uri).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "RATE_LIMITED");

    let (status, _) = get_json(app.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);

    // Without a trusted proxy a forged forwarded address gets no fresh budget
    let request = Request::builder()
        .uri(&uri)
        .header("x-forwarded-for", "198.51.100.20")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send_json(app, request).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let campus = Campus::new();
    let app = with_common_layers(
        academic_app(campus.people()),
        &test_config(ServiceKind::Academic),
    )
    .unwrap();

    let request = Request::builder()
        .uri(format!("/api/academic/v1/student/profile?user_id={}", Uuid::new_v4()))
        .header(REQUEST_ID_HEADER, "req-123")
        .body(Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.clone(), request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-123");

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    let generated = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
    assert!(Uuid::parse_str(generated).is_ok());
}
