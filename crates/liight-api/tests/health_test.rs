mod helpers;

use helpers::setup_test_app;
use serde_json::{json, Value};

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.json::<Value>(),
        json!({ "status": "ok", "message": "Server is running" })
    );
}

#[tokio::test]
async fn test_connectivity_check() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/test").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), json!({ "message": "Backend connected!" }));
}

#[tokio::test]
async fn test_missing_upload_is_not_found() {
    let app = setup_test_app().await;

    let response = app.client().get("/uploads/1700000000000-missing.pdf").await;

    assert_eq!(response.status_code(), 404);
}
