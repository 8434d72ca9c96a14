//! JSON inquiry endpoint tests.

mod helpers;

use helpers::fixtures::{minimal_pdf, pdf_data_url};
use helpers::mailer::RecordingMailer;
use helpers::{setup_test_app, setup_test_app_with};
use serde_json::{json, Value};

const PATH: &str = "/api/send-project-inquiry";

#[tokio::test]
async fn test_data_url_inquiry_attaches_and_keeps_file() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(PATH)
        .json(&json!({
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "organizationType": "School",
            "pdfUrl": pdf_data_url(&minimal_pdf()),
            "pdfFileName": "plan.pdf"
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Project inquiry submitted successfully");
    assert_eq!(app.stored_files().len(), 1);

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].subject, "New Project Inquiry - LIIGHT DESIGN");
    assert_eq!(sent[0].attachments.len(), 1);
    assert_eq!(sent[0].attachments[0].filename, "plan.pdf");
}

#[tokio::test]
async fn test_non_pdf_data_url_is_ignored() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(PATH)
        .json(&json!({
            "fullName": "Ada",
            "email": "ada@example.com",
            "pdfUrl": "https://example.com/plan.pdf"
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    assert!(app.stored_files().is_empty());
    assert!(app.mailer.sent()[0].attachments.is_empty());
}

#[tokio::test]
async fn test_missing_email_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(PATH)
        .json(&json!({ "fullName": "Ada", "pdfUrl": pdf_data_url(&minimal_pdf()) }))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["message"], "Name and email are required");
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_mail_failure_removes_decoded_file() {
    let app = setup_test_app_with(RecordingMailer::failing(), true).await;

    let response = app
        .client()
        .post(PATH)
        .json(&json!({
            "fullName": "Ada",
            "email": "ada@example.com",
            "pdfUrl": pdf_data_url(&minimal_pdf())
        }))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["message"], "Failed to send project inquiry emails");
    assert!(app.stored_files().is_empty());
}

#[tokio::test]
async fn test_malformed_body_uses_error_shape() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(PATH)
        .content_type("application/json")
        .bytes("{ not json".into())
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_body_over_request_limit_is_rejected() {
    let app = setup_test_app().await;

    let filler = "a".repeat(41 * 1024 * 1024);
    let response = app
        .client()
        .post(PATH)
        .json(&json!({
            "fullName": "Ada",
            "email": "ada@example.com",
            "projectDetails": filler
        }))
        .await;

    assert_eq!(response.status_code(), 413);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(app.stored_files().is_empty());
    assert!(app.mailer.sent().is_empty());
}
