use embroidery_site::ErrorBody;

use crate::helpers::{spawn_app, spawn_app_with, RecordingTransport, TRANSPORT_FAILURE};

fn valid_body() -> serde_json::Value {
    serde_json::json!({
        "name": "John Doe",
        "email": "john@example.com",
        "message": "Hello, I need custom embroidery work."
    })
}

#[tokio::test]
async fn contact_with_valid_data_sends_one_email_and_returns_200() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app.post_contact(&valid_body()).await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"message": "Email sent successfully"}));

    let attempts = app.transport.attempts();
    assert_eq!(attempts.len(), 1);
    let notification = &attempts[0];
    assert_eq!(notification.from.to_string(), "inquiries@example.com");
    assert_eq!(notification.to.to_string(), "info@example.com");
    assert!(notification.subject.contains("John Doe"));
    assert!(notification.html.contains("john@example.com"));
    assert!(notification
        .html
        .contains("Hello, I need custom embroidery work."));
}

#[tokio::test]
async fn contact_with_missing_fields_returns_400_and_sends_nothing() {
    // arrange
    let app = spawn_app().await;
    let test_cases = vec![
        (
            serde_json::json!({"email": "john@example.com", "message": "Hello"}),
            "missing name",
        ),
        (
            serde_json::json!({"name": "John Doe", "message": "Hello"}),
            "missing email",
        ),
        (
            serde_json::json!({"name": "John Doe", "email": "john@example.com"}),
            "missing message",
        ),
        (
            serde_json::json!({"name": "", "email": "john@example.com", "message": "Hello"}),
            "empty name",
        ),
        (
            serde_json::json!({"name": "John Doe", "email": "john@example.com", "message": "<script>x</script>"}),
            "message made only of markup",
        ),
        (serde_json::json!({}), "empty object"),
    ];

    for (invalid_body, description) in test_cases {
        // act
        let response = app.post_contact(&invalid_body).await;

        // assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "API did not fail with 400 when the payload had {}",
            description
        );
        let body: ErrorBody = response.json().await.unwrap();
        assert_eq!(body.error, "All fields are required");
    }
    assert!(app.transport.attempts().is_empty());
}

#[tokio::test]
async fn contact_with_invalid_email_returns_400_and_sends_nothing() {
    // arrange
    let app = spawn_app().await;
    let test_cases = vec!["invalid-email", "john@example", "john doe@example.com"];

    for email in test_cases {
        // act
        let response = app
            .post_contact(&serde_json::json!({
                "name": "John Doe",
                "email": email,
                "message": "Hello"
            }))
            .await;

        // assert
        assert_eq!(400, response.status().as_u16(), "{} was accepted", email);
        let body: ErrorBody = response.json().await.unwrap();
        assert_eq!(body.error, "Invalid email address");
    }
    assert!(app.transport.attempts().is_empty());
}

#[tokio::test]
async fn contact_sanitizes_markup_before_sending() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app
        .post_contact(&serde_json::json!({
            "name": "John <script>alert(\"xss\")</script> Doe",
            "email": "john@example.com",
            "message": "Hello <img src=\"x\" onerror=\"alert(1)\">"
        }))
        .await;

    // assert
    assert_eq!(200, response.status().as_u16());
    let attempts = app.transport.attempts();
    assert_eq!(attempts.len(), 1);
    let html = &attempts[0].html;
    assert!(!html.contains("<script>"));
    assert!(!html.contains("onerror"));
    assert!(html.contains("John  Doe"));
    assert!(html.contains("Hello"));
}

#[tokio::test]
async fn contact_formats_multi_line_messages() {
    // arrange
    let app = spawn_app().await;

    // act
    app.post_contact(&serde_json::json!({
        "name": "Jane Smith",
        "email": "jane@company.com",
        "message": "I need badges for my team.\nPlease contact me."
    }))
    .await;

    // assert
    let attempts = app.transport.attempts();
    let html = &attempts[0].html;
    assert!(html.contains("Jane Smith"));
    assert!(html.contains("jane@company.com"));
    assert!(html.contains("I need badges for my team.<br>Please contact me."));
    assert!(html.contains("New Contact Form Submission"));
    assert!(html.contains("Alamra Embroidery"));
}

#[tokio::test]
async fn contact_returns_500_without_leaking_the_transport_error() {
    // arrange
    let app = spawn_app_with(RecordingTransport::failing(), false).await;

    // act
    let response = app.post_contact(&valid_body()).await;

    // assert
    assert_eq!(500, response.status().as_u16());
    let body = response.text().await.unwrap();
    assert!(!body.contains(TRANSPORT_FAILURE));
    assert!(!body.contains("535"));
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body, serde_json::json!({"error": "Failed to send email"}));
    assert_eq!(app.transport.attempts().len(), 1);
}

#[tokio::test]
async fn contact_is_not_deduplicated() {
    // arrange
    let app = spawn_app().await;

    // act
    let first = app.post_contact(&valid_body()).await;
    let second = app.post_contact(&valid_body()).await;

    // assert
    assert_eq!(200, first.status().as_u16());
    assert_eq!(200, second.status().as_u16());
    assert_eq!(app.transport.attempts().len(), 2);
}

#[tokio::test]
async fn contact_puts_the_submitter_in_reply_to_when_enabled() {
    // arrange
    let app = spawn_app_with(RecordingTransport::default(), true).await;

    // act
    app.post_contact(&valid_body()).await;

    // assert
    let attempts = app.transport.attempts();
    assert_eq!(
        attempts[0].reply_to.as_ref().map(|address| address.to_string()),
        Some("john@example.com".to_string())
    );
    assert_eq!(attempts[0].from.to_string(), "inquiries@example.com");
}

#[tokio::test]
async fn contact_with_undecodable_body_returns_generic_500() {
    // arrange
    let app = spawn_app().await;
    let test_cases = vec![
        ("{\"name\": ", "application/json", "truncated json"),
        (
            "{\"name\": 42, \"email\": \"john@example.com\", \"message\": \"Hello\"}",
            "application/json",
            "non-string field",
        ),
        ("name=John&email=john%40example.com", "application/x-www-form-urlencoded", "form encoding"),
    ];

    for (body, content_type, description) in test_cases {
        // act
        let response = app.post_contact_raw(body, content_type).await;

        // assert
        assert_eq!(
            500,
            response.status().as_u16(),
            "API did not fail with 500 for {}",
            description
        );
        let body: ErrorBody = response.json().await.unwrap();
        assert_eq!(body.error, "Failed to send email");
    }
    assert!(app.transport.attempts().is_empty());
}

#[tokio::test]
async fn contact_rejects_other_methods_with_405() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app.get("/api/contact").await;

    // assert
    assert_eq!(405, response.status().as_u16());
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Method not allowed");
}
