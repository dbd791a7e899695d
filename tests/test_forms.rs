mod common;

use serde_json::{json, Value};
use tavola::store::Collection;

#[tokio::test]
async fn contact_submission_is_stored_with_normalized_email() {
    let env = common::TestEnv::start();
    let server = env.server();

    let response = server
        .post("/api/contact")
        .json(&json!({
            "name": " Ada ",
            "email": "  Ada@Example.COM ",
            "message": "Which night market was your favourite?"
        }))
        .await;

    response.assert_json(&json!({ "success": true }));
    let stored = env.stored(Collection::ContactSubmissions);
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["title"], "Contact from Ada");
    assert_eq!(stored[0]["metadata"]["email"], "ada@example.com");
}

#[tokio::test]
async fn contact_with_missing_fields_is_rejected() {
    let env = common::TestEnv::start();
    let server = env.server_permissive();

    let response = server
        .post("/api/contact")
        .json(&json!({ "email": "ada@example.com" }))
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({
        "success": false,
        "error": "Name and message are required."
    }));
    assert!(env.stored(Collection::ContactSubmissions).is_empty());
}

#[tokio::test]
async fn contact_with_invalid_email_is_rejected() {
    let env = common::TestEnv::start();
    let server = env.server_permissive();

    let response = server
        .post("/api/contact")
        .json(&json!({ "name": "Ada", "email": "ada@localhost", "message": "hi" }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "Please enter a valid email address.");
}

#[tokio::test]
async fn newsletter_rejects_the_same_address_twice() {
    let env = common::TestEnv::start();
    let server = env.server_permissive();

    server
        .post("/api/newsletter")
        .json(&json!({ "name": "Mia", "email": "mia@example.com" }))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/newsletter")
        .json(&json!({ "name": "Mia", "email": " MIA@example.com" }))
        .await;

    response.assert_status(axum::http::StatusCode::CONFLICT);
    response.assert_json(&json!({
        "success": false,
        "error": "This email is already subscribed to our newsletter."
    }));
    assert_eq!(env.stored(Collection::NewsletterSubscribers).len(), 1);
}

#[tokio::test]
async fn newsletter_requires_name_and_email() {
    let env = common::TestEnv::start();
    let server = env.server_permissive();

    let response = server.post("/api/newsletter").json(&json!({})).await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "Name and email are required.");
}

#[tokio::test]
async fn malformed_contact_body_gets_a_json_error() {
    let env = common::TestEnv::start();
    let server = env.server_permissive();

    let response = server
        .post("/api/contact")
        .text("name=Ada&email=ada@example.com")
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({ "success": false, "error": "Invalid request body." }));
    assert!(env.stored(Collection::ContactSubmissions).is_empty());
}

#[tokio::test]
async fn null_newsletter_email_is_reported_as_missing() {
    let env = common::TestEnv::start();
    let server = env.server_permissive();

    let response = server
        .post("/api/newsletter")
        .json(&json!({ "name": "Mia", "email": null }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["error"], "Email is required.");
}
