use std::sync::atomic::Ordering;

use serde_json::json;

use crate::helpers::{FlakyRelay, spawn_app, spawn_app_with_relay, test_configuration};

fn valid_body() -> serde_json::Value {
    json!({
        "name": "Jo",
        "email": "jo@x.com",
        "message": "Hello there, need help"
    })
}

#[tokio::test]
async fn a_valid_submission_returns_200_and_sends_two_emails() {
    let app = spawn_app().await;

    let response = app.post_contact(&valid_body()).await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(
        body["message"],
        "Your message has been sent successfully! I will respond within 24 hours."
    );

    let delivered = app.mailbox.delivered();
    assert_eq!(delivered.len(), 2);
}

#[tokio::test]
async fn the_owner_notification_is_sent_first_with_reply_to_the_sender() {
    let app = spawn_app().await;
    let owner = test_configuration().mail.owner().unwrap();

    app.post_contact(&valid_body()).await;

    let delivered = app.mailbox.delivered();
    assert_eq!(delivered.len(), 2);

    assert_eq!(delivered[0].to, owner);
    assert_eq!(delivered[0].reply_to.as_ref().unwrap().as_ref(), "jo@x.com");
    assert!(delivered[0].html.contains("Hello there, need help"));

    assert_eq!(delivered[1].to.as_ref(), "jo@x.com");
    assert!(delivered[1].reply_to.is_none());
    assert!(delivered[1].html.contains("Hello there, need help"));
}

#[tokio::test]
async fn the_sender_address_is_normalized_before_use() {
    let app = spawn_app().await;
    let body = json!({
        "name": "Jo",
        "email": "  JO@X.COM ",
        "message": "Hello there, need help"
    });

    let response = app.post_contact(&body).await;

    assert_eq!(200, response.status().as_u16());
    let delivered = app.mailbox.delivered();
    assert_eq!(delivered[1].to.as_ref(), "jo@x.com");
}

#[tokio::test]
async fn a_boundary_length_message_is_accepted() {
    let app = spawn_app().await;
    let body = json!({
        "name": "Jo",
        "email": "jo@x.com",
        "message": "0123456789"
    });

    let response = app.post_contact(&body).await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(app.mailbox.delivered().len(), 2);
}

#[tokio::test]
async fn a_submission_with_a_subject_uses_it_in_the_owner_notification() {
    let app = spawn_app().await;
    let body = json!({
        "name": "Jo",
        "email": "jo@x.com",
        "subject": "Laptop repair",
        "message": "Hello there, need help"
    });

    app.post_contact(&body).await;

    let delivered = app.mailbox.delivered();
    assert_eq!(delivered[0].subject, "[DevTech Pro] Laptop repair");
}

#[tokio::test]
async fn invalid_submissions_return_422_and_send_nothing() {
    let app = spawn_app().await;

    let test_cases = vec![
        (
            json!({"name": "J", "email": "jo@x.com", "message": "Hello there, need help"}),
            "name",
            "a single-character name",
        ),
        (
            json!({"name": "a".repeat(101), "email": "jo@x.com", "message": "Hello there, need help"}),
            "name",
            "a 101-character name",
        ),
        (
            json!({"email": "jo@x.com", "message": "Hello there, need help"}),
            "name",
            "a missing name",
        ),
        (
            json!({"name": "Jo", "email": "not-an-email", "message": "Hello there, need help"}),
            "email",
            "a malformed email",
        ),
        (
            json!({"name": "Jo", "message": "Hello there, need help"}),
            "email",
            "a missing email",
        ),
        (
            json!({"name": "Jo", "email": "jo@x.com", "message": "short"}),
            "message",
            "a 5-character message",
        ),
        (
            json!({"name": "Jo", "email": "jo@x.com", "message": "a".repeat(2001)}),
            "message",
            "a 2001-character message",
        ),
        (
            json!({"name": "Jo", "email": "jo@x.com"}),
            "message",
            "a missing message",
        ),
        (
            json!({"name": "Jo", "email": "jo@x.com", "subject": "a".repeat(201), "message": "Hello there, need help"}),
            "subject",
            "a 201-character subject",
        ),
    ];

    for (body, expected_field, description) in test_cases {
        let response = app.post_contact(&body).await;

        assert_eq!(
            422,
            response.status().as_u16(),
            "The API did not reject {description} with 422 Unprocessable Entity."
        );

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Validation failed.");
        let fields: Vec<&str> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert!(
            fields.contains(&expected_field),
            "No `{expected_field}` error was reported for {description}, got {fields:?}."
        );
    }

    assert_eq!(app.mailbox.delivered().len(), 0);
}

#[tokio::test]
async fn multiple_invalid_fields_are_all_reported() {
    let app = spawn_app().await;
    let body = json!({
        "name": "Jo",
        "email": "not-an-email",
        "message": "short"
    });

    let response = app.post_contact(&body).await;

    assert_eq!(422, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"message"));
    assert_eq!(app.mailbox.delivered().len(), 0);
}

#[tokio::test]
async fn a_failed_owner_notification_returns_500_without_an_autoreply_attempt() {
    let (relay, attempts) = FlakyRelay::new(0);
    let address = spawn_app_with_relay(relay).await;

    let response = reqwest::Client::new()
        .post(format!("{address}/api/contact"))
        .json(&valid_body())
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    // Only the owner notification was attempted.
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn a_failed_autoreply_still_returns_500_after_notifying_the_owner() {
    let (relay, attempts) = FlakyRelay::new(1);
    let address = spawn_app_with_relay(relay).await;

    let response = reqwest::Client::new()
        .post(format!("{address}/api/contact"))
        .json(&valid_body())
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    // The owner send went through before the auto-reply failed.
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn a_malformed_json_body_returns_400_with_the_envelope() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .post(format!("{}/api/contact", app.address))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(app.mailbox.delivered().len(), 0);
}

#[tokio::test]
async fn unknown_routes_return_404_with_the_envelope() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .get(format!("{}/api/nope", app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(404, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Route not found.");
}
