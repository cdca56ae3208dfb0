use serde_json::{Value, json};

use crate::helpers::TestApp;

#[tokio::test]
async fn send_otp_returns_200_and_delivers_code() {
    let app = TestApp::new().await;
    app.mock_email_provider(201).await;

    let response = app
        .post_send_otp(&json!({ "email": "a@b.com", "firstName": "Amina" }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "OTP sent successfully");

    let records = app.records_for("a@b.com").await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].attempts, 0);
    assert!(!records[0].verified);

    let email = app.last_delivered_email().await;
    assert_eq!(email["to"][0]["email"], "a@b.com");
    assert_eq!(email["to"][0]["name"], "Amina");
    assert_eq!(email["subject"], "Your Verification Code");
    assert_eq!(
        app.last_delivered_code().await,
        records[0].otp_code.as_str()
    );
}

#[tokio::test]
async fn send_otp_never_returns_the_code() {
    let app = TestApp::new().await;
    app.mock_email_provider(201).await;

    let response = app.post_send_otp(&json!({ "email": "a@b.com" })).await;
    let body = response.text().await.unwrap();

    let code = app.last_delivered_code().await;
    assert!(!body.contains(&code));
}

#[tokio::test]
async fn send_otp_falls_back_to_generic_name() {
    let app = TestApp::new().await;
    app.mock_email_provider(201).await;

    app.post_send_otp(&json!({ "email": "a@b.com" })).await;

    let email = app.last_delivered_email().await;
    assert_eq!(email["to"][0]["name"], "User");
}

#[tokio::test]
async fn send_otp_returns_400_for_missing_or_blank_email() {
    let app = TestApp::new().await;
    app.mock_email_provider(201).await;

    let test_cases = [
        (json!({}), "Email is required"),
        (json!({ "email": "" }), "Email is required"),
        (json!({ "email": null, "firstName": "Amina" }), "Email is required"),
        (json!({ "email": "not-an-email" }), "Invalid email address"),
    ];

    for (body, expected) in test_cases {
        let response = app.post_send_otp(&body).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "The API did not fail with 400 for payload {body}"
        );
        let error: Value = response.json().await.unwrap();
        assert_eq!(error["error"], expected);
    }

    assert!(app.email_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn send_otp_returns_400_for_malformed_json() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .post(format!("{}/send-otp", app.address))
        .header("Content-Type", "application/json")
        .body("{\"email\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let error: Value = response.json().await.unwrap();
    assert!(error["error"].is_string());
}

#[tokio::test]
async fn send_otp_returns_400_when_delivery_fails_but_keeps_record() {
    let app = TestApp::new().await;
    app.mock_email_provider(500).await;

    let response = app.post_send_otp(&json!({ "email": "a@b.com" })).await;

    assert_eq!(response.status().as_u16(), 400);
    let error: Value = response.json().await.unwrap();
    assert_eq!(error["error"], "Failed to send verification email");
    assert_eq!(app.records_for("a@b.com").await.len(), 1);
}

#[tokio::test]
async fn send_otp_creates_a_record_per_request() {
    let app = TestApp::new().await;
    app.mock_email_provider(201).await;

    for _ in 0..2 {
        let response = app.post_send_otp(&json!({ "email": "a@b.com" })).await;
        assert_eq!(response.status().as_u16(), 200);
    }

    assert_eq!(app.records_for("a@b.com").await.len(), 2);
}

#[tokio::test]
async fn send_otp_rejects_other_methods() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .get(format!("{}/send-otp", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 405);
}
