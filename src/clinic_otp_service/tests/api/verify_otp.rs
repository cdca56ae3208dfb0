use serde_json::{Value, json};

use crate::helpers::{TestApp, wrong_code};

#[tokio::test]
async fn verify_otp_accepts_the_delivered_code() {
    let app = TestApp::new().await;
    app.mock_email_provider(201).await;
    let code = app.issue_code("a@b.com").await;

    let response = app
        .post_verify_otp(&json!({ "email": "a@b.com", "otp": code }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["verified"], true);
    assert_eq!(body["message"], "Email verified successfully");

    assert!(app.records_for("a@b.com").await[0].verified);
}

#[tokio::test]
async fn verify_otp_twice_reports_no_valid_code() {
    let app = TestApp::new().await;
    app.mock_email_provider(201).await;
    let code = app.issue_code("a@b.com").await;

    app.post_verify_otp(&json!({ "email": "a@b.com", "otp": code }))
        .await;
    let response = app
        .post_verify_otp(&json!({ "email": "a@b.com", "otp": code }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No valid OTP found. Please request a new one.");
    assert_eq!(body["verified"], false);
}

#[tokio::test]
async fn verify_otp_wrong_code_counts_an_attempt() {
    let app = TestApp::new().await;
    app.mock_email_provider(201).await;
    let code = app.issue_code("a@b.com").await;

    let response = app
        .post_verify_otp(&json!({ "email": "a@b.com", "otp": wrong_code(&code) }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid OTP code");
    assert_eq!(body["verified"], false);

    let record = &app.records_for("a@b.com").await[0];
    assert_eq!(record.attempts, 1);
    assert!(!record.verified);
}

#[tokio::test]
async fn verify_otp_locks_after_five_failures() {
    let app = TestApp::new().await;
    app.mock_email_provider(201).await;
    let code = app.issue_code("a@b.com").await;

    for _ in 0..5 {
        let response = app
            .post_verify_otp(&json!({ "email": "a@b.com", "otp": wrong_code(&code) }))
            .await;
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Invalid OTP code");
    }

    let response = app
        .post_verify_otp(&json!({ "email": "a@b.com", "otp": code }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        "Too many failed attempts. Please request a new OTP."
    );
    assert_eq!(app.records_for("a@b.com").await[0].attempts, 5);
}

#[tokio::test]
async fn verify_otp_for_unknown_email_reports_no_valid_code() {
    let app = TestApp::new().await;

    let response = app
        .post_verify_otp(&json!({ "email": "nobody@b.com", "otp": "123456" }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No valid OTP found. Please request a new one.");
}

#[tokio::test]
async fn verify_otp_accepts_newer_code_over_older_one() {
    let app = TestApp::new().await;
    app.mock_email_provider(201).await;
    app.issue_code("a@b.com").await;
    let newer = app.issue_code("a@b.com").await;

    let response = app
        .post_verify_otp(&json!({ "email": "a@b.com", "otp": newer }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let records = app.records_for("a@b.com").await;
    assert!(!records[0].verified);
    assert!(records[1].verified);
}

#[tokio::test]
async fn verify_otp_returns_400_for_missing_fields() {
    let app = TestApp::new().await;

    let test_cases = [
        (json!({ "otp": "123456" }), "Email is required"),
        (json!({ "email": "a@b.com" }), "OTP code is required"),
        (json!({ "email": "a@b.com", "otp": "" }), "OTP code is required"),
        (json!({}), "Email is required"),
    ];

    for (body, expected) in test_cases {
        let response = app.post_verify_otp(&body).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "The API did not fail with 400 for payload {body}"
        );
        let error: Value = response.json().await.unwrap();
        assert_eq!(error["error"], expected);
        assert_eq!(error["verified"], false);
    }
}
