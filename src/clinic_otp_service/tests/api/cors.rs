use crate::helpers::TestApp;

#[tokio::test]
async fn preflight_is_answered_permissively() {
    let app = TestApp::new().await;

    for route in ["send-otp", "verify-otp"] {
        let response = app
            .http_client
            .request(
                reqwest::Method::OPTIONS,
                format!("{}/{}", app.address, route),
            )
            .header("Origin", "https://admin.example-clinic.com")
            .header("Access-Control-Request-Method", "POST")
            .header(
                "Access-Control-Request-Headers",
                "authorization, x-client-info, apikey, content-type",
            )
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success());
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        let allowed_headers = headers["access-control-allow-headers"]
            .to_str()
            .unwrap()
            .to_lowercase();
        for header in ["authorization", "x-client-info", "apikey", "content-type"] {
            assert!(allowed_headers.contains(header), "{header} not allowed");
        }
    }
}

#[tokio::test]
async fn plain_options_request_is_accepted() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .request(reqwest::Method::OPTIONS, format!("{}/send-otp", app.address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn responses_carry_allow_origin_header() {
    let app = TestApp::new().await;

    let response = app
        .http_client
        .post(format!("{}/verify-otp", app.address))
        .header("Origin", "https://admin.example-clinic.com")
        .json(&serde_json::json!({ "email": "a@b.com", "otp": "123456" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
