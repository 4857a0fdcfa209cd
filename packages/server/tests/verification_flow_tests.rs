//! End-to-end tests for the number-verification flow over the HTTP surface.
//!
//! The router is wired with a mock provider, so everything runs in-process
//! with no network access.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use server_core::kernel::MockNumberVerify;
use server_core::server::build_app;
use tower::ServiceExt;

fn app_with(mock: MockNumberVerify) -> (Router, Arc<MockNumberVerify>) {
    let mock = Arc::new(mock);
    (build_app(mock.clone()), mock)
}

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn full_flow_delivers_session_exactly_once() {
    let (app, mock) = app_with(MockNumberVerify::new());

    // Start the flow
    let response = get(&app, "/api/getAuthUrl?phoneNumber=%2B15551234567").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let auth_url = body["authUrl"].as_str().unwrap().to_string();
    assert!(auth_url.contains("oidc.glide.test"));

    // The state token was handed to the provider
    let calls = mock.auth_url_calls();
    assert_eq!(calls.len(), 1);
    let (token, phone) = calls[0].clone();
    assert_eq!(phone, "+15551234567");

    // Carrier redirects back; the landing page is served directly
    let response = get(&app, &format!("/callback?code=auth-code-123&state={}", token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert!(body_text(response).await.contains("Number Verification Demo"));

    // First poll gets the completed session
    let response = get(&app, "/api/getSessionData").await;
    assert_eq!(response.status(), StatusCode::OK);
    let session = body_json(response).await;
    assert_eq!(session["phoneNumber"], "+15551234567");
    assert_eq!(session["authUrl"], auth_url.as_str());
    assert_eq!(session["code"], "auth-code-123");
    assert!(session.get("error").is_none());

    // Second poll is empty: delivery is one-shot
    let response = get(&app, "/api/getSessionData").await;
    assert_eq!(body_json(response).await, serde_json::json!({}));
}

#[tokio::test]
async fn get_auth_url_requires_phone_number() {
    let (app, mock) = app_with(MockNumberVerify::new());

    let response = get(&app, "/api/getAuthUrl").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "phoneNumber is required");

    let response = get(&app, "/api/getAuthUrl?phoneNumber=").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The provider was never consulted
    assert!(mock.auth_url_calls().is_empty());
}

#[tokio::test]
async fn get_auth_url_passes_provider_failure_through() {
    let (app, _mock) = app_with(MockNumberVerify::new().with_auth_url_failure("carrier link down"));

    let response = get(&app, "/api/getAuthUrl?phoneNumber=%2B15551234567").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "carrier link down");

    // No session was stored, so nothing can ever be delivered
    let response = get(&app, "/api/getSessionData").await;
    assert_eq!(body_json(response).await, serde_json::json!({}));
}

#[tokio::test]
async fn callback_without_state_redirects_home() {
    let (app, _mock) = app_with(MockNumberVerify::new());

    let response = get(&app, "/callback?code=abc").await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/");

    let response = get(&app, "/api/getSessionData").await;
    assert_eq!(body_json(response).await, serde_json::json!({}));
}

#[tokio::test]
async fn callback_with_unknown_state_is_never_delivered() {
    let (app, _mock) = app_with(MockNumberVerify::new());

    let response = get(&app, "/callback?code=abc&state=never-issued").await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/");

    // The marker record stays in the store; the polling client sees nothing
    let response = get(&app, "/api/getSessionData").await;
    assert_eq!(body_json(response).await, serde_json::json!({}));
}

#[tokio::test]
async fn callback_error_records_description_instead_of_code() {
    let (app, mock) = app_with(MockNumberVerify::new());

    get(&app, "/api/getAuthUrl?phoneNumber=%2B15551234567").await;
    let (token, _) = mock.auth_url_calls()[0].clone();

    let response = get(
        &app,
        &format!(
            "/callback?state={}&error=access_denied&error_description=User%20cancelled",
            token
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(&app, "/api/getSessionData").await;
    let session = body_json(response).await;
    assert_eq!(session["error"], "User cancelled");
    assert_eq!(session["phoneNumber"], "+15551234567");
    assert!(session.get("code").is_none());
}

#[tokio::test]
async fn drain_clears_unrelated_pending_sessions() {
    let (app, mock) = app_with(MockNumberVerify::new());

    // Two flows in flight
    get(&app, "/api/getAuthUrl?phoneNumber=%2B15551111111").await;
    get(&app, "/api/getAuthUrl?phoneNumber=%2B15552222222").await;
    let calls = mock.auth_url_calls();
    let (token_a, _) = calls[0].clone();
    let (token_b, _) = calls[1].clone();

    // First flow completes and is drained
    get(&app, &format!("/callback?code=code-a&state={}", token_a)).await;
    let response = get(&app, "/api/getSessionData").await;
    assert_eq!(body_json(response).await["phoneNumber"], "+15551111111");

    // The drain dropped the second flow's pending session too: its callback
    // now looks like an unknown state and redirects home
    let response = get(&app, &format!("/callback?code=code-b&state={}", token_b)).await;
    assert!(response.status().is_redirection());

    let response = get(&app, "/api/getSessionData").await;
    assert_eq!(body_json(response).await, serde_json::json!({}));
}

#[tokio::test]
async fn verify_number_requires_both_fields() {
    let (app, mock) = app_with(MockNumberVerify::new());

    let response = post_json(&app, "/api/verifyNumber", serde_json::json!({"code": "abc"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "code and phoneNumber are required");

    let response = post_json(&app, "/api/verifyNumber", serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(mock.exchange_calls().is_empty());
}

#[tokio::test]
async fn verify_number_rejects_non_json_body() {
    let (app, _mock) = app_with(MockNumberVerify::new());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/verifyNumber")
                .header(header::CONTENT_TYPE, "text/plain")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid request");
}

#[tokio::test]
async fn verify_number_returns_operator_and_result() {
    let (app, mock) = app_with(
        MockNumberVerify::new()
            .with_operator("Verizon")
            .with_verified(true),
    );

    let response = post_json(
        &app,
        "/api/verifyNumber",
        serde_json::json!({"code": "auth-code-123", "phoneNumber": "+15551234567"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(
        body,
        serde_json::json!({
            "operator": "Verizon",
            "verifyRes": { "devicePhoneNumberVerified": true }
        })
    );

    // The exchange got the submitted code and number, and the verification
    // call carried the fixed correlation label
    let exchanges = mock.exchange_calls();
    assert_eq!(exchanges.len(), 1);
    assert_eq!(exchanges[0].code, "auth-code-123");
    assert_eq!(exchanges[0].phone_number, "+15551234567");
    assert_eq!(mock.verify_session_ids(), vec!["session77".to_string()]);
}

#[tokio::test]
async fn verify_number_passes_exchange_failure_through() {
    let (app, _mock) =
        app_with(MockNumberVerify::new().with_exchange_failure("token exchange rejected"));

    let response = post_json(
        &app,
        "/api/verifyNumber",
        serde_json::json!({"code": "bad-code", "phoneNumber": "+15551234567"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "token exchange rejected");
}

#[tokio::test]
async fn verify_number_passes_verification_failure_through() {
    let (app, _mock) =
        app_with(MockNumberVerify::new().with_verify_failure("verification unavailable"));

    let response = post_json(
        &app,
        "/api/verifyNumber",
        serde_json::json!({"code": "auth-code-123", "phoneNumber": "+15551234567"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "verification unavailable");
}

#[tokio::test]
async fn index_page_is_served_and_unknown_assets_404() {
    let (app, _mock) = app_with(MockNumberVerify::new());

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Number Verification Demo"));

    let response = get(&app, "/no-such-file.js").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
