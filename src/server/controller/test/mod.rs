use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::server::{router, service::auth::token::TokenService, state::AppState};


fn app(db: &DatabaseConnection) -> Router {
    let tokens = TokenService::new(
        b"controller-test-secret",
        Duration::seconds(300),
        Duration::seconds(86_400),
    );

    router::router().with_state(AppState::new(db.clone(), tokens))
}

/// Sends one request through the router and decodes the JSON response body.
///
/// Empty bodies decode as `Value::Null`.
async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

/// Registers an account and returns its access token and user ID.
async fn sign_up(app: &Router, email: &str, display_name: &str) -> (String, String) {
    let password = "Quiet-Lantern-77";
    let (status, body) = send(
        app,
        Method::POST,
        "/api/register",
        None,
        Some(json!({
            "email": email,
            "password": password,
            "password_confirm": password,
            "display_name": display_name,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let user_id = body["user"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        app,
        Method::POST,
        "/api/token",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);

    (body["access"].as_str().unwrap().to_string(), user_id)
}
