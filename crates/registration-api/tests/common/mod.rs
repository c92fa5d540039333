//! Common test utilities for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use registration_api::{
    api::{create_router, AppState},
    Config,
};
use registration_notifier::{Delivery, DeliveryError, MailerConfig, Notifier, SmtpNotifier};
use registration_store::{Registration, Store};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;

/// Notifier that remembers every registration it was asked to deliver.
#[derive(Default)]
pub struct RecordingNotifier {
    delivered: Mutex<Vec<Registration>>,
}

impl RecordingNotifier {
    pub fn delivered(&self) -> Vec<Registration> {
        self.delivered.lock().unwrap().clone()
    }

    /// Wait until at least `count` deliveries happened, or give up after ~1s.
    pub async fn wait_for(&self, count: usize) -> Vec<Registration> {
        for _ in 0..100 {
            let delivered = self.delivered();
            if delivered.len() >= count {
                return delivered;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.delivered()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, registration: &Registration) -> Result<Delivery, DeliveryError> {
        self.delivered.lock().unwrap().push(registration.clone());
        Ok(Delivery::Sent)
    }
}

/// SMTP notifier with no credentials, so every delivery is skipped.
pub fn unconfigured_notifier() -> Arc<dyn Notifier> {
    Arc::new(SmtpNotifier::new(MailerConfig::default()))
}

/// SMTP notifier pointed at a closed local port, so every delivery fails.
pub fn unreachable_notifier() -> Arc<dyn Notifier> {
    let config: MailerConfig = serde_json::from_value(serde_json::json!({
        "smtp_host": "127.0.0.1",
        "smtp_port": 1,
        "smtp_user": "events@example.com",
        "smtp_pass": "secret",
        "notify_email": "ops@example.com",
        "timeout": "2s"
    }))
    .unwrap();
    Arc::new(SmtpNotifier::new(config))
}

/// Create a router with memory-only storage and default configuration.
pub fn test_app(notifier: Arc<dyn Notifier>) -> Router {
    test_app_with_config(notifier, &Config::default())
}

pub fn test_app_with_config(notifier: Arc<dyn Notifier>, config: &Config) -> Router {
    let state = AppState::new(Store::memory(), notifier);
    create_router(state, config)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Send a request and decode the JSON response body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

/// Submit a registration and return the response.
pub async fn register(
    app: &Router,
    full_name: &str,
    pass_type: &str,
) -> (StatusCode, serde_json::Value) {
    send(
        app,
        post_json(
            "/api/registrations",
            serde_json::json!({
                "full_name": full_name,
                "email": "someone@example.com",
                "pass_type": pass_type,
            }),
        ),
    )
    .await
}
