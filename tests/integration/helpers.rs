//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use leasehub_core::config::AppConfig;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    /// Holds the data directory alive for the test's duration
    pub data_dir: TempDir,
}

/// Status and parsed JSON body of a test response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// Create a new test application with an empty data directory and
    /// zero-latency mock providers.
    pub async fn new() -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.notifications.data_dir = data_dir.path().to_string_lossy().into_owned();
        config.notifications.email.simulated_latency_ms = 0;
        config.notifications.sms.simulated_latency_ms = 0;
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let state = leasehub_api::build_state(config.clone())
            .await
            .expect("Failed to build state");
        let router = leasehub_api::build_app(state);

        Self {
            router,
            config,
            data_dir,
        }
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&json).expect("serialize body"))
            }
            None => Body::empty(),
        };

        let request = builder.body(body).expect("Failed to build request");
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Register a user and return the issued token
    pub async fn register_user(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/register",
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                    "firstName": "Test",
                    "lastName": "User",
                })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "register: {}", response.body);
        response.body["data"]["token"]
            .as_str()
            .expect("token in response")
            .to_string()
    }
}
