#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use person_service::config::{MongoConfig, ObservabilityConfig, PersonConfig};
use person_service::services::{InMemoryPersonStore, MongoDb, PersonRepository};
use person_service::startup::Application;
use person_service::{build_router, AppState};
use secrecy::Secret;
use serde_json::Value;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use tower::util::ServiceExt;
use uuid::Uuid;

/// A well-formed id that no test ever inserts.
pub const UNKNOWN_ID: &str = "507f1f77bcf86cd799439011";

/// Router backed by an in-memory store; no database required.
pub struct TestRouter {
    pub router: Router,
    pub store: Arc<InMemoryPersonStore>,
}

impl TestRouter {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryPersonStore::new());
        let state = AppState {
            repository: PersonRepository::new(store.clone()),
        };
        Self {
            router: build_router(state),
            store,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed to respond")
    }

    /// Sends a request with an optional JSON body; returns status and parsed JSON body.
    pub async fn json(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self.send(request).await;
        let status = response.status();
        (status, body_json(response).await)
    }

    pub async fn create(&self, name: &str, occupation: &str, address: &str) -> Value {
        let (status, body) = self
            .json(
                Method::POST,
                "/person",
                Some(serde_json::json!({
                    "name": name,
                    "occupation": occupation,
                    "address": address,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create failed: {body}");
        body
    }

    pub async fn list(&self) -> Vec<Value> {
        let (status, body) = self.json(Method::GET, "/person", None).await;
        assert_eq!(status, StatusCode::OK);
        body["persons"]
            .as_array()
            .cloned()
            .expect("persons should be an array")
    }
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).expect("Body was not JSON")
}

/// Full application against a real MongoDB on a random port.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: MongoDb,
    pub db_name: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let db_name = format!("person_test_{}", Uuid::new_v4());

        let config = PersonConfig {
            common: CoreConfig {
                port: 0, // Random port
                environment: "test".to_string(),
            },
            mongodb: MongoConfig {
                uri: Secret::new(
                    std::env::var("TEST_MONGODB_URI")
                        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
                ),
                database: db_name.clone(),
                collection: "group".to_string(),
            },
            observability: ObservabilityConfig {
                log_level: "error".to_string(),
                otlp_endpoint: None,
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);
        let db = app.db().clone();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
        }
    }

    /// Drops the throwaway database.
    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}
