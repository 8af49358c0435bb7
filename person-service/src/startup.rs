//! Application startup and lifecycle management.

use crate::config::{PersonConfig, SERVICE_NAME};
use crate::handlers;
use crate::services::{MongoDb, MongoPersonStore, PersonRepository};
use axum::{
    body::Body,
    http::Request,
    middleware::from_fn,
    routing::{get, patch},
    Router,
};
use secrecy::ExposeSecret;
use service_core::error::AppError;
use service_core::middleware::{make_request_span, metrics_middleware, request_id_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state. Cloned per request; the store handle behind
/// the repository is the only state shared between requests.
#[derive(Clone)]
pub struct AppState {
    pub repository: PersonRepository,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route(
            "/person",
            get(handlers::list_persons).post(handlers::create_person),
        )
        .route(
            "/persons/:person_id",
            patch(handlers::update_person).delete(handlers::delete_person),
        )
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| make_request_span(request)),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    state: AppState,
    db: MongoDb,
}

impl Application {
    /// Connects to MongoDB, verifies it answers, and binds the HTTP listener
    /// (port 0 picks a free port).
    pub async fn build(config: PersonConfig) -> Result<Self, AppError> {
        let db = MongoDb::connect(
            config.mongodb.uri.expose_secret(),
            &config.mongodb.database,
            SERVICE_NAME,
        )
        .await?;

        db.health_check().await.map_err(|e| {
            tracing::error!("MongoDB is not reachable: {}", e);
            AppError::from(e)
        })?;

        let store = MongoPersonStore::new(db.clone(), &config.mongodb.collection);
        let state = AppState {
            repository: PersonRepository::new(Arc::new(store)),
        };
        let router = build_router(state.clone());

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            database = %config.mongodb.database,
            collection = %config.mongodb.collection,
            "Person service listening"
        );

        Ok(Self {
            port,
            listener,
            router,
            state,
            db,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn db(&self) -> &MongoDb {
        &self.db
    }

    /// Serves until SIGINT/SIGTERM, drains in-flight requests, then closes
    /// the database client.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let result = axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        if let Err(e) = &result {
            tracing::error!("HTTP server error: {}", e);
        }

        self.state.repository.close().await;
        result
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
