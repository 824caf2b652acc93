//! Seeded in-process admin API.
//!
//! Speaks the same envelope as the production backend and records every
//! request it receives, so it serves both as a local playground for the
//! terminal browser and as the HTTP fixture for integration tests.
//!
//! Routes (below `/api/v1`):
//! - `GET|POST /:resource`
//! - `GET|PUT|DELETE /:resource/:id`
//! - `POST /location-services/:id/services`
//! - `PUT|DELETE /location-services/:id/services/:service_id`
//! - `GET|PUT /cms/about`

pub mod error;
mod handlers;
pub mod seed;
pub mod store;

pub use error::{DemoError, DemoResult};
pub use store::{DemoStore, ListParams};

use crate::core::{ConsoleError, Result};
use axum::Router;
use axum::extract::{Query, Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub const API_PREFIX: &str = "/api/v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone, Default)]
pub struct DemoState {
    store: Arc<Mutex<DemoStore>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl DemoState {
    pub fn new(store: DemoStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            requests: Arc::default(),
        }
    }

    pub fn seeded() -> Result<Self> {
        let mut store = DemoStore::new();
        seed::seed(&mut store)?;
        Ok(Self::new(store))
    }

    pub fn store(&self) -> DemoResult<MutexGuard<'_, DemoStore>> {
        Ok(self.store.lock().map_err(ConsoleError::from)?)
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn clear_requests(&self) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.clear();
        }
    }

    pub fn reject_delete(&self, id: &str, message: &str) -> DemoResult<()> {
        self.store()?.reject_delete(id, message);
        Ok(())
    }

    fn record(&self, request: RecordedRequest) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
    }
}

async fn record_request(State(state): State<DemoState>, request: Request, next: Next) -> Response {
    let query = Query::<Vec<(String, String)>>::try_from_uri(request.uri())
        .map(|Query(pairs)| pairs)
        .unwrap_or_default();
    state.record(RecordedRequest {
        method: request.method().to_string(),
        path: request.uri().path().to_string(),
        query,
    });
    next.run(request).await
}

pub fn build_router(state: DemoState) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::healthcheck))
        .route(
            "/cms/about",
            get(handlers::get_about).put(handlers::update_about),
        )
        .route(
            "/:resource",
            get(handlers::list_records).post(handlers::create_record),
        )
        .route(
            "/:resource/:id",
            get(handlers::get_record)
                .put(handlers::update_record)
                .delete(handlers::delete_record),
        )
        .route(
            "/:resource/:id/services",
            axum::routing::post(handlers::create_service),
        )
        .route(
            "/:resource/:id/services/:service_id",
            axum::routing::put(handlers::update_service).delete(handlers::delete_service),
        );

    Router::new()
        .nest(API_PREFIX, api)
        .layer(middleware::from_fn_with_state(state.clone(), record_request))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind on `addr` and serve in a background task. Returns the bound address.
pub async fn spawn(
    addr: SocketAddr,
    state: DemoState,
) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    let app = build_router(state);
    info!(%local, "demo api listening");

    let handle = tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            error!(error = %err, "demo api stopped");
        }
    });
    Ok((local, handle))
}

/// Base URL of a demo server bound on `addr`.
pub fn base_url(addr: SocketAddr) -> String {
    format!("http://{addr}{API_PREFIX}")
}
