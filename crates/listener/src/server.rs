//! The webhook HTTP endpoint.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Router,
};
use pipeline::{DeliveryHandler, DeliveryOutcome, WebhookEvent};
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

use crate::WebhookSecret;

pub const EVENT_HEADER: &str = "x-github-event";
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";
pub const DELIVERY_HEADER: &str = "x-github-delivery";

/// Shared, read-only state for all requests.
pub struct ListenerState {
    secret: WebhookSecret,
    handler: Arc<dyn DeliveryHandler>,
}

impl ListenerState {
    pub fn new(secret: WebhookSecret, handler: Arc<dyn DeliveryHandler>) -> Self {
        Self { secret, handler }
    }
}

#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Builds the webhook router.
///
/// | Route | Purpose |
/// |-------|---------|
/// | `POST /`, `POST /webhook` | GitHub webhook deliveries |
/// | `GET /health` | Liveness probe |
pub fn router(state: Arc<ListenerState>) -> Router {
    Router::new()
        .route("/", post(receive))
        .route("/webhook", post(receive))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the router on `addr` until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: Arc<ListenerState>) -> Result<(), ListenerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ListenerError::Bind { addr, source })?;

    tracing::info!(%addr, "Listening for webhook deliveries");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ListenerError::Serve)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn health() -> &'static str {
    "ok"
}

fn header<'h>(headers: &'h HeaderMap, name: &str) -> Option<&'h str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// Verifies, decodes and handles one delivery.
///
/// Every delivery that passes verification is answered with `200 OK`,
/// including undecodable payloads, ignored events and failed dispatches, so
/// GitHub does not redeliver it.
async fn receive(
    State(state): State<Arc<ListenerState>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let Some(kind) = header(&headers, EVENT_HEADER).map(str::to_owned) else {
        tracing::warn!("Rejecting request without an event kind header");
        return StatusCode::BAD_REQUEST;
    };

    if let Err(err) = state.secret.verify(&body, header(&headers, SIGNATURE_HEADER)) {
        tracing::warn!(kind = %kind, error = %err, "Rejecting delivery with invalid signature");
        return StatusCode::UNAUTHORIZED;
    }

    let delivery_id = header(&headers, DELIVERY_HEADER)
        .map(str::to_owned)
        .unwrap_or_else(|| format!("local-{}", Uuid::new_v4()));
    let span = tracing::info_span!("delivery", delivery_id = %delivery_id, kind = %kind);

    async move {
        let event = match WebhookEvent::from_payload(&kind, &body) {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(error = %err, "Ignoring undecodable payload");
                return StatusCode::OK;
            }
        };

        match state.handler.handle(event).await {
            Ok(DeliveryOutcome::Dispatched(job)) => {
                tracing::info!(
                    repository = %job.report_to.repository,
                    issue = %job.report_to.issue,
                    "Benchmark dispatched"
                );
            }
            Ok(DeliveryOutcome::Ignored(reason)) => {
                tracing::debug!(?reason, "Delivery ignored");
            }
            Err(err) => {
                tracing::error!(error = %err, "Delivery failed");
            }
        }
        StatusCode::OK
    }
    .instrument(span)
    .await
}
