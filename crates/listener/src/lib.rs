//! benchbot trigger event source infrastructure.
//!
//! Receives GitHub webhook deliveries over HTTP with `axum`, validates the
//! HMAC-SHA256 signature of every request, decodes the payload into a
//! [`pipeline::WebhookEvent`] according to its `X-GitHub-Event` kind, and hands
//! it to a [`pipeline::DeliveryHandler`].
//!
//! ## Response codes
//!
//! | Condition | Status |
//! |-----------|--------|
//! | Delivery accepted (dispatched, ignored, undecodable, or failed while dispatching) | `200` |
//! | Missing `X-GitHub-Event` header | `400` |
//! | Missing or invalid `X-Hub-Signature-256` | `401` |
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Transport details live here. The [`pipeline`] crate sees
//! only [`pipeline::DeliveryHandler`] and [`pipeline::WebhookEvent`].

mod server;
mod signature;

pub use server::{
    router, serve, ListenerError, ListenerState, DELIVERY_HEADER, EVENT_HEADER, SIGNATURE_HEADER,
};
pub use signature::{SignatureError, WebhookSecret};
