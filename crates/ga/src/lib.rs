//! Analytics bridge — adapts instrumentation framework lifecycle events
//! (page views, clicks, generic commands) into positional calls against
//! a web-analytics collection API.
//!
//! # Modules
//!
//! - [`command`] — Outbound call model: selector, positional args, trailing fields object
//! - [`client`] — Injected analytics entry point, plus no-op and capture doubles
//! - [`bridge`] — Tracker creation and the three event handlers
//! - [`plugin`] — Host-framework plugin surface with exhaustive dispatch

pub mod bridge;
pub mod client;
pub mod command;
pub mod plugin;

mod registry;

pub use bridge::AnalyticsBridge;
pub use client::{
    capture_client, completing_client, noop_client, CaptureClient, CapturedCall, GaClient,
    NoOpClient,
};
pub use command::{GaCommand, GaFields, HitCallback, HIT_CALLBACK_KEY};
pub use plugin::{BridgePlugin, PLUGIN_NAME};
