//! Host-framework plugin surface — registers the bridge under its
//! platform name and dispatches incoming events to the handlers.

use std::sync::Arc;

use beacon_core::events::BeaconEvent;

use crate::bridge::AnalyticsBridge;
use crate::command::HitCallback;

/// Platform name the host framework registers the plugin under.
pub const PLUGIN_NAME: &str = "ga";

/// The bridge packaged for the host framework's plugin registry.
#[derive(Clone)]
pub struct BridgePlugin {
    bridge: Arc<AnalyticsBridge>,
}

impl BridgePlugin {
    pub fn new(bridge: Arc<AnalyticsBridge>) -> Self {
        Self { bridge }
    }

    /// Platform identifier.
    pub fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    pub fn bridge(&self) -> &AnalyticsBridge {
        &self.bridge
    }

    /// Dispatch one framework event to its handler.
    pub fn handle(&self, event: BeaconEvent, hook: Option<HitCallback>) {
        match event {
            BeaconEvent::PageView(payload) => self.bridge.pageview(payload, hook),
            BeaconEvent::Click(payload) => self.bridge.click(payload, hook),
            BeaconEvent::Command(payload) => self.bridge.command(payload, hook),
        }
    }

    /// Dispatch a sequence of events with no completion hooks.
    pub fn handle_all(&self, events: impl IntoIterator<Item = BeaconEvent>) {
        for event in events {
            self.handle(event, None);
        }
    }
}
