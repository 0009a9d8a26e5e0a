//! The analytics bridge — translates instrumentation events into
//! positional analytics calls addressed to the configured tracker.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use beacon_core::config::BridgeConfig;
use beacon_core::error::BridgeResult;
use beacon_core::events::{ClickPayload, CommandPayload, PageViewPayload};
use beacon_core::tracker::{TrackerRef, TrackerSettings};

use crate::client::GaClient;
use crate::command::{GaCommand, GaFields, HitCallback};
use crate::plugin::BridgePlugin;
use crate::registry::TrackerRegistry;

/// Adapts instrumentation framework events into analytics API calls.
///
/// Construction issues the `create` call for the configured tracker;
/// afterwards each handler is a stateless translation with a single
/// outbound call, apart from the append-only tracker registry.
pub struct AnalyticsBridge {
    settings: TrackerSettings,
    client: Arc<dyn GaClient>,
    registry: TrackerRegistry,
    log_hits: bool,
}

impl AnalyticsBridge {
    /// Create a bridge and immediately issue the `create` call.
    ///
    /// Accepts a bare tracking id or full [`TrackerSettings`]. A missing
    /// tracking id is forwarded as-is; see [`AnalyticsBridge::validate`].
    pub fn new(settings: impl Into<TrackerSettings>, client: Arc<dyn GaClient>) -> Self {
        let settings = settings.into();

        let mut fields = GaFields::new();
        fields.set("trackingId", settings.tracking_id.clone());
        fields.set("cookieDomain", settings.cookie_domain.clone());
        fields.set_opt("name", settings.name.clone());
        fields.set_opt("userId", settings.user_id.clone());
        client.call(GaCommand {
            selector: "create".into(),
            args: Vec::new(),
            fields: Some(fields),
        });

        let registry = TrackerRegistry::new();
        registry.register_created(&settings.tracker_ref());

        info!(
            tracking_id = %settings.tracking_id,
            tracker = settings.name.as_deref().unwrap_or("default"),
            "analytics tracker created"
        );

        Self {
            settings,
            client,
            registry,
            log_hits: true,
        }
    }

    /// Build a bridge from the environment-driven configuration.
    pub fn from_config(config: &BridgeConfig, client: Arc<dyn GaClient>) -> Self {
        let mut bridge = Self::new(config.tracker.to_settings(), client);
        bridge.log_hits = config.log_hits;
        bridge
    }

    /// Package the bridge for the host framework's plugin registry.
    pub fn into_plugin(self) -> BridgePlugin {
        BridgePlugin::new(Arc::new(self))
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    /// Validate the configured tracker settings. Construction never
    /// fails; this is the opt-in fail-fast path.
    pub fn validate(&self) -> BridgeResult<()> {
        self.settings.validate()
    }

    /// Send a `pageview` hit. The completion hook rides the fields
    /// object and fires when the client completes the hit.
    pub fn pageview(&self, payload: PageViewPayload, hook: Option<HitCallback>) {
        let tracker = TrackerRef::from_payload(payload.tracker.as_deref());
        self.note_tracker(&tracker);

        let mut fields = GaFields::new();
        fields.set("location", payload.location);
        fields.set_opt("page", payload.url);
        fields.set_opt("title", payload.title);
        let fields = fields.with_hit_callback(hook);

        self.dispatch(
            &tracker,
            GaCommand {
                selector: tracker.qualify("send"),
                args: vec![Value::from("pageview")],
                fields: Some(fields),
            },
        );
    }

    /// Send an `event` hit built from the instrumentation node attached
    /// to the clicked component: (category, action, label, value)
    /// positional in that order, absent attributes passed as null.
    pub fn click(&self, payload: ClickPayload, hook: Option<HitCallback>) {
        let node = payload.node;
        let tracker_name = node.tracker();
        let tracker = TrackerRef::from_payload(tracker_name.as_deref());
        self.note_tracker(&tracker);

        let args = vec![
            Value::from("event"),
            opt_value(node.category()),
            opt_value(node.action()),
            opt_value(node.label()),
            opt_value(node.value()),
        ];

        self.dispatch(
            &tracker,
            GaCommand {
                selector: tracker.qualify("send"),
                args,
                fields: Some(GaFields::new().with_hit_callback(hook)),
            },
        );
    }

    /// Forward an arbitrary analytics command verbatim. This call shape
    /// has no native completion hook, so the bridge invokes the hook
    /// itself once the call has been issued.
    pub fn command(&self, payload: CommandPayload, hook: Option<HitCallback>) {
        let tracker = TrackerRef::from_payload(payload.tracker.as_deref());
        self.note_tracker(&tracker);

        self.dispatch(
            &tracker,
            GaCommand {
                selector: tracker.qualify(&payload.command_name),
                args: payload.arguments,
                fields: None,
            },
        );

        if let Some(hook) = hook {
            hook();
        }
    }

    fn note_tracker(&self, tracker: &TrackerRef) {
        if self.registry.observe(tracker) {
            warn!(
                tracker = tracker.registry_key(),
                "event referenced a tracker this bridge never created; forwarding unchanged"
            );
        }
    }

    fn dispatch(&self, tracker: &TrackerRef, command: GaCommand) {
        if self.log_hits {
            debug!(
                hit_id = %Uuid::new_v4(),
                selector = %command.selector,
                initialized = self.registry.is_initialized(tracker),
                "dispatching analytics call"
            );
        }
        self.client.call(command);
    }
}

fn opt_value<T: Into<Value>>(value: Option<T>) -> Value {
    value.map(Into::into).unwrap_or(Value::Null)
}
