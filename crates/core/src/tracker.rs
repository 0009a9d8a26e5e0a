//! Tracker identity — settings for the tracker configured at bridge
//! construction, and references to the tracker an event addresses.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{BridgeError, BridgeResult};

/// Cookie domain carried on every `create` call.
pub const COOKIE_DOMAIN_AUTO: &str = "auto";

/// Registry key for the unnamed tracker.
pub const DEFAULT_TRACKER_KEY: &str = "default";

/// Reference to a logical tracker destination within the analytics API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerRef {
    /// The unnamed/default tracker.
    Default,
    /// A named tracker.
    Named(String),
}

impl TrackerRef {
    /// Build a reference from the optional tracker name a payload carries.
    /// An empty name counts as absent.
    pub fn from_payload(name: Option<&str>) -> Self {
        match name {
            Some(n) if !n.is_empty() => Self::Named(n.to_string()),
            _ => Self::Default,
        }
    }

    /// Qualify an analytics command name with the tracker selector:
    /// `send` stays `send` for the default tracker and becomes
    /// `{name}.send` for a named one.
    pub fn qualify(&self, command: &str) -> String {
        match self {
            Self::Default => command.to_string(),
            Self::Named(name) => format!("{name}.{command}"),
        }
    }

    /// Key under which this tracker is recorded in the registry.
    pub fn registry_key(&self) -> &str {
        match self {
            Self::Default => DEFAULT_TRACKER_KEY,
            Self::Named(name) => name,
        }
    }
}

/// Immutable settings for the tracker configured at bridge construction.
///
/// Serialized field names match the wire names the analytics API expects
/// on `create` (`trackingId`, `cookieDomain`, `name`, `userId`); absent
/// optionals are omitted, which the API reads as "use the default tracker".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerSettings {
    pub tracking_id: String,
    #[serde(default = "default_cookie_domain")]
    pub cookie_domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

fn default_cookie_domain() -> String {
    COOKIE_DOMAIN_AUTO.to_string()
}

impl TrackerSettings {
    /// Settings for the default (unnamed) tracker.
    ///
    /// An empty tracking id is accepted and forwarded as-is — the
    /// analytics API is the sole authority on rejecting it. It is logged
    /// here so a misconfigured deployment is visible; callers that want
    /// to fail fast call [`TrackerSettings::validate`].
    pub fn new(tracking_id: impl Into<String>) -> Self {
        let tracking_id = tracking_id.into();
        if tracking_id.is_empty() {
            warn!("tracker configured with an empty tracking id");
        }
        Self {
            tracking_id,
            cookie_domain: default_cookie_domain(),
            name: None,
            user_id: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Reference to the tracker these settings configure.
    pub fn tracker_ref(&self) -> TrackerRef {
        TrackerRef::from_payload(self.name.as_deref())
    }

    /// Validate that the settings are usable. Construction never fails;
    /// this is the opt-in fail-fast path.
    pub fn validate(&self) -> BridgeResult<()> {
        if self.tracking_id.is_empty() {
            return Err(BridgeError::Tracker(
                "tracking id must not be empty".into(),
            ));
        }
        if let Some(name) = &self.name {
            if name.is_empty() {
                return Err(BridgeError::Tracker(
                    "tracker name must not be empty when supplied".into(),
                ));
            }
        }
        Ok(())
    }
}

impl From<&str> for TrackerSettings {
    fn from(tracking_id: &str) -> Self {
        Self::new(tracking_id)
    }
}

impl From<String> for TrackerSettings {
    fn from(tracking_id: String) -> Self {
        Self::new(tracking_id)
    }
}
