//! Event payload types — the tagged per-kind shapes the host
//! instrumentation framework delivers, plus the instrumentation-node
//! attribute carrier click events reference.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BridgeResult;

/// Event kinds the bridge handles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BeaconEventKind {
    PageView,
    Click,
    Command,
}

/// Per-component metadata carrier supplied by the instrumentation
/// framework. Attributes are loose JSON values; the typed accessors
/// cover the ones the click handler reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstrumentationNode {
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
}

impl InstrumentationNode {
    pub fn new(attributes: HashMap<String, Value>) -> Self {
        Self { attributes }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Raw attribute lookup.
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    fn str_attr(&self, key: &str) -> Option<String> {
        self.attr(key).and_then(Value::as_str).map(str::to_string)
    }

    pub fn tracker(&self) -> Option<String> {
        self.str_attr("tracker")
    }

    pub fn category(&self) -> Option<String> {
        self.str_attr("category")
    }

    pub fn action(&self) -> Option<String> {
        self.str_attr("action")
    }

    pub fn label(&self) -> Option<String> {
        self.str_attr("label")
    }

    /// Numeric event value; absent when missing or non-integer.
    pub fn value(&self) -> Option<i64> {
        self.attr("value").and_then(Value::as_i64)
    }
}

/// Page view payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageViewPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracker: Option<String>,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Click payload — wraps the instrumentation node the framework attached
/// to the clicked component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickPayload {
    pub node: InstrumentationNode,
}

/// Generic analytics command payload — the escape hatch for commands the
/// specialized handlers do not cover.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracker: Option<String>,
    pub command_name: String,
    #[serde(default)]
    pub arguments: Vec<Value>,
}

/// Tagged union over the event kinds. The dispatch boundary matches on
/// this exhaustively; payloads are transient and never retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BeaconEvent {
    PageView(PageViewPayload),
    Click(ClickPayload),
    Command(CommandPayload),
}

impl BeaconEvent {
    pub fn kind(&self) -> BeaconEventKind {
        match self {
            Self::PageView(_) => BeaconEventKind::PageView,
            Self::Click(_) => BeaconEventKind::Click,
            Self::Command(_) => BeaconEventKind::Command,
        }
    }

    /// Parse an event from the loose JSON shape a host framework delivers.
    pub fn from_value(value: Value) -> BridgeResult<Self> {
        Ok(serde_json::from_value(value)?)
    }
}
