//! Outbound command model — the positional call shape of the analytics
//! entry point: a selector, positional arguments, and an optional
//! trailing fields object that may carry a completion hook.

use std::fmt;

use serde_json::{Map, Value};

/// Fixed key under which the completion hook rides the fields object on
/// the wire.
pub const HIT_CALLBACK_KEY: &str = "hitCallback";

/// Completion hook — invoked exactly once when the hit completes.
/// Consume-on-invoke; a second invocation is unrepresentable.
pub type HitCallback = Box<dyn FnOnce() + Send + 'static>;

/// Trailing fields object of a call: loose field values plus an optional
/// completion hook slot.
#[derive(Default)]
pub struct GaFields {
    fields: Map<String, Value>,
    hit_callback: Option<HitCallback>,
}

impl GaFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    /// Set a field only when a value is present. Absent optionals are
    /// omitted rather than sent as null, matching the analytics API's
    /// absent-field convention.
    pub fn set_opt(&mut self, key: &str, value: Option<impl Into<Value>>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    pub fn with_hit_callback(mut self, hit_callback: Option<HitCallback>) -> Self {
        self.hit_callback = hit_callback;
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn has_hit_callback(&self) -> bool {
        self.hit_callback.is_some()
    }

    /// Take the completion hook out of the fields object. Returns `None`
    /// once taken.
    pub fn take_hit_callback(&mut self) -> Option<HitCallback> {
        self.hit_callback.take()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

impl fmt::Debug for GaFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GaFields")
            .field("fields", &self.fields)
            .field(
                HIT_CALLBACK_KEY,
                &self.hit_callback.as_ref().map(|_| "<hook>"),
            )
            .finish()
    }
}

/// A single call against the analytics entry point.
#[derive(Debug)]
pub struct GaCommand {
    /// First positional argument: `create`, `send`, `{tracker}.send`, or
    /// another tracker-qualified command name.
    pub selector: String,
    /// Positional arguments following the selector.
    pub args: Vec<Value>,
    /// Trailing fields object, when the call shape carries one.
    pub fields: Option<GaFields>,
}
