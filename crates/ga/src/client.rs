//! Analytics client seam — the injected entry point the bridge calls,
//! plus no-op and capturing implementations.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::command::{GaCommand, GaFields, HitCallback};

/// The analytics entry point. Implementations route commands to the real
/// collection endpoint; the bridge only ever sees this trait.
pub trait GaClient: Send + Sync {
    fn call(&self, command: GaCommand);
}

/// Client that discards hits. Completion hooks still fire, so callers
/// observe completion exactly once.
pub struct NoOpClient;

impl GaClient for NoOpClient {
    fn call(&self, mut command: GaCommand) {
        if let Some(hook) = command
            .fields
            .as_mut()
            .and_then(|fields| fields.take_hit_callback())
        {
            hook();
        }
    }
}

/// Captured form of a command. The completion hook is moved out so the
/// call data stays cloneable for assertions.
#[derive(Debug, Clone)]
pub struct CapturedCall {
    pub selector: String,
    pub args: Vec<Value>,
    pub fields: Option<Map<String, Value>>,
    pub had_hit_callback: bool,
    pub at: DateTime<Utc>,
}

impl CapturedCall {
    /// Field from the trailing fields object, if the call carried one.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.as_ref().and_then(|fields| fields.get(key))
    }
}

/// In-memory client that captures calls for testing. Completion hooks are
/// held until [`CaptureClient::fire_pending_hooks`] replays them, or fire
/// immediately when built with [`CaptureClient::completing`].
#[derive(Default)]
pub struct CaptureClient {
    calls: Mutex<Vec<CapturedCall>>,
    pending_hooks: Mutex<Vec<HitCallback>>,
    complete_hits: bool,
}

impl CaptureClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture client that invokes completion hooks as soon as a hit
    /// arrives, like a collection endpoint that accepts every hit.
    pub fn completing() -> Self {
        Self {
            complete_hits: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<CapturedCall> {
        self.calls.lock().expect("capture client mutex poisoned").clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().expect("capture client mutex poisoned").len()
    }

    pub fn count_selector(&self, selector: &str) -> usize {
        self.calls
            .lock()
            .expect("capture client mutex poisoned")
            .iter()
            .filter(|call| call.selector == selector)
            .count()
    }

    pub fn last(&self) -> Option<CapturedCall> {
        self.calls
            .lock()
            .expect("capture client mutex poisoned")
            .last()
            .cloned()
    }

    /// Invoke every held completion hook in arrival order; returns how
    /// many fired.
    pub fn fire_pending_hooks(&self) -> usize {
        let hooks: Vec<HitCallback> = {
            let mut pending = self
                .pending_hooks
                .lock()
                .expect("capture client mutex poisoned");
            pending.drain(..).collect()
        };
        let fired = hooks.len();
        for hook in hooks {
            hook();
        }
        fired
    }

    pub fn pending_hook_count(&self) -> usize {
        self.pending_hooks
            .lock()
            .expect("capture client mutex poisoned")
            .len()
    }

    pub fn clear(&self) {
        self.calls.lock().expect("capture client mutex poisoned").clear();
    }
}

impl GaClient for CaptureClient {
    fn call(&self, mut command: GaCommand) {
        let hook = command
            .fields
            .as_mut()
            .and_then(|fields| fields.take_hit_callback());

        let captured = CapturedCall {
            selector: command.selector,
            args: command.args,
            fields: command.fields.map(GaFields::into_fields),
            had_hit_callback: hook.is_some(),
            at: Utc::now(),
        };
        self.calls
            .lock()
            .expect("capture client mutex poisoned")
            .push(captured);

        match hook {
            Some(hook) if self.complete_hits => hook(),
            Some(hook) => self
                .pending_hooks
                .lock()
                .expect("capture client mutex poisoned")
                .push(hook),
            None => {}
        }
    }
}

/// Convenience: client that discards everything.
pub fn noop_client() -> Arc<dyn GaClient> {
    Arc::new(NoOpClient)
}

/// Convenience: capture client for tests.
pub fn capture_client() -> Arc<CaptureClient> {
    Arc::new(CaptureClient::new())
}

/// Convenience: capture client that completes every hit immediately.
pub fn completing_client() -> Arc<CaptureClient> {
    Arc::new(CaptureClient::completing())
}
