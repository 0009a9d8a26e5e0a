//! Tracker registry — every tracker name the bridge has seen, each
//! recorded at most once. Internal to the bridge; never exposed to
//! callers.

use dashmap::DashMap;

use beacon_core::tracker::TrackerRef;

/// Append-only map of tracker names to an "initialized" flag. Only the
/// tracker configured at construction is initialized (its `create` call
/// was issued); names first referenced by events are recorded without a
/// second `create`.
#[derive(Debug, Default)]
pub(crate) struct TrackerRegistry {
    entries: DashMap<String, bool>,
}

impl TrackerRegistry {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Record the tracker whose `create` call was issued at construction.
    pub fn register_created(&self, tracker: &TrackerRef) {
        self.entries
            .insert(tracker.registry_key().to_string(), true);
    }

    /// Record a tracker referenced by an event payload. Returns `true`
    /// the first time a name is seen, `false` on every later sighting.
    pub fn observe(&self, tracker: &TrackerRef) -> bool {
        let mut first = false;
        self.entries
            .entry(tracker.registry_key().to_string())
            .or_insert_with(|| {
                first = true;
                false
            });
        first
    }

    /// Whether the named tracker was created by this bridge.
    pub fn is_initialized(&self, tracker: &TrackerRef) -> bool {
        self.entries
            .get(tracker.registry_key())
            .map(|entry| *entry)
            .unwrap_or(false)
    }
}
