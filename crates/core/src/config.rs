use serde::Deserialize;

use crate::error::BridgeResult;
use crate::tracker::{TrackerSettings, COOKIE_DOMAIN_AUTO};

/// Root bridge configuration. Loaded from environment variables with the
/// prefix `BEACON_BRIDGE__`.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default = "default_log_hits")]
    pub log_hits: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub tracking_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default = "default_cookie_domain")]
    pub cookie_domain: String,
}

// Default functions
fn default_log_hits() -> bool {
    true
}
fn default_cookie_domain() -> String {
    COOKIE_DOMAIN_AUTO.to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            log_hits: default_log_hits(),
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tracking_id: String::new(),
            name: None,
            user_id: None,
            cookie_domain: default_cookie_domain(),
        }
    }
}

impl TrackerConfig {
    /// Materialize the immutable settings handed to the bridge.
    pub fn to_settings(&self) -> TrackerSettings {
        let mut settings = TrackerSettings::new(self.tracking_id.clone());
        settings.cookie_domain = self.cookie_domain.clone();
        if let Some(name) = &self.name {
            settings = settings.with_name(name.clone());
        }
        if let Some(user_id) = &self.user_id {
            settings = settings.with_user_id(user_id.clone());
        }
        settings
    }
}

impl BridgeConfig {
    /// Load configuration from environment variables.
    pub fn load() -> BridgeResult<Self> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("BEACON_BRIDGE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}
