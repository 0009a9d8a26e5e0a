pub mod config;
pub mod error;
pub mod events;
pub mod tracker;

pub use crate::config::BridgeConfig;
pub use error::{BridgeError, BridgeResult};
pub use events::{
    BeaconEvent, BeaconEventKind, ClickPayload, CommandPayload, InstrumentationNode,
    PageViewPayload,
};
pub use tracker::{TrackerRef, TrackerSettings};
