//! WFS 2.0 front end over an observation archive.
//!
//! Requests are validated and dispatched by the operators in [`operators`],
//! looked up through the [`registry`]. GetFeature is answered by bridging to
//! an SOS GetObservation query ([`bridge`]).

pub mod bridge;
pub mod capabilities_cache;
pub mod config;
pub mod dao;
pub mod handlers;
pub mod metrics;
pub mod operators;
pub mod refresh;
pub mod registry;
pub mod state;

pub use bridge::{BridgeError, ProtocolBridge};
pub use capabilities_cache::CapabilityCache;
pub use config::{FeatureBackend, WfsConfig};
pub use registry::{OperatorRegistry, RegistryError};
pub use state::AppState;
