mod poller;
mod store;
mod types;

pub use poller::{spawn_tracking_poller, DEFAULT_TRACKING_PERIOD};
pub use store::{
    log_health_changes, TelemetryFrame, TrackingHandle, TrackingSnapshot, TrackingStore,
};
pub use types::{Alert, RiskLevel, Satellite, Severity, SystemHealth};
