use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;
use utoipa::ToSchema;

use crate::sequence::{AppliedMark, Sequencer, Ticket};

use super::types::{Alert, Satellite, SystemHealth};

/// What consumers see. Replaced as a whole on every applied tick.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TrackingSnapshot {
    pub satellites: Vec<Satellite>,
    pub alerts: Vec<Alert>,
    pub system_status: SystemHealth,
    pub is_loading: bool,
    pub last_success: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub sequence: u64,
}

impl Default for TrackingSnapshot {
    fn default() -> Self {
        Self {
            satellites: Vec::new(),
            alerts: Vec::new(),
            system_status: SystemHealth::Operational,
            is_loading: true,
            last_success: None,
            last_error: None,
            sequence: 0,
        }
    }
}

impl TrackingSnapshot {
    /// Degraded while still showing data from an earlier successful tick.
    pub fn is_stale(&self) -> bool {
        self.system_status == SystemHealth::Degraded && self.last_success.is_some()
    }
}

/// Result of one poll tick. `None` fields keep whatever the snapshot had.
#[derive(Debug, Clone)]
pub struct TelemetryFrame {
    pub satellites: Option<Vec<Satellite>>,
    pub health: SystemHealth,
    pub alerts: Option<Vec<Alert>>,
    pub error: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl TelemetryFrame {
    pub fn failed(error: String, received_at: DateTime<Utc>) -> Self {
        Self {
            satellites: None,
            health: SystemHealth::Degraded,
            alerts: None,
            error: Some(error),
            received_at,
        }
    }
}

pub struct TrackingStore;

impl TrackingStore {
    pub fn new() -> (TrackingWriter, TrackingHandle) {
        let (tx, rx) = watch::channel(TrackingSnapshot::default());
        let writer = TrackingWriter {
            tx,
            sequencer: Arc::new(Sequencer::new()),
            mark: AppliedMark::default(),
        };
        (writer, TrackingHandle { rx })
    }
}

/// The only way to change the tracking snapshot. Deliberately not `Clone`.
pub struct TrackingWriter {
    tx: watch::Sender<TrackingSnapshot>,
    sequencer: Arc<Sequencer>,
    mark: AppliedMark,
}

impl TrackingWriter {
    pub fn begin(&self) -> Ticket {
        self.sequencer.next()
    }

    /// Applies a frame unless a newer request has already been applied.
    pub fn apply(&mut self, ticket: Ticket, frame: TelemetryFrame) -> bool {
        if !self.mark.accept(ticket) {
            log::debug!(
                "Discarding tracking response {} (already showing {})",
                ticket.value(),
                self.mark.last()
            );
            return false;
        }

        self.tx.send_modify(|snapshot| {
            if let Some(satellites) = frame.satellites {
                snapshot.satellites = satellites;
            }
            if let Some(alerts) = frame.alerts {
                snapshot.alerts = alerts;
            }
            snapshot.system_status = frame.health;
            match frame.error {
                Some(error) => snapshot.last_error = Some(error),
                None => {
                    snapshot.last_error = None;
                    snapshot.last_success = Some(frame.received_at);
                }
            }
            snapshot.is_loading = false;
            snapshot.sequence = ticket.value();
        });
        true
    }
}

/// Read-only view of the tracking snapshot.
#[derive(Clone)]
pub struct TrackingHandle {
    rx: watch::Receiver<TrackingSnapshot>,
}

impl TrackingHandle {
    pub fn snapshot(&self) -> TrackingSnapshot {
        self.rx.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<TrackingSnapshot> {
        self.rx.clone()
    }
}

/// Logs changes of the derived health. Returns once the writer is gone.
pub async fn log_health_changes(handle: TrackingHandle) {
    let mut rx = handle.watch();
    let mut last = rx.borrow_and_update().system_status;
    while rx.changed().await.is_ok() {
        let (health, error) = {
            let snapshot = rx.borrow_and_update();
            (snapshot.system_status, snapshot.last_error.clone())
        };
        if health == last {
            continue;
        }
        match health {
            SystemHealth::Operational => log::info!("Tracking recovered ({} before)", last),
            SystemHealth::Warning => log::warn!("Backend reports a non-operational status"),
            SystemHealth::Degraded => log::warn!(
                "Tracking degraded: {}",
                error.as_deref().unwrap_or("no error reported")
            ),
        }
        last = health;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::types::{RiskLevel, Severity};

    fn sat(norad_id: u32, name: &str, at: DateTime<Utc>) -> Satellite {
        Satellite {
            norad_id,
            name: name.into(),
            lat: 0.0,
            lon: 0.0,
            alt: 500.0,
            velocity: 7.6,
            object_type: "LEO".into(),
            x: Some(1.0),
            y: Some(2.0),
            z: Some(3.0),
            risk: Some(RiskLevel::Nominal),
            last_updated: at,
        }
    }

    fn ok_frame(sats: Vec<Satellite>, at: DateTime<Utc>) -> TelemetryFrame {
        TelemetryFrame {
            satellites: Some(sats),
            health: SystemHealth::Operational,
            alerts: Some(vec![Alert {
                id: "1".into(),
                severity: Severity::Medium,
                message: "CONJUNCTION: 1 vs 2".into(),
                timestamp: at.to_rfc3339(),
            }]),
            error: None,
            received_at: at,
        }
    }

    #[test]
    fn starts_loading_and_operational() {
        let (_writer, handle) = TrackingStore::new();
        let snap = handle.snapshot();
        assert!(snap.is_loading);
        assert_eq!(snap.system_status, SystemHealth::Operational);
        assert!(snap.satellites.is_empty());
    }

    #[test]
    fn failure_keeps_previous_data_and_degrades() {
        let (mut writer, handle) = TrackingStore::new();
        let now = Utc::now();

        let t1 = writer.begin();
        writer.apply(t1, ok_frame(vec![sat(1, "A", now)], now));
        let t2 = writer.begin();
        writer.apply(t2, TelemetryFrame::failed("timeout".into(), now));

        let snap = handle.snapshot();
        assert_eq!(snap.system_status, SystemHealth::Degraded);
        assert_eq!(snap.satellites.len(), 1);
        assert_eq!(snap.alerts.len(), 1);
        assert_eq!(snap.last_error.as_deref(), Some("timeout"));
        assert!(snap.is_stale());
    }

    #[test]
    fn first_failure_ends_loading_without_stale_flag() {
        let (mut writer, handle) = TrackingStore::new();
        let t = writer.begin();
        writer.apply(t, TelemetryFrame::failed("down".into(), Utc::now()));

        let snap = handle.snapshot();
        assert!(!snap.is_loading);
        assert!(!snap.is_stale());
        assert_eq!(snap.system_status, SystemHealth::Degraded);
    }

    #[test]
    fn recovery_replaces_satellites_with_successful_response_only() {
        let (mut writer, handle) = TrackingStore::new();
        let now = Utc::now();

        let t1 = writer.begin();
        writer.apply(t1, TelemetryFrame::failed("down".into(), now));
        let t2 = writer.begin();
        writer.apply(t2, ok_frame(vec![sat(7, "B", now), sat(8, "C", now)], now));

        let snap = handle.snapshot();
        assert_eq!(snap.system_status, SystemHealth::Operational);
        assert_eq!(
            snap.satellites.iter().map(|s| s.norad_id).collect::<Vec<_>>(),
            vec![7, 8]
        );
        assert_eq!(snap.last_error, None);
        assert_eq!(snap.last_success, Some(now));
    }

    #[test]
    fn out_of_order_response_is_discarded() {
        let (mut writer, handle) = TrackingStore::new();
        let now = Utc::now();

        let slow = writer.begin();
        let fast = writer.begin();
        assert!(writer.apply(fast, ok_frame(vec![sat(2, "new", now)], now)));
        assert!(!writer.apply(slow, ok_frame(vec![sat(1, "old", now)], now)));

        let snap = handle.snapshot();
        assert_eq!(snap.satellites[0].name, "new");
        assert_eq!(snap.sequence, fast.value());
    }

    #[test]
    fn identical_data_applied_twice_does_not_duplicate() {
        let (mut writer, handle) = TrackingStore::new();
        let now = Utc::now();
        let sats = vec![sat(1, "A", now), sat(2, "B", now)];

        let t1 = writer.begin();
        writer.apply(t1, ok_frame(sats.clone(), now));
        let first = handle.snapshot();
        let t2 = writer.begin();
        writer.apply(t2, ok_frame(sats, now));
        let second = handle.snapshot();

        assert_eq!(first.satellites, second.satellites);
        assert_eq!(first.alerts, second.alerts);
        assert_eq!(second.satellites.len(), 2);
    }

    #[tokio::test]
    async fn health_log_ends_with_the_writer() {
        let (mut writer, handle) = TrackingStore::new();
        let task = tokio::spawn(log_health_changes(handle));

        let t = writer.begin();
        writer.apply(t, TelemetryFrame::failed("down".into(), Utc::now()));
        drop(writer);

        tokio::time::timeout(std::time::Duration::from_secs(1), task)
            .await
            .unwrap()
            .unwrap();
    }

    #[test]
    fn missing_alerts_keep_previous_alerts() {
        let (mut writer, handle) = TrackingStore::new();
        let now = Utc::now();

        let t1 = writer.begin();
        writer.apply(t1, ok_frame(vec![sat(1, "A", now)], now));
        let t2 = writer.begin();
        let mut frame = ok_frame(vec![], now);
        frame.alerts = None;
        writer.apply(t2, frame);

        let snap = handle.snapshot();
        assert!(snap.satellites.is_empty());
        assert_eq!(snap.alerts.len(), 1);
    }
}
