use chrono::Utc;
use std::time::Duration;

use crate::api::ApiClient;
use crate::poll::{spawn_poll_loop, PollerHandle, SequencedSink};
use crate::sequence::Ticket;

use super::store::{TelemetryFrame, TrackingWriter};
use super::types::{Alert, Satellite, SystemHealth};

pub const DEFAULT_TRACKING_PERIOD: Duration = Duration::from_secs(5);

impl SequencedSink for TrackingWriter {
    type Item = TelemetryFrame;

    fn begin(&self) -> Ticket {
        TrackingWriter::begin(self)
    }

    fn apply(&mut self, ticket: Ticket, item: TelemetryFrame) -> bool {
        TrackingWriter::apply(self, ticket, item)
    }
}

pub fn spawn_tracking_poller(
    client: ApiClient,
    writer: TrackingWriter,
    period: Duration,
    alert_limit: u32,
) -> PollerHandle {
    spawn_poll_loop("tracking", period, writer, move || {
        let client = client.clone();
        async move { fetch_telemetry(&client, alert_limit).await }
    })
}

/// One tracking tick: positions, then status, then alerts. A positions or
/// status failure leaves the previous satellites in place.
pub async fn fetch_telemetry(client: &ApiClient, alert_limit: u32) -> TelemetryFrame {
    let received_at = Utc::now();

    let positions = match client.satellite_positions().await {
        Ok(positions) => positions,
        Err(e) => {
            log::warn!("Tracking tick degraded: {}", e);
            return TelemetryFrame::failed(e.to_string(), received_at);
        }
    };

    let health = match client.system_status().await {
        Ok(status) => SystemHealth::from_status(&status),
        Err(e) => {
            log::warn!("Tracking tick degraded: {}", e);
            return TelemetryFrame::failed(e.to_string(), received_at);
        }
    };

    let satellites: Vec<Satellite> = positions
        .into_iter()
        .map(|record| Satellite::from_position(record, received_at))
        .collect();

    let alerts = match client.recent_alerts(alert_limit).await {
        Ok(records) => Some(records.into_iter().map(Alert::from_record).collect()),
        Err(e) => {
            log::warn!("Failed to fetch alerts: {}", e);
            None
        }
    };

    TelemetryFrame {
        satellites: Some(satellites),
        health,
        alerts,
        error: None,
        received_at,
    }
}
