use serde::Serialize;
use std::time::Duration;
use utoipa::ToSchema;

use crate::api::{ApiClient, ClientError, IntelligenceSummary, SystemStatus};
use crate::poll::PollerHandle;

use super::store::{FallbackPolicy, FeedHandle, FeedStore, FeedWriter};
use super::spawn_feed;

pub const METRICS_PERIOD: Duration = Duration::from_secs(30);

/// Shown wherever a number is not known.
pub const UNKNOWN: &str = "--";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MetricsBundle {
    pub status: SystemStatus,
    pub summary: IntelligenceSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MetricTile {
    pub label: &'static str,
    pub value: String,
}

pub fn metrics_store() -> (FeedWriter<MetricsBundle>, FeedHandle<MetricsBundle>) {
    FeedStore::new("metrics", FallbackPolicy::KeepStale, None)
}

pub fn spawn_metrics_feed(
    client: ApiClient,
    writer: FeedWriter<MetricsBundle>,
    period: Duration,
) -> PollerHandle {
    spawn_feed("metrics", period, client, writer, |client| async move {
        fetch_metrics(&client).await
    })
}

pub async fn fetch_metrics(client: &ApiClient) -> Result<MetricsBundle, ClientError> {
    let (status, summary) =
        tokio::try_join!(client.system_status(), client.intelligence_summary())?;
    Ok(MetricsBundle { status, summary })
}

/// Panel tiles. `tracked` is the number of satellites on the tracking feed,
/// `None` while it has never reported.
pub fn metric_tiles(bundle: Option<&MetricsBundle>, tracked: Option<usize>) -> Vec<MetricTile> {
    let tracked_objects = bundle
        .and_then(|b| b.status.active_satellites)
        .map(|n| n.to_string())
        .or_else(|| tracked.map(|n| n.to_string()))
        .unwrap_or_else(|| UNKNOWN.to_string());

    let threats = bundle
        .and_then(|b| b.summary.active_threats)
        .map(|n| n.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string());

    let integrity = match bundle {
        Some(b) if b.status.is_operational() => "100%".to_string(),
        Some(_) => "98%".to_string(),
        None => UNKNOWN.to_string(),
    };

    let coverage = bundle
        .and_then(|b| b.summary.global_coverage.clone())
        .unwrap_or_else(|| UNKNOWN.to_string());

    vec![
        MetricTile {
            label: "Tracked Objects",
            value: tracked_objects,
        },
        MetricTile {
            label: "Active Threats",
            value: threats,
        },
        MetricTile {
            label: "System Integrity",
            value: integrity,
        },
        MetricTile {
            label: "Global Coverage",
            value: coverage,
        },
    ]
}
