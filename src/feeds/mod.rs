//! Dashboard widgets that poll the backend on their own schedule.
//!
//! Each feed owns one [`FeedWriter`] driven by a poll loop and hands out
//! read-only [`FeedHandle`]s. What a feed shows after a failed fetch is
//! decided by its [`FallbackPolicy`].

mod catalog;
mod conjunctions;
mod intelligence;
mod metrics;
mod store;

pub use catalog::{catalog_store, spawn_catalog_feed, CATALOG_PERIOD};
pub use conjunctions::{
    conjunction_store, format_distance, format_probability, format_risk, spawn_conjunction_feed,
    Conjunctions, CONJUNCTION_PERIOD,
};
pub use intelligence::{
    intelligence_store, spawn_intelligence_feed, IntelligenceBundle, INTELLIGENCE_PERIOD,
};
pub use metrics::{
    metric_tiles, metrics_store, spawn_metrics_feed, MetricTile, MetricsBundle, METRICS_PERIOD,
};
pub use store::{log_status_changes, FallbackPolicy, FeedHandle, FeedState, FeedStatus, FeedWriter};

use std::future::Future;
use std::time::Duration;

use crate::api::{ApiClient, ClientError};
use crate::poll::{spawn_poll_loop, PollerHandle};
use crate::tracking::Satellite;

/// Runs `fetch` immediately and then once per `period`, feeding `writer`.
pub fn spawn_feed<T, F, Fut>(
    name: &'static str,
    period: Duration,
    client: ApiClient,
    writer: FeedWriter<T>,
    fetch: F,
) -> PollerHandle
where
    T: Send + Sync + 'static,
    F: Fn(ApiClient) -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
{
    spawn_poll_loop(name, period, writer, move || fetch(client.clone()))
}

#[derive(Debug, Clone, Copy)]
pub struct FeedSchedule {
    pub catalog: Duration,
    pub conjunctions: Duration,
    pub intelligence: Duration,
    pub metrics: Duration,
}

impl Default for FeedSchedule {
    fn default() -> Self {
        Self {
            catalog: CATALOG_PERIOD,
            conjunctions: CONJUNCTION_PERIOD,
            intelligence: INTELLIGENCE_PERIOD,
            metrics: METRICS_PERIOD,
        }
    }
}

/// Read side of every widget feed.
#[derive(Clone)]
pub struct Feeds {
    pub catalog: FeedHandle<Vec<Satellite>>,
    pub conjunctions: FeedHandle<Conjunctions>,
    pub intelligence: FeedHandle<IntelligenceBundle>,
    pub metrics: FeedHandle<MetricsBundle>,
}

impl Feeds {
    /// Starts one poll loop per feed. The returned pollers must be kept
    /// alive for as long as the feeds should refresh.
    pub fn spawn(
        client: &ApiClient,
        schedule: &FeedSchedule,
        conjunction_policy: FallbackPolicy,
    ) -> (Feeds, Vec<PollerHandle>) {
        let (catalog_writer, catalog) = catalog_store();
        let (conjunction_writer, conjunctions) = conjunction_store(conjunction_policy);
        let (intelligence_writer, intelligence) = intelligence_store();
        let (metrics_writer, metrics) = metrics_store();

        let pollers = vec![
            spawn_catalog_feed(client.clone(), catalog_writer, schedule.catalog),
            spawn_conjunction_feed(client.clone(), conjunction_writer, schedule.conjunctions),
            spawn_intelligence_feed(client.clone(), intelligence_writer, schedule.intelligence),
            spawn_metrics_feed(client.clone(), metrics_writer, schedule.metrics),
        ];

        let feeds = Feeds {
            catalog,
            conjunctions,
            intelligence,
            metrics,
        };
        (feeds, pollers)
    }

    /// Logs status transitions of every feed until its poller stops.
    pub fn log_transitions(&self) {
        tokio::spawn(log_status_changes("catalog", self.catalog.clone()));
        tokio::spawn(log_status_changes("conjunctions", self.conjunctions.clone()));
        tokio::spawn(log_status_changes("intelligence", self.intelligence.clone()));
        tokio::spawn(log_status_changes("metrics", self.metrics.clone()));
    }

    /// Handles that never refresh, for rendering without a backend.
    pub fn idle(conjunction_policy: FallbackPolicy) -> Feeds {
        Feeds {
            catalog: catalog_store().1,
            conjunctions: conjunction_store(conjunction_policy).1,
            intelligence: intelligence_store().1,
            metrics: metrics_store().1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client_for, spawn_backend};
    use axum::{routing::get, Json, Router};
    use serde_json::json;
    use tokio::time::timeout;

    #[tokio::test]
    async fn spawned_feeds_refresh_independently() {
        let app = Router::new()
            .route(
                "/satellites/catalog",
                get(|| async {
                    Json(json!({ "satellites": [{ "norad_id": 5, "name": "VANGUARD 1" }] }))
                }),
            )
            .route(
                "/status",
                get(|| async { Json(json!({ "system_status": "operational" })) }),
            )
            .route(
                "/intelligence/summary",
                get(|| async { Json(json!({ "active_threats": 1 })) }),
            );
        let base = spawn_backend(app).await;
        let client = client_for(&base);

        let (feeds, pollers) =
            Feeds::spawn(&client, &FeedSchedule::default(), FallbackPolicy::KeepStale);
        assert_eq!(pollers.len(), 4);

        let mut catalog = feeds.catalog.watch();
        let mut metrics = feeds.metrics.watch();
        let mut intelligence = feeds.intelligence.watch();
        let wait = Duration::from_secs(5);

        timeout(wait, catalog.wait_for(|s| s.status == FeedStatus::Live))
            .await
            .unwrap()
            .unwrap();
        timeout(wait, metrics.wait_for(|s| s.status == FeedStatus::Live))
            .await
            .unwrap()
            .unwrap();
        // No priority-target route: this feed fails while the others are live.
        timeout(wait, intelligence.wait_for(|s| s.status == FeedStatus::Unavailable))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(feeds.catalog.state().data.unwrap()[0].name, "VANGUARD 1");

        for poller in pollers {
            poller.stop().await;
        }
    }
}
