use serde::Serialize;
use std::time::Duration;
use utoipa::ToSchema;

use crate::api::{ApiClient, ClientError, ConjunctionsSummary, IntelligenceSummary, PriorityTarget};
use crate::poll::PollerHandle;

use super::store::{FallbackPolicy, FeedHandle, FeedStore, FeedWriter};
use super::spawn_feed;

pub const INTELLIGENCE_PERIOD: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct IntelligenceBundle {
    pub summary: IntelligenceSummary,
    pub targets: Vec<PriorityTarget>,
    pub conjunctions: ConjunctionsSummary,
}

pub fn intelligence_store() -> (FeedWriter<IntelligenceBundle>, FeedHandle<IntelligenceBundle>) {
    FeedStore::new("intelligence", FallbackPolicy::KeepStale, None)
}

pub fn spawn_intelligence_feed(
    client: ApiClient,
    writer: FeedWriter<IntelligenceBundle>,
    period: Duration,
) -> PollerHandle {
    spawn_feed("intelligence", period, client, writer, |client| async move {
        fetch_intelligence(&client).await
    })
}

/// All three requests run concurrently and all three must succeed.
pub async fn fetch_intelligence(client: &ApiClient) -> Result<IntelligenceBundle, ClientError> {
    let (summary, targets, conjunctions) = tokio::try_join!(
        client.intelligence_summary(),
        client.priority_targets(),
        client.conjunctions_summary(),
    )?;
    Ok(IntelligenceBundle {
        summary,
        targets,
        conjunctions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client_for, spawn_backend};
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    fn backend(targets_up: bool) -> Router {
        Router::new()
            .route(
                "/intelligence/summary",
                get(|| async { Json(json!({ "active_threats": 3, "threat_level": "ELEVATED" })) }),
            )
            .route(
                "/intelligence/priority-targets",
                get(move || async move {
                    if targets_up {
                        Ok(Json(json!({ "targets": [{
                            "id": "t-1", "norad_id": 24001, "name": "OBJ-24001",
                            "interest_level": "High Interest", "last_contact": "14:22:01 Z",
                            "orbit": "LEO / 98.2°", "risk_score": 0.82
                        }]})))
                    } else {
                        Err(StatusCode::INTERNAL_SERVER_ERROR)
                    }
                }),
            )
            .route(
                "/intelligence/conjunctions-summary",
                get(|| async {
                    Json(json!({
                        "active_conjunctions": 3,
                        "total_events_24h": 12,
                        "high_risk_events": 1
                    }))
                }),
            )
    }

    #[tokio::test]
    async fn bundle_combines_the_three_endpoints() {
        let base = spawn_backend(backend(true)).await;
        let bundle = fetch_intelligence(&client_for(&base)).await.unwrap();

        assert_eq!(bundle.summary.active_threats, Some(3));
        assert_eq!(bundle.targets[0].name, "OBJ-24001");
        assert_eq!(bundle.conjunctions.total_events_24h, 12);
        assert!(bundle.conjunctions.events.is_empty());
    }

    #[tokio::test]
    async fn one_failing_endpoint_fails_the_bundle() {
        let base = spawn_backend(backend(false)).await;
        let err = fetch_intelligence(&client_for(&base)).await.unwrap_err();
        assert_eq!(err.path(), Some("/intelligence/priority-targets"));
    }
}
