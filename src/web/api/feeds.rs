use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::feeds::{metric_tiles, IntelligenceBundle, MetricTile};
use crate::web::state::AppState;
use crate::web::view::{ConjunctionRow, FeedMeta};

#[derive(Debug, Serialize, ToSchema)]
pub struct ConjunctionsResponse {
    pub feed: FeedMeta,
    pub events: Vec<ConjunctionRow>,
}

#[utoipa::path(
    get,
    path = "/api/conjunctions",
    responses(
        (status = 200, description = "Recent conjunction events", body = ConjunctionsResponse)
    ),
    tag = "feeds"
)]
pub async fn conjunctions(State(state): State<AppState>) -> Json<ConjunctionsResponse> {
    let feed = state.feeds.conjunctions.state();
    Json(ConjunctionsResponse {
        feed: FeedMeta::of(&feed),
        events: feed
            .data
            .unwrap_or_default()
            .into_iter()
            .map(ConjunctionRow::from)
            .collect(),
    })
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IntelligenceResponse {
    pub feed: FeedMeta,
    pub intelligence: Option<IntelligenceBundle>,
}

#[utoipa::path(
    get,
    path = "/api/intelligence",
    responses(
        (status = 200, description = "Threat summary, priority targets and conjunction rollup", body = IntelligenceResponse)
    ),
    tag = "feeds"
)]
pub async fn intelligence(State(state): State<AppState>) -> Json<IntelligenceResponse> {
    let feed = state.feeds.intelligence.state();
    Json(IntelligenceResponse {
        feed: FeedMeta::of(&feed),
        intelligence: feed.data,
    })
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MetricsResponse {
    pub feed: FeedMeta,
    pub tiles: Vec<MetricTile>,
}

pub fn current_tiles(state: &AppState) -> (FeedMeta, Vec<MetricTile>) {
    let feed = state.feeds.metrics.state();
    let snapshot = state.tracking.snapshot();
    let tracked = snapshot.last_success.map(|_| snapshot.satellites.len());
    (FeedMeta::of(&feed), metric_tiles(feed.data.as_ref(), tracked))
}

#[utoipa::path(
    get,
    path = "/api/metrics",
    responses(
        (status = 200, description = "Metrics panel tiles", body = MetricsResponse)
    ),
    tag = "feeds"
)]
pub async fn metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    let (feed, tiles) = current_tiles(&state);
    Json(MetricsResponse { feed, tiles })
}
