use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::catalog::{merge_positions, CatalogFilter};
use crate::globe::GlobeScene;
use crate::tracking::{Satellite, SystemHealth, TrackingSnapshot};
use crate::web::state::AppState;

use super::error::ErrorResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: SystemHealth,
    pub station: String,
    pub backend: String,
    pub stale: bool,
    pub last_success: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Console health as last seen by the tracking poller", body = HealthResponse)
    ),
    tag = "tracking"
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let snapshot = state.tracking.snapshot();
    Json(HealthResponse {
        status: snapshot.system_status,
        station: state.config.station.name.clone(),
        backend: state.client.base_url().to_string(),
        stale: snapshot.is_stale(),
        last_success: snapshot.last_success,
        last_error: snapshot.last_error,
    })
}

#[utoipa::path(
    get,
    path = "/api/tracking",
    responses(
        (status = 200, description = "Current tracking snapshot", body = TrackingSnapshot)
    ),
    tag = "tracking"
)]
pub async fn tracking(State(state): State<AppState>) -> Json<TrackingSnapshot> {
    Json(state.tracking.snapshot())
}

#[utoipa::path(
    get,
    path = "/api/globe",
    responses(
        (status = 200, description = "Earth geometry and satellite marker traces", body = GlobeScene)
    ),
    tag = "tracking"
)]
pub async fn globe(State(state): State<AppState>) -> Json<GlobeScene> {
    let snapshot = state.tracking.snapshot();
    Json(GlobeScene::new(&snapshot.satellites))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SatelliteQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub object_type: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SatellitesResponse {
    pub total: usize,
    pub satellites: Vec<Satellite>,
}

/// Catalog rows with live positions layered on top, then filtered.
pub fn dashboard_table(state: &AppState, filter: &CatalogFilter) -> Vec<Satellite> {
    let catalog = state.feeds.catalog.state().data.unwrap_or_default();
    let snapshot = state.tracking.snapshot();
    let merged = merge_positions(&catalog, &snapshot.satellites);
    if filter.is_empty() {
        return merged;
    }
    filter.apply(&merged).into_iter().cloned().collect()
}

#[utoipa::path(
    get,
    path = "/api/satellites",
    params(SatelliteQuery),
    responses(
        (status = 200, description = "Merged and filtered satellite table", body = SatellitesResponse),
        (status = 400, description = "Malformed query", body = ErrorResponse)
    ),
    tag = "tracking"
)]
pub async fn satellites(
    State(state): State<AppState>,
    Query(query): Query<SatelliteQuery>,
) -> Json<SatellitesResponse> {
    let filter = CatalogFilter::new(query.search.unwrap_or_default(), query.object_type);
    let satellites = dashboard_table(&state, &filter);
    Json(SatellitesResponse {
        total: satellites.len(),
        satellites,
    })
}
