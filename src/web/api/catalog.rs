use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::CatalogEntry;
use crate::catalog::PageLink;
use crate::web::state::AppState;
use crate::web::view::{CatalogListing, CatalogQuery};

use super::error::{ApiResult, ErrorResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogPageResponse {
    pub entries: Vec<CatalogEntry>,
    pub page: usize,
    pub page_count: usize,
    pub per_page: usize,
    pub total: usize,
    pub links: Vec<PageLink>,
}

#[utoipa::path(
    get,
    path = "/api/catalog",
    params(CatalogQuery),
    responses(
        (status = 200, description = "One page of the filtered institutional catalog", body = CatalogPageResponse),
        (status = 400, description = "Malformed query", body = ErrorResponse),
        (status = 502, description = "Catalog backend unavailable", body = ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn catalog(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> ApiResult<Json<CatalogPageResponse>> {
    let listing = CatalogListing::fetch(&state.client, query.view()).await?;
    let page = listing.page();
    Ok(Json(CatalogPageResponse {
        entries: page.items.to_vec(),
        page: page.page,
        page_count: page.page_count,
        per_page: listing.view.page_size().value(),
        total: page.total,
        links: listing.links(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/statistics",
    responses(
        (status = 200, description = "Aggregate catalog statistics as reported by the backend", body = serde_json::Value),
        (status = 502, description = "Backend unavailable", body = ErrorResponse)
    ),
    tag = "catalog"
)]
pub async fn statistics(State(state): State<AppState>) -> ApiResult<Json<serde_json::Value>> {
    Ok(Json(state.client.catalog_statistics().await?))
}
