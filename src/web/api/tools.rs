use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::content::{DevelopmentStatus, SpaceSystem};
use crate::web::state::AppState;

use super::error::{ApiError, ApiResult, ErrorResponse};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ToolsQuery {
    /// `active`, `in_development` or `beta`.
    pub status: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/tools",
    params(ToolsQuery),
    responses(
        (status = 200, description = "Systems in the tools catalog", body = Vec<SpaceSystem>),
        (status = 400, description = "Unknown status", body = ErrorResponse)
    ),
    tag = "tools"
)]
pub async fn list_tools(
    State(state): State<AppState>,
    Query(query): Query<ToolsQuery>,
) -> ApiResult<Json<Vec<SpaceSystem>>> {
    let status = match query.status.as_deref() {
        None | Some("") => None,
        Some(value) => Some(
            DevelopmentStatus::parse(value)
                .ok_or_else(|| ApiError::Validation(format!("unknown status '{}'", value)))?,
        ),
    };
    Ok(Json(
        state
            .content
            .systems_with_status(status)
            .into_iter()
            .cloned()
            .collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/tools/{id}",
    params(
        ("id" = String, Path, description = "System identifier")
    ),
    responses(
        (status = 200, description = "One system", body = SpaceSystem),
        (status = 404, description = "No such system", body = ErrorResponse)
    ),
    tag = "tools"
)]
pub async fn get_tool(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SpaceSystem>> {
    state
        .content
        .system(&id)
        .cloned()
        .map(Json)
        .ok_or(ApiError::NotFound("tool_not_found"))
}
