use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::{ManeuverQuery, ScreeningRequest};
use crate::web::state::AppState;

use super::error::{ApiError, ApiResult, ErrorResponse};

const MAX_DAYS_BACK: u32 = 365;

#[utoipa::path(
    post,
    path = "/api/conjunctions/screen",
    request_body = ScreeningRequest,
    responses(
        (status = 200, description = "Screening result from the backend", body = serde_json::Value),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 502, description = "Backend unavailable", body = ErrorResponse)
    ),
    tag = "operations"
)]
pub async fn screen(
    State(state): State<AppState>,
    Json(request): Json<ScreeningRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    validate_screening(&request)?;
    Ok(Json(state.client.screen_conjunctions(&request).await?))
}

fn validate_screening(request: &ScreeningRequest) -> ApiResult<()> {
    if request.primary_norad_id == 0 {
        return Err(ApiError::Validation("primary_norad_id is required".into()));
    }
    if let Some(hours) = request.time_window_hours {
        if hours.is_nan() || hours <= 0.0 {
            return Err(ApiError::Validation(
                "time_window_hours must be positive".into(),
            ));
        }
    }
    Ok(())
}

#[utoipa::path(
    get,
    path = "/api/tle/{norad_id}",
    params(
        ("norad_id" = u32, Path, description = "NORAD catalog number")
    ),
    responses(
        (status = 200, description = "Latest TLE for the object", body = serde_json::Value),
        (status = 502, description = "Backend unavailable", body = ErrorResponse)
    ),
    tag = "operations"
)]
pub async fn latest_tle(
    State(state): State<AppState>,
    Path(norad_id): Path<u32>,
) -> ApiResult<Json<serde_json::Value>> {
    Ok(Json(state.client.latest_tle(norad_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/maneuvers/detect",
    request_body = ManeuverQuery,
    responses(
        (status = 200, description = "Detected maneuvers", body = serde_json::Value),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 502, description = "Backend unavailable", body = ErrorResponse)
    ),
    tag = "operations"
)]
pub async fn detect_maneuvers(
    State(state): State<AppState>,
    Json(query): Json<ManeuverQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    if query.days_back == 0 || query.days_back > MAX_DAYS_BACK {
        return Err(ApiError::Validation(format!(
            "days_back must be between 1 and {}",
            MAX_DAYS_BACK
        )));
    }
    Ok(Json(state.client.detect_maneuvers(&query).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(hours: Option<f64>) -> ScreeningRequest {
        ScreeningRequest {
            primary_norad_id: 25544,
            time_window_hours: hours,
            screening_threshold_km: None,
            probability_threshold: None,
            include_debris: None,
        }
    }

    #[test]
    fn screening_window_must_be_a_positive_number() {
        for hours in [f64::NAN, 0.0, -1.0] {
            assert!(
                matches!(validate_screening(&request(Some(hours))), Err(ApiError::Validation(_))),
                "accepted {}",
                hours
            );
        }
        assert!(validate_screening(&request(Some(24.0))).is_ok());
        assert!(validate_screening(&request(None)).is_ok());
    }
}
