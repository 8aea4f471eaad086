use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::error::ClientError;
use super::types::*;

pub const API_URL_ENV: &str = "CRYPTIK_API_URL";
pub const FALLBACK_API_URL: &str = "https://web-production-e4e27.up.railway.app";
pub const DEFAULT_TOKEN: &str = "test-token";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_ALERT_LIMIT: u32 = 50;

/// Picks the backend base URL: explicit value, then the environment, then the hosted backend.
pub fn resolve_base_url(configured: Option<&str>, env: Option<String>) -> String {
    let chosen = configured
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .or_else(|| env.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
        .unwrap_or_else(|| FALLBACK_API_URL.to_string());
    chosen.trim_end_matches('/').to_string()
}

/// Thin client for the SSA backend. One HTTP call per method, no retries.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| ClientError::InvalidConfig(format!("token: {}", e)))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn health(&self) -> Result<serde_json::Value, ClientError> {
        self.send(self.request(Method::GET, "/health"), "/health").await
    }

    pub async fn system_status(&self) -> Result<SystemStatus, ClientError> {
        self.send(self.request(Method::GET, "/status"), "/status").await
    }

    pub async fn satellite_positions(&self) -> Result<Vec<PositionRecord>, ClientError> {
        let path = "/satellites/positions";
        let body: PositionsResponse = self.send(self.request(Method::GET, path), path).await?;
        Ok(body.satellites)
    }

    pub async fn satellite_catalog(&self) -> Result<Vec<CatalogSatellite>, ClientError> {
        let path = "/satellites/catalog";
        let body: CatalogResponse = self.send(self.request(Method::GET, path), path).await?;
        Ok(body.satellites)
    }

    pub async fn institutional_catalog(
        &self,
        query: &InstitutionalCatalogQuery,
    ) -> Result<Vec<CatalogEntry>, ClientError> {
        let path = "/satellites/institutional-catalog";
        let req = self.request(Method::GET, path).query(query);
        let body: InstitutionalCatalogResponse = self.send(req, path).await?;
        Ok(body.satellites)
    }

    pub async fn recent_alerts(&self, limit: u32) -> Result<Vec<AlertRecord>, ClientError> {
        let path = "/alerts/recent";
        let req = self.request(Method::GET, path).query(&[("limit", limit)]);
        let body: AlertsResponse = self.send(req, path).await?;
        log::debug!(
            "Received {} alerts (backend count {:?})",
            body.alerts.len(),
            body.count
        );
        Ok(body.alerts)
    }

    pub async fn catalog_statistics(&self) -> Result<serde_json::Value, ClientError> {
        let path = "/statistics/catalog";
        self.send(self.request(Method::GET, path), path).await
    }

    pub async fn intelligence_summary(&self) -> Result<IntelligenceSummary, ClientError> {
        let path = "/intelligence/summary";
        self.send(self.request(Method::GET, path), path).await
    }

    pub async fn screen_conjunctions(
        &self,
        request: &ScreeningRequest,
    ) -> Result<serde_json::Value, ClientError> {
        let path = "/conjunctions/screen";
        let req = self.request(Method::POST, path).json(request);
        self.send(req, path).await
    }

    pub async fn conjunction_events(
        &self,
        query: &ConjunctionEventsQuery,
    ) -> Result<Vec<ConjunctionEvent>, ClientError> {
        let path = "/conjunctions/events";
        let req = self.request(Method::GET, path).query(query);
        let body: ConjunctionEventsResponse = self.send(req, path).await?;
        Ok(body.events)
    }

    pub async fn latest_tle(&self, norad_id: u32) -> Result<serde_json::Value, ClientError> {
        let path = format!("/tle/latest/{}", norad_id);
        self.send(self.request(Method::GET, &path), &path).await
    }

    /// Parameters travel in the query string; the body is empty.
    pub async fn detect_maneuvers(
        &self,
        query: &ManeuverQuery,
    ) -> Result<serde_json::Value, ClientError> {
        let path = "/maneuvers/detect";
        let req = self.request(Method::POST, path).query(query);
        self.send(req, path).await
    }

    pub async fn priority_targets(&self) -> Result<Vec<PriorityTarget>, ClientError> {
        let path = "/intelligence/priority-targets";
        let body: PriorityTargetsResponse = self.send(self.request(Method::GET, path), path).await?;
        Ok(body.targets)
    }

    pub async fn conjunctions_summary(&self) -> Result<ConjunctionsSummary, ClientError> {
        let path = "/intelligence/conjunctions-summary";
        self.send(self.request(Method::GET, path), path).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        path: &str,
    ) -> Result<T, ClientError> {
        let result = execute(req, path).await;
        if let Err(e) = &result {
            log::error!("API error: {}", e);
        }
        result
    }
}

async fn execute<T: DeserializeOwned>(req: RequestBuilder, path: &str) -> Result<T, ClientError> {
    let response = req.send().await.map_err(|source| ClientError::Transport {
        path: path.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status {
            path: path.to_string(),
            status,
        });
    }

    response.json::<T>().await.map_err(|source| ClientError::Decode {
        path: path.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, Query},
        http::{HeaderMap as AxumHeaders, StatusCode},
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;

    use crate::testing::spawn_backend;

    fn client(base: &str) -> ApiClient {
        crate::testing::client_for(base)
    }

    #[test]
    fn base_url_prefers_config_then_env_then_fallback() {
        assert_eq!(
            resolve_base_url(Some("http://api.local/"), Some("http://env".into())),
            "http://api.local"
        );
        assert_eq!(
            resolve_base_url(None, Some("http://env.local//".into())),
            "http://env.local"
        );
        assert_eq!(resolve_base_url(Some("  "), None), FALLBACK_API_URL);
        assert_eq!(resolve_base_url(None, Some(String::new())), FALLBACK_API_URL);
    }

    #[tokio::test]
    async fn sends_bearer_token_and_json_content_type() {
        let app = Router::new().route(
            "/status",
            get(|headers: AxumHeaders| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let ctype = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({
                    "system_status": format!("{}|{}", auth, ctype),
                    "active_satellites": 3
                }))
            }),
        );
        let base = spawn_backend(app).await;

        let status = client(&base).system_status().await.unwrap();
        assert_eq!(status.system_status, "Bearer test-token|application/json");
        assert_eq!(status.active_satellites, Some(3));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let app = Router::new().route(
            "/satellites/positions",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let base = spawn_backend(app).await;

        let err = client(&base).satellite_positions().await.unwrap_err();
        match err {
            ClientError::Status { path, status } => {
                assert_eq!(path, "/satellites/positions");
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let app = Router::new().route("/intelligence/summary", get(|| async { "not json" }));
        let base = spawn_backend(app).await;

        let err = client(&base).intelligence_summary().await.unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
        assert_eq!(err.path(), Some("/intelligence/summary"));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        let base = crate::testing::dead_backend().await;

        let err = client(&base).health().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport { .. }));
    }

    #[tokio::test]
    async fn query_parameters_are_forwarded() {
        let app = Router::new()
            .route(
                "/conjunctions/events",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    Json(json!({ "events": [{
                        "id": 9,
                        "primary_norad_id": 1,
                        "secondary_norad_id": 2,
                        "tca_datetime": format!(
                            "{}|{}|{}",
                            q["hours_back"],
                            q["min_probability"].parse::<f64>().unwrap(),
                            q["limit"]
                        ),
                        "risk_level": "HIGH"
                    }]}))
                }),
            )
            .route(
                "/maneuvers/detect",
                post(|Query(q): Query<HashMap<String, String>>| async move {
                    Json(json!({ "norad_id": q["norad_id"], "days_back": q["days_back"] }))
                }),
            )
            .route(
                "/alerts/recent",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    Json(json!({ "alerts": [], "count": q["limit"].parse::<u64>().unwrap() }))
                }),
            );
        let base = spawn_backend(app).await;
        let api = client(&base);

        let events = api
            .conjunction_events(&ConjunctionEventsQuery::default())
            .await
            .unwrap();
        assert_eq!(events[0].tca_datetime, "24|0.000001|50");

        let maneuvers = api
            .detect_maneuvers(&ManeuverQuery {
                norad_id: 25544,
                days_back: default_days_back(),
            })
            .await
            .unwrap();
        assert_eq!(maneuvers, json!({ "norad_id": "25544", "days_back": "7" }));

        let alerts = api.recent_alerts(DEFAULT_ALERT_LIMIT).await.unwrap();
        assert!(alerts.is_empty());
    }

    #[tokio::test]
    async fn path_parameters_and_post_bodies() {
        let app = Router::new()
            .route(
                "/tle/latest/{norad_id}",
                get(|Path(id): Path<u32>| async move { Json(json!({ "norad_id": id })) }),
            )
            .route(
                "/conjunctions/screen",
                post(|Json(body): Json<serde_json::Value>| async move { Json(body) }),
            );
        let base = spawn_backend(app).await;
        let api = client(&base);

        assert_eq!(api.latest_tle(25544).await.unwrap(), json!({ "norad_id": 25544 }));

        let echoed = api
            .screen_conjunctions(&ScreeningRequest {
                primary_norad_id: 25544,
                time_window_hours: Some(72.0),
                screening_threshold_km: None,
                probability_threshold: None,
                include_debris: Some(true),
            })
            .await
            .unwrap();
        assert_eq!(
            echoed,
            json!({ "primary_norad_id": 25544, "time_window_hours": 72.0, "include_debris": true })
        );
    }
}
