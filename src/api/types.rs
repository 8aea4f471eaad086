use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// One entry of `GET /satellites/positions`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, ToSchema)]
pub struct PositionRecord {
    pub norad_id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    #[serde(default)]
    pub alt: f64,
    #[serde(default)]
    pub velocity: Option<f64>,
    #[serde(default, rename = "type")]
    pub object_type: Option<String>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub z: Option<f64>,
    #[serde(default)]
    pub risk: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PositionsResponse {
    #[serde(default)]
    pub satellites: Vec<PositionRecord>,
}

/// One entry of `GET /satellites/catalog`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, ToSchema)]
pub struct CatalogSatellite {
    pub norad_id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    #[serde(default)]
    pub alt: f64,
    #[serde(default)]
    pub velocity: f64,
    #[serde(default, rename = "type")]
    pub object_type: String,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub z: Option<f64>,
    #[serde(default)]
    pub risk: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub satellites: Vec<CatalogSatellite>,
}

/// One row of the institutional catalog.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, ToSchema)]
pub struct CatalogEntry {
    pub norad_id: u32,
    #[serde(default)]
    pub common_name: String,
    #[serde(default, rename = "type")]
    pub object_type: String,
    #[serde(default)]
    pub inclination_deg: f64,
    #[serde(default)]
    pub apogee_km: f64,
    #[serde(default)]
    pub perigee_km: f64,
    #[serde(default)]
    pub period_minutes: f64,
    #[serde(default)]
    pub rcs_m2: f64,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstitutionalCatalogResponse {
    #[serde(default)]
    pub satellites: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, ToSchema)]
pub struct InstitutionalCatalogQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Alert as emitted by `GET /alerts/recent`, before mapping for display.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertRecord {
    pub id: serde_json::Value,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub alert_type: String,
    #[serde(default)]
    pub primary_norad_id: Option<u32>,
    #[serde(default)]
    pub secondary_norad_id: Option<u32>,
    #[serde(default)]
    pub generated_at: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertsResponse {
    #[serde(default)]
    pub alerts: Vec<AlertRecord>,
    #[serde(default)]
    pub count: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, ToSchema)]
pub struct SystemStatus {
    #[serde(default)]
    pub system_status: String,
    #[serde(default)]
    pub active_satellites: Option<u64>,
}

impl SystemStatus {
    pub fn is_operational(&self) -> bool {
        self.system_status == "operational"
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, ToSchema)]
pub struct IntelligenceSummary {
    #[serde(default)]
    pub active_threats: Option<u64>,
    #[serde(default)]
    pub conjunction_events_24h: Option<u64>,
    #[serde(default)]
    pub high_risk_events: Option<u64>,
    #[serde(default)]
    pub maneuver_detections: Option<u64>,
    #[serde(default)]
    pub tracked_objects: Option<u64>,
    #[serde(default)]
    pub system_integrity: Option<String>,
    #[serde(default)]
    pub global_coverage: Option<String>,
    #[serde(default)]
    pub threat_level: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, ToSchema)]
pub struct PriorityTarget {
    #[serde(default)]
    #[schema(value_type = Object)]
    pub id: serde_json::Value,
    pub norad_id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub interest_level: String,
    #[serde(default)]
    pub last_contact: String,
    #[serde(default)]
    pub orbit: String,
    #[serde(default)]
    pub risk_score: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriorityTargetsResponse {
    #[serde(default)]
    pub targets: Vec<PriorityTarget>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, ToSchema)]
pub struct ConjunctionEvent {
    pub id: u64,
    pub primary_norad_id: u32,
    pub secondary_norad_id: u32,
    pub tca_datetime: String,
    #[serde(default)]
    pub miss_distance_meters: f64,
    #[serde(default)]
    pub probability: f64,
    #[serde(default)]
    pub relative_velocity_mps: f64,
    #[serde(default)]
    pub risk_level: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConjunctionEventsResponse {
    #[serde(default)]
    pub events: Vec<ConjunctionEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams, ToSchema)]
pub struct ConjunctionEventsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_back: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_probability: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl Default for ConjunctionEventsQuery {
    fn default() -> Self {
        Self {
            hours_back: Some(24),
            min_probability: Some(1e-6),
            limit: Some(50),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, ToSchema)]
pub struct ConjunctionsSummary {
    #[serde(default)]
    pub active_conjunctions: u64,
    #[serde(default)]
    pub total_events_24h: u64,
    #[serde(default)]
    pub high_risk_events: u64,
    #[serde(default)]
    pub events: Vec<ConjunctionEvent>,
}

/// Body of `POST /conjunctions/screen`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScreeningRequest {
    pub primary_norad_id: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_window_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screening_threshold_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_debris: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams, ToSchema)]
pub struct ManeuverQuery {
    pub norad_id: u32,
    #[serde(default = "default_days_back")]
    pub days_back: u32,
}

pub fn default_days_back() -> u32 {
    7
}
