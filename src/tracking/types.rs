use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, IntoStaticStr};
use utoipa::ToSchema;

use crate::api::{AlertRecord, CatalogSatellite, PositionRecord, SystemStatus};

/// Stand-in speed when the positions feed does not report one (km/s).
pub const DEFAULT_VELOCITY_KM_S: f64 = 7.6;
pub const DEFAULT_OBJECT_TYPE: &str = "LEO";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[derive(Display, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RiskLevel {
    Nominal,
    Warning,
    Critical,
}

impl RiskLevel {
    /// Unrecognised labels read as absent.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "nominal" => Some(RiskLevel::Nominal),
            "warning" => Some(RiskLevel::Warning),
            "critical" => Some(RiskLevel::Critical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[derive(Display, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "critical" => Severity::Critical,
            "high" => Severity::High,
            "medium" => Severity::Medium,
            _ => Severity::Low,
        }
    }
}

/// Tri-state health shown in the console header.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SystemHealth {
    Operational,
    Warning,
    Degraded,
}

impl SystemHealth {
    pub fn from_status(status: &SystemStatus) -> Self {
        if status.is_operational() {
            SystemHealth::Operational
        } else {
            SystemHealth::Warning
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Satellite {
    pub norad_id: u32,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
    pub velocity: f64,
    #[serde(rename = "type")]
    pub object_type: String,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub risk: Option<RiskLevel>,
    pub last_updated: DateTime<Utc>,
}

impl Satellite {
    pub fn from_position(record: PositionRecord, received_at: DateTime<Utc>) -> Self {
        Self {
            norad_id: record.norad_id,
            name: record.name,
            lat: record.lat,
            lon: record.lon,
            alt: record.alt,
            velocity: record.velocity.unwrap_or(DEFAULT_VELOCITY_KM_S),
            object_type: record
                .object_type
                .unwrap_or_else(|| DEFAULT_OBJECT_TYPE.to_string()),
            x: record.x,
            y: record.y,
            z: record.z,
            risk: record.risk.as_deref().and_then(RiskLevel::parse),
            last_updated: received_at,
        }
    }

    pub fn from_catalog(record: CatalogSatellite, received_at: DateTime<Utc>) -> Self {
        let last_updated = record
            .last_updated
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(received_at);
        Self {
            norad_id: record.norad_id,
            name: record.name,
            lat: record.lat,
            lon: record.lon,
            alt: record.alt,
            velocity: record.velocity,
            object_type: record.object_type,
            x: record.x,
            y: record.y,
            z: record.z,
            risk: record.risk.as_deref().and_then(RiskLevel::parse),
            last_updated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Alert {
    pub id: String,
    pub severity: Severity,
    pub message: String,
    pub timestamp: String,
}

impl Alert {
    pub fn from_record(record: AlertRecord) -> Self {
        let id = match &record.id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let norad = |id: Option<u32>| id.map(|n| n.to_string()).unwrap_or_else(|| "?".into());
        Self {
            id,
            severity: Severity::parse(&record.severity),
            message: format!(
                "{}: {} vs {}",
                record.alert_type.to_uppercase(),
                norad(record.primary_norad_id),
                norad(record.secondary_norad_id)
            ),
            timestamp: record.generated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn position_defaults_fill_missing_fields() {
        let record: PositionRecord = serde_json::from_value(json!({
            "norad_id": 25544, "name": "ISS", "lat": 1.0, "lon": 2.0, "alt": 410.0,
            "x": 100.0, "risk": "WARNING"
        }))
        .unwrap();
        let now = Utc::now();
        let sat = Satellite::from_position(record, now);

        assert_eq!(sat.velocity, DEFAULT_VELOCITY_KM_S);
        assert_eq!(sat.object_type, "LEO");
        assert_eq!(sat.x, Some(100.0));
        assert_eq!(sat.y, None);
        assert_eq!(sat.risk, Some(RiskLevel::Warning));
        assert_eq!(sat.last_updated, now);
    }

    #[test]
    fn unknown_risk_reads_as_absent() {
        assert_eq!(RiskLevel::parse("elevated"), None);
        assert_eq!(RiskLevel::parse(" Critical "), Some(RiskLevel::Critical));
    }

    #[test]
    fn alert_message_is_built_from_type_and_objects() {
        let record: AlertRecord = serde_json::from_value(json!({
            "id": 17, "severity": "HIGH", "alert_type": "conjunction",
            "primary_norad_id": 25544, "secondary_norad_id": 12345,
            "generated_at": "2026-10-18T10:00:00Z"
        }))
        .unwrap();
        let alert = Alert::from_record(record);

        assert_eq!(alert.id, "17");
        assert_eq!(alert.severity, Severity::High);
        assert_eq!(alert.message, "CONJUNCTION: 25544 vs 12345");
        assert_eq!(alert.timestamp, "2026-10-18T10:00:00Z");
    }

    #[test]
    fn health_follows_backend_status() {
        let ok = SystemStatus {
            system_status: "operational".into(),
            active_satellites: None,
        };
        let maint = SystemStatus {
            system_status: "maintenance".into(),
            active_satellites: None,
        };
        assert_eq!(SystemHealth::from_status(&ok), SystemHealth::Operational);
        assert_eq!(SystemHealth::from_status(&maint), SystemHealth::Warning);
        assert_eq!(SystemHealth::Degraded.to_string(), "degraded");
    }
}
