use serde::{Deserialize, Serialize};
use strum_macros::Display;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DevelopmentStatus {
    Active,
    InDevelopment,
    Beta,
}

impl DevelopmentStatus {
    pub const ALL: [DevelopmentStatus; 3] = [
        DevelopmentStatus::Active,
        DevelopmentStatus::InDevelopment,
        DevelopmentStatus::Beta,
    ];

    /// Matches the snake_case name used in query strings.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.to_string() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            DevelopmentStatus::Active => "Active",
            DevelopmentStatus::InDevelopment => "In Development",
            DevelopmentStatus::Beta => "Beta",
        }
    }
}

/// Which illustration a system card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VisualKind {
    Orb,
    Network,
    Grid,
    Chart,
    Alert,
    Pipeline,
    Pde,
    Satellite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisualHint {
    /// CSS modifier applied to the visual container.
    pub class: &'static str,
    pub caption: &'static str,
}

impl VisualKind {
    pub fn render_hint(self) -> VisualHint {
        let (class, caption) = match self {
            VisualKind::Orb => ("visual-orb", "ORBITAL MODEL"),
            VisualKind::Network => ("visual-network", "NEURAL MESH"),
            VisualKind::Grid => ("visual-grid", "TRACKING GRID"),
            VisualKind::Chart => ("visual-chart", "RISK DISTRIBUTION"),
            VisualKind::Alert => ("visual-alert", "THREAT VECTOR"),
            VisualKind::Pipeline => ("visual-pipeline", "DATA FLOW"),
            VisualKind::Pde => ("visual-pde", "FIELD SOLUTION"),
            VisualKind::Satellite => ("visual-satellite", "IMAGERY FEED"),
        };
        VisualHint { class, caption }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct SystemMetric {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct SystemFeature {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct SpaceSystem {
    pub id: String,
    pub title: String,
    pub tagline: String,
    pub status: DevelopmentStatus,
    pub visual: VisualKind,
    pub metrics: Vec<SystemMetric>,
    pub features: Vec<SystemFeature>,
}

impl SpaceSystem {
    pub fn hint(&self) -> VisualHint {
        self.visual.render_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_distinct_hint() {
        let kinds = [
            VisualKind::Orb,
            VisualKind::Network,
            VisualKind::Grid,
            VisualKind::Chart,
            VisualKind::Alert,
            VisualKind::Pipeline,
            VisualKind::Pde,
            VisualKind::Satellite,
        ];
        let mut classes: Vec<&str> = kinds.iter().map(|k| k.render_hint().class).collect();
        classes.sort();
        classes.dedup();
        assert_eq!(classes.len(), kinds.len());
        assert_eq!(VisualKind::Pde.render_hint().class, "visual-pde");
    }

    #[test]
    fn unknown_visual_tag_is_rejected_when_loading() {
        let yaml = "id: x\ntitle: X\ntagline: t\nstatus: active\nvisual: hologram\nmetrics: []\nfeatures: []\n";
        assert!(serde_yaml::from_str::<SpaceSystem>(yaml).is_err());
    }

    #[test]
    fn status_parses_from_query_values() {
        assert_eq!(
            DevelopmentStatus::parse("in_development"),
            Some(DevelopmentStatus::InDevelopment)
        );
        assert_eq!(DevelopmentStatus::parse("retired"), None);
        assert_eq!(DevelopmentStatus::InDevelopment.label(), "In Development");
    }
}
