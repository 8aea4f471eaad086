//! Data behind the dashboard's 3D globe.

mod geometry;

pub use geometry::{earth_geometry, Polyline, Surface};

use serde::Serialize;
use utoipa::ToSchema;

use crate::tracking::{RiskLevel, Satellite};

#[derive(Debug, Default, PartialEq)]
pub struct RiskBuckets<'a> {
    pub nominal: Vec<&'a Satellite>,
    pub warning: Vec<&'a Satellite>,
}

/// Splits satellites for colouring. A satellite without a risk label counts
/// as nominal; warning and critical share the warning bucket.
pub fn bucket_by_risk(satellites: &[Satellite]) -> RiskBuckets<'_> {
    let mut buckets = RiskBuckets::default();
    for sat in satellites {
        match sat.risk {
            None | Some(RiskLevel::Nominal) => buckets.nominal.push(sat),
            Some(RiskLevel::Warning) | Some(RiskLevel::Critical) => buckets.warning.push(sat),
        }
    }
    buckets
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MarkerStyle {
    pub size: u32,
    pub color: &'static str,
    pub symbol: &'static str,
    pub opacity: f64,
}

const NOMINAL_STYLE: MarkerStyle = MarkerStyle {
    size: 3,
    color: "#00ff41",
    symbol: "circle",
    opacity: 0.8,
};

const WARNING_STYLE: MarkerStyle = MarkerStyle {
    size: 5,
    color: "#ff0000",
    symbol: "diamond",
    opacity: 1.0,
};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MarkerTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub marker: MarkerStyle,
    pub text: Vec<String>,
}

impl MarkerTrace {
    fn build(
        sats: &[&Satellite],
        marker: MarkerStyle,
        label: impl Fn(&Satellite) -> String,
    ) -> Self {
        Self {
            x: sats.iter().map(|s| s.x.unwrap_or(0.0)).collect(),
            y: sats.iter().map(|s| s.y.unwrap_or(0.0)).collect(),
            z: sats.iter().map(|s| s.z.unwrap_or(0.0)).collect(),
            marker,
            text: sats.iter().map(|&s| label(s)).collect(),
        }
    }
}

/// One trace per non-empty bucket, nominal first.
pub fn satellite_traces(satellites: &[Satellite]) -> Vec<MarkerTrace> {
    let buckets = bucket_by_risk(satellites);
    let mut traces = Vec::with_capacity(2);
    if !buckets.nominal.is_empty() {
        traces.push(MarkerTrace::build(&buckets.nominal, NOMINAL_STYLE, |s| {
            format!("{} (NORAD: {})", s.name, s.norad_id)
        }));
    }
    if !buckets.warning.is_empty() {
        traces.push(MarkerTrace::build(&buckets.warning, WARNING_STYLE, |s| {
            format!("WARNING: {}", s.name)
        }));
    }
    traces
}

/// Everything the plotting script needs for one frame.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GlobeScene {
    #[schema(value_type = Surface)]
    pub surface: &'static Surface,
    #[schema(value_type = Vec<Polyline>)]
    pub meridians: &'static [Polyline],
    pub satellites: Vec<MarkerTrace>,
}

impl GlobeScene {
    pub fn new(satellites: &[Satellite]) -> Self {
        let earth = earth_geometry();
        Self {
            surface: &earth.surface,
            meridians: &earth.meridians,
            satellites: satellite_traces(satellites),
        }
    }
}
