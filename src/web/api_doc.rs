use utoipa::OpenApi;

use super::api::catalog::CatalogPageResponse;
use super::api::error::ErrorResponse;
use super::api::feeds::{ConjunctionsResponse, IntelligenceResponse, MetricsResponse};
use super::api::tracking::{HealthResponse, SatellitesResponse};
use super::view::{ConjunctionRow, FeedMeta};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::tracking::health,
        super::api::tracking::tracking,
        super::api::tracking::globe,
        super::api::tracking::satellites,
        super::api::feeds::conjunctions,
        super::api::feeds::intelligence,
        super::api::feeds::metrics,
        super::api::catalog::catalog,
        super::api::catalog::statistics,
        super::api::operations::screen,
        super::api::operations::latest_tle,
        super::api::operations::detect_maneuvers,
        super::api::tools::list_tools,
        super::api::tools::get_tool,
    ),
    components(
        schemas(
            HealthResponse,
            SatellitesResponse,
            ConjunctionsResponse,
            IntelligenceResponse,
            MetricsResponse,
            CatalogPageResponse,
            ErrorResponse,
            FeedMeta,
            ConjunctionRow,
            crate::feeds::FeedStatus,
            crate::feeds::IntelligenceBundle,
            crate::feeds::MetricTile,
            crate::catalog::PageLink,
            crate::globe::GlobeScene,
            crate::globe::Surface,
            crate::globe::Polyline,
            crate::globe::MarkerTrace,
            crate::tracking::TrackingSnapshot,
            crate::tracking::Satellite,
            crate::tracking::Alert,
            crate::tracking::RiskLevel,
            crate::tracking::Severity,
            crate::tracking::SystemHealth,
            crate::api::CatalogEntry,
            crate::api::ConjunctionEvent,
            crate::api::ScreeningRequest,
            crate::api::ManeuverQuery,
            crate::api::PriorityTarget,
            crate::content::SpaceSystem,
            crate::content::DevelopmentStatus,
            crate::content::VisualKind,
        )
    ),
    info(
        title = "Cryptik Console API",
        description = "Polled console feeds plus pass-through operations on the SDA backend",
        version = "0.1.0"
    ),
    tags(
        (name = "tracking", description = "Live positions, alerts and the globe scene"),
        (name = "feeds", description = "Independently polled dashboard widgets"),
        (name = "catalog", description = "Institutional catalog browsing"),
        (name = "operations", description = "Screening, TLE lookup and maneuver detection"),
        (name = "tools", description = "Tools catalog")
    )
)]
pub struct ApiDoc;
