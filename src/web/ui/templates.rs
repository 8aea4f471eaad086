use askama::Template;
use askama_web::WebTemplate;

use crate::api::CatalogEntry;
use crate::content::{
    Landing, ResourceSection, SecurityPractice, SitemapEntry, SpaceSystem, TeamMember, Technical,
    VisualHint, Whitepaper,
};
use crate::feeds::{IntelligenceBundle, MetricTile};
use crate::tracking::{Alert, Satellite};
use crate::web::view::ConjunctionRow;

/// Header strip shared by the console pages.
pub struct StatusBar {
    pub station: String,
    pub health: &'static str,
    /// Set while the tracking feed shows data from an earlier tick.
    pub stale: bool,
    pub last_error: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "landing.html")]
pub struct LandingTemplate {
    pub landing: Landing,
    pub featured: Vec<SpaceSystem>,
}

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub status: StatusBar,
    pub loading: bool,
    pub tiles: Vec<MetricTile>,
    pub metrics_badge: Option<&'static str>,
    pub alerts: Vec<Alert>,
    pub satellites: Vec<Satellite>,
    pub search: String,
    pub object_type: String,
    pub conjunctions: Vec<ConjunctionRow>,
    pub conjunctions_badge: Option<&'static str>,
}

pub struct PageLinkView {
    pub label: String,
    /// `None` for the gap marker.
    pub href: Option<String>,
    pub current: bool,
}

pub struct PageSizeOption {
    pub value: usize,
    pub selected: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "catalog.html")]
pub struct CatalogTemplate {
    pub search: String,
    pub object_type: String,
    pub page_sizes: Vec<PageSizeOption>,
    pub entries: Vec<CatalogEntry>,
    pub total: usize,
    pub first: usize,
    pub last: usize,
    pub previous_href: Option<String>,
    pub next_href: Option<String>,
    pub links: Vec<PageLinkView>,
    pub export_href: String,
    /// Why the catalog could not be fetched, if it could not.
    pub unavailable: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "team.html")]
pub struct TeamTemplate {
    pub members: Vec<TeamMember>,
}

#[derive(Template, WebTemplate)]
#[template(path = "resources.html")]
pub struct ResourcesTemplate {
    pub sections: Vec<ResourceSection>,
}

#[derive(Template, WebTemplate)]
#[template(path = "resource_section.html")]
pub struct ResourceSectionTemplate {
    pub section: ResourceSection,
}

#[derive(Template, WebTemplate)]
#[template(path = "whitepaper.html")]
pub struct WhitepaperTemplate {
    pub paper: Whitepaper,
}

#[derive(Template, WebTemplate)]
#[template(path = "technical.html")]
pub struct TechnicalTemplate {
    pub technical: Technical,
}

#[derive(Template, WebTemplate)]
#[template(path = "security.html")]
pub struct SecurityTemplate {
    pub practices: Vec<SecurityPractice>,
    pub intelligence: Option<IntelligenceBundle>,
    pub badge: Option<&'static str>,
}

pub struct StatusTab {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

pub struct ToolCard {
    pub system: SpaceSystem,
    pub hint: VisualHint,
    pub status_label: &'static str,
}

impl ToolCard {
    pub fn new(system: &SpaceSystem) -> Self {
        Self {
            hint: system.hint(),
            status_label: system.status.label(),
            system: system.clone(),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "tools.html")]
pub struct ToolsTemplate {
    pub tabs: Vec<StatusTab>,
    pub cards: Vec<ToolCard>,
}

#[derive(Template, WebTemplate)]
#[template(path = "tool_detail.html")]
pub struct ToolDetailTemplate {
    pub card: ToolCard,
}

#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub what: &'static str,
}

#[derive(Template)]
#[template(path = "sitemap.xml")]
pub struct SitemapTemplate {
    pub entries: Vec<SitemapEntry>,
}
