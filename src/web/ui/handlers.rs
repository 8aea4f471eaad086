use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;

use crate::catalog::{to_csv, CatalogFilter, PageLink, PageSize};
use crate::content::{sitemap_entries, DevelopmentStatus};
use crate::web::api::error::ApiResult;
use crate::web::api::feeds::current_tiles;
use crate::web::api::tracking::{dashboard_table, SatelliteQuery};
use crate::web::state::AppState;
use crate::web::view::{CatalogListing, CatalogQuery, ConjunctionRow, FeedMeta};

use super::templates::{
    CatalogTemplate, DashboardTemplate, LandingTemplate, NotFoundTemplate, PageLinkView,
    PageSizeOption, ResourceSectionTemplate, ResourcesTemplate, SecurityTemplate,
    SitemapTemplate, StatusBar, StatusTab, TeamTemplate, TechnicalTemplate, ToolCard,
    ToolDetailTemplate, ToolsTemplate, WhitepaperTemplate,
};

const FEATURED_TOOLS: usize = 3;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("failed to render page: {0}")]
    Render(#[from] askama::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound(what) => {
                (StatusCode::NOT_FOUND, NotFoundTemplate { what }).into_response()
            }
            PageError::Render(e) => {
                log::error!("Failed to render page: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page").into_response()
            }
        }
    }
}

fn status_bar(state: &AppState) -> StatusBar {
    let snapshot = state.tracking.snapshot();
    StatusBar {
        station: state.config.station.name.clone(),
        health: snapshot.system_status.into(),
        stale: snapshot.is_stale(),
        last_error: snapshot.last_error,
    }
}

/// Builds `path?k=v&...`, skipping empty values.
fn with_query(path: &str, pairs: &[(&str, String)]) -> String {
    let Ok(mut url) = Url::parse("http://console.local") else {
        return path.to_string();
    };
    url.set_path(path);
    let present: Vec<_> = pairs.iter().filter(|(_, v)| !v.is_empty()).collect();
    if !present.is_empty() {
        let mut query = url.query_pairs_mut();
        for (key, value) in present {
            query.append_pair(key, value);
        }
    }
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

fn filter_pairs(filter: &CatalogFilter) -> Vec<(&'static str, String)> {
    vec![
        ("search", filter.search.clone()),
        ("type", filter.object_type.clone().unwrap_or_default()),
    ]
}

fn catalog_href(filter: &CatalogFilter, page: usize, size: PageSize) -> String {
    let mut pairs = filter_pairs(filter);
    pairs.push(("page", page.to_string()));
    pairs.push(("per_page", size.value().to_string()));
    with_query("/catalog", &pairs)
}

pub async fn landing(State(state): State<AppState>) -> LandingTemplate {
    LandingTemplate {
        landing: state.content.pages.landing.clone(),
        featured: state
            .content
            .systems_with_status(Some(DevelopmentStatus::Active))
            .into_iter()
            .take(FEATURED_TOOLS)
            .cloned()
            .collect(),
    }
}

pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<SatelliteQuery>,
) -> DashboardTemplate {
    let filter = CatalogFilter::new(query.search.unwrap_or_default(), query.object_type);
    let snapshot = state.tracking.snapshot();
    let (metrics_feed, tiles) = current_tiles(&state);
    let conjunctions = state.feeds.conjunctions.state();
    let conjunctions_badge = FeedMeta::of(&conjunctions).badge();

    DashboardTemplate {
        status: status_bar(&state),
        loading: snapshot.is_loading,
        tiles,
        metrics_badge: metrics_feed.badge(),
        alerts: snapshot.alerts,
        satellites: dashboard_table(&state, &filter),
        search: filter.search.clone(),
        object_type: filter.object_type.clone().unwrap_or_default(),
        conjunctions: conjunctions
            .data
            .unwrap_or_default()
            .into_iter()
            .map(ConjunctionRow::from)
            .collect(),
        conjunctions_badge,
    }
}

pub async fn catalog(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> CatalogTemplate {
    let view = query.view();
    let filter = view.filter().clone();
    let size = view.page_size();
    let page_sizes = PageSize::ALL
        .into_iter()
        .map(|s| PageSizeOption {
            value: s.value(),
            selected: s == size,
        })
        .collect();
    let export_href = with_query("/catalog/export.csv", &filter_pairs(&filter));

    let listing = match CatalogListing::fetch(&state.client, view).await {
        Ok(listing) => listing,
        Err(e) => {
            log::error!("Catalog fetch failed: {}", e);
            return CatalogTemplate {
                search: filter.search.clone(),
                object_type: filter.object_type.clone().unwrap_or_default(),
                page_sizes,
                entries: Vec::new(),
                total: 0,
                first: 0,
                last: 0,
                previous_href: None,
                next_href: None,
                links: Vec::new(),
                export_href,
                unavailable: Some(e.to_string()),
            };
        }
    };

    let page = listing.page();
    let links = listing
        .links()
        .into_iter()
        .map(|link| match link {
            PageLink::Number(n) => PageLinkView {
                label: n.to_string(),
                href: Some(catalog_href(&filter, n, size)),
                current: n == page.page,
            },
            PageLink::Ellipsis => PageLinkView {
                label: "…".to_string(),
                href: None,
                current: false,
            },
        })
        .collect();

    CatalogTemplate {
        search: filter.search.clone(),
        object_type: filter.object_type.clone().unwrap_or_default(),
        page_sizes,
        entries: page.items.to_vec(),
        total: page.total,
        first: page.first,
        last: page.last,
        previous_href: page
            .has_previous()
            .then(|| catalog_href(&filter, page.page - 1, size)),
        next_href: page
            .has_next()
            .then(|| catalog_href(&filter, page.page + 1, size)),
        links,
        export_href,
        unavailable: None,
    }
}

/// The filtered catalog as CSV, every page at once.
pub async fn export_catalog(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> ApiResult<Response> {
    let listing = CatalogListing::fetch(&state.client, query.view()).await?;
    let body = to_csv(&listing.entries)?;
    let filename = format!("cryptik-catalog-{}.csv", Utc::now().format("%Y%m%d"));
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
        .into_response())
}

pub async fn team(State(state): State<AppState>) -> TeamTemplate {
    TeamTemplate {
        members: state.content.pages.team.clone(),
    }
}

pub async fn resources(State(state): State<AppState>) -> ResourcesTemplate {
    ResourcesTemplate {
        sections: state.content.pages.resources.clone(),
    }
}

pub async fn resource_section(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ResourceSectionTemplate, PageError> {
    let section = state
        .content
        .resource(&slug)
        .ok_or(PageError::NotFound("resource section"))?;
    Ok(ResourceSectionTemplate {
        section: section.clone(),
    })
}

pub async fn whitepaper(State(state): State<AppState>) -> WhitepaperTemplate {
    WhitepaperTemplate {
        paper: state.content.pages.whitepaper.clone(),
    }
}

pub async fn technical(State(state): State<AppState>) -> TechnicalTemplate {
    TechnicalTemplate {
        technical: state.content.pages.technical.clone(),
    }
}

pub async fn security(State(state): State<AppState>) -> SecurityTemplate {
    let feed = state.feeds.intelligence.state();
    SecurityTemplate {
        practices: state.content.pages.security.clone(),
        badge: FeedMeta::of(&feed).badge(),
        intelligence: feed.data,
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ToolsQuery {
    pub status: Option<String>,
}

pub async fn tools(
    State(state): State<AppState>,
    Query(query): Query<ToolsQuery>,
) -> ToolsTemplate {
    let selected = query.status.as_deref().and_then(DevelopmentStatus::parse);

    let mut tabs = vec![StatusTab {
        label: "All",
        href: "/tools".to_string(),
        active: selected.is_none(),
    }];
    tabs.extend(DevelopmentStatus::ALL.into_iter().map(|status| StatusTab {
        label: status.label(),
        href: with_query("/tools", &[("status", status.to_string())]),
        active: selected == Some(status),
    }));

    ToolsTemplate {
        tabs,
        cards: state
            .content
            .systems_with_status(selected)
            .into_iter()
            .map(ToolCard::new)
            .collect(),
    }
}

pub async fn tool_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ToolDetailTemplate, PageError> {
    let system = state.content.system(&id).ok_or(PageError::NotFound("tool"))?;
    Ok(ToolDetailTemplate {
        card: ToolCard::new(system),
    })
}

pub async fn sitemap(State(state): State<AppState>) -> Result<Response, PageError> {
    let body = SitemapTemplate {
        entries: sitemap_entries(&state.config.web.site_url, Utc::now()),
    }
    .render()?;
    Ok(([(header::CONTENT_TYPE, "application/xml")], body).into_response())
}
