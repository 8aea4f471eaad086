//! Shapes shared by the HTML pages and the JSON API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::{ApiClient, CatalogEntry, ClientError, ConjunctionEvent, InstitutionalCatalogQuery};
use crate::catalog::{page_links, paginate, CatalogView, Page, PageLink, PageSize, FETCH_LIMIT};
use crate::feeds::{format_distance, format_probability, format_risk, FeedState, FeedStatus};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FeedMeta {
    pub status: FeedStatus,
    /// True when the data shown is canned demonstration data.
    pub demonstration: bool,
    pub last_success: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

impl FeedMeta {
    pub fn of<T>(state: &FeedState<T>) -> Self {
        Self {
            status: state.status,
            demonstration: state.status == FeedStatus::Demonstration,
            last_success: state.last_success,
            last_error: state.last_error.clone(),
        }
    }

    pub fn badge(&self) -> Option<&'static str> {
        match self.status {
            FeedStatus::Live => None,
            FeedStatus::Loading => Some("loading"),
            FeedStatus::Stale => Some("stale"),
            FeedStatus::Unavailable => Some("unavailable"),
            FeedStatus::Demonstration => Some("demonstration data"),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConjunctionRow {
    #[serde(flatten)]
    pub event: ConjunctionEvent,
    pub distance_label: String,
    pub probability_label: String,
    pub risk_label: String,
}

impl From<ConjunctionEvent> for ConjunctionRow {
    fn from(event: ConjunctionEvent) -> Self {
        Self {
            distance_label: format_distance(event.miss_distance_meters),
            probability_label: format_probability(event.probability),
            risk_label: format_risk(&event.risk_level),
            event,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogQuery {
    /// Case-insensitive name or NORAD id fragment.
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub object_type: Option<String>,
    pub page: Option<usize>,
    /// 10, 25 or 50; anything else means 25.
    pub per_page: Option<usize>,
}

impl CatalogQuery {
    pub fn view(&self) -> CatalogView {
        let mut view = CatalogView::default();
        view.set_search(self.search.clone().unwrap_or_default());
        view.set_type(self.object_type.clone());
        view.set_page_size(self.per_page.map(PageSize::from_value).unwrap_or_default());
        view.set_page(self.page.unwrap_or(1));
        view
    }
}

/// Institutional catalog rows after the local filter, before paging.
pub struct CatalogListing {
    pub view: CatalogView,
    pub entries: Vec<CatalogEntry>,
}

impl CatalogListing {
    pub async fn fetch(client: &ApiClient, view: CatalogView) -> Result<Self, ClientError> {
        let filter = view.filter();
        let query = InstitutionalCatalogQuery {
            search: Some(filter.search.clone()).filter(|s| !s.is_empty()),
            type_filter: filter.object_type.clone(),
            limit: Some(FETCH_LIMIT),
        };
        let fetched = client.institutional_catalog(&query).await?;
        let entries = fetched.into_iter().filter(|e| filter.matches(e)).collect();
        Ok(Self { view, entries })
    }

    pub fn page(&self) -> Page<'_, CatalogEntry> {
        paginate(&self.entries, self.view.page(), self.view.page_size())
    }

    pub fn links(&self) -> Vec<PageLink> {
        let page = self.page();
        page_links(page.page, page.page_count)
    }
}
