use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::filter::CatalogFilter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageSize {
    Ten,
    #[default]
    TwentyFive,
    Fifty,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::Ten, PageSize::TwentyFive, PageSize::Fifty];

    /// Unsupported sizes fall back to the default.
    pub fn from_value(value: usize) -> Self {
        match value {
            10 => PageSize::Ten,
            50 => PageSize::Fifty,
            _ => PageSize::TwentyFive,
        }
    }

    pub fn value(self) -> usize {
        match self {
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = usize::deserialize(deserializer)?;
        Ok(PageSize::from_value(value))
    }
}

/// What the catalog page is currently showing. Any change to what is listed
/// sends the reader back to page 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogView {
    filter: CatalogFilter,
    page: usize,
    page_size: PageSize,
}

impl CatalogView {
    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
        self.filter = std::mem::take(&mut self.filter).normalized();
        self.page = 1;
    }

    pub fn set_type(&mut self, object_type: Option<String>) {
        self.filter.object_type = object_type;
        self.filter = std::mem::take(&mut self.filter).normalized();
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
    /// 1-based index of the first item shown, 0 when there is none.
    pub first: usize,
    pub last: usize,
}

impl<T> Page<'_, T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}

pub fn page_count(total: usize, size: PageSize) -> usize {
    total.div_ceil(size.value())
}

/// Slices out one page, clamping `page` into `1..=max(page_count, 1)`.
pub fn paginate<T>(items: &[T], page: usize, size: PageSize) -> Page<'_, T> {
    let total = items.len();
    let pages = page_count(total, size);
    let page = page.clamp(1, pages.max(1));
    let start = ((page - 1) * size.value()).min(total);
    let end = (start + size.value()).min(total);

    Page {
        items: &items[start..end],
        page,
        page_count: pages,
        total,
        first: if start < end { start + 1 } else { 0 },
        last: end,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PageLink {
    Number(usize),
    Ellipsis,
}

/// Page numbers to offer. Long ranges keep the first and last page and the
/// neighbours of the current one, with `…` for the gaps.
pub fn page_links(current: usize, total: usize) -> Vec<PageLink> {
    if total <= 7 {
        return (1..=total).map(PageLink::Number).collect();
    }

    let current = current.clamp(1, total);
    let mut links = vec![PageLink::Number(1)];
    if current > 3 {
        links.push(PageLink::Ellipsis);
    }
    let from = current.saturating_sub(1).max(2);
    let to = (current + 1).min(total - 1);
    links.extend((from..=to).map(PageLink::Number));
    if current < total - 2 {
        links.push(PageLink::Ellipsis);
    }
    links.push(PageLink::Number(total));
    links
}
