mod export;
mod filter;
mod merge;
mod paginate;

pub use export::to_csv;
pub use filter::CatalogFilter;
pub use merge::merge_positions;
pub use paginate::{page_links, paginate, CatalogView, Page, PageLink, PageSize};

/// Rows requested from the institutional catalog per page load.
pub const FETCH_LIMIT: u32 = 1000;
