use chrono::{DateTime, SecondsFormat, Utc};

pub const DEFAULT_SITE_URL: &str = "https://www.cryptik.tech";

/// Public routes listed in `sitemap.xml`, home page first.
pub const PUBLIC_ROUTES: [&str; 11] = [
    "",
    "/dashboard",
    "/technical",
    "/team",
    "/security",
    "/catalog",
    "/resources",
    "/resources/blog",
    "/resources/white-papers",
    "/resources/use-cases",
    "/resources/knowledge-base",
];

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: String,
    pub change_frequency: &'static str,
    pub priority: &'static str,
}

pub fn sitemap_entries(base_url: &str, now: DateTime<Utc>) -> Vec<SitemapEntry> {
    let base = base_url.trim_end_matches('/');
    let last_modified = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    PUBLIC_ROUTES
        .iter()
        .map(|route| SitemapEntry {
            url: format!("{}{}", base, route),
            last_modified: last_modified.clone(),
            change_frequency: "daily",
            priority: if route.is_empty() { "1.0" } else { "0.8" },
        })
        .collect()
}
