//! Static site content. The text lives in YAML next to this module and is
//! compiled into the binary; it is parsed once at startup.

mod pages;
mod sitemap;
mod tools;

pub use pages::*;
pub use sitemap::{sitemap_entries, SitemapEntry, DEFAULT_SITE_URL};
pub use tools::{DevelopmentStatus, SpaceSystem, VisualHint, VisualKind};

use thiserror::Error;

const SYSTEMS_YAML: &str = include_str!("systems.yaml");
const PAGES_YAML: &str = include_str!("pages.yaml");

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("invalid tools catalog: {0}")]
    Systems(#[source] serde_yaml::Error),
    #[error("invalid page content: {0}")]
    Pages(#[source] serde_yaml::Error),
}

#[derive(Debug, Clone)]
pub struct Content {
    pub systems: Vec<SpaceSystem>,
    pub pages: Pages,
}

impl Content {
    pub fn load() -> Result<Self, ContentError> {
        let systems = serde_yaml::from_str(SYSTEMS_YAML).map_err(ContentError::Systems)?;
        let pages = serde_yaml::from_str(PAGES_YAML).map_err(ContentError::Pages)?;
        Ok(Self { systems, pages })
    }

    pub fn system(&self, id: &str) -> Option<&SpaceSystem> {
        self.systems.iter().find(|s| s.id == id)
    }

    pub fn systems_with_status(&self, status: Option<DevelopmentStatus>) -> Vec<&SpaceSystem> {
        self.systems
            .iter()
            .filter(|s| status.map_or(true, |wanted| s.status == wanted))
            .collect()
    }

    pub fn resource(&self, slug: &str) -> Option<&ResourceSection> {
        self.pages.resources.iter().find(|r| r.slug == slug)
    }
}
