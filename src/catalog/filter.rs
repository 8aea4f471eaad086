use serde::Deserialize;

use crate::api::CatalogEntry;
use crate::tracking::Satellite;

/// Anything that can appear in a catalog listing.
pub trait CatalogRecord {
    fn norad_id(&self) -> u32;
    fn display_name(&self) -> &str;
    fn object_type(&self) -> &str;
}

impl CatalogRecord for CatalogEntry {
    fn norad_id(&self) -> u32 {
        self.norad_id
    }

    fn display_name(&self) -> &str {
        &self.common_name
    }

    fn object_type(&self) -> &str {
        &self.object_type
    }
}

impl CatalogRecord for Satellite {
    fn norad_id(&self) -> u32 {
        self.norad_id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn object_type(&self) -> &str {
        &self.object_type
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default, rename = "type")]
    pub object_type: Option<String>,
}

impl CatalogFilter {
    pub fn new(search: impl Into<String>, object_type: Option<String>) -> Self {
        Self {
            search: search.into(),
            object_type,
        }
        .normalized()
    }

    /// Trims the search text and treats a blank type as no type filter.
    pub fn normalized(mut self) -> Self {
        self.search = self.search.trim().to_string();
        self.object_type = self
            .object_type
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.object_type.is_none()
    }

    pub fn matches<R: CatalogRecord + ?Sized>(&self, record: &R) -> bool {
        if let Some(wanted) = &self.object_type {
            if record.object_type() != wanted {
                return false;
            }
        }
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        record.display_name().to_lowercase().contains(&needle)
            || record.norad_id().to_string().contains(&self.search)
    }

    pub fn apply<'a, R: CatalogRecord>(&self, records: &'a [R]) -> Vec<&'a R> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(norad_id: u32, name: &str, object_type: &str) -> CatalogEntry {
        CatalogEntry {
            norad_id,
            common_name: name.into(),
            object_type: object_type.into(),
            inclination_deg: 51.6,
            apogee_km: 420.0,
            perigee_km: 410.0,
            period_minutes: 92.9,
            rcs_m2: 399.0,
            status: "ACTIVE".into(),
        }
    }

    fn catalog() -> Vec<CatalogEntry> {
        vec![
            entry(25544, "ISS (ZARYA)", "PAYLOAD"),
            entry(43013, "NOAA 20", "PAYLOAD"),
            entry(22285, "SL-16 R/B", "ROCKET BODY"),
            entry(35544, "FENGYUN 1C DEB", "DEBRIS"),
        ]
    }

    fn ids(records: Vec<&CatalogEntry>) -> Vec<u32> {
        records.iter().map(|r| r.norad_id).collect()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let all = catalog();
        assert_eq!(CatalogFilter::default().apply(&all).len(), all.len());
    }

    #[test]
    fn name_search_ignores_case() {
        let all = catalog();
        assert_eq!(ids(CatalogFilter::new("zarya", None).apply(&all)), vec![25544]);
        assert_eq!(ids(CatalogFilter::new("Noaa", None).apply(&all)), vec![43013]);
    }

    #[test]
    fn id_search_matches_substrings() {
        let all = catalog();
        assert_eq!(ids(CatalogFilter::new("5544", None).apply(&all)), vec![25544, 35544]);
    }

    #[test]
    fn type_must_match_exactly_when_set() {
        let all = catalog();
        let filter = CatalogFilter::new("", Some("DEBRIS".into()));
        assert_eq!(ids(filter.apply(&all)), vec![35544]);

        let both = CatalogFilter::new("5544", Some("PAYLOAD".into()));
        assert_eq!(ids(both.apply(&all)), vec![25544]);
    }

    #[test]
    fn blank_type_is_no_filter() {
        let filter = CatalogFilter::new("  ", Some(" ".into()));
        assert!(filter.is_empty());
    }

    #[test]
    fn result_is_exactly_the_matching_records() {
        let all = catalog();
        let filter = CatalogFilter::new("1", Some("PAYLOAD".into()));
        let kept = filter.apply(&all);
        for record in &all {
            let expected = record.object_type == "PAYLOAD"
                && (record.common_name.to_lowercase().contains('1')
                    || record.norad_id.to_string().contains('1'));
            assert_eq!(kept.iter().any(|k| k.norad_id == record.norad_id), expected);
        }
    }
}
