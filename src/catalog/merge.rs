use std::collections::HashMap;

use crate::tracking::Satellite;

/// Dashboard table rows: catalog order first, a position record replacing the
/// catalog record with the same NORAD id, then objects only the positions
/// feed knows about in feed order.
pub fn merge_positions(catalog: &[Satellite], positions: &[Satellite]) -> Vec<Satellite> {
    let mut merged: Vec<Satellite> = Vec::with_capacity(catalog.len() + positions.len());
    let mut index: HashMap<u32, usize> = HashMap::new();

    for sat in catalog.iter().chain(positions) {
        match index.get(&sat.norad_id) {
            Some(&at) => merged[at] = sat.clone(),
            None => {
                index.insert(sat.norad_id, merged.len());
                merged.push(sat.clone());
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sat(norad_id: u32, name: &str, alt: f64) -> Satellite {
        Satellite {
            norad_id,
            name: name.into(),
            lat: 0.0,
            lon: 0.0,
            alt,
            velocity: 7.6,
            object_type: "PAYLOAD".into(),
            x: None,
            y: None,
            z: None,
            risk: None,
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn positions_override_catalog_and_new_objects_are_appended() {
        let catalog = vec![sat(1, "A", 500.0), sat(2, "B", 600.0), sat(3, "C", 700.0)];
        let positions = vec![sat(4, "D", 800.0), sat(2, "B", 612.5)];

        let merged = merge_positions(&catalog, &positions);
        let ids: Vec<u32> = merged.iter().map(|s| s.norad_id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(merged[1].alt, 612.5);
    }

    #[test]
    fn no_object_appears_twice() {
        let catalog = vec![sat(1, "A", 1.0), sat(1, "A", 2.0)];
        let positions = vec![sat(1, "A", 3.0), sat(1, "A", 4.0)];
        let merged = merge_positions(&catalog, &positions);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].alt, 4.0);
    }

    #[test]
    fn either_side_may_be_empty() {
        let only = vec![sat(9, "Z", 1.0)];
        assert_eq!(merge_positions(&[], &only), only);
        assert_eq!(merge_positions(&only, &[]), only);
    }
}
