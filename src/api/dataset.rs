//! Bundled fallback dataset
//!
//! A small static catalogue compiled into the binary. Used when no API
//! credential is configured, so search keeps working offline with
//! reduced coverage. Record ids are negative to stay clear of any
//! provider id space.

use super::records::PlantRecord;
use std::sync::OnceLock;

const BUNDLED_JSON: &str = include_str!("../../data/plants.json");

fn bundled() -> &'static [PlantRecord] {
    static DATASET: OnceLock<Vec<PlantRecord>> = OnceLock::new();
    DATASET.get_or_init(|| {
        // The dataset ships inside the binary; a parse failure is a
        // build defect, caught by tests, not a runtime condition.
        serde_json::from_str(BUNDLED_JSON).unwrap_or_else(|e| {
            tracing::error!("Bundled dataset is invalid: {}", e);
            Vec::new()
        })
    })
}

/// Filter the bundled catalogue by case-insensitive substring match on
/// either name field. Never touches the network, never fails.
pub fn search(query: &str) -> Vec<PlantRecord> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    bundled()
        .iter()
        .filter(|record| record.matches(query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_dataset_parses() {
        assert!(!bundled().is_empty());
        assert!(bundled().iter().all(|r| r.id < 0));
    }

    #[test]
    fn test_search_matches_common_and_scientific_names() {
        let by_common = search("snake");
        assert_eq!(by_common.len(), 1);
        assert_eq!(by_common[0].common_name.as_deref(), Some("Snake Plant"));

        let by_scientific = search("ficus");
        assert_eq!(by_scientific.len(), 2);
    }

    #[test]
    fn test_search_empty_query_returns_nothing() {
        assert!(search("").is_empty());
        assert!(search("   ").is_empty());
    }

    #[test]
    fn test_search_no_match() {
        assert!(search("triffid").is_empty());
    }
}
