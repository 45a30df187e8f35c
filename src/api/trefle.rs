//! Trefle response shapes
//!
//! <https://trefle.io/api/v1/plants/search> and `/api/v1/plants/{id}`.
//! Trefle already returns flat records; normalization is mostly type
//! coercion (numeric year, boolean edible/vegetable).

use super::records::PlantRecord;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub data: Vec<TreflePlant>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailResponse {
    pub data: Option<TreflePlant>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TreflePlant {
    pub id: i64,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub family_common_name: Option<String>,
    #[serde(default)]
    pub genus: Option<String>,
    #[serde(default)]
    pub year: Option<i64>,
    #[serde(default)]
    pub bibliography: Option<String>,
    #[serde(default)]
    pub growth_habit: Option<String>,
    #[serde(default)]
    pub days_to_harvest: Option<f64>,
    #[serde(default)]
    pub light: Option<i64>,
    #[serde(default)]
    pub edible: Option<bool>,
    #[serde(default)]
    pub vegetable: Option<bool>,
}

fn yes_no(flag: bool) -> String {
    if flag { "Yes" } else { "No" }.to_string()
}

impl From<TreflePlant> for PlantRecord {
    fn from(p: TreflePlant) -> Self {
        PlantRecord {
            id: p.id,
            common_name: p.common_name,
            scientific_name: p.scientific_name,
            image_url: p.image_url,
            family: p.family_common_name.or(p.family),
            genus: p.genus,
            year: p.year.map(|y| y.to_string()),
            bibliography: p.bibliography,
            growth_habit: p.growth_habit,
            days_to_harvest: p.days_to_harvest.map(|d| d.to_string()),
            light: p.light.map(|l| l.to_string()),
            edible: p.edible.map(yes_no),
            vegetable: p.vegetable.map(yes_no),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_normalizes() {
        let body = r#"
        {
            "data": [
                {
                    "id": 266004,
                    "common_name": "Beach strawberry",
                    "scientific_name": "Fragaria chiloensis",
                    "image_url": "https://example.com/fragaria.jpg",
                    "family": "Rosaceae",
                    "year": 1768,
                    "bibliography": "Mill., Gard. Dict. ed. 8"
                }
            ]
        }"#;

        let parsed: SearchResponse = serde_json::from_str(body).unwrap();
        let record: PlantRecord = parsed.data.into_iter().next().unwrap().into();

        assert_eq!(record.id, 266004);
        assert_eq!(record.common_name.as_deref(), Some("Beach strawberry"));
        assert_eq!(record.year.as_deref(), Some("1768"));
        assert_eq!(record.family.as_deref(), Some("Rosaceae"));
    }

    #[test]
    fn test_detail_flags_become_text() {
        let body = r#"
        {
            "data": {
                "id": 1,
                "common_name": "Carrot",
                "edible": true,
                "vegetable": true,
                "days_to_harvest": 70.0,
                "light": 8
            }
        }"#;

        let parsed: DetailResponse = serde_json::from_str(body).unwrap();
        let record: PlantRecord = parsed.data.unwrap().into();

        assert_eq!(record.edible.as_deref(), Some("Yes"));
        assert_eq!(record.vegetable.as_deref(), Some("Yes"));
        assert_eq!(record.days_to_harvest.as_deref(), Some("70"));
        assert_eq!(record.light.as_deref(), Some("8"));
    }

    #[test]
    fn test_family_common_name_preferred() {
        let body = r#"{"id": 2, "family": "Rosaceae", "family_common_name": "Rose family"}"#;
        let plant: TreflePlant = serde_json::from_str(body).unwrap();
        let record: PlantRecord = plant.into();
        assert_eq!(record.family.as_deref(), Some("Rose family"));
    }
}
