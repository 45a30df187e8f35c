//! Perenual response shapes
//!
//! <https://perenual.com/api/v2/species-list> and
//! `/api/v2/species/details/{id}`. Perenual differs from Trefle in two
//! ways the normalizer has to absorb: `scientific_name` is a list (the
//! first entry wins) and the image comes as a `default_image` object.

use super::records::PlantRecord;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub data: Vec<PerenualPlant>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PerenualPlant {
    pub id: i64,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub scientific_name: Vec<String>,
    #[serde(default)]
    pub default_image: Option<DefaultImage>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub year: Option<serde_json::Value>,
    #[serde(default)]
    pub cycle: Option<String>,
    #[serde(default)]
    pub watering: Option<String>,
    #[serde(default)]
    pub sunlight: Option<OneOrMany>,
    #[serde(default)]
    pub edible_fruit: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DefaultImage {
    #[serde(default)]
    pub regular_url: Option<String>,
}

/// Perenual sometimes returns a bare string where a list is documented
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn join(self) -> Option<String> {
        match self {
            OneOrMany::One(s) if !s.is_empty() => Some(s),
            OneOrMany::One(_) => None,
            OneOrMany::Many(v) if !v.is_empty() => Some(v.join(", ")),
            OneOrMany::Many(_) => None,
        }
    }
}

impl From<PerenualPlant> for PlantRecord {
    fn from(p: PerenualPlant) -> Self {
        let year = p.year.and_then(|v| match v {
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        });

        PlantRecord {
            id: p.id,
            common_name: p.common_name,
            scientific_name: p.scientific_name.into_iter().next(),
            image_url: p.default_image.and_then(|img| img.regular_url),
            family: p.family,
            year,
            cycle: p.cycle,
            watering: p.watering,
            sunlight: p.sunlight.and_then(OneOrMany::join),
            edible: p.edible_fruit.map(|f| if f { "Yes" } else { "No" }.to_string()),
            ..Default::default()
        }
    }
}
