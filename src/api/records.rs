//! Normalized plant records
//!
//! Both upstream providers and the bundled dataset are normalized into
//! `PlantRecord` so the rest of the app never sees provider-specific
//! response shapes.

use crate::database::{Favorite, FavoriteUpdate, NewFavorite};
use serde::{Deserialize, Serialize};

/// A plant as returned by search or detail lookup, provider-agnostic.
/// Everything beyond the id is best-effort: list endpoints fill fewer
/// fields than detail endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlantRecord {
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
    pub genus: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub bibliography: Option<String>,
    // Provider-specific extras, carried through opportunistically
    #[serde(default)]
    pub cycle: Option<String>,
    #[serde(default)]
    pub watering: Option<String>,
    #[serde(default)]
    pub sunlight: Option<String>,
    #[serde(default)]
    pub growth_habit: Option<String>,
    #[serde(default)]
    pub days_to_harvest: Option<String>,
    #[serde(default)]
    pub light: Option<String>,
    #[serde(default)]
    pub edible: Option<String>,
    #[serde(default)]
    pub vegetable: Option<String>,
}

impl PlantRecord {
    /// Display name: common name, falling back to the scientific one
    pub fn display_name(&self) -> &str {
        self.common_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.scientific_name.as_deref())
            .unwrap_or("Unknown")
    }

    /// Case-insensitive substring match over both name fields
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        let hit = |field: &Option<String>| {
            field
                .as_deref()
                .map(|s| s.to_lowercase().contains(&query))
                .unwrap_or(false)
        };
        hit(&self.common_name) || hit(&self.scientific_name)
    }

    pub fn to_new_favorite(&self) -> NewFavorite {
        NewFavorite {
            id: self.id,
            common_name: self.common_name.clone(),
            scientific_name: self.scientific_name.clone(),
            family: self.family.clone(),
            genus: self.genus.clone(),
            year: self.year.clone(),
            bibliography: self.bibliography.clone(),
            edible: self.edible.clone(),
            vegetable: self.vegetable.clone(),
            image_url: self.image_url.clone(),
            habit: self.growth_habit.clone(),
            harvest: self.days_to_harvest.clone(),
            light: self.light.clone(),
            notes: None,
        }
    }

    pub fn from_favorite(fav: &Favorite) -> Self {
        Self {
            id: fav.id,
            common_name: fav.common_name.clone(),
            scientific_name: fav.scientific_name.clone(),
            image_url: fav.image_url.clone(),
            family: fav.family.clone(),
            genus: fav.genus.clone(),
            year: fav.year.clone(),
            bibliography: fav.bibliography.clone(),
            growth_habit: fav.habit.clone(),
            days_to_harvest: fav.harvest.clone(),
            light: fav.light.clone(),
            edible: fav.edible.clone(),
            vegetable: fav.vegetable.clone(),
            ..Default::default()
        }
    }

    /// Turn this record into an update for its stored favorite. Notes
    /// are not part of the record and stay untouched by the caller.
    pub fn to_favorite_update(&self, notes: Option<String>) -> FavoriteUpdate {
        FavoriteUpdate {
            id: self.id,
            common_name: self.common_name.clone(),
            scientific_name: self.scientific_name.clone(),
            family: self.family.clone(),
            genus: self.genus.clone(),
            year: self.year.clone(),
            bibliography: self.bibliography.clone(),
            edible: self.edible.clone(),
            vegetable: self.vegetable.clone(),
            habit: self.growth_habit.clone(),
            harvest: self.days_to_harvest.clone(),
            light: self.light.clone(),
            notes,
            image_url: self.image_url.clone(),
        }
    }
}

fn fill(existing: Option<String>, incoming: &Option<String>) -> Option<String> {
    match existing {
        Some(value) if !value.trim().is_empty() => Some(value),
        _ => incoming.clone(),
    }
}

/// Merge policy for detail enrichment: a field already holding a value
/// (user-edited or otherwise) is never overwritten; only absent or
/// empty fields take the incoming value.
pub fn merge_missing(existing: PlantRecord, incoming: &PlantRecord) -> PlantRecord {
    PlantRecord {
        id: existing.id,
        common_name: fill(existing.common_name, &incoming.common_name),
        scientific_name: fill(existing.scientific_name, &incoming.scientific_name),
        image_url: fill(existing.image_url, &incoming.image_url),
        family: fill(existing.family, &incoming.family),
        genus: fill(existing.genus, &incoming.genus),
        year: fill(existing.year, &incoming.year),
        bibliography: fill(existing.bibliography, &incoming.bibliography),
        cycle: fill(existing.cycle, &incoming.cycle),
        watering: fill(existing.watering, &incoming.watering),
        sunlight: fill(existing.sunlight, &incoming.sunlight),
        growth_habit: fill(existing.growth_habit, &incoming.growth_habit),
        days_to_harvest: fill(existing.days_to_harvest, &incoming.days_to_harvest),
        light: fill(existing.light, &incoming.light),
        edible: fill(existing.edible, &incoming.edible),
        vegetable: fill(existing.vegetable, &incoming.vegetable),
    }
}
