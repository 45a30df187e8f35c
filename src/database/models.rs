//! Database models
//!
//! Explicit record types for every persisted entity. Field access is
//! by name everywhere; no positional row tuples.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A plant the user has added to their garden.
///
/// `id` is the external catalogue id, or a timestamp-synthesized local
/// id for manually entered plants. Dates are stored as `YYYY-MM-DD`
/// text; `last_watered` additionally carries a `HH:MM` suffix.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Favorite {
    pub id: i64,
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub year: Option<String>,
    pub bibliography: Option<String>,
    pub edible: Option<String>,
    pub vegetable: Option<String>,
    pub image_url: Option<String>,
    pub habit: Option<String>,
    pub harvest: Option<String>,
    pub light: Option<String>,
    pub notes: Option<String>,
    pub added_date: String,
    pub last_watered: Option<String>,
}

/// Fields supplied when favoriting a plant
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewFavorite {
    pub id: i64,
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub year: Option<String>,
    pub bibliography: Option<String>,
    pub edible: Option<String>,
    pub vegetable: Option<String>,
    pub image_url: Option<String>,
    pub habit: Option<String>,
    pub harvest: Option<String>,
    pub light: Option<String>,
    pub notes: Option<String>,
}

/// Edit to an existing favorite. All text fields are written as given;
/// the image is replaced only when `image_url` is `Some`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FavoriteUpdate {
    pub id: i64,
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub year: Option<String>,
    pub bibliography: Option<String>,
    pub edible: Option<String>,
    pub vegetable: Option<String>,
    pub habit: Option<String>,
    pub harvest: Option<String>,
    pub light: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
}

/// A watering/care reminder
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reminder {
    pub id: i64,
    pub task: String,
    /// `YYYY-MM-DD`
    pub due_date: String,
    pub completed: bool,
}

/// A free-form journal entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JournalEntry {
    pub id: i64,
    pub title: Option<String>,
    pub content: String,
    pub entry_date: String,
}

/// Kind tag for a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(rename_all = "kebab-case")]
pub enum LayoutKind {
    Indoor,
    RaisedBed,
    InGround,
    Container,
}

/// A named grouping of favorited plants (e.g. "Balcony Garden")
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Layout {
    pub id: i64,
    pub name: String,
    pub kind: LayoutKind,
    pub created_date: String,
}

/// Membership row joining a layout to a favorite.
///
/// `common_name` and `image_url` come from a LEFT JOIN, so a dangling
/// plant reference still yields a row with those fields empty.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LayoutItem {
    pub id: i64,
    pub layout_id: i64,
    pub plant_id: i64,
    pub common_name: Option<String>,
    pub image_url: Option<String>,
}
