//! Catalog service
//!
//! Ties the remote plant client to the local garden: search, favoriting
//! a search result, and best-effort detail enrichment of a stored
//! favorite.

use crate::api::{merge_missing, PlantClient, PlantRecord};
use crate::database::Repository;
use crate::error::{AppError, Result};

/// Service for plant lookup and garden membership
#[derive(Clone)]
pub struct CatalogService {
    client: PlantClient,
    repo: Repository,
}

impl CatalogService {
    pub fn new(client: PlantClient, repo: Repository) -> Self {
        Self { client, repo }
    }

    /// Search the configured provider (or the bundled dataset when no
    /// credential is configured)
    pub async fn search(&self, query: &str) -> Vec<PlantRecord> {
        self.client.search(query).await
    }

    /// Favorite a search result. `false` when already in the garden.
    pub async fn add_to_garden(&self, record: &PlantRecord) -> Result<bool> {
        self.repo.add_favorite(record.to_new_favorite()).await
    }

    /// Best-effort detail enrichment of a stored favorite.
    ///
    /// Fetches the provider's detail record and fills in only the
    /// fields the favorite is missing; anything already holding a value
    /// (user edits included) is left alone. Returns whether anything
    /// was written. A failed or unavailable fetch is not an error.
    pub async fn enrich_favorite(&self, id: i64) -> Result<bool> {
        let favorite = self
            .repo
            .get_favorite(id)
            .await?
            .ok_or(AppError::FavoriteNotFound(id))?;

        let Some(detail) = self.client.fetch_details(id).await else {
            tracing::debug!("No detail record for favorite {}", id);
            return Ok(false);
        };

        let existing = PlantRecord::from_favorite(&favorite);
        let merged = merge_missing(existing.clone(), &detail);

        // Compare what would actually be stored; extras the favorites
        // table has no column for do not count as a change.
        let update = merged.to_favorite_update(favorite.notes.clone());
        if update == existing.to_favorite_update(favorite.notes.clone()) {
            return Ok(false);
        }

        tracing::info!("Enriching favorite {} from provider details", id);
        self.repo.update_favorite(update).await?;
        Ok(true)
    }
}
