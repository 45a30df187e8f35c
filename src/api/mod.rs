//! Remote plant-catalogue client
//!
//! Translates a search string or catalogue id into normalized
//! `PlantRecord`s from whichever provider the config selects. With no
//! credential configured it degrades to the bundled offline dataset.

pub mod dataset;
pub mod perenual;
pub mod records;
pub mod trefle;
pub mod weather;

pub use records::{merge_missing, PlantRecord};
pub use weather::{WeatherClient, WeatherCondition, WeatherReport};

use crate::config::{ApiProvider, AppConfig};
use crate::error::Result;
use std::time::Duration;

const TREFLE_SEARCH_URL: &str = "https://trefle.io/api/v1/plants/search";
const TREFLE_DETAIL_URL: &str = "https://trefle.io/api/v1/plants";
const PERENUAL_SEARCH_URL: &str = "https://perenual.com/api/v2/species-list";
const PERENUAL_DETAIL_URL: &str = "https://perenual.com/api/v2/species/details";
const TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the configured plant-catalogue provider
#[derive(Clone)]
pub struct PlantClient {
    http: reqwest::Client,
    provider: ApiProvider,
    api_key: String,
    credentialed: bool,
}

impl PlantClient {
    pub fn new(config: &AppConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            http,
            provider: config.api_provider,
            api_key: config.api_key.clone(),
            credentialed: config.has_api_key(),
        }
    }

    /// Search the configured provider. Without a credential this
    /// filters the bundled dataset and never touches the network; with
    /// one, any fetch failure is swallowed into an empty result set.
    pub async fn search(&self, query: &str) -> Vec<PlantRecord> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        if !self.credentialed {
            tracing::debug!("No API credential, searching bundled dataset");
            return dataset::search(query);
        }

        match self.search_remote(query).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("Search failed for '{}': {}", query, e);
                Vec::new()
            }
        }
    }

    async fn search_remote(&self, query: &str) -> Result<Vec<PlantRecord>> {
        let records = match self.provider {
            ApiProvider::Trefle => {
                let response: trefle::SearchResponse = self
                    .http
                    .get(TREFLE_SEARCH_URL)
                    .query(&[("token", self.api_key.as_str()), ("q", query)])
                    .send()
                    .await?
                    .json()
                    .await?;

                response.data.into_iter().map(PlantRecord::from).collect()
            }
            ApiProvider::Perenual => {
                let response: perenual::SearchResponse = self
                    .http
                    .get(PERENUAL_SEARCH_URL)
                    .query(&[("key", self.api_key.as_str()), ("q", query)])
                    .send()
                    .await?
                    .json()
                    .await?;

                response.data.into_iter().map(PlantRecord::from).collect()
            }
        };

        Ok(records)
    }

    /// Fetch the detail record for a catalogue id. Best-effort: `None`
    /// without a credential, for bundled (negative) ids, and on any
    /// fetch or parse failure.
    pub async fn fetch_details(&self, id: i64) -> Option<PlantRecord> {
        if !self.credentialed || id < 0 {
            return None;
        }

        match self.fetch_details_remote(id).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Detail fetch failed for {}: {}", id, e);
                None
            }
        }
    }

    async fn fetch_details_remote(&self, id: i64) -> Result<Option<PlantRecord>> {
        let record = match self.provider {
            ApiProvider::Trefle => {
                let response: trefle::DetailResponse = self
                    .http
                    .get(format!("{}/{}", TREFLE_DETAIL_URL, id))
                    .query(&[("token", self.api_key.as_str())])
                    .send()
                    .await?
                    .json()
                    .await?;

                response.data.map(PlantRecord::from)
            }
            ApiProvider::Perenual => {
                let response: perenual::PerenualPlant = self
                    .http
                    .get(format!("{}/{}", PERENUAL_DETAIL_URL, id))
                    .query(&[("key", self.api_key.as_str())])
                    .send()
                    .await?
                    .json()
                    .await?;

                Some(PlantRecord::from(response))
            }
        };

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_client() -> PlantClient {
        // Default config carries the placeholder token, i.e. no credential
        PlantClient::new(&AppConfig::default())
    }

    #[tokio::test]
    async fn test_search_without_credential_uses_bundled_dataset() {
        let client = offline_client();

        let results = client.search("monstera").await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].common_name.as_deref(), Some("Monstera"));
        assert!(results[0].id < 0);
    }

    #[tokio::test]
    async fn test_search_without_credential_never_errors_on_miss() {
        let client = offline_client();
        assert!(client.search("asteroid").await.is_empty());
        assert!(client.search("").await.is_empty());
    }

    #[tokio::test]
    async fn test_details_without_credential_is_none() {
        let client = offline_client();
        assert!(client.fetch_details(12345).await.is_none());
    }

    #[tokio::test]
    async fn test_details_for_bundled_id_is_none() {
        let mut config = AppConfig::default();
        config.api_key = "real-token".to_string();
        let client = PlantClient::new(&config);

        assert!(client.fetch_details(-3).await.is_none());
    }
}
