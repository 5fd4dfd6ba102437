//! HTTP client for the public creature API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use super::models::{CreatureDetail, ListingItem, ListingResponse};
use super::CreatureSource;

pub const DEFAULT_SOURCE_URL: &str = "https://pokeapi.co/api/v2";

/// HTTP client for the creature API.
pub struct PokeApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl PokeApiClient {
    /// Create a new creature API client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the API (e.g., "https://pokeapi.co/api/v2")
    /// * `timeout_sec` - Request timeout in seconds
    pub fn new(base_url: &str, timeout_sec: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CreatureSource for PokeApiClient {
    async fn fetch_listing(&self, limit: usize) -> Result<Vec<ListingItem>> {
        let url = format!("{}/pokemon", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await
            .context("Failed to fetch creature listing")?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to fetch creature listing: status {}",
                response.status()
            );
        }

        let listing: ListingResponse = response
            .json()
            .await
            .context("Failed to parse creature listing")?;
        Ok(listing.results)
    }

    async fn fetch_detail(&self, item: &ListingItem) -> Result<CreatureDetail> {
        let response = self
            .client
            .get(&item.url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch details for {}", item.name))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to fetch details for {}: status {}",
                item.name,
                response.status()
            );
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse details for {}", item.name))
    }
}
