//! HTTP client for the hosted catalog store.
//!
//! Speaks the PostgREST dialect: table rows live under `/rest/v1/{table}`,
//! filters are query parameters and behaviour switches go in the `Prefer`
//! header.

use super::models::*;
use super::trait_def::CatalogStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_RANGE};
use reqwest::{RequestBuilder, Response};
use std::time::Duration;
use tracing::debug;

const ENTRIES_TABLE: &str = "entries";
const NOTES_TABLE: &str = "notes";

pub struct RestCatalogStore {
    client: reqwest::Client,
    base_url: String,
}

impl RestCatalogStore {
    /// Create a new hosted store client.
    ///
    /// # Arguments
    /// * `base_url` - Project URL of the store (e.g., "https://xyz.example.co")
    /// * `api_key` - Key sent both as `apikey` and as bearer token
    /// * `timeout_sec` - Request timeout in seconds
    pub fn new(base_url: &str, api_key: &str, timeout_sec: u64) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(api_key).context("Store API key is not a valid header value")?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key))
                .context("Store API key is not a valid header value")?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
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

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response> {
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to reach catalog store to {}", what))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Catalog store failed to {}: status {} {}", what, status, body);
        }
        Ok(response)
    }
}

/// Extracts the total from a `Content-Range` value such as `0-0/151` or `*/0`.
pub fn parse_content_range_total(value: &str) -> Option<usize> {
    let (_, total) = value.rsplit_once('/')?;
    total.trim().parse().ok()
}

#[async_trait]
impl CatalogStore for RestCatalogStore {
    async fn count_entries(&self) -> Result<usize> {
        let request = self
            .client
            .get(self.table_url(ENTRIES_TABLE))
            .query(&[("select", "id")])
            .header("Prefer", "count=exact")
            .header("Range", "0-0");
        let response = self.send(request, "count entries").await?;

        let header = response
            .headers()
            .get(CONTENT_RANGE)
            .context("Count response has no Content-Range header")?
            .to_str()
            .context("Content-Range header is not valid text")?;
        parse_content_range_total(header)
            .with_context(|| format!("Unexpected Content-Range value: {}", header))
    }

    async fn upsert_entries(&self, entries: &[CatalogEntry]) -> Result<()> {
        let request = self
            .client
            .post(self.table_url(ENTRIES_TABLE))
            .query(&[("on_conflict", "id")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(entries);
        self.send(request, "upsert entries").await?;
        debug!("Upserted {} entries", entries.len());
        Ok(())
    }

    async fn list_entry_summaries(&self) -> Result<Vec<EntrySummary>> {
        let request = self
            .client
            .get(self.table_url(ENTRIES_TABLE))
            .query(&[("select", "id,name"), ("order", "id.asc")]);
        self.send(request, "list entries")
            .await?
            .json()
            .await
            .context("Failed to parse entry list")
    }

    async fn get_entry(&self, id: u32) -> Result<Option<CatalogEntry>> {
        let request = self
            .client
            .get(self.table_url(ENTRIES_TABLE))
            .query(&[("select", "*".to_string()), ("id", format!("eq.{}", id))]);
        let rows: Vec<CatalogEntry> = self
            .send(request, "fetch entry")
            .await?
            .json()
            .await
            .with_context(|| format!("Failed to parse entry {}", id))?;
        Ok(rows.into_iter().next())
    }

    async fn insert_note(&self, note: &NewEncounterNote) -> Result<EncounterNote> {
        let request = self
            .client
            .post(self.table_url(NOTES_TABLE))
            .query(&[("select", "*")])
            .header("Prefer", "return=representation")
            .json(&[note]);
        let rows: Vec<EncounterNote> = self
            .send(request, "save encounter")
            .await?
            .json()
            .await
            .context("Failed to parse saved encounter")?;
        rows.into_iter()
            .next()
            .context("Store did not return the saved encounter")
    }

    async fn list_notes(&self, entry_id: u32) -> Result<Vec<EncounterNote>> {
        let request = self.client.get(self.table_url(NOTES_TABLE)).query(&[
            ("select", "*".to_string()),
            ("entry_id", format!("eq.{}", entry_id)),
            ("order", "created_at.desc".to_string()),
        ]);
        self.send(request, "list encounters")
            .await?
            .json()
            .await
            .with_context(|| format!("Failed to parse encounters for entry {}", entry_id))
    }
}
