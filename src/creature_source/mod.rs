//! External creature data source.
//!
//! The synchronizer only needs two calls: one listing and one detail record
//! per listed item.

mod client;
mod models;

pub use client::{PokeApiClient, DEFAULT_SOURCE_URL};
pub use models::*;

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait CreatureSource: Send + Sync {
    /// Fetch the first `limit` `{name, url}` pairs.
    async fn fetch_listing(&self, limit: usize) -> Result<Vec<ListingItem>>;

    /// Fetch the detail record a listing item points at.
    async fn fetch_detail(&self, item: &ListingItem) -> Result<CreatureDetail>;
}
