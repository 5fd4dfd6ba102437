//! Response shapes of the public creature API.
//!
//! Only the fields the catalog stores are modelled; everything else in the
//! payload is ignored by serde.

use serde::Deserialize;

use crate::catalog_store::{AbilitySlot, CatalogEntry, StatSlot, TypeSlot};

/// `GET /pokemon?limit=N`
#[derive(Debug, Clone, Deserialize)]
pub struct ListingResponse {
    pub results: Vec<ListingItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListingItem {
    pub name: String,
    /// Absolute URL of the detail record.
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfficialArtwork {
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: OfficialArtwork,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: OtherSprites,
}

/// `GET /pokemon/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct CreatureDetail {
    pub id: u32,
    pub name: String,
    pub height: Option<u32>,
    pub weight: Option<u32>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
    #[serde(default)]
    pub sprites: Sprites,
}

impl From<CreatureDetail> for CatalogEntry {
    fn from(detail: CreatureDetail) -> Self {
        CatalogEntry {
            id: detail.id,
            name: detail.name.to_lowercase(),
            height: detail.height,
            weight: detail.weight,
            types: detail.types,
            abilities: detail.abilities,
            stats: detail.stats,
            sprite_default: detail.sprites.front_default,
            sprite_official: detail.sprites.other.official_artwork.front_default,
        }
    }
}
