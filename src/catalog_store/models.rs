//! Catalog and encounter data models.
//!
//! Field names match the column names of the `entries` and `notes` tables so
//! the same types serialize for both the hosted store and SQLite.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Something with a display name the local filter can match against.
pub trait Named {
    fn name(&self) -> &str;
}

/// `{name, url}` reference as the creature API nests it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl NamedResource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<u32>,
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<u32>,
}

/// A base stat value, e.g. `hp: 45`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSlot {
    pub base_stat: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort: Option<u32>,
    pub stat: NamedResource,
}

impl StatSlot {
    pub fn name(&self) -> &str {
        &self.stat.name
    }
}

/// One creature record. The id is assigned by the external source.
///
/// The list columns keep the creature API's slot objects verbatim, so rows
/// written by other clients of the hosted store read back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: u32,
    pub name: String,
    /// Height in decimetres.
    pub height: Option<u32>,
    /// Weight in hectograms.
    pub weight: Option<u32>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
    pub sprite_default: Option<String>,
    pub sprite_official: Option<String>,
}

impl CatalogEntry {
    pub fn type_names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.type_.name.as_str()).collect()
    }

    pub fn ability_names(&self) -> Vec<&str> {
        self.abilities
            .iter()
            .map(|a| a.ability.name.as_str())
            .collect()
    }

    /// Height in metres, `None` when unknown or zero.
    pub fn height_meters(&self) -> Option<f64> {
        self.height.filter(|h| *h > 0).map(|h| h as f64 / 10.0)
    }

    /// Weight in kilograms, `None` when unknown or zero.
    pub fn weight_kg(&self) -> Option<f64> {
        self.weight.filter(|w| *w > 0).map(|w| w as f64 / 10.0)
    }

    /// Official artwork if present, falling back to the default sprite.
    pub fn preferred_sprite(&self) -> Option<&str> {
        self.sprite_official
            .as_deref()
            .or(self.sprite_default.as_deref())
    }

    pub fn summary(&self) -> EntrySummary {
        EntrySummary {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

impl Named for CatalogEntry {
    fn name(&self) -> &str {
        &self.name
    }
}

/// The `{id, name}` projection returned after synchronization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySummary {
    pub id: u32,
    pub name: String,
}

impl Named for EntrySummary {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Where an encounter happened. Both parts are optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EncounterLocation {
    pub label: Option<String>,
    pub coordinates: Option<Coordinates>,
}

/// A saved encounter note, as echoed back by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterNote {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub entry_id: u32,
    pub description: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Insert payload for the `notes` table. Id and timestamp are left to the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEncounterNote {
    pub entry_id: u32,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl NewEncounterNote {
    pub fn new(entry_id: u32, description: String, location: EncounterLocation) -> Self {
        Self {
            entry_id,
            description,
            location: location.label,
            latitude: location.coordinates.map(|c| c.latitude),
            longitude: location.coordinates.map(|c| c.longitude),
        }
    }
}
