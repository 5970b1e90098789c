// Domain types shared by every layer.
// Planets are plain values; attributes are kept as the opaque text the API returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single planet record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    pub rotation_period: String,
    pub orbital_period: String,
    pub diameter: String,
    pub climate: String,
    pub gravity: String,
    pub terrain: String,
    pub surface_water: String,
    pub population: String,
    pub created: String,
    pub edited: String,
}

/// Where a page of planets came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageOrigin {
    #[default]
    Remote,
    Cache {
        cached_at: Option<DateTime<Utc>>,
    },
}

/// One batch of planets plus pagination metadata.
///
/// `count` is the total across all pages, so it usually exceeds `results.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlanetPage {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<Planet>,
    pub origin: PageOrigin,
}

impl PlanetPage {
    pub fn is_from_cache(&self) -> bool {
        matches!(self.origin, PageOrigin::Cache { .. })
    }
}
