// SWAPI module.
// Provides the HTTP client and wire types for the planets REST API.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{DEFAULT_BASE_URL, SwapiClient};
