// Cache module for local filesystem caching.
// Keeps the last fetched planets page for offline fallback.

pub mod paths;
pub mod store;

pub use store::PlanetStore;
