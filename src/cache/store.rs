// Cache store for reading and writing cached data.
// Handles JSON serialization, atomic file replacement, and the planets table.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::error::{PlanetError, Result};
use crate::model::Planet;
use crate::repository::{CacheSnapshot, LocalStore};

use super::paths;

/// Wrapper for cached data with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    /// The cached data.
    pub data: T,
    /// When the data was cached.
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }
}

/// Read cached JSON data from a file.
pub fn read_cached<T: DeserializeOwned>(path: &Path) -> Result<Option<CachedData<T>>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let cached: CachedData<T> = serde_json::from_str(&contents)?;
    Ok(Some(cached))
}

/// Write data to cache as JSON, replacing any previous contents.
pub fn write_cached<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let cached = CachedData::new(data);
    let json = serde_json::to_string_pretty(&cached)?;

    // Write atomically via temp file
    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// One row of the planets table, keyed by a surrogate id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetRow {
    pub id: u64,
    #[serde(flatten)]
    pub planet: Planet,
}

/// File-backed planets cache. Every save replaces the whole table.
#[derive(Debug, Clone)]
pub struct PlanetStore {
    path: PathBuf,
}

impl PlanetStore {
    /// Open the store inside `dir`. Nothing is touched until the first read or write.
    pub fn new(dir: &Path) -> Self {
        Self {
            path: paths::planets_path(dir),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_rows(&self) -> Result<Option<CachedData<Vec<PlanetRow>>>> {
        let path = self.path.clone();
        run_blocking(move || read_cached::<Vec<PlanetRow>>(&path)).await
    }
}

#[async_trait]
impl LocalStore for PlanetStore {
    async fn save(&self, planets: &[Planet]) -> Result<()> {
        let rows: Vec<PlanetRow> = planets
            .iter()
            .cloned()
            .zip(1u64..)
            .map(|(planet, id)| PlanetRow { id, planet })
            .collect();
        debug!(rows = rows.len(), path = %self.path.display(), "replacing planets cache");

        let path = self.path.clone();
        run_blocking(move || write_cached(&path, &rows)).await
    }

    async fn load_all(&self) -> Result<Vec<Planet>> {
        Ok(self
            .read_rows()
            .await?
            .map(|cached| cached.data.into_iter().map(|row| row.planet).collect())
            .unwrap_or_default())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self
            .read_rows()
            .await?
            .map(|cached| cached.data.len() as u64)
            .unwrap_or(0))
    }

    async fn cached_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.read_rows().await?.map(|cached| cached.cached_at))
    }

    async fn snapshot(&self) -> Result<CacheSnapshot> {
        Ok(self
            .read_rows()
            .await?
            .map(|cached| CacheSnapshot {
                planets: cached.data.into_iter().map(|row| row.planet).collect(),
                cached_at: Some(cached.cached_at),
            })
            .unwrap_or_default())
    }
}

/// Run blocking file I/O on tokio's blocking pool.
async fn run_blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| PlanetError::Other(format!("cache task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::planet;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = PlanetStore::new(temp_dir.path());

        assert!(store.load_all().await.unwrap().is_empty());
        assert_eq!(store.count().await.unwrap(), 0);
        assert!(store.cached_at().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load_preserves_order() {
        let temp_dir = TempDir::new().unwrap();
        let store = PlanetStore::new(temp_dir.path());
        let planets = vec![planet("Earth"), planet("Mars"), planet("Venus")];

        store.save(&planets).await.unwrap();

        assert_eq!(store.load_all().await.unwrap(), planets);
        assert_eq!(store.count().await.unwrap(), 3);
        assert!(store.cached_at().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_snapshot_matches_individual_reads() {
        let temp_dir = TempDir::new().unwrap();
        let store = PlanetStore::new(temp_dir.path());
        assert_eq!(store.snapshot().await.unwrap(), CacheSnapshot::default());

        store
            .save(&[planet("Earth"), planet("Mars")])
            .await
            .unwrap();
        let snapshot = store.snapshot().await.unwrap();

        assert_eq!(snapshot.planets, store.load_all().await.unwrap());
        assert_eq!(snapshot.count(), store.count().await.unwrap());
        assert_eq!(snapshot.cached_at, store.cached_at().await.unwrap());
        assert!(snapshot.cached_at.is_some());
    }

    #[tokio::test]
    async fn test_save_replaces_previous_rows() {
        let temp_dir = TempDir::new().unwrap();
        let store = PlanetStore::new(temp_dir.path());

        store
            .save(&[planet("Earth"), planet("Mars")])
            .await
            .unwrap();
        store.save(&[planet("Jupiter")]).await.unwrap();

        assert_eq!(store.load_all().await.unwrap(), vec![planet("Jupiter")]);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_rows_carry_surrogate_ids() {
        let temp_dir = TempDir::new().unwrap();
        let store = PlanetStore::new(temp_dir.path());
        store
            .save(&[planet("Earth"), planet("Mars")])
            .await
            .unwrap();

        let cached: CachedData<Vec<PlanetRow>> = read_cached(store.path()).unwrap().unwrap();
        let ids: Vec<u64> = cached.data.iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![1, 2]);

        // Rows are flat: entity columns sit next to the id
        let json = fs::read_to_string(store.path()).unwrap();
        assert!(json.contains("\"rotation_period\""));
        assert!(!json.contains("\"planet\""));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = PlanetStore::new(temp_dir.path());
        fs::write(store.path(), "not json").unwrap();

        assert!(matches!(
            store.load_all().await,
            Err(PlanetError::Json(_))
        ));
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("data.json");

        write_cached(&path, &vec![1, 2, 3]).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
        let cached: CachedData<Vec<i32>> = read_cached(&path).unwrap().unwrap();
        assert_eq!(cached.data, vec![1, 2, 3]);
    }
}
