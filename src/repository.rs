// Planet repository.
// Combines the remote source with the local cache; falls back to the cache when the first page cannot be reached.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::Result;
use crate::model::{PageOrigin, Planet, PlanetPage};

/// Remote planets API.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch the first planets page.
    async fn fetch_first_page(&self) -> Result<PlanetPage>;

    /// Fetch the page at an absolute locator previously returned as `next`.
    async fn fetch_page(&self, url: &str) -> Result<PlanetPage>;
}

/// Local planets cache.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Replace the cached planets with `planets`.
    async fn save(&self, planets: &[Planet]) -> Result<()>;

    async fn load_all(&self) -> Result<Vec<Planet>>;

    async fn count(&self) -> Result<u64>;

    /// When the cache was last written, if known.
    async fn cached_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(None)
    }

    /// Cached planets and their write time, read as one consistent view.
    async fn snapshot(&self) -> Result<CacheSnapshot> {
        Ok(CacheSnapshot {
            planets: self.load_all().await?,
            cached_at: self.cached_at().await?,
        })
    }
}

/// Contents of the local store at a single point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheSnapshot {
    pub planets: Vec<Planet>,
    pub cached_at: Option<DateTime<Utc>>,
}

impl CacheSnapshot {
    /// Row count of the snapshot, the same value `LocalStore::count` reports for it.
    pub fn count(&self) -> u64 {
        self.planets.len() as u64
    }
}

/// Source of planet pages for the view model.
#[async_trait]
pub trait PlanetRepository: Send {
    async fn get_first_page(&mut self) -> Result<PlanetPage>;

    async fn get_next_page(&mut self, url: &str) -> Result<PlanetPage>;
}

/// Repository that caches every fetched page and serves the cache when offline.
#[derive(Debug)]
pub struct CachingRepository<R, L> {
    remote: R,
    store: L,
    /// `next` locator of the last successful fetch.
    current_next: Option<String>,
}

impl<R: RemoteSource, L: LocalStore> CachingRepository<R, L> {
    pub fn new(remote: R, store: L) -> Self {
        Self {
            remote,
            store,
            current_next: None,
        }
    }

    /// Record a successful fetch: replace the cache and remember the cursor.
    async fn accept(&mut self, page: &PlanetPage) {
        self.current_next = page.next.clone();
        if let Err(e) = self.store.save(&page.results).await {
            warn!(error = %e, "failed to cache planets page");
        }
    }

    /// Build a page from the cache, or `None` if there is nothing usable.
    async fn cached_page(&self) -> Option<PlanetPage> {
        let snapshot = match self.store.snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "failed to read planets cache");
                return None;
            }
        };
        if snapshot.planets.is_empty() {
            return None;
        }

        Some(PlanetPage {
            count: snapshot.count(),
            next: self.current_next.clone(),
            previous: None,
            origin: PageOrigin::Cache {
                cached_at: snapshot.cached_at,
            },
            results: snapshot.planets,
        })
    }
}

#[cfg(test)]
impl<R, L> CachingRepository<R, L> {
    pub fn current_next(&self) -> Option<&str> {
        self.current_next.as_deref()
    }

    pub fn store(&self) -> &L {
        &self.store
    }
}

#[async_trait]
impl<R: RemoteSource, L: LocalStore> PlanetRepository for CachingRepository<R, L> {
    async fn get_first_page(&mut self) -> Result<PlanetPage> {
        match self.remote.fetch_first_page().await {
            Ok(page) => {
                info!(
                    count = page.count,
                    results = page.results.len(),
                    "loaded first planets page"
                );
                self.accept(&page).await;
                Ok(page)
            }
            Err(e) if e.is_no_network() => match self.cached_page().await {
                Some(page) => {
                    warn!(
                        results = page.results.len(),
                        "network unavailable, serving cached planets"
                    );
                    Ok(page)
                }
                None => Err(e),
            },
            Err(e) => Err(e),
        }
    }

    async fn get_next_page(&mut self, url: &str) -> Result<PlanetPage> {
        let page = self.remote.fetch_page(url).await?;
        info!(url, results = page.results.len(), "loaded planets page");
        self.accept(&page).await;
        Ok(page)
    }
}
