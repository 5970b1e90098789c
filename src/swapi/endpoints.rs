// SWAPI endpoint functions.
// Fetches planet pages and exposes the client as the application's remote source.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{PlanetError, Result};
use crate::model::PlanetPage;
use crate::repository::RemoteSource;

use super::client::SwapiClient;
use super::types::PlanetsResponse;

impl SwapiClient {
    /// Fetch and decode one planets page from an absolute URL.
    pub async fn get_planets_page(&self, url: &str) -> Result<PlanetPage> {
        let response = self.get(url).await?;
        let wrapper: PlanetsResponse = response
            .json()
            .await
            .map_err(PlanetError::from_transport)?;
        debug!(
            url,
            count = wrapper.count,
            results = wrapper.results.len(),
            "decoded planets page"
        );
        Ok(wrapper.into())
    }
}

#[async_trait]
impl RemoteSource for SwapiClient {
    async fn fetch_first_page(&self) -> Result<PlanetPage> {
        self.get_planets_page(&self.planets_url()).await
    }

    async fn fetch_page(&self, url: &str) -> Result<PlanetPage> {
        self.get_planets_page(url).await
    }
}
