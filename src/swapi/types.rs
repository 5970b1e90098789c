// SWAPI response types.
// Wire shapes for the planets endpoint and their conversion into domain types.

use serde::{Deserialize, Serialize};

use crate::model::{PageOrigin, Planet, PlanetPage};

/// Planet as returned by the API.
///
/// `residents`, `films` and `url` are present on the wire but not kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetDto {
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

impl From<PlanetDto> for Planet {
    fn from(dto: PlanetDto) -> Self {
        Planet {
            name: dto.name,
            rotation_period: dto.rotation_period,
            orbital_period: dto.orbital_period,
            diameter: dto.diameter,
            climate: dto.climate,
            gravity: dto.gravity,
            terrain: dto.terrain,
            surface_water: dto.surface_water,
            population: dto.population,
            created: dto.created,
            edited: dto.edited,
        }
    }
}

/// Paginated planets list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetsResponse {
    pub count: u64,
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<PlanetDto>,
}

impl From<PlanetsResponse> for PlanetPage {
    fn from(response: PlanetsResponse) -> Self {
        PlanetPage {
            count: response.count,
            next: response.next,
            previous: response.previous,
            results: response.results.into_iter().map(Planet::from).collect(),
            origin: PageOrigin::Remote,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST_PAGE: &str = r#"{
        "count": 60,
        "next": "https://swapi.dev/api/planets/?page=2",
        "previous": null,
        "results": [
            {
                "name": "Tatooine",
                "rotation_period": "23",
                "orbital_period": "304",
                "diameter": "10465",
                "climate": "arid",
                "gravity": "1 standard",
                "terrain": "desert",
                "surface_water": "1",
                "population": "200000",
                "residents": ["https://swapi.dev/api/people/1/"],
                "films": ["https://swapi.dev/api/films/1/"],
                "created": "2014-12-09T13:50:49.641000Z",
                "edited": "2014-12-20T20:58:18.411000Z",
                "url": "https://swapi.dev/api/planets/1/"
            }
        ]
    }"#;

    #[test]
    fn test_parse_planets_response() {
        let response: PlanetsResponse = serde_json::from_str(FIRST_PAGE).unwrap();
        let page = PlanetPage::from(response);

        assert_eq!(page.count, 60);
        assert_eq!(
            page.next.as_deref(),
            Some("https://swapi.dev/api/planets/?page=2")
        );
        assert!(page.previous.is_none());
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.origin, PageOrigin::Remote);

        let tatooine = &page.results[0];
        assert_eq!(tatooine.name, "Tatooine");
        assert_eq!(tatooine.rotation_period, "23");
        assert_eq!(tatooine.surface_water, "1");
        assert_eq!(tatooine.edited, "2014-12-20T20:58:18.411000Z");
    }

    #[test]
    fn test_attributes_stay_opaque_text() {
        let json = FIRST_PAGE.replace(r#""population": "200000""#, r#""population": "unknown""#);
        let response: PlanetsResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(response.results[0].population, "unknown");
    }

    #[test]
    fn test_missing_results_is_an_error() {
        let result: Result<PlanetsResponse, _> =
            serde_json::from_str(r#"{"count": 1, "next": null}"#);
        assert!(result.is_err());
    }
}
