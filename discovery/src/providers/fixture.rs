//! Offline provider backed by a JSON document, for demos without an API key.

use crate::providers::{PlaceDetailsProvider, PlaceSearchProvider, RouteProvider, SearchResult};
use async_trait::async_trait;
use common::errors::{ConfigError, ProviderError, RouteError};
use common::types::geo_point::GeoPoint;
use common::types::place::PlaceDetails;
use common::types::place_category::PlaceCategory;
use common::types::route::{Route, TravelMode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureRoute {
    pub origin: String,
    pub destination: String,
    pub path: Vec<GeoPoint>,
    #[serde(default)]
    pub distance_meters: u64,
    #[serde(default)]
    pub duration_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixturePlace {
    pub place_id: String,
    pub name: String,
    pub location: GeoPoint,
    pub categories: Vec<PlaceCategory>,
    pub rating: Option<f64>,
    pub vicinity: Option<String>,
    pub details: Option<PlaceDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FixtureDocument {
    #[serde(default)]
    pub routes: Vec<FixtureRoute>,
    #[serde(default)]
    pub geocodes: HashMap<String, GeoPoint>,
    #[serde(default)]
    pub places: Vec<FixturePlace>,
}

/// Serves routes, geocodes and places from an in-memory document. Lookups
/// of locations are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct FixtureProvider {
    document: FixtureDocument,
}

impl FixtureProvider {
    pub fn new(document: FixtureDocument) -> Self {
        Self { document }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let document = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })?;
        Ok(Self::new(document))
    }
}

#[async_trait]
impl RouteProvider for FixtureProvider {
    async fn route(
        &self,
        origin: &str,
        destination: &str,
        _mode: TravelMode,
    ) -> Result<Route, RouteError> {
        self.document
            .routes
            .iter()
            .find(|route| {
                route.origin.eq_ignore_ascii_case(origin.trim())
                    && route.destination.eq_ignore_ascii_case(destination.trim())
            })
            .map(|route| Route {
                origin: route.origin.clone(),
                destination: route.destination.clone(),
                path: route.path.clone(),
                distance_meters: route.distance_meters,
                duration_seconds: route.duration_seconds,
            })
            .ok_or_else(|| RouteError::NoRoute {
                origin: origin.to_string(),
                destination: destination.to_string(),
            })
    }

    async fn geocode(&self, address: &str) -> Result<GeoPoint, RouteError> {
        self.document
            .geocodes
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(address.trim()))
            .map(|(_, point)| *point)
            .ok_or(RouteError::UnresolvedLocation)
    }
}

#[async_trait]
impl PlaceSearchProvider for FixtureProvider {
    async fn nearby_search(
        &self,
        center: GeoPoint,
        radius_meters: u32,
        category: PlaceCategory,
    ) -> Result<Vec<SearchResult>, ProviderError> {
        Ok(self
            .document
            .places
            .iter()
            .filter(|place| place.categories.contains(&category))
            .filter(|place| center.distance_to(&place.location) <= radius_meters as f64)
            .map(|place| SearchResult {
                place_id: Some(place.place_id.clone()),
                name: Some(place.name.clone()),
                location: Some(place.location),
                rating: place.rating,
                vicinity: place.vicinity.clone(),
            })
            .collect())
    }
}

#[async_trait]
impl PlaceDetailsProvider for FixtureProvider {
    async fn place_details(
        &self,
        place_id: &str,
        _fields: &[&str],
    ) -> Result<PlaceDetails, ProviderError> {
        let place = self
            .document
            .places
            .iter()
            .find(|place| place.place_id == place_id)
            .ok_or_else(|| ProviderError::Status {
                status: "NOT_FOUND".to_string(),
            })?;
        Ok(place.details.clone().unwrap_or_else(|| PlaceDetails {
            name: Some(place.name.clone()),
            rating: place.rating,
            ..PlaceDetails::default()
        }))
    }
}
