//! Seams to the external mapping collaborators.
//!
//! Each trait wraps one family of provider calls. Implementations report the
//! provider's own shape; normalization into domain records happens in
//! [`crate::adapters`].

pub mod fixture;
pub mod google;
pub mod polyline;

use async_trait::async_trait;
use common::errors::{ProviderError, RouteError};
use common::types::geo_point::GeoPoint;
use common::types::place::PlaceDetails;
use common::types::place_category::PlaceCategory;
use common::types::route::{Route, TravelMode};
use serde::{Deserialize, Serialize};

/// A nearby-search record as reported by a provider. Any field may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SearchResult {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub location: Option<GeoPoint>,
    pub rating: Option<f64>,
    pub vicinity: Option<String>,
}

/// Routing and geocoding collaborator.
#[async_trait]
pub trait RouteProvider: Send + Sync {
    async fn route(
        &self,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> Result<Route, RouteError>;

    /// Resolves free-form address text to a point.
    async fn geocode(&self, address: &str) -> Result<GeoPoint, RouteError>;
}

/// Places-search collaborator.
#[async_trait]
pub trait PlaceSearchProvider: Send + Sync {
    async fn nearby_search(
        &self,
        center: GeoPoint,
        radius_meters: u32,
        category: PlaceCategory,
    ) -> Result<Vec<SearchResult>, ProviderError>;
}

/// Place-detail collaborator.
#[async_trait]
pub trait PlaceDetailsProvider: Send + Sync {
    async fn place_details(
        &self,
        place_id: &str,
        fields: &[&str],
    ) -> Result<PlaceDetails, ProviderError>;
}
