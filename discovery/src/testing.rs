//! Scripted providers for unit tests.

use crate::providers::{PlaceDetailsProvider, PlaceSearchProvider, RouteProvider, SearchResult};
use async_trait::async_trait;
use common::errors::{ProviderError, RouteError};
use common::types::geo_point::GeoPoint;
use common::types::place::PlaceDetails;
use common::types::place_category::PlaceCategory;
use common::types::route::{Route, TravelMode};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

type Responder =
    Box<dyn Fn(GeoPoint, PlaceCategory) -> Result<Vec<SearchResult>, ProviderError> + Send + Sync>;

/// Path whose point `i` sits at latitude `i`, so responders can tell sample
/// points apart.
pub fn straight_route(len: usize) -> Route {
    Route {
        origin: "A".to_string(),
        destination: "B".to_string(),
        path: (0..len).map(|i| GeoPoint::new(i as f64, 0.0)).collect(),
        distance_meters: 1_000 * len as u64,
        duration_seconds: 60 * len as u64,
    }
}

pub fn result(id: &str, rating: Option<f64>) -> SearchResult {
    SearchResult {
        place_id: Some(id.to_string()),
        name: Some(format!("Place {}", id)),
        location: Some(GeoPoint::new(0.0, 0.0)),
        rating,
        vicinity: None,
    }
}

pub struct ScriptedSearch {
    responder: Responder,
    calls: Mutex<Vec<(GeoPoint, PlaceCategory)>>,
}

impl ScriptedSearch {
    pub fn new(
        responder: impl Fn(GeoPoint, PlaceCategory) -> Result<Vec<SearchResult>, ProviderError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(GeoPoint, PlaceCategory)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaceSearchProvider for ScriptedSearch {
    async fn nearby_search(
        &self,
        center: GeoPoint,
        _radius_meters: u32,
        category: PlaceCategory,
    ) -> Result<Vec<SearchResult>, ProviderError> {
        self.calls.lock().unwrap().push((center, category));
        (self.responder)(center, category)
    }
}

/// Details keyed by place id, empty for unknown ids. Ids in `failing` answer
/// with an error and `delays` holds a per-id answer latency.
#[derive(Default)]
pub struct ScriptedDetails {
    pub details: HashMap<String, PlaceDetails>,
    pub failing: HashSet<String>,
    pub delays: HashMap<String, Duration>,
    pub(crate) calls: AtomicUsize,
}

impl ScriptedDetails {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlaceDetailsProvider for ScriptedDetails {
    async fn place_details(
        &self,
        place_id: &str,
        _fields: &[&str],
    ) -> Result<PlaceDetails, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(place_id) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(place_id) {
            return Err(ProviderError::Status {
                status: "UNKNOWN_ERROR".to_string(),
            });
        }
        Ok(self.details.get(place_id).cloned().unwrap_or_default())
    }
}

/// Router answering every request with the same route after `delay`.
pub struct ScriptedRouter {
    pub route: Result<Route, RouteError>,
    pub delay: Duration,
}

#[async_trait]
impl RouteProvider for ScriptedRouter {
    async fn route(
        &self,
        _origin: &str,
        _destination: &str,
        _mode: TravelMode,
    ) -> Result<Route, RouteError> {
        tokio::time::sleep(self.delay).await;
        self.route.clone()
    }

    async fn geocode(&self, address: &str) -> Result<GeoPoint, RouteError> {
        if address.is_empty() {
            Err(RouteError::UnresolvedLocation)
        } else {
            Ok(GeoPoint::new(0.0, 0.0))
        }
    }
}
