use crate::adapters::{PlaceDetailAdapter, PlaceQueryAdapter};
use crate::providers::{PlaceDetailsProvider, PlaceSearchProvider, RouteProvider};
use crate::route_sampler;
use colored::Color;
use common::config::{DiscoveryConfig, FilterMode};
use common::errors::{RouteError, SearchError};
use common::logger::Logger;
use common::types::place::{Place, PlaceCandidate};
use common::types::place_category::PlaceCategory;
use common::types::route::{Route, TravelMode};
use common::utils::parse_lat_lng;
use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Runs route calculation and route-aware place discovery against the
/// external collaborators.
///
/// ## Responsibilities:
/// - Resolve a route between two locations.
/// - Query each sample point of the route for every selected category.
/// - Deduplicate, filter, enrich and rank the candidates of one cycle.
pub struct DiscoveryOrchestrator {
    router: Arc<dyn RouteProvider>,
    query: PlaceQueryAdapter,
    details: PlaceDetailAdapter,
    call_timeout: Duration,
    logger: Logger,
}

impl DiscoveryOrchestrator {
    pub fn new(
        router: Arc<dyn RouteProvider>,
        search: Arc<dyn PlaceSearchProvider>,
        details: Arc<dyn PlaceDetailsProvider>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            router,
            query: PlaceQueryAdapter::new(search, call_timeout),
            details: PlaceDetailAdapter::new(details, call_timeout),
            call_timeout,
            logger: Logger::new("Discovery", Color::Green),
        }
    }

    /// Asks the routing collaborator for a route. Blank inputs never reach it.
    pub async fn plan_route(
        &self,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> Result<Route, RouteError> {
        let (origin, destination) = (origin.trim(), destination.trim());
        if origin.is_empty() || destination.is_empty() {
            return Err(RouteError::UnresolvedLocation);
        }
        let route = timeout(self.call_timeout, self.router.route(origin, destination, mode))
            .await
            .map_err(|_| {
                RouteError::Provider(format!("routing timed out after {:?}", self.call_timeout))
            })??;
        if route.is_empty() {
            return Err(RouteError::NoRoute {
                origin: origin.to_string(),
                destination: destination.to_string(),
            });
        }
        self.logger.info(format!(
            "Route {} -> {}: {} ({} path points)",
            route.origin,
            route.destination,
            route.summary(),
            route.path.len()
        ));
        Ok(route)
    }

    /// Runs one discovery cycle along `route`.
    ///
    /// Returns at most `config.result_cap` places, best rated first, with no
    /// repeated identifiers. Provider failures are logged and contribute
    /// nothing; an empty `categories` slice issues no query at all.
    pub async fn discover(
        &self,
        route: &Route,
        categories: &[PlaceCategory],
        config: &DiscoveryConfig,
    ) -> Vec<Place> {
        if categories.is_empty() {
            self.logger.debug("No categories selected, skipping place search.");
            return Vec::new();
        }

        let samples = route_sampler::sample(&route.path, config.sample_count);
        self.logger.debug(format!(
            "Searching {} sample points for {} categories within {} m.",
            samples.len(),
            categories.len(),
            config.radius_meters
        ));

        let mut seen: HashSet<String> = HashSet::new();
        let mut found: Vec<Place> = Vec::new();

        for (index, point) in samples.iter().enumerate() {
            for category in categories {
                let candidates = match self
                    .query
                    .search(*point, config.radius_meters, *category)
                    .await
                {
                    Ok(candidates) => candidates,
                    Err(e) => {
                        self.logger.warn(format!(
                            "Search for {} at sample point {} failed: {}",
                            category.provider_type(),
                            index,
                            e
                        ));
                        continue;
                    }
                };
                let batch = select_batch(candidates, &mut seen, config);
                let enriched = self.enrich(batch, *category).await;
                found.extend(enriched.into_iter().filter(|place| passes(place.rank(), config)));
            }
        }

        let places = rank_and_cap(found, config.result_cap);
        self.logger.info(format!("Found {} places along the route.", places.len()));
        places
    }

    /// Fetches details for every candidate of a batch concurrently. Batch
    /// order is preserved; a failed lookup keeps the base record.
    async fn enrich(&self, batch: Vec<PlaceCandidate>, category: PlaceCategory) -> Vec<Place> {
        let lookups = batch.into_iter().map(|candidate| async move {
            match self.details.fetch_details(&candidate.id).await {
                Ok(details) => Place::merge(candidate, category, details),
                Err(e) => {
                    self.logger.warn(format!(
                        "Error getting details for {}: {}",
                        candidate.name, e
                    ));
                    Place::from_candidate(candidate, category)
                }
            }
        });
        join_all(lookups).await
    }

    /// Searches around a single location and returns the candidates best
    /// rated first. A literal `lat,lng` is used as is; anything else is
    /// geocoded.
    pub async fn search_around(
        &self,
        location: &str,
        category: PlaceCategory,
        radius_meters: u32,
    ) -> Result<Vec<PlaceCandidate>, SearchError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(SearchError::Location(RouteError::UnresolvedLocation));
        }
        let center = match parse_lat_lng(location) {
            Some(point) => point,
            None => timeout(self.call_timeout, self.router.geocode(location))
                .await
                .map_err(|_| {
                    RouteError::Provider(format!(
                        "geocoding timed out after {:?}",
                        self.call_timeout
                    ))
                })??,
        };
        let mut candidates = self.query.search(center, radius_meters, category).await?;
        candidates.sort_by(|a, b| b.rank().total_cmp(&a.rank()));
        self.logger.info(format!(
            "Found {} {} around {}.",
            candidates.len(),
            category.label().to_lowercase(),
            location
        ));
        Ok(candidates)
    }
}

fn passes(rating: f64, config: &DiscoveryConfig) -> bool {
    match config.filter_mode {
        FilterMode::Strict => rating >= config.rating_threshold,
        FilterMode::KeepAll => true,
    }
}

/// Drops candidates already seen this cycle, marking the rest as seen, then
/// applies the filter policy to what remains.
fn select_batch(
    candidates: Vec<PlaceCandidate>,
    seen: &mut HashSet<String>,
    config: &DiscoveryConfig,
) -> Vec<PlaceCandidate> {
    let mut batch: Vec<PlaceCandidate> = candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.id.clone()))
        .collect();
    if config.filter_mode == FilterMode::Strict {
        batch.retain(|candidate| passes(candidate.rank(), config));
        batch.sort_by(|a, b| b.rank().total_cmp(&a.rank()));
        batch.truncate(config.result_cap);
    }
    batch
}

/// Stable sort by rating descending, then truncate.
fn rank_and_cap(mut places: Vec<Place>, cap: usize) -> Vec<Place> {
    places.sort_by(|a, b| b.rank().total_cmp(&a.rank()));
    places.truncate(cap);
    places
}
