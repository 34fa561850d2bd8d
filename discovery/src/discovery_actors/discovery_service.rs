use crate::discovery_actors::selection_state::SelectionState;
use crate::orchestrator::DiscoveryOrchestrator;
use actix::prelude::*;
use colored::Color;
use common::config::DiscoveryConfig;
use common::errors::{RouteError, SearchError};
use common::logger::Logger;
use common::messages::{
    ApplyResults, BeginSearch, GetCategories, GetGeneration, PlanRoute, SearchAround,
};
use common::types::dtos::DiscoveryOutcome;
use common::types::place::PlaceCandidate;
use std::sync::Arc;

/// The `DiscoveryService` actor turns a user's route request into a ranked
/// list of places and hands it to the [`SelectionState`].
///
/// ## Responsibilities:
/// - Number every search with a monotonically increasing generation.
/// - Announce each new search so the selection drops its focus and results.
/// - Compute the route, discover places along it for the active categories,
///   and forward the results unless a newer search has started meanwhile.
pub struct DiscoveryService {
    pub orchestrator: Arc<DiscoveryOrchestrator>,
    pub config: DiscoveryConfig,
    /// The address of the SelectionState actor receiving results.
    pub selection: Addr<SelectionState>,
    /// Generation of the latest search started.
    pub generation: u64,
    pub logger: Logger,
}

impl DiscoveryService {
    pub fn new(
        orchestrator: Arc<DiscoveryOrchestrator>,
        config: DiscoveryConfig,
        selection: Addr<SelectionState>,
    ) -> Self {
        Self {
            orchestrator,
            config,
            selection,
            generation: 0,
            logger: Logger::new("Discovery Service", Color::Blue),
        }
    }
}

impl Actor for DiscoveryService {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        self.logger.debug(format!(
            "Started with {} sample points, {} m radius, threshold {}, cap {}.",
            self.config.sample_count,
            self.config.radius_meters,
            self.config.rating_threshold,
            self.config.result_cap
        ));
    }
}

impl Handler<PlanRoute> for DiscoveryService {
    type Result = ResponseActFuture<Self, Result<DiscoveryOutcome, RouteError>>;

    /// Handles the `PlanRoute` message by starting a new search generation,
    /// computing the route and, when categories are selected, discovering
    /// places along it. Completions of superseded searches are discarded.
    fn handle(&mut self, msg: PlanRoute, _ctx: &mut Self::Context) -> Self::Result {
        self.generation += 1;
        let generation = self.generation;
        self.logger.info(format!(
            "Search {}: {} -> {} ({}).",
            generation, msg.origin, msg.destination, msg.mode
        ));

        self.selection.do_send(BeginSearch { generation });
        let categories_request = self.selection.send(GetCategories);
        let orchestrator = self.orchestrator.clone();
        let config = self.config.clone();
        let logger = self.logger.clone();

        let search = async move {
            let categories = categories_request.await.unwrap_or_else(|e| {
                logger.error(format!("Could not read selected categories: {}", e));
                Vec::new()
            });
            let route = orchestrator
                .plan_route(&msg.origin, &msg.destination, msg.mode)
                .await?;
            if categories.is_empty() {
                return Ok(DiscoveryOutcome::RouteOnly { route });
            }
            let places = orchestrator.discover(&route, &categories, &config).await;
            Ok(DiscoveryOutcome::Places { route, places })
        };

        Box::pin(search.into_actor(self).map(move |result, act, _ctx| {
            if generation != act.generation {
                act.logger.warn(format!(
                    "Search {} superseded by search {}, discarding its results.",
                    generation, act.generation
                ));
                return Ok(DiscoveryOutcome::Superseded);
            }
            match result {
                Ok(DiscoveryOutcome::Places { route, places }) => {
                    act.selection.do_send(ApplyResults {
                        generation,
                        places: places.clone(),
                    });
                    Ok(DiscoveryOutcome::Places { route, places })
                }
                Err(e) => {
                    act.logger
                        .error(format!("Error calculating route: {}", e));
                    Err(e)
                }
                other => other,
            }
        }))
    }
}

impl Handler<SearchAround> for DiscoveryService {
    type Result = ResponseFuture<Result<Vec<PlaceCandidate>, SearchError>>;

    fn handle(&mut self, msg: SearchAround, _ctx: &mut Self::Context) -> Self::Result {
        let orchestrator = self.orchestrator.clone();
        Box::pin(async move {
            orchestrator
                .search_around(&msg.location, msg.category, msg.radius_meters)
                .await
        })
    }
}

impl Handler<GetGeneration> for DiscoveryService {
    type Result = u64;

    fn handle(&mut self, _msg: GetGeneration, _ctx: &mut Self::Context) -> Self::Result {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedDetails, ScriptedRouter, ScriptedSearch, result, straight_route};
    use common::messages::{FocusPlace, GetSelection, ToggleCategory};
    use common::types::place_category::PlaceCategory;
    use common::types::route::TravelMode;
    use std::time::Duration;

    fn plan() -> PlanRoute {
        PlanRoute {
            origin: "Lyon".to_string(),
            destination: "Paris".to_string(),
            mode: TravelMode::Driving,
        }
    }

    fn start_service(
        route: Result<common::types::route::Route, RouteError>,
        delay: Duration,
        search: Arc<ScriptedSearch>,
    ) -> (Addr<DiscoveryService>, Addr<SelectionState>) {
        let router = Arc::new(ScriptedRouter { route, delay });
        let orchestrator = Arc::new(DiscoveryOrchestrator::new(
            router,
            search,
            Arc::new(ScriptedDetails::default()),
            Duration::from_secs(1),
        ));
        let selection = SelectionState::new().start();
        let service =
            DiscoveryService::new(orchestrator, DiscoveryConfig::default(), selection.clone())
                .start();
        (service, selection)
    }

    #[actix_rt::test]
    async fn test_route_without_categories_skips_place_search() {
        let search = Arc::new(ScriptedSearch::new(|_, _| Ok(vec![result("a", Some(4.5))])));
        let (service, selection) =
            start_service(Ok(straight_route(11)), Duration::ZERO, search.clone());

        let outcome = service.send(plan()).await.unwrap().unwrap();

        assert!(matches!(outcome, DiscoveryOutcome::RouteOnly { .. }));
        assert!(search.calls().is_empty());
        let snapshot = selection.send(GetSelection).await.unwrap();
        assert!(snapshot.places.is_empty());
        assert_eq!(snapshot.generation, 1);
    }

    #[actix_rt::test]
    async fn test_results_reach_selection_state() {
        let search = Arc::new(ScriptedSearch::new(|point, _| {
            Ok(vec![result(&format!("p{}", point.lat as usize), Some(4.0 + point.lat / 100.0))])
        }));
        let (service, selection) = start_service(Ok(straight_route(11)), Duration::ZERO, search);
        selection
            .send(ToggleCategory {
                category: PlaceCategory::Restaurant,
            })
            .await
            .unwrap();

        let outcome = service.send(plan()).await.unwrap().unwrap();

        assert_eq!(outcome.places().len(), 6);
        assert_eq!(outcome.places()[0].id, "p10");
        let snapshot = selection.send(GetSelection).await.unwrap();
        let ids: Vec<&str> = snapshot.places.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p10", "p8", "p6", "p4", "p2", "p0"]);
        assert!(snapshot.focused.is_none());
    }

    #[actix_rt::test]
    async fn test_newer_search_supersedes_older_one() {
        let search = Arc::new(ScriptedSearch::new(|_, _| Ok(vec![result("a", Some(4.5))])));
        let (service, selection) =
            start_service(Ok(straight_route(3)), Duration::from_millis(50), search);
        selection
            .send(ToggleCategory {
                category: PlaceCategory::Cafe,
            })
            .await
            .unwrap();

        let first = service.send(plan());
        let second = service.send(plan());
        let first = first.await.unwrap().unwrap();
        let second = second.await.unwrap().unwrap();

        assert!(matches!(first, DiscoveryOutcome::Superseded));
        assert_eq!(second.places().len(), 1);
        assert_eq!(service.send(GetGeneration).await.unwrap(), 2);
        let snapshot = selection.send(GetSelection).await.unwrap();
        assert_eq!(snapshot.generation, 2);
        assert_eq!(snapshot.places.len(), 1);
    }

    #[actix_rt::test]
    async fn test_route_failure_is_reported_and_clears_focus() {
        let search = Arc::new(ScriptedSearch::new(|_, _| Ok(vec![result("a", Some(4.5))])));
        let (service, selection) =
            start_service(Ok(straight_route(2)), Duration::ZERO, search.clone());
        selection
            .send(ToggleCategory {
                category: PlaceCategory::Hotel,
            })
            .await
            .unwrap();
        service.send(plan()).await.unwrap().unwrap();
        selection
            .send(FocusPlace {
                place_id: Some("a".to_string()),
            })
            .await
            .unwrap()
            .unwrap();

        let blank = PlanRoute {
            origin: String::new(),
            ..plan()
        };
        let error = service.send(blank).await.unwrap().unwrap_err();

        assert_eq!(error, RouteError::UnresolvedLocation);
        let snapshot = selection.send(GetSelection).await.unwrap();
        assert!(snapshot.focused.is_none());
        assert_eq!(snapshot.categories, vec![PlaceCategory::Hotel]);
    }

    #[actix_rt::test]
    async fn test_search_around_passes_through() {
        let search = Arc::new(ScriptedSearch::new(|_, category| {
            assert_eq!(category, PlaceCategory::TouristAttraction);
            Ok(vec![result("colosseum", Some(4.8))])
        }));
        let (service, _selection) = start_service(Ok(straight_route(2)), Duration::ZERO, search);

        let candidates = service
            .send(SearchAround {
                location: "Rome".to_string(),
                category: PlaceCategory::TouristAttraction,
                radius_meters: 100_000,
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, "colosseum");
    }
}
