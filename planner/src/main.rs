mod cli;
mod messages;
mod planner_actors;
mod render;

use actix::prelude::*;
use clap::Parser;
use cli::{Cli, Command, RouteArgs, SearchArgs, TripsArgs};
use colored::Color;
use common::config::PlannerConfig;
use common::constants::GOOGLE_MAPS_API_KEY_VAR;
use common::errors::{ConfigError, RouteError, SearchError, TripError};
use common::logger::Logger;
use common::messages::{
    AddExpense, AddTrip, FocusPlace, GetCategories, LoadTrips, PlanRoute, SearchAround, SignIn,
    SignOut,
};
use common::types::session::Session;
use common::utils::print_welcome_message;
use discovery::discovery_actors::discovery_service::DiscoveryService;
use discovery::discovery_actors::selection_state::SelectionState;
use discovery::orchestrator::DiscoveryOrchestrator;
use discovery::providers::fixture::FixtureProvider;
use discovery::providers::google::GoogleMapsClient;
use discovery::providers::{PlaceDetailsProvider, PlaceSearchProvider, RouteProvider};
use messages::internal_messages::{AskFocus, ShowCandidates, ShowOutcome, ShowPlace, ShowTrips};
use planner_actors::ui_handler::UIHandler;
use std::sync::Arc;
use thiserror::Error;
use trips::trip_ledger::TripLedger;

const DEMO_USER_ID: &str = "demo-user";
const DEMO_USER_EMAIL: &str = "demo@planner.local";

#[derive(Debug, Error)]
enum PlannerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("set GOOGLE_MAPS_API_KEY or pass --fixture to choose a provider")]
    MissingCredentials,
    #[error("{}", .0.user_message())]
    Route(#[from] RouteError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Trip(#[from] TripError),
    #[error("actor mailbox failed: {0}")]
    Mailbox(#[from] MailboxError),
}

/// The three collaborators discovery talks to.
struct Providers {
    router: Arc<dyn RouteProvider>,
    search: Arc<dyn PlaceSearchProvider>,
    details: Arc<dyn PlaceDetailsProvider>,
}

impl Providers {
    fn from_config(config: &PlannerConfig, logger: &Logger) -> Result<Self, PlannerError> {
        if let Some(path) = &config.fixture_path {
            logger.info(format!("Using offline places from {}.", path));
            let fixture = Arc::new(FixtureProvider::from_file(path)?);
            return Ok(Self {
                router: fixture.clone(),
                search: fixture.clone(),
                details: fixture,
            });
        }
        let api_key = std::env::var(GOOGLE_MAPS_API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(PlannerError::MissingCredentials)?;
        let google = Arc::new(GoogleMapsClient::new(api_key));
        Ok(Self {
            router: google.clone(),
            search: google.clone(),
            details: google,
        })
    }
}

fn load_config(cli: &Cli) -> Result<PlannerConfig, PlannerError> {
    let mut config = match &cli.config {
        Some(path) => PlannerConfig::from_file(path)?,
        None => PlannerConfig::default(),
    };
    if let Some(fixture) = &cli.fixture {
        config.fixture_path = Some(fixture.display().to_string());
    }
    Ok(config)
}

fn start_discovery(
    config: &PlannerConfig,
    selection: Addr<SelectionState>,
    logger: &Logger,
) -> Result<Addr<DiscoveryService>, PlannerError> {
    let providers = Providers::from_config(config, logger)?;
    let orchestrator = Arc::new(DiscoveryOrchestrator::new(
        providers.router,
        providers.search,
        providers.details,
        config.discovery.call_timeout,
    ));
    Ok(DiscoveryService::new(orchestrator, config.discovery.clone(), selection).start())
}

async fn run_route(
    args: RouteArgs,
    mut config: PlannerConfig,
    ui: Addr<UIHandler>,
    logger: &Logger,
) -> Result<(), PlannerError> {
    args.apply_to(&mut config);
    config.discovery.validate()?;

    let selection = SelectionState::with_categories(args.categories).start();
    let service = start_discovery(&config, selection.clone(), logger)?;

    let outcome = service
        .send(PlanRoute {
            origin: args.origin,
            destination: args.destination,
            mode: args.mode,
        })
        .await??;
    let places = outcome.places().to_vec();
    let categories = selection.send(GetCategories).await?;
    ui.send(ShowOutcome {
        outcome,
        categories,
    })
    .await?;

    if args.no_prompt {
        return Ok(());
    }
    while let Some(place_id) = ui.send(AskFocus { places: places.clone() }).await? {
        match selection
            .send(FocusPlace {
                place_id: Some(place_id),
            })
            .await?
        {
            Ok(Some(place)) => ui.send(ShowPlace { place }).await?,
            Ok(None) => {}
            Err(e) => logger.warn(e.to_string()),
        }
    }
    Ok(())
}

/// Radius of a single-location search: the flag if given, else the
/// configured default. Zero is rejected.
fn search_radius(args: &SearchArgs, config: &PlannerConfig) -> Result<u32, PlannerError> {
    match args.radius.unwrap_or(config.around_radius_meters) {
        0 => Err(ConfigError::Invalid("search radius must be positive".into()).into()),
        radius => Ok(radius),
    }
}

async fn run_search(
    args: SearchArgs,
    config: PlannerConfig,
    ui: Addr<UIHandler>,
    logger: &Logger,
) -> Result<(), PlannerError> {
    let radius_meters = search_radius(&args, &config)?;
    let selection = SelectionState::new().start();
    let service = start_discovery(&config, selection, logger)?;
    let candidates = service
        .send(SearchAround {
            location: args.location.clone(),
            category: args.category,
            radius_meters,
        })
        .await??;
    ui.send(ShowCandidates {
        location: args.location,
        category: args.category,
        candidates,
    })
    .await?;
    Ok(())
}

async fn run_trips(args: TripsArgs, ui: Addr<UIHandler>) -> Result<(), PlannerError> {
    let ledger = TripLedger::new().start();
    ledger
        .send(SignIn {
            session: Session::new(DEMO_USER_ID, DEMO_USER_EMAIL),
        })
        .await?;

    let trip = ledger
        .send(AddTrip {
            title: args.title,
            start_location: args.start_location,
            destination: args.destination,
        })
        .await??;
    for draft in args.expenses {
        ledger
            .send(AddExpense {
                trip_id: trip.id.clone(),
                draft,
            })
            .await??;
    }

    let trips = ledger.send(LoadTrips).await??;
    ui.send(ShowTrips { trips }).await?;
    ledger.send(SignOut).await?;
    Ok(())
}

async fn run(cli: Cli, logger: &Logger) -> Result<(), PlannerError> {
    let config = load_config(&cli)?;
    let ui = UIHandler::new(Logger::new("UI", Color::White)).start();
    match cli.command {
        Command::Route(args) => run_route(args, config, ui, logger).await,
        Command::Search(args) => run_search(args, config, ui, logger).await,
        Command::Trips(args) => run_trips(args, ui).await,
    }
}

#[actix::main]
async fn main() {
    let cli = Cli::parse();
    let logger = Logger::new("Planner", Color::BrightBlue);
    print_welcome_message();

    if let Err(e) = run(cli, &logger).await {
        logger.error(e.to_string());
        std::process::exit(1);
    }
}
