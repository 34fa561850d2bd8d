use clap::{Args, Parser, Subcommand};
use common::config::{FilterMode, PlannerConfig};
use common::types::place_category::PlaceCategory;
use common::types::route::TravelMode;
use common::types::trip::{Currency, ExpenseDraft, ExpenseType};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "planner", version, about = "Route-aware travel planner")]
pub struct Cli {
    /// JSON configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Offline provider document, used instead of Google Maps.
    #[arg(long, global = true)]
    pub fixture: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Plan a route and discover places along it.
    Route(RouteArgs),
    /// Search places around a single location.
    Search(SearchArgs),
    /// Record a trip and its expenses for a demo session.
    Trips(TripsArgs),
}

#[derive(Args, Debug)]
pub struct RouteArgs {
    pub origin: String,
    pub destination: String,
    /// Categories to discover, comma separated (restaurant, hotel, cafe,
    /// tourist_attraction).
    #[arg(short, long = "category", value_delimiter = ',')]
    pub categories: Vec<PlaceCategory>,
    #[arg(short, long, default_value = "driving")]
    pub mode: TravelMode,
    /// Search radius around each sample point, in meters.
    #[arg(long)]
    pub radius: Option<u32>,
    /// Minimum rating kept in strict mode.
    #[arg(long)]
    pub threshold: Option<f64>,
    /// Maximum number of places shown.
    #[arg(long)]
    pub cap: Option<usize>,
    /// Number of sample points taken along the route.
    #[arg(long)]
    pub samples: Option<usize>,
    /// Per-call timeout, in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,
    /// Keep every candidate regardless of rating.
    #[arg(long)]
    pub keep_all: bool,
    /// Print the results without asking for a place to focus.
    #[arg(long)]
    pub no_prompt: bool,
}

impl RouteArgs {
    /// Applies the command-line overrides on top of the loaded configuration.
    pub fn apply_to(&self, config: &mut PlannerConfig) {
        let discovery = &mut config.discovery;
        if let Some(radius) = self.radius {
            discovery.radius_meters = radius;
        }
        if let Some(threshold) = self.threshold {
            discovery.rating_threshold = threshold;
        }
        if let Some(cap) = self.cap {
            discovery.result_cap = cap;
        }
        if let Some(samples) = self.samples {
            discovery.sample_count = samples;
        }
        if let Some(seconds) = self.timeout {
            discovery.call_timeout = Duration::from_secs(seconds);
        }
        if self.keep_all {
            discovery.filter_mode = FilterMode::KeepAll;
        }
    }
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    pub location: String,
    #[arg(short, long, default_value = "tourist_attraction")]
    pub category: PlaceCategory,
    /// Search radius, in meters.
    #[arg(long)]
    pub radius: Option<u32>,
}

#[derive(Args, Debug)]
pub struct TripsArgs {
    pub title: String,
    pub start_location: String,
    pub destination: String,
    /// Expense as `payee:amount[:currency[:split[:type[:description]]]]`.
    /// May be repeated.
    #[arg(short, long = "expense", value_parser = parse_expense)]
    pub expenses: Vec<ExpenseDraft>,
}

/// Parses `payee:amount[:currency[:split[:type[:description]]]]`. Missing
/// trailing fields keep the draft defaults.
pub fn parse_expense(raw: &str) -> Result<ExpenseDraft, String> {
    let mut fields = raw.splitn(6, ':').map(str::trim);
    let mut draft = ExpenseDraft::default();

    draft.payee = fields.next().unwrap_or_default().to_string();
    draft.amount = fields
        .next()
        .ok_or_else(|| format!("missing amount in '{}'", raw))?
        .parse()
        .map_err(|_| format!("invalid amount in '{}'", raw))?;
    if let Some(currency) = fields.next().filter(|f| !f.is_empty()) {
        draft.currency = currency.parse::<Currency>()?;
    }
    if let Some(split) = fields.next().filter(|f| !f.is_empty()) {
        draft.split_count = split
            .parse()
            .map_err(|_| format!("invalid split count in '{}'", raw))?;
    }
    if let Some(kind) = fields.next().filter(|f| !f.is_empty()) {
        draft.expense_type = kind.parse::<ExpenseType>()?;
    }
    if let Some(description) = fields.next() {
        draft.description = description.to_string();
    }
    Ok(draft)
}
