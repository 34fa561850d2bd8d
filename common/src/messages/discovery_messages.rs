use crate::errors::{RouteError, SearchError};
use crate::types::dtos::DiscoveryOutcome;
use crate::types::place::PlaceCandidate;
use crate::types::place_category::PlaceCategory;
use crate::types::route::TravelMode;
use actix::Message;
use serde::{Deserialize, Serialize};

/// Computes a route and discovers places along it for the active categories.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "Result<DiscoveryOutcome, RouteError>")]
pub struct PlanRoute {
    pub origin: String,
    pub destination: String,
    pub mode: TravelMode,
}

/// Searches around a single named location.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "Result<Vec<PlaceCandidate>, SearchError>")]
pub struct SearchAround {
    pub location: String,
    pub category: PlaceCategory,
    pub radius_meters: u32,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "u64")]
pub struct GetGeneration;
