use crate::types::place::Place;
use crate::types::place_category::PlaceCategory;
use crate::types::route::Route;
use serde::{Deserialize, Serialize};

/// Result of a route search as seen by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DiscoveryOutcome {
    /// Route computed; no categories were selected so no places were searched.
    RouteOnly { route: Route },
    /// Route computed and places searched. `places` may be empty.
    Places { route: Route, places: Vec<Place> },
    /// A newer search started before this one completed.
    Superseded,
}

impl DiscoveryOutcome {
    pub fn route(&self) -> Option<&Route> {
        match self {
            DiscoveryOutcome::RouteOnly { route } | DiscoveryOutcome::Places { route, .. } => {
                Some(route)
            }
            DiscoveryOutcome::Superseded => None,
        }
    }

    pub fn places(&self) -> &[Place] {
        match self {
            DiscoveryOutcome::Places { places, .. } => places,
            _ => &[],
        }
    }
}

/// Read-only view of the selection state.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SelectionSnapshot {
    /// Active categories in the order they were selected.
    pub categories: Vec<PlaceCategory>,
    /// Result list of the latest completed search, best rated first.
    pub places: Vec<Place>,
    pub focused: Option<Place>,
    pub generation: u64,
}
