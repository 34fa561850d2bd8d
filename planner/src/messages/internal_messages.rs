use actix::Message;
use common::types::dtos::DiscoveryOutcome;
use common::types::place::{Place, PlaceCandidate};
use common::types::place_category::PlaceCategory;
use common::types::trip::TripWithExpenses;

/// Prints the outcome of a route search together with the category legend.
#[derive(Message)]
#[rtype(result = "()")]
pub struct ShowOutcome {
    pub outcome: DiscoveryOutcome,
    pub categories: Vec<PlaceCategory>,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct ShowCandidates {
    pub location: String,
    pub category: PlaceCategory,
    pub candidates: Vec<PlaceCandidate>,
}

/// Asks the user to pick one of `places` by number. Answers `None` when the
/// user is done.
#[derive(Message)]
#[rtype(result = "Option<String>")]
pub struct AskFocus {
    pub places: Vec<Place>,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct ShowPlace {
    pub place: Place,
}

#[derive(Message)]
#[rtype(result = "()")]
pub struct ShowTrips {
    pub trips: Vec<TripWithExpenses>,
}
