use crate::errors::SelectionError;
use crate::types::dtos::SelectionSnapshot;
use crate::types::place::Place;
use crate::types::place_category::PlaceCategory;
use actix::Message;
use serde::{Deserialize, Serialize};

/// Adds the category if absent, removes it if present. Replies with the new
/// active set.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "Vec<PlaceCategory>")]
pub struct ToggleCategory {
    pub category: PlaceCategory,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "Vec<PlaceCategory>")]
pub struct GetCategories;

/// Announces that search `generation` has started.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "()")]
pub struct BeginSearch {
    pub generation: u64,
}

/// Installs the results of search `generation`. Replies whether they were
/// applied.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "bool")]
pub struct ApplyResults {
    pub generation: u64,
    pub places: Vec<Place>,
}

/// Focuses a place of the current result list, or clears focus with `None`.
#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "Result<Option<Place>, SelectionError>")]
pub struct FocusPlace {
    pub place_id: Option<String>,
}

#[derive(Message, Debug, Clone, Serialize, Deserialize)]
#[rtype(result = "SelectionSnapshot")]
pub struct GetSelection;
