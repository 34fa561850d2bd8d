use actix::prelude::*;
use colored::Color;
use common::errors::SelectionError;
use common::logger::Logger;
use common::messages::{
    ApplyResults, BeginSearch, FocusPlace, GetCategories, GetSelection, ToggleCategory,
};
use common::types::dtos::SelectionSnapshot;
use common::types::place::Place;
use common::types::place_category::PlaceCategory;

/// The `SelectionState` actor holds what the user is looking at: the active
/// categories, the result list of the latest search and the focused place.
///
/// ## Responsibilities:
/// - Toggle categories, keeping the order in which they were selected.
/// - Install search results, ignoring completions of superseded searches.
/// - Track the focused place, which must belong to the current result list.
pub struct SelectionState {
    /// Active categories in selection order.
    pub categories: Vec<PlaceCategory>,
    /// Result list of the latest completed search.
    pub places: Vec<Place>,
    /// Identifier of the focused place.
    pub focused: Option<String>,
    /// Generation of the latest search that started.
    pub generation: u64,
    pub logger: Logger,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::with_categories(Vec::new())
    }

    pub fn with_categories(categories: Vec<PlaceCategory>) -> Self {
        let mut state = SelectionState {
            categories: Vec::new(),
            places: Vec::new(),
            focused: None,
            generation: 0,
            logger: Logger::new("Selection", Color::Magenta),
        };
        for category in categories {
            if !state.categories.contains(&category) {
                state.categories.push(category);
            }
        }
        state
    }

    fn focused_place(&self) -> Option<Place> {
        let id = self.focused.as_ref()?;
        self.places.iter().find(|place| &place.id == id).cloned()
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

impl Actor for SelectionState {
    type Context = Context<Self>;
}

impl Handler<ToggleCategory> for SelectionState {
    type Result = MessageResult<ToggleCategory>;

    fn handle(&mut self, msg: ToggleCategory, _ctx: &mut Self::Context) -> Self::Result {
        if let Some(index) = self.categories.iter().position(|c| *c == msg.category) {
            self.categories.remove(index);
            self.logger.debug(format!("Category {} deselected.", msg.category));
        } else {
            self.categories.push(msg.category);
            self.logger.debug(format!("Category {} selected.", msg.category));
        }
        MessageResult(self.categories.clone())
    }
}

impl Handler<GetCategories> for SelectionState {
    type Result = MessageResult<GetCategories>;

    fn handle(&mut self, _msg: GetCategories, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.categories.clone())
    }
}

/// Handles the start of a new search by clearing the focused place and the
/// previous results. Categories are kept.
impl Handler<BeginSearch> for SelectionState {
    type Result = ();

    fn handle(&mut self, msg: BeginSearch, _ctx: &mut Self::Context) -> Self::Result {
        if msg.generation <= self.generation {
            self.logger.warn(format!(
                "Ignoring start of search {}, already at {}.",
                msg.generation, self.generation
            ));
            return;
        }
        self.generation = msg.generation;
        self.places.clear();
        self.focused = None;
    }
}

impl Handler<ApplyResults> for SelectionState {
    type Result = bool;

    fn handle(&mut self, msg: ApplyResults, _ctx: &mut Self::Context) -> Self::Result {
        if msg.generation != self.generation {
            self.logger.warn(format!(
                "Discarding {} places from stale search {} (current {}).",
                msg.places.len(),
                msg.generation,
                self.generation
            ));
            return false;
        }
        self.logger
            .info(format!("Showing {} places.", msg.places.len()));
        self.places = msg.places;
        self.focused = None;
        true
    }
}

impl Handler<FocusPlace> for SelectionState {
    type Result = Result<Option<Place>, SelectionError>;

    fn handle(&mut self, msg: FocusPlace, _ctx: &mut Self::Context) -> Self::Result {
        match msg.place_id {
            None => {
                self.focused = None;
                Ok(None)
            }
            Some(id) => {
                if !self.places.iter().any(|place| place.id == id) {
                    return Err(SelectionError::UnknownPlace(id));
                }
                self.focused = Some(id);
                Ok(self.focused_place())
            }
        }
    }
}

impl Handler<GetSelection> for SelectionState {
    type Result = MessageResult<GetSelection>;

    fn handle(&mut self, _msg: GetSelection, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(SelectionSnapshot {
            categories: self.categories.clone(),
            places: self.places.clone(),
            focused: self.focused_place(),
            generation: self.generation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::types::geo_point::GeoPoint;

    fn test_place(id: &str, rating: f64) -> Place {
        Place {
            id: id.to_string(),
            name: format!("Place {}", id),
            location: GeoPoint::new(0.0, 0.0),
            category: PlaceCategory::Restaurant,
            rating: Some(rating),
            vicinity: None,
            details: None,
        }
    }

    #[actix_rt::test]
    async fn test_toggle_adds_then_removes_in_selection_order() {
        let selection = SelectionState::new().start();

        selection
            .send(ToggleCategory {
                category: PlaceCategory::Cafe,
            })
            .await
            .unwrap();
        let categories = selection
            .send(ToggleCategory {
                category: PlaceCategory::Restaurant,
            })
            .await
            .unwrap();
        assert_eq!(categories, vec![PlaceCategory::Cafe, PlaceCategory::Restaurant]);

        let categories = selection
            .send(ToggleCategory {
                category: PlaceCategory::Cafe,
            })
            .await
            .unwrap();
        assert_eq!(categories, vec![PlaceCategory::Restaurant]);
    }

    #[actix_rt::test]
    async fn test_with_categories_drops_duplicates() {
        let selection = SelectionState::with_categories(vec![
            PlaceCategory::Hotel,
            PlaceCategory::Hotel,
            PlaceCategory::Cafe,
        ])
        .start();
        let categories = selection.send(GetCategories).await.unwrap();
        assert_eq!(categories, vec![PlaceCategory::Hotel, PlaceCategory::Cafe]);
    }

    #[actix_rt::test]
    async fn test_focus_requires_place_in_results() {
        let selection = SelectionState::new().start();
        selection.send(BeginSearch { generation: 1 }).await.unwrap();
        let applied = selection
            .send(ApplyResults {
                generation: 1,
                places: vec![test_place("a", 4.5), test_place("b", 4.1)],
            })
            .await
            .unwrap();
        assert!(applied);

        let focused = selection
            .send(FocusPlace {
                place_id: Some("b".to_string()),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(focused.map(|p| p.id), Some("b".to_string()));

        let missing = selection
            .send(FocusPlace {
                place_id: Some("zzz".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(missing, Err(SelectionError::UnknownPlace("zzz".to_string())));

        // a failed focus leaves the previous one in place
        let snapshot = selection.send(GetSelection).await.unwrap();
        assert_eq!(snapshot.focused.map(|p| p.id), Some("b".to_string()));

        let cleared = selection.send(FocusPlace { place_id: None }).await.unwrap();
        assert_eq!(cleared, Ok(None));
    }

    #[actix_rt::test]
    async fn test_new_search_clears_focus_but_keeps_categories() {
        let selection = SelectionState::with_categories(vec![PlaceCategory::Hotel]).start();
        selection.send(BeginSearch { generation: 1 }).await.unwrap();
        selection
            .send(ApplyResults {
                generation: 1,
                places: vec![test_place("a", 4.5)],
            })
            .await
            .unwrap();
        selection
            .send(FocusPlace {
                place_id: Some("a".to_string()),
            })
            .await
            .unwrap()
            .unwrap();

        selection.send(BeginSearch { generation: 2 }).await.unwrap();

        let snapshot = selection.send(GetSelection).await.unwrap();
        assert!(snapshot.focused.is_none());
        assert!(snapshot.places.is_empty());
        assert_eq!(snapshot.categories, vec![PlaceCategory::Hotel]);
        assert_eq!(snapshot.generation, 2);
    }

    #[actix_rt::test]
    async fn test_stale_results_are_discarded() {
        let selection = SelectionState::new().start();
        selection.send(BeginSearch { generation: 1 }).await.unwrap();
        selection.send(BeginSearch { generation: 2 }).await.unwrap();

        let applied = selection
            .send(ApplyResults {
                generation: 1,
                places: vec![test_place("old", 5.0)],
            })
            .await
            .unwrap();
        assert!(!applied);

        let applied = selection
            .send(ApplyResults {
                generation: 2,
                places: vec![test_place("new", 4.2)],
            })
            .await
            .unwrap();
        assert!(applied);

        let snapshot = selection.send(GetSelection).await.unwrap();
        assert_eq!(snapshot.places.len(), 1);
        assert_eq!(snapshot.places[0].id, "new");
    }
}
