use crate::constants::UNKNOWN_PLACE_NAME;
use crate::types::geo_point::GeoPoint;
use crate::types::place_category::PlaceCategory;
use serde::{Deserialize, Serialize};

/// A place as returned by a nearby search, before enrichment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    /// Identifier assigned by the places provider.
    pub id: String,
    pub name: String,
    pub location: GeoPoint,
    pub rating: Option<f64>,
    /// Short address text near the place.
    pub vicinity: Option<String>,
}

impl PlaceCandidate {
    /// Rating used for ranking; missing ratings rank as 0.
    pub fn rank(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub author: Option<String>,
    pub rating: Option<f64>,
    pub text: String,
}

/// Extended fields fetched for a single place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub formatted_address: Option<String>,
    pub open_now: Option<bool>,
    pub photo_reference: Option<String>,
    pub latest_review: Option<Review>,
}

/// A discovered place, possibly enriched with details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub location: GeoPoint,
    /// Category the place was found under.
    pub category: PlaceCategory,
    pub rating: Option<f64>,
    pub vicinity: Option<String>,
    /// `None` when enrichment failed or was not attempted.
    pub details: Option<PlaceDetails>,
}

impl Place {
    /// Builds a place from a search candidate alone.
    pub fn from_candidate(candidate: PlaceCandidate, category: PlaceCategory) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name,
            location: candidate.location,
            category,
            rating: candidate.rating,
            vicinity: candidate.vicinity,
            details: None,
        }
    }

    /// Merges a candidate with the details fetched for the same identifier.
    /// The detail rating wins when present.
    pub fn merge(candidate: PlaceCandidate, category: PlaceCategory, details: PlaceDetails) -> Self {
        let mut place = Place::from_candidate(candidate, category);
        if details.rating.is_some() {
            place.rating = details.rating;
        }
        if place.name == UNKNOWN_PLACE_NAME {
            if let Some(name) = &details.name {
                place.name = name.clone();
            }
        }
        place.details = Some(details);
        place
    }

    pub fn rank(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    pub fn is_enriched(&self) -> bool {
        self.details.is_some()
    }
}

impl Eq for Place {}

impl PartialEq for Place {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl std::hash::Hash for Place {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, rating: Option<f64>) -> PlaceCandidate {
        PlaceCandidate {
            id: "p1".to_string(),
            name: name.to_string(),
            location: GeoPoint::new(1.0, 2.0),
            rating,
            vicinity: Some("Main St".to_string()),
        }
    }

    #[test]
    fn test_merge_prefers_detail_rating() {
        let details = PlaceDetails {
            rating: Some(4.6),
            phone: Some("+1 555".to_string()),
            ..PlaceDetails::default()
        };
        let place = Place::merge(candidate("Diner", Some(4.1)), PlaceCategory::Restaurant, details);
        assert_eq!(place.rating, Some(4.6));
        assert_eq!(place.vicinity.as_deref(), Some("Main St"));
        assert!(place.is_enriched());
    }

    #[test]
    fn test_merge_keeps_search_rating_when_details_lack_one() {
        let place = Place::merge(
            candidate("Diner", Some(4.1)),
            PlaceCategory::Restaurant,
            PlaceDetails::default(),
        );
        assert_eq!(place.rating, Some(4.1));
    }

    #[test]
    fn test_merge_fills_unknown_name() {
        let details = PlaceDetails {
            name: Some("Blue Bottle".to_string()),
            ..PlaceDetails::default()
        };
        let place = Place::merge(candidate(UNKNOWN_PLACE_NAME, None), PlaceCategory::Cafe, details);
        assert_eq!(place.name, "Blue Bottle");
        assert_eq!(place.rank(), 0.0);
    }
}
