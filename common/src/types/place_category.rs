use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categories of places that can be discovered along a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceCategory {
    Restaurant,
    Hotel,
    Cafe,
    TouristAttraction,
}

/// Presentation attributes of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    pub category: PlaceCategory,
    /// Type tag understood by the places provider.
    pub provider_type: &'static str,
    pub label: &'static str,
    pub marker_color: &'static str,
}

pub const CATEGORY_TABLE: [CategoryInfo; 4] = [
    CategoryInfo {
        category: PlaceCategory::Restaurant,
        provider_type: "restaurant",
        label: "Restaurants",
        marker_color: "red",
    },
    CategoryInfo {
        category: PlaceCategory::Hotel,
        provider_type: "hotel",
        label: "Hotels",
        marker_color: "blue",
    },
    CategoryInfo {
        category: PlaceCategory::Cafe,
        provider_type: "cafe",
        label: "Cafes",
        marker_color: "yellow",
    },
    CategoryInfo {
        category: PlaceCategory::TouristAttraction,
        provider_type: "tourist_attraction",
        label: "Attractions",
        marker_color: "green",
    },
];

impl PlaceCategory {
    pub const ALL: [PlaceCategory; 4] = [
        PlaceCategory::Restaurant,
        PlaceCategory::Hotel,
        PlaceCategory::Cafe,
        PlaceCategory::TouristAttraction,
    ];

    pub fn info(&self) -> &'static CategoryInfo {
        let index = match self {
            PlaceCategory::Restaurant => 0,
            PlaceCategory::Hotel => 1,
            PlaceCategory::Cafe => 2,
            PlaceCategory::TouristAttraction => 3,
        };
        &CATEGORY_TABLE[index]
    }

    pub fn provider_type(&self) -> &'static str {
        self.info().provider_type
    }

    pub fn label(&self) -> &'static str {
        self.info().label
    }

    pub fn marker_color(&self) -> &'static str {
        self.info().marker_color
    }
}

impl fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown category '{}', expected one of: restaurant, hotel, cafe, tourist_attraction",
            self.0
        )
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for PlaceCategory {
    type Err = UnknownCategory;

    /// Accepts either the provider tag or the display label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        CATEGORY_TABLE
            .iter()
            .find(|info| {
                info.provider_type.eq_ignore_ascii_case(needle)
                    || info.label.eq_ignore_ascii_case(needle)
            })
            .map(|info| info.category)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
