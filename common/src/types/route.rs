use crate::types::geo_point::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "driving" => Ok(TravelMode::Driving),
            "walking" => Ok(TravelMode::Walking),
            "bicycling" => Ok(TravelMode::Bicycling),
            "transit" => Ok(TravelMode::Transit),
            other => Err(format!("unknown travel mode '{}'", other)),
        }
    }
}

/// A computed route as returned by the routing collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Route {
    pub origin: String,
    pub destination: String,
    /// Ordered overview path of the route.
    pub path: Vec<GeoPoint>,
    pub distance_meters: u64,
    pub duration_seconds: u64,
}

impl Route {
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Human-readable `"12.3 km, 1 h 05 min"` summary.
    pub fn summary(&self) -> String {
        let km = self.distance_meters as f64 / 1000.0;
        let hours = self.duration_seconds / 3600;
        let minutes = (self.duration_seconds % 3600) / 60;
        if hours > 0 {
            format!("{:.1} km, {} h {:02} min", km, hours, minutes)
        } else {
            format!("{:.1} km, {} min", km, minutes)
        }
    }
}
