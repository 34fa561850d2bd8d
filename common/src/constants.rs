use std::time::Duration;

/// Target number of sample points taken along a route.
pub const SAMPLE_POINT_COUNT: usize = 5;
/// Radius, in meters, of each nearby search along a route.
pub const SEARCH_RADIUS_METERS: u32 = 5_000;
/// Radius, in meters, of a single-location attraction search.
pub const AROUND_RADIUS_METERS: u32 = 100_000;
pub const MIN_RATING_THRESHOLD: f64 = 4.0;
pub const RESULT_CAP: usize = 15;
pub const TIMEOUT_SECONDS: u64 = 10;
pub const CALL_TIMEOUT: Duration = Duration::from_secs(TIMEOUT_SECONDS);

pub const UNKNOWN_PLACE_NAME: &str = "Unknown Place";
pub const GOOGLE_MAPS_API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";
pub const DEBUG_LOG_VAR: &str = "PLANNER_DEBUG";
pub const GOOGLE_MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Fields requested from the place-detail collaborator.
pub const DETAIL_FIELDS: [&str; 8] = [
    "name",
    "rating",
    "formatted_phone_number",
    "opening_hours",
    "website",
    "formatted_address",
    "photos",
    "reviews",
];

pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
