//! Google Maps Web Service client: Directions, Geocoding, Places Nearby Search
//! and Place Details over HTTPS.

use crate::providers::polyline;
use crate::providers::{PlaceDetailsProvider, PlaceSearchProvider, RouteProvider, SearchResult};
use async_trait::async_trait;
use colored::Color;
use common::constants::GOOGLE_MAPS_BASE_URL;
use common::errors::{ProviderError, RouteError};
use common::logger::Logger;
use common::types::geo_point::GeoPoint;
use common::types::place::{PlaceDetails, Review};
use common::types::place_category::PlaceCategory;
use common::types::route::{Route, TravelMode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";
const STATUS_NOT_FOUND: &str = "NOT_FOUND";

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

impl From<LatLng> for GeoPoint {
    fn from(value: LatLng) -> Self {
        GeoPoint::new(value.lat, value.lng)
    }
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct ValueField {
    value: u64,
}

#[derive(Debug, Deserialize)]
struct DirectionsLeg {
    distance: Option<ValueField>,
    duration: Option<ValueField>,
    start_address: Option<String>,
    end_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OverviewPolyline {
    points: String,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    overview_polyline: OverviewPolyline,
    #[serde(default)]
    legs: Vec<DirectionsLeg>,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct NearbyResult {
    place_id: Option<String>,
    name: Option<String>,
    geometry: Option<Geometry>,
    rating: Option<f64>,
    vicinity: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NearbyResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<NearbyResult>,
}

#[derive(Debug, Deserialize)]
struct OpeningHours {
    open_now: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    photo_reference: String,
}

#[derive(Debug, Deserialize)]
struct GoogleReview {
    author_name: Option<String>,
    rating: Option<f64>,
    #[serde(default)]
    text: String,
    /// Seconds since the epoch.
    time: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct DetailsResult {
    name: Option<String>,
    rating: Option<f64>,
    formatted_phone_number: Option<String>,
    opening_hours: Option<OpeningHours>,
    website: Option<String>,
    formatted_address: Option<String>,
    #[serde(default)]
    photos: Vec<Photo>,
    #[serde(default)]
    reviews: Vec<GoogleReview>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    error_message: Option<String>,
    result: Option<DetailsResult>,
}

impl From<DetailsResult> for PlaceDetails {
    fn from(result: DetailsResult) -> Self {
        let photo_reference = result.photos.into_iter().next().map(|p| p.photo_reference);
        // Most recent review; reviews without a timestamp rank oldest.
        let latest_review = result
            .reviews
            .into_iter()
            .enumerate()
            .max_by_key(|(index, review)| (review.time.unwrap_or(i64::MIN), std::cmp::Reverse(*index)))
            .map(|(_, review)| Review {
                author: review.author_name,
                rating: review.rating,
                text: review.text,
            });
        PlaceDetails {
            name: result.name,
            rating: result.rating,
            phone: result.formatted_phone_number,
            website: result.website,
            formatted_address: result.formatted_address,
            open_now: result.opening_hours.and_then(|hours| hours.open_now),
            photo_reference,
            latest_review,
        }
    }
}

fn status_error(status: String, error_message: Option<String>) -> ProviderError {
    match error_message {
        Some(message) => ProviderError::Status {
            status: format!("{} ({})", status, message),
        },
        None => ProviderError::Status { status },
    }
}

/// Client for the Google Maps Web Services.
pub struct GoogleMapsClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    logger: Logger,
}

impl GoogleMapsClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, GOOGLE_MAPS_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            logger: Logger::new("Google Maps", Color::Cyan),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let url = format!("{}/{}/json", self.base_url, endpoint);
        self.logger.debug(format!("GET {}", url));
        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RouteProvider for GoogleMapsClient {
    async fn route(
        &self,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> Result<Route, RouteError> {
        let params = [
            ("origin", origin.to_string()),
            ("destination", destination.to_string()),
            ("mode", mode.as_str().to_string()),
        ];
        let response: DirectionsResponse = self
            .get_json("directions", &params)
            .await
            .map_err(|e| RouteError::Provider(e.to_string()))?;

        match response.status.as_str() {
            STATUS_OK => {}
            STATUS_NOT_FOUND => return Err(RouteError::UnresolvedLocation),
            STATUS_ZERO_RESULTS => {
                return Err(RouteError::NoRoute {
                    origin: origin.to_string(),
                    destination: destination.to_string(),
                });
            }
            _ => {
                return Err(RouteError::Provider(
                    status_error(response.status, response.error_message).to_string(),
                ));
            }
        }

        let first = response
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| RouteError::NoRoute {
                origin: origin.to_string(),
                destination: destination.to_string(),
            })?;
        let path = polyline::decode(&first.overview_polyline.points)
            .map_err(|e| RouteError::Provider(e.to_string()))?;

        let distance_meters = first
            .legs
            .iter()
            .filter_map(|leg| leg.distance.as_ref().map(|d| d.value))
            .sum();
        let duration_seconds = first
            .legs
            .iter()
            .filter_map(|leg| leg.duration.as_ref().map(|d| d.value))
            .sum();
        let resolved_origin = first
            .legs
            .first()
            .and_then(|leg| leg.start_address.clone())
            .unwrap_or_else(|| origin.to_string());
        let resolved_destination = first
            .legs
            .last()
            .and_then(|leg| leg.end_address.clone())
            .unwrap_or_else(|| destination.to_string());

        Ok(Route {
            origin: resolved_origin,
            destination: resolved_destination,
            path,
            distance_meters,
            duration_seconds,
        })
    }

    async fn geocode(&self, address: &str) -> Result<GeoPoint, RouteError> {
        let response: GeocodeResponse = self
            .get_json("geocode", &[("address", address.to_string())])
            .await
            .map_err(|e| RouteError::Provider(e.to_string()))?;
        match response.status.as_str() {
            STATUS_OK => response
                .results
                .into_iter()
                .next()
                .map(|result| result.geometry.location.into())
                .ok_or(RouteError::UnresolvedLocation),
            STATUS_ZERO_RESULTS => Err(RouteError::UnresolvedLocation),
            _ => Err(RouteError::Provider(
                status_error(response.status, response.error_message).to_string(),
            )),
        }
    }
}

#[async_trait]
impl PlaceSearchProvider for GoogleMapsClient {
    async fn nearby_search(
        &self,
        center: GeoPoint,
        radius_meters: u32,
        category: PlaceCategory,
    ) -> Result<Vec<SearchResult>, ProviderError> {
        let params = [
            ("location", center.to_string()),
            ("radius", radius_meters.to_string()),
            ("type", category.provider_type().to_string()),
        ];
        let response: NearbyResponse = self.get_json("place/nearbysearch", &params).await?;
        match response.status.as_str() {
            STATUS_OK => Ok(response
                .results
                .into_iter()
                .map(|result| SearchResult {
                    place_id: result.place_id,
                    name: result.name,
                    location: result.geometry.map(|g| g.location.into()),
                    rating: result.rating,
                    vicinity: result.vicinity,
                })
                .collect()),
            STATUS_ZERO_RESULTS => Ok(Vec::new()),
            _ => Err(status_error(response.status, response.error_message)),
        }
    }
}

#[async_trait]
impl PlaceDetailsProvider for GoogleMapsClient {
    async fn place_details(
        &self,
        place_id: &str,
        fields: &[&str],
    ) -> Result<PlaceDetails, ProviderError> {
        let params = [
            ("place_id", place_id.to_string()),
            ("fields", fields.join(",")),
        ];
        let response: DetailsResponse = self.get_json("place/details", &params).await?;
        if response.status != STATUS_OK {
            return Err(status_error(response.status, response.error_message));
        }
        response
            .result
            .map(PlaceDetails::from)
            .ok_or_else(|| ProviderError::Decode("details response without result".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_pick_most_recent_review() {
        let raw = r#"{
            "status": "OK",
            "result": {
                "name": "Harbor Cafe",
                "rating": 4.4,
                "opening_hours": {"open_now": true},
                "photos": [{"photo_reference": "ref-1"}, {"photo_reference": "ref-2"}],
                "reviews": [
                    {"author_name": "A", "rating": 3, "text": "old", "time": 100},
                    {"author_name": "B", "rating": 5, "text": "new", "time": 200}
                ]
            }
        }"#;
        let response: DetailsResponse = serde_json::from_str(raw).unwrap();
        let details = PlaceDetails::from(response.result.unwrap());
        assert_eq!(details.open_now, Some(true));
        assert_eq!(details.photo_reference.as_deref(), Some("ref-1"));
        let review = details.latest_review.unwrap();
        assert_eq!(review.text, "new");
        assert_eq!(review.rating, Some(5.0));
    }

    #[test]
    fn test_details_without_timestamps_keep_first_review() {
        let raw = r#"{
            "reviews": [
                {"rating": 4, "text": "first"},
                {"rating": 2, "text": "second"}
            ]
        }"#;
        let result: DetailsResult = serde_json::from_str(raw).unwrap();
        let details = PlaceDetails::from(result);
        assert_eq!(details.latest_review.unwrap().text, "first");
        assert_eq!(details.open_now, None);
    }

    #[test]
    fn test_nearby_response_tolerates_missing_fields() {
        let raw = r#"{
            "status": "OK",
            "results": [
                {"place_id": "a", "name": "Inn", "geometry": {"location": {"lat": 1.0, "lng": 2.0}}},
                {"name": "No id"}
            ]
        }"#;
        let response: NearbyResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.results.len(), 2);
        assert!(response.results[1].place_id.is_none());
    }

    #[test]
    fn test_status_error_includes_message() {
        let error = status_error("REQUEST_DENIED".into(), Some("bad key".into()));
        assert_eq!(error.to_string(), "provider returned status REQUEST_DENIED (bad key)");
    }
}
