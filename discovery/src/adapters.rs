use crate::providers::{PlaceDetailsProvider, PlaceSearchProvider, SearchResult};
use common::constants::{DETAIL_FIELDS, UNKNOWN_PLACE_NAME};
use common::errors::ProviderError;
use common::types::geo_point::GeoPoint;
use common::types::place::{PlaceCandidate, PlaceDetails};
use common::types::place_category::PlaceCategory;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Wraps a single nearby-search call and normalizes its records.
#[derive(Clone)]
pub struct PlaceQueryAdapter {
    provider: Arc<dyn PlaceSearchProvider>,
    call_timeout: Duration,
}

impl PlaceQueryAdapter {
    pub fn new(provider: Arc<dyn PlaceSearchProvider>, call_timeout: Duration) -> Self {
        Self {
            provider,
            call_timeout,
        }
    }

    /// Issues one search around `center`. Records missing an identifier or a
    /// location are dropped.
    pub async fn search(
        &self,
        center: GeoPoint,
        radius_meters: u32,
        category: PlaceCategory,
    ) -> Result<Vec<PlaceCandidate>, ProviderError> {
        let results = timeout(
            self.call_timeout,
            self.provider.nearby_search(center, radius_meters, category),
        )
        .await
        .map_err(|_| ProviderError::Timeout(self.call_timeout))??;
        Ok(results.into_iter().filter_map(normalize).collect())
    }
}

fn normalize(result: SearchResult) -> Option<PlaceCandidate> {
    let id = result.place_id.filter(|id| !id.is_empty())?;
    let location = result.location?;
    Some(PlaceCandidate {
        id,
        name: result
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_PLACE_NAME.to_string()),
        location,
        rating: result.rating,
        vicinity: result.vicinity,
    })
}

/// Wraps a single place-detail call requesting the fixed field set.
#[derive(Clone)]
pub struct PlaceDetailAdapter {
    provider: Arc<dyn PlaceDetailsProvider>,
    call_timeout: Duration,
}

impl PlaceDetailAdapter {
    pub fn new(provider: Arc<dyn PlaceDetailsProvider>, call_timeout: Duration) -> Self {
        Self {
            provider,
            call_timeout,
        }
    }

    pub async fn fetch_details(&self, place_id: &str) -> Result<PlaceDetails, ProviderError> {
        timeout(
            self.call_timeout,
            self.provider.place_details(place_id, &DETAIL_FIELDS),
        )
        .await
        .map_err(|_| ProviderError::Timeout(self.call_timeout))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct SlowProvider;

    #[async_trait]
    impl PlaceSearchProvider for SlowProvider {
        async fn nearby_search(
            &self,
            _center: GeoPoint,
            _radius_meters: u32,
            _category: PlaceCategory,
        ) -> Result<Vec<SearchResult>, ProviderError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl PlaceDetailsProvider for SlowProvider {
        async fn place_details(
            &self,
            _place_id: &str,
            fields: &[&str],
        ) -> Result<PlaceDetails, ProviderError> {
            assert_eq!(fields, &DETAIL_FIELDS);
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(PlaceDetails::default())
        }
    }

    struct StaticProvider(Vec<SearchResult>);

    #[async_trait]
    impl PlaceSearchProvider for StaticProvider {
        async fn nearby_search(
            &self,
            _center: GeoPoint,
            _radius_meters: u32,
            _category: PlaceCategory,
        ) -> Result<Vec<SearchResult>, ProviderError> {
            Ok(self.0.clone())
        }
    }

    #[actix_rt::test]
    async fn test_search_normalizes_records() {
        let provider = StaticProvider(vec![
            SearchResult {
                place_id: Some("a".into()),
                name: None,
                location: Some(GeoPoint::new(1.0, 1.0)),
                rating: Some(4.2),
                vicinity: None,
            },
            SearchResult {
                place_id: None,
                name: Some("No id".into()),
                location: Some(GeoPoint::new(1.0, 1.0)),
                ..SearchResult::default()
            },
            SearchResult {
                place_id: Some("b".into()),
                name: Some("No location".into()),
                ..SearchResult::default()
            },
        ]);
        let adapter = PlaceQueryAdapter::new(Arc::new(provider), Duration::from_secs(1));
        let candidates = adapter
            .search(GeoPoint::new(0.0, 0.0), 1_000, PlaceCategory::Hotel)
            .await
            .unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, "a");
        assert_eq!(candidates[0].name, UNKNOWN_PLACE_NAME);
    }

    #[actix_rt::test]
    async fn test_search_times_out() {
        let adapter = PlaceQueryAdapter::new(Arc::new(SlowProvider), Duration::from_millis(20));
        let result = adapter
            .search(GeoPoint::new(0.0, 0.0), 1_000, PlaceCategory::Cafe)
            .await;
        assert_eq!(result, Err(ProviderError::Timeout(Duration::from_millis(20))));
    }

    #[actix_rt::test]
    async fn test_details_time_out() {
        let adapter = PlaceDetailAdapter::new(Arc::new(SlowProvider), Duration::from_millis(20));
        let result = adapter.fetch_details("slow").await;
        assert!(matches!(result, Err(ProviderError::Timeout(_))));
    }
}
