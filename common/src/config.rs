use crate::constants::{
    AROUND_RADIUS_METERS, CALL_TIMEOUT, MIN_RATING_THRESHOLD, RESULT_CAP, SAMPLE_POINT_COUNT,
    SEARCH_RADIUS_METERS,
};
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use serde_with::{DurationSeconds, serde_as};
use std::path::Path;
use std::time::Duration;

/// How candidates are filtered before enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Keep only candidates rated at or above the threshold, best first, and
    /// enrich at most `result_cap` of them per query.
    #[default]
    Strict,
    /// Keep and enrich every candidate regardless of rating.
    KeepAll,
}

/// Parameters of one discovery cycle.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub sample_count: usize,
    pub radius_meters: u32,
    pub rating_threshold: f64,
    pub result_cap: usize,
    pub filter_mode: FilterMode,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub call_timeout: Duration,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            sample_count: SAMPLE_POINT_COUNT,
            radius_meters: SEARCH_RADIUS_METERS,
            rating_threshold: MIN_RATING_THRESHOLD,
            result_cap: RESULT_CAP,
            filter_mode: FilterMode::Strict,
            call_timeout: CALL_TIMEOUT,
        }
    }
}

impl DiscoveryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_count == 0 {
            return Err(ConfigError::Invalid("sample_count must be positive".into()));
        }
        if self.radius_meters == 0 {
            return Err(ConfigError::Invalid("radius_meters must be positive".into()));
        }
        if self.result_cap == 0 {
            return Err(ConfigError::Invalid("result_cap must be positive".into()));
        }
        if !(0.0..=5.0).contains(&self.rating_threshold) {
            return Err(ConfigError::Invalid(format!(
                "rating_threshold {} outside 0-5",
                self.rating_threshold
            )));
        }
        if self.call_timeout.is_zero() {
            return Err(ConfigError::Invalid("call_timeout must be positive".into()));
        }
        Ok(())
    }
}

/// Top-level planner configuration, loadable from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub discovery: DiscoveryConfig,
    pub around_radius_meters: u32,
    /// Offline provider document used instead of the Google client.
    pub fixture_path: Option<String>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            discovery: DiscoveryConfig::default(),
            around_radius_meters: AROUND_RADIUS_METERS,
            fixture_path: None,
        }
    }
}

impl PlannerConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let config: PlannerConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: display,
                source,
            })?;
        config.discovery.validate()?;
        Ok(config)
    }
}
