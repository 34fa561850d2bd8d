use std::time::Duration;
use thiserror::Error;

/// Failures of the routing collaborator. These are the only discovery errors
/// shown to the user.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RouteError {
    /// Origin or destination did not resolve to a known location.
    #[error("Please select locations from the suggestions")]
    UnresolvedLocation,
    #[error("no route found between {origin} and {destination}")]
    NoRoute { origin: String, destination: String },
    #[error("routing provider failed: {0}")]
    Provider(String),
}

impl RouteError {
    /// Message suitable for the presentation layer.
    pub fn user_message(&self) -> &'static str {
        match self {
            RouteError::UnresolvedLocation => "Please select locations from the suggestions",
            RouteError::NoRoute { .. } | RouteError::Provider(_) => {
                "Could not calculate route. Please try again."
            }
        }
    }
}

/// Failure of a single places-search or place-detail call. Absorbed by the
/// discovery cycle.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProviderError {
    #[error("provider returned status {status}")]
    Status { status: String },
    #[error("provider call timed out after {0:?}")]
    Timeout(Duration),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed provider response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TripError {
    #[error("no active session")]
    Unauthenticated,
    #[error("trip {0} not found")]
    TripNotFound(String),
    #[error("expense {0} not found")]
    ExpenseNotFound(String),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SelectionError {
    #[error("place {0} is not in the current result list")]
    UnknownPlace(String),
}

/// Failures of a single-location search.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SearchError {
    #[error("Error finding location")]
    Location(#[from] RouteError),
    #[error("No tourist attractions found nearby")]
    Provider(#[from] ProviderError),
}
