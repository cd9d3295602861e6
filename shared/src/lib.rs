//! Headless core of the weather lookup client.
//!
//! The core owns all client state (current result, suggestions toggle,
//! recent searches, transient error) and talks to the platform shell only
//! through the capabilities in [`capabilities`]. Shells send [`Event`]s,
//! execute the resulting [`Effect`]s and draw the [`ViewModel`].

pub mod app;
pub mod capabilities;
pub mod config;
pub mod error_display;
pub mod event;
pub mod model;
pub mod presentation;
pub mod query;
pub mod recent_searches;
pub mod suggestions;
pub mod view;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use app::App;
pub use capabilities::{Capabilities, Effect, GeolocationError, Position};
pub use config::ClientConfig;
pub use crux_core::{render::Render, App as CruxApp};
pub use event::{Coordinate, Event, QueryOrigin};
pub use model::{Model, Reading, Suggestion, WeatherResult};
pub use query::{QueryError, WeatherQuery};
pub use recent_searches::RecentSearchList;
pub use suggestions::ToggleState;
pub use view::ViewModel;

pub const RECENT_SEARCH_CAPACITY: usize = 5;
pub const ERROR_DISMISS_DELAY: Duration = Duration::from_secs(5);
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/weather";
pub const DEFAULT_STORAGE_KEY: &str = "recentSearches";
pub const LOCATION_MARKER: &str = "📍";
pub const MISSING_FIELD_PLACEHOLDER: &str = "-";
pub const UNKNOWN_SUGGESTION_NAME: &str = "Unknown";
pub const NO_RECENT_SEARCHES: &str = "No recent searches";
pub const SHOW_PLACES_LABEL: &str = "Places to visit";
pub const HIDE_PLACES_LABEL: &str = "Hide places";

const ERROR_PREFIX: &str = "❌ ";

/// Which entry point a query went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryKind {
    City,
    Coordinates,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::City => f.write_str("city"),
            Self::Coordinates => f.write_str("coordinates"),
        }
    }
}

/// Every failure the controller can surface in the error area.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    #[error("{kind} query failed: {error}")]
    Query { kind: QueryKind, error: QueryError },

    #[error("geolocation failed: {0}")]
    Geolocation(#[from] GeolocationError),
}

impl ClientError {
    #[must_use]
    pub const fn query(kind: QueryKind, error: QueryError) -> Self {
        Self::Query { kind, error }
    }

    /// The text shown in the transient error area.
    ///
    /// A 404 and an upstream failure read the same: the endpoint does not
    /// tell them apart reliably.
    #[must_use]
    pub fn user_facing_message(&self) -> String {
        let body = match self {
            Self::Query { error, kind } => match error {
                QueryError::InvalidQuery(reason) => reason.clone(),
                QueryError::NotFoundOrUpstream { .. } => match kind {
                    QueryKind::City => "City not found or API error".into(),
                    QueryKind::Coordinates => "Could not fetch weather for your location".into(),
                },
                QueryError::Transport(_) => "Could not reach the weather service".into(),
                QueryError::InvalidResponse(_) => "Invalid response from the weather service".into(),
            },
            Self::Geolocation(GeolocationError::Unavailable) => {
                "Geolocation is not supported by your browser".into()
            }
            Self::Geolocation(
                GeolocationError::PermissionDenied { message } | GeolocationError::Failed { message },
            ) => format!("Could not get location: {message}"),
        };
        format!("{ERROR_PREFIX}{body}")
    }
}
