use serde::{Deserialize, Serialize};

use crate::capabilities::GeolocationResult;
use crate::config::ClientConfig;
use crate::model::WeatherResult;
use crate::query::QueryError;
use crate::QueryKind;

// --- Coordinate: validated, NaN-safe ---

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid coordinate: lat={0}, lon={1}")]
    InvalidCoordinate(f64, f64),
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Self, ValidationError> {
        if !lat.is_finite()
            || !lon.is_finite()
            || !(-90.0..=90.0).contains(&lat)
            || !(-180.0..=180.0).contains(&lon)
        {
            return Err(ValidationError::InvalidCoordinate(lat, lon));
        }
        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.lat.to_bits() == other.lat.to_bits() && self.lon.to_bits() == other.lon.to_bits()
    }
}

impl Eq for Coordinate {}

/// What a weather query was issued for. Travels with the response so the
/// controller knows which term to record.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum QueryOrigin {
    City(String),
    Coordinates(Coordinate),
}

impl QueryOrigin {
    pub fn kind(&self) -> QueryKind {
        match self {
            Self::City(_) => QueryKind::City,
            Self::Coordinates(_) => QueryKind::Coordinates,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    // Lifecycle
    Startup {
        #[serde(default)]
        config: ClientConfig,
    },

    // Search box
    InputChanged {
        text: String,
    },
    SearchSubmitted,
    KeyPressed {
        key: String,
    },
    RecentSearchSelected {
        term: String,
    },

    // Geolocation button
    LocateRequested,

    // Suggestions toggle
    SuggestionsToggled,

    // Capability responses
    #[serde(skip)]
    PositionResolved(GeolocationResult),
    #[serde(skip)]
    WeatherFetched {
        generation: u64,
        origin: QueryOrigin,
        outcome: Result<WeatherResult, QueryError>,
    },
    #[serde(skip)]
    RecentSearchesLoaded {
        bytes: Option<Vec<u8>>,
    },
    #[serde(skip)]
    RecentSearchesPersisted {
        succeeded: bool,
    },
    #[serde(skip)]
    ErrorDismissalDue {
        generation: u64,
    },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Startup { .. } => "startup",
            Self::InputChanged { .. } => "input_changed",
            Self::SearchSubmitted => "search_submitted",
            Self::KeyPressed { .. } => "key_pressed",
            Self::RecentSearchSelected { .. } => "recent_search_selected",
            Self::LocateRequested => "locate_requested",
            Self::SuggestionsToggled => "suggestions_toggled",
            Self::PositionResolved(_) => "position_resolved",
            Self::WeatherFetched { .. } => "weather_fetched",
            Self::RecentSearchesLoaded { .. } => "recent_searches_loaded",
            Self::RecentSearchesPersisted { .. } => "recent_searches_persisted",
            Self::ErrorDismissalDue { .. } => "error_dismissal_due",
        }
    }

    /// True for events that come straight from the user.
    pub fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::InputChanged { .. }
                | Self::SearchSubmitted
                | Self::KeyPressed { .. }
                | Self::RecentSearchSelected { .. }
                | Self::LocateRequested
                | Self::SuggestionsToggled
        )
    }
}
