use serde::{Deserialize, Deserializer, Serialize};

use crate::config::ClientConfig;
use crate::error_display::ErrorDisplay;
use crate::recent_searches::RecentSearchList;
use crate::suggestions::ToggleState;
use crate::MISSING_FIELD_PLACEHOLDER;

/// A measurement as display text.
///
/// The endpoint sends `"12"`, `12` or `"N/A"` depending on the upstream
/// provider; the client never does arithmetic on these, except for the
/// percentage bars.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawReading", into = "String")]
pub struct Reading(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawReading {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawReading> for Reading {
    fn from(raw: RawReading) -> Self {
        match raw {
            RawReading::Text(text) => Self(text),
            RawReading::Number(number) => Self(number.to_string()),
        }
    }
}

impl From<Reading> for String {
    fn from(reading: Reading) -> Self {
        reading.0
    }
}

impl From<&str> for Reading {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl Reading {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reads the value as a 0–100 percentage; anything unparseable is 0.
    pub fn as_percentage(&self) -> f64 {
        self.0
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map_or(0.0, |value| value.clamp(0.0, 100.0))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "desc")]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// One successful weather lookup, exactly as the endpoint described it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherResult {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub timestamp: Reading,
    pub temperature: Reading,
    pub temperature_f: Reading,
    pub feels_like: Reading,
    pub condition: Reading,
    pub wind_speed: Reading,
    pub humidity: Reading,
    pub visibility: Reading,
    pub pressure: Reading,
    pub cloudcover: Reading,
    pub precipitation: Reading,
    pub uv_index: Reading,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub suggestions: Vec<Suggestion>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Suggestion>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Suggestion>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn or_placeholder(value: Option<&String>) -> &str {
    value
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(MISSING_FIELD_PLACEHOLDER)
}

impl WeatherResult {
    pub fn display_city(&self) -> &str {
        or_placeholder(self.city.as_ref())
    }

    pub fn display_country(&self) -> &str {
        or_placeholder(self.country.as_ref())
    }
}

/// The whole client state. Owned by the core and only touched inside
/// `App::update`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Model {
    pub config: ClientConfig,

    // Search box
    pub input: String,
    pub is_loading: bool,

    // Result region
    pub current: Option<WeatherResult>,
    pub result_visible: bool,
    pub toggle: ToggleState,

    // Recent searches
    pub recent: RecentSearchList,
    pub recent_loaded: bool,

    pub error: ErrorDisplay,

    /// Bumped for every issued query; responses carrying an older value are dropped.
    pub query_generation: u64,
}

impl Model {
    /// The result the user is looking at, if the result region is shown.
    pub fn displayed_result(&self) -> Option<&WeatherResult> {
        self.current.as_ref().filter(|_| self.result_visible)
    }

    /// Suggestions of the displayed result; empty when nothing is displayed.
    pub fn current_suggestions(&self) -> &[Suggestion] {
        self.displayed_result()
            .map(|result| result.suggestions.as_slice())
            .unwrap_or_default()
    }
}
