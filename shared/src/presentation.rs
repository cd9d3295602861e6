use serde::{Deserialize, Serialize};
use tracing::info;

use crate::model::{Model, WeatherResult};
use crate::suggestions::ToggleState;

/// Display-ready text for every slot of the result region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherPanel {
    pub city: String,
    pub country: String,
    pub last_updated: String,
    pub temperature: String,
    pub temperature_f: String,
    pub feels_like: String,
    /// Shown next to the temperature.
    pub condition: String,
    /// Same text, shown as the header badge.
    pub condition_badge: String,
    pub wind_speed: String,
    pub humidity_text: String,
    /// Width of the humidity bar, 0–100.
    pub humidity_bar_pct: f64,
    pub visibility: String,
    pub pressure: String,
    pub cloud_text: String,
    /// Width of the cloud cover bar, 0–100.
    pub cloud_bar_pct: f64,
    pub precipitation: String,
    pub uv_index: String,
}

impl From<&WeatherResult> for WeatherPanel {
    fn from(result: &WeatherResult) -> Self {
        Self {
            city: result.display_city().to_string(),
            country: result.display_country().to_string(),
            // upstream timestamp is shown as-is
            last_updated: format!("Updated: {}", result.timestamp.as_str()),
            temperature: result.temperature.as_str().to_string(),
            temperature_f: format!("{}°F", result.temperature_f.as_str()),
            feels_like: format!("Feels like: {}°C", result.feels_like.as_str()),
            condition: result.condition.as_str().to_string(),
            condition_badge: result.condition.as_str().to_string(),
            wind_speed: result.wind_speed.as_str().to_string(),
            humidity_text: format!("{}%", result.humidity.as_str()),
            humidity_bar_pct: result.humidity.as_percentage(),
            visibility: result.visibility.as_str().to_string(),
            pressure: result.pressure.as_str().to_string(),
            cloud_text: format!("{}%", result.cloudcover.as_str()),
            cloud_bar_pct: result.cloudcover.as_percentage(),
            precipitation: result.precipitation.as_str().to_string(),
            uv_index: result.uv_index.as_str().to_string(),
        }
    }
}

/// Makes `result` the displayed result.
///
/// The previous result is dropped, not merged, and the places toggle starts
/// collapsed again whatever it was before.
pub fn apply(model: &mut Model, result: WeatherResult) {
    info!(
        city = result.display_city(),
        suggestions = result.suggestions.len(),
        "displaying weather"
    );
    model.current = Some(result);
    model.result_visible = true;
    model.toggle = ToggleState::Collapsed;
}
