use serde::{Deserialize, Serialize};

use crate::model::Model;
use crate::presentation::WeatherPanel;
use crate::recent_searches::RecentSearchesView;
use crate::suggestions::{self, SuggestionCard, ToggleControl};

/// Everything the shell draws. `None` means the region is hidden.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub input: String,
    pub is_loading: bool,
    pub error: Option<String>,
    pub weather: Option<WeatherPanel>,
    pub suggestions_toggle: Option<ToggleControl>,
    pub suggestions: Option<Vec<SuggestionCard>>,
    pub recent_searches: RecentSearchesView,
    pub can_locate: bool,
}

impl From<&Model> for ViewModel {
    fn from(model: &Model) -> Self {
        let shown = model.current_suggestions();
        Self {
            input: model.input.clone(),
            is_loading: model.is_loading,
            error: model.error.message().map(str::to_string),
            weather: model.displayed_result().map(WeatherPanel::from),
            suggestions_toggle: suggestions::toggle_control(model.toggle, shown),
            suggestions: suggestions::panel(model.toggle, shown),
            recent_searches: model.recent.render(),
            can_locate: model.config.geolocation_supported,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation;
    use serde_json::json;

    fn seattle() -> crate::model::WeatherResult {
        serde_json::from_value(json!({
            "city": "Seattle",
            "timestamp": "2024-05-01 09:30:00",
            "temperature": 12, "temperature_f": 54, "feels_like": 10,
            "condition": "Light rain", "wind_speed": 14, "humidity": 87,
            "visibility": 9, "pressure": 1012, "cloudcover": 100,
            "precipitation": 0.4, "uv_index": 1,
            "suggestions": [{ "name": "Space Needle" }]
        }))
        .unwrap()
    }

    #[test]
    fn initial_view_is_empty() {
        let view = ViewModel::from(&Model::default());
        assert!(!view.is_loading);
        assert!(view.error.is_none());
        assert!(view.weather.is_none());
        assert!(view.suggestions_toggle.is_none());
        assert!(view.suggestions.is_none());
        assert_eq!(
            view.recent_searches,
            RecentSearchesView::Empty {
                placeholder: "No recent searches".into()
            }
        );
    }

    #[test]
    fn hidden_result_hides_toggle_and_panel() {
        let mut model = Model::default();
        presentation::apply(&mut model, seattle());
        model.toggle = model.toggle.toggle();
        assert!(ViewModel::from(&model).suggestions.is_some());

        model.result_visible = false;
        let view = ViewModel::from(&model);
        assert!(view.weather.is_none());
        assert!(view.suggestions_toggle.is_none());
        assert!(view.suggestions.is_none());
    }

    #[test]
    fn displayed_result_projects_panel() {
        let mut model = Model::default();
        presentation::apply(&mut model, seattle());
        let view = ViewModel::from(&model);
        let weather = view.weather.unwrap();
        assert_eq!(weather.city, "Seattle");
        assert_eq!(weather.country, "-");
        assert_eq!(weather.precipitation, "0.4");
        assert_eq!(
            view.suggestions_toggle.map(|c| c.label).as_deref(),
            Some("Places to visit")
        );
    }
}
