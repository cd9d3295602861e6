//! Places-to-visit toggle.
//!
//! The toggle is a plain two-state machine. Whether the control and the
//! panel are shown is derived from that state and the suggestions of the
//! displayed result, never stored separately.

use serde::{Deserialize, Serialize};

use crate::model::Suggestion;
use crate::{HIDE_PLACES_LABEL, SHOW_PLACES_LABEL, UNKNOWN_SUGGESTION_NAME};

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToggleState {
    #[default]
    Collapsed,
    Expanded,
}

impl ToggleState {
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }

    pub const fn is_expanded(self) -> bool {
        matches!(self, Self::Expanded)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Collapsed => SHOW_PLACES_LABEL,
            Self::Expanded => HIDE_PLACES_LABEL,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleControl {
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionCard {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

impl From<&Suggestion> for SuggestionCard {
    fn from(suggestion: &Suggestion) -> Self {
        Self {
            name: non_empty(suggestion.name.as_ref())
                .unwrap_or_else(|| UNKNOWN_SUGGESTION_NAME.to_string()),
            description: non_empty(suggestion.description.as_ref()),
            category: non_empty(suggestion.category.as_ref()),
        }
    }
}

/// One card per suggestion, in order.
pub fn render_cards(suggestions: &[Suggestion]) -> Vec<SuggestionCard> {
    suggestions.iter().map(SuggestionCard::from).collect()
}

/// The control is hidden when there is nothing to show.
pub fn toggle_control(state: ToggleState, suggestions: &[Suggestion]) -> Option<ToggleControl> {
    (!suggestions.is_empty()).then(|| ToggleControl {
        label: state.label().to_string(),
    })
}

/// The panel is only shown once expanded, and never empty.
pub fn panel(state: ToggleState, suggestions: &[Suggestion]) -> Option<Vec<SuggestionCard>> {
    (state.is_expanded() && !suggestions.is_empty()).then(|| render_cards(suggestions))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn places() -> Vec<Suggestion> {
        vec![
            Suggestion {
                name: Some("Pike Place Market".into()),
                description: Some("Historic public market.".into()),
                category: Some("market".into()),
            },
            Suggestion {
                name: None,
                description: Some(String::new()),
                category: None,
            },
        ]
    }

    #[test]
    fn two_activations_return_to_collapsed() {
        let state = ToggleState::default();
        assert_eq!(state, ToggleState::Collapsed);
        assert_eq!(state.toggle().toggle(), ToggleState::Collapsed);
    }

    #[test]
    fn odd_activations_leave_it_expanded() {
        let mut state = ToggleState::Collapsed;
        for _ in 0..5 {
            state = state.toggle();
        }
        assert_eq!(state, ToggleState::Expanded);
        assert_eq!(state.label(), "Hide places");
    }

    #[test]
    fn collapsed_shows_control_but_no_panel() {
        let places = places();
        let control = toggle_control(ToggleState::Collapsed, &places).unwrap();
        assert_eq!(control.label, "Places to visit");
        assert!(panel(ToggleState::Collapsed, &places).is_none());
    }

    #[test]
    fn expanded_renders_cards_in_order() {
        let cards = panel(ToggleState::Expanded, &places()).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].name, "Pike Place Market");
        assert_eq!(cards[0].category.as_deref(), Some("market"));
        assert_eq!(cards[1].name, "Unknown");
        assert_eq!(cards[1].description, None);
        assert_eq!(cards[1].category, None);
    }

    #[test]
    fn no_suggestions_hides_everything() {
        for state in [ToggleState::Collapsed, ToggleState::Expanded] {
            assert!(toggle_control(state, &[]).is_none());
            assert!(panel(state, &[]).is_none());
        }
    }
}
