use assert_matches::assert_matches;
use crux_core::testing::AppTester;
use serde_json::json;
use weather_shared::capabilities::DelayOperation;
use weather_shared::recent_searches::RecentSearchesView;
use weather_shared::{
    App, ClientConfig, Effect, Event, Model, QueryError, QueryOrigin, ToggleState, WeatherResult,
};

fn weather(city: &str) -> WeatherResult {
    serde_json::from_value(json!({
        "city": city,
        "country": "France",
        "timestamp": "2024-05-01 12:00:00",
        "temperature": 18, "temperature_f": 64, "feels_like": 17,
        "condition": "Partly cloudy", "wind_speed": 11, "humidity": 60,
        "visibility": 10, "pressure": 1016, "cloudcover": 40,
        "precipitation": 0, "uv_index": 4,
        "suggestions": [
            { "name": "Louvre", "desc": "Art museum", "category": "Museum" },
            { "name": "Seine", "category": "River" }
        ]
    }))
    .unwrap()
}

fn fetched(model: &Model, city: &str, outcome: Result<WeatherResult, QueryError>) -> Event {
    Event::WeatherFetched {
        generation: model.query_generation,
        origin: QueryOrigin::City(city.to_string()),
        outcome,
    }
}

fn type_and_submit(app: &AppTester<App, Effect>, model: &mut Model, text: &str) -> Vec<Effect> {
    app.update(
        Event::InputChanged {
            text: text.to_string(),
        },
        model,
    );
    app.update(Event::SearchSubmitted, model).effects
}

#[test]
fn city_search_posts_to_endpoint() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let effects = type_and_submit(&app, &mut model, "  Paris ");
    assert!(model.is_loading);
    assert_eq!(model.query_generation, 1);

    let request = effects
        .iter()
        .find_map(|e| match e {
            Effect::Http(request) => Some(&request.operation),
            _ => None,
        })
        .expect("an http request");
    assert_eq!(request.method, "POST");
    assert_eq!(request.url, "http://localhost:5000/api/weather");
    let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(body, json!({ "city": "Paris" }));
    assert!(effects.iter().any(|e| matches!(e, Effect::Render(_))));
}

#[test]
fn successful_search_displays_and_records() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();
    type_and_submit(&app, &mut model, "Paris");

    let event = fetched(&model, "Paris", Ok(weather("Paris")));
    let update = app.update(event, &mut model);

    assert!(!model.is_loading);
    assert!(model.input.is_empty());
    assert_eq!(model.recent.as_slice(), ["Paris"]);
    assert!(update.effects.iter().any(|e| matches!(e, Effect::KeyValue(_))));

    let view = app.view(&model);
    let panel = view.weather.expect("weather panel");
    assert_eq!(panel.city, "Paris");
    assert_eq!(panel.country, "France");
    assert_eq!(
        view.suggestions_toggle.map(|c| c.label).as_deref(),
        Some("Places to visit")
    );
    assert!(view.suggestions.is_none());
    assert_eq!(
        view.recent_searches,
        RecentSearchesView::Entries {
            entries: vec!["Paris".to_string()]
        }
    );
}

#[test]
fn failed_search_shows_error_and_leaves_history_alone() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();
    type_and_submit(&app, &mut model, "Atlantis");

    let event = fetched(
        &model,
        "Atlantis",
        Err(QueryError::NotFoundOrUpstream { status: 404 }),
    );
    let update = app.update(event, &mut model);

    assert!(!model.is_loading);
    assert!(model.recent.is_empty());
    assert_eq!(model.input, "Atlantis");
    assert_eq!(
        app.view(&model).error.as_deref(),
        Some("❌ City not found or API error")
    );
    assert!(app.view(&model).weather.is_none());
    assert!(!update.effects.iter().any(|e| matches!(e, Effect::KeyValue(_))));

    let delay = update
        .effects
        .iter()
        .find_map(|e| match e {
            Effect::Delay(request) => Some(&request.operation),
            _ => None,
        })
        .expect("dismissal timer");
    assert_eq!(delay, &DelayOperation { millis: 5_000 });
}

#[test]
fn blank_submission_is_ignored() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let effects = type_and_submit(&app, &mut model, "   ");
    assert!(effects.is_empty());
    assert!(!model.is_loading);
    assert_eq!(model.query_generation, 0);
    assert!(model.error.message().is_none());
}

#[test]
fn enter_submits_other_keys_do_not() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();
    app.update(
        Event::InputChanged {
            text: "Oslo".into(),
        },
        &mut model,
    );

    let update = app.update(Event::KeyPressed { key: "a".into() }, &mut model);
    assert!(update.effects.is_empty());
    assert_eq!(model.query_generation, 0);

    let update = app.update(
        Event::KeyPressed {
            key: "Enter".into(),
        },
        &mut model,
    );
    assert!(update.effects.iter().any(|e| matches!(e, Effect::Http(_))));
    assert_eq!(model.query_generation, 1);
}

#[test]
fn recent_entry_is_sent_verbatim() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let update = app.update(
        Event::RecentSearchSelected {
            term: "📍 Seattle".into(),
        },
        &mut model,
    );
    let request = update
        .effects
        .iter()
        .find_map(|e| match e {
            Effect::Http(request) => Some(&request.operation),
            _ => None,
        })
        .expect("an http request");
    assert_eq!(request.method, "POST");
    let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(body, json!({ "city": "📍 Seattle" }));
}

#[test]
fn superseded_response_is_dropped() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    type_and_submit(&app, &mut model, "Paris");
    let first = fetched(&model, "Paris", Ok(weather("Paris")));
    type_and_submit(&app, &mut model, "Rome");
    let second = fetched(&model, "Rome", Ok(weather("Rome")));

    let update = app.update(first, &mut model);
    assert!(update.effects.is_empty());
    assert!(model.is_loading);
    assert!(model.recent.is_empty());

    app.update(second, &mut model);
    assert!(!model.is_loading);
    assert_eq!(model.recent.as_slice(), ["Rome"]);
    assert_eq!(app.view(&model).weather.map(|w| w.city).as_deref(), Some("Rome"));
}

#[test]
fn new_result_collapses_suggestions() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    type_and_submit(&app, &mut model, "Paris");
    app.update(fetched(&model, "Paris", Ok(weather("Paris"))), &mut model);
    app.update(Event::SuggestionsToggled, &mut model);
    assert_eq!(model.toggle, ToggleState::Expanded);

    let view = app.view(&model);
    assert_eq!(view.suggestions.map(|cards| cards.len()), Some(2));
    assert_eq!(
        view.suggestions_toggle.map(|c| c.label).as_deref(),
        Some("Hide places")
    );

    type_and_submit(&app, &mut model, "Lyon");
    app.update(fetched(&model, "Lyon", Ok(weather("Lyon"))), &mut model);
    assert_eq!(model.toggle, ToggleState::Collapsed);
    assert!(app.view(&model).suggestions.is_none());
}

#[test]
fn toggle_without_result_does_nothing() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let update = app.update(Event::SuggestionsToggled, &mut model);
    assert!(update.effects.is_empty());
    assert_eq!(model.toggle, ToggleState::Collapsed);
}

#[test]
fn only_latest_error_is_dismissed() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    type_and_submit(&app, &mut model, "Nowhere");
    app.update(
        fetched(&model, "Nowhere", Err(QueryError::Transport("refused".into()))),
        &mut model,
    );
    let stale = model.error.generation();

    type_and_submit(&app, &mut model, "Nowhere");
    app.update(
        fetched(&model, "Nowhere", Err(QueryError::Transport("refused".into()))),
        &mut model,
    );
    let latest = model.error.generation();
    assert_ne!(stale, latest);

    let update = app.update(Event::ErrorDismissalDue { generation: stale }, &mut model);
    assert!(update.effects.is_empty());
    assert_eq!(
        model.error.message(),
        Some("❌ Could not reach the weather service")
    );

    app.update(Event::ErrorDismissalDue { generation: latest }, &mut model);
    assert!(model.error.message().is_none());
}

#[test]
fn invalid_endpoint_is_replaced_by_default() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    let config = ClientConfig {
        endpoint: "not a url".into(),
        ..ClientConfig::default()
    };
    app.update(Event::Startup { config }, &mut model);
    assert_eq!(model.config, ClientConfig::default());
}

#[test]
fn history_keeps_five_most_recent() {
    let app = AppTester::<App, Effect>::default();
    let mut model = Model::default();

    for city in ["A", "B", "C", "D", "E", "F", "c"] {
        type_and_submit(&app, &mut model, city);
        app.update(fetched(&model, city, Ok(weather(city))), &mut model);
    }
    assert_eq!(model.recent.as_slice(), ["c", "F", "E", "D", "B"]);
    assert_matches!(
        app.view(&model).recent_searches,
        RecentSearchesView::Entries { entries } if entries.len() == 5
    );
}
