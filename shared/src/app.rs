use tracing::{debug, info, warn};

use crate::capabilities::Capabilities;
use crate::config::ClientConfig;
use crate::event::{Event, QueryOrigin};
use crate::model::Model;
use crate::presentation;
use crate::query::{WeatherClient, WeatherQuery};
use crate::recent_searches::RecentSearchList;
use crate::view::ViewModel;
use crate::{ClientError, GeolocationError, QueryKind, LOCATION_MARKER};

#[derive(Default)]
pub struct App;

impl App {
    fn load_recent(model: &Model, caps: &Capabilities) {
        caps.kv.get(model.config.storage_key.clone(), |result| {
            Event::RecentSearchesLoaded {
                bytes: result.ok().flatten(),
            }
        });
    }

    /// Writes the whole list; called after every mutation.
    fn persist_recent(model: &Model, caps: &Capabilities) {
        let bytes = match model.recent.encode() {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "could not encode recent searches");
                return;
            }
        };
        caps.kv.set(model.config.storage_key.clone(), bytes, |result| {
            Event::RecentSearchesPersisted {
                succeeded: result.is_ok(),
            }
        });
    }

    fn record_search(model: &mut Model, caps: &Capabilities, term: String) {
        debug!(term = %term, "recording search");
        model.recent.record(term);
        Self::persist_recent(model, caps);
    }

    /// Shows `error` in the error area and schedules its dismissal.
    fn show_error(model: &mut Model, caps: &Capabilities, error: &ClientError) {
        warn!(%error, "showing error");
        model.is_loading = false;
        let generation = model.error.show(error.user_facing_message());
        caps.delay.start(
            model.config.error_dismiss_delay(),
            Event::ErrorDismissalDue { generation },
        );
        caps.render.render();
    }

    fn submit(model: &mut Model, caps: &Capabilities) {
        let city = model.input.trim().to_string();
        if city.is_empty() {
            debug!("ignoring blank search");
            return;
        }
        Self::search_city(model, caps, city);
    }

    fn search_city(model: &mut Model, caps: &Capabilities, city: String) {
        match WeatherQuery::by_city(city) {
            Ok(query) => Self::begin_query(model, caps, &query),
            Err(error) => Self::show_error(model, caps, &ClientError::query(QueryKind::City, error)),
        }
    }

    /// Issues `query` and supersedes any query still in flight.
    fn begin_query(model: &mut Model, caps: &Capabilities, query: &WeatherQuery) {
        let kind = query.origin().kind();
        let endpoint = match model.config.endpoint_url() {
            Ok(endpoint) => endpoint,
            Err(e) => {
                let error = crate::QueryError::Transport(e.to_string());
                Self::show_error(model, caps, &ClientError::query(kind, error));
                return;
            }
        };

        model.query_generation += 1;
        let generation = model.query_generation;

        model.is_loading = true;
        model.result_visible = false;
        model.error.clear();

        if let Err(error) = WeatherClient::new(&caps.http, &endpoint).send(query, generation) {
            Self::show_error(model, caps, &ClientError::query(kind, error));
            return;
        }

        info!(generation, %kind, "weather query issued");
        caps.render.render();
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        if event.is_user_initiated() {
            debug!(event = event.name(), "user action");
        }

        match event {
            Event::Startup { config } => {
                model.config = match config.validate() {
                    Ok(()) => config,
                    Err(e) => {
                        warn!(error = %e, "rejecting shell config, using defaults");
                        ClientConfig::default()
                    }
                };
                Self::load_recent(model, caps);
                caps.render.render();
            }

            Event::InputChanged { text } => {
                model.input = text;
            }

            Event::SearchSubmitted => Self::submit(model, caps),

            Event::KeyPressed { key } => {
                if key == "Enter" {
                    Self::submit(model, caps);
                }
            }

            Event::RecentSearchSelected { term } => {
                // sent as typed, location marker included
                Self::search_city(model, caps, term);
            }

            Event::LocateRequested => {
                if !model.config.geolocation_supported {
                    Self::show_error(model, caps, &GeolocationError::Unavailable.into());
                    return;
                }
                caps.geolocation.current_position(Event::PositionResolved);
            }

            Event::PositionResolved(Ok(position)) => {
                match WeatherQuery::by_coordinates(position.latitude, position.longitude) {
                    Ok(query) => Self::begin_query(model, caps, &query),
                    Err(error) => Self::show_error(
                        model,
                        caps,
                        &ClientError::query(QueryKind::Coordinates, error),
                    ),
                }
            }

            Event::PositionResolved(Err(error)) => {
                Self::show_error(model, caps, &error.into());
            }

            Event::WeatherFetched {
                generation,
                origin,
                outcome,
            } => {
                if generation != model.query_generation {
                    debug!(
                        generation,
                        latest = model.query_generation,
                        "dropping superseded weather response"
                    );
                    return;
                }
                model.is_loading = false;

                match outcome {
                    Ok(result) => {
                        let term = match &origin {
                            QueryOrigin::City(city) => city.clone(),
                            QueryOrigin::Coordinates(_) => {
                                format!("{LOCATION_MARKER} {}", result.display_city())
                            }
                        };
                        presentation::apply(model, result);
                        Self::record_search(model, caps, term);
                        model.input.clear();
                        caps.render.render();
                    }
                    Err(error) => {
                        model.result_visible = false;
                        Self::show_error(model, caps, &ClientError::query(origin.kind(), error));
                    }
                }
            }

            Event::SuggestionsToggled => {
                if model.displayed_result().is_none() {
                    debug!("ignoring toggle without a displayed result");
                    return;
                }
                model.toggle = model.toggle.toggle();
                caps.render.render();
            }

            Event::RecentSearchesLoaded { bytes } => {
                let loaded = RecentSearchList::decode(bytes.as_deref());
                info!(entries = loaded.len(), "recent searches loaded");
                let recorded_before_load = !model.recent.is_empty();
                let changed = model.recent.merge_older(loaded);
                model.recent_loaded = true;
                if recorded_before_load && changed {
                    Self::persist_recent(model, caps);
                }
                caps.render.render();
            }

            Event::RecentSearchesPersisted { succeeded } => {
                if !succeeded {
                    warn!("recent searches were not persisted");
                }
            }

            Event::ErrorDismissalDue { generation } => {
                if model.error.dismiss(generation) {
                    debug!(generation, "error dismissed");
                    caps.render.render();
                }
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        ViewModel::from(model)
    }
}
