//! Weather endpoint client.
//!
//! Builds the two request shapes the endpoint understands and folds every
//! possible answer into `Result<WeatherResult, QueryError>`. Issuing a query
//! has no effect on client state; the caller applies the outcome.

use crux_http::{Http, HttpError, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::event::{Coordinate, Event, QueryOrigin};
use crate::model::WeatherResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum QueryError {
    /// Rejected before anything was sent.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The endpoint answered with a non-success status. A missing city and
    /// an upstream outage look the same from here.
    #[error("weather service answered with status {status}")]
    NotFoundOrUpstream { status: u16 },

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("invalid response body: {0}")]
    InvalidResponse(String),
}

impl From<HttpError> for QueryError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Http { code, .. } => Self::NotFoundOrUpstream {
                status: u16::from(code),
            },
            HttpError::Json(detail) => Self::InvalidResponse(detail),
            other => Self::Transport(other.to_string()),
        }
    }
}

#[derive(Serialize)]
struct CityRequest<'a> {
    city: &'a str,
}

/// A query that passed validation and can be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherQuery {
    City(String),
    Coordinates(Coordinate),
}

impl WeatherQuery {
    /// The city is sent as given; only blank input is refused.
    pub fn by_city(city: impl Into<String>) -> Result<Self, QueryError> {
        let city = city.into();
        if city.trim().is_empty() {
            return Err(QueryError::InvalidQuery("City name required".into()));
        }
        Ok(Self::City(city))
    }

    pub fn by_coordinates(lat: f64, lon: f64) -> Result<Self, QueryError> {
        Coordinate::new(lat, lon)
            .map(Self::Coordinates)
            .map_err(|e| QueryError::InvalidQuery(e.to_string()))
    }

    pub fn origin(&self) -> QueryOrigin {
        match self {
            Self::City(city) => QueryOrigin::City(city.clone()),
            Self::Coordinates(coordinate) => QueryOrigin::Coordinates(*coordinate),
        }
    }

    /// City queries go to the endpoint itself, coordinate queries to
    /// `<endpoint>/~<lat>,<lon>`.
    pub fn url(&self, endpoint: &Url) -> Result<Url, QueryError> {
        match self {
            Self::City(_) => Ok(endpoint.clone()),
            Self::Coordinates(coordinate) => {
                let raw = format!(
                    "{}/~{},{}",
                    endpoint.as_str().trim_end_matches('/'),
                    coordinate.lat(),
                    coordinate.lon()
                );
                Url::parse(&raw).map_err(|e| QueryError::Transport(e.to_string()))
            }
        }
    }
}

/// Collapses an HTTP outcome into the client's result shape.
pub fn normalize(
    result: crux_http::Result<Response<WeatherResult>>,
) -> Result<WeatherResult, QueryError> {
    let mut response = result?;
    let status = response.status();
    if !status.is_success() {
        return Err(QueryError::NotFoundOrUpstream {
            status: u16::from(status),
        });
    }
    response
        .take_body()
        .ok_or_else(|| QueryError::InvalidResponse("empty body".into()))
}

pub struct WeatherClient<'a> {
    http: &'a Http<Event>,
    endpoint: &'a Url,
}

impl<'a> WeatherClient<'a> {
    pub fn new(http: &'a Http<Event>, endpoint: &'a Url) -> Self {
        Self { http, endpoint }
    }

    /// Sends `query`. The outcome comes back as `Event::WeatherFetched`
    /// tagged with `generation`.
    pub fn send(&self, query: &WeatherQuery, generation: u64) -> Result<(), QueryError> {
        let url = query.url(self.endpoint)?;
        let origin = query.origin();
        let make_event = move |result: crux_http::Result<Response<WeatherResult>>| {
            Event::WeatherFetched {
                generation,
                origin,
                outcome: normalize(result),
            }
        };

        debug!(%url, generation, "sending weather query");
        match query {
            WeatherQuery::City(city) => {
                self.http
                    .post(url.as_str())
                    .body_json(&CityRequest { city: city.as_str() })
                    .map_err(|e| QueryError::InvalidQuery(e.to_string()))?
                    .expect_json::<WeatherResult>()
                    .send(make_event);
            }
            WeatherQuery::Coordinates(_) => {
                self.http
                    .get(url.as_str())
                    .expect_json::<WeatherResult>()
                    .send(make_event);
            }
        }
        Ok(())
    }
}
