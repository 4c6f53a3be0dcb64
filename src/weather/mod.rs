//! Current temperature lookups.
//!
//! Each lookup resolves independently to a temperature or
//! [`Temperature::Unavailable`]; a failed call never aborts its siblings or the run.

mod types;

use std::future::Future;

use futures::future::join_all;
use reqwest::StatusCode;

use crate::config::{Config, WEATHER_UNITS};
use crate::error_handling::WeatherError;
use types::OneCallResponse;

pub use types::Temperature;

/// Maps coordinates to the current temperature.
pub trait WeatherFetcher {
    /// Fetches the temperature at (`lat`, `lon`). Failures become `Unavailable`.
    fn fetch_temperature(&self, lat: f64, lon: f64) -> impl Future<Output = Temperature> + Send;
}

/// OpenWeather One Call client.
pub struct OpenWeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    /// Creates a client for `base_url` authenticating with `api_key`.
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Builds a client from the run configuration.
    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        Self::new(client, config.weather_url.clone(), config.api_key.clone())
    }

    async fn try_fetch(&self, lat: f64, lon: f64) -> Result<f64, WeatherError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", self.api_key.clone()),
                ("units", WEATHER_UNITS.to_string()),
            ])
            .send()
            .await
            // The request URL carries the API key
            .map_err(|e| WeatherError::Transport(e.without_url()))?;

        if response.status() != StatusCode::OK {
            return Err(WeatherError::Status(response.status()));
        }

        let body: OneCallResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Body(e.without_url()))?;
        Ok(body.current.temp)
    }
}

impl WeatherFetcher for OpenWeatherClient {
    async fn fetch_temperature(&self, lat: f64, lon: f64) -> Temperature {
        match self.try_fetch(lat, lon).await {
            Ok(temp) => {
                log::debug!("Temperature at ({}, {}): {}", lat, lon, temp);
                Temperature::Celsius(temp)
            }
            Err(e) => {
                log::warn!("Weather unavailable for ({}, {}): {}", lat, lon, e);
                Temperature::Unavailable
            }
        }
    }
}

/// Fetches temperatures for all `coordinates` concurrently.
///
/// Results are in input order regardless of completion order.
pub async fn fetch_all<W>(fetcher: &W, coordinates: &[(f64, f64)]) -> Vec<Temperature>
where
    W: WeatherFetcher + ?Sized,
{
    join_all(
        coordinates
            .iter()
            .map(|&(lat, lon)| fetcher.fetch_temperature(lat, lon)),
    )
    .await
}
