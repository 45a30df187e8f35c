//! Weather client
//!
//! City name → open-meteo geocoding → current conditions. Both hops
//! use a short timeout and every failure is swallowed into `None`; the
//! dashboard simply shows nothing when the forecast is unavailable.

use serde::Deserialize;
use std::time::Duration;

const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const TIMEOUT: Duration = Duration::from_secs(5);

/// Rough condition bucket derived from the WMO weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCondition {
    Clear,
    Overcast,
}

/// Current conditions for the configured city
#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub city: String,
    pub temperature_c: f64,
    pub weather_code: i64,
}

impl WeatherReport {
    /// Codes 0-3 are clear to partly cloudy; everything above is
    /// treated as overcast for icon purposes.
    pub fn condition(&self) -> WeatherCondition {
        if self.weather_code > 3 {
            WeatherCondition::Overcast
        } else {
            WeatherCondition::Clear
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeoResult>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeather>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    weathercode: i64,
}

/// Client for the open-meteo geocoding and forecast APIs
#[derive(Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
}

impl WeatherClient {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(TIMEOUT)
            .build()
            .unwrap_or_default();

        Self { http }
    }

    /// Fetch current weather for a city. `None` on unknown city or any
    /// network/parse failure.
    pub async fn fetch_current(&self, city: &str) -> Option<WeatherReport> {
        match self.try_fetch(city).await {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!("Weather fetch failed for {}: {}", city, e);
                None
            }
        }
    }

    async fn try_fetch(&self, city: &str) -> crate::error::Result<Option<WeatherReport>> {
        let geo: GeocodingResponse = self
            .http
            .get(GEOCODING_URL)
            .query(&[("name", city), ("count", "1"), ("language", "en"), ("format", "json")])
            .send()
            .await?
            .json()
            .await?;

        let Some(location) = geo.results.into_iter().next() else {
            tracing::debug!("City not found: {}", city);
            return Ok(None);
        };

        let forecast: ForecastResponse = self
            .http
            .get(FORECAST_URL)
            .query(&[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await?
            .json()
            .await?;

        Ok(forecast.current_weather.map(|current| WeatherReport {
            city: city.to_string(),
            temperature_c: current.temperature,
            weather_code: current.weathercode,
        }))
    }
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}
