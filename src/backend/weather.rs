//! Upstream weather for the backend, cached for half an hour.

use crate::api::error::{ApiError, ApiResult};
use crate::core::constants::WEATHER_CACHE_SECONDS;
use crate::environment::weather::{WeatherCondition, WeatherReport};
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";
const LATITUDE: f64 = 52.52;
const LONGITUDE: f64 = 13.41;

pub trait WeatherSource: Send {
    fn fetch(&mut self) -> ApiResult<WeatherReport>;
}

/// Always reports the same weather.
#[derive(Debug, Clone)]
pub struct FixedWeather(pub WeatherReport);

impl WeatherSource for FixedWeather {
    fn fetch(&mut self) -> ApiResult<WeatherReport> {
        Ok(self.0.clone())
    }
}

/// Current conditions from Open-Meteo.
pub struct OpenMeteo {
    agent: ureq::Agent,
}

impl OpenMeteo {
    pub fn new(timeout: std::time::Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl WeatherSource for OpenMeteo {
    fn fetch(&mut self) -> ApiResult<WeatherReport> {
        let body: Value = self
            .agent
            .get(OPEN_METEO_URL)
            .query("latitude", &LATITUDE.to_string())
            .query("longitude", &LONGITUDE.to_string())
            .query("current_weather", "true")
            .query("hourly", "precipitation_probability,cloud_cover")
            .call()
            .map_err(|e| ApiError::Transport(e.to_string()))?
            .into_json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(parse_open_meteo(&body))
    }
}

/// Open-Meteo when `live`, otherwise the fallback report.
pub fn weather_source(live: bool, timeout: std::time::Duration) -> Box<dyn WeatherSource> {
    if live {
        Box::new(OpenMeteo::new(timeout))
    } else {
        Box::new(FixedWeather(WeatherReport::fallback()))
    }
}

fn first_hourly(body: &Value, key: &str) -> Option<f64> {
    body.get("hourly")?.get(key)?.get(0)?.as_f64()
}

/// Reads an Open-Meteo forecast; missing fields take the fallback values.
pub fn parse_open_meteo(body: &Value) -> WeatherReport {
    let fallback = WeatherReport::fallback();
    let current = body.get("current_weather");
    let field = |key: &str| current.and_then(|c| c.get(key)).and_then(Value::as_f64);

    let code = field("weathercode").unwrap_or(0.0) as i64;
    WeatherReport {
        condition: WeatherCondition::from_wmo_code(code),
        temperature: field("temperature")
            .map(f64::trunc)
            .unwrap_or(fallback.temperature),
        wind_speed: field("windspeed")
            .map(f64::trunc)
            .unwrap_or(fallback.wind_speed),
        cloud_cover: first_hourly(body, "cloud_cover").unwrap_or(fallback.cloud_cover),
        precipitation: first_hourly(body, "precipitation_probability")
            .unwrap_or(fallback.precipitation),
    }
}

/// Wraps a source with a 30-minute cache and the fallback report.
pub struct WeatherService {
    source: Box<dyn WeatherSource>,
    cached: Option<(WeatherReport, DateTime<Utc>)>,
}

impl WeatherService {
    pub fn new(source: Box<dyn WeatherSource>) -> Self {
        Self {
            source,
            cached: None,
        }
    }

    pub fn current(&mut self, now: DateTime<Utc>) -> WeatherReport {
        if let Some((report, cached_at)) = &self.cached {
            if now - *cached_at < Duration::seconds(WEATHER_CACHE_SECONDS) {
                return report.clone();
            }
        }
        match self.source.fetch() {
            Ok(report) => {
                self.cached = Some((report.clone(), now));
                report
            }
            Err(e) => {
                log::error!("Weather API error: {}", e);
                WeatherReport::fallback()
            }
        }
    }
}
