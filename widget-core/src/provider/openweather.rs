use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::error::LookupError;
use crate::model::{CitySuggestion, WeatherReport};

use super::WeatherProvider;

const GEOCODING_PATH: &str = "/geo/1.0/direct";
const WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    suggestion_limit: u8,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: String, suggestion_limit: u8) -> Self {
        Self {
            api_key,
            base_url,
            suggestion_limit,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_suggestions(&self, query: &str) -> Result<Vec<CitySuggestion>, LookupError> {
        let url = format!("{}{}", self.base_url, GEOCODING_PATH);
        let limit = self.suggestion_limit.to_string();
        info!(query, "fetching city suggestions");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("limit", limit.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|err| {
                error!(%err, "geocoding request failed to send");
                LookupError::suggestions(err.to_string())
            })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|err| LookupError::suggestions(err.to_string()))?;

        if !status.is_success() {
            error!(status = status.as_u16(), "geocoding request rejected");
            return Err(LookupError::suggestions(format!(
                "status {}: {}",
                status,
                truncate_body(&body),
            )));
        }

        let records: Vec<GeoRecord> = serde_json::from_str(&body)
            .map_err(|err| LookupError::suggestions(format!("invalid JSON: {err}")))?;

        debug!(count = records.len(), "geocoding records parsed");
        Ok(records.into_iter().map(CitySuggestion::from).collect())
    }

    async fn fetch_weather(&self, city: &str) -> Result<WeatherReport, LookupError> {
        let url = format!("{}{}", self.base_url, WEATHER_PATH);
        info!(city, "fetching current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|err| {
                error!(%err, "weather request failed to send");
                LookupError::transport(err.to_string())
            })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|err| LookupError::transport(err.to_string()))?;

        if !status.is_success() {
            error!(status = status.as_u16(), "weather request rejected");
            return Err(LookupError::from_weather_status(
                status.as_u16(),
                truncate_body(&body),
            ));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|err| LookupError::transport(format!("invalid JSON: {err}")))?;

        debug!(city = %parsed.name, "weather payload parsed");
        Ok(WeatherReport::from(parsed))
    }
}

#[derive(Debug, Deserialize)]
struct GeoRecord {
    name: String,
    state: Option<String>,
    country: String,
}

impl From<GeoRecord> for CitySuggestion {
    fn from(record: GeoRecord) -> Self {
        Self {
            name: record.name,
            state: record.state,
            country: record.country,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    sys: OwSys,
    #[serde(default)]
    visibility: Option<u32>,
}

impl From<OwCurrentResponse> for WeatherReport {
    fn from(parsed: OwCurrentResponse) -> Self {
        let observation_time = DateTime::from_timestamp(parsed.dt, 0).unwrap_or_else(Utc::now);

        let description = parsed
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_else(|| "Unknown".to_string());

        Self {
            city: parsed.name,
            country: parsed.sys.country.unwrap_or_default(),
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            wind_speed_mps: parsed.wind.speed,
            visibility_m: parsed.visibility,
            description,
            observation_time,
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut cut = MAX;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEO_FIXTURE: &str = r#"[
        {"name": "London", "lat": 51.5073, "lon": -0.1276, "country": "GB"},
        {"name": "London", "state": "Ontario", "lat": 42.98, "lon": -81.24, "country": "CA"}
    ]"#;

    const WEATHER_FIXTURE: &str = r#"{
        "name": "Paris",
        "dt": 1717777777,
        "main": {"temp": 18.4, "feels_like": 17.9, "humidity": 62, "pressure": 1014},
        "weather": [{"id": 801, "main": "Clouds", "description": "few clouds", "icon": "02d"}],
        "wind": {"speed": 3.6, "deg": 220},
        "sys": {"country": "FR", "sunrise": 1717730000, "sunset": 1717786000},
        "visibility": 10000
    }"#;

    #[test]
    fn geocoding_batch_parses_in_upstream_order() {
        let records: Vec<GeoRecord> = serde_json::from_str(GEO_FIXTURE).expect("valid fixture");
        let suggestions: Vec<CitySuggestion> =
            records.into_iter().map(CitySuggestion::from).collect();

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].display_label(), "London, GB");
        assert_eq!(suggestions[1].display_label(), "London, Ontario, CA");
    }

    #[test]
    fn weather_payload_maps_to_report() {
        let parsed: OwCurrentResponse =
            serde_json::from_str(WEATHER_FIXTURE).expect("valid fixture");
        let report = WeatherReport::from(parsed);

        assert_eq!(report.city, "Paris");
        assert_eq!(report.country, "FR");
        assert_eq!(report.temperature_c, 18.4);
        assert_eq!(report.humidity_pct, 62);
        assert_eq!(report.pressure_hpa, 1014);
        assert_eq!(report.visibility_m, Some(10000));
        assert_eq!(report.description, "few clouds");
        assert_eq!(report.observation_time.timestamp(), 1717777777);
    }

    #[test]
    fn weather_payload_without_optional_fields() {
        let fixture = r#"{
            "name": "Nowhere",
            "dt": 1717777777,
            "main": {"temp": 1.0, "feels_like": -2.0, "humidity": 90, "pressure": 990},
            "weather": [],
            "wind": {"speed": 12.0}
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(fixture).expect("valid fixture");
        let report = WeatherReport::from(parsed);

        assert_eq!(report.country, "");
        assert_eq!(report.visibility_m, None);
        assert_eq!(report.description, "Unknown");
    }

    #[test]
    fn truncate_body_caps_long_payloads() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));

        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(150);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
    }
}
