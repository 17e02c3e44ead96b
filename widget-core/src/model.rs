use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One autocomplete candidate from the geocoding endpoint.
///
/// Batches are replaced wholesale on every new query; upstream response
/// order is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySuggestion {
    pub name: String,
    pub state: Option<String>,
    pub country: String,
}

impl CitySuggestion {
    /// Display label in `name[, state], country` form.
    pub fn display_label(&self) -> String {
        match &self.state {
            Some(state) => format!("{}, {}, {}", self.name, state, self.country),
            None => format!("{}, {}", self.name, self.country),
        }
    }
}

/// Current conditions for one city.
///
/// Ephemeral: exists only for rendering. A new request fully replaces the
/// prior report or error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    /// Meters, when the provider reports it.
    pub visibility_m: Option<u32>,
    pub description: String,
    pub observation_time: DateTime<Utc>,
}

/// City derived from raw submit input: text before the first comma of the
/// trimmed input, trimmed again.
pub fn derive_city(raw: &str) -> &str {
    raw.trim().split(',').next().unwrap_or("").trim()
}
