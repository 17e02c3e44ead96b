//! Presentation adapter: sanitized display models and assistive
//! announcements.
//!
//! Everything handed to a [`View`](crate::view::View) goes through
//! [`escape_markup`] first, so no user- or API-supplied text ever reaches
//! a render surface unescaped.

use crate::model::{CitySuggestion, WeatherReport};

/// Placeholder row rendered when a suggestion batch comes back empty.
/// Visible, but never keyboard-selectable.
pub const NO_CITIES_PLACEHOLDER: &str = "No cities found";

/// Escape markup metacharacters so the result is inert on any surface.
pub fn escape_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Display model for the suggestion dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionView {
    /// Sanitized display labels, upstream order.
    pub items: Vec<String>,
    /// Highlighted row, if any.
    pub selected: Option<usize>,
    /// Accessibility active-descendant id, `suggestion-<i>`.
    pub active_descendant: Option<String>,
    /// True when the batch was empty and only the placeholder is shown.
    pub placeholder: bool,
}

pub fn suggestion_view(suggestions: &[CitySuggestion], selected: Option<usize>) -> SuggestionView {
    if suggestions.is_empty() {
        return SuggestionView {
            items: vec![NO_CITIES_PLACEHOLDER.to_string()],
            selected: None,
            active_descendant: None,
            placeholder: true,
        };
    }

    SuggestionView {
        items: suggestions
            .iter()
            .map(|s| escape_markup(&s.display_label()))
            .collect(),
        selected,
        active_descendant: selected.map(|i| format!("suggestion-{i}")),
        placeholder: false,
    }
}

/// Display model for a rendered weather result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherCard {
    /// `City, CC` heading.
    pub title: String,
    pub temperature: String,
    pub feels_like: String,
    pub humidity: String,
    pub pressure: String,
    pub wind_speed: String,
    pub visibility: String,
    pub description: String,
    pub observed: String,
}

pub fn weather_card(report: &WeatherReport) -> WeatherCard {
    let visibility = match report.visibility_m {
        Some(meters) => format!("{:.1} km", f64::from(meters) / 1000.0),
        None => "N/A".to_string(),
    };

    WeatherCard {
        title: format!(
            "{}, {}",
            escape_markup(&report.city),
            escape_markup(&report.country)
        ),
        temperature: format!("{}°C", report.temperature_c.round() as i64),
        feels_like: format!("{}°C", report.feels_like_c.round() as i64),
        humidity: format!("{}%", report.humidity_pct),
        pressure: format!("{} hPa", report.pressure_hpa),
        wind_speed: format!("{} m/s", report.wind_speed_mps),
        visibility,
        description: escape_markup(&report.description),
        observed: format!("observed {} UTC", report.observation_time.format("%H:%M")),
    }
}

/// Announcement after a successful weather load.
pub fn weather_announcement(report: &WeatherReport) -> String {
    format!(
        "Weather data loaded for {}. Temperature is {} degrees Celsius.",
        escape_markup(&report.city),
        report.temperature_c.round() as i64
    )
}

/// Announcement after a failure.
pub fn error_announcement(message: &str) -> String {
    format!("Error: {message}")
}
