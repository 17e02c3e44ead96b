//! Core library for the weather lookup widget.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider (city suggestions + current weather)
//! - The input controller: debounce gate, suggestion session, weather
//!   request flow and presentation adapter, wired to an injected [`View`]
//!
//! It is used by `widget-tui`, but can also be reused by other frontends.

pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod present;
pub mod provider;
pub mod view;

pub use config::Config;
pub use controller::{Effect, InputController, NavKey, Timings};
pub use error::LookupError;
pub use model::{CitySuggestion, WeatherReport};
pub use present::{SuggestionView, WeatherCard};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use view::View;
