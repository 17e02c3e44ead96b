//! Render-target seam between the controller and a concrete surface.

use crate::present::{SuggestionView, WeatherCard};

/// Injected render target.
///
/// All text arriving through this trait has already been made markup-safe
/// by the presentation adapter; implementations must treat it as inert
/// data and never interpolate it into anything executable.
pub trait View {
    /// Open or refresh the suggestion dropdown.
    fn render_suggestions(&mut self, view: &SuggestionView);

    /// Close the suggestion dropdown.
    fn close_suggestions(&mut self);

    /// Replace the input text (suggestion selection).
    fn set_input(&mut self, text: &str);

    /// Return focus to the input.
    fn focus_input(&mut self);

    /// Toggle the loading state of the submit control: disabled with a
    /// loading label while true.
    fn set_loading(&mut self, loading: bool);

    fn render_weather(&mut self, card: &WeatherCard);

    fn render_error(&mut self, message: &str);

    /// Transient assistive-technology announcement. Implementations own
    /// the removal after the configured TTL.
    fn announce(&mut self, message: &str);
}
