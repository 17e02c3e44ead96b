//! Terminal implementation of the core [`View`] trait.
//!
//! Holds the render state the draw loop reads: input buffer, suggestion
//! dropdown, result panel, loading flag and the transient announcement
//! line. Also records the rects of the last draw for mouse hit-testing.

use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use widget_core::{SuggestionView, View, WeatherCard};

/// What a left-click at (column, row) maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Input,
    Submit,
    Suggestion(usize),
    Outside,
}

/// Content of the result panel. A new request fully replaces it.
#[derive(Debug, Clone, Default)]
pub enum ResultPanel {
    #[default]
    Empty,
    Weather(WeatherCard),
    Error(String),
}

pub struct TuiView {
    pub input: String,
    pub suggestions: Option<SuggestionView>,
    pub result: ResultPanel,
    pub loading: bool,
    announcement: Option<(String, Instant)>,
    announce_ttl: Duration,

    // Rects recorded by the last draw, for mouse hit-testing.
    pub input_area: Rect,
    pub submit_area: Rect,
    pub suggestion_rows: Vec<Rect>,
}

impl TuiView {
    pub fn new(announce_ttl: Duration) -> Self {
        Self {
            input: String::new(),
            suggestions: None,
            result: ResultPanel::Empty,
            loading: false,
            announcement: None,
            announce_ttl,
            input_area: Rect::default(),
            submit_area: Rect::default(),
            suggestion_rows: Vec::new(),
        }
    }

    /// Append a typed character; returns the updated text.
    pub fn insert_char(&mut self, ch: char) -> String {
        self.input.push(ch);
        self.input.clone()
    }

    /// Delete the last character; returns the updated text.
    pub fn delete_char(&mut self) -> String {
        self.input.pop();
        self.input.clone()
    }

    pub fn announcement(&self) -> Option<&str> {
        self.announcement.as_ref().map(|(message, _)| message.as_str())
    }

    pub fn announcement_deadline(&self) -> Option<Instant> {
        self.announcement.as_ref().map(|&(_, deadline)| deadline)
    }

    /// Drop the announcement once its TTL has elapsed.
    pub fn expire_announcement(&mut self, now: Instant) {
        if self
            .announcement
            .as_ref()
            .is_some_and(|&(_, deadline)| now >= deadline)
        {
            self.announcement = None;
        }
    }

    pub fn hit_test(&self, column: u16, row: u16) -> HitTarget {
        for (index, rect) in self.suggestion_rows.iter().enumerate() {
            if contains(rect, column, row) {
                return HitTarget::Suggestion(index);
            }
        }
        if contains(&self.input_area, column, row) {
            return HitTarget::Input;
        }
        if contains(&self.submit_area, column, row) {
            return HitTarget::Submit;
        }
        HitTarget::Outside
    }
}

fn contains(rect: &Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

impl View for TuiView {
    fn render_suggestions(&mut self, view: &SuggestionView) {
        self.suggestions = Some(view.clone());
    }

    fn close_suggestions(&mut self) {
        self.suggestions = None;
        self.suggestion_rows.clear();
    }

    fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    fn focus_input(&mut self) {
        // Single-input surface: focus is implicit.
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn render_weather(&mut self, card: &WeatherCard) {
        self.result = ResultPanel::Weather(card.clone());
    }

    fn render_error(&mut self, message: &str) {
        self.result = ResultPanel::Error(message.to_string());
    }

    fn announce(&mut self, message: &str) {
        self.announcement = Some((message.to_string(), Instant::now() + self.announce_ttl));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> TuiView {
        TuiView::new(Duration::from_millis(1000))
    }

    #[test]
    fn announcement_expires_after_ttl() {
        let mut view = view();
        view.announce("Weather data loaded for Paris.");

        let deadline = view.announcement_deadline().expect("announcement live");

        view.expire_announcement(deadline - Duration::from_millis(1));
        assert_eq!(view.announcement(), Some("Weather data loaded for Paris."));

        view.expire_announcement(deadline);
        assert_eq!(view.announcement(), None);
    }

    #[test]
    fn newer_announcement_replaces_prior_one() {
        let mut view = view();
        view.announce("first");
        view.announce("second");

        assert_eq!(view.announcement(), Some("second"));
    }

    #[test]
    fn editing_returns_updated_text() {
        let mut view = view();
        assert_eq!(view.insert_char('P'), "P");
        assert_eq!(view.insert_char('a'), "Pa");
        assert_eq!(view.delete_char(), "P");
        assert_eq!(view.delete_char(), "");
        // Backspace on empty input stays empty.
        assert_eq!(view.delete_char(), "");
    }

    #[test]
    fn hit_test_prefers_suggestion_rows() {
        let mut view = view();
        view.input_area = Rect::new(0, 0, 40, 3);
        view.submit_area = Rect::new(0, 3, 40, 3);
        view.suggestion_rows = vec![Rect::new(1, 3, 38, 1), Rect::new(1, 4, 38, 1)];

        assert_eq!(view.hit_test(5, 3), HitTarget::Suggestion(0));
        assert_eq!(view.hit_test(5, 4), HitTarget::Suggestion(1));
        assert_eq!(view.hit_test(5, 1), HitTarget::Input);
        assert_eq!(view.hit_test(0, 5), HitTarget::Submit);
        assert_eq!(view.hit_test(39, 20), HitTarget::Outside);
    }
}
