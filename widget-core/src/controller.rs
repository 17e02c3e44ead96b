//! The input controller: wires the debounce gate, the suggestion session
//! and the weather request flow to an injected render target.
//!
//! The controller is sans-IO. Time comes in through `Instant` arguments
//! and leaves through [`InputController::next_deadline`]; network work
//! leaves as [`Effect`] values the runtime executes, with results fed
//! back via [`InputController::suggestions_resolved`] and
//! [`InputController::weather_resolved`]. Handlers run to completion
//! between events, so session state needs no locking.

pub mod debounce;
pub mod session;

use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::LookupError;
use crate::model::{self, CitySuggestion, WeatherReport};
use crate::present;
use crate::view::View;
use debounce::{DebounceGate, GateAction};
use session::SuggestionSession;

/// Quiet periods driving the controller's two deadlines.
#[derive(Debug, Clone, Copy)]
pub struct Timings {
    pub debounce_delay: Duration,
    pub blur_grace: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            debounce_delay: Duration::from_millis(300),
            blur_grace: Duration::from_millis(150),
        }
    }
}

/// Navigation keys the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Enter,
    Escape,
}

/// Network commands returned to the runtime for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchSuggestions { query: String, seq: u64 },
    FetchWeather { city: String },
}

pub struct InputController<V: View> {
    view: V,
    gate: DebounceGate,
    session: SuggestionSession,
    timings: Timings,
    input: String,
    in_flight: bool,
    blur_deadline: Option<Instant>,
}

impl<V: View> InputController<V> {
    pub fn new(view: V, timings: Timings) -> Self {
        Self {
            view,
            gate: DebounceGate::new(timings.debounce_delay),
            session: SuggestionSession::default(),
            timings,
            input: String::new(),
            in_flight: false,
            blur_deadline: None,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Current input text as the controller last saw it.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// True while a weather request is in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Keystroke handler: records the new text and runs the debounce
    /// gate. Any selection over the previous batch is dropped.
    pub fn on_input(&mut self, text: &str, now: Instant) {
        self.input = text.to_string();
        match self.gate.on_input(text, now) {
            GateAction::CloseSession => self.close_session(),
            GateAction::Armed => {
                self.session.reset_cursor();
                if self.session.is_open() {
                    self.render_session();
                }
            }
        }
    }

    /// Earliest pending deadline (debounce or blur grace), for the
    /// runtime's timer.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.gate.deadline(), self.blur_deadline) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Drive the controller's clock. Returns a fetch to execute when the
    /// debounce quiet period has elapsed.
    pub fn on_deadline(&mut self, now: Instant) -> Option<Effect> {
        if self.blur_deadline.is_some_and(|d| now >= d) {
            self.close_session();
        }

        self.gate
            .fire(now)
            .map(|(query, seq)| Effect::FetchSuggestions { query, seq })
    }

    pub fn on_key(&mut self, key: NavKey) -> Option<Effect> {
        match key {
            NavKey::Down => {
                if self.session.move_down() {
                    self.render_session();
                }
                None
            }
            NavKey::Up => {
                if self.session.move_up() {
                    self.render_session();
                }
                None
            }
            NavKey::Escape => {
                if self.session.is_open() {
                    self.close_session();
                }
                None
            }
            NavKey::Enter => match self.session.selected().cloned() {
                Some(suggestion) => {
                    self.select_suggestion(suggestion);
                    None
                }
                None => self.submit(),
            },
        }
    }

    /// Click on suggestion row `index`. The placeholder row of an empty
    /// batch resolves to no suggestion and is ignored.
    pub fn on_click_suggestion(&mut self, index: usize) {
        if let Some(suggestion) = self.session.get(index).cloned() {
            self.select_suggestion(suggestion);
        }
    }

    /// Input blur. Closing is deferred by the grace period so a click on
    /// a suggestion row wins over the blur.
    pub fn on_blur(&mut self, now: Instant) {
        if self.session.is_open() {
            self.blur_deadline = Some(now + self.timings.blur_grace);
        }
    }

    /// Click outside the input/suggestion region.
    pub fn on_click_outside(&mut self) {
        if self.session.is_open() {
            self.close_session();
        }
    }

    /// Suggestion batch resolution. A batch whose sequence number is no
    /// longer current (the input changed while it was in flight) is
    /// discarded.
    pub fn suggestions_resolved(
        &mut self,
        seq: u64,
        result: Result<Vec<CitySuggestion>, LookupError>,
    ) {
        if !self.gate.is_current(seq) {
            debug!(seq, "discarding stale suggestion batch");
            return;
        }

        match result {
            Ok(suggestions) => {
                self.session.open(suggestions);
                self.render_session();
            }
            Err(err) => self.report_error(&err),
        }
    }

    /// Submit the current input to the weather request flow. Single
    /// flight: a submit while one is in flight is a no-op.
    pub fn submit(&mut self) -> Option<Effect> {
        if self.in_flight {
            return None;
        }

        let city = model::derive_city(&self.input);
        if city.is_empty() {
            self.report_error(&LookupError::EmptyCity);
            self.view.focus_input();
            return None;
        }

        self.in_flight = true;
        self.view.set_loading(true);
        Some(Effect::FetchWeather {
            city: city.to_string(),
        })
    }

    /// Weather resolution: render the report or the classified error,
    /// then clear the loading state — on every path.
    pub fn weather_resolved(&mut self, result: Result<WeatherReport, LookupError>) {
        match result {
            Ok(report) => {
                let card = present::weather_card(&report);
                self.view.render_weather(&card);
                self.view.announce(&present::weather_announcement(&report));
            }
            Err(err) => self.report_error(&err),
        }

        self.in_flight = false;
        self.view.set_loading(false);
    }

    fn select_suggestion(&mut self, suggestion: CitySuggestion) {
        let label = suggestion.display_label();
        self.input = label.clone();
        self.view.set_input(&label);
        self.close_session();
        self.view.focus_input();
    }

    fn close_session(&mut self) {
        self.gate.invalidate();
        self.blur_deadline = None;
        self.session.close();
        self.view.close_suggestions();
    }

    fn render_session(&mut self) {
        let model = present::suggestion_view(self.session.suggestions(), self.session.cursor());
        self.view.render_suggestions(&model);
    }

    fn report_error(&mut self, err: &LookupError) {
        let message = present::escape_markup(&err.user_message());
        self.view.render_error(&message);
        self.view.announce(&present::error_announcement(&message));
    }
}
