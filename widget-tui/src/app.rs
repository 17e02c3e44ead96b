//! Event loop wiring terminal events, controller deadlines and spawned
//! fetches together.
//!
//! The controller decides; this module executes: it owns the terminal,
//! translates key/mouse/focus events into controller calls, sleeps until
//! the controller's next deadline, and runs returned [`Effect`]s as
//! spawned tasks whose results come back over an mpsc channel.

use std::io::Stdout;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    EventStream, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tracing::error;
use widget_core::{
    CitySuggestion, Config, Effect, InputController, LookupError, NavKey, OpenWeatherProvider,
    Timings, WeatherProvider, WeatherReport,
};

use crate::ui;
use crate::view::{HitTarget, TuiView};

type Controller = InputController<TuiView>;

/// Fetch results delivered back to the event loop.
enum FetchOutcome {
    Suggestions {
        seq: u64,
        result: Result<Vec<CitySuggestion>, LookupError>,
    },
    Weather(Result<WeatherReport, LookupError>),
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub async fn run() -> Result<()> {
    let config = Config::load()?;
    let api_key = config.require_api_key()?.to_string();

    let provider: Arc<dyn WeatherProvider> = Arc::new(OpenWeatherProvider::new(
        api_key,
        config.base_url.clone(),
        config.suggestion_limit,
    ));

    let timings = Timings {
        debounce_delay: config.debounce_delay(),
        blur_grace: config.blur_grace(),
    };
    let mut controller = InputController::new(TuiView::new(config.announce_ttl()), timings);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )
    .context("Failed to initialize terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = event_loop(&mut terminal, &mut controller, provider).await;

    // Best-effort restore; the loop's outcome is what matters.
    let _ = disable_raw_mode();
    let _ = execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    );
    let _ = terminal.show_cursor();

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    controller: &mut Controller,
    provider: Arc<dyn WeatherProvider>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut events = EventStream::new();

    loop {
        terminal
            .draw(|frame| ui::draw(frame, controller.view_mut()))
            .context("Failed to draw frame")?;

        let deadline = next_wake(controller);

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(event)) => {
                        if handle_event(controller, &provider, &tx, event) == Flow::Quit {
                            return Ok(());
                        }
                    }
                    Some(Err(err)) => error!(%err, "terminal event error"),
                    None => return Ok(()),
                }
            }
            _ = sleep_until(deadline), if deadline.is_some() => {
                let now = Instant::now();
                controller.view_mut().expire_announcement(now);
                run_effect(controller.on_deadline(now), &provider, &tx);
            }
            Some(outcome) = rx.recv() => {
                match outcome {
                    FetchOutcome::Suggestions { seq, result } => {
                        controller.suggestions_resolved(seq, result);
                    }
                    FetchOutcome::Weather(result) => controller.weather_resolved(result),
                }
            }
        }
    }
}

/// Earliest wake-up: controller deadline or announcement expiry.
fn next_wake(controller: &Controller) -> Option<Instant> {
    let announce = controller.view().announcement_deadline();
    match (controller.next_deadline(), announce) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    if let Some(deadline) = deadline {
        tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
    }
}

fn handle_event(
    controller: &mut Controller,
    provider: &Arc<dyn WeatherProvider>,
    tx: &mpsc::UnboundedSender<FetchOutcome>,
    event: Event,
) -> Flow {
    let now = Instant::now();

    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            match (key.code, key.modifiers) {
                (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Flow::Quit,
                (KeyCode::Up, _) => {
                    run_effect(controller.on_key(NavKey::Up), provider, tx);
                }
                (KeyCode::Down, _) => {
                    run_effect(controller.on_key(NavKey::Down), provider, tx);
                }
                (KeyCode::Enter, _) => {
                    run_effect(controller.on_key(NavKey::Enter), provider, tx);
                }
                (KeyCode::Esc, _) => {
                    run_effect(controller.on_key(NavKey::Escape), provider, tx);
                }
                (KeyCode::Backspace, _) => {
                    let text = controller.view_mut().delete_char();
                    controller.on_input(&text, now);
                }
                (KeyCode::Char(ch), modifiers)
                    if !modifiers.contains(KeyModifiers::CONTROL) =>
                {
                    let text = controller.view_mut().insert_char(ch);
                    controller.on_input(&text, now);
                }
                _ => {}
            }
        }
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            match controller.view().hit_test(mouse.column, mouse.row) {
                HitTarget::Suggestion(index) => controller.on_click_suggestion(index),
                HitTarget::Submit => {
                    // The click lands outside the suggestion region, so
                    // the session closes before the request goes out.
                    controller.on_click_outside();
                    run_effect(controller.submit(), provider, tx);
                }
                HitTarget::Input => {}
                HitTarget::Outside => controller.on_click_outside(),
            }
        }
        Event::FocusLost => controller.on_blur(now),
        _ => {}
    }

    Flow::Continue
}

fn run_effect(
    effect: Option<Effect>,
    provider: &Arc<dyn WeatherProvider>,
    tx: &mpsc::UnboundedSender<FetchOutcome>,
) {
    let Some(effect) = effect else {
        return;
    };

    let provider = Arc::clone(provider);
    let tx = tx.clone();
    tokio::spawn(async move {
        let outcome = match effect {
            Effect::FetchSuggestions { query, seq } => FetchOutcome::Suggestions {
                seq,
                result: provider.fetch_suggestions(&query).await,
            },
            Effect::FetchWeather { city } => {
                FetchOutcome::Weather(provider.fetch_weather(&city).await)
            }
        };
        // The loop may have exited; a dropped receiver is fine.
        let _ = tx.send(outcome);
    });
}
