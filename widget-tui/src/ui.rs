//! ratatui drawing for the widget: input box, submit control, suggestion
//! popup, result panel and the announcement line.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use crate::view::{ResultPanel, TuiView};

pub fn draw(frame: &mut Frame, view: &mut TuiView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // input
            Constraint::Length(3), // submit control
            Constraint::Min(8),    // result panel
            Constraint::Length(1), // announcement line
        ])
        .split(frame.size());

    draw_input(frame, view, chunks[0]);
    draw_submit(frame, view, chunks[1]);
    draw_result(frame, view, chunks[2]);
    draw_announcement(frame, view, chunks[3]);

    // The popup overlays whatever is below the input; drawn last so it
    // stays on top.
    draw_suggestions(frame, view, chunks[0]);
}

fn draw_input(frame: &mut Frame, view: &mut TuiView, area: Rect) {
    view.input_area = area;

    let input = Paragraph::new(view.input.as_str())
        .block(Block::default().borders(Borders::ALL).title("City"));
    frame.render_widget(input, area);

    // Keep the terminal cursor at the end of the typed text.
    let max_x = area.x.saturating_add(area.width.saturating_sub(2));
    let cursor_x = area
        .x
        .saturating_add(1)
        .saturating_add(view.input.chars().count() as u16)
        .min(max_x);
    frame.set_cursor(cursor_x, area.y.saturating_add(1));
}

fn draw_submit(frame: &mut Frame, view: &mut TuiView, area: Rect) {
    view.submit_area = area;

    let (label, style) = if view.loading {
        (
            "Loading...",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )
    } else {
        ("Get Weather", Style::default().add_modifier(Modifier::BOLD))
    };

    let button = Paragraph::new(Line::from(Span::styled(label, style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, area);
}

fn draw_suggestions(frame: &mut Frame, view: &mut TuiView, input_area: Rect) {
    view.suggestion_rows.clear();
    let Some(suggestions) = view.suggestions.clone() else {
        return;
    };

    let frame_area = frame.size();
    let rows = suggestions.items.len() as u16;
    let height = rows
        .saturating_add(2)
        .min(frame_area.height.saturating_sub(input_area.bottom()));
    if height < 3 {
        return;
    }

    let area = Rect::new(input_area.x, input_area.bottom(), input_area.width, height);

    let items: Vec<ListItem> = suggestions
        .items
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let style = if suggestions.placeholder {
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
            } else if Some(index) == suggestions.selected {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default()
            };
            ListItem::new(label.as_str()).style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Suggestions"));

    frame.render_widget(Clear, area);
    frame.render_widget(list, area);

    // Inner rows, top to bottom, for mouse hit-testing.
    let visible = rows.min(height.saturating_sub(2));
    for offset in 0..visible {
        view.suggestion_rows.push(Rect::new(
            area.x.saturating_add(1),
            area.y.saturating_add(1).saturating_add(offset),
            area.width.saturating_sub(2),
            1,
        ));
    }
}

fn draw_result(frame: &mut Frame, view: &TuiView, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Weather");

    match &view.result {
        ResultPanel::Empty => {
            let hint = Paragraph::new("Type a city name and press Enter.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(hint, area);
        }
        ResultPanel::Weather(card) => {
            let lines = vec![
                Line::from(Span::styled(
                    card.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    card.temperature.clone(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(format!("Feels like   {}", card.feels_like)),
                Line::from(format!("Humidity     {}", card.humidity)),
                Line::from(format!("Pressure     {}", card.pressure)),
                Line::from(format!("Wind speed   {}", card.wind_speed)),
                Line::from(format!("Visibility   {}", card.visibility)),
                Line::from(""),
                Line::from(Span::styled(
                    card.description.clone(),
                    Style::default().add_modifier(Modifier::ITALIC),
                )),
                Line::from(Span::styled(
                    card.observed.clone(),
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            frame.render_widget(Paragraph::new(lines).block(block), area);
        }
        ResultPanel::Error(message) => {
            let error = Paragraph::new(format!("Error: {message}"))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(error, area);
        }
    }
}

fn draw_announcement(frame: &mut Frame, view: &TuiView, area: Rect) {
    if let Some(message) = view.announcement() {
        let line = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC));
        frame.render_widget(line, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::time::Duration;
    use widget_core::present::suggestion_view;
    use widget_core::{CitySuggestion, View};

    fn city(name: &str) -> CitySuggestion {
        CitySuggestion {
            name: name.to_string(),
            state: None,
            country: "GB".to_string(),
        }
    }

    #[test]
    fn draw_records_hit_rects_for_suggestion_rows() {
        let backend = TestBackend::new(60, 24);
        let mut terminal = Terminal::new(backend).expect("test terminal");
        let mut view = TuiView::new(Duration::from_millis(1000));

        let model = suggestion_view(&[city("London"), city("Londrina")], Some(1));
        view.render_suggestions(&model);

        terminal
            .draw(|frame| draw(frame, &mut view))
            .expect("draw succeeds");

        assert_eq!(view.suggestion_rows.len(), 2);
        // Rows sit inside the popup borders, just below the input box.
        assert_eq!(view.suggestion_rows[0].y, 4);
        assert_eq!(view.suggestion_rows[1].y, 5);
        assert_eq!(view.input_area, Rect::new(0, 0, 60, 3));
    }

    #[test]
    fn closed_session_leaves_no_hit_rects() {
        let backend = TestBackend::new(60, 24);
        let mut terminal = Terminal::new(backend).expect("test terminal");
        let mut view = TuiView::new(Duration::from_millis(1000));

        terminal
            .draw(|frame| draw(frame, &mut view))
            .expect("draw succeeds");

        assert!(view.suggestion_rows.is_empty());
    }
}
