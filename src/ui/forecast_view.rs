//! Forecast screen rendering
//!
//! Renders the search field, the loading and error states, and for a loaded
//! forecast: current conditions, day parts, the daily overview, a scrollable
//! panel with the expanded day's hours, and wind/humidity details.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppState};
use crate::forecast::{DailySummary, ForecastSnapshot, WeatherSample};

use super::{help_overlay, search_bar};

/// Color for temperature (warmer = more red, cooler = more blue)
fn temperature_color(temp: i32) -> Color {
    if temp >= 30 {
        Color::Red
    } else if temp >= 25 {
        Color::LightRed
    } else if temp >= 20 {
        Color::Yellow
    } else if temp >= 10 {
        Color::Green
    } else if temp >= 0 {
        Color::Cyan
    } else {
        Color::Blue
    }
}

fn temperature_span(temp: i32) -> Span<'static> {
    Span::styled(format!("{}°", temp), Style::default().fg(temperature_color(temp)))
}

/// Renders the whole screen for the current application state.
///
/// Takes `&mut App` to clamp the hourly scroll offset to what fits.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search field
            Constraint::Min(3),    // Forecast
            Constraint::Length(1), // Help text
        ])
        .split(area);

    search_bar::render(frame, app, chunks[0]);

    match app.state.clone() {
        AppState::Loading => render_loading(frame, app, chunks[1]),
        AppState::Error(message) => render_error(frame, &message, chunks[1]),
        AppState::Ready if app.snapshot.is_some() => render_forecast(frame, app, chunks[1]),
        AppState::Ready => render_loading(frame, app, chunks[1]),
    }

    render_help(frame, chunks[2]);

    if app.show_help {
        help_overlay::render(frame);
    }
}

/// Renders a loading message while the forecast is being fetched
fn render_loading(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Percentage(45),
        ])
        .split(area);

    let loading_text = Paragraph::new(format!("Loading forecast for {}...", app.location))
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

fn render_error(frame: &mut Frame, message: &str, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press / to search for another place or r to retry",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_forecast(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let list_height = u16::try_from(app.day_count() + 1).unwrap_or(u16::MAX);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),           // Current conditions + day parts
            Constraint::Length(list_height), // Daily overview
            Constraint::Min(3),              // Hours of the expanded day
            Constraint::Length(1),           // Wind and humidity
        ])
        .split(inner);

    // Clamp scroll offset to the hours that can still fill the panel
    let hours = app.selected_hours();
    let visible_rows = chunks[2].height.saturating_sub(2);
    let total_rows = u16::try_from(hours.len()).unwrap_or(u16::MAX);
    let max_scroll = total_rows.saturating_sub(visible_rows);
    if app.hour_scroll > max_scroll {
        app.hour_scroll = max_scroll;
    }
    let scroll = app.hour_scroll;

    let Some(snapshot) = app.snapshot.as_ref() else {
        return;
    };

    let mut header = current_lines(snapshot);
    header.push(Line::from(""));
    header.push(day_part_line(snapshot));
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let mut list = vec![Line::from(Span::styled(
        "5-day forecast",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for (index, day) in snapshot.daily.iter().enumerate() {
        list.push(daily_line(
            day,
            index == app.cursor,
            app.selection.is_selected(day.date),
        ));
    }
    frame.render_widget(Paragraph::new(list), chunks[1]);

    let expanded = snapshot
        .daily
        .iter()
        .find(|day| app.selection.is_selected(day.date));
    render_hours(frame, expanded, &hours, scroll, max_scroll, chunks[2]);

    let details = Line::from(vec![
        Span::styled("Wind ", Style::default().fg(Color::Gray)),
        Span::raw(format!("{} km/h", snapshot.current.wind_speed)),
        Span::raw("   "),
        Span::styled("Humidity ", Style::default().fg(Color::Gray)),
        Span::raw(format!("{}%", snapshot.current.humidity)),
    ]);
    frame.render_widget(Paragraph::new(details), chunks[3]);
}

/// Renders the hourly panel, scrolled to `scroll` rows
fn render_hours(
    frame: &mut Frame,
    expanded: Option<&DailySummary>,
    hours: &[WeatherSample],
    scroll: u16,
    max_scroll: u16,
    area: Rect,
) {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(day) = expanded else {
        let hint = Paragraph::new(Span::styled(
            "Press Enter on a day to see its hours",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block.title(" Hours "));
        frame.render_widget(hint, area);
        return;
    };

    block = block.title(format!(" {} ", day.day_label()));
    let more = match (scroll > 0, scroll < max_scroll) {
        (true, true) => Some(" ▲ PgUp  PgDn ▼ "),
        (false, true) => Some(" PgDn ▼ "),
        (true, false) => Some(" ▲ PgUp "),
        (false, false) => None,
    };
    if let Some(more) = more {
        block = block.title_bottom(Line::from(Span::styled(
            more,
            Style::default().fg(Color::Yellow),
        )));
    }

    let paragraph = Paragraph::new(hourly_lines(hours))
        .block(block)
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Location heading and current conditions
fn current_lines(snapshot: &ForecastSnapshot) -> Vec<Line<'static>> {
    let current = &snapshot.current;

    let mut conditions = vec![
        Span::raw(format!("{} ", current.condition.icon.glyph())),
        Span::styled(
            format!("{}°C", current.temperature),
            Style::default()
                .fg(temperature_color(current.temperature))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  {}", current.condition.description)),
    ];
    if let (Some(high), Some(low)) = (current.high, current.low) {
        conditions.push(Span::styled("   H: ", Style::default().fg(Color::Gray)));
        conditions.push(temperature_span(high));
        conditions.push(Span::styled(" L: ", Style::default().fg(Color::Gray)));
        conditions.push(temperature_span(low));
    }

    vec![
        Line::from(vec![
            Span::styled(
                snapshot.location.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  valid at {}", current.observed_at.format("%H:%M")),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(conditions),
    ]
}

fn day_part_line(snapshot: &ForecastSnapshot) -> Line<'static> {
    let mut spans = Vec::new();
    for view in &snapshot.day_parts {
        spans.push(Span::styled(
            format!("{} ", view.part.label()),
            Style::default().fg(Color::Gray),
        ));
        spans.push(Span::raw(format!("{} ", view.icon.glyph())));
        spans.push(temperature_span(view.temperature));
        spans.push(Span::raw("   "));
    }
    Line::from(spans)
}

fn daily_line(day: &DailySummary, is_cursor: bool, expanded: bool) -> Line<'static> {
    let marker = if is_cursor { "> " } else { "  " };
    let expand = if expanded { "▾" } else { "▸" };
    let label_style = if is_cursor {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Cyan)),
        Span::raw(format!("{} ", expand)),
        Span::styled(format!("{:<20}", day.day_label()), label_style),
        Span::raw(format!("{} ", day.icon.glyph())),
        temperature_span(day.high),
        Span::raw(" / "),
        temperature_span(day.low),
        Span::styled(
            format!("  {}", day.precipitation_label()),
            Style::default().fg(Color::Blue),
        ),
    ])
}

fn hourly_lines(hours: &[WeatherSample]) -> Vec<Line<'static>> {
    if hours.is_empty() {
        return vec![Line::from(Span::styled(
            "No remaining hours for this day",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    hours
        .iter()
        .map(|sample| {
            Line::from(vec![
                Span::styled(
                    format!("{} ", sample.time.format("%H:%M")),
                    Style::default().fg(Color::Gray),
                ),
                Span::raw(format!("{} ", sample.condition.icon.glyph())),
                temperature_span(sample.temperature),
                Span::styled(
                    format!("  {}", sample.precipitation_label()),
                    Style::default().fg(Color::Blue),
                ),
            ])
        })
        .collect()
}

/// Renders the key hint line at the bottom of the screen
fn render_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(Line::from(vec![Span::styled(
        " / search  ↑↓ move  Enter expand  PgUp/PgDn hours  r reload  ? help  q quit",
        Style::default().fg(Color::DarkGray),
    )]));
    frame.render_widget(help, area);
}
