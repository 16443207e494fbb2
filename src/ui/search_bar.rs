//! Search field at the top of the screen

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Renders the search field, showing the typed term while editing and the
/// current location otherwise
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let (line, border) = if app.editing {
        (
            Line::from(vec![
                Span::styled("Search: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    format!("{}_", app.search_input),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Color::Yellow,
        )
    } else {
        (
            Line::from(vec![
                Span::styled(
                    app.location.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("  (press / to search)", Style::default().fg(Color::DarkGray)),
            ]),
            Color::DarkGray,
        )
    };

    let block = Block::default()
        .title(" CRABBY ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    frame.render_widget(Paragraph::new(line).block(block), area);
}
