use crate::constants::APP_TITLE;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Draws the title with a separator under it.
pub fn draw_header(f: &mut Frame<'_>, area: Rect) {
    let title = Line::from(Span::styled(
        APP_TITLE,
        Style::default()
            .fg(Color::Rgb(229, 231, 235))
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);

    let separator = Line::from(Span::styled(
        "─".repeat(area.width as usize),
        Style::default().fg(Color::DarkGray),
    ));

    f.render_widget(Paragraph::new(vec![title, separator]), area);
}
