use crate::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Draws the key help, or the latest notice if there is one.
pub fn draw_footer(f: &mut Frame<'_>, area: Rect, app: &App) {
    let (text, color) = match &app.notice {
        Some(notice) => (notice.as_str(), Color::Yellow),
        None if app.snippets.snippets.is_empty() => (
            "Enter send · PgUp/PgDn scroll · Esc quit",
            Color::DarkGray,
        ),
        None => (
            "Enter send · Ctrl+N/P pick code · Ctrl+Y or Alt+1..9 copy · Esc quit",
            Color::DarkGray,
        ),
    };

    let footer = Paragraph::new(text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(footer, area);
}
