use crate::chat_message::render_message;
use crate::App;
use ratatui::{
    layout::Rect,
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// Builds every row of the conversation, typing indicator included.
pub fn conversation_lines(app: &App, width: u16) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let focused = app.snippets.focused_snippet;

    for message in app.controller.conversation().messages() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        let own: Vec<_> = app.snippets.for_message(message.id).collect();
        lines.extend(render_message(message, &own, focused, width));
    }

    if let Some(indicator) = app.status_indicator.line() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(indicator);
    }

    lines
}

pub fn draw_messages(f: &mut Frame<'_>, area: Rect, app: &App) {
    let lines = conversation_lines(app, area.width);

    let total_lines = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_scroll = total_lines.saturating_sub(area.height);
    let scroll = max_scroll.saturating_sub(app.scroll_from_bottom);

    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), area);
}
