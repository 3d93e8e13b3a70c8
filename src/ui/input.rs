use crate::constants::{INPUT_PLACEHOLDER, INPUT_PLACEHOLDER_BUSY, SEND_LABEL, SEND_LABEL_BUSY};
use crate::format::sanitize;
use crate::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const SEND_ENABLED: Color = Color::Rgb(79, 70, 229);
const SEND_DISABLED: Color = Color::Rgb(156, 163, 175);

/// Draws the input field and the send control next to it.
pub fn draw_input(f: &mut Frame<'_>, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(10)])
        .split(area);

    let busy = app.controller.is_busy();
    let input = sanitize(app.controller.input());

    let field_style = if busy {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Rgb(209, 213, 219))
    };
    let field = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(field_style);
    let inner = field.inner(chunks[0]);

    let content = if input.is_empty() {
        let placeholder = if busy {
            INPUT_PLACEHOLDER_BUSY
        } else {
            INPUT_PLACEHOLDER
        };
        Line::from(Span::styled(
            placeholder,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(Span::raw(input.clone()))
    };

    // Keep the last column free for the cursor.
    let visible = inner.width.saturating_sub(1) as usize;
    let text_width = input.width();
    let scroll_offset = u16::try_from(text_width.saturating_sub(visible)).unwrap_or(u16::MAX);
    f.render_widget(
        Paragraph::new(content).block(field).scroll((0, scroll_offset)),
        chunks[0],
    );

    if !busy {
        let cursor_col = text_width.min(visible) as u16;
        f.set_cursor_position((inner.x.saturating_add(cursor_col), inner.y));
    }

    let enabled = app.controller.can_send();
    let label = if busy { SEND_LABEL_BUSY } else { SEND_LABEL };
    let send_style = Style::default()
        .fg(Color::White)
        .bg(if enabled { SEND_ENABLED } else { SEND_DISABLED })
        .add_modifier(Modifier::BOLD);

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {} ", label), send_style)))
            .alignment(ratatui::layout::Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded)),
        chunks[1],
    );
}
