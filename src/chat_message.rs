use crate::code_snippet::CodeSnippet;
use crate::constants::{ASSISTANT_AVATAR, BUBBLE_WIDTH_PERCENT, USER_AVATAR};
use crate::format::{segments, Segment};
use crate::models::Message;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthChar;

const USER_ACCENT: Color = Color::Rgb(79, 70, 229);
const ASSISTANT_ACCENT: Color = Color::Rgb(5, 150, 105);
const CODE_FG: Color = Color::Rgb(229, 231, 235);
const CODE_BG: Color = Color::Rgb(31, 41, 55);
const COPY_BG: Color = Color::Rgb(55, 65, 81);
const COPIED_BG: Color = Color::Rgb(16, 185, 129);

/// Renders one message as a chat bubble.
///
/// `snippets` are the code blocks of this message in order, used for the
/// copy labels; `focused` is the global index of the focused code block.
pub fn render_message(
    message: &Message,
    snippets: &[&CodeSnippet],
    focused: Option<usize>,
    area_width: u16,
) -> Vec<Line<'static>> {
    let bubble = Bubble::new(message, area_width);
    let mut lines = Vec::new();

    bubble.render_header(&mut lines, message);

    let mut code_index = 0;
    for segment in segments(&message.text) {
        match segment {
            Segment::Prose(_) => bubble.render_prose(&mut lines, &segment),
            Segment::Code(_) => {
                let snippet = snippets.get(code_index).copied();
                let is_focused = snippet.is_some() && snippet.map(|s| s.id) == focused;
                bubble.render_code(&mut lines, &segment, snippet, is_focused);
                code_index += 1;
            }
        }
    }

    if message.text.is_empty() {
        bubble.push(&mut lines, vec![Span::raw(String::new())]);
    }

    bubble.render_footer(&mut lines);
    lines
}

struct Bubble {
    from_user: bool,
    accent: Style,
    text_width: usize,
}

impl Bubble {
    fn new(message: &Message, area_width: u16) -> Self {
        let bubble_width = (area_width as usize * BUBBLE_WIDTH_PERCENT as usize) / 100;
        let accent = if message.is_user() {
            USER_ACCENT
        } else {
            ASSISTANT_ACCENT
        };

        Self {
            from_user: message.is_user(),
            accent: Style::default().fg(accent),
            // Room for the gutter on either side.
            text_width: bubble_width.saturating_sub(4).max(1),
        }
    }

    fn alignment(&self) -> Alignment {
        if self.from_user {
            Alignment::Right
        } else {
            Alignment::Left
        }
    }

    /// Adds a content row with the bubble gutter on the outer side.
    fn push(&self, lines: &mut Vec<Line<'static>>, mut spans: Vec<Span<'static>>) {
        if self.from_user {
            spans.push(Span::styled(" │".to_string(), self.accent));
        } else {
            spans.insert(0, Span::styled("│ ".to_string(), self.accent));
        }
        lines.push(Line::from(spans).alignment(self.alignment()));
    }

    fn render_header(&self, lines: &mut Vec<Line<'static>>, message: &Message) {
        let timestamp = message.created_at.format("%H:%M").to_string();
        let avatar = Style::default()
            .fg(Color::White)
            .bg(self.accent.fg.unwrap_or(Color::Reset))
            .add_modifier(Modifier::BOLD);
        let dim = self.accent.add_modifier(Modifier::DIM);

        let spans = if self.from_user {
            vec![
                Span::styled(timestamp, dim),
                Span::styled("─┐ ".to_string(), self.accent),
                Span::styled(format!(" {} ", USER_AVATAR), avatar),
            ]
        } else {
            vec![
                Span::styled(format!("{} ", ASSISTANT_AVATAR), avatar),
                Span::styled(" ┌─".to_string(), self.accent),
                Span::styled(timestamp, dim),
            ]
        };
        lines.push(Line::from(spans).alignment(self.alignment()));
    }

    fn render_prose(&self, lines: &mut Vec<Line<'static>>, segment: &Segment) {
        for line in segment.lines() {
            if line.is_empty() {
                self.push(lines, vec![Span::raw(String::new())]);
                continue;
            }
            for wrapped in wrap(&line, self.text_width) {
                self.push(lines, vec![Span::raw(wrapped.into_owned())]);
            }
        }
    }

    fn render_code(
        &self,
        lines: &mut Vec<Line<'static>>,
        segment: &Segment,
        snippet: Option<&CodeSnippet>,
        focused: bool,
    ) {
        let code_style = Style::default().fg(CODE_FG).bg(CODE_BG);
        let gutter = Style::default().fg(Color::DarkGray).bg(CODE_BG);
        let width = self.text_width.saturating_sub(2).max(1);

        let mut code_lines = segment.lines();
        if code_lines.is_empty() {
            code_lines.push(String::new());
        }

        for line in code_lines {
            for chunk in break_by_width(&line, width) {
                let padding = width.saturating_sub(display_width(&chunk));
                self.push(
                    lines,
                    vec![
                        Span::styled("▎ ".to_string(), gutter),
                        Span::styled(format!("{}{}", chunk, " ".repeat(padding)), code_style),
                    ],
                );
            }
        }

        if let Some(snippet) = snippet {
            let active = snippet.feedback.is_active();
            let mut label_style = Style::default()
                .fg(Color::White)
                .bg(if active { COPIED_BG } else { COPY_BG })
                .add_modifier(Modifier::BOLD);
            if focused {
                label_style = label_style.add_modifier(Modifier::REVERSED);
            }
            self.push(
                lines,
                vec![Span::styled(
                    format!(" [{}] {} ", snippet.id + 1, snippet.feedback.label()),
                    label_style,
                )],
            );
        }
    }

    fn render_footer(&self, lines: &mut Vec<Line<'static>>) {
        let corner = if self.from_user { "─╯" } else { "╰─" };
        lines.push(Line::from(Span::styled(corner.to_string(), self.accent)).alignment(self.alignment()));
    }
}

fn display_width(s: &str) -> usize {
    s.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Hard-breaks a line into chunks no wider than `width` columns, keeping
/// whitespace as-is the way a preformatted block would.
fn break_by_width(line: &str, width: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for c in line.chars() {
        let w = c.width().unwrap_or(0);
        if current_width + w > width && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(c);
        current_width += w;
    }
    chunks.push(current);
    chunks
}
