use crate::constants::{ASSISTANT_AVATAR, THINKING_TEXT};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

const DOT_FRAMES: [&str; 4] = ["●∙∙", "∙●∙", "∙∙●", "∙●∙"];
const DOT_COLOR: Color = Color::Rgb(5, 150, 105);

/// "AI is thinking..." row shown under the conversation while a request is
/// in flight.
#[derive(Debug, Default)]
pub struct StatusIndicator {
    thinking: bool,
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_thinking(&mut self, thinking: bool) {
        if thinking && !self.thinking {
            self.spinner_idx = 0;
        }
        self.thinking = thinking;
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    pub fn update_spinner(&mut self) {
        if self.thinking {
            self.spinner_idx = self.spinner_idx.wrapping_add(1);
        }
    }

    pub fn line(&self) -> Option<Line<'static>> {
        if !self.thinking {
            return None;
        }

        let dots = DOT_FRAMES[self.spinner_idx % DOT_FRAMES.len()];
        Some(
            Line::from(vec![
                Span::styled(
                    format!("{} ", ASSISTANT_AVATAR),
                    Style::default().add_modifier(Modifier::DIM),
                ),
                Span::styled(format!(" {} ", dots), Style::default().fg(DOT_COLOR)),
                Span::styled(THINKING_TEXT, Style::default().fg(Color::DarkGray)),
            ])
            .alignment(Alignment::Left),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_hidden_when_idle() {
        let indicator = StatusIndicator::new();
        assert!(indicator.line().is_none());
    }

    #[test]
    fn test_dots_advance_while_thinking() {
        let mut indicator = StatusIndicator::new();
        indicator.set_thinking(true);
        let first = text_of(&indicator.line().unwrap());
        indicator.update_spinner();
        let second = text_of(&indicator.line().unwrap());

        assert!(first.ends_with(THINKING_TEXT));
        assert_ne!(first, second);
    }
}
