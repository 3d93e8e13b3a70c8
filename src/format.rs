// src/format.rs

use crate::constants::{CODE_FENCE, TAB_WIDTH};

/// A piece of message text, either prose or a fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Prose(String),
    Code(String),
}

impl Segment {
    /// Display lines of the segment. Each `\n` in prose is a line break.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Segment::Prose(text) => text.split('\n').map(sanitize).collect(),
            Segment::Code(code) => code.lines().map(sanitize).collect(),
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, Segment::Code(_))
    }
}

/// Splits message text on triple-backtick fences.
///
/// Pieces at even positions are prose, pieces at odd positions are code
/// (trimmed). Empty prose pieces are dropped; empty code blocks are kept.
pub fn segments(text: &str) -> Vec<Segment> {
    text.split(CODE_FENCE)
        .enumerate()
        .filter_map(|(index, part)| {
            if index % 2 == 0 {
                (!part.is_empty()).then(|| Segment::Prose(part.to_string()))
            } else {
                Some(Segment::Code(part.trim().to_string()))
            }
        })
        .collect()
}

/// The code blocks of a message, in order.
pub fn code_blocks(text: &str) -> Vec<String> {
    segments(text)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Code(code) => Some(code),
            Segment::Prose(_) => None,
        })
        .collect()
}

/// Makes text safe to put on the terminal as plain data.
///
/// Tabs become spaces and every other control character (ESC included)
/// is replaced with U+FFFD so message content can never drive the terminal.
pub fn sanitize(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '\t' => out.push_str(&" ".repeat(TAB_WIDTH)),
            '\r' => {}
            c if c.is_control() => out.push('\u{FFFD}'),
            c => out.push(c),
        }
    }
    out
}
