use crate::constants::{COPIED_LABEL, COPY_LABEL};
use crate::conversation::Conversation;
use crate::errors::{NexaError, NexaResult};
use crate::format::code_blocks;
use crate::models::MessageId;
use copypasta::{ClipboardContext, ClipboardProvider};
use log::{info, warn};
use std::time::Duration;
use tokio::time::Instant;

/// Somewhere a code block can be copied to.
pub trait Clipboard {
    fn set_contents(&mut self, contents: String) -> NexaResult<()>;
}

/// The system clipboard.
pub struct SystemClipboard {
    ctx: ClipboardContext,
}

impl SystemClipboard {
    pub fn new() -> NexaResult<Self> {
        let ctx = ClipboardContext::new()
            .map_err(|e| NexaError::clipboard_error(format!("Failed to open clipboard: {}", e)))?;
        Ok(Self { ctx })
    }
}

impl Clipboard for SystemClipboard {
    fn set_contents(&mut self, contents: String) -> NexaResult<()> {
        self.ctx
            .set_contents(contents)
            .map_err(|e| NexaError::clipboard_error(e.to_string()))
    }
}

/// Transient "copied" state shown on a code block after a copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyFeedback {
    until: Option<Instant>,
}

impl CopyFeedback {
    /// Turns the feedback on. A copy while it is already on keeps the
    /// original deadline.
    pub fn trigger(&mut self, duration: Duration) {
        if !self.is_active() {
            self.until = Some(Instant::now() + duration);
        }
    }

    pub fn is_active(&self) -> bool {
        self.until.map_or(false, |until| Instant::now() < until)
    }

    pub fn label(&self) -> &'static str {
        if self.is_active() {
            COPIED_LABEL
        } else {
            COPY_LABEL
        }
    }
}

#[derive(Debug, Clone)]
pub struct CodeSnippet {
    pub id: usize,
    pub message_id: MessageId,
    pub content: String,
    pub feedback: CopyFeedback,
}

impl CodeSnippet {
    pub fn new(id: usize, message_id: MessageId, content: String) -> Self {
        Self {
            id,
            message_id,
            content,
            feedback: CopyFeedback::default(),
        }
    }
}

/// Every code block currently on screen, in conversation order.
#[derive(Debug, Clone)]
pub struct SnippetManager {
    pub snippets: Vec<CodeSnippet>,
    pub focused_snippet: Option<usize>,
    feedback_duration: Duration,
    synced_revision: Option<u64>,
}

impl SnippetManager {
    pub fn new(feedback_duration: Duration) -> Self {
        Self {
            snippets: Vec::new(),
            focused_snippet: None,
            feedback_duration,
            synced_revision: None,
        }
    }

    /// Rebuilds the snippet list from the conversation if it has changed.
    ///
    /// Feedback and focus survive for blocks that keep their position and
    /// content, so a reveal rewriting a later message doesn't reset them.
    pub fn sync(&mut self, conversation: &Conversation) {
        if self.synced_revision == Some(conversation.revision()) {
            return;
        }

        let mut rebuilt = Vec::new();
        for message in conversation.messages() {
            for content in code_blocks(&message.text) {
                let id = rebuilt.len();
                let mut snippet = CodeSnippet::new(id, message.id, content);
                if let Some(old) = self.snippets.get(id) {
                    if old.message_id == snippet.message_id && old.content == snippet.content {
                        snippet.feedback = old.feedback;
                    }
                }
                rebuilt.push(snippet);
            }
        }

        self.snippets = rebuilt;
        self.focused_snippet = self
            .focused_snippet
            .filter(|idx| *idx < self.snippets.len());
        self.synced_revision = Some(conversation.revision());
    }

    /// Snippets belonging to one message, in order.
    pub fn for_message(&self, message_id: MessageId) -> impl Iterator<Item = &CodeSnippet> {
        self.snippets
            .iter()
            .filter(move |s| s.message_id == message_id)
    }

    pub fn get_focused_snippet(&self) -> Option<&CodeSnippet> {
        self.focused_snippet.and_then(|idx| self.snippets.get(idx))
    }

    /// Copies a block to the clipboard and turns on its "copied" feedback.
    pub fn copy(&mut self, index: usize, clipboard: &mut dyn Clipboard) -> NexaResult<()> {
        let snippet = self
            .snippets
            .get_mut(index)
            .ok_or_else(|| NexaError::clipboard_error(format!("no code block {}", index + 1)))?;

        match clipboard.set_contents(snippet.content.clone()) {
            Ok(()) => {
                snippet.feedback.trigger(self.feedback_duration);
                info!("Copied code block {} ({} bytes)", index + 1, snippet.content.len());
                Ok(())
            }
            Err(e) => {
                warn!("Copy of code block {} failed: {}", index + 1, e);
                Err(e)
            }
        }
    }

    pub fn copy_focused(&mut self, clipboard: &mut dyn Clipboard) -> NexaResult<()> {
        match self.focused_snippet {
            Some(idx) => self.copy(idx, clipboard),
            None => Err(NexaError::clipboard_error("no code block is focused")),
        }
    }

    /// Copies block `num` (1-based), as typed with Alt+digit.
    pub fn handle_alt_number(&mut self, num: usize, clipboard: &mut dyn Clipboard) -> NexaResult<()> {
        if num > 0 && num <= self.snippets.len() {
            self.focused_snippet = Some(num - 1);
            self.copy(num - 1, clipboard)
        } else {
            Err(NexaError::clipboard_error(format!("no code block {}", num)))
        }
    }

    pub fn focus_next(&mut self) {
        match self.focused_snippet {
            Some(current) if current + 1 < self.snippets.len() => {
                self.focused_snippet = Some(current + 1);
            }
            None if !self.snippets.is_empty() => {
                self.focused_snippet = Some(0);
            }
            _ => {}
        }
    }

    pub fn focus_previous(&mut self) {
        if let Some(current) = self.focused_snippet {
            if current > 0 {
                self.focused_snippet = Some(current - 1);
            }
        }
    }
}
