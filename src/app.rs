use crate::api::ChatClient;
use crate::code_snippet::{Clipboard, SnippetManager, SystemClipboard};
use crate::config::Config;
use crate::controller::ChatController;
use crate::errors::NexaResult;
use crate::models::MessageId;
use crate::status_indicator::StatusIndicator;
use crossterm::event::Event;
use log::{debug, warn};
use tokio::sync::mpsc::UnboundedSender;

/// Everything the UI loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    Input(Event),
    Tick,
    Reply(NexaResult<String>),
    RevealFrame { id: MessageId, text: String },
}

pub struct App {
    pub controller: ChatController,
    pub snippets: SnippetManager,
    pub status_indicator: StatusIndicator,
    /// Lines scrolled up from the newest message.
    pub scroll_from_bottom: u16,
    pub notice: Option<String>,
    pub should_quit: bool,
    client: ChatClient,
    events: UnboundedSender<AppEvent>,
    clipboard: Option<Box<dyn Clipboard>>,
    seen_revision: u64,
    seen_messages: usize,
}

impl App {
    pub fn new(config: &Config, client: ChatClient, events: UnboundedSender<AppEvent>) -> Self {
        Self {
            controller: ChatController::new(config.reveal_tick(), events.clone()),
            snippets: SnippetManager::new(config.copy_feedback()),
            status_indicator: StatusIndicator::new(),
            scroll_from_bottom: 0,
            notice: None,
            should_quit: false,
            client,
            events,
            clipboard: None,
            seen_revision: 0,
            seen_messages: 0,
        }
    }

    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(Event::Key(key)) => crate::key_handlers::handle_chat_input(key, self),
            AppEvent::Input(_) => {}
            AppEvent::Tick => self.status_indicator.update_spinner(),
            AppEvent::Reply(result) => {
                self.controller.on_reply(result);
                self.status_indicator.set_thinking(false);
            }
            AppEvent::RevealFrame { id, text } => self.controller.on_reveal_frame(id, text),
        }
        self.after_change();
    }

    /// Submits the input and issues the chat request in the background.
    pub fn send(&mut self) {
        let Some(text) = self.controller.submit() else {
            return;
        };

        self.notice = None;
        self.status_indicator.set_thinking(true);

        let client = self.client.clone();
        let events = self.events.clone();
        debug!("Sending {} chars to {}", text.chars().count(), client.endpoint());
        tokio::spawn(async move {
            let result = client.send(&text).await;
            let _ = events.send(AppEvent::Reply(result));
        });
        self.after_change();
    }

    pub fn copy_focused(&mut self) {
        self.with_clipboard_do(|snippets, clipboard| snippets.copy_focused(clipboard));
    }

    pub fn copy_numbered(&mut self, num: usize) {
        self.with_clipboard_do(|snippets, clipboard| snippets.handle_alt_number(num, clipboard));
    }

    fn with_clipboard_do<F>(&mut self, action: F)
    where
        F: FnOnce(&mut SnippetManager, &mut dyn Clipboard) -> NexaResult<()>,
    {
        if self.clipboard.is_none() {
            match SystemClipboard::new() {
                Ok(clipboard) => self.clipboard = Some(Box::new(clipboard)),
                Err(e) => {
                    warn!("{}", e);
                    self.notice = Some(e.to_string());
                    return;
                }
            }
        }

        if let Some(clipboard) = self.clipboard.as_deref_mut() {
            if let Err(e) = action(&mut self.snippets, clipboard) {
                self.notice = Some(e.to_string());
            }
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(lines);
    }

    /// Keeps snippets in step with the conversation. Jumps back to the
    /// newest message only when one is appended; reveal frames leave the
    /// scroll position alone.
    fn after_change(&mut self) {
        let conversation = self.controller.conversation();
        if conversation.revision() == self.seen_revision {
            return;
        }
        self.seen_revision = conversation.revision();

        if conversation.len() != self.seen_messages {
            self.seen_messages = conversation.len();
            self.scroll_from_bottom = 0;
        }
        self.snippets.sync(conversation);
    }
}
