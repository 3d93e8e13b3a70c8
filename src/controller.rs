// src/controller.rs

use crate::app::AppEvent;
use crate::constants::SERVER_ERROR_TEXT;
use crate::conversation::Conversation;
use crate::errors::NexaResult;
use crate::models::{MessageId, Origin};
use crate::reveal::{reveal, RevealHandle};
use log::{debug, warn};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No request in flight.
    Idle,
    /// A chat request has been issued and not settled yet.
    Sending,
}

/// Drives one conversation through the send/receive cycle.
///
/// The controller never does I/O itself. [`ChatController::submit`] hands
/// back the text to send; the caller performs the request and reports the
/// outcome through [`ChatController::on_reply`]. Reveal frames come back as
/// [`AppEvent::RevealFrame`] on the event channel and are applied with
/// [`ChatController::on_reveal_frame`].
pub struct ChatController {
    conversation: Conversation,
    input: String,
    phase: Phase,
    reveal: Option<RevealHandle>,
    reveal_tick: Duration,
    events: UnboundedSender<AppEvent>,
}

impl ChatController {
    pub fn new(reveal_tick: Duration, events: UnboundedSender<AppEvent>) -> Self {
        Self {
            conversation: Conversation::new(),
            input: String::new(),
            phase: Phase::Idle,
            reveal: None,
            reveal_tick,
            events,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase == Phase::Sending
    }

    /// Whether the send control is enabled.
    pub fn can_send(&self) -> bool {
        !self.is_busy() && !self.input.trim().is_empty()
    }

    /// Whether a reveal animation is still writing into the conversation.
    pub fn is_revealing(&self) -> bool {
        self.reveal.as_ref().map_or(false, |h| !h.is_finished())
    }

    pub fn push_char(&mut self, c: char) {
        if !self.is_busy() {
            self.input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if !self.is_busy() {
            self.input.pop();
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        if !self.is_busy() {
            self.input = text.into();
        }
    }

    /// Moves the input into the conversation and marks the controller busy.
    ///
    /// Returns the text that must be sent, or `None` when the input is blank
    /// or a request is already in flight.
    pub fn submit(&mut self) -> Option<String> {
        if !self.can_send() {
            debug!(
                "Submit ignored (busy: {}, blank input: {})",
                self.is_busy(),
                self.input.trim().is_empty()
            );
            return None;
        }

        let text = std::mem::take(&mut self.input);
        let id = self.conversation.append(Origin::User, text.clone());
        self.phase = Phase::Sending;
        debug!("Idle -> Sending (user message {})", id);
        Some(text)
    }

    /// Settles the in-flight request.
    pub fn on_reply(&mut self, result: NexaResult<String>) {
        self.phase = Phase::Idle;

        match result {
            Ok(reply) => {
                self.finish_reveal();
                let id = self.conversation.append(Origin::Assistant, "");
                debug!("Sending -> Idle, revealing {} chars into {}", reply.chars().count(), id);

                let events = self.events.clone();
                self.reveal = Some(reveal(id, reply, self.reveal_tick, move |id, text| {
                    events.send(AppEvent::RevealFrame { id, text }).is_ok()
                }));
            }
            Err(e) => {
                warn!("Chat request failed: {}", e);
                self.conversation.append(Origin::Assistant, SERVER_ERROR_TEXT);
                debug!("Sending -> Idle after failure");
            }
        }
    }

    /// Applies one reveal frame. Frames from a superseded reveal are dropped.
    pub fn on_reveal_frame(&mut self, id: MessageId, text: String) {
        let current = self.reveal.as_ref().map(RevealHandle::id);
        if current != Some(id) {
            debug!("Dropping stale reveal frame for {}", id);
            return;
        }

        if let Err(e) = self.conversation.update(id, text) {
            warn!("Reveal frame rejected: {}", e);
        }
    }

    /// Stops the running reveal, if any, and writes its full text at once.
    fn finish_reveal(&mut self) {
        let Some(handle) = self.reveal.take() else {
            return;
        };

        let (id, full) = handle.finish();
        if let Err(e) = self.conversation.update(id, full) {
            warn!("Could not complete reveal for {}: {}", id, e);
        }
    }
}
