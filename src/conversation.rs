// src/conversation.rs

use chrono::Local;
use crate::errors::{NexaError, NexaResult};
use crate::models::{Message, MessageId, Origin};

/// Append-only message store for a single conversation.
///
/// Messages are never removed or reordered. The only permitted mutation of
/// existing content is rewriting the text of an assistant message, which is
/// how the typing reveal fills a reply in. Every successful change bumps
/// [`Conversation::revision`], which the UI uses to know when to re-render.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    next_id: u64,
    revision: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message to the end of the conversation and returns its id.
    pub fn append(&mut self, origin: Origin, text: impl Into<String>) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(Message {
            id,
            origin,
            text: text.into(),
            created_at: Local::now(),
        });
        self.revision += 1;
        id
    }

    /// Replaces the text of the last message, which must be an assistant message.
    pub fn update_last(&mut self, text: impl Into<String>) -> NexaResult<()> {
        let last = self
            .messages
            .last_mut()
            .ok_or_else(|| NexaError::store_error("cannot update an empty conversation"))?;

        if last.origin != Origin::Assistant {
            return Err(NexaError::store_error(format!(
                "last message {} is not an assistant message",
                last.id
            )));
        }

        last.text = text.into();
        self.revision += 1;
        Ok(())
    }

    /// Replaces the text of the assistant message with the given id.
    pub fn update(&mut self, id: MessageId, text: impl Into<String>) -> NexaResult<()> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| NexaError::store_error(format!("no message with id {}", id)))?;

        if message.origin != Origin::Assistant {
            return Err(NexaError::store_error(format!(
                "message {} is not an assistant message",
                id
            )));
        }

        let text = text.into();
        if message.text != text {
            message.text = text;
            self.revision += 1;
        }
        Ok(())
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order_and_assigns_ids() {
        let mut conversation = Conversation::new();
        let first = conversation.append(Origin::User, "hi");
        let second = conversation.append(Origin::Assistant, "");

        assert!(first < second);
        let origins: Vec<_> = conversation.messages().iter().map(|m| m.origin).collect();
        assert_eq!(origins, vec![Origin::User, Origin::Assistant]);
        assert_eq!(conversation.revision(), 2);
    }

    #[test]
    fn test_update_last_rewrites_assistant_message() {
        let mut conversation = Conversation::new();
        conversation.append(Origin::User, "hi");
        conversation.append(Origin::Assistant, "");

        conversation.update_last("hel").unwrap();
        assert_eq!(conversation.last().unwrap().text, "hel");
    }

    #[test]
    fn test_update_last_refuses_user_message() {
        let mut conversation = Conversation::new();
        conversation.append(Origin::User, "keep me");
        let revision = conversation.revision();

        assert!(conversation.update_last("garbage").is_err());
        assert_eq!(conversation.last().unwrap().text, "keep me");
        assert_eq!(conversation.revision(), revision);
    }

    #[test]
    fn test_update_last_on_empty_conversation_fails() {
        let mut conversation = Conversation::new();
        assert!(matches!(
            conversation.update_last("x"),
            Err(NexaError::Store(_))
        ));
    }

    #[test]
    fn test_update_by_id_targets_the_right_message() {
        let mut conversation = Conversation::new();
        let older = conversation.append(Origin::Assistant, "");
        conversation.append(Origin::User, "next question");
        conversation.append(Origin::Assistant, "");

        conversation.update(older, "first answer").unwrap();

        assert_eq!(conversation.get(older).unwrap().text, "first answer");
        assert_eq!(conversation.last().unwrap().text, "");
    }

    #[test]
    fn test_update_by_id_rejects_user_and_unknown_ids() {
        let mut conversation = Conversation::new();
        let user = conversation.append(Origin::User, "hi");

        assert!(conversation.update(user, "x").is_err());
        assert!(conversation.update(MessageId(42), "x").is_err());
        assert_eq!(conversation.get(user).unwrap().text, "hi");
    }

    #[test]
    fn test_identical_update_does_not_bump_revision() {
        let mut conversation = Conversation::new();
        let id = conversation.append(Origin::Assistant, "same");
        let revision = conversation.revision();

        conversation.update(id, "same").unwrap();
        assert_eq!(conversation.revision(), revision);
    }
}
