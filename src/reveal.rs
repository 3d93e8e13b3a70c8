// src/reveal.rs

use crate::models::MessageId;
use log::debug;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// Lazy sequence of growing prefixes of a string.
///
/// Yields the empty prefix first and the full string last, one extra
/// character per step, cut on `char` boundaries.
#[derive(Debug, Clone)]
pub struct Reveal {
    full: String,
    next_end: Option<usize>,
}

impl Reveal {
    pub fn new(full: impl Into<String>) -> Self {
        Self {
            full: full.into(),
            next_end: Some(0),
        }
    }

    /// Number of prefixes the sequence produces in total.
    pub fn frame_count(&self) -> usize {
        self.full.chars().count() + 1
    }
}

impl Iterator for Reveal {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let end = self.next_end?;
        let prefix = self.full[..end].to_string();

        self.next_end = self.full[end..]
            .chars()
            .next()
            .map(|c| end + c.len_utf8());

        Some(prefix)
    }
}

/// A running reveal animation bound to the message it fills in.
///
/// Dropping the handle stops the timer.
#[derive(Debug)]
pub struct RevealHandle {
    id: MessageId,
    full: String,
    task: JoinHandle<()>,
}

impl RevealHandle {
    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stops the timer, leaving the message at whatever prefix it last got.
    pub fn cancel(self) {
        self.task.abort();
    }

    /// Stops the timer and hands back the target so the caller can write the
    /// full text in one step.
    pub fn finish(mut self) -> (MessageId, String) {
        self.task.abort();
        (self.id, std::mem::take(&mut self.full))
    }
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Feeds the prefixes of `full` to `sink`, one per `tick`, on a tokio task.
///
/// The first prefix (empty) is delivered one tick after the call and the
/// full string on the last tick; the task then ends. The sink returning
/// `false` stops the animation early.
pub fn reveal<F>(id: MessageId, full: impl Into<String>, tick: Duration, mut sink: F) -> RevealHandle
where
    F: FnMut(MessageId, String) -> bool + Send + 'static,
{
    let full = full.into();
    let frames = Reveal::new(full.clone());
    let frame_count = frames.frame_count();

    let task = tokio::spawn(async move {
        let mut interval = time::interval(tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Tokio's first tick is immediate.
        interval.tick().await;

        for prefix in frames {
            interval.tick().await;
            if !sink(id, prefix) {
                debug!("Reveal for message {} stopped: sink closed", id);
                return;
            }
        }
        debug!("Reveal for message {} done after {} frames", id, frame_count);
    });

    RevealHandle { id, full, task }
}
