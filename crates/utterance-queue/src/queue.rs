//! The announcement queue
//!
//! [`UtteranceQueue`] serializes announcements so that a burst of UI events
//! reaches the sink one message per drain cycle instead of all at once.
//! Two independent flags gate it:
//!
//! - `enabled == false` freezes the queue: nothing is enqueued and draining
//!   does nothing.
//! - `muted == true` keeps draining at the configured rate but discards each
//!   entry instead of announcing it.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::config::UtteranceQueueConfig;
use crate::error::{Result, UtteranceError};
use crate::sink::AnnouncementSink;
use crate::utterance::{Announceable, Utterance};

/// Queue handle shared between callers and the drain task
pub type SharedUtteranceQueue = Arc<Mutex<UtteranceQueue>>;

/// FIFO queue of pending utterances
pub struct UtteranceQueue {
    queue: VecDeque<Arc<Utterance>>,
    interval: Duration,
    muted: bool,
    enabled: bool,
    sink: Arc<dyn AnnouncementSink>,
}

impl UtteranceQueue {
    /// Create a queue with default settings
    pub fn new(sink: Arc<dyn AnnouncementSink>) -> Self {
        Self {
            queue: VecDeque::new(),
            interval: UtteranceQueueConfig::default().interval(),
            muted: false,
            enabled: true,
            sink,
        }
    }

    /// Create a queue from validated configuration
    pub fn with_config(
        config: &UtteranceQueueConfig,
        sink: Arc<dyn AnnouncementSink>,
    ) -> Result<Self> {
        config.validate()?;

        let mut queue = Self::new(sink);
        queue.interval = config.interval();
        queue.muted = config.muted;
        queue.enabled = config.enabled;
        Ok(queue)
    }

    /// Wrap the queue for sharing with a [`QueueDriver`](crate::QueueDriver)
    pub fn into_shared(self) -> SharedUtteranceQueue {
        Arc::new(Mutex::new(self))
    }

    /// Append to the back of the queue
    ///
    /// If the utterance has a type id, every pending entry with the same type
    /// id is evicted first, so at most one entry per type is ever pending.
    pub fn add_to_back(&mut self, item: impl Into<Announceable>) {
        if !self.enabled {
            return;
        }

        let utterance = item.into().into_utterance();

        if let Some(type_id) = utterance.type_id() {
            let before = self.queue.len();
            self.queue.retain(|pending| pending.type_id() != Some(type_id));
            let evicted = before - self.queue.len();
            if evicted > 0 {
                tracing::debug!(type_id, evicted, "Evicted stale utterances");
            }
        }

        tracing::debug!(text = utterance.peek_alert(), "Queued utterance at back");
        self.queue.push_back(utterance);
    }

    /// Insert at the head of the queue
    ///
    /// Unlike [`add_to_back`](Self::add_to_back) this does not evict entries
    /// sharing the type id, so a front insertion can leave two pending entries
    /// of one type. Repeated front insertions announce in reverse call order.
    pub fn add_to_front(&mut self, item: impl Into<Announceable>) {
        if !self.enabled {
            return;
        }

        let utterance = item.into().into_utterance();
        tracing::debug!(text = utterance.peek_alert(), "Queued utterance at front");
        self.queue.push_front(utterance);
    }

    /// Pop the head and resolve the text to announce, without announcing it
    ///
    /// Returns `None` when disabled, empty, muted, or when the head's
    /// predicate is false. In the last two cases the head is still consumed.
    pub fn dequeue_announcement(&mut self) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let utterance = self.queue.pop_front()?;
        tracing::trace!(remaining = self.queue.len(), "Drained utterance");

        if self.muted {
            tracing::debug!(text = utterance.peek_alert(), "Dropped utterance while muted");
            return None;
        }

        if !utterance.is_relevant() {
            tracing::debug!(text = utterance.peek_alert(), "Dropped utterance, predicate false");
            return None;
        }

        Some(utterance.next_alert())
    }

    /// Run one drain cycle and hand the result to the sink
    ///
    /// Returns the announced text, if any.
    pub fn next(&mut self) -> Option<String> {
        let text = self.dequeue_announcement()?;
        self.sink.announce(&text);
        Some(text)
    }

    /// Discard every pending entry
    pub fn clear(&mut self) {
        tracing::debug!(discarded = self.queue.len(), "Cleared utterance queue");
        self.queue.clear();
    }

    /// Remove every pending entry that points at `utterance`
    pub fn remove(&mut self, utterance: &Arc<Utterance>) -> usize {
        let before = self.queue.len();
        self.queue.retain(|pending| !Arc::ptr_eq(pending, utterance));
        before - self.queue.len()
    }

    /// Number of pending entries
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Whether an entry with this type id is pending
    pub fn contains_type(&self, type_id: &str) -> bool {
        self.queue.iter().any(|pending| pending.type_id() == Some(type_id))
    }

    /// Text each pending entry would announce next, head first
    pub fn pending_texts(&self) -> Vec<String> {
        self.queue
            .iter()
            .map(|pending| pending.peek_alert().to_string())
            .collect()
    }

    /// Mute or unmute announcements
    pub fn set_muted(&mut self, muted: bool) {
        if self.muted != muted {
            tracing::debug!(muted, "Utterance queue mute changed");
        }
        self.muted = muted;
    }

    /// Whether drained entries are discarded
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Enable or disable the queue
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            tracing::debug!(enabled, "Utterance queue enabled changed");
        }
        self.enabled = enabled;
    }

    /// Whether the queue accepts and drains entries
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Change the drain period; applies from the next cycle
    ///
    /// # Errors
    ///
    /// Returns [`UtteranceError::InvalidInterval`] for a zero duration.
    pub fn set_interval(&mut self, interval: Duration) -> Result<()> {
        if interval.is_zero() {
            return Err(UtteranceError::InvalidInterval(interval));
        }
        self.interval = interval;
        Ok(())
    }

    /// Current drain period
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The sink announcements are delivered to
    pub fn sink(&self) -> Arc<dyn AnnouncementSink> {
        Arc::clone(&self.sink)
    }
}

impl fmt::Debug for UtteranceQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UtteranceQueue")
            .field("queue", &self.queue)
            .field("interval", &self.interval)
            .field("muted", &self.muted)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}
