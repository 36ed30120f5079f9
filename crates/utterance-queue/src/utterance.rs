//! Utterances: the text values handed to the announcement queue
//!
//! An [`Utterance`] wraps one or more alert strings. Each time it is announced
//! the next string in the sequence is emitted; once the sequence is exhausted
//! the last string repeats, or the sequence wraps back to the start when
//! `loop_alerts` is set.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::{Result, UtteranceError};

/// Gate consulted at drain time; returning `false` drops the utterance.
pub type Predicate = Arc<dyn Fn() -> bool + Send + Sync>;

/// A value object describing something to announce
pub struct Utterance {
    alerts: Vec<String>,
    type_id: Option<String>,
    loop_alerts: bool,
    predicate: Predicate,
    cursor: AtomicUsize,
}

impl Utterance {
    /// Create a single-string, non-looping utterance with no type id
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            alerts: vec![text.into()],
            type_id: None,
            loop_alerts: false,
            predicate: always_true(),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Start building an utterance
    pub fn builder() -> UtteranceBuilder {
        UtteranceBuilder::default()
    }

    /// The alert strings, in announcement order
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// The grouping key used for de-duplication, if any
    pub fn type_id(&self) -> Option<&str> {
        self.type_id.as_deref()
    }

    /// Whether the alert sequence wraps after the last string
    pub fn loop_alerts(&self) -> bool {
        self.loop_alerts
    }

    /// Position of the string the next announcement will emit
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }

    /// Evaluate the predicate
    pub fn is_relevant(&self) -> bool {
        (self.predicate)()
    }

    /// The string the next announcement would emit, without advancing
    pub fn peek_alert(&self) -> &str {
        &self.alerts[self.cursor().min(self.alerts.len() - 1)]
    }

    /// Return the current string and advance the cursor
    pub fn next_alert(&self) -> String {
        let len = self.alerts.len();
        let loop_alerts = self.loop_alerts;
        // fetch_update only fails when the closure returns None
        let previous = self
            .cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(if loop_alerts {
                    (current + 1) % len
                } else {
                    (current + 1).min(len - 1)
                })
            })
            .unwrap_or_else(|current| current);
        self.alerts[previous.min(len - 1)].clone()
    }

    /// Return the cursor to the first string
    pub fn reset(&self) {
        self.cursor.store(0, Ordering::Release);
    }
}

impl fmt::Debug for Utterance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Utterance")
            .field("alerts", &self.alerts)
            .field("type_id", &self.type_id)
            .field("loop_alerts", &self.loop_alerts)
            .field("cursor", &self.cursor())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Utterance`]
#[derive(Default)]
pub struct UtteranceBuilder {
    alerts: Vec<String>,
    type_id: Option<String>,
    loop_alerts: bool,
    predicate: Option<Predicate>,
}

impl UtteranceBuilder {
    /// Append one alert string
    pub fn alert(mut self, text: impl Into<String>) -> Self {
        self.alerts.push(text.into());
        self
    }

    /// Append a sequence of alert strings
    pub fn alerts<I, S>(mut self, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alerts.extend(texts.into_iter().map(Into::into));
        self
    }

    /// Set the grouping key
    pub fn type_id(mut self, type_id: impl Into<String>) -> Self {
        self.type_id = Some(type_id.into());
        self
    }

    /// Wrap back to the first alert after the last one
    pub fn loop_alerts(mut self, loop_alerts: bool) -> Self {
        self.loop_alerts = loop_alerts;
        self
    }

    /// Set the drain-time gate
    pub fn predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(predicate));
        self
    }

    /// Build the utterance
    ///
    /// # Errors
    ///
    /// Returns [`UtteranceError::EmptyAlert`] if no alert text was supplied.
    pub fn build(self) -> Result<Utterance> {
        if self.alerts.is_empty() {
            return Err(UtteranceError::EmptyAlert);
        }

        Ok(Utterance {
            alerts: self.alerts,
            type_id: self.type_id,
            loop_alerts: self.loop_alerts,
            predicate: self.predicate.unwrap_or_else(always_true),
            cursor: AtomicUsize::new(0),
        })
    }
}

fn always_true() -> Predicate {
    Arc::new(|| true)
}

/// Anything the queue accepts: bare text or a shared utterance
#[derive(Debug, Clone)]
pub enum Announceable {
    /// Plain text, wrapped as a single-string non-looping utterance
    Text(String),
    /// A caller-owned utterance whose cursor persists across enqueues
    Utterance(Arc<Utterance>),
}

impl Announceable {
    /// Resolve to the shared utterance the queue stores
    pub fn into_utterance(self) -> Arc<Utterance> {
        match self {
            Announceable::Text(text) => Arc::new(Utterance::new(text)),
            Announceable::Utterance(utterance) => utterance,
        }
    }
}

impl From<&str> for Announceable {
    fn from(text: &str) -> Self {
        Announceable::Text(text.to_string())
    }
}

impl From<String> for Announceable {
    fn from(text: String) -> Self {
        Announceable::Text(text)
    }
}

impl From<Utterance> for Announceable {
    fn from(utterance: Utterance) -> Self {
        Announceable::Utterance(Arc::new(utterance))
    }
}

impl From<Arc<Utterance>> for Announceable {
    fn from(utterance: Arc<Utterance>) -> Self {
        Announceable::Utterance(utterance)
    }
}

impl From<&Arc<Utterance>> for Announceable {
    fn from(utterance: &Arc<Utterance>) -> Self {
        Announceable::Utterance(Arc::clone(utterance))
    }
}
