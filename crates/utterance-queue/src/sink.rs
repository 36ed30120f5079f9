//! Announcement sinks
//!
//! A sink is the outbound collaborator the queue hands drained text to, for
//! example a screen-reader live region. Delivery is fire-and-forget: sinks have
//! no error channel back into the queue.

use std::io::Write;

use parking_lot::Mutex;

/// Receives announcements drained from the queue
pub trait AnnouncementSink: Send + Sync {
    /// Announce a single piece of text
    fn announce(&self, text: &str);
}

impl<F> AnnouncementSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn announce(&self, text: &str) {
        self(text)
    }
}

/// Sink that keeps every announcement in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    history: Mutex<Vec<String>>,
}

impl RecordingSink {
    /// Create an empty recording sink
    pub fn new() -> Self {
        Self::default()
    }

    /// All announcements received so far, oldest first
    pub fn announcements(&self) -> Vec<String> {
        self.history.lock().clone()
    }

    /// The most recent announcement
    pub fn last_announcement(&self) -> Option<String> {
        self.history.lock().last().cloned()
    }

    /// Number of announcements received
    pub fn len(&self) -> usize {
        self.history.lock().len()
    }

    /// Whether nothing has been announced yet
    pub fn is_empty(&self) -> bool {
        self.history.lock().is_empty()
    }

    /// Clear announcement history
    pub fn clear_history(&self) {
        self.history.lock().clear();
    }
}

impl AnnouncementSink for RecordingSink {
    fn announce(&self, text: &str) {
        self.history.lock().push(text.to_string());
    }
}

/// Sink that emits each announcement as a tracing event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AnnouncementSink for TracingSink {
    fn announce(&self, text: &str) {
        tracing::info!(target: "utterance::announce", text, "announcement");
    }
}

/// Sink that writes one line per announcement
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the wrapped writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> AnnouncementSink for WriterSink<W> {
    fn announce(&self, text: &str) {
        let mut writer = self.writer.lock();
        if let Err(e) = writeln!(writer, "{}", text).and_then(|_| writer.flush()) {
            tracing::warn!("Failed to write announcement: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.announce("one");
        sink.announce("two");

        assert_eq!(sink.announcements(), vec!["one", "two"]);
        assert_eq!(sink.last_announcement().as_deref(), Some("two"));
        assert_eq!(sink.len(), 2);

        sink.clear_history();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_writer_sink_writes_lines() {
        let sink = WriterSink::new(Vec::new());
        sink.announce("Sim reset");
        sink.announce("Ball released");

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(output, "Sim reset\nBall released\n");
    }

    #[test]
    fn test_closure_sink() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&seen);
        let sink = move |text: &str| captured.lock().push(text.len());

        sink.announce("abc");
        assert_eq!(*seen.lock(), vec![3]);
    }

    #[test]
    fn test_sinks_are_object_safe() {
        let sinks: Vec<Arc<dyn AnnouncementSink>> =
            vec![Arc::new(RecordingSink::new()), Arc::new(TracingSink)];
        for sink in &sinks {
            sink.announce("hello");
        }
    }
}
