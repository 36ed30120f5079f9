#![warn(missing_docs)]

//! Utterance queue for screen-reader announcements
//!
//! Callers enqueue [`Utterance`]s (or plain text) in response to UI events;
//! a [`QueueDriver`] drains the [`UtteranceQueue`] at a fixed interval and
//! hands one message per cycle to an [`AnnouncementSink`], so a burst of
//! events never floods assistive technology with overlapping speech.
//!
//! ```no_run
//! use std::sync::Arc;
//! use utterance_queue::{QueueDriver, TracingSink, Utterance, UtteranceQueue};
//!
//! # async fn run() -> utterance_queue::Result<()> {
//! let queue = UtteranceQueue::new(Arc::new(TracingSink)).into_shared();
//! let mut driver = QueueDriver::new(queue.clone());
//! driver.start()?;
//!
//! queue.lock().add_to_back("Simulation reset");
//! queue.lock().add_to_back(
//!     Utterance::builder().alert("Ball moved left").type_id("ball-moved").build()?,
//! );
//! # driver.stop().await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod queue;
pub mod sink;
pub mod utterance;

// Re-export public API
pub use config::{UtteranceQueueConfig, DEFAULT_INTERVAL_MS};
pub use driver::QueueDriver;
pub use error::{Result, UtteranceError};
pub use queue::{SharedUtteranceQueue, UtteranceQueue};
pub use sink::{AnnouncementSink, RecordingSink, TracingSink, WriterSink};
pub use utterance::{Announceable, Predicate, Utterance, UtteranceBuilder};
