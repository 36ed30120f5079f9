//! Timer-driven drain loop
//!
//! [`QueueDriver`] owns the single background task that drains an
//! [`UtteranceQueue`](crate::UtteranceQueue) once per interval. The interval is
//! re-read every cycle, so `set_interval` applies from the next sleep.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;

use crate::error::{Result, UtteranceError};
use crate::queue::SharedUtteranceQueue;

/// Runs the periodic drain task for a shared queue
pub struct QueueDriver {
    queue: SharedUtteranceQueue,
    shutdown_tx: Option<mpsc::Sender<()>>,
    drain_task: Option<JoinHandle<()>>,
}

impl QueueDriver {
    /// Create a stopped driver for `queue`
    pub fn new(queue: SharedUtteranceQueue) -> Self {
        Self {
            queue,
            shutdown_tx: None,
            drain_task: None,
        }
    }

    /// The queue this driver drains
    pub fn queue(&self) -> &SharedUtteranceQueue {
        &self.queue
    }

    /// Whether the drain task is running
    pub fn is_running(&self) -> bool {
        self.drain_task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Spawn the drain task on the current tokio runtime
    ///
    /// # Errors
    ///
    /// Returns [`UtteranceError::AlreadyRunning`] if the task is already live.
    pub fn start(&mut self) -> Result<()> {
        if self.is_running() {
            return Err(UtteranceError::AlreadyRunning);
        }

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);
        self.shutdown_tx = Some(shutdown_tx);

        let queue = Arc::clone(&self.queue);
        let initial_interval = queue.lock().interval();
        tracing::info!(interval = ?initial_interval, "Starting utterance queue driver");

        let task = tokio::spawn(async move {
            loop {
                let interval = queue.lock().interval();

                tokio::select! {
                    _ = time::sleep(interval) => {
                        // parking_lot locks do not poison and the head is already popped
                        let drained = panic::catch_unwind(AssertUnwindSafe(|| {
                            Self::drain_once(&queue);
                        }));
                        if drained.is_err() {
                            tracing::error!("Utterance drain step panicked, continuing");
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        tracing::info!("Utterance queue driver shutting down");
                        break;
                    }
                }
            }
        });

        self.drain_task = Some(task);
        Ok(())
    }

    /// Signal the drain task to stop and wait for it
    pub async fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(()).await;
        }

        if let Some(task) = self.drain_task.take() {
            if let Err(e) = task.await {
                tracing::warn!("Utterance queue driver task failed: {}", e);
            }
        }

        tracing::info!("Utterance queue driver stopped");
    }

    /// Wait until the queue is empty or `timeout` elapses
    ///
    /// Returns `true` if the queue drained in time. A disabled queue never
    /// drains, so this returns `false` for it once the timeout passes.
    pub async fn wait_until_idle(&self, timeout: Duration) -> bool {
        let poll = time::timeout(timeout, async {
            loop {
                let (empty, interval) = {
                    let queue = self.queue.lock();
                    (queue.is_empty(), queue.interval())
                };
                if empty {
                    return;
                }
                time::sleep(interval).await;
            }
        });
        poll.await.is_ok()
    }

    // The sink runs outside the lock so it may enqueue follow-ups.
    fn drain_once(queue: &SharedUtteranceQueue) {
        let (text, sink) = {
            let mut queue = queue.lock();
            (queue.dequeue_announcement(), queue.sink())
        };

        if let Some(text) = text {
            sink.announce(&text);
        }
    }
}

impl Drop for QueueDriver {
    fn drop(&mut self) {
        if let Some(task) = self.drain_task.take() {
            task.abort();
        }
    }
}
