// Script execution against a live queue

use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use utterance_queue::{AnnouncementSink, QueueDriver, UtteranceQueue, UtteranceQueueConfig};

use crate::error::CliResult;
use crate::script::{Placement, ScriptCommand};

/// Upper bound on how long to wait for the backlog after the last command
pub const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of a script run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Commands executed
    pub commands: usize,
    /// Entries still pending when the driver stopped
    pub pending: usize,
}

/// Feeds script commands into a queue while its driver drains it
pub struct ScriptRunner {
    driver: QueueDriver,
    drain_timeout: Duration,
}

impl ScriptRunner {
    /// Build the queue from `config` and wire it to `sink`
    pub fn new(config: &UtteranceQueueConfig, sink: Arc<dyn AnnouncementSink>) -> CliResult<Self> {
        let queue = UtteranceQueue::with_config(config, sink)?.into_shared();
        Ok(Self {
            driver: QueueDriver::new(queue),
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
        })
    }

    /// Override how long to wait for the backlog at the end of a run
    pub fn with_drain_timeout(mut self, timeout: Duration) -> Self {
        self.drain_timeout = timeout;
        self
    }

    /// Execute every command, then wait for the queue to drain and stop
    pub async fn run(mut self, commands: Vec<ScriptCommand>) -> CliResult<RunSummary> {
        self.driver.start()?;

        let total = commands.len();
        for command in commands {
            if let Err(e) = self.execute(command).await {
                self.driver.stop().await;
                return Err(e);
            }
        }

        if !self.driver.wait_until_idle(self.drain_timeout).await {
            tracing::warn!("Queue did not drain before the timeout");
        }
        self.driver.stop().await;

        let pending = self.driver.queue().lock().len();
        Ok(RunSummary {
            commands: total,
            pending,
        })
    }

    async fn execute(&mut self, command: ScriptCommand) -> CliResult<()> {
        tracing::debug!(?command, "Executing script command");

        match command {
            ScriptCommand::Enqueue {
                placement,
                utterance,
            } => {
                let utterance = utterance.to_utterance()?;
                let mut queue = self.driver.queue().lock();
                match placement {
                    Placement::Back => queue.add_to_back(utterance),
                    Placement::Front => queue.add_to_front(utterance),
                }
            }
            ScriptCommand::SetMuted(muted) => self.driver.queue().lock().set_muted(muted),
            ScriptCommand::SetEnabled(enabled) => self.driver.queue().lock().set_enabled(enabled),
            ScriptCommand::Clear => self.driver.queue().lock().clear(),
            ScriptCommand::SetInterval(interval) => {
                self.driver.queue().lock().set_interval(interval)?
            }
            ScriptCommand::Wait(duration) => time::sleep(duration).await,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;
    use utterance_queue::RecordingSink;

    async fn run_script(script: &str) -> (RunSummary, Vec<String>) {
        let sink = Arc::new(RecordingSink::new());
        let config = UtteranceQueueConfig {
            interval_ms: 100,
            ..Default::default()
        };
        let runner = ScriptRunner::new(&config, sink.clone())
            .unwrap()
            .with_drain_timeout(Duration::from_secs(10));
        let summary = runner.run(parse_script(script).unwrap()).await.unwrap();
        (summary, sink.announcements())
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_announces_in_order() {
        let (summary, announced) = run_script(
            "back Reset all\n\
             back type=slider Slider at 1\n\
             back type=slider Slider at 5\n\
             front Dialog opened\n",
        )
        .await;

        assert_eq!(announced, vec!["Dialog opened", "Reset all", "Slider at 5"]);
        assert_eq!(summary.commands, 4);
        assert_eq!(summary.pending, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_muted_section_is_silent() {
        let (_, announced) = run_script(
            "mute\n\
             back hidden one\n\
             back hidden two\n\
             wait 500\n\
             unmute\n\
             back audible\n",
        )
        .await;

        assert_eq!(announced, vec!["audible"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_queue_ignores_entries() {
        let (summary, announced) = run_script("disable\nback ignored\nenable\nback kept\n").await;

        assert_eq!(announced, vec!["kept"]);
        assert_eq!(summary.pending, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_discards_backlog() {
        let (_, announced) = run_script("back a\nback b\nclear\nback c\n").await;
        assert_eq!(announced, vec!["c"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_fails_run() {
        let sink = Arc::new(RecordingSink::new());
        let runner = ScriptRunner::new(&UtteranceQueueConfig::default(), sink).unwrap();
        let result = runner.run(parse_script("interval 0").unwrap()).await;
        assert!(result.is_err());
    }
}
