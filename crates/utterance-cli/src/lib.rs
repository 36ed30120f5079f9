//! Command-line harness for the utterance queue
//!
//! Reads a line-oriented announcement script, feeds it into a live
//! [`UtteranceQueue`](utterance_queue::UtteranceQueue) and prints each
//! announcement on stdout as the drain loop delivers it.

pub mod error;
pub mod logging;
pub mod router;
pub mod runner;
pub mod script;

pub use error::{CliError, CliResult};
pub use router::{Cli, CommandRouter, Commands};
pub use runner::{RunSummary, ScriptRunner};
pub use script::{parse_line, parse_script, Placement, ScriptCommand, UtteranceRequest};
