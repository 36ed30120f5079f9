// Announcement script parsing
//
// One command per line. Blank lines and lines starting with '#' are skipped.
//
//   back  [type=<id>] [loop] <text>[ | <text>...]
//   front [type=<id>] [loop] <text>[ | <text>...]
//   mute | unmute | enable | disable | clear
//   interval <ms>
//   wait <ms>

use std::time::Duration;

use utterance_queue::Utterance;

use crate::error::{CliError, CliResult};

/// Where an utterance is inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Back,
    Front,
}

/// An utterance request parsed from a script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtteranceRequest {
    pub alerts: Vec<String>,
    pub type_id: Option<String>,
    pub loop_alerts: bool,
}

impl UtteranceRequest {
    /// Build the queue value
    pub fn to_utterance(&self) -> utterance_queue::Result<Utterance> {
        let mut builder = Utterance::builder()
            .alerts(self.alerts.iter().cloned())
            .loop_alerts(self.loop_alerts);
        if let Some(type_id) = &self.type_id {
            builder = builder.type_id(type_id.clone());
        }
        builder.build()
    }
}

/// A single script command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Enqueue {
        placement: Placement,
        utterance: UtteranceRequest,
    },
    SetMuted(bool),
    SetEnabled(bool),
    Clear,
    SetInterval(Duration),
    Wait(Duration),
}

/// Parse a whole script
pub fn parse_script(content: &str) -> CliResult<Vec<ScriptCommand>> {
    let mut commands = Vec::new();
    for (index, raw) in content.lines().enumerate() {
        if let Some(command) = parse_line(index + 1, raw)? {
            commands.push(command);
        }
    }
    Ok(commands)
}

/// Parse one line; `None` for blanks and comments
pub fn parse_line(line: usize, raw: &str) -> CliResult<Option<ScriptCommand>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let (keyword, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (trimmed, ""),
    };

    let command = match keyword {
        "back" => ScriptCommand::Enqueue {
            placement: Placement::Back,
            utterance: parse_utterance(line, rest)?,
        },
        "front" => ScriptCommand::Enqueue {
            placement: Placement::Front,
            utterance: parse_utterance(line, rest)?,
        },
        "mute" => ScriptCommand::SetMuted(true),
        "unmute" => ScriptCommand::SetMuted(false),
        "enable" => ScriptCommand::SetEnabled(true),
        "disable" => ScriptCommand::SetEnabled(false),
        "clear" => ScriptCommand::Clear,
        "interval" => ScriptCommand::SetInterval(parse_millis(line, rest)?),
        "wait" => ScriptCommand::Wait(parse_millis(line, rest)?),
        other => {
            return Err(CliError::UnknownCommand {
                line,
                command: other.to_string(),
            })
        }
    };

    Ok(Some(command))
}

fn parse_utterance(line: usize, mut rest: &str) -> CliResult<UtteranceRequest> {
    let mut type_id = None;
    let mut loop_alerts = false;

    // Leading options, in any order
    loop {
        if let Some(after) = rest.strip_prefix("type=") {
            let (id, remainder) = after.split_once(char::is_whitespace).unwrap_or((after, ""));
            if id.is_empty() {
                return Err(CliError::invalid_argument(line, "type= requires a value"));
            }
            type_id = Some(id.to_string());
            rest = remainder.trim_start();
        } else if rest == "loop" || rest.starts_with("loop ") {
            loop_alerts = true;
            rest = rest["loop".len()..].trim_start();
        } else {
            break;
        }
    }

    let alerts: Vec<String> = rest
        .split('|')
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .collect();

    if alerts.is_empty() {
        return Err(CliError::invalid_argument(line, "missing announcement text"));
    }

    Ok(UtteranceRequest {
        alerts,
        type_id,
        loop_alerts,
    })
}

fn parse_millis(line: usize, value: &str) -> CliResult<Duration> {
    value
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| {
            CliError::invalid_argument(line, format!("expected milliseconds, got '{}'", value))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enqueue(
        placement: Placement,
        alerts: &[&str],
        type_id: Option<&str>,
        loop_alerts: bool,
    ) -> ScriptCommand {
        ScriptCommand::Enqueue {
            placement,
            utterance: UtteranceRequest {
                alerts: alerts.iter().map(|s| s.to_string()).collect(),
                type_id: type_id.map(str::to_string),
                loop_alerts,
            },
        }
    }

    #[test]
    fn test_parse_plain_back() {
        let command = parse_line(1, "back Simulation reset").unwrap().unwrap();
        assert_eq!(command, enqueue(Placement::Back, &["Simulation reset"], None, false));
    }

    #[test]
    fn test_parse_options_and_sequence() {
        let command = parse_line(1, "front loop type=drag Moved left | Moved right")
            .unwrap()
            .unwrap();
        assert_eq!(
            command,
            enqueue(Placement::Front, &["Moved left", "Moved right"], Some("drag"), true)
        );
    }

    #[test]
    fn test_loop_prefix_in_text_is_not_an_option() {
        let command = parse_line(1, "back looped around").unwrap().unwrap();
        assert_eq!(command, enqueue(Placement::Back, &["looped around"], None, false));
    }

    #[test]
    fn test_skips_comments_and_blanks() {
        let script = "# heading\n\nmute\n   \nunmute\n";
        let commands = parse_script(script).unwrap();
        assert_eq!(
            commands,
            vec![ScriptCommand::SetMuted(true), ScriptCommand::SetMuted(false)]
        );
    }

    #[test]
    fn test_parse_durations() {
        assert_eq!(
            parse_line(1, "interval 250").unwrap(),
            Some(ScriptCommand::SetInterval(Duration::from_millis(250)))
        );
        assert_eq!(
            parse_line(1, "wait 1000").unwrap(),
            Some(ScriptCommand::Wait(Duration::from_millis(1000)))
        );
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let err = parse_script("mute\nshout hello").unwrap_err();
        assert!(matches!(err, CliError::UnknownCommand { line: 2, .. }));

        let err = parse_line(7, "wait soon").unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument { line: 7, .. }));

        let err = parse_line(3, "back type=x").unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument { line: 3, .. }));
    }

    #[test]
    fn test_request_builds_utterance() {
        let request = UtteranceRequest {
            alerts: vec!["1".into(), "2".into()],
            type_id: Some("count".into()),
            loop_alerts: true,
        };
        let utterance = request.to_utterance().unwrap();
        assert_eq!(utterance.type_id(), Some("count"));
        assert!(utterance.loop_alerts());
        assert_eq!(utterance.alerts().len(), 2);
    }
}
