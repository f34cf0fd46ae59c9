//! Command surface - named operations exposed to operators
//!
//! Each command maps 1:1 onto a registry operation. Commands arrive as
//! JSON objects tagged by `command`, e.g.
//! `{"command": "createTimer", "name": "tea", "type": "decrementing", "duration": "3m"}`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tempo_core::{DurationInput, ParseError, TempoError, TempoResult, Timer};
use tempo_engine::{Deleted, TimerRegistry};

/// Operator command
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Command {
    CreateTimer {
        name: String,
        #[serde(rename = "type")]
        kind: String,
        /// Integer milliseconds or duration text
        duration: Value,
    },
    DeleteTimer {
        name: String,
    },
    ResetTimer {
        name: String,
        #[serde(default = "default_pause")]
        pause: bool,
    },
    PauseTimer {
        name: String,
    },
    ResumeTimer {
        name: String,
    },
    ToggleTimer {
        name: String,
    },
    GetTimer {
        name: String,
    },
    ListTimers,
}

fn default_pause() -> bool {
    true
}

/// Successful command result
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Timer(Timer),
    /// Pause of a paused timer or resume of a running one
    Unchanged,
    Deleted(Deleted),
    Timers(Vec<Timer>),
}

impl From<Option<Timer>> for Reply {
    fn from(timer: Option<Timer>) -> Self {
        timer.map_or(Reply::Unchanged, Reply::Timer)
    }
}

/// Map a JSON duration onto the accepted input forms
pub fn duration_input(value: &Value) -> TempoResult<DurationInput> {
    match value {
        Value::String(text) => Ok(DurationInput::Text(text.clone())),
        Value::Number(n) => match n.as_i64() {
            Some(ms) => Ok(DurationInput::Millis(ms)),
            // Integral but wider than i64
            None if n.is_u64() => Err(ParseError::new(n.to_string(), "duration out of range").into()),
            None => Err(TempoError::InvalidDurationType(format!("non-integer number {}", n))),
        },
        Value::Null => Err(TempoError::InvalidDurationType("null".into())),
        Value::Bool(_) => Err(TempoError::InvalidDurationType("boolean".into())),
        Value::Array(_) => Err(TempoError::InvalidDurationType("array".into())),
        Value::Object(_) => Err(TempoError::InvalidDurationType("object".into())),
    }
}

/// Run a command against the registry
pub fn dispatch(registry: &TimerRegistry, command: Command) -> TempoResult<Reply> {
    match command {
        Command::CreateTimer {
            name,
            kind,
            duration,
        } => registry
            .create_timer_from(&name, &kind, duration_input(&duration))
            .map(Reply::Timer),
        Command::DeleteTimer { name } => registry.delete_timer(&name).map(Reply::Deleted),
        Command::ResetTimer { name, pause } => registry.reset_timer(&name, pause).map(Reply::Timer),
        Command::PauseTimer { name } => registry.pause_timer(&name).map(Reply::from),
        Command::ResumeTimer { name } => registry.resume_timer(&name).map(Reply::from),
        Command::ToggleTimer { name } => registry.toggle_timer(&name).map(Reply::from),
        Command::GetTimer { name } => registry.get_timer(&name).map(Reply::Timer),
        Command::ListTimers => Ok(Reply::Timers(registry.list_timers())),
    }
}

/// Parse and run one JSON command line
///
/// Always answers with `{"ok": ...}` or `{"error": "..."}`.
pub fn execute_line(registry: &TimerRegistry, line: &str) -> Value {
    let outcome = serde_json::from_str::<Command>(line)
        .map_err(crate::RuntimeError::from)
        .and_then(|command| dispatch(registry, command).map_err(crate::RuntimeError::from));

    match outcome {
        Ok(reply) => json!({ "ok": reply }),
        Err(e) => {
            tracing::debug!("command failed: {}", e);
            json!({ "error": e.to_string() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempo_core::{EventLog, ManualClock};
    use tempo_engine::TimerContext;
    use tempo_state::MemoryStore;

    fn registry() -> TimerRegistry {
        TimerRegistry::new(TimerContext::new(
            Arc::new(MemoryStore::new()),
            Arc::new(EventLog::new()),
            Arc::new(ManualClock::new(1_000)),
        ))
    }

    fn parse(json: &str) -> Command {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!(
            parse(r#"{"command": "createTimer", "name": "t", "type": "incrementing", "duration": 5000}"#),
            Command::CreateTimer {
                name: "t".into(),
                kind: "incrementing".into(),
                duration: json!(5000),
            }
        );
        assert_eq!(
            parse(r#"{"command": "resetTimer", "name": "t"}"#),
            Command::ResetTimer {
                name: "t".into(),
                pause: true
            }
        );
        assert_eq!(
            parse(r#"{"command": "resetTimer", "name": "t", "pause": false}"#),
            Command::ResetTimer {
                name: "t".into(),
                pause: false
            }
        );
        assert_eq!(parse(r#"{"command": "listTimers"}"#), Command::ListTimers);
    }

    #[test]
    fn test_duration_input_types() {
        assert_eq!(duration_input(&json!(60000)), Ok(DurationInput::Millis(60_000)));
        assert_eq!(duration_input(&json!("1m")), Ok(DurationInput::Text("1m".into())));

        for bad in [json!(1.5), json!(true), json!(null), json!([1]), json!({"ms": 1})] {
            assert!(matches!(
                duration_input(&bad),
                Err(TempoError::InvalidDurationType(_))
            ));
        }
    }

    #[test]
    fn test_duration_input_too_large() {
        let err = duration_input(&json!(u64::MAX)).unwrap_err();
        assert_eq!(
            err,
            TempoError::Parse(ParseError::new("18446744073709551615", "duration out of range"))
        );
        assert!(!err.to_string().contains("non-integer"));

        assert_eq!(
            duration_input(&json!(i64::MAX)),
            Ok(DurationInput::Millis(i64::MAX))
        );
    }

    #[test]
    fn test_dispatch_lifecycle() {
        let registry = registry();

        let created = dispatch(&registry, parse(
            r#"{"command": "createTimer", "name": "t", "type": "decrementing", "duration": "1m"}"#,
        ))
        .unwrap();
        let Reply::Timer(timer) = created else {
            panic!("expected timer reply");
        };
        assert_eq!(timer.value, 60_000);

        assert!(matches!(
            dispatch(&registry, parse(r#"{"command": "toggleTimer", "name": "t"}"#)),
            Ok(Reply::Timer(Timer { running: true, .. }))
        ));
        assert_eq!(
            dispatch(&registry, parse(r#"{"command": "resumeTimer", "name": "t"}"#)),
            Ok(Reply::Unchanged)
        );
        assert_eq!(
            dispatch(&registry, parse(r#"{"command": "deleteTimer", "name": "t"}"#)),
            Ok(Reply::Deleted(Deleted { deleted: true }))
        );
        assert_eq!(
            dispatch(&registry, parse(r#"{"command": "listTimers"}"#)),
            Ok(Reply::Timers(vec![]))
        );
    }

    #[test]
    fn test_dispatch_duplicate_before_duration() {
        let registry = registry();
        registry.create_timer("t", "incrementing", 10).unwrap();

        let result = dispatch(&registry, parse(
            r#"{"command": "createTimer", "name": "t", "type": "incrementing", "duration": false}"#,
        ));
        assert_eq!(result, Err(TempoError::DuplicateTimer("t".into())));

        let result = dispatch(&registry, parse(
            r#"{"command": "createTimer", "name": "u", "type": "incrementing", "duration": false}"#,
        ));
        assert_eq!(result, Err(TempoError::InvalidDurationType("boolean".into())));
        assert_eq!(registry.list_timers().len(), 1);
    }

    #[test]
    fn test_execute_line_replies() {
        let registry = registry();

        let reply = execute_line(
            &registry,
            r#"{"command": "createTimer", "name": "t", "type": "incrementing", "duration": 5000}"#,
        );
        assert_eq!(reply["ok"]["name"], "t");
        assert_eq!(reply["ok"]["type"], "incrementing");

        let reply = execute_line(&registry, r#"{"command": "pauseTimer", "name": "t"}"#);
        assert_eq!(reply, json!({ "ok": null }));

        let reply = execute_line(&registry, r#"{"command": "deleteTimer", "name": "nope"}"#);
        assert_eq!(reply, json!({ "error": "Timer not found: nope" }));

        let reply = execute_line(&registry, "not json");
        assert!(reply["error"].as_str().unwrap().starts_with("Malformed command"));
    }
}
