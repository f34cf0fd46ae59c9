//! Error types for Tempo timer operations

use thiserror::Error;

/// A duration string that could not be resolved into milliseconds
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cannot parse duration {input:?}: {reason}")]
pub struct ParseError {
    pub input: String,
    pub reason: String,
}

impl ParseError {
    pub fn new(input: impl Into<String>, reason: impl Into<String>) -> Self {
        ParseError {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Core Tempo errors
///
/// Every registry operation surfaces these directly to its caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TempoError {
    #[error("Timer not found: {0}")]
    TimerNotFound(String),

    #[error("Timer already exists: {0}")]
    DuplicateTimer(String),

    #[error("Unknown timer type: {0}")]
    UnknownTimerType(String),

    #[error("Invalid duration type: expected integer milliseconds or duration text, got {0}")]
    InvalidDurationType(String),

    #[error("Negative duration: {0}ms")]
    NegativeDuration(i64),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result type for Tempo operations
pub type TempoResult<T> = Result<T, TempoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_converts() {
        let err: TempoError = ParseError::new("soon", "unknown unit").into();
        assert_eq!(
            err.to_string(),
            "Cannot parse duration \"soon\": unknown unit"
        );
    }

    #[test]
    fn test_messages_name_the_timer() {
        assert_eq!(
            TempoError::TimerNotFound("egg".into()).to_string(),
            "Timer not found: egg"
        );
        assert_eq!(
            TempoError::DuplicateTimer("egg".into()).to_string(),
            "Timer already exists: egg"
        );
    }
}
