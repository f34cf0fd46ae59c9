//! Duration input resolution
//!
//! A timer's duration arrives either as integer milliseconds or as
//! human-readable text such as `"1m"` or `"1h 30m"`.

use crate::{ParseError, TempoError, TempoResult};

/// Duration as handed to `createTimer`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DurationInput {
    Millis(i64),
    Text(String),
}

impl DurationInput {
    /// Resolve to a non-negative count of milliseconds
    pub fn resolve(&self) -> TempoResult<i64> {
        match self {
            DurationInput::Millis(ms) if *ms < 0 => Err(TempoError::NegativeDuration(*ms)),
            DurationInput::Millis(ms) => Ok(*ms),
            DurationInput::Text(text) => Ok(parse_duration(text)?),
        }
    }
}

impl From<i64> for DurationInput {
    fn from(ms: i64) -> Self {
        DurationInput::Millis(ms)
    }
}

impl From<i32> for DurationInput {
    fn from(ms: i32) -> Self {
        DurationInput::Millis(i64::from(ms))
    }
}

impl From<&str> for DurationInput {
    fn from(text: &str) -> Self {
        DurationInput::Text(text.to_string())
    }
}

impl From<String> for DurationInput {
    fn from(text: String) -> Self {
        DurationInput::Text(text)
    }
}

/// Parse duration text into milliseconds
///
/// A bare integer is milliseconds; anything else goes through humantime.
pub fn parse_duration(text: &str) -> Result<i64, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::new(text, "empty duration"));
    }

    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed
            .parse::<i64>()
            .map_err(|e| ParseError::new(text, e.to_string()));
    }

    let duration =
        humantime::parse_duration(trimmed).map_err(|e| ParseError::new(text, e.to_string()))?;
    i64::try_from(duration.as_millis())
        .map_err(|_| ParseError::new(text, "duration out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_duration("1m"), Ok(60_000));
        assert_eq!(parse_duration("1h 30m"), Ok(5_400_000));
        assert_eq!(parse_duration("250ms"), Ok(250));
        assert_eq!(parse_duration(" 2s "), Ok(2_000));
    }

    #[test]
    fn test_parse_bare_integer_is_millis() {
        assert_eq!(parse_duration("1500"), Ok(1_500));
        assert_eq!(parse_duration("0"), Ok(0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("soon").is_err());
        assert!(parse_duration("-5s").is_err());
        assert!(parse_duration("99999999999999999999").is_err());
    }

    #[test]
    fn test_resolve_input() {
        assert_eq!(DurationInput::from(5_000).resolve(), Ok(5_000));
        assert_eq!(DurationInput::from("1m").resolve(), Ok(60_000));
        assert_eq!(
            DurationInput::from(-1).resolve(),
            Err(TempoError::NegativeDuration(-1))
        );
        assert!(matches!(
            DurationInput::from("later").resolve(),
            Err(TempoError::Parse(_))
        ));
    }
}
