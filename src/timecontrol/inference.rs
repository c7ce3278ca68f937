use std::sync::LazyLock;

use regex::Regex;

use super::{Period, TimeControl, TimeControlError};

/// `5'`, `5'+3''`
static APOSTROPHE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\s*'(?:\+?\s*(\d+)\s*'')?$").expect("valid apostrophe regex")
});

/// `G/15`, `Game 60`, `g:5+3`
static GAME_IN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^g(?:ame)?\s*[/:]?\s*(\d+)(?:\+(\d+))?$").expect("valid game-in regex")
});

/// `10 min`, `10 min+5 sec`
static WORDED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d+)\s*(?:minutes?|mins?|m)\.?(?:\+(\d+)\s*(?:seconds?|secs?|s)\.?)?$")
        .expect("valid worded regex")
});

/// Shorthands whose base is written in minutes and increment in seconds.
/// `None` when `input` is not one of them.
pub(super) fn infer_minutes(input: &str) -> Option<Result<TimeControl, TimeControlError>> {
    let caps = [&APOSTROPHE_RE, &GAME_IN_RE, &WORDED_RE]
        .into_iter()
        .find_map(|re| re.captures(input))?;
    let number = |idx: usize| caps.get(idx).and_then(|m| m.as_str().parse::<u32>().ok());

    let minutes = number(1)?;
    let Some(base) = minutes.checked_mul(60) else {
        return Some(Err(TimeControlError::Overflow { minutes }));
    };

    Some(Ok(TimeControl::Periods {
        periods: vec![Period {
            moves: None,
            base,
            increment: number(2),
        }],
        inferred: true,
    }))
}

#[cfg(test)]
mod tests {
    use super::super::{TimeControl, TimeControlError, resolve_seconds};

    #[test]
    fn test_apostrophe_minutes_and_seconds() {
        let tc = TimeControl::parse("5'+3''").unwrap();
        assert!(tc.is_inferred());
        assert_eq!(tc.base_seconds(), Some(300));
        assert_eq!(tc.to_string(), "300+3");
    }

    #[test]
    fn test_apostrophe_minutes_only() {
        assert_eq!(resolve_seconds("10'"), Some(600));
    }

    #[test]
    fn test_game_in_shorthand() {
        assert_eq!(resolve_seconds("G/15"), Some(900));
        assert_eq!(resolve_seconds("Game 60"), Some(3600));
        assert_eq!(resolve_seconds("g:5+3"), Some(300));
    }

    #[test]
    fn test_worded_minutes_and_seconds() {
        let tc = TimeControl::parse("10 min + 5 sec").unwrap();
        assert!(tc.is_inferred());
        assert_eq!(tc.to_string(), "600+5");
    }

    #[test]
    fn test_minutes_overflow_is_error() {
        assert_eq!(
            TimeControl::parse("G71582789"),
            Err(TimeControlError::Overflow { minutes: 71582789 })
        );
        assert_eq!(resolve_seconds("G71582789"), None);
    }

    #[test]
    fn test_free_text_is_unknown() {
        assert_eq!(TimeControl::parse("classical"), Ok(TimeControl::Unknown));
    }
}
