use std::fmt;
use std::str::FromStr;

use super::{Period, TimeControl};

/// The PGN standard forms. Every number is seconds, so `30+0` is thirty
/// seconds rather than half an hour.
pub(super) fn parse_strict(input: &str) -> Option<TimeControl> {
    match input {
        "?" => return Some(TimeControl::Unknown),
        "-" => return Some(TimeControl::Unlimited),
        _ => {}
    }

    if let Some(rest) = input.strip_prefix('*') {
        return rest.parse().ok().map(TimeControl::Sandclock);
    }

    let periods = input
        .split(':')
        .map(|stage| stage.parse::<Period>().ok())
        .collect::<Option<Vec<_>>>()?;
    Some(TimeControl::Periods {
        periods,
        inferred: false,
    })
}

impl FromStr for Period {
    type Err = ();

    fn from_str(stage: &str) -> Result<Self, Self::Err> {
        let number = |s: &str| s.parse::<u32>().map_err(|_| ());

        let (clock, increment) = match stage.split_once('+') {
            Some((clock, inc)) => (clock, Some(number(inc)?)),
            None => (stage, None),
        };
        let (moves, base) = match clock.split_once('/') {
            Some((moves, base)) => (Some(number(moves)?), number(base)?),
            None => (None, number(clock)?),
        };

        Ok(Self {
            moves,
            base,
            increment,
        })
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(moves) = self.moves {
            write!(f, "{}/", moves)?;
        }
        write!(f, "{}", self.base)?;
        if let Some(increment) = self.increment {
            write!(f, "+{}", increment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Period, TimeControl, resolve_seconds};

    fn parse(raw: &str) -> TimeControl {
        TimeControl::parse(raw).unwrap()
    }

    #[test]
    fn test_placeholder_forms() {
        assert_eq!(parse("?"), TimeControl::Unknown);
        assert_eq!(parse("-"), TimeControl::Unlimited);
        assert_eq!(parse("*60"), TimeControl::Sandclock(60));
        assert_eq!(parse("*60").to_string(), "*60");
    }

    #[test]
    fn test_lichess_clock() {
        let tc = parse("180+2");
        assert_eq!(
            tc,
            TimeControl::Periods {
                periods: vec![Period {
                    moves: None,
                    base: 180,
                    increment: Some(2),
                }],
                inferred: false,
            }
        );
        assert!(!tc.is_inferred());
    }

    #[test]
    fn test_small_base_stays_in_seconds() {
        assert_eq!(resolve_seconds("30+0"), Some(30));
        assert!(!parse("30+0").is_inferred());
    }

    #[test]
    fn test_moves_per_period() {
        let tc = parse("40/5400+30");
        assert_eq!(tc.to_string(), "40/5400+30");
        assert_eq!(tc.base_seconds(), Some(5400));
    }

    #[test]
    fn test_multi_stage_round_trips_display() {
        assert_eq!(parse("40/5400+30:1800+30").to_string(), "40/5400+30:1800+30");
    }

    #[test]
    fn test_malformed_stages_are_unknown() {
        assert_eq!(parse("x/600+5"), TimeControl::Unknown);
        assert_eq!(parse("180+2+2"), TimeControl::Unknown);
        assert_eq!(parse("*fast"), TimeControl::Unknown);
    }
}
