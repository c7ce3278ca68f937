//! `TimeControl` tag parsing.
//!
//! Games are partitioned by the base clock time of their first period, in
//! seconds. Strict PGN forms (`180+2`, `40/5400+30:1800+30`, `?`, `-`, `*60`)
//! are read literally; a handful of human shorthands (`5'+3''`, `G/15`,
//! `10 min + 5 sec`) are inferred as minutes.

use std::error::Error;
use std::fmt;

mod inference;
mod strict;

/// One `[moves/]base[+increment]` stage of a clock, in seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub moves: Option<u32>,
    pub base: u32,
    pub increment: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeControl {
    /// `?`, or text that matches no known form.
    Unknown,
    /// `-`: no clock.
    Unlimited,
    /// `*N`: hourglass with `N` seconds.
    Sandclock(u32),
    Periods {
        periods: Vec<Period>,
        /// Read from a minute shorthand rather than the PGN form.
        inferred: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeControlError {
    Empty,
    Overflow { minutes: u32 },
}

impl fmt::Display for TimeControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty TimeControl"),
            Self::Overflow { minutes } => write!(f, "{} minutes overflows the clock", minutes),
        }
    }
}

impl Error for TimeControlError {}

impl TimeControl {
    pub fn parse(raw: &str) -> Result<Self, TimeControlError> {
        let input = raw.trim();
        if input.is_empty() {
            return Err(TimeControlError::Empty);
        }

        // `180 + 2` and `40 / 5400` are common in hand-edited files.
        let compact: String = input
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .replace(" +", "+")
            .replace("+ ", "+")
            .replace(" /", "/")
            .replace("/ ", "/")
            .replace(" :", ":")
            .replace(": ", ":");

        if let Some(parsed) = strict::parse_strict(&compact) {
            return Ok(parsed);
        }
        inference::infer_minutes(&compact).unwrap_or(Ok(Self::Unknown))
    }

    fn first_period(&self) -> Option<&Period> {
        match self {
            Self::Periods { periods, .. } => periods.first(),
            _ => None,
        }
    }

    /// Base seconds of the first period. Only period clocks have one.
    pub fn base_seconds(&self) -> Option<u32> {
        self.first_period().map(|p| p.base)
    }

    pub fn is_inferred(&self) -> bool {
        matches!(self, Self::Periods { inferred: true, .. })
    }
}

impl fmt::Display for TimeControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("?"),
            Self::Unlimited => f.write_str("-"),
            Self::Sandclock(seconds) => write!(f, "*{}", seconds),
            Self::Periods { periods, .. } => {
                for (idx, period) in periods.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(":")?;
                    }
                    write!(f, "{}", period)?;
                }
                Ok(())
            }
        }
    }
}

/// Resolves a `TimeControl` tag to the base seconds used to partition games.
pub fn resolve_seconds(raw: &str) -> Option<u32> {
    let tc = TimeControl::parse(raw).ok()?;
    if tc.is_inferred() {
        log::debug!("Read TimeControl '{}' in minutes as {}", raw, tc);
    }
    tc.base_seconds()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    UltraBullet,
    Bullet,
    Blitz,
    Rapid,
    Classical,
}

impl Speed {
    /// Lichess speed buckets over the estimated game duration
    /// (`base + 40 * increment`).
    pub fn from_clock(base_seconds: u32, increment_seconds: u32) -> Self {
        let estimated = base_seconds as u64 + 40 * increment_seconds as u64;
        match estimated {
            0..=29 => Self::UltraBullet,
            30..=179 => Self::Bullet,
            180..=479 => Self::Blitz,
            480..=1499 => Self::Rapid,
            _ => Self::Classical,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::UltraBullet => "ultra-bullet",
            Self::Bullet => "bullet",
            Self::Blitz => "blitz",
            Self::Rapid => "rapid",
            Self::Classical => "classical",
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
