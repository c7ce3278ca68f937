use crate::error::ErrorAccumulator;
use crate::pgn_visitor_skip_variations;
use crate::timecontrol;
use crate::types::{GameRecord, Winner};

use pgn_reader::{Nag, Outcome, RawComment, RawTag, Reader, SanPlus, Skip, Visitor};
use std::io::Read;
use std::ops::ControlFlow;

/// Streaming PGN visitor (pgn-reader).
///
/// Keeps the handful of tags the explorer needs and the mainline SAN moves.
/// The result comes from the movetext outcome marker, falling back to the
/// `Result` tag.
pub struct GameVisitor {
    headers: Headers,
    outcome: Option<String>,
    diagnostics: ErrorAccumulator,
    skip_reason: Option<String>,
    pub current_game: Option<GameRecord>,
}

/// Result of pulling one game out of a PGN stream.
#[derive(Debug)]
pub enum ReadOutcome {
    Game(GameRecord),
    /// The game was read but cannot be partitioned (no usable clock).
    Skipped(String),
    /// The underlying stream failed; nothing more can be read from it.
    Failed(String),
    Finished,
}

#[derive(Debug, Clone, Copy)]
enum Header {
    Result,
    WhiteElo,
    BlackElo,
    Opening,
    Termination,
    TimeControl,
}

impl Header {
    const COUNT: usize = 6;

    fn from_key(key: &[u8]) -> Option<Self> {
        Some(match key {
            b"Result" => Self::Result,
            b"WhiteElo" => Self::WhiteElo,
            b"BlackElo" => Self::BlackElo,
            b"Opening" => Self::Opening,
            b"Termination" => Self::Termination,
            b"TimeControl" => Self::TimeControl,
            _ => return None,
        })
    }
}

/// Tag values of the current game. The first non-empty occurrence of a tag
/// wins.
#[derive(Default)]
struct Headers([Option<String>; Header::COUNT]);

impl Headers {
    fn record(&mut self, key: &[u8], value: RawTag<'_>) {
        let Some(header) = Header::from_key(key) else {
            return;
        };
        let slot = &mut self.0[header as usize];
        let bytes = value.as_bytes();
        if slot.is_none() && !bytes.is_empty() {
            *slot = Some(String::from_utf8_lossy(bytes).into_owned());
        }
    }

    fn get(&self, header: Header) -> Option<&str> {
        self.0[header as usize].as_deref()
    }

    fn take(&mut self, header: Header) -> Option<String> {
        self.0[header as usize].take()
    }
}

impl Default for GameVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl GameVisitor {
    pub fn new() -> Self {
        Self {
            headers: Headers::default(),
            outcome: None,
            diagnostics: ErrorAccumulator::default(),
            skip_reason: None,
            current_game: None,
        }
    }

    /// Ratings are often `?` for anonymous or unrated players; those are
    /// unknown, not errors.
    fn parse_rating(
        raw: Option<&str>,
        tag: &str,
        diagnostics: &mut ErrorAccumulator,
    ) -> Option<u32> {
        let value = raw?.trim();
        if matches!(value, "" | "?" | "-") {
            return None;
        }
        value
            .parse::<u32>()
            .map_err(|_| diagnostics.push(&format!("Conversion error: {tag}='{value}'")))
            .ok()
    }

    fn resolve_time_control(raw: Option<&str>) -> Result<u32, String> {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Err("Missing TimeControl".to_string());
        }
        timecontrol::resolve_seconds(raw).ok_or_else(|| format!("Unresolvable TimeControl='{raw}'"))
    }

    fn finish_game(&mut self, moves: Vec<String>) {
        let time_control = match Self::resolve_time_control(self.headers.get(Header::TimeControl)) {
            Ok(seconds) => seconds,
            Err(reason) => {
                self.skip_reason = Some(reason);
                return;
            }
        };

        let elo_white = Self::parse_rating(
            self.headers.get(Header::WhiteElo),
            "WhiteElo",
            &mut self.diagnostics,
        );
        let elo_black = Self::parse_rating(
            self.headers.get(Header::BlackElo),
            "BlackElo",
            &mut self.diagnostics,
        );
        let winner = self
            .outcome
            .take()
            .or_else(|| self.headers.take(Header::Result))
            .map_or(Winner::Unknown, |r| Winner::from_result(&r));

        self.current_game = Some(GameRecord {
            elo_white,
            elo_black,
            opening_label: self.headers.take(Header::Opening),
            time_control,
            winner,
            termination: self.headers.take(Header::Termination),
            moves: Some(moves),
            parse_error: self.diagnostics.take(),
        });
    }

    fn take_outcome(&mut self) -> ReadOutcome {
        match self.current_game.take() {
            Some(game) => ReadOutcome::Game(game),
            None => ReadOutcome::Skipped(self.skip_reason.take().unwrap_or_default()),
        }
    }
}

impl Visitor for GameVisitor {
    type Tags = ();
    type Movetext = Vec<String>;
    type Output = ();

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        *self = Self::new();
        ControlFlow::Continue(())
    }

    fn tag(
        &mut self,
        _: &mut Self::Tags,
        key: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        self.headers.record(key, value);
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, _: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        ControlFlow::Continue(Vec::with_capacity(96))
    }

    fn san(&mut self, movetext: &mut Self::Movetext, san: SanPlus) -> ControlFlow<Self::Output> {
        movetext.push(san.to_string());
        ControlFlow::Continue(())
    }

    pgn_visitor_skip_variations!();

    fn outcome(
        &mut self,
        _movetext: &mut Self::Movetext,
        outcome: Outcome,
    ) -> ControlFlow<Self::Output> {
        self.outcome = Some(outcome.to_string());
        ControlFlow::Continue(())
    }

    fn end_game(&mut self, movetext: Self::Movetext) -> Self::Output {
        self.finish_game(movetext);
    }
}

/// Reads the next game from `reader`.
pub fn next_game<R: Read>(reader: &mut Reader<R>, visitor: &mut GameVisitor) -> ReadOutcome {
    match reader.read_game(visitor) {
        Ok(Some(())) => visitor.take_outcome(),
        Ok(None) => ReadOutcome::Finished,
        Err(error) => ReadOutcome::Failed(format!("Parser-stage error: {error}")),
    }
}
