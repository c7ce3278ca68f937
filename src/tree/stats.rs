use crate::types::{GameRecord, Winner};

use std::collections::BTreeMap;

/// Finished games grouped by time control.
///
/// Games without a decided result are dropped here so that, for every node
/// with plays, the white, black and draw rates add up to one.
#[derive(Debug, Default)]
pub struct GameIndex {
    games: Vec<GameRecord>,
    by_time_control: BTreeMap<u32, Vec<usize>>,
}

impl GameIndex {
    pub fn new(games: Vec<GameRecord>) -> Self {
        let total = games.len();
        let games: Vec<GameRecord> = games
            .into_iter()
            .filter(|g| g.winner != Winner::Unknown)
            .collect();
        if games.len() < total {
            log::warn!(
                "Ignoring {} game(s) without a decided result",
                total - games.len()
            );
        }

        let mut by_time_control: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
        for (idx, game) in games.iter().enumerate() {
            by_time_control.entry(game.time_control).or_default().push(idx);
        }

        log::info!(
            "Indexed {} game(s) across {} time control(s)",
            games.len(),
            by_time_control.len()
        );
        Self {
            games,
            by_time_control,
        }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Distinct time controls, ascending.
    pub fn time_controls(&self) -> impl Iterator<Item = u32> + '_ {
        self.by_time_control.keys().copied()
    }

    pub fn games_for(&self, time_control: u32) -> impl Iterator<Item = &GameRecord> + '_ {
        self.by_time_control
            .get(&time_control)
            .into_iter()
            .flatten()
            .map(|&idx| &self.games[idx])
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeControlStats {
    pub plays: usize,
    pub white: f64,
    pub black: f64,
    pub draw: f64,
    pub play_rate: f64,
}

impl TimeControlStats {
    pub fn outcome_rate(&self, winner: Winner) -> f64 {
        match winner {
            Winner::White => self.white,
            Winner::Black => self.black,
            Winner::Draw => self.draw,
            Winner::Unknown => 0.0,
        }
    }
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Aggregates for one tree node, keyed by time control. Every time control of
/// the game index has an entry, even when no game reached the node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeStatistics {
    by_time_control: BTreeMap<u32, TimeControlStats>,
}

impl NodeStatistics {
    /// Computes the statistics of `path`. `parent` holds the statistics of
    /// the path without its last move and is `None` only for the root, whose
    /// previous set is every game with a move list.
    pub fn compute<S: AsRef<str>>(
        index: &GameIndex,
        path: &[S],
        parent: Option<&NodeStatistics>,
    ) -> Self {
        let mut by_time_control = BTreeMap::new();

        for tc in index.time_controls() {
            let (mut white, mut black, mut draw) = (0usize, 0usize, 0usize);
            for game in index.games_for(tc).filter(|g| g.starts_with(path)) {
                match game.winner {
                    Winner::White => white += 1,
                    Winner::Black => black += 1,
                    Winner::Draw => draw += 1,
                    Winner::Unknown => {}
                }
            }

            let plays = white + black + draw;
            let previous = parent.map_or(plays, |p| p.play_count(tc));
            by_time_control.insert(
                tc,
                TimeControlStats {
                    plays,
                    white: ratio(white, plays),
                    black: ratio(black, plays),
                    draw: ratio(draw, plays),
                    play_rate: ratio(plays, previous),
                },
            );
        }

        Self { by_time_control }
    }

    pub fn get(&self, time_control: u32) -> Option<&TimeControlStats> {
        self.by_time_control.get(&time_control)
    }

    pub fn contains(&self, time_control: u32) -> bool {
        self.by_time_control.contains_key(&time_control)
    }

    pub fn outcome_rate(&self, time_control: u32, winner: Winner) -> f64 {
        self.get(time_control).map_or(0.0, |s| s.outcome_rate(winner))
    }

    pub fn play_count(&self, time_control: u32) -> usize {
        self.get(time_control).map_or(0, |s| s.plays)
    }

    pub fn play_rate(&self, time_control: u32) -> f64 {
        self.get(time_control).map_or(0.0, |s| s.play_rate)
    }
}
