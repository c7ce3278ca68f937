use serde::{Deserialize, Serialize};

/// Game result as seen from the board: who won, or a draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    White,
    Black,
    Draw,
    #[default]
    Unknown,
}

impl Winner {
    /// Decided outcomes, in display order.
    pub const DECIDED: [Winner; 3] = [Winner::White, Winner::Black, Winner::Draw];

    /// Maps a PGN result marker (`1-0`, `0-1`, `1/2-1/2`) to a winner.
    pub fn from_result(result: &str) -> Self {
        match result.trim() {
            "1-0" => Self::White,
            "0-1" => Self::Black,
            "1/2-1/2" => Self::Draw,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
            Self::Draw => "draw",
            Self::Unknown => "unknown",
        }
    }
}

/// One finished game, reduced to what the opening explorer needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    // Player info
    pub elo_white: Option<u32>,
    pub elo_black: Option<u32>,

    pub opening_label: Option<String>,

    /// Base clock time in seconds.
    pub time_control: u32,
    pub winner: Winner,
    pub termination: Option<String>,

    /// Mainline SAN tokens. `None` when the movetext was missing or could not
    /// be parsed; such a record never matches any prefix.
    pub moves: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
}

impl GameRecord {
    /// True when the first `prefix.len()` moves of this game equal `prefix`.
    pub fn starts_with<S: AsRef<str>>(&self, prefix: &[S]) -> bool {
        let Some(moves) = &self.moves else {
            return false;
        };

        if prefix.len() > moves.len() {
            return false;
        }

        moves
            .iter()
            .zip(prefix.iter())
            .all(|(m, p)| m == p.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(moves: Option<&[&str]>) -> GameRecord {
        GameRecord {
            time_control: 180,
            winner: Winner::White,
            moves: moves.map(|m| m.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        }
    }

    #[test]
    fn test_winner_from_result_markers() {
        assert_eq!(Winner::from_result("1-0"), Winner::White);
        assert_eq!(Winner::from_result("0-1"), Winner::Black);
        assert_eq!(Winner::from_result("1/2-1/2"), Winner::Draw);
        assert_eq!(Winner::from_result("*"), Winner::Unknown);
        assert_eq!(Winner::from_result(""), Winner::Unknown);
    }

    #[test]
    fn test_starts_with_exact_prefix() {
        let g = game(Some(&["e4", "e5", "Nf3"]));
        assert!(g.starts_with(&["e4"]));
        assert!(g.starts_with(&["e4", "e5", "Nf3"]));
        assert!(!g.starts_with(&["e4", "c5"]));
    }

    #[test]
    fn test_starts_with_longer_prefix_never_matches() {
        let g = game(Some(&["d4"]));
        assert!(!g.starts_with(&["d4", "d5"]));
    }

    #[test]
    fn test_starts_with_empty_prefix() {
        let empty: [&str; 0] = [];
        assert!(game(Some(&[])).starts_with(&empty));
        assert!(game(Some(&["e4"])).starts_with(&empty));
    }

    #[test]
    fn test_missing_moves_match_nothing() {
        let empty: [&str; 0] = [];
        let g = game(None);
        assert!(!g.starts_with(&empty));
        assert!(!g.starts_with(&["e4"]));
    }
}
