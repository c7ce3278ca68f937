//! Command-line configuration.
//!
//! Every option can also come from the environment; CLI arguments win.

use anyhow::{Result, anyhow};
use chess_explorer::reader::Compression;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "chess-explorer")]
#[command(about = "Browse the openings of a PGN game collection like a filesystem")]
#[command(
    long_about = "Loads finished games (PGN, zstd-compressed PGN or JSON-lines snapshots),
builds a tree of the named openings from the Lichess chess-openings tables and
opens a shell where `ls`, `cd` and `stats` show how often each move was played
and how the games ended, per time control."
)]
pub struct Config {
    /// PGN files, glob patterns or `.jsonl` snapshots
    #[arg(env = "CHESS_GAMES", value_delimiter = ',', required = true)]
    pub games: Vec<String>,

    /// Directory holding the opening tables `a.tsv` … `e.tsv`
    #[arg(long, short = 'o', env = "CHESS_OPENINGS")]
    pub openings: PathBuf,

    /// Ignore openings longer than this many plies
    #[arg(long, env = "CHESS_MAX_MOVES")]
    pub max_moves: Option<usize>,

    /// Default time control in seconds, as with `settc`
    #[arg(long, short = 't', env = "CHESS_TIME_CONTROL")]
    pub time_control: Option<u32>,

    /// How to decompress game files (auto, plain, zstd)
    #[arg(long, default_value_t = Compression::Auto)]
    pub compression: Compression,

    /// Run the commands in this file instead of prompting
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Write the loaded games to this JSON-lines snapshot (`.zst` to compress)
    #[arg(long)]
    pub save_games: Option<PathBuf>,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.games.iter().all(|g| g.trim().is_empty()) {
            return Err(anyhow!("at least one game input is required"));
        }

        if self.time_control == Some(0) {
            return Err(anyhow!("time_control must be greater than 0"));
        }

        if self.max_moves == Some(0) {
            return Err(anyhow!("max_moves must be greater than 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("chess-explorer").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_parses_inputs_and_options() {
        let cfg = parse(&[
            "lichess.pgn.zst",
            "more/*.pgn",
            "--openings",
            "data/openings",
            "--max-moves",
            "12",
            "-t",
            "180",
            "--compression",
            "zstd",
        ]);
        assert_eq!(cfg.games, ["lichess.pgn.zst", "more/*.pgn"]);
        assert_eq!(cfg.openings, PathBuf::from("data/openings"));
        assert_eq!(cfg.max_moves, Some(12));
        assert_eq!(cfg.time_control, Some(180));
        assert_eq!(cfg.compression, Compression::Zstd);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let cfg = parse(&["games.pgn", "-o", "openings"]);
        assert_eq!(cfg.compression, Compression::Auto);
        assert_eq!(cfg.time_control, None);
        assert_eq!(cfg.script, None);
        assert_eq!(cfg.save_games, None);
    }

    #[test]
    fn test_rejects_unknown_compression() {
        let result = Config::try_parse_from([
            "chess-explorer",
            "games.pgn",
            "-o",
            "openings",
            "--compression",
            "gzip",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_time_control() {
        let mut cfg = parse(&["games.pgn", "-o", "openings"]);
        cfg.time_control = Some(0);
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("time_control"));
    }

    #[test]
    fn test_validate_rejects_zero_max_moves() {
        let mut cfg = parse(&["games.pgn", "-o", "openings"]);
        cfg.max_moves = Some(0);
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("max_moves"));
    }
}
