//! JSON-lines snapshots of parsed games, one [`GameRecord`] per line.
//!
//! Re-reading a snapshot skips PGN parsing and time-control resolution
//! entirely. Paths ending in `.zst` are zstd-compressed.

use crate::error::LoadError;
use crate::reader::{Compression, open_input_stream};
use crate::types::GameRecord;

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use zstd::stream::write::Encoder as ZstdEncoder;

pub fn write_snapshot(path: &Path, games: &[GameRecord]) -> Result<(), LoadError> {
    let io_error = |source: io::Error| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;

    if Compression::Auto.applies_to(path) {
        let mut encoder = ZstdEncoder::new(file, 3).map_err(io_error)?;
        write_lines(&mut encoder, games).map_err(io_error)?;
        encoder.finish().map_err(io_error)?;
    } else {
        let mut writer = BufWriter::new(file);
        write_lines(&mut writer, games).map_err(io_error)?;
        writer.flush().map_err(io_error)?;
    }

    log::info!("Wrote {} game(s) to '{}'", games.len(), path.display());
    Ok(())
}

fn write_lines<W: Write>(out: &mut W, games: &[GameRecord]) -> io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Blank lines are ignored; a malformed line fails the whole snapshot.
pub fn read_snapshot(path: &Path) -> Result<Vec<GameRecord>, LoadError> {
    let input = open_input_stream(path, Compression::Auto)?;
    let mut games = Vec::new();

    for (idx, line) in BufReader::new(input).lines().enumerate() {
        let line = line.map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let game = serde_json::from_str(&line).map_err(|source| LoadError::Snapshot {
            path: path.to_path_buf(),
            line: idx + 1,
            source,
        })?;
        games.push(game);
    }

    log::info!("{}: read {} game(s) from snapshot", path.display(), games.len());
    Ok(games)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Winner;
    use tempfile::TempDir;

    fn sample_games() -> Vec<GameRecord> {
        vec![
            GameRecord {
                elo_white: Some(1500),
                elo_black: None,
                opening_label: Some("Sicilian Defense".to_string()),
                time_control: 180,
                winner: Winner::Black,
                termination: Some("Time forfeit".to_string()),
                moves: Some(vec!["e4".to_string(), "c5".to_string()]),
                parse_error: None,
            },
            GameRecord {
                time_control: 60,
                winner: Winner::Draw,
                moves: None,
                parse_error: Some("Conversion error: WhiteElo='x'".to_string()),
                ..GameRecord::default()
            },
        ]
    }

    #[test]
    fn test_snapshot_preserves_records() {
        let dir = TempDir::new().unwrap();
        for name in ["games.jsonl", "games.jsonl.zst"] {
            let path = dir.path().join(name);
            write_snapshot(&path, &sample_games()).unwrap();
            assert_eq!(read_snapshot(&path).unwrap(), sample_games(), "{name}");
        }
    }

    #[test]
    fn test_snapshot_winner_is_lowercase() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("games.jsonl");
        write_snapshot(&path, &sample_games()[..1]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains(r#""winner":"black""#));
        assert!(!text.contains("parse_error"));
    }

    #[test]
    fn test_snapshot_bad_line_reports_line_number() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("games.jsonl");
        std::fs::write(&path, "\n{\"time_control\": \"fast\"}\n").unwrap();

        match read_snapshot(&path).unwrap_err() {
            LoadError::Snapshot { line, .. } => assert_eq!(line, 2),
            other => panic!("expected snapshot error, got {other:?}"),
        }
    }
}
