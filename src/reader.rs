use crate::error::LoadError;
use crate::snapshot;
use crate::types::GameRecord;
use crate::visitor::{GameVisitor, ReadOutcome, next_game};

use pgn_reader::Reader;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use zstd::stream::read::Decoder as ZstdDecoder;

type PgnInput = Box<dyn Read>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// Decompress files whose name ends in `.zst`, read the rest as-is.
    #[default]
    Auto,
    Plain,
    Zstd,
}

impl Compression {
    pub fn parse(raw: &str) -> Result<Self, String> {
        let normalized = raw.trim();
        if normalized.eq_ignore_ascii_case("auto") {
            Ok(Self::Auto)
        } else if normalized.eq_ignore_ascii_case("plain") {
            Ok(Self::Plain)
        } else if normalized.eq_ignore_ascii_case("zstd") {
            Ok(Self::Zstd)
        } else {
            Err(format!(
                "Invalid compression value '{}'. Supported values: 'auto', 'plain' or 'zstd'.",
                normalized
            ))
        }
    }

    pub(crate) fn applies_to(self, path: &Path) -> bool {
        match self {
            Self::Auto => has_extension(path, "zst"),
            Self::Plain => false,
            Self::Zstd => true,
        }
    }
}

impl FromStr for Compression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Plain => "plain",
            Self::Zstd => "zstd",
        })
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// `games.jsonl` and `games.jsonl.zst` are snapshots rather than PGN.
fn is_snapshot(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    name.ends_with(".jsonl") || name.ends_with(".jsonl.zst")
}

/// Expands each pattern into concrete paths. Plain paths are kept even when
/// they do not exist so that opening them reports a proper I/O error.
pub fn expand_inputs<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>, LoadError> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        if pattern.contains('*') || pattern.contains('?') {
            let matched: Vec<PathBuf> = glob::glob(pattern)?
                .filter_map(|entry| entry.ok())
                .collect();
            if matched.is_empty() {
                log::warn!("No input files match '{}'", pattern);
            }
            paths.extend(matched);
        } else {
            paths.push(PathBuf::from(pattern));
        }
    }

    if paths.is_empty() {
        let joined = patterns
            .iter()
            .map(|p| p.as_ref())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(LoadError::NoInput(joined));
    }
    Ok(paths)
}

pub(crate) fn open_input_stream(
    path: &Path,
    compression: Compression,
) -> Result<PgnInput, LoadError> {
    let io_error = |source: io::Error| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(io_error)?;

    if compression.applies_to(path) {
        ZstdDecoder::new(file)
            .map(|decoder| Box::new(decoder) as PgnInput)
            .map_err(io_error)
    } else {
        Ok(Box::new(file))
    }
}

/// Reads every game of a PGN stream. Games without a usable clock are
/// skipped; a stream failure ends the read but keeps what was already parsed.
pub fn read_pgn<R: Read>(input: R, source: &str) -> Vec<GameRecord> {
    // pgn-reader buffers internally, so no extra BufReader here.
    let mut reader = Reader::new(input);
    let mut visitor = GameVisitor::new();
    let mut games = Vec::new();
    let mut skipped = 0usize;
    let mut game_index = 0usize;

    loop {
        match next_game(&mut reader, &mut visitor) {
            ReadOutcome::Game(game) => {
                if let Some(error) = &game.parse_error {
                    log::debug!("{}: game {}: {}", source, game_index, error);
                }
                games.push(game);
            }
            ReadOutcome::Skipped(reason) => {
                log::debug!("{}: skipping game {}: {}", source, game_index, reason);
                skipped += 1;
            }
            ReadOutcome::Failed(error) => {
                log::warn!("{}: stopped at game {}: {}", source, game_index, error);
                break;
            }
            ReadOutcome::Finished => break,
        }
        game_index += 1;
    }

    if skipped > 0 {
        log::warn!(
            "{}: skipped {} game(s) without a usable TimeControl",
            source,
            skipped
        );
    }
    log::info!("{}: read {} game(s)", source, games.len());
    games
}

fn read_one(path: &Path, compression: Compression) -> Result<Vec<GameRecord>, LoadError> {
    if is_snapshot(path) {
        return snapshot::read_snapshot(path);
    }
    let input = open_input_stream(path, compression)?;
    Ok(read_pgn(input, &path.display().to_string()))
}

/// Loads games from every input matching `patterns`, in order. With a single
/// input a failure is fatal; with several, unreadable inputs are skipped.
pub fn read_games<S: AsRef<str>>(
    patterns: &[S],
    compression: Compression,
) -> Result<Vec<GameRecord>, LoadError> {
    let paths = expand_inputs(patterns)?;
    let mut games = Vec::new();

    for path in &paths {
        match read_one(path, compression) {
            Ok(mut loaded) => games.append(&mut loaded),
            Err(err) if paths.len() == 1 => return Err(err),
            Err(err) => log::warn!("{}", err),
        }
    }

    Ok(games)
}
