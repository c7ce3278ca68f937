//! Named openings keyed by their move sequence.
//!
//! Reads the Lichess `chess-openings` tables: `a.tsv` … `e.tsv`, each with a
//! header row followed by `eco`, `name` and `pgn` columns.

use crate::error::LoadError;
use crate::movetext::mainline_sans;

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

pub const TABLE_FILES: [&str; 5] = ["a.tsv", "b.tsv", "c.tsv", "d.tsv", "e.tsv"];

/// Opening names in first-seen order. A repeated sequence keeps its
/// position but takes the later name.
#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    entries: Vec<(Vec<String>, String)>,
    index: HashMap<Vec<String>, usize>,
}

impl OpeningBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, sequence: Vec<String>, name: String) {
        match self.index.get(&sequence) {
            Some(&idx) => self.entries[idx].1 = name,
            None => {
                self.index.insert(sequence.clone(), self.entries.len());
                self.entries.push((sequence, name));
            }
        }
    }

    pub fn get<S: AsRef<str>>(&self, sequence: &[S]) -> Option<&str> {
        let key: Vec<String> = sequence.iter().map(|s| s.as_ref().to_string()).collect();
        self.index
            .get(&key)
            .map(|&idx| self.entries[idx].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sequences(&self) -> impl Iterator<Item = &[String]> {
        self.entries.iter().map(|(seq, _)| seq.as_slice())
    }

    /// Adds every row of one TSV table. Rows longer than `max_moves` plies,
    /// rows with fewer than three columns and rows whose `pgn` is unreadable
    /// or holds no move are skipped.
    pub fn extend_from_tsv<R: Read>(
        &mut self,
        input: R,
        max_moves: Option<usize>,
        source: &str,
    ) -> io::Result<usize> {
        let mut added = 0;
        for (idx, line) in BufReader::new(input).lines().enumerate() {
            let line = line?;
            // header
            if idx == 0 || line.trim().is_empty() {
                continue;
            }

            let mut columns = line.split('\t');
            let (Some(_eco), Some(name), Some(pgn)) =
                (columns.next(), columns.next(), columns.next())
            else {
                log::warn!("{}:{}: expected eco, name and pgn columns", source, idx + 1);
                continue;
            };

            let Some(sans) = mainline_sans(pgn) else {
                log::warn!("{}:{}: unreadable pgn '{}'", source, idx + 1, pgn);
                continue;
            };
            if sans.is_empty() {
                log::warn!("{}:{}: no moves in pgn '{}'", source, idx + 1, pgn);
                continue;
            }
            if max_moves.is_some_and(|max| sans.len() > max) {
                continue;
            }

            self.insert(sans.into_vec(), name.to_string());
            added += 1;
        }
        Ok(added)
    }

    /// Loads `a.tsv` … `e.tsv` from `dir`. A missing table is only a warning.
    pub fn load_dir(dir: &Path, max_moves: Option<usize>) -> Result<Self, LoadError> {
        let mut book = Self::new();
        for file_name in TABLE_FILES {
            let path = dir.join(file_name);
            let file = match File::open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::warn!("Opening table '{}' not found, skipping", path.display());
                    continue;
                }
                Err(source) => return Err(LoadError::Io { path, source }),
            };

            let added = book
                .extend_from_tsv(file, max_moves, &path.display().to_string())
                .map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })?;
            log::debug!("{}: {} opening(s)", path.display(), added);
        }

        log::info!("Loaded {} opening(s) from '{}'", book.len(), dir.display());
        Ok(book)
    }
}

impl FromIterator<(Vec<String>, String)> for OpeningBook {
    fn from_iter<I: IntoIterator<Item = (Vec<String>, String)>>(iter: I) -> Self {
        let mut book = Self::new();
        for (sequence, name) in iter {
            book.insert(sequence, name);
        }
        book
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TABLE_A: &str = "eco\tname\tpgn\n\
A00\tAmar Opening\t1. Nh3\n\
A40\tQueen's Pawn Game\t1. d4\n\
A84\tDutch Defense: Classical Variation\t1. d4 f5 2. c4 Nf6 3. g3 e6 4. Bg2 Be7 5. Nf3 O-O 6. O-O d5\n";

    #[test]
    fn test_tsv_rows_become_sequences() {
        let mut book = OpeningBook::new();
        let added = book.extend_from_tsv(TABLE_A.as_bytes(), None, "a.tsv").unwrap();

        assert_eq!(added, 3);
        assert_eq!(book.get(&["d4"]), Some("Queen's Pawn Game"));
        assert_eq!(
            book.get(&[
                "d4", "f5", "c4", "Nf6", "g3", "e6", "Bg2", "Be7", "Nf3", "O-O", "O-O", "d5"
            ]),
            Some("Dutch Defense: Classical Variation")
        );
        assert_eq!(book.get(&["e4"]), None);
    }

    #[test]
    fn test_max_moves_drops_long_lines() {
        let mut book = OpeningBook::new();
        book.extend_from_tsv(TABLE_A.as_bytes(), Some(1), "a.tsv").unwrap();

        assert_eq!(book.len(), 2);
        assert_eq!(book.get(&["Nh3"]), Some("Amar Opening"));
    }

    #[test]
    fn test_later_duplicate_overwrites_name_keeps_order() {
        let book: OpeningBook = [
            (vec!["e4".to_string()], "King's Pawn".to_string()),
            (vec!["d4".to_string()], "Queen's Pawn".to_string()),
            (vec!["e4".to_string()], "King's Pawn Game".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(book.len(), 2);
        assert_eq!(book.get(&["e4"]), Some("King's Pawn Game"));
        let order: Vec<&[String]> = book.sequences().collect();
        assert_eq!(order[0], ["e4".to_string()]);
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let mut book = OpeningBook::new();
        let added = book
            .extend_from_tsv("eco\tname\tpgn\nB00\tbroken\n".as_bytes(), None, "b.tsv")
            .unwrap();
        assert_eq!(added, 0);
        assert!(book.is_empty());
    }

    #[test]
    fn test_rows_without_moves_are_skipped() {
        let mut book = OpeningBook::new();
        let table = "eco\tname\tpgn\n\
A00\tBlank\t\n\
A00\tNumbers Only\t1. 2.\n\
A00\tGrob Opening\t1. g4\n";
        let added = book.extend_from_tsv(table.as_bytes(), None, "a.tsv").unwrap();

        assert_eq!(added, 1);
        let empty: [&str; 0] = [];
        assert_eq!(book.get(&empty), None);
        assert_eq!(book.get(&["g4"]), Some("Grob Opening"));
    }

    #[test]
    fn test_load_dir_tolerates_missing_tables() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.tsv"), TABLE_A).unwrap();
        std::fs::write(
            dir.path().join("c.tsv"),
            "eco\tname\tpgn\nC20\tKing's Pawn Game\t1. e4 e5\n",
        )
        .unwrap();

        let book = OpeningBook::load_dir(dir.path(), None).unwrap();
        assert_eq!(book.len(), 4);
        assert_eq!(book.get(&["e4", "e5"]), Some("King's Pawn Game"));
    }
}
