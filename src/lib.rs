//! Opening explorer over a collection of played chess games.
//!
//! Games are read from PGN (see [`reader`]), reduced to [`types::GameRecord`]s
//! and indexed by time control. The named openings of an [`openings::OpeningBook`]
//! are inserted into a [`tree::MoveTree`] whose nodes carry per-time-control
//! result and play rates, and a [`navigator::Navigator`] walks that tree with a
//! small shell-like command language.

pub mod error;
pub mod movetext;
pub mod navigator;
pub mod openings;
pub mod position;
pub mod reader;
pub mod snapshot;
pub mod timecontrol;
pub mod tree;
pub mod types;
pub mod visitor;
