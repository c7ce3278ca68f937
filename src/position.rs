use shakmaty::fen::Fen;
use shakmaty::{Chess, EnPassantMode, Position, san::SanPlus};

/// Replays `path` from the initial position and returns the resulting FEN.
///
/// Tree paths are opaque tokens, so this is a display aid only: any token that
/// is not a legal SAN move in its position yields `None`.
pub fn fen_after<S: AsRef<str>>(path: &[S]) -> Option<String> {
    let mut pos = Chess::default();
    for token in path {
        let san: SanPlus = token.as_ref().parse().ok()?;
        let m = san.san.to_move(&pos).ok()?;
        pos.play_unchecked(m);
    }
    Some(Fen::from_position(&pos, EnPassantMode::Legal).to_string())
}
