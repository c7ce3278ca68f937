use smallvec::SmallVec;
use std::ops::ControlFlow;

use pgn_reader::{Nag, RawComment, Reader, SanPlus, Skip, Visitor};

/// Most opening lines fit inline.
pub type MoveList = SmallVec<[String; 16]>;

/// Mainline-only handling shared by every visitor in the crate: comments,
/// NAGs and variations never reach the move list.
#[macro_export]
macro_rules! pgn_visitor_skip_variations {
    () => {
        fn nag(&mut self, _: &mut Self::Movetext, _: Nag) -> ControlFlow<Self::Output> {
            ControlFlow::Continue(())
        }

        fn comment(
            &mut self,
            _: &mut Self::Movetext,
            _: RawComment<'_>,
        ) -> ControlFlow<Self::Output> {
            ControlFlow::Continue(())
        }

        fn partial_comment(
            &mut self,
            _: &mut Self::Movetext,
            _: RawComment<'_>,
        ) -> ControlFlow<Self::Output> {
            ControlFlow::Continue(())
        }

        fn begin_variation(&mut self, _: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
            ControlFlow::Continue(Skip(true))
        }
    };
}

/// Collects the SAN tokens of one movetext; the outcome marker is dropped.
struct MainlineVisitor;

impl Visitor for MainlineVisitor {
    type Tags = ();
    type Movetext = MoveList;
    type Output = MoveList;

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, _: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        ControlFlow::Continue(MoveList::new())
    }

    fn san(&mut self, moves: &mut Self::Movetext, san: SanPlus) -> ControlFlow<Self::Output> {
        moves.push(san.to_string());
        ControlFlow::Continue(())
    }

    pgn_visitor_skip_variations!();

    fn end_game(&mut self, moves: Self::Movetext) -> Self::Output {
        moves
    }
}

/// Mainline SAN tokens of a bare movetext such as `1. e4 e5 2. Nf3 Nc6`.
/// Move numbers, annotations and variations are dropped. `None` when the
/// text cannot be read as PGN.
pub fn mainline_sans(movetext: &str) -> Option<MoveList> {
    if movetext.trim().is_empty() {
        return Some(MoveList::new());
    }

    Reader::new(movetext.as_bytes())
        .read_game(&mut MainlineVisitor)
        .ok()
        .flatten()
}
