use crate::position::fen_after;
use crate::timecontrol::Speed;
use crate::tree::{MoveTree, NodeId};
use crate::types::Winner;

use std::fmt::Write as _;

const PADDING_RATES: usize = 12;
const PADDING_NEXT_MOVE: usize = 12;
const PADDING_COMMAND: usize = 25;
const PADDING_RESULT: usize = 12;

pub const NO_MORE_MOVES: &str = "There's no more moves to list...";

/// Hint only; not derived from the loaded games.
pub const SUPPORTED_TIME_CONTROLS: [u32; 4] = [60, 180, 300, 600];

const HELP_ENTRIES: [(&str, &str); 8] = [
    (
        "ls [asc|desc|played]",
        "List common moves from the current position. Optional filters based on playrate.",
    ),
    ("cd (move)", "Move to the position after a specified move"),
    ("cd ..", "Move back to the previous position"),
    ("stats [tc]", "Display result rates for the current position"),
    ("help", "Display the help menu"),
    ("settc (tc)", "Set the global time control"),
    ("timecontrols", "Display the time controls available"),
    ("tree", "Display the move tree constructed"),
];

/// `0.7321` → `73.21%`.
pub fn percentify(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

pub fn display_name(label: Option<&str>) -> &str {
    label.unwrap_or("(None)")
}

/// The `ls` table. Rates for an unset time control read as zero.
pub fn move_table(tree: &MoveTree<'_>, moves: &[NodeId], tc: Option<u32>) -> String {
    if moves.is_empty() {
        return NO_MORE_MOVES.to_string();
    }

    let mut out = format!(
        "{:<w$}{:<r$}{:<r$}{:<r$}{:<r$}{}",
        "NEXT MOVE",
        "PLAYRATE",
        "WHITE WIN",
        "BLACK WIN",
        "DRAW",
        "NAME",
        w = PADDING_NEXT_MOVE,
        r = PADDING_RATES,
    );

    for &id in moves {
        let node = tree.node(id);
        let stats = node.stats();
        let rate = |winner: Winner| tc.map_or(0.0, |tc| stats.outcome_rate(tc, winner));
        let _ = write!(
            out,
            "\n{:<w$}{:<r$}{:<r$}{:<r$}{:<r$}{}",
            node.mv(),
            percentify(tc.map_or(0.0, |tc| stats.play_rate(tc))),
            percentify(rate(Winner::White)),
            percentify(rate(Winner::Black)),
            percentify(rate(Winner::Draw)),
            display_name(node.label()),
            w = PADDING_NEXT_MOVE,
            r = PADDING_RATES,
        );
    }
    out
}

/// The `stats` report for `id` at `tc`.
pub fn stats_report(tree: &MoveTree<'_>, id: NodeId, path: &[String], tc: u32) -> String {
    let node = tree.node(id);
    let mut lines = vec![
        node.label().unwrap_or("Not an opening").to_string(),
        format!("Move sequence: {:?}", path),
    ];
    if let Some(fen) = fen_after(path) {
        lines.push(format!("FEN: {}", fen));
    }
    lines.push(format!("Chosen Timecontrol: {}", tc));

    let Some(stats) = node.stats().get(tc) else {
        lines.push(format!("<NO DATA FOR TC {} SECONDS>", tc));
        return lines.join("\n");
    };

    lines.push(format!(
        "{:>p$}{:>p$}",
        "GAME RESULT",
        "PERCENT",
        p = PADDING_RESULT
    ));
    for winner in Winner::DECIDED {
        lines.push(format!(
            "{:>p$}{:>p$}",
            winner.as_str(),
            percentify(stats.outcome_rate(winner)),
            p = PADDING_RESULT
        ));
    }
    lines.push(format!("PLAYS: {}", stats.plays));
    if !node.is_root() {
        lines.push(format!(
            "Players played this {} of the time after the previous move.",
            percentify(stats.play_rate)
        ));
    }
    lines.join("\n")
}

pub fn help_text() -> String {
    let mut out = String::from(
        "Note: tc means time control (game duration in seconds). [] is optional parameter. () is required.\nCommands:",
    );
    for (usage, description) in HELP_ENTRIES {
        let _ = write!(out, "\n  {:<w$}- {}", usage, description, w = PADDING_COMMAND);
    }
    out
}

pub fn time_controls_text() -> String {
    let listed: Vec<String> = SUPPORTED_TIME_CONTROLS
        .iter()
        .map(|&tc| format!("{} sec ({})", tc, Speed::from_clock(tc, 0)))
        .collect();
    format!("Time controls available: {}", listed.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentify_two_decimals() {
        assert_eq!(percentify(0.7321), "73.21%");
        assert_eq!(percentify(0.0), "0.00%");
        assert_eq!(percentify(1.0), "100.00%");
        assert_eq!(percentify(2.0 / 3.0), "66.67%");
    }

    #[test]
    fn test_display_name_placeholder() {
        assert_eq!(display_name(None), "(None)");
        assert_eq!(display_name(Some("Dutch Defense")), "Dutch Defense");
    }

    #[test]
    fn test_help_lists_every_command() {
        let help = help_text();
        assert!(help.starts_with("Note: tc means time control"));
        assert!(help.contains("\n  ls [asc|desc|played]     - List common moves"));
        for usage in ["cd (move)", "cd ..", "stats [tc]", "settc (tc)", "timecontrols", "tree"] {
            assert!(help.contains(usage), "{usage}");
        }
    }

    #[test]
    fn test_time_controls_text() {
        assert_eq!(
            time_controls_text(),
            "Time controls available: 60 sec (bullet), 180 sec (blitz), 300 sec (blitz), 600 sec (rapid)"
        );
    }
}
