//! Interactive session over a built [`MoveTree`].
//!
//! The session walks the tree like a filesystem: `ls` lists the moves from
//! the current position, `cd` follows them, `stats` prints the aggregates of
//! the current node. Several sessions may share one tree.

use crate::tree::{MoveTree, NodeId};

mod command;
pub mod display;

pub use command::{Command, CommandError, ListOrder};

use command::parse_time_control;
use std::cmp::Ordering;

pub struct Navigator<'t, 'a> {
    tree: &'t MoveTree<'a>,
    home: NodeId,
    current: NodeId,
    current_path: Vec<String>,
    default_time_control: Option<u32>,
}

impl<'t, 'a> Navigator<'t, 'a> {
    /// A session positioned at `home`, which `cd ~` returns to.
    pub fn new(tree: &'t MoveTree<'a>, home: NodeId, default_time_control: Option<u32>) -> Self {
        Self {
            tree,
            home,
            current: home,
            current_path: tree.get_path(home),
            default_time_control,
        }
    }

    /// A session at the root of `tree`.
    pub fn at_root(tree: &'t MoveTree<'a>, default_time_control: Option<u32>) -> Self {
        Self::new(tree, tree.root(), default_time_control)
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn current_path(&self) -> &[String] {
        &self.current_path
    }

    pub fn default_time_control(&self) -> Option<u32> {
        self.default_time_control
    }

    /// `/` followed by the current path, e.g. `/e4/e5`.
    pub fn prompt(&self) -> String {
        format!("/{}", self.current_path.join("/"))
    }

    /// Parses and runs one input line. A blank line does nothing.
    pub fn handle_line(&mut self, line: &str) -> Result<Option<String>, CommandError> {
        match Command::parse(line)? {
            Some(command) => self.execute(command).map(Some),
            None => Ok(None),
        }
    }

    /// Runs `command` and returns its output. An error leaves the session
    /// unchanged.
    pub fn execute(&mut self, command: Command) -> Result<String, CommandError> {
        match command {
            Command::List(order) => Ok(self.list(order)),
            Command::ChangeDir(path) => self.change_dir(&path).map(|()| String::new()),
            Command::Stats(param) => self.stats(param.as_deref()),
            Command::SetTimeControl(tc) => {
                self.default_time_control = Some(tc);
                Ok(format!("Set global timecontrol to {}.", tc))
            }
            Command::Tree => Ok(self.tree.render(self.current)),
            Command::Help => Ok(display::help_text()),
            Command::TimeControls => Ok(display::time_controls_text()),
        }
    }

    fn list(&self, order: ListOrder) -> String {
        let tc = self.default_time_control;
        let play_rate =
            |id: &NodeId| tc.map_or(0.0, |tc| self.tree.node(*id).stats().play_rate(tc));
        let by_rate = |a: &NodeId, b: &NodeId| {
            play_rate(a)
                .partial_cmp(&play_rate(b))
                .unwrap_or(Ordering::Equal)
        };

        let mut moves = self.tree.children(self.current).to_vec();
        match order {
            ListOrder::Insertion => {}
            ListOrder::Ascending => moves.sort_by(by_rate),
            ListOrder::Descending => moves.sort_by(|a, b| by_rate(b, a)),
            ListOrder::Played => moves.retain(|id| play_rate(id) != 0.0),
        }
        display::move_table(self.tree, &moves, tc)
    }

    /// Resolves every segment before moving, so a bad segment anywhere in
    /// the path leaves the session where it was.
    fn change_dir(&mut self, param: &str) -> Result<(), CommandError> {
        let mut node = self.current;
        let mut path = self.current_path.clone();
        let fail = || CommandError::Navigation(param.to_string());

        for segment in param.split('/') {
            match segment {
                "" => {}
                "~" => {
                    node = self.home;
                    path = self.tree.get_path(self.home);
                }
                ".." => {
                    node = self.tree.parent(node).ok_or_else(fail)?;
                    path.pop();
                }
                mv => {
                    node = self.tree.child(node, mv).ok_or_else(fail)?;
                    path.push(mv.to_string());
                }
            }
        }

        self.current = node;
        self.current_path = path;
        Ok(())
    }

    /// The argument wins when it is a positive integer; otherwise the
    /// session default is used, with a note when an argument was ignored.
    fn stats(&self, param: Option<&str>) -> Result<String, CommandError> {
        let (tc, note) = match (parse_time_control(param), param, self.default_time_control) {
            (Some(tc), _, _) => (tc, None),
            (None, None, Some(default)) => (default, None),
            (None, Some(bad), Some(default)) => (
                default,
                Some(format!(
                    "stats: Ignoring time control '{}', using {}",
                    bad, default
                )),
            ),
            (None, param, None) => {
                return Err(CommandError::NoTimeControl(param.map(str::to_string)));
            }
        };

        let report = display::stats_report(self.tree, self.current, &self.current_path, tc);
        Ok(match note {
            Some(note) => format!("{}\n{}", note, report),
            None => report,
        })
    }
}
