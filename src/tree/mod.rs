//! Prefix tree of move sequences.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. Each node is
//! created once, the first time its prefix is inserted, together with its
//! opening name and its [`NodeStatistics`]; nothing changes afterwards.

use crate::openings::OpeningBook;

use std::error::Error;
use std::fmt;
use std::fmt::Write as _;

mod stats;

pub use stats::{GameIndex, NodeStatistics, TimeControlStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug)]
pub struct MoveTreeNode {
    mv: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    label: Option<String>,
    stats: NodeStatistics,
}

impl MoveTreeNode {
    /// The move leading to this node; empty for the root.
    pub fn mv(&self) -> &str {
        &self.mv
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn stats(&self) -> &NodeStatistics {
        &self.stats
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    EmptyToken { position: usize },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyToken { position } => {
                write!(f, "empty move token at position {}", position)
            }
        }
    }
}

impl Error for TreeError {}

pub struct MoveTree<'a> {
    nodes: Vec<MoveTreeNode>,
    games: &'a GameIndex,
    openings: &'a OpeningBook,
}

impl<'a> MoveTree<'a> {
    const ROOT: NodeId = NodeId(0);

    /// A tree holding only the root, with statistics over every game.
    pub fn new(games: &'a GameIndex, openings: &'a OpeningBook) -> Self {
        let empty: [&str; 0] = [];
        let root = MoveTreeNode {
            mv: String::new(),
            parent: None,
            children: Vec::new(),
            label: openings.get(&empty).map(str::to_string),
            stats: NodeStatistics::compute(games, &empty, None),
        };
        Self {
            nodes: vec![root],
            games,
            openings,
        }
    }

    /// Builds the tree of every sequence in `openings`, in book order.
    pub fn build(games: &'a GameIndex, openings: &'a OpeningBook) -> Result<Self, TreeError> {
        let mut tree = Self::new(games, openings);
        for sequence in openings.sequences() {
            tree.insert_sequence(Self::ROOT, sequence)?;
        }
        log::info!(
            "Built move tree: {} node(s) from {} opening(s)",
            tree.len(),
            openings.len()
        );
        Ok(tree)
    }

    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    pub fn node(&self, id: NodeId) -> &MoveTreeNode {
        &self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// The child of `id` reached by `mv`, if any.
    pub fn child(&self, id: NodeId, mv: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&c| self.node(c).mv == mv)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of moves between the root and `id`.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Inserts `sequence` below `from`, creating the missing nodes, and
    /// returns the node of the full sequence. Re-inserting an existing
    /// sequence creates nothing. Empty tokens are rejected before any node
    /// is created.
    pub fn insert_sequence<S: AsRef<str>>(
        &mut self,
        from: NodeId,
        sequence: &[S],
    ) -> Result<NodeId, TreeError> {
        if let Some(position) = sequence.iter().position(|s| s.as_ref().is_empty()) {
            return Err(TreeError::EmptyToken { position });
        }

        let mut path = self.get_path(from);
        let mut current = from;
        for token in sequence {
            let token = token.as_ref();
            path.push(token.to_string());
            current = match self.child(current, token) {
                Some(existing) => existing,
                None => self.push_child(current, token, &path),
            };
        }
        Ok(current)
    }

    fn push_child(&mut self, parent: NodeId, mv: &str, path: &[String]) -> NodeId {
        let stats = NodeStatistics::compute(self.games, path, Some(&self.node(parent).stats));
        let id = NodeId(self.nodes.len());
        self.nodes.push(MoveTreeNode {
            mv: mv.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            label: self.openings.get(path).map(str::to_string),
            stats,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Resolves the moves after the root; `[]` is the root itself.
    pub fn traverse_path<S: AsRef<str>>(&self, path: &[S]) -> Option<NodeId> {
        path.iter()
            .try_fold(Self::ROOT, |current, mv| self.child(current, mv.as_ref()))
    }

    /// Moves from the root to `id`, root excluded.
    pub fn get_path(&self, id: NodeId) -> Vec<String> {
        let mut path = Vec::with_capacity(self.depth(id));
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            path.push(self.node(current).mv.clone());
            current = parent;
        }
        path.reverse();
        path
    }

    /// Indented view of the subtree at `id`, one node per line. The root
    /// prints as `(Root)`; other nodes as `╚══ move | name`, indented four
    /// spaces per level below `id`.
    pub fn render(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.render_into(id, 0, &mut out);
        out.truncate(out.trim_end().len());
        out
    }

    fn render_into(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = self.node(id);
        if node.is_root() {
            out.push_str("(Root)\n");
        } else {
            let _ = write!(out, "{}╚══ {}", "    ".repeat(depth), node.mv);
            if let Some(label) = &node.label {
                let _ = write!(out, " | {}", label);
            }
            out.push('\n');
        }

        for &child in &node.children {
            self.render_into(child, depth + 1, out);
        }
    }
}
