//! Playlist tree container, builder trait and statistics.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::config::ExpandConfig;
use crate::error::ExpandWarning;
use crate::node::{MediaEntry, NodeId, NodeKind, PlaylistNode};

/// Sink that receives the containers and leaves produced by an expansion.
///
/// Children are appended in the order they are created; implementations must
/// preserve that order.
pub trait PlaylistBuilder {
    /// Create a container named `name` under `parent`, or a new root category
    /// when `parent` is `None`.
    fn create_container(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
        source: Option<PathBuf>,
        collapsed: bool,
    ) -> NodeId;

    /// Append a media leaf to `parent`.
    fn append_leaf(&mut self, parent: NodeId, entry: MediaEntry) -> NodeId;
}

/// Arena-backed playlist tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistTree {
    nodes: Vec<PlaylistNode>,
    roots: Vec<NodeId>,
}

impl PlaylistTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> NodeId {
        NodeId::new(self.nodes.len() as u64)
    }

    /// `parent` if it names an existing container, otherwise `None`.
    fn resolve_parent(&self, parent: Option<NodeId>) -> Option<NodeId> {
        parent.filter(|p| self.node(*p).is_some_and(PlaylistNode::is_container))
    }

    /// Push a node whose parent was already resolved.
    fn attach(&mut self, node: PlaylistNode) -> NodeId {
        let id = node.id;
        match node.parent {
            Some(parent) => self.nodes[parent.index()].children.push(id),
            None => self.roots.push(id),
        }
        self.nodes.push(node);
        id
    }

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> Option<&PlaylistNode> {
        self.nodes.get(id.index())
    }

    /// Direct children of `id`, in playlist order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &PlaylistNode> {
        self.node(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|c| self.node(*c))
    }

    /// Top-level categories.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    pub fn container_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_container()).count()
    }

    /// Mark or unmark a container as collapsed. Leaves are left untouched.
    pub fn set_collapsed(&mut self, id: NodeId, value: bool) {
        if let Some(NodeKind::Container { collapsed, .. }) =
            self.nodes.get_mut(id.index()).map(|n| &mut n.kind)
        {
            *collapsed = value;
        }
    }

    /// Depth-first pre-order walk of the subtree rooted at `id`.
    ///
    /// Yields `(depth, node)` pairs, the start node at depth 0.
    pub fn walk(&self, id: NodeId) -> Vec<(u32, &PlaylistNode)> {
        let mut out = Vec::new();
        let mut stack = vec![(0u32, id)];

        while let Some((depth, id)) = stack.pop() {
            let Some(node) = self.node(id) else { continue };
            out.push((depth, node));
            for child in node.children.iter().rev() {
                stack.push((depth + 1, *child));
            }
        }

        out
    }

    /// Leaf URIs below `id`, in playlist order.
    pub fn uris(&self, id: NodeId) -> Vec<&str> {
        self.walk(id)
            .into_iter()
            .filter_map(|(_, n)| n.entry().map(|e| e.uri.as_str()))
            .collect()
    }
}

impl PlaylistBuilder for PlaylistTree {
    fn create_container(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
        source: Option<PathBuf>,
        collapsed: bool,
    ) -> NodeId {
        let parent = self.resolve_parent(parent);
        let node = PlaylistNode::container(self.next_id(), name, parent, source, collapsed);
        self.attach(node)
    }

    /// A leaf whose parent is not a container becomes a root.
    fn append_leaf(&mut self, parent: NodeId, entry: MediaEntry) -> NodeId {
        let parent = self.resolve_parent(Some(parent));
        let node = PlaylistNode::leaf(self.next_id(), parent, entry);
        self.attach(node)
    }
}

/// Counters collected during an expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandStats {
    /// Directories whose entries were listed.
    pub dirs_read: u64,
    /// Containers created (expanded or collapsed).
    pub containers_added: u64,
    /// Leaves appended.
    pub entries_added: u64,
    /// Hidden entries skipped.
    pub hidden_skipped: u64,
    /// Files skipped because of their extension.
    pub ignored_files: u64,
    /// Subdirectories skipped in `none` mode.
    pub skipped_dirs: u64,
    /// Deepest recursion level reached (root = 0).
    pub max_depth: u32,
}

impl ExpandStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_dir(&mut self, depth: u32) {
        self.dirs_read += 1;
        self.max_depth = self.max_depth.max(depth);
    }
}

/// Outcome of an expansion call: statistics plus non-fatal warnings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpandReport {
    pub stats: ExpandStats,
    pub warnings: Vec<ExpandWarning>,
}

impl ExpandReport {
    /// Check if there were any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A fully expanded directory playlist with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    /// The produced tree.
    pub tree: PlaylistTree,

    /// Container representing the expanded directory.
    pub root: NodeId,

    /// Directory that was expanded.
    pub root_path: PathBuf,

    /// When the expansion was performed.
    pub expanded_at: SystemTime,

    /// Duration of the expansion.
    pub duration: Duration,

    /// Configuration used.
    pub config: ExpandConfig,

    /// Statistics and warnings.
    pub report: ExpandReport,
}

impl Playlist {
    pub fn new(
        tree: PlaylistTree,
        root: NodeId,
        root_path: PathBuf,
        config: ExpandConfig,
        report: ExpandReport,
        duration: Duration,
    ) -> Self {
        Self {
            tree,
            root,
            root_path,
            expanded_at: SystemTime::now(),
            duration,
            config,
            report,
        }
    }

    /// Leaf URIs in playlist order.
    pub fn uris(&self) -> Vec<&str> {
        self.tree.uris(self.root)
    }

    pub fn total_entries(&self) -> usize {
        self.tree.leaf_count()
    }
}
