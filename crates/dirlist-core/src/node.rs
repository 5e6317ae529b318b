//! Playlist node and media entry types.

use std::path::PathBuf;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Unique identifier for a node within a playlist tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Create a new NodeId from a u64.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Device/inode identity of a directory, used to detect recursion loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InodeInfo {
    /// Inode number.
    pub inode: u64,
    /// Device ID.
    pub device: u64,
}

impl InodeInfo {
    /// Create new inode info.
    pub fn new(inode: u64, device: u64) -> Self {
        Self { inode, device }
    }
}

/// Options carried by a template item and copied onto every produced entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemOptions(Vec<String>);

impl ItemOptions {
    /// Create an empty option list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an option, keeping insertion order.
    pub fn push(&mut self, option: impl Into<String>) {
        self.0.push(option.into());
    }

    /// Builder-style variant of [`push`](Self::push).
    pub fn with(mut self, option: impl Into<String>) -> Self {
        self.push(option);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy every option of `self` onto `target`, after its own options.
    pub fn copy_onto(&self, target: &mut ItemOptions) {
        target.0.extend(self.0.iter().cloned());
    }
}

impl<S: Into<String>> FromIterator<S> for ItemOptions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A playable file reference produced from a directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaEntry {
    /// `file://` URI of the entry.
    pub uri: String,
    /// Display name (the file name).
    pub name: CompactString,
    /// Options inherited from the template item.
    #[serde(default, skip_serializing_if = "ItemOptions::is_empty")]
    pub options: ItemOptions,
}

impl MediaEntry {
    /// Build a file entry for `name` inside `dir`.
    ///
    /// The URI is a plain concatenation of the directory path and the entry
    /// name; no percent-encoding is applied.
    pub fn from_file(dir: &str, name: impl Into<CompactString>) -> Self {
        let name = name.into();
        Self {
            uri: format!("file://{dir}/{name}"),
            name,
            options: ItemOptions::new(),
        }
    }

    /// Copy the template's options onto this entry.
    pub fn with_options_from(mut self, template: &ItemOptions) -> Self {
        template.copy_onto(&mut self.options);
        self
    }
}

/// Type of playlist node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    /// A directory represented as a container.
    Container {
        /// Directory this container was created from, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<PathBuf>,
        /// Set while the container still awaits expansion.
        #[serde(default)]
        collapsed: bool,
    },
    /// A media file.
    Leaf(MediaEntry),
}

impl NodeKind {
    /// Check if this is a container.
    pub fn is_container(&self) -> bool {
        matches!(self, NodeKind::Container { .. })
    }

    /// Check if this is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, NodeKind::Leaf(_))
    }
}

/// A single container or leaf in the playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistNode {
    /// Unique identifier for this node.
    pub id: NodeId,

    /// Display name.
    pub name: CompactString,

    /// Node type and associated data.
    pub kind: NodeKind,

    /// Parent container, `None` for roots.
    pub parent: Option<NodeId>,

    /// Children in insertion order (containers only).
    pub children: Vec<NodeId>,
}

impl PlaylistNode {
    pub(crate) fn container(
        id: NodeId,
        name: impl Into<CompactString>,
        parent: Option<NodeId>,
        source: Option<PathBuf>,
        collapsed: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind: NodeKind::Container { source, collapsed },
            parent,
            children: Vec::new(),
        }
    }

    pub(crate) fn leaf(id: NodeId, parent: Option<NodeId>, entry: MediaEntry) -> Self {
        Self {
            id,
            name: entry.name.clone(),
            kind: NodeKind::Leaf(entry),
            parent,
            children: Vec::new(),
        }
    }

    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    pub fn is_leaf(&self) -> bool {
        self.kind.is_leaf()
    }

    /// Whether this container was created without being descended into.
    pub fn is_collapsed(&self) -> bool {
        matches!(self.kind, NodeKind::Container { collapsed: true, .. })
    }

    /// Directory this container was created from.
    pub fn source(&self) -> Option<&PathBuf> {
        match &self.kind {
            NodeKind::Container { source, .. } => source.as_ref(),
            NodeKind::Leaf(_) => None,
        }
    }

    /// The media entry, for leaves.
    pub fn entry(&self) -> Option<&MediaEntry> {
        match &self.kind {
            NodeKind::Leaf(entry) => Some(entry),
            NodeKind::Container { .. } => None,
        }
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}
