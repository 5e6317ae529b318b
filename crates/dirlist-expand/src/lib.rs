//! Directory expansion engine for dirlist.
//!
//! This crate turns a filesystem directory into a playlist tree.
//!
//! # Overview
//!
//! `dirlist-expand` walks a directory depth-first and hands every media file
//! it finds to a [`PlaylistBuilder`]. Key features:
//!
//! - **Loop detection** through an ancestor chain of `(device, inode)` pairs,
//!   so symlinked or bind-mounted cycles terminate
//! - **Subdirectory policy**: expand eagerly, collapse for later, or skip
//! - **Extension filtering** via a case-sensitive ignore list
//! - **Deterministic order** through a pluggable [`Collator`]
//! - **Progress updates** via broadcast channels
//!
//! # Example
//!
//! ```rust,no_run
//! use dirlist_expand::{DirectoryExpander, ExpandConfig};
//!
//! let expander = DirectoryExpander::new(ExpandConfig::default());
//! let playlist = expander.expand("/path/to/music".as_ref()).unwrap();
//!
//! for uri in playlist.uris() {
//!     println!("{uri}");
//! }
//! ```
//!
//! # Collapsed directories
//!
//! With [`ExpansionMode::Collapse`] subdirectories are added as empty
//! containers. Expand one later with
//! [`DirectoryExpander::expand_collapsed`]:
//!
//! ```rust,no_run
//! use dirlist_expand::{DirectoryExpander, ExpandConfig, ExpansionMode, ItemOptions};
//!
//! let expander = DirectoryExpander::new(ExpandConfig::new(ExpansionMode::Collapse));
//! let mut playlist = expander.expand("/path/to/music".as_ref()).unwrap();
//!
//! let collapsed: Vec<_> = playlist
//!     .tree
//!     .children(playlist.root)
//!     .filter(|n| n.is_collapsed())
//!     .map(|n| n.id)
//!     .collect();
//! for id in collapsed {
//!     expander
//!         .expand_collapsed(&mut playlist.tree, id, &ItemOptions::new())
//!         .unwrap();
//! }
//! ```

mod ancestry;
mod collate;
mod expander;
mod handle;
mod progress;

pub use ancestry::Ancestry;
pub use collate::{Collation, Collator};
pub use expander::{DirectoryExpander, ExpandTarget};
pub use handle::{DirEntry, DirHandle, is_not_a_directory};
pub use progress::{ActivityCounter, ActivityGuard, ExpandProgress};

// Re-export core types for convenience
pub use dirlist_core::{
    ExpandConfig, ExpandError, ExpandReport, ExpandStats, ExpandWarning, ExpansionMode, IgnoreSet,
    ItemOptions, MediaEntry, NodeId, NodeKind, Playlist, PlaylistBuilder, PlaylistNode,
    PlaylistTree, WarningKind,
};
