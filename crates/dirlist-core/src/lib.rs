//! Core types for dirlist.
//!
//! This crate provides the playlist data model produced by directory
//! expansion, together with the expansion configuration, the extension
//! ignore list and the error types shared across the workspace.

mod config;
mod error;
mod ignore;
mod node;
mod tree;

pub use config::{DEFAULT_IGNORE_FILETYPES, ExpandConfig, ExpandConfigBuilder, ExpansionMode};
pub use error::{ExpandError, ExpandWarning, WarningKind};
pub use ignore::{IgnoreSet, extension_of};
pub use node::{InodeInfo, ItemOptions, MediaEntry, NodeId, NodeKind, PlaylistNode};
pub use tree::{ExpandReport, ExpandStats, Playlist, PlaylistBuilder, PlaylistTree};
