//! Recursive directory-to-playlist expansion.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use dirlist_core::{
    ExpandConfig, ExpandError, ExpandReport, ExpandWarning, ExpansionMode, IgnoreSet, ItemOptions,
    MediaEntry, NodeId, Playlist, PlaylistBuilder, PlaylistTree,
};

use crate::ancestry::Ancestry;
use crate::collate::{Collation, Collator};
use crate::handle::{DirHandle, is_not_a_directory};
use crate::progress::{ActivityCounter, ExpandProgress, ProgressTracker};

/// Where the entries of an expanded directory are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandTarget {
    /// Node standing for the directory itself.
    pub parent: NodeId,
    /// Node that receives subdirectory containers and file entries. When
    /// `None`, subdirectories become new root categories and files go to
    /// `parent`.
    pub category: Option<NodeId>,
}

impl ExpandTarget {
    /// Attach everything directly under `node`.
    pub fn node(node: NodeId) -> Self {
        Self {
            parent: node,
            category: Some(node),
        }
    }

    fn entry_parent(&self) -> NodeId {
        self.category.unwrap_or(self.parent)
    }

    fn descend(&self, node: NodeId) -> Self {
        Self {
            parent: node,
            category: self.category.map(|_| node),
        }
    }
}

/// Per-call walk state.
struct Walk<'a, P> {
    playlist: &'a mut P,
    template: &'a ItemOptions,
    ignore: IgnoreSet,
    report: ExpandReport,
    tracker: ProgressTracker,
}

impl<P: PlaylistBuilder> Walk<'_, P> {
    fn warn(&mut self, warning: ExpandWarning) {
        self.tracker.record_warning();
        self.report.warnings.push(warning);
    }
}

/// Expands a directory tree into a playlist.
pub struct DirectoryExpander {
    config: ExpandConfig,
    collator: Arc<dyn Collator>,
    progress_tx: broadcast::Sender<ExpandProgress>,
    activity: ActivityCounter,
}

impl DirectoryExpander {
    /// Create an expander with code point collation.
    pub fn new(config: ExpandConfig) -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self {
            config,
            collator: Arc::new(Collation::default()),
            progress_tx,
            activity: ActivityCounter::new(),
        }
    }

    /// Use `collator` to order directory entries.
    pub fn with_collator(mut self, collator: impl Collator + 'static) -> Self {
        self.collator = Arc::new(collator);
        self
    }

    /// Share an activity counter with the host.
    pub fn with_activity(mut self, activity: ActivityCounter) -> Self {
        self.activity = activity;
        self
    }

    pub fn config(&self) -> &ExpandConfig {
        &self.config
    }

    /// Subscribe to expansion progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ExpandProgress> {
        self.progress_tx.subscribe()
    }

    /// Number of expansions currently running on the shared counter.
    pub fn activity(&self) -> usize {
        self.activity.get()
    }

    /// Expand `root` into a fresh playlist.
    pub fn expand(&self, root: &Path) -> Result<Playlist, ExpandError> {
        self.expand_with(root, &ItemOptions::new())
    }

    /// Expand `root` into a fresh playlist, copying `template` onto every entry.
    pub fn expand_with(&self, root: &Path, template: &ItemOptions) -> Result<Playlist, ExpandError> {
        let start = Instant::now();
        let mut tree = PlaylistTree::new();
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| root.to_string_lossy().to_string());
        let root_id = tree.create_container(&name, None, Some(root.to_path_buf()), false);

        let report = self.expand_into(root, &mut tree, ExpandTarget::node(root_id), template)?;

        Ok(Playlist::new(
            tree,
            root_id,
            root.to_path_buf(),
            self.config.clone(),
            report,
            start.elapsed(),
        ))
    }

    /// Expand `root` into an existing playlist under `target`.
    ///
    /// Entries added before a failure stay in the playlist.
    pub fn expand_into<P: PlaylistBuilder>(
        &self,
        root: &Path,
        playlist: &mut P,
        target: ExpandTarget,
        template: &ItemOptions,
    ) -> Result<ExpandReport, ExpandError> {
        self.run(root, self.config.recursive, playlist, target, template)
    }

    /// Expand a container previously created in collapse mode.
    ///
    /// The container stays collapsed if the walk fails, so it can be retried.
    pub fn expand_collapsed(
        &self,
        tree: &mut PlaylistTree,
        id: NodeId,
        template: &ItemOptions,
    ) -> Result<ExpandReport, ExpandError> {
        let source = tree
            .node(id)
            .filter(|n| n.is_collapsed())
            .and_then(|n| n.source().cloned())
            .ok_or(ExpandError::NotCollapsed { id })?;

        let report =
            self.run(&source, ExpansionMode::Expand, tree, ExpandTarget::node(id), template)?;
        tree.set_collapsed(id, false);
        Ok(report)
    }

    fn run<P: PlaylistBuilder>(
        &self,
        root: &Path,
        mode: ExpansionMode,
        playlist: &mut P,
        target: ExpandTarget,
        template: &ItemOptions,
    ) -> Result<ExpandReport, ExpandError> {
        let _activity = self.activity.enter();

        let mut handle = DirHandle::open(root).map_err(|e| {
            error!(path = %root.display(), "cannot open directory: {e}");
            ExpandError::io(root, e)
        })?;

        info!(path = %root.display(), %mode, "expanding directory");

        let mut walk = Walk {
            playlist,
            template,
            ignore: self.config.ignore_set(),
            report: ExpandReport::default(),
            tracker: ProgressTracker::new(),
        };

        self.read_dir(&mut walk, &mut handle, mode, target, None, 0)?;

        let _ = self.progress_tx.send(walk.tracker.snapshot());
        info!(
            path = %root.display(),
            entries = walk.report.stats.entries_added,
            containers = walk.report.stats.containers_added,
            warnings = walk.report.warnings.len(),
            "directory expanded"
        );

        Ok(walk.report)
    }

    /// Read one directory level and add its content to the playlist.
    fn read_dir<P: PlaylistBuilder>(
        &self,
        walk: &mut Walk<'_, P>,
        dir: &mut DirHandle,
        mode: ExpansionMode,
        target: ExpandTarget,
        ancestry: Option<&Ancestry<'_>>,
        depth: u32,
    ) -> Result<(), ExpandError> {
        let identity = dir.identity().map_err(|e| {
            error!(path = %dir.path().display(), "cannot stat: {e}");
            ExpandError::io(dir.path(), e)
        })?;

        if let (Some(identity), Some(ancestry)) = (identity, ancestry) {
            if ancestry.contains(identity) {
                warn!(path = %dir.path().display(), "ignoring infinitely recursive directory");
                walk.warn(ExpandWarning::recursive_directory(dir.path()));
                return Ok(());
            }
        }

        let link = Ancestry::new(identity, ancestry);

        let entries = dir.entries(self.collator.as_ref()).map_err(|e| {
            error!(path = %dir.path().display(), "cannot read: {e}");
            ExpandError::io(dir.path(), e)
        })?;

        walk.report.stats.record_dir(depth);
        walk.tracker.record_dir(dir.path().to_path_buf());
        let _ = self.progress_tx.send(walk.tracker.snapshot());

        if entries.is_empty() {
            debug!(path = %dir.path().display(), "directory is empty");
            return Ok(());
        }

        for entry in entries {
            if entry.name.starts_with('.') {
                walk.report.stats.hidden_skipped += 1;
                continue;
            }

            let subdir = match DirHandle::open(&entry.path) {
                Ok(handle) => Some(handle),
                Err(e) if is_not_a_directory(&e) => {
                    debug!(path = %entry.path.display(), "skipping non-directory");
                    None
                }
                Err(e) => {
                    warn!(path = %entry.path.display(), "cannot open: {e}");
                    walk.warn(ExpandWarning::open_failed(&entry.path, &e));
                    continue;
                }
            };

            match (subdir, mode) {
                (Some(_), ExpansionMode::None) => {
                    debug!(path = %entry.path.display(), "skipping subdirectory");
                    walk.report.stats.skipped_dirs += 1;
                }
                (Some(subdir), ExpansionMode::Collapse) => {
                    drop(subdir);
                    debug!(path = %entry.path.display(), "adding collapsed subdirectory");
                    walk.playlist.create_container(
                        &entry.name,
                        target.category,
                        Some(entry.path),
                        true,
                    );
                    walk.report.stats.containers_added += 1;
                    walk.tracker.record_container();
                }
                (Some(mut subdir), ExpansionMode::Expand) => {
                    debug!(path = %entry.path.display(), "creating subdirectory");
                    let node = walk.playlist.create_container(
                        &entry.name,
                        target.category,
                        Some(entry.path.clone()),
                        false,
                    );
                    walk.report.stats.containers_added += 1;
                    walk.tracker.record_container();

                    self.read_dir(
                        walk,
                        &mut subdir,
                        ExpansionMode::Expand,
                        target.descend(node),
                        Some(&link),
                        depth + 1,
                    )?;
                }
                (None, _) => {
                    if walk.ignore.should_ignore(&entry.name) {
                        debug!(path = %entry.path.display(), "ignoring file");
                        walk.report.stats.ignored_files += 1;
                        continue;
                    }

                    let media = MediaEntry::from_file(dir.uri_base(), entry.name)
                        .with_options_from(walk.template);
                    walk.playlist.append_leaf(target.entry_parent(), media);
                    walk.report.stats.entries_added += 1;
                    walk.tracker.record_entry();
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("sub")).unwrap();
        fs::create_dir(root.join("sub/deeper")).unwrap();

        fs::write(root.join("a.mp3"), "a").unwrap();
        fs::write(root.join(".hidden.mp3"), "h").unwrap();
        fs::write(root.join("cover.jpg"), "j").unwrap();
        fs::write(root.join("sub/b.mp3"), "b").unwrap();
        fs::write(root.join("sub/deeper/c.ogg"), "c").unwrap();

        temp
    }

    fn child_names(playlist: &Playlist, id: NodeId) -> Vec<String> {
        playlist.tree.children(id).map(|n| n.name.to_string()).collect()
    }

    #[test]
    fn test_basic_expand() {
        let temp = create_test_tree();
        let expander = DirectoryExpander::new(ExpandConfig::default());
        let playlist = expander.expand(temp.path()).unwrap();

        assert_eq!(child_names(&playlist, playlist.root), vec!["a.mp3", "sub"]);
        assert_eq!(playlist.total_entries(), 3);
        assert_eq!(playlist.report.stats.dirs_read, 3);
        assert_eq!(playlist.report.stats.max_depth, 2);
        assert_eq!(playlist.report.stats.hidden_skipped, 1);
        assert_eq!(playlist.report.stats.ignored_files, 1);
        assert!(!playlist.report.has_warnings());
    }

    #[test]
    fn test_target_without_category() {
        let temp = create_test_tree();
        let expander = DirectoryExpander::new(ExpandConfig::default());

        let mut tree = PlaylistTree::new();
        let item = tree.create_container("item", None, None, false);
        let target = ExpandTarget {
            parent: item,
            category: None,
        };
        expander
            .expand_into(temp.path(), &mut tree, target, &ItemOptions::new())
            .unwrap();

        // Subdirectories become their own root categories.
        let roots: Vec<&str> = tree
            .roots()
            .iter()
            .map(|id| tree.node(*id).unwrap().name.as_str())
            .collect();
        assert_eq!(roots, vec!["item", "sub", "deeper"]);

        let names: Vec<&str> = tree.children(item).map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["a.mp3"]);
        let sub = tree.roots()[1];
        let names: Vec<&str> = tree.children(sub).map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["b.mp3"]);
    }

    #[test]
    fn test_missing_root() {
        let temp = TempDir::new().unwrap();
        let expander = DirectoryExpander::new(ExpandConfig::default());
        let err = expander.expand(&temp.path().join("missing")).unwrap_err();
        assert!(matches!(err, ExpandError::NotFound { .. }));
        assert_eq!(expander.activity(), 0);
    }

    #[test]
    fn test_progress_is_broadcast() {
        let temp = create_test_tree();
        let expander = DirectoryExpander::new(ExpandConfig::default());
        let mut rx = expander.subscribe();

        expander.expand(temp.path()).unwrap();

        let mut last = None;
        while let Ok(progress) = rx.try_recv() {
            last = Some(progress);
        }
        let last = last.unwrap();
        assert_eq!(last.dirs_read, 3);
        assert_eq!(last.entries_added, 3);
        assert_eq!(last.containers_added, 2);
    }
}
