use dirlist_core::{
    DEFAULT_IGNORE_FILETYPES, ExpandConfig, ExpandReport, ExpandWarning, ExpansionMode,
    IgnoreSet, InodeInfo, ItemOptions, MediaEntry, NodeId, NodeKind, Playlist, PlaylistBuilder,
    PlaylistTree,
};
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn test_node_id_operations() {
    let id1 = NodeId::new(42);
    let id2 = NodeId::new(42);

    assert_eq!(id1, id2);
    assert_eq!(id1.0, 42);
}

#[test]
fn test_inode_info() {
    let inode1 = InodeInfo::new(12345, 67890);
    assert_eq!(inode1.inode, 12345);
    assert_eq!(inode1.device, 67890);

    let inode2 = InodeInfo::new(12345, 67890);
    assert_eq!(inode1, inode2);
    assert_ne!(inode1, InodeInfo::new(12345, 1));
}

#[test]
fn test_default_ignore_list() {
    let set = ExpandConfig::default().ignore_set();

    for ext in ["m3u", "db", "nfo", "jpg", "gif", "sfv", "txt", "sub", "idx", "srt", "cue"] {
        assert!(set.contains(ext), "missing {ext}");
    }
    assert_eq!(set.len(), 11);
    assert_eq!(set.iter().collect::<Vec<_>>().join(","), DEFAULT_IGNORE_FILETYPES);
    assert!(!set.should_ignore("song.mp3"));
}

#[test]
fn test_ignore_set_from_spaced_list() {
    let set = IgnoreSet::parse("mp3,  flac ,ogg");
    assert!(set.contains("mp3"));
    // Only leading spaces are trimmed.
    assert!(set.contains("flac "));
    assert!(!set.contains("flac"));
    assert!(set.contains("ogg"));
}

#[test]
fn test_node_kind_discrimination() {
    let container = NodeKind::Container {
        source: None,
        collapsed: false,
    };
    assert!(container.is_container());
    assert!(!container.is_leaf());

    let leaf = NodeKind::Leaf(MediaEntry::from_file("/m", "a.mp3"));
    assert!(leaf.is_leaf());
    assert!(!leaf.is_container());
}

#[test]
fn test_tree_nesting_and_counts() {
    let mut tree = PlaylistTree::new();
    assert!(tree.is_empty());

    let root = tree.create_container("m", None, Some(PathBuf::from("/m")), false);
    let sub = tree.create_container("sub", Some(root), Some(PathBuf::from("/m/sub")), true);
    let leaf = tree.append_leaf(root, MediaEntry::from_file("/m", "a.mp3"));

    assert_eq!(tree.len(), 3);
    assert_eq!(tree.container_count(), 2);
    assert_eq!(tree.leaf_count(), 1);

    let sub_node = tree.node(sub).unwrap();
    assert_eq!(sub_node.parent, Some(root));
    assert!(sub_node.is_collapsed());

    let leaf_node = tree.node(leaf).unwrap();
    assert_eq!(leaf_node.entry().unwrap().uri, "file:///m/a.mp3");
    assert!(tree.node(NodeId::new(99)).is_none());
    assert_eq!(tree.children(NodeId::new(99)).count(), 0);
}

#[test]
fn test_item_options_from_iter() {
    let opts: ItemOptions = vec![":a", ":b"].into_iter().collect();
    assert_eq!(opts.len(), 2);
    assert_eq!(opts.clone().with(":c").iter().last(), Some(":c"));
}

#[test]
fn test_playlist_json_export() {
    let mut tree = PlaylistTree::new();
    let root = tree.create_container("m", None, Some(PathBuf::from("/m")), false);
    tree.append_leaf(
        root,
        MediaEntry::from_file("/m", "a.mp3").with_options_from(&ItemOptions::new().with(":x")),
    );

    let mut report = ExpandReport::default();
    report.stats.entries_added = 1;
    report
        .warnings
        .push(ExpandWarning::recursive_directory("/m/loop"));

    let playlist = Playlist::new(
        tree,
        root,
        PathBuf::from("/m"),
        ExpandConfig::new(ExpansionMode::Collapse),
        report,
        Duration::from_millis(3),
    );

    let json = serde_json::to_value(&playlist).unwrap();
    assert_eq!(json["config"]["recursive"], "collapse");
    assert_eq!(json["report"]["stats"]["entries_added"], 1);
    assert_eq!(json["report"]["warnings"][0]["kind"], "RecursiveDirectory");

    let back: Playlist = serde_json::from_value(json).unwrap();
    assert_eq!(back.tree, playlist.tree);
    assert_eq!(back.uris(), vec!["file:///m/a.mp3"]);
}
