//! Extension-based ignore list.

use compact_str::CompactString;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Set of file extensions (without the leading dot) to leave out of a
/// playlist. Matching is case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreSet {
    extensions: IndexSet<CompactString>,
}

impl IgnoreSet {
    /// Parse a comma-separated list such as `"m3u, db,nfo"`.
    ///
    /// Leading spaces of each item are dropped; empty items are skipped.
    pub fn parse(list: &str) -> Self {
        let extensions = list
            .split(',')
            .map(|ext| ext.trim_start_matches(' '))
            .filter(|ext| !ext.is_empty())
            .map(CompactString::from)
            .collect();
        Self { extensions }
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.extensions.contains(extension)
    }

    /// Check whether a file name carries an ignored extension.
    ///
    /// The extension is whatever follows the last `.`; a name without one, or
    /// ending in `.`, is never ignored.
    pub fn should_ignore(&self, file_name: &str) -> bool {
        match extension_of(file_name) {
            Some(ext) => self.contains(ext),
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(CompactString::as_str)
    }
}

/// Substring after the last `.`, if non-empty.
pub fn extension_of(file_name: &str) -> Option<&str> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_leading_spaces() {
        let set = IgnoreSet::parse("m3u, db,  nfo");
        let items: Vec<&str> = set.iter().collect();
        assert_eq!(items, vec!["m3u", "db", "nfo"]);
    }

    #[test]
    fn test_parse_keeps_last_item() {
        let set = IgnoreSet::parse("db,cue");
        assert!(set.contains("cue"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_parse_empty() {
        assert!(IgnoreSet::parse("").is_empty());
        assert!(IgnoreSet::parse(" , ,").is_empty());
    }

    #[test]
    fn test_should_ignore_is_case_sensitive() {
        let set = IgnoreSet::parse("db");
        assert!(set.should_ignore("x.db"));
        assert!(!set.should_ignore("x.DB"));
        assert!(!set.should_ignore("db"));
        assert!(!set.should_ignore("x.db."));
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("a.tar.gz"), Some("gz"));
        assert_eq!(extension_of("noext"), None);
        assert_eq!(extension_of("trailing."), None);
    }
}
