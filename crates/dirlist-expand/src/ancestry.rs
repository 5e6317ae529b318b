//! Ancestor chain for recursion loop detection.

use dirlist_core::InodeInfo;

/// One link of the chain of directories above the one being expanded.
///
/// Each recursion level owns its link on the stack and lends it to deeper
/// levels, so the chain is never mutated and never outlives the walk. A
/// directory whose identity already appears in the chain is reachable from
/// itself (through a symlink or bind mount) and must not be expanded again.
#[derive(Debug, Clone, Copy)]
pub struct Ancestry<'a> {
    identity: Option<InodeInfo>,
    parent: Option<&'a Ancestry<'a>>,
}

impl<'a> Ancestry<'a> {
    /// Create a link below `parent`. `identity` is `None` where the platform
    /// has no usable inode numbers; such links never match.
    pub fn new(identity: Option<InodeInfo>, parent: Option<&'a Ancestry<'a>>) -> Self {
        Self { identity, parent }
    }

    pub fn identity(&self) -> Option<InodeInfo> {
        self.identity
    }

    /// Iterate from this link outwards to the root.
    pub fn iter(&self) -> impl Iterator<Item = &Ancestry<'a>> {
        std::iter::successors(Some(self), |link| link.parent)
    }

    /// Check whether `identity` belongs to this link or any link above it.
    pub fn contains(&self, identity: InodeInfo) -> bool {
        self.iter().any(|link| link.identity == Some(identity))
    }

    /// Number of links in the chain.
    pub fn depth(&self) -> usize {
        self.iter().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_walks_to_root() {
        let root = Ancestry::new(Some(InodeInfo::new(1, 1)), None);
        let mid = Ancestry::new(Some(InodeInfo::new(2, 1)), Some(&root));
        let leaf = Ancestry::new(Some(InodeInfo::new(3, 1)), Some(&mid));

        assert!(leaf.contains(InodeInfo::new(1, 1)));
        assert!(leaf.contains(InodeInfo::new(3, 1)));
        assert!(!mid.contains(InodeInfo::new(3, 1)));
        assert_eq!(leaf.depth(), 3);
    }

    #[test]
    fn test_different_devices() {
        let root = Ancestry::new(Some(InodeInfo::new(12345, 1)), None);
        assert!(!root.contains(InodeInfo::new(12345, 2)));
    }

    #[test]
    fn test_unknown_identity_never_matches() {
        let root = Ancestry::new(None, None);
        let child = Ancestry::new(None, Some(&root));
        assert!(!child.contains(InodeInfo::new(0, 0)));
        assert_eq!(child.identity(), None);
    }
}
