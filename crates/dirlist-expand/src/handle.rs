//! Open directory handles.

use std::fs::ReadDir;
use std::io;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

use compact_str::CompactString;
use tracing::trace;

use dirlist_core::InodeInfo;

use crate::collate::Collator;

/// A directory entry as listed by [`DirHandle::entries`].
#[derive(Debug, Clone)]
pub struct DirEntry {
    /// File name, lossily converted for display and URIs.
    pub name: CompactString,
    /// Full path, built from the raw file name.
    pub path: PathBuf,
}

/// An open directory.
///
/// The underlying OS handle is released when the value is dropped, so every
/// exit path of the code that opened it closes it.
#[derive(Debug)]
pub struct DirHandle {
    path: PathBuf,
    uri_base: String,
    reader: ReadDir,
}

impl DirHandle {
    /// Open `path` as a directory.
    ///
    /// Fails with [`io::ErrorKind::NotADirectory`] when `path` exists but is
    /// not a directory; see [`is_not_a_directory`].
    pub fn open(path: &Path) -> io::Result<Self> {
        trace!(path = %path.display(), "opening directory");
        let reader = std::fs::read_dir(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            uri_base: uri_base(path),
            reader,
        })
    }

    /// Path this handle was opened with.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path prefix used to build entry URIs, without trailing separator.
    pub fn uri_base(&self) -> &str {
        &self.uri_base
    }

    /// Device/inode identity of the directory.
    ///
    /// Returns `Ok(None)` on platforms without meaningful inode numbers.
    pub fn identity(&self) -> io::Result<Option<InodeInfo>> {
        let metadata = std::fs::metadata(&self.path)?;
        Ok(identity_of(&metadata))
    }

    /// Read every remaining entry and sort them with `collator`.
    pub fn entries(&mut self, collator: &dyn Collator) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in self.reader.by_ref() {
            let entry = entry?;
            let os_name = entry.file_name();
            entries.push(DirEntry {
                name: CompactString::new(os_name.to_string_lossy()),
                path: self.path.join(&os_name),
            });
        }
        entries.sort_by(|a, b| collator.compare(&a.name, &b.name));
        Ok(entries)
    }
}

impl Drop for DirHandle {
    fn drop(&mut self) {
        trace!(path = %self.path.display(), "closing directory");
    }
}

/// Whether an open failure only means the path is not a directory.
pub fn is_not_a_directory(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotADirectory
}

fn uri_base(path: &Path) -> String {
    let mut base = path.to_string_lossy().into_owned();
    if base.ends_with('/') || base.ends_with('\\') {
        base.pop();
    }
    base
}

#[cfg(unix)]
fn identity_of(metadata: &std::fs::Metadata) -> Option<InodeInfo> {
    Some(InodeInfo::new(metadata.ino(), metadata.dev()))
}

// Windows reports a zero inode for every directory, which would make every
// directory look like its own ancestor.
#[cfg(not(unix))]
fn identity_of(_metadata: &std::fs::Metadata) -> Option<InodeInfo> {
    None
}
