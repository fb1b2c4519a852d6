//! Directory traversal and the ignore predicate.
//!
//! A walk is any [`DirWalk`]: a depth-first iterator of entries that can be
//! told to prune the directory it just yielded. [`FsWalk`] walks the real
//! filesystem with `walkdir`; [`Eligible`] sits on top of any walk and yields
//! only the files that should be rewritten.

use crate::errors::Result;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What kind of filesystem object an entry is. Links are never followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dir,
    File,
    Symlink,
}

/// A single entry produced by a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl Entry {
    /// The base name of the entry. A path with no final component (such as
    /// `/`) is its own name.
    pub fn name(&self) -> &OsStr {
        self.path.file_name().unwrap_or(self.path.as_os_str())
    }
}

/// The decision made for a visited entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Directory to walk into.
    Descend,
    /// Ignored directory; its whole subtree is pruned.
    SkipDir,
    /// File or link that is left alone.
    Skip,
    /// Eligible file.
    Act,
}

/// Returns `true` for names that are never touched: empty names, names
/// starting with `.` or `_`, and `vendor`.
pub fn is_ignored(name: &OsStr) -> bool {
    let name = name.as_encoded_bytes();
    match name.first() {
        None | Some(b'.') | Some(b'_') => true,
        Some(_) => name == b"vendor",
    }
}

/// Classifies an entry by its kind and base name.
pub fn classify(entry: &Entry) -> Visit {
    match (entry.kind, is_ignored(entry.name())) {
        (EntryKind::Dir, true) => Visit::SkipDir,
        (EntryKind::Dir, false) => Visit::Descend,
        (EntryKind::File, false) => Visit::Act,
        (EntryKind::File, true) | (EntryKind::Symlink, _) => Visit::Skip,
    }
}

/// A depth-first walk whose current directory can be pruned.
pub trait DirWalk: Iterator<Item = Result<Entry>> {
    /// Skips the contents of the directory most recently yielded.
    fn skip_current_dir(&mut self);
}

/// A lexically ordered walk of the real filesystem.
pub struct FsWalk {
    inner: walkdir::IntoIter,
}

impl FsWalk {
    /// Starts a walk at `root`. The root is yielded first, like any other entry.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let inner = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();
        Self { inner }
    }
}

impl Iterator for FsWalk {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match self.inner.next()? {
            Ok(entry) => entry,
            Err(err) => return Some(Err(err.into())),
        };
        let file_type = entry.file_type();
        let kind = if file_type.is_dir() {
            EntryKind::Dir
        } else if file_type.is_symlink() {
            EntryKind::Symlink
        } else {
            EntryKind::File
        };
        Some(Ok(Entry {
            path: entry.into_path(),
            kind,
        }))
    }
}

impl DirWalk for FsWalk {
    fn skip_current_dir(&mut self) {
        self.inner.skip_current_dir();
    }
}

/// Yields the paths of eligible files from an underlying walk.
///
/// Ignored directories are pruned as soon as they are seen. The first walk
/// error is passed through; callers are expected to stop there.
pub struct Eligible<W> {
    walk: W,
}

impl<W: DirWalk> Eligible<W> {
    pub fn new(walk: W) -> Self {
        Self { walk }
    }
}

impl<W: DirWalk> Iterator for Eligible<W> {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walk.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(Err(err)),
            };
            match classify(&entry) {
                Visit::SkipDir => self.walk.skip_current_dir(),
                Visit::Descend | Visit::Skip => {}
                Visit::Act => return Some(Ok(entry.path)),
            }
        }
    }
}

/// An in-memory tree for exercising walks without touching the disk.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::errors::Error;
    use std::collections::VecDeque;

    /// Entries are written as paths; a trailing `/` marks a directory and a
    /// leading `@` a symbolic link. They are replayed in depth-first lexical
    /// order regardless of the order given.
    pub(crate) struct MemWalk {
        entries: VecDeque<Result<Entry>>,
        last_dir: Option<PathBuf>,
    }

    impl MemWalk {
        pub(crate) fn new(layout: &[&str]) -> Self {
            let mut entries: Vec<Entry> = layout
                .iter()
                .map(|s| {
                    if let Some(dir) = s.strip_suffix('/') {
                        Entry { path: dir.into(), kind: EntryKind::Dir }
                    } else if let Some(link) = s.strip_prefix('@') {
                        Entry { path: link.into(), kind: EntryKind::Symlink }
                    } else {
                        Entry { path: s.into(), kind: EntryKind::File }
                    }
                })
                .collect();
            // Component-wise path order is a pre-order depth-first walk.
            entries.sort_by(|a, b| a.path.cmp(&b.path));
            Self {
                entries: entries.into_iter().map(Ok).collect(),
                last_dir: None,
            }
        }

        /// Injects a walk error right after the entry at `path`.
        pub(crate) fn fail_after(mut self, path: &str, err: Error) -> Self {
            let at = self
                .entries
                .iter()
                .position(|e| matches!(e, Ok(e) if e.path == Path::new(path)))
                .map_or(self.entries.len(), |i| i + 1);
            self.entries.insert(at, Err(err));
            self
        }
    }

    impl Iterator for MemWalk {
        type Item = Result<Entry>;

        fn next(&mut self) -> Option<Self::Item> {
            let item = self.entries.pop_front()?;
            self.last_dir = match &item {
                Ok(e) if e.kind == EntryKind::Dir => Some(e.path.clone()),
                _ => None,
            };
            Some(item)
        }
    }

    impl DirWalk for MemWalk {
        fn skip_current_dir(&mut self) {
            let Some(dir) = self.last_dir.take() else {
                return;
            };
            while matches!(self.entries.front(), Some(Ok(e)) if e.path.starts_with(&dir)) {
                self.entries.pop_front();
            }
        }
    }
}
