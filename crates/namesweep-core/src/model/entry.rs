/// A single file or directory discovered during a sweep.
///
/// Entries are captured before any mutation, as (parent, name) pairs, so
/// paths stay valid as long as descendants are handled before ancestors.
/// Names are kept as raw `OsString`s; a name does not have to be UTF-8 to
/// be cleaned.
use crate::model::name::{clean_os_name, escape_os_name, os_is_corrupt};
use serde::{Deserialize, Serialize};
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
}

impl EntryKind {
    /// Word used in progress lines ("Renaming file: ...").
    pub fn label(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Dir => "dir",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEntry {
    /// Directory that contains the entry.
    pub parent: PathBuf,
    /// Entry name only, never a full path.
    pub name: OsString,
    pub kind: EntryKind,
}

impl FsEntry {
    pub fn new(parent: impl Into<PathBuf>, name: impl AsRef<OsStr>, kind: EntryKind) -> Self {
        Self {
            parent: parent.into(),
            name: name.as_ref().to_os_string(),
            kind,
        }
    }

    /// Current full path of the entry.
    pub fn path(&self) -> PathBuf {
        self.parent.join(&self.name)
    }

    /// `false` for names that cannot be inspected on this platform.
    pub fn is_corrupt(&self) -> bool {
        os_is_corrupt(&self.name).unwrap_or(false)
    }

    pub fn cleaned_name(&self) -> Option<OsString> {
        clean_os_name(&self.name)
    }

    /// Path the entry would have after cleaning.
    pub fn cleaned_path(&self) -> Option<PathBuf> {
        self.cleaned_name().map(|n| self.parent.join(n))
    }

    /// Quoted, escaped name for log lines.
    pub fn display_name(&self) -> String {
        escape_os_name(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_join_parent_and_name() {
        let e = FsEntry::new("/tmp/root", "log.txt ", EntryKind::File);
        assert_eq!(e.path(), PathBuf::from("/tmp/root/log.txt "));
        assert_eq!(e.cleaned_path(), Some(PathBuf::from("/tmp/root/log.txt")));
        assert!(e.is_corrupt());
        assert_eq!(e.display_name(), "'log.txt '");
    }

    #[test]
    fn clean_entry_maps_to_itself() {
        let e = FsEntry::new("/tmp/root", "data.csv", EntryKind::File);
        assert!(!e.is_corrupt());
        assert_eq!(e.cleaned_path(), Some(e.path()));
    }

    #[test]
    fn kind_labels() {
        assert_eq!(EntryKind::File.label(), "file");
        assert_eq!(EntryKind::Dir.label(), "dir");
    }
}
