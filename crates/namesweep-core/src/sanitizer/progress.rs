/// Sweep progress reporting — lightweight messages sent from the sweep
/// to whoever is printing progress, via a crossbeam channel.
use crate::model::EntryKind;
use std::path::PathBuf;
use std::time::Duration;

/// Progress updates sent while a sweep runs.
///
/// Names are pre-escaped (`'bad\r'`) so consumers can print them as-is.
#[derive(Debug, Clone)]
pub enum SweepProgress {
    Started {
        root: PathBuf,
        dry_run: bool,
    },
    /// About to rename (or, in a dry run, planning to rename) an entry.
    Renaming {
        kind: EntryKind,
        from: String,
        to: String,
    },
    /// The clean-named file already existed; the corrupt one was deleted.
    RemovedDuplicate {
        path: PathBuf,
    },
    /// A per-entry failure. The sweep carries on with the next entry.
    Failed {
        kind: Option<EntryKind>,
        name: String,
        message: String,
    },
    /// An entry that was left alone without an attempt (non-UTF-8 name).
    Skipped {
        path: PathBuf,
        reason: String,
    },
    Complete {
        duration: Duration,
        renamed: u64,
        removed: u64,
        failed: u64,
    },
    /// Sweep was cancelled between directories.
    Cancelled,
}
