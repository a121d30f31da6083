/// Sanitizer module — finds and repairs corrupt file and directory names.
///
/// A sweep runs in two steps:
/// - **Walk:** `walk::collect_listings` captures every corrupt entry,
///   grouped per directory and ordered deepest-first.
/// - **Repair:** each listing's files, then its subdirectories, go through
///   `policy::Policy`. Failures are recorded and the sweep moves on.
///
/// The repair step is a single sequential actor. [`start_sweep`] only moves
/// that actor to a background thread so the caller can print progress
/// while it runs.
pub mod policy;
pub mod progress;
pub mod walk;

pub use policy::{sanitize_entry, Policy};
pub use walk::{collect_listings, DirListing, WalkPlan};

use crate::error::SweepError;
use crate::model::{escape_name, escape_os_name, FsEntry};
use crate::report::{Action, EntryOutcome, RunReport};
use crossbeam_channel::{Receiver, Sender};
use progress::SweepProgress;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use compact_str::CompactString;
use tracing::{info, warn};

/// Maximum number of progress messages that may queue up in the channel
/// used by [`start_sweep`]. A slow consumer stalls the sweep rather than
/// growing the queue without bound.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 4_096;

#[derive(Debug, Clone, Default)]
pub struct SweepOptions {
    /// Report what would change without renaming or deleting anything.
    pub dry_run: bool,
}

/// Handle to a sweep running on a background thread.
pub struct SweepHandle {
    /// Receiver for progress updates from the sweep thread.
    pub progress_rx: Receiver<SweepProgress>,
    cancel_flag: Arc<AtomicBool>,
    thread: thread::JoinHandle<Result<RunReport, SweepError>>,
}

impl SweepHandle {
    /// Ask the sweep to stop before its next directory.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }

    /// Wait for the sweep thread and return its report.
    ///
    /// Drain `progress_rx` first (or concurrently); a full channel blocks
    /// the sweep thread.
    pub fn join(self) -> Result<RunReport, SweepError> {
        self.thread
            .join()
            .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
    }
}

/// Start a sweep of `root` on a background thread.
pub fn start_sweep(root: PathBuf, options: SweepOptions) -> SweepHandle {
    let (progress_tx, progress_rx) =
        crossbeam_channel::bounded::<SweepProgress>(PROGRESS_CHANNEL_CAPACITY);
    let cancel_flag = Arc::new(AtomicBool::new(false));
    let cancel_clone = cancel_flag.clone();

    let thread = thread::Builder::new()
        .name("namesweep-sanitizer".into())
        .spawn(move || sweep_with_progress(&root, &options, &progress_tx, &cancel_clone))
        .expect("failed to spawn sanitizer thread");

    SweepHandle {
        progress_rx,
        cancel_flag,
        thread,
    }
}

/// Sweep `root` synchronously and return the run report.
pub fn sweep(root: &Path, options: &SweepOptions) -> Result<RunReport, SweepError> {
    let never = AtomicBool::new(false);
    run(root, options, &mut |_: SweepProgress| {}, &never)
}

/// Sweep `root` synchronously, sending progress on `progress_tx` and
/// stopping between directories once `cancel` is set.
pub fn sweep_with_progress(
    root: &Path,
    options: &SweepOptions,
    progress_tx: &Sender<SweepProgress>,
    cancel: &AtomicBool,
) -> Result<RunReport, SweepError> {
    run(
        root,
        options,
        &mut |msg: SweepProgress| {
            let _ = progress_tx.send(msg);
        },
        cancel,
    )
}

fn run(
    root: &Path,
    options: &SweepOptions,
    emit: &mut dyn FnMut(SweepProgress),
    cancel: &AtomicBool,
) -> Result<RunReport, SweepError> {
    if !root.is_dir() {
        return Err(SweepError::InvalidRoot {
            path: root.to_path_buf(),
        });
    }

    let start = Instant::now();
    info!(
        "Scanning {}{}",
        root.display(),
        if options.dry_run { " (dry run)" } else { "" }
    );
    emit(SweepProgress::Started {
        root: root.to_path_buf(),
        dry_run: options.dry_run,
    });

    let plan = collect_listings(root);
    let mut report = RunReport::new(root, options.dry_run);
    report.entries_scanned = plan.entries_scanned;

    for err in plan.errors {
        let path = match &err {
            SweepError::Walk { path, .. } => path.clone(),
            _ => String::new(),
        };
        warn!("{err}");
        emit(SweepProgress::Failed {
            kind: None,
            name: escape_name(&path),
            message: err.to_string(),
        });
        report.record(EntryOutcome {
            original_name: CompactString::new(&path),
            path,
            kind: None,
            cleaned_name: CompactString::default(),
            action: Action::Failed {
                error: err.to_string(),
            },
        });
    }

    let mut policy = Policy::new(options.dry_run);
    for listing in plan.listings {
        if cancel.load(Ordering::Relaxed) {
            info!("Sweep cancelled");
            report.cancelled = true;
            report.finish();
            emit(SweepProgress::Cancelled);
            return Ok(report);
        }

        for path in listing.non_utf8 {
            let reason = SweepError::NonUtf8Name { path: path.clone() }.to_string();
            warn!("Skipping {}: name is not valid UTF-8", path.display());
            let name = path
                .file_name()
                .map(|n| CompactString::new(n.to_string_lossy()))
                .unwrap_or_default();
            report.record(EntryOutcome {
                path: path.to_string_lossy().into_owned(),
                kind: None,
                original_name: name.clone(),
                cleaned_name: name,
                action: Action::Skipped {
                    reason: reason.clone(),
                },
            });
            emit(SweepProgress::Skipped { path, reason });
        }

        // Files first, then subdirectories, whose contents are already done.
        for entry in listing.files.iter().chain(listing.dirs.iter()) {
            let outcome = process_entry(entry, &mut policy, emit);
            report.record(outcome);
        }
    }

    report.finish();
    let duration = start.elapsed();
    info!(
        "Cleanup complete: {} renamed, {} removed, {} failed in {duration:?}",
        report.renamed(),
        report.removed(),
        report.failed()
    );
    emit(SweepProgress::Complete {
        duration,
        renamed: report.renamed(),
        removed: report.removed(),
        failed: report.failed(),
    });

    Ok(report)
}

/// Run the policy on one entry, log it, and turn the result into an outcome.
fn process_entry(
    entry: &FsEntry,
    policy: &mut Policy,
    emit: &mut dyn FnMut(SweepProgress),
) -> EntryOutcome {
    let cleaned = entry.cleaned_name().unwrap_or_default();
    let kind = entry.kind;
    let from = entry.display_name();
    let to = escape_os_name(&cleaned);

    info!("Renaming {}: {from} -> {to}", kind.label());
    emit(SweepProgress::Renaming {
        kind,
        from: from.clone(),
        to,
    });

    let action = match policy.apply(entry) {
        Ok(action) => {
            let verb = match action {
                Action::RemovedDuplicate => Some("removed"),
                Action::WouldRemoveDuplicate => Some("would remove"),
                _ => None,
            };
            if let Some(verb) = verb {
                info!("Target exists, {verb} corrupt {}", kind.label());
                emit(SweepProgress::RemovedDuplicate { path: entry.path() });
            }
            action
        }
        Err(err) => {
            warn!("Failed to rename {} {from}: {err}", kind.label());
            emit(SweepProgress::Failed {
                kind: Some(kind),
                name: from,
                message: err.to_string(),
            });
            Action::Failed {
                error: err.to_string(),
            }
        }
    };

    EntryOutcome {
        path: entry.path().to_string_lossy().into_owned(),
        kind: Some(kind),
        original_name: CompactString::new(entry.name.to_string_lossy()),
        cleaned_name: CompactString::new(cleaned.to_string_lossy()),
        action,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_root_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let err = sweep(&tmp.path().join("absent"), &SweepOptions::default()).unwrap_err();
        assert!(matches!(err, SweepError::InvalidRoot { .. }));
    }

    #[test]
    fn file_root_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("f.txt");
        fs::write(&file, b"").unwrap();
        assert!(sweep(&file, &SweepOptions::default()).is_err());
    }

    #[test]
    fn cancelled_sweep_stops_before_first_listing() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a "), b"").unwrap();

        let (tx, rx) = crossbeam_channel::unbounded();
        let cancel = AtomicBool::new(true);
        let report =
            sweep_with_progress(tmp.path(), &SweepOptions::default(), &tx, &cancel).unwrap();

        assert!(report.cancelled);
        assert!(report.outcomes.is_empty());
        assert!(tmp.path().join("a ").exists());
        assert!(rx
            .try_iter()
            .any(|m| matches!(m, SweepProgress::Cancelled)));
    }

    #[test]
    fn background_sweep_reports_progress_and_result() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b\n"), b"").unwrap();

        let handle = start_sweep(tmp.path().to_path_buf(), SweepOptions::default());
        let messages: Vec<SweepProgress> = handle.progress_rx.iter().collect();
        let report = handle.join().unwrap();

        assert_eq!(report.renamed(), 1);
        assert!(matches!(messages.first(), Some(SweepProgress::Started { .. })));
        assert!(matches!(
            messages.last(),
            Some(SweepProgress::Complete { renamed: 1, .. })
        ));
        assert!(tmp.path().join("b").exists());
    }
}
