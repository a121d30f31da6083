/// Per-entry rename/remove policy.
///
/// Files whose clean-named twin already exists are treated as corrupt
/// duplicates and deleted; the clean-named file is authoritative.
/// Directories get no such fallback: an existing clean-named directory is
/// a `TargetExists` failure and both directories are left in place.
///
/// A dry run changes nothing on disk, so [`Policy`] remembers the targets
/// it has already planned to rename onto. Two corrupt siblings that clean
/// to the same name are then reported as one rename plus one duplicate
/// removal, the same as a real run would do.
use crate::error::SweepError;
use crate::model::{EntryKind, FsEntry};
use crate::report::Action;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// `true` if anything, including a dangling symlink, occupies `path`.
fn occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Rename/remove policy for one sweep.
#[derive(Debug)]
pub struct Policy {
    dry_run: bool,
    /// Targets claimed by planned renames (dry run only).
    planned: HashSet<PathBuf>,
}

impl Policy {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            planned: HashSet::new(),
        }
    }

    fn target_taken(&self, from: &Path, to: &Path) -> bool {
        to != from && (occupied(to) || self.planned.contains(to))
    }

    /// Apply the policy to one entry.
    ///
    /// With a dry run, nothing is touched and the planned action is returned.
    /// An entry whose name is already clean is reported as skipped.
    pub fn apply(&mut self, entry: &FsEntry) -> Result<Action, SweepError> {
        let from = entry.path();
        let Some(cleaned) = entry.cleaned_name() else {
            return Err(SweepError::NonUtf8Name { path: from });
        };
        if !entry.is_corrupt() {
            return Ok(Action::Skipped {
                reason: "name is already clean".into(),
            });
        }
        if cleaned.is_empty() {
            return Err(SweepError::EmptyCleanedName {
                name: entry.display_name(),
            });
        }

        let to = entry.parent.join(&cleaned);
        let collides = self.target_taken(&from, &to);

        match entry.kind {
            EntryKind::File if collides => {
                if self.dry_run {
                    return Ok(Action::WouldRemoveDuplicate);
                }
                fs::remove_file(&from).map_err(|source| SweepError::Remove {
                    path: from.clone(),
                    source,
                })?;
                Ok(Action::RemovedDuplicate)
            }
            EntryKind::Dir if collides => Err(SweepError::TargetExists { path: to }),
            _ => {
                if self.dry_run {
                    self.planned.insert(to);
                    return Ok(Action::WouldRename);
                }
                fs::rename(&from, &to).map_err(|source| SweepError::Rename {
                    from: from.clone(),
                    to: to.clone(),
                    source,
                })?;
                Ok(Action::Renamed)
            }
        }
    }
}

/// Apply the policy to a single entry, with no memory of earlier entries.
pub fn sanitize_entry(entry: &FsEntry, dry_run: bool) -> Result<Action, SweepError> {
    Policy::new(dry_run).apply(entry)
}
