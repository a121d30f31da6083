/// Bottom-up ordering of a directory tree.
///
/// The tree is walked once with `jwalk` in serial, sorted mode and every
/// corrupt entry is captured into the listing of its parent directory.
/// Listings are created in the order their directories are discovered, so
/// a child's listing always comes after its parent's. Replaying the
/// listings in reverse therefore handles every descendant before the
/// directory entry that contains it is renamed, and no captured path is
/// invalidated by an earlier rename.
use crate::error::SweepError;
use crate::model::{os_is_corrupt, EntryKind, FsEntry};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One directory's corrupt children, captured before any mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirListing {
    pub dir: PathBuf,
    pub files: Vec<FsEntry>,
    pub dirs: Vec<FsEntry>,
    /// Children whose names cannot be tested: non-UTF-8 names on targets
    /// without byte access to file names. Always empty on Unix.
    pub non_utf8: Vec<PathBuf>,
}

impl DirListing {
    fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            ..Default::default()
        }
    }

    /// `true` if there is nothing to act on in this directory.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.dirs.is_empty() && self.non_utf8.is_empty()
    }
}

/// Result of walking a tree: listings in bottom-up order plus walk errors.
#[derive(Debug, Default)]
pub struct WalkPlan {
    /// Listings that need work, deepest first.
    pub listings: Vec<DirListing>,
    /// Directories that could not be read.
    pub errors: Vec<SweepError>,
    /// Entries visited, corrupt or not. The root is not counted.
    pub entries_scanned: u64,
}

/// Walk `root` and return its corrupt entries grouped per directory,
/// ordered so that descendants precede ancestors.
///
/// Within each listing, files are meant to be handled before subdirectories.
/// Symbolic links are not followed and are treated as files.
pub fn collect_listings(root: &Path) -> WalkPlan {
    let mut listings: Vec<DirListing> = vec![DirListing::new(root.to_path_buf())];
    let mut dir_index: HashMap<PathBuf, usize> = HashMap::new();
    dir_index.insert(root.to_path_buf(), 0);

    let mut errors = Vec::new();
    let mut entries_scanned: u64 = 0;

    let walker = jwalk::WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .parallelism(jwalk::Parallelism::Serial);

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                let path = err
                    .path()
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or_default();
                debug!("Walk error at {path}: {err}");
                errors.push(SweepError::Walk {
                    path,
                    message: err.to_string(),
                });
                continue;
            }
        };

        let path = entry.path();
        if path == root {
            continue;
        }
        entries_scanned += 1;

        let Some(parent) = path.parent().map(Path::to_path_buf) else {
            continue;
        };
        let is_dir = entry.file_type().is_dir();

        if is_dir {
            dir_index.insert(path.clone(), listings.len());
            listings.push(DirListing::new(path.clone()));
        }

        let Some(&slot) = dir_index.get(&parent) else {
            debug!("No listing for parent of {}", path.display());
            continue;
        };

        let name = entry.file_name();
        match os_is_corrupt(name) {
            Some(true) => {}
            Some(false) => continue,
            None => {
                listings[slot].non_utf8.push(path);
                continue;
            }
        }

        if is_dir {
            listings[slot]
                .dirs
                .push(FsEntry::new(parent, name, EntryKind::Dir));
        } else {
            listings[slot]
                .files
                .push(FsEntry::new(parent, name, EntryKind::File));
        }
    }

    listings.retain(|l| !l.is_empty());
    listings.reverse();

    debug!(
        "Walk of {} visited {} entries, {} listings need work",
        root.display(),
        entries_scanned,
        listings.len()
    );

    WalkPlan {
        listings,
        errors,
        entries_scanned,
    }
}
