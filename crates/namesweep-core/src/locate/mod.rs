/// Line locator — finds which source file has a given text on a given line.
///
/// Build tools sometimes report "line 97 contains `AiOutl...`" without the
/// file name. This module walks a tree, reads every file with a matching
/// extension, and reports each line in the window `line ± radius` that
/// contains the needle.
///
/// Files are discovered with `jwalk` and searched in parallel with `rayon`.
/// A file that cannot be read or is not UTF-8 is recorded as a failure and
/// the search continues.
pub mod lines;

pub use lines::search_lines;

use crate::config::LocateConfig;
use crate::error::LocateError;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// A line that contains the needle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineMatch {
    pub path: PathBuf,
    /// 1-based line number.
    pub line: usize,
    /// The line with surrounding whitespace trimmed.
    pub text: String,
}

/// A file that could not be searched.
#[derive(Debug, Clone, Serialize)]
pub struct FileReadFailure {
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Default, Serialize)]
pub struct LocateReport {
    /// Sorted by path, then line.
    pub matches: Vec<LineMatch>,
    pub failures: Vec<FileReadFailure>,
    pub files_searched: u64,
}

/// `true` if `path` has one of `extensions` (compared without case).
fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}

/// Read one file and search it.
fn search_file(
    path: &Path,
    needle: &str,
    line: usize,
    radius: usize,
) -> Result<Vec<LineMatch>, LocateError> {
    let bytes = std::fs::read(path).map_err(|source| LocateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| LocateError::Decode {
        path: path.to_path_buf(),
    })?;
    Ok(search_lines(&text, needle, line, radius)
        .into_iter()
        .map(|(n, text)| LineMatch {
            path: path.to_path_buf(),
            line: n,
            text,
        })
        .collect())
}

/// Search `config.root` for `config.needle` around `config.line`.
pub fn find_matches(config: &LocateConfig) -> Result<LocateReport, LocateError> {
    if config.line == 0 {
        return Err(LocateError::InvalidLine);
    }
    if config.needle.is_empty() {
        return Err(LocateError::EmptyNeedle);
    }
    if !config.root.is_dir() {
        return Err(LocateError::InvalidRoot {
            path: config.root.clone(),
        });
    }

    let start = Instant::now();
    info!(
        "Searching {} for {:?} at line {} (±{})",
        config.root.display(),
        config.needle,
        config.line,
        config.radius
    );

    let mut report = LocateReport::default();
    let mut candidates: Vec<PathBuf> = Vec::new();

    let walker = jwalk::WalkDir::new(&config.root)
        .skip_hidden(false)
        .follow_links(false)
        .parallelism(jwalk::Parallelism::RayonNewPool(num_cpus::get()));

    for entry_result in walker {
        match entry_result {
            Ok(entry) => {
                if entry.file_type().is_file() && has_extension(&entry.path(), &config.extensions)
                {
                    candidates.push(entry.path());
                }
            }
            Err(err) => {
                report.failures.push(FileReadFailure {
                    path: err.path().map(Path::to_path_buf).unwrap_or_default(),
                    message: err.to_string(),
                });
            }
        }
    }
    debug!("{} candidate files", candidates.len());

    let results: Vec<Result<Vec<LineMatch>, LocateError>> = candidates
        .par_iter()
        .map(|p| search_file(p, &config.needle, config.line, config.radius))
        .collect();

    report.files_searched = candidates.len() as u64;
    for result in results {
        match result {
            Ok(hits) => report.matches.extend(hits),
            Err(err) => {
                let path = match &err {
                    LocateError::Read { path, .. } | LocateError::Decode { path } => path.clone(),
                    _ => PathBuf::new(),
                };
                debug!("{err}");
                report.failures.push(FileReadFailure {
                    path,
                    message: err.to_string(),
                });
            }
        }
    }

    report
        .matches
        .sort_by(|a, b| a.path.cmp(&b.path).then(a.line.cmp(&b.line)));
    report.failures.sort_by(|a, b| a.path.cmp(&b.path));

    info!(
        "Searched {} files in {:?}: {} matches, {} unreadable",
        report.files_searched,
        start.elapsed(),
        report.matches.len(),
        report.failures.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_filter_ignores_case_and_requires_extension() {
        let exts = vec!["ts".to_string(), "tsx".to_string()];
        assert!(has_extension(Path::new("src/App.tsx"), &exts));
        assert!(has_extension(Path::new("src/App.TS"), &exts));
        assert!(!has_extension(Path::new("src/App.js"), &exts));
        assert!(!has_extension(Path::new("src/Makefile"), &exts));
        assert!(!has_extension(Path::new("src/.ts"), &exts));
    }

    #[test]
    fn invalid_arguments_are_rejected() {
        let mut cfg = LocateConfig {
            needle: "AiOutl".into(),
            line: 0,
            ..Default::default()
        };
        assert!(matches!(find_matches(&cfg), Err(LocateError::InvalidLine)));

        cfg.line = 97;
        cfg.needle.clear();
        assert!(matches!(find_matches(&cfg), Err(LocateError::EmptyNeedle)));

        cfg.needle = "AiOutl".into();
        cfg.root = PathBuf::from("/definitely/not/here");
        assert!(matches!(
            find_matches(&cfg),
            Err(LocateError::InvalidRoot { .. })
        ));
    }
}
