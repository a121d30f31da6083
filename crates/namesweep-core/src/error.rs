/// Error types for the core crate.
///
/// Per-entry sweep failures (`EmptyCleanedName`, `TargetExists`, `Rename`,
/// `Remove`, `NonUtf8Name`, `Walk`) never abort a run: the sanitizer turns
/// them into `Action::Failed` records and moves on. Only `InvalidRoot` is
/// returned to the caller, before traversal starts. `NonUtf8Name` only
/// occurs on targets without byte access to file names.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("root '{}' does not exist or is not a directory", path.display())]
    InvalidRoot { path: PathBuf },

    #[error("name {name} is empty once cleaned")]
    EmptyCleanedName { name: String },

    #[error("target '{}' already exists", path.display())]
    TargetExists { path: PathBuf },

    #[error("name of '{}' is not valid UTF-8", path.display())]
    NonUtf8Name { path: PathBuf },

    #[error("rename '{}' -> '{}': {source}", from.display(), to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("remove '{}': {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read '{path}': {message}")]
    Walk { path: String, message: String },
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("write report '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("encode JSON report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("encode CSV report: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("root '{}' does not exist or is not a directory", path.display())]
    InvalidRoot { path: PathBuf },

    #[error("line numbers start at 1")]
    InvalidLine,

    #[error("search text must not be empty")]
    EmptyNeedle,

    #[error("read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' is not valid UTF-8", path.display())]
    Decode { path: PathBuf },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_root_names_the_path() {
        let err = SweepError::InvalidRoot {
            path: PathBuf::from("/nope"),
        };
        assert_eq!(
            err.to_string(),
            "root '/nope' does not exist or is not a directory"
        );
    }

    #[test]
    fn rename_error_mentions_both_paths() {
        let err = SweepError::Rename {
            from: PathBuf::from("a\r"),
            to: PathBuf::from("a"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("rename 'a\r' -> 'a'"), "got {msg:?}");
    }
}
