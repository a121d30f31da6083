/// Settings for both commands, loadable from a TOML file.
///
/// Every key is optional; missing keys fall back to `Default`. The CLI
/// overrides file values with whatever flags were given.
///
/// ```toml
/// [sweep]
/// root = "/srv/checkout"
/// dry_run = true
/// report = "sweep.json"
/// report_format = "json"
///
/// [locate]
/// root = "src"
/// radius = 10
/// extensions = ["ts", "tsx"]
/// ```
use crate::error::ConfigError;
use crate::report::ReportFormat;
use crate::sanitizer::SweepOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Extensions searched by `locate` when none are configured.
pub const DEFAULT_EXTENSIONS: [&str; 4] = ["ts", "tsx", "js", "jsx"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sweep: SweepConfig,
    pub locate: LocateConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Directory to sweep. Falls back to the current directory.
    pub root: Option<PathBuf>,
    pub dry_run: bool,
    /// Where to write the run report, if anywhere.
    pub report: Option<PathBuf>,
    pub report_format: ReportFormat,
}

impl SweepConfig {
    pub fn root_or_current(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn options(&self) -> SweepOptions {
        SweepOptions {
            dry_run: self.dry_run,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocateConfig {
    pub root: PathBuf,
    /// Literal text to look for.
    pub needle: String,
    /// 1-based line number the text is expected on.
    pub line: usize,
    /// Extra lines searched on either side of `line`.
    pub radius: usize,
    /// File extensions to read, without the leading dot.
    pub extensions: Vec<String>,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            needle: String::new(),
            line: 1,
            radius: 0,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl Config {
    /// Read and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.sweep.root_or_current(), PathBuf::from("."));
        assert_eq!(cfg.locate.extensions, vec!["ts", "tsx", "js", "jsx"]);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [sweep]
            dry_run = true
            report_format = "csv"

            [locate]
            radius = 10
            "#,
        )
        .unwrap();
        assert!(cfg.sweep.dry_run);
        assert!(cfg.sweep.options().dry_run);
        assert_eq!(cfg.sweep.report_format, ReportFormat::Csv);
        assert_eq!(cfg.sweep.root, None);
        assert_eq!(cfg.locate.radius, 10);
        assert_eq!(cfg.locate.line, 1);
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        std::fs::write(&path, "[sweep\nroot = 1").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn load_reports_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = Config::load(&tmp.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn load_optional_without_path_is_default() {
        assert_eq!(Config::load_optional(None).unwrap(), Config::default());
    }
}
