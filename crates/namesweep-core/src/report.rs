/// Run report — what a sweep did to each corrupt entry.
///
/// Every entry the sanitizer acts on (or fails to act on) produces one
/// [`EntryOutcome`]. The report is built incrementally during the walk and
/// can be exported as pretty JSON or as CSV for later review.
use crate::error::ReportError;
use crate::model::EntryKind;
use chrono::{DateTime, Local};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// What happened to one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Renamed,
    /// The clean-named target already existed, so the corrupt file was deleted.
    RemovedDuplicate,
    /// Dry run: the entry would have been renamed.
    WouldRename,
    /// Dry run: the corrupt file would have been deleted.
    WouldRemoveDuplicate,
    Failed { error: String },
    Skipped { reason: String },
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Renamed => "renamed",
            Self::RemovedDuplicate => "removed_duplicate",
            Self::WouldRename => "would_rename",
            Self::WouldRemoveDuplicate => "would_remove_duplicate",
            Self::Failed { .. } => "failed",
            Self::Skipped { .. } => "skipped",
        }
    }

    fn detail(&self) -> &str {
        match self {
            Self::Failed { error } => error,
            Self::Skipped { reason } => reason,
            _ => "",
        }
    }
}

/// One record in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryOutcome {
    /// Full path of the entry before the action (lossy for non-UTF-8 paths).
    pub path: String,
    /// `None` when the walk itself failed before the entry type was known.
    pub kind: Option<EntryKind>,
    /// Names are lossy for non-UTF-8 entries; `path` locates the real entry.
    pub original_name: CompactString,
    pub cleaned_name: CompactString,
    #[serde(flatten)]
    pub action: Action,
}

/// Output format for [`RunReport::write_to`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Csv,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown report format '{other}' (expected json or csv)")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub root: PathBuf,
    pub dry_run: bool,
    pub started_at: DateTime<Local>,
    pub finished_at: Option<DateTime<Local>>,
    /// Entries visited by the walk, corrupt or not. The root is not counted.
    pub entries_scanned: u64,
    /// `true` if the run stopped early on a cancel request.
    pub cancelled: bool,
    pub outcomes: Vec<EntryOutcome>,
}

/// Flat row for CSV export; `Action` carries data so it is split into
/// a label and a detail column.
#[derive(Serialize)]
struct CsvRow<'a> {
    path: &'a str,
    kind: &'a str,
    original_name: &'a str,
    cleaned_name: &'a str,
    action: &'a str,
    detail: &'a str,
}

impl RunReport {
    pub fn new(root: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            root: root.into(),
            dry_run,
            started_at: Local::now(),
            finished_at: None,
            entries_scanned: 0,
            cancelled: false,
            outcomes: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: EntryOutcome) {
        self.outcomes.push(outcome);
    }

    /// Stamp the finish time. Called once when the walk ends.
    pub fn finish(&mut self) {
        self.finished_at = Some(Local::now());
    }

    fn count(&self, pred: impl Fn(&Action) -> bool) -> u64 {
        self.outcomes.iter().filter(|o| pred(&o.action)).count() as u64
    }

    pub fn renamed(&self) -> u64 {
        self.count(|a| matches!(a, Action::Renamed | Action::WouldRename))
    }

    pub fn removed(&self) -> u64 {
        self.count(|a| matches!(a, Action::RemovedDuplicate | Action::WouldRemoveDuplicate))
    }

    pub fn failed(&self) -> u64 {
        self.count(|a| matches!(a, Action::Failed { .. }))
    }

    pub fn skipped(&self) -> u64 {
        self.count(|a| matches!(a, Action::Skipped { .. }))
    }

    /// `true` if nothing was (or would be) changed and nothing failed.
    pub fn is_clean(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write one CSV row per outcome, with a header row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), ReportError> {
        let mut wtr = csv::Writer::from_writer(writer);
        for o in &self.outcomes {
            wtr.serialize(CsvRow {
                path: &o.path,
                kind: o.kind.map(EntryKind::label).unwrap_or(""),
                original_name: &o.original_name,
                cleaned_name: &o.cleaned_name,
                action: o.action.label(),
                detail: o.action.detail(),
            })?;
        }
        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Export the report to `path` in the requested format.
    pub fn write_to(&self, path: &Path, format: ReportFormat) -> Result<(), ReportError> {
        let io_err = |source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        };
        let mut file = File::create(path).map_err(io_err)?;
        match format {
            ReportFormat::Json => {
                let json = self.to_json()?;
                file.write_all(json.as_bytes()).map_err(io_err)?;
            }
            ReportFormat::Csv => self.write_csv(file)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(name: &str, action: Action) -> EntryOutcome {
        EntryOutcome {
            path: format!("/r/{name}"),
            kind: Some(EntryKind::File),
            original_name: CompactString::new(name),
            cleaned_name: CompactString::new(name.trim()),
            action,
        }
    }

    fn sample() -> RunReport {
        let mut r = RunReport::new("/r", false);
        r.record(outcome("a ", Action::Renamed));
        r.record(outcome("b ", Action::RemovedDuplicate));
        r.record(outcome(
            "c ",
            Action::Failed {
                error: "permission denied".into(),
            },
        ));
        r.finish();
        r
    }

    #[test]
    fn counters_follow_outcomes() {
        let r = sample();
        assert_eq!(r.renamed(), 1);
        assert_eq!(r.removed(), 1);
        assert_eq!(r.failed(), 1);
        assert_eq!(r.skipped(), 0);
        assert!(!r.is_clean());
        assert!(r.finished_at.is_some());
    }

    #[test]
    fn dry_run_actions_count_as_planned_mutations() {
        let mut r = RunReport::new("/r", true);
        r.record(outcome("a ", Action::WouldRename));
        r.record(outcome("b ", Action::WouldRemoveDuplicate));
        assert_eq!(r.renamed(), 1);
        assert_eq!(r.removed(), 1);
    }

    #[test]
    fn json_flattens_action_tag() {
        let json = sample().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let outcomes = value["outcomes"].as_array().unwrap();
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0]["action"], "renamed");
        assert_eq!(outcomes[2]["error"], "permission denied");
        assert_eq!(outcomes[0]["kind"], "file");
    }

    #[test]
    fn csv_has_header_and_one_row_per_outcome() {
        let mut buf = Vec::new();
        sample().write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "path,kind,original_name,cleaned_name,action,detail"
        );
        assert!(lines[3].ends_with("failed,permission denied"));
    }

    #[test]
    fn report_format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<ReportFormat>(), Ok(ReportFormat::Json));
        assert_eq!("csv".parse::<ReportFormat>(), Ok(ReportFormat::Csv));
        assert!("xml".parse::<ReportFormat>().is_err());
    }
}
