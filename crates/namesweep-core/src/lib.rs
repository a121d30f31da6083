/// NameSweep Core — name sanitizing, line search, and run reporting.
///
/// This crate contains all business logic with zero CLI dependencies.
/// The `namesweep` binary is a thin wrapper around it.
///
/// # Modules
///
/// - [`model`] — Filesystem entries and the corrupt-name predicate.
/// - [`sanitizer`] — Bottom-up traversal that renames or removes corrupt entries.
/// - [`report`] — Per-entry outcomes of a sweep, exportable as JSON or CSV.
/// - [`locate`] — Literal substring search anchored to a line number.
/// - [`config`] — TOML-loadable settings for both commands.
/// - [`error`] — Error types shared by the modules above.
pub mod config;
pub mod error;
pub mod locate;
pub mod model;
pub mod report;
pub mod sanitizer;
