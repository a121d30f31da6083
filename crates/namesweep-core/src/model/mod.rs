/// Data model for a sweep: filesystem entries and their names.
pub mod entry;
pub mod name;

pub use entry::{EntryKind, FsEntry};
pub use name::{clean_name, clean_os_name, escape_name, escape_os_name, is_corrupt, os_is_corrupt};
