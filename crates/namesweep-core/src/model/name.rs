/// Name predicates — the corrupt-name test and the cleaning function.
///
/// Corrupt names usually come from archives extracted on another platform
/// or from scripts that wrote a path with its line ending still attached.
///
/// The `str` functions are the reference definitions. The `os_*` variants
/// apply the same rules to raw directory-entry names: UTF-8 names go through
/// the `str` functions, other names are handled byte-wise on Unix.
use std::ffi::{OsStr, OsString};

/// `true` if `name` contains a carriage return, a newline, or ends in a space.
///
/// Leading spaces and other trailing whitespace (tabs) alone do not make a
/// name corrupt.
pub fn is_corrupt(name: &str) -> bool {
    name.contains('\r') || name.contains('\n') || name.ends_with(' ')
}

/// Remove every `\r` and `\n`, then trim surrounding whitespace.
///
/// Idempotent: `clean_name(&clean_name(x)) == clean_name(x)`.
pub fn clean_name(name: &str) -> String {
    let stripped: String = name.chars().filter(|&c| c != '\r' && c != '\n').collect();
    stripped.trim().to_string()
}

/// Quote a name with control characters escaped, for log lines.
///
/// `escape_name("bad\r")` renders as `'bad\r'` so the stray byte is visible.
pub fn escape_name(name: &str) -> String {
    format!("'{}'", name.escape_debug())
}

/// Byte-wise [`is_corrupt`] for names that are not valid UTF-8.
pub fn is_corrupt_bytes(name: &[u8]) -> bool {
    name.contains(&b'\r') || name.contains(&b'\n') || name.ends_with(b" ")
}

/// Byte-wise [`clean_name`]: drop `\r`/`\n`, trim ASCII whitespace.
pub fn clean_bytes(name: &[u8]) -> Vec<u8> {
    let stripped: Vec<u8> = name
        .iter()
        .copied()
        .filter(|&b| b != b'\r' && b != b'\n')
        .collect();
    stripped.trim_ascii().to_vec()
}

/// Corruption test on a raw entry name.
///
/// `None` when the name cannot be inspected on this platform (non-UTF-8
/// name on a target without byte access to `OsStr`).
pub fn os_is_corrupt(name: &OsStr) -> Option<bool> {
    if let Some(s) = name.to_str() {
        return Some(is_corrupt(s));
    }
    raw_bytes(name).map(is_corrupt_bytes)
}

/// Cleaned form of a raw entry name. `None` under the same conditions as
/// [`os_is_corrupt`].
pub fn clean_os_name(name: &OsStr) -> Option<OsString> {
    if let Some(s) = name.to_str() {
        return Some(OsString::from(clean_name(s)));
    }
    raw_bytes(name).map(|b| from_raw_bytes(clean_bytes(b)))
}

/// [`escape_name`] for raw names. Invalid bytes render as `\xNN`.
pub fn escape_os_name(name: &OsStr) -> String {
    if let Some(s) = name.to_str() {
        return escape_name(s);
    }
    match raw_bytes(name) {
        Some(b) => format!("'{}'", b.escape_ascii()),
        None => escape_name(&name.to_string_lossy()),
    }
}

#[cfg(unix)]
fn raw_bytes(name: &OsStr) -> Option<&[u8]> {
    use std::os::unix::ffi::OsStrExt;
    Some(name.as_bytes())
}

#[cfg(not(unix))]
fn raw_bytes(_name: &OsStr) -> Option<&[u8]> {
    None
}

#[cfg(unix)]
fn from_raw_bytes(bytes: Vec<u8>) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes)
}

#[cfg(not(unix))]
fn from_raw_bytes(bytes: Vec<u8>) -> OsString {
    OsString::from(String::from_utf8_lossy(&bytes).into_owned())
}
