//! Protected-path guard for delete operations
//!
//! Tree-comparison-driven deletion is inherently destructive: a single
//! mis-joined path must not be able to wipe a system directory. Every
//! delete, at every recursion level, consults [`is_protected`] before
//! touching the filesystem. The recognizers are fixed constants, not
//! user-tunable.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Drive root + reserved `Windows` folder, case-insensitive.
const WINDOWS_SYSTEM_PATTERN: &str = r"(?i)^[a-z]:[\\/]windows([\\/]|$)";

/// Unix system roots refused for deletion. `/var` and `/tmp` are absent on
/// purpose: temp trees must stay deletable.
const UNIX_SYSTEM_ROOTS: &[&str] = &[
    "/bin", "/boot", "/dev", "/etc", "/lib", "/lib64", "/proc", "/sbin", "/sys", "/usr",
];

static WINDOWS_SYSTEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(WINDOWS_SYSTEM_PATTERN).unwrap());

/// Check whether a path resolves under a protected system location.
///
/// Matches the textual path as given; no filesystem access, so the check
/// works (and refuses) even for paths that do not currently exist.
pub fn is_protected(path: &Path) -> bool {
    if WINDOWS_SYSTEM_REGEX.is_match(&path.to_string_lossy()) {
        return true;
    }

    UNIX_SYSTEM_ROOTS.iter().any(|root| path.starts_with(root))
}
