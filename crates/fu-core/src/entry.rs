//! Per-entry metadata consumed by matchers.

use std::ffi::OsStr;
use std::fs::Metadata;
use std::time::SystemTime;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// The view of a filesystem entry that matchers evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMeta {
    /// Basename of the entry (not the full path).
    pub name: CompactString,
    /// Whether the entry is a directory.
    pub is_dir: bool,
    /// Permission bits (`rwxrwxrwx`).
    pub mode: u32,
    /// Last modification time.
    pub modified: SystemTime,
}

impl EntryMeta {
    /// Create entry metadata from its parts.
    pub fn new(name: impl Into<CompactString>, is_dir: bool, mode: u32, modified: SystemTime) -> Self {
        Self {
            name: name.into(),
            is_dir,
            mode,
            modified,
        }
    }

    /// Build from a file name and the metadata returned by `stat`/`lstat`.
    pub fn from_metadata(name: &OsStr, metadata: &Metadata) -> Self {
        Self {
            name: CompactString::new(name.to_string_lossy()),
            is_dir: metadata.is_dir(),
            mode: permission_bits(metadata),
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        }
    }
}

/// Get the permission bits from metadata.
#[cfg(unix)]
fn permission_bits(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o777
}

#[cfg(not(unix))]
fn permission_bits(metadata: &Metadata) -> u32 {
    // Only a read-only flag exists; directories are traversable.
    let base = if metadata.permissions().readonly() { 0o444 } else { 0o666 };
    if metadata.is_dir() { base | 0o111 } else { base }
}
