//! Captures the on-disk state of a file before/after a mutating tool runs.

use std::path::Path;

use crate::error::Result;
use crate::error::snapshot_error;
use snafu::ResultExt;

/// Files larger than this are not captured; the entry records
/// [`OmittedReason::TooLarge`] instead.
pub const DEFAULT_MAX_CAPTURE_BYTES: u64 = 5 * 1024 * 1024;

/// Bytes sniffed from the head of a file to decide whether it's binary.
const BINARY_SNIFF_LEN: usize = 8000;

/// Why a file's content was not captured for a snapshot entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OmittedReason {
    /// The file did not exist.
    Absent,
    /// The file exceeded the capture size threshold.
    TooLarge { size: u64, limit: u64 },
    /// The file sniffed as binary (a null byte in the first sniff window).
    Binary,
}

/// The content captured for one side (before/after) of a snapshot entry.
#[derive(Debug, Clone)]
pub enum FileState {
    Captured(Vec<u8>),
    Omitted(OmittedReason),
}

impl FileState {
    pub fn is_omitted(&self) -> bool {
        matches!(self, FileState::Omitted(_))
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            FileState::Captured(bytes) => Some(bytes),
            FileState::Omitted(_) => None,
        }
    }
}

/// Reads `path` and classifies it into a [`FileState`], applying the size
/// threshold and binary sniff. Returns `Absent` rather than an error when
/// the file simply doesn't exist yet.
pub async fn capture_file_state(path: &Path, max_capture_bytes: u64) -> Result<FileState> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(FileState::Omitted(OmittedReason::Absent));
        }
        Err(source) => {
            return Err(snapshot_error::ReadSnafu {
                path: path.to_path_buf(),
                source,
            }
            .build());
        }
    };

    let size = metadata.len();
    if size > max_capture_bytes {
        return Ok(FileState::Omitted(OmittedReason::TooLarge {
            size,
            limit: max_capture_bytes,
        }));
    }

    let bytes = tokio::fs::read(path)
        .await
        .context(snapshot_error::ReadSnafu {
            path: path.to_path_buf(),
        })?;

    if looks_binary(&bytes) {
        return Ok(FileState::Omitted(OmittedReason::Binary));
    }

    Ok(FileState::Captured(bytes))
}

/// Writes `bytes` back to `path`, creating parent directories if needed.
pub async fn restore_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .context(snapshot_error::WriteSnafu {
                path: path.to_path_buf(),
            })?;
    }
    tokio::fs::write(path, bytes)
        .await
        .context(snapshot_error::WriteSnafu {
            path: path.to_path_buf(),
        })
}

/// Removes `path`, treating an already-missing file as success.
pub async fn remove_file(path: &Path) -> Result<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(snapshot_error::WriteSnafu {
            path: path.to_path_buf(),
            source,
        }
        .build()),
    }
}

fn looks_binary(bytes: &[u8]) -> bool {
    bytes.iter().take(BINARY_SNIFF_LEN).any(|&b| b == 0)
}

#[cfg(test)]
#[path = "capture.test.rs"]
mod tests;
