//! Local filesystem helpers
//!
//! Small synchronous wrappers used by the layer builder and the synthesizer:
//! idempotent directory reset, atomic writes via the tempfile + rename
//! pattern, and SHA-256 content hashing.

use std::fs;
use std::io::Write;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::StrataResult;

/// Delete `path` recursively if it exists, then recreate it (including
/// intermediate directories).
///
/// This is the full-reset step of a layer build: no file from a previous
/// build survives it.
pub fn reset_dir(path: &Path) -> StrataResult<()> {
    if path.exists() {
        fs::remove_dir_all(path)?;
    }
    fs::create_dir_all(path)?;
    Ok(())
}

/// Write content to a file atomically.
///
/// Writes to a temporary file in the destination's parent directory, then
/// renames it into place so readers never observe a partial manifest.
pub fn atomic_write(path: &Path, content: &[u8]) -> StrataResult<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(content)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Compute the SHA-256 hash of a byte slice, `sha256:<hex>` format.
pub fn hash_content(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("sha256:{:x}", hasher.finalize())
}

/// Incremental hasher over a staged file tree.
///
/// Feeds relative paths and file contents in traversal order, so the final
/// digest identifies the exact set of files a build produced.
pub struct TreeHasher {
    hasher: Sha256,
}

impl TreeHasher {
    pub fn new() -> Self {
        Self {
            hasher: Sha256::new(),
        }
    }

    /// Record one staged file: its destination-relative path and content.
    pub fn add_file(&mut self, relative_path: &Path, content: &[u8]) {
        // Normalize separators so hashes agree across platforms
        let key = relative_path.to_string_lossy().replace('\\', "/");
        self.hasher.update(key.as_bytes());
        self.hasher.update([0u8]);
        self.hasher.update(content);
        self.hasher.update([0u8]);
    }

    pub fn finish(self) -> String {
        format!("sha256:{:x}", self.hasher.finalize())
    }
}

impl Default for TreeHasher {
    fn default() -> Self {
        Self::new()
    }
}
