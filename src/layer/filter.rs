//! Layer file filter
//!
//! A layer ships exactly one platform variant of the client's native
//! binaries. The predicate is a pure function over the source path so the
//! policy can be tested without touching the filesystem.

use std::path::Path;

/// Decides which source files are staged into the layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerFilter {
    /// File-name suffix identifying a native binary (e.g. `so.node`).
    pub binary_suffix: String,
    /// Path substring identifying the deployment target's platform build
    /// (e.g. `rhel`).
    pub platform_marker: String,
}

impl LayerFilter {
    pub fn new(binary_suffix: impl Into<String>, platform_marker: impl Into<String>) -> Self {
        Self {
            binary_suffix: binary_suffix.into(),
            platform_marker: platform_marker.into(),
        }
    }

    /// True if `path` should be copied into the layer.
    ///
    /// Non-binary files are always copied. A native binary is copied only
    /// when its path carries the platform marker, so of N platform variants
    /// exactly the target's one survives.
    pub fn includes(&self, path: &Path) -> bool {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return true,
        };

        if !name.ends_with(&self.binary_suffix) {
            return true;
        }

        path.to_string_lossy().contains(&self.platform_marker)
    }
}
