//! Shared-binary layer builder
//!
//! Stages the client toolkit's runtime artifacts into a directory tree that
//! the provisioning engine attaches as a shared layer, so large native
//! binaries ship once per stack instead of once per function.
//!
//! A build is a one-shot, run-to-completion filesystem mutation of the
//! destination root only:
//!
//! 1. preflight every declared source (missing input fails before any
//!    destination mutation),
//! 2. delete and recreate the destination root (no stale files survive),
//! 3. copy each source tree into `<dest>/<namespace>/<source>/…`, applying
//!    the platform filter to every file.

mod filter;

pub use filter::LayerFilter;

use std::fs;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::config::LayerConfig;
use crate::error::{StrataError, StrataResult};
use crate::fs::{reset_dir, TreeHasher};

/// Everything a layer build needs, resolved up front.
#[derive(Debug, Clone)]
pub struct StagingPlan {
    /// Project root the source paths are relative to.
    pub project_root: PathBuf,
    /// Destination root, cleared and recreated by the build.
    pub dest_root: PathBuf,
    /// Subdirectory of the destination the sources are mirrored under.
    pub namespace: String,
    /// Relative source directories, staged in order.
    pub sources: Vec<PathBuf>,
    pub filter: LayerFilter,
    /// Layer name recorded in the manifest.
    pub name: String,
}

impl StagingPlan {
    /// Derive a plan from the layer configuration.
    ///
    /// The destination is `<out>/layers/<name>`; it has no identity beyond
    /// this build and is overwritten by the next one.
    pub fn from_config(project_root: &Path, out_dir: &Path, config: &LayerConfig) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            dest_root: out_dir.join("layers").join(&config.name),
            namespace: config.namespace.clone(),
            sources: config.sources.clone(),
            filter: LayerFilter::new(&config.binary_suffix, &config.platform_marker),
            name: config.name.clone(),
        }
    }

    fn namespace_relative(&self, source: &Path, relative: &Path) -> PathBuf {
        Path::new(&self.namespace).join(source).join(relative)
    }
}

/// Summary of a completed layer build, recorded in the stack manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerArtifact {
    pub name: String,
    /// Destination root holding the staged tree.
    pub path: PathBuf,
    pub files_copied: usize,
    pub files_excluded: usize,
    /// `sha256:` digest over the staged relative paths and contents.
    pub content_hash: String,
}

/// Execute a staging plan.
///
/// Fatal on the first error; there are no partial-success or retry
/// semantics. Source directories are never mutated.
pub fn build(plan: &StagingPlan) -> StrataResult<LayerArtifact> {
    // Preflight before touching the destination
    for source in &plan.sources {
        let absolute = plan.project_root.join(source);
        if !absolute.exists() {
            return Err(StrataError::MissingSource {
                path: source.clone(),
            });
        }
        if !absolute.is_dir() {
            return Err(StrataError::SourceNotADirectory {
                path: source.clone(),
            });
        }
    }

    reset_dir(&plan.dest_root)?;

    let mut hasher = TreeHasher::new();
    let mut files_copied = 0;
    let mut files_excluded = 0;

    for source in &plan.sources {
        let absolute = plan.project_root.join(source);
        let target_root = plan.dest_root.join(&plan.namespace).join(source);

        // Walk everything under the source: standard filters would hide
        // dotfile trees like `.prisma` and anything gitignored.
        let mut walker = WalkBuilder::new(&absolute);
        walker.standard_filters(false);
        walker.sort_by_file_path(|a, b| a.cmp(b));

        for entry in walker.build() {
            let entry = entry?;
            let relative = entry
                .path()
                .strip_prefix(&absolute)
                .expect("walk entries live under their root");
            if relative.as_os_str().is_empty() {
                continue;
            }
            let destination = target_root.join(relative);

            if entry.path().is_dir() {
                fs::create_dir_all(&destination)?;
                continue;
            }

            // Marker matching sees the project-relative path, never the
            // absolute one
            if !plan.filter.includes(&source.join(relative)) {
                files_excluded += 1;
                continue;
            }

            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &destination)?;

            let content = fs::read(&destination)?;
            hasher.add_file(&plan.namespace_relative(source, relative), &content);
            files_copied += 1;
        }
    }

    Ok(LayerArtifact {
        name: plan.name.clone(),
        path: plan.dest_root.clone(),
        files_copied,
        files_excluded,
        content_hash: hasher.finish(),
    })
}
