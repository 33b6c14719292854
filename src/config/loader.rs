//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{StrataError, StrataResult};

use super::types::Config;

/// Default configuration file name, looked up in the project root.
pub const CONFIG_FILE: &str = "strata.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
///
/// Unknown keys are warnings rather than errors: a typo in `strata.toml`
/// should be visible without blocking a deploy.
pub fn load_with_warnings(path: &Path) -> StrataResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| StrataError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|key| ConfigWarning {
            key,
            file: path.to_path_buf(),
        })
        .collect();

    Ok((config, warnings))
}

/// Load from an explicit path, the project's `strata.toml`, or defaults.
///
/// An explicit `--config` path must exist; the implicit project file is
/// optional and silently falls back to defaults.
pub fn load_or_default(
    explicit: Option<&Path>,
    project_root: &Path,
) -> StrataResult<(Config, Vec<ConfigWarning>)> {
    if let Some(path) = explicit {
        return load_with_warnings(path);
    }

    let project_config = project_root.join(CONFIG_FILE);
    if project_config.exists() {
        return load_with_warnings(&project_config);
    }

    Ok((Config::default(), Vec::new()))
}
