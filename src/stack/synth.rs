//! Stack synthesis
//!
//! Assembles the declarative stack request consumed by the external
//! provisioning engine. Synthesis itself performs no provisioning: the
//! output is a manifest document plus the staged layer directory.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::config::{Config, ExecutionMode};
use crate::error::StrataResult;
use crate::fs::atomic_write;
use crate::layer::LayerArtifact;

use super::spec::{ApiSpec, DatabaseSpec, VpcSpec};

/// File name of the synthesized manifest inside the output directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// The declarative stack request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackManifest {
    pub app: String,
    pub mode: String,
    pub resources: Resources,
    /// Named values surfaced after the engine provisions the stack.
    pub outputs: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resources {
    pub vpc: VpcSpec,
    pub database: DatabaseSpec,
    pub api: ApiSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<LayerResource>,
}

/// Shared layer asset recorded in the manifest (deployed mode only).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerResource {
    pub name: String,
    pub asset_path: String,
    pub content_hash: String,
    pub files: usize,
}

impl LayerResource {
    fn from_artifact(artifact: &LayerArtifact) -> Self {
        Self {
            name: artifact.name.clone(),
            asset_path: artifact.path.display().to_string().replace('\\', "/"),
            content_hash: artifact.content_hash.clone(),
            files: artifact.files_copied,
        }
    }
}

/// Assemble the manifest for the resolved mode.
///
/// The database is declared in both modes; only the layer is conditional.
/// Callers pass the layer artifact exactly when the mode is deployed.
pub fn synthesize(
    mode: &ExecutionMode,
    config: &Config,
    layer: Option<&LayerArtifact>,
) -> StackManifest {
    let vpc = VpcSpec::for_app(&config.app.name);
    let database = DatabaseSpec::from_config(&config.database);
    let layer = layer.map(LayerResource::from_artifact);
    let api = ApiSpec::assemble(
        &config.api,
        &database,
        mode,
        layer.as_ref().map(|l| l.name.as_str()),
    );

    let mut outputs = BTreeMap::new();
    outputs.insert("ApiEndpoint".to_string(), "${api.url}".to_string());
    outputs.insert("DbEndpoint".to_string(), DatabaseSpec::endpoint_reference());
    outputs.insert("DbPort".to_string(), DatabaseSpec::port_reference());

    StackManifest {
        app: config.app.name.clone(),
        mode: mode.label().to_string(),
        resources: Resources {
            vpc,
            database,
            api,
            layer,
        },
        outputs,
    }
}

impl StackManifest {
    /// Serialize and write the manifest atomically into `out_dir`.
    pub fn write(&self, out_dir: &Path) -> StrataResult<std::path::PathBuf> {
        let path = out_dir.join(MANIFEST_FILE);
        let mut content = serde_json::to_vec_pretty(self)?;
        content.push(b'\n');
        atomic_write(&path, &content)?;
        Ok(path)
    }
}

/// Render a manifest as human-readable plan lines.
pub fn render_plan(manifest: &StackManifest) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("+ Vpc: {}", manifest.resources.vpc.name));

    let db = &manifest.resources.database;
    lines.push(format!(
        "+ Database: {} ({} {}, {}, {} GiB)",
        db.name, db.engine, db.engine_version, db.instance_class, db.allocated_storage_gb
    ));
    lines.push(format!(
        "  Credentials: {} / secret '{}'",
        db.user, db.password.name
    ));
    if db.publicly_accessible {
        lines.push("  Publicly accessible".to_string());
    }

    for route in &manifest.resources.api.routes {
        lines.push(format!("+ Api: {} -> {}", route.route, route.handler));
    }
    let url_source = if manifest.mode == "local" {
        "environment"
    } else {
        "provisioned database"
    };
    lines.push(format!("  DATABASE_URL from {url_source}"));

    if let Some(layer) = &manifest.resources.layer {
        lines.push(format!(
            "+ Layer: {} ({} files, {})",
            layer.name, layer.files, layer.content_hash
        ));
    }

    let output_names: Vec<&str> = manifest.outputs.keys().map(String::as_str).collect();
    lines.push(format!("Outputs: {}", output_names.join(", ")));
    lines
}
