//! Configuration type definitions
//!
//! The stack is described by `strata.toml`. Every field has a default that
//! mirrors the canonical stack, so a missing or empty file still synthesizes
//! the full deployment.

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{StrataError, StrataResult};

/// Environment variable consulted for the connection string in local mode.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Execution mode for a stack build, resolved once at the start.
///
/// All downstream logic reads this single value instead of re-checking a
/// boolean flag: local mode skips the layer build and carries the
/// developer-supplied connection string, deployed mode packages the shared
/// layer and defers the connection string to provisioned values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Local development: no layer, connection string from the environment.
    Local { database_url: String },
    /// Deployed: build the shared layer, reference provisioned values.
    Deployed,
}

impl ExecutionMode {
    /// Resolve the mode from the `--local` flag.
    ///
    /// In local mode the `DATABASE_URL` environment variable must be set;
    /// a missing variable is a fatal configuration error.
    pub fn resolve(local: bool) -> StrataResult<Self> {
        if local {
            let database_url =
                env::var(DATABASE_URL_VAR).map_err(|_| StrataError::MissingEnvVar {
                    var: DATABASE_URL_VAR.to_string(),
                })?;
            Ok(Self::Local { database_url })
        } else {
            Ok(Self::Deployed)
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local { .. })
    }

    /// Mode label used in the manifest and status output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Local { .. } => "local",
            Self::Deployed => "deployed",
        }
    }
}

/// Top-level stack configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub layer: LayerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub api: ApiConfig,
}

/// Application identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
        }
    }
}

fn default_app_name() -> String {
    "strata-app".to_string()
}

/// Shared layer configuration
///
/// `sources` are the client-toolkit directories staged into the layer:
/// the generated client, the runtime package, and the build-tool package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerConfig {
    #[serde(default = "default_layer_name")]
    pub name: String,

    #[serde(default = "default_layer_sources")]
    pub sources: Vec<PathBuf>,

    #[serde(default = "default_layer_namespace")]
    pub namespace: String,

    #[serde(default = "default_binary_suffix")]
    pub binary_suffix: String,

    #[serde(default = "default_platform_marker")]
    pub platform_marker: String,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            name: default_layer_name(),
            sources: default_layer_sources(),
            namespace: default_layer_namespace(),
            binary_suffix: default_binary_suffix(),
            platform_marker: default_platform_marker(),
        }
    }
}

fn default_layer_name() -> String {
    "client".to_string()
}

fn default_layer_sources() -> Vec<PathBuf> {
    vec![
        PathBuf::from("node_modules/.prisma"),
        PathBuf::from("node_modules/@prisma/client"),
        PathBuf::from("node_modules/prisma/build"),
    ]
}

fn default_layer_namespace() -> String {
    "nodejs".to_string()
}

fn default_binary_suffix() -> String {
    "so.node".to_string()
}

fn default_platform_marker() -> String {
    "rhel".to_string()
}

/// Managed database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_name")]
    pub name: String,

    #[serde(default = "default_database_user")]
    pub user: String,

    /// Name of the secret holding the database password. The secret itself
    /// is created and read by the provisioning engine, never by strata.
    #[serde(default = "default_password_secret")]
    pub password_secret: String,

    #[serde(default = "default_engine_version")]
    pub engine_version: String,

    #[serde(default = "default_instance_class")]
    pub instance_class: String,

    #[serde(default = "default_allocated_storage_gb")]
    pub allocated_storage_gb: u32,

    #[serde(default = "default_publicly_accessible")]
    pub publicly_accessible: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            name: default_database_name(),
            user: default_database_user(),
            password_secret: default_password_secret(),
            engine_version: default_engine_version(),
            instance_class: default_instance_class(),
            allocated_storage_gb: default_allocated_storage_gb(),
            publicly_accessible: default_publicly_accessible(),
        }
    }
}

fn default_database_name() -> String {
    "appdb".to_string()
}

fn default_database_user() -> String {
    "postgres".to_string()
}

fn default_password_secret() -> String {
    "postgres-password".to_string()
}

fn default_engine_version() -> String {
    "13.4".to_string()
}

fn default_instance_class() -> String {
    "t3.micro".to_string()
}

fn default_allocated_storage_gb() -> u32 {
    10
}

fn default_publicly_accessible() -> bool {
    true
}

/// HTTP API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_route")]
    pub route: String,

    #[serde(default = "default_handler")]
    pub handler: String,

    /// Packages resolved from the shared layer instead of being bundled
    /// into each function (deployed mode only).
    #[serde(default = "default_external_modules")]
    pub external_modules: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            route: default_route(),
            handler: default_handler(),
            external_modules: default_external_modules(),
        }
    }
}

fn default_route() -> String {
    "GET /".to_string()
}

fn default_handler() -> String {
    "src/lambda.handler".to_string()
}

fn default_external_modules() -> Vec<String> {
    vec!["@prisma/client".to_string(), ".prisma".to_string()]
}
