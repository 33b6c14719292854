//! Stack resource specs (pure data)
//!
//! These are configuration payloads handed to the external provisioning
//! engine; strata owns no invariants over the resources themselves. Values
//! the engine resolves at provisioning time (endpoints, secrets) appear as
//! `${…}` reference tokens.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::{ApiConfig, DatabaseConfig, ExecutionMode};

/// Reference to a secret managed outside the stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretRef {
    pub name: String,
}

impl SecretRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Token the provisioning engine substitutes with the secret value.
    pub fn reference(&self) -> String {
        format!("${{secret:{}}}", self.name)
    }
}

/// Virtual network holding the database instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VpcSpec {
    pub name: String,
}

impl VpcSpec {
    pub fn for_app(app_name: &str) -> Self {
        Self {
            name: format!("{app_name}-vpc"),
        }
    }
}

/// Managed relational database instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseSpec {
    pub name: String,
    pub engine: String,
    pub engine_version: String,
    pub instance_class: String,
    pub allocated_storage_gb: u32,
    pub user: String,
    pub password: SecretRef,
    /// Placed in a public subnet and reachable on the default port from any
    /// IPv4 address when set. The engine owns the actual security rules.
    pub publicly_accessible: bool,
}

impl DatabaseSpec {
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self {
            name: config.name.clone(),
            engine: "postgres".to_string(),
            engine_version: config.engine_version.clone(),
            instance_class: config.instance_class.clone(),
            allocated_storage_gb: config.allocated_storage_gb,
            user: config.user.clone(),
            password: SecretRef::new(&config.password_secret),
            publicly_accessible: config.publicly_accessible,
        }
    }

    /// Token for the provisioned instance endpoint address.
    pub fn endpoint_reference() -> String {
        "${db.endpoint}".to_string()
    }

    /// Token for the provisioned instance endpoint port.
    pub fn port_reference() -> String {
        "${db.port}".to_string()
    }

    /// Connection string for deployed functions, with the password and
    /// endpoint left as references.
    pub fn connection_string(&self) -> String {
        format!(
            "postgres://{}:{}@{}/{}?schema=public",
            self.user,
            self.password.reference(),
            Self::endpoint_reference(),
            self.name,
        )
    }
}

/// Serverless HTTP API with its function settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiSpec {
    pub routes: Vec<RouteSpec>,
    /// Environment applied to every function in the API.
    pub environment: BTreeMap<String, String>,
    /// Packages resolved from the shared layer instead of the bundle.
    pub external_modules: Vec<String>,
    /// Layers attached to every function in the API.
    pub layers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSpec {
    pub route: String,
    pub handler: String,
}

impl ApiSpec {
    /// Assemble the API spec for the resolved mode.
    ///
    /// Local mode bundles the client into each function and carries the
    /// developer's connection string; deployed mode wires the provisioned
    /// connection string and pulls the client from the shared layer.
    pub fn assemble(
        api: &ApiConfig,
        database: &DatabaseSpec,
        mode: &ExecutionMode,
        layer_name: Option<&str>,
    ) -> Self {
        let database_url = match mode {
            ExecutionMode::Local { database_url } => database_url.clone(),
            ExecutionMode::Deployed => database.connection_string(),
        };

        let mut environment = BTreeMap::new();
        environment.insert(crate::config::DATABASE_URL_VAR.to_string(), database_url);

        let external_modules = match mode {
            ExecutionMode::Local { .. } => Vec::new(),
            ExecutionMode::Deployed => api.external_modules.clone(),
        };

        Self {
            routes: vec![RouteSpec {
                route: api.route.clone(),
                handler: api.handler.clone(),
            }],
            environment,
            external_modules,
            layers: layer_name.map(|n| vec![n.to_string()]).unwrap_or_default(),
        }
    }
}
