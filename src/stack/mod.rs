//! Stack definition and synthesis
//!
//! Declarative composition only: `spec` holds the pure-data resource specs,
//! `synth` assembles them into the manifest the external provisioning engine
//! consumes. Resource creation, network rules, and credential retrieval all
//! happen on the engine's side of that boundary.

mod spec;
mod synth;

pub use spec::{ApiSpec, DatabaseSpec, RouteSpec, SecretRef, VpcSpec};
pub use synth::{render_plan, synthesize, LayerResource, Resources, StackManifest, MANIFEST_FILE};
