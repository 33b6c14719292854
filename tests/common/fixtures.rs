//! Test fixtures - client toolkit trees and config constants.

use std::path::Path;

/// Relative paths seeded by `seed_client_tree`, with file contents.
///
/// Mirrors a built client toolkit: generated client (with one native binary
/// per platform), runtime package, and build-tool package.
pub const CLIENT_TREE: &[(&str, &str)] = &[
    ("node_modules/.prisma/client/index.js", "generated client"),
    ("node_modules/.prisma/client/schema.prisma", "datamodel"),
    (
        "node_modules/.prisma/client/libquery_engine-rhel-openssl-1.0.x.so.node",
        "rhel engine",
    ),
    (
        "node_modules/.prisma/client/libquery_engine-darwin.so.node",
        "darwin engine",
    ),
    ("node_modules/@prisma/client/index.js", "runtime entry"),
    ("node_modules/@prisma/client/package.json", "{}"),
    ("node_modules/prisma/build/index.js", "build tool"),
];

/// Files staged by a default layer build of `CLIENT_TREE`.
pub const STAGED_FILES: usize = 6;

/// Files excluded by the platform filter from `CLIENT_TREE`.
pub const EXCLUDED_FILES: usize = 1;

/// Seed the default client toolkit tree under `root`.
pub fn seed_client_tree(root: &Path) {
    for (relative, content) in CLIENT_TREE {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).expect("failed to create fixture dirs");
        std::fs::write(&path, content).expect("failed to write fixture file");
    }
}

/// Config selecting the darwin engine variant instead of the rhel one
pub const CONFIG_DARWIN_MARKER: &str = r#"
[layer]
platform_marker = "darwin"
"#;

/// Config with a typo in a layer key (exercises unknown-key warnings)
pub const CONFIG_UNKNOWN_KEY: &str = r#"
[layer]
platform_markr = "rhel"
"#;

/// Config renaming the app and database
pub const CONFIG_CUSTOM_NAMES: &str = r#"
[app]
name = "orders-api"

[database]
name = "ordersdb"
"#;
