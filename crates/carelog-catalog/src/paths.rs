//! Catalogue directory resolution.

use std::path::PathBuf;

/// Environment variable for overriding the catalogue directory.
pub const CATALOG_ENV_VAR: &str = "CARELOG_CATALOG_DIR";

/// Get the catalogue root directory.
///
/// Resolution order:
/// 1. `CARELOG_CATALOG_DIR` environment variable
/// 2. `catalog/` directory relative to the workspace root
pub fn catalog_root() -> PathBuf {
    if let Ok(root) = std::env::var(CATALOG_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../catalog")
}
