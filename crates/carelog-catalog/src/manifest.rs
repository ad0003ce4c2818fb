#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

/// `templates.toml` at the catalogue root.
///
/// Template order in the manifest is classification priority: the first
/// rule that matches an envelope wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogManifest {
    pub catalog: ManifestHeader,
    #[serde(rename = "template")]
    pub templates: Vec<TemplateEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestHeader {
    pub schema: String,
    pub version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub id: String,
    /// Entity kind identifier, e.g. `shift_note`.
    pub entity: String,
    /// Expected body kind: `text` or `html`.
    pub body: String,
    /// Subject phrases (matched case-insensitively, any hit classifies).
    pub subject_contains: Vec<String>,
    /// Body phrases used as a structural fallback when no subject matched.
    #[serde(default)]
    pub header_probes: Vec<String>,
    /// Path of the label alias CSV, relative to the catalogue root.
    pub labels: String,
}
