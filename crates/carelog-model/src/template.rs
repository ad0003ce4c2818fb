use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::envelope::BodyKind;
use crate::label::normalize_label;

/// A recognized email layout with its label-to-field mapping.
///
/// Loaded once from the catalogue at startup and immutable thereafter. The
/// `labels` map is keyed by normalized label; several raw labels may point
/// at the same canonical field to absorb label drift across form revisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateDefinition {
    pub id: String,
    pub entity: EntityKind,
    pub body: BodyKind,
    /// Lower-cased phrases matched against the subject line.
    pub subject_contains: Vec<String>,
    /// Lower-cased phrases probed in the body when no subject rule matched.
    #[serde(default)]
    pub header_probes: Vec<String>,
    /// Normalized label -> canonical field name.
    pub labels: BTreeMap<String, String>,
}

impl TemplateDefinition {
    /// Looks up the canonical field for a raw label.
    pub fn field_for(&self, raw_label: &str) -> Option<&str> {
        self.labels
            .get(&normalize_label(raw_label))
            .map(String::as_str)
    }
}
