use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::envelope::AttachmentRef;
use crate::overflow::OverflowMap;
use crate::value::FieldValue;

/// An open-enum literal that matched no declared member, queued for
/// catalogue review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumReview {
    pub field: String,
    pub value: String,
}

/// The canonical output of extraction: one record per source email.
///
/// Immutable once assembled. Mandatory fields are never silently defaulted:
/// a missing one sets `incomplete` and is listed in `missing_fields`, so
/// partial data is stored for later correction instead of rejected.
/// `additional_fields` holds every normalized-label/value pair with no
/// canonical mapping and is disjoint from `fields` by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedRecord {
    pub entity: EntityKind,
    /// Template that classified the email; `None` for unclassified records.
    pub template: Option<String>,
    pub fields: BTreeMap<String, FieldValue>,
    #[serde(default)]
    pub additional_fields: OverflowMap,
    #[serde(default)]
    pub attachments: Vec<AttachmentRef>,
    pub incomplete: bool,
    #[serde(default)]
    pub missing_fields: Vec<String>,
    #[serde(default)]
    pub enum_review: Vec<EnumReview>,
}

impl ExtractedRecord {
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn is_unclassified(&self) -> bool {
        self.entity == EntityKind::Unclassified
    }
}
