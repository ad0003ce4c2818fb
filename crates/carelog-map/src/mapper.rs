//! Field mapping.
//!
//! Maps parsed (label, value) pairs onto a template's canonical fields.
//! Recognized labels coerce to their declared type; unrecognized labels land
//! in the overflow map keyed by normalized label, never dropped. The first
//! occurrence wins when a label repeats for the same canonical field; later
//! occurrences stay visible in the overflow.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use carelog_model::{
    EnumReview, FieldDictionary, FieldValue, OverflowMap, RawField, TemplateDefinition,
    UNLABELED_TRAILING_TEXT, normalize_label,
};

use crate::coerce::coerce;

/// Output of one mapping pass, ready for record assembly.
#[derive(Debug, Clone, Default)]
pub struct MappedFields {
    pub canonical: BTreeMap<String, FieldValue>,
    pub additional: OverflowMap,
    pub enum_review: Vec<EnumReview>,
}

/// Maps raw fields through a template's label table.
pub fn apply(
    template: &TemplateDefinition,
    dictionary: &FieldDictionary,
    raw_fields: &[RawField],
) -> MappedFields {
    let mut mapped = MappedFields::default();

    for raw in raw_fields {
        let flat = raw.value.flatten();
        if flat.trim().is_empty() {
            // Unanswered question; an absent field, not an empty one.
            continue;
        }
        let normalized = overflow_key(&raw.label);

        let Some(field_name) = template.field_for(&raw.label) else {
            mapped.additional.insert(normalized, flat);
            continue;
        };
        let Some(field) = dictionary.field(template.entity, field_name) else {
            // Catalogue validation makes this unreachable; degrade to
            // overflow instead of losing the value if it ever regresses.
            warn!(field = field_name, template = %template.id, "alias points at unknown field");
            mapped.additional.insert(normalized, flat);
            continue;
        };
        if mapped.canonical.contains_key(field_name) {
            // First occurrence won; keep the repeat visible.
            debug!(field = field_name, "repeated label for populated field");
            mapped.additional.insert(normalized, flat);
            continue;
        }

        let coercion = coerce(&raw.value, field);
        if coercion.value.is_unparsed() {
            mapped
                .additional
                .insert(format!("{field_name}#raw"), flat);
        }
        if let Some(literal) = coercion.enum_review {
            mapped.enum_review.push(EnumReview {
                field: field_name.to_string(),
                value: literal,
            });
        }
        mapped
            .canonical
            .insert(field_name.to_string(), coercion.value);
    }

    mapped
}

/// Places every raw field into the overflow, for envelopes with no usable
/// template (unknown classification, structural malformation).
pub fn overflow_only(raw_fields: &[RawField]) -> MappedFields {
    let mut mapped = MappedFields::default();
    for raw in raw_fields {
        let flat = raw.value.flatten();
        if flat.trim().is_empty() {
            continue;
        }
        mapped.additional.insert(overflow_key(&raw.label), flat);
    }
    mapped
}

fn overflow_key(label: &str) -> String {
    let normalized = normalize_label(label);
    if normalized.is_empty() {
        UNLABELED_TRAILING_TEXT.to_string()
    } else {
        normalized
    }
}
