//! Record assembly.
//!
//! Applies entity defaults and derivations, validates mandatory-field
//! presence and seals the mapped fields into an [`ExtractedRecord`].
//! Validation never rejects: a missing mandatory field flags the record
//! `incomplete` so partial data is stored for later correction.

use tracing::debug;

use carelog_map::MappedFields;
use carelog_model::{
    BodyKind, Catalog, EntityKind, EnumValue, ExtractedRecord, FieldValue, MailEnvelope,
    TemplateDefinition,
};

/// Enum member applied when a plain-text shift note carries no shift window.
const SHIFT_WINDOW_UNKNOWN: &str = "unknown";

/// Builds the final record for one envelope.
pub fn assemble(
    catalog: &Catalog,
    template: Option<&TemplateDefinition>,
    mut mapped: MappedFields,
    envelope: &MailEnvelope,
) -> ExtractedRecord {
    let entity = template.map_or(EntityKind::Unclassified, |t| t.entity);

    if let Some(template) = template {
        apply_defaults(template, &mut mapped, envelope);
        derive_fields(catalog, template, &mut mapped);
    }

    let mut missing_fields = Vec::new();
    if entity.is_canonical() {
        for field in catalog.dictionary().mandatory_fields(entity) {
            let present = mapped
                .canonical
                .get(&field.name)
                .is_some_and(|value| !value.is_unparsed());
            if !present {
                missing_fields.push(field.name.clone());
            }
        }
    }
    let incomplete = !entity.is_canonical() || !missing_fields.is_empty();
    if incomplete {
        debug!(
            entity = %entity,
            missing = missing_fields.len(),
            "record flagged incomplete"
        );
    }

    ExtractedRecord {
        entity,
        template: template.map(|t| t.id.clone()),
        fields: mapped.canonical,
        additional_fields: mapped.additional,
        attachments: envelope.attachments.clone(),
        incomplete,
        missing_fields,
        enum_review: mapped.enum_review,
    }
}

fn apply_defaults(template: &TemplateDefinition, mapped: &mut MappedFields, envelope: &MailEnvelope) {
    if template.entity != EntityKind::ShiftNote {
        return;
    }
    // The sent timestamp is the closest thing to a note date the envelope
    // carries; the plain-text form regularly omits the Date line.
    if !mapped.canonical.contains_key("note_date")
        && let Some(sent_at) = envelope.sent_at
    {
        mapped
            .canonical
            .insert("note_date".to_string(), FieldValue::Date(sent_at.date()));
    }
    if template.body == BodyKind::Text && !mapped.canonical.contains_key("shift_window") {
        mapped.canonical.insert(
            "shift_window".to_string(),
            FieldValue::Enum(EnumValue::Known(SHIFT_WINDOW_UNKNOWN.to_string())),
        );
    }
}

fn derive_fields(catalog: &Catalog, template: &TemplateDefinition, mapped: &mut MappedFields) {
    // day_of_week derives from note_date by calendar computation when the
    // form did not supply it independently.
    if catalog
        .dictionary()
        .field(template.entity, "day_of_week")
        .is_some()
        && !mapped.canonical.contains_key("day_of_week")
        && let Some(date) = mapped.canonical.get("note_date").and_then(FieldValue::as_date)
    {
        mapped.canonical.insert(
            "day_of_week".to_string(),
            FieldValue::Text(date.format("%A").to_string()),
        );
    }
}
