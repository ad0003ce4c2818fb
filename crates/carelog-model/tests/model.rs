use std::collections::BTreeMap;

use carelog_model::{
    AttachmentRef, Catalog, EntityKind, EnumValue, ExtractedRecord, FieldDictionary, FieldValue,
    OverflowMap, TemplateDefinition,
};
use carelog_model::{BodyKind, CanonicalField, SemanticType};

fn sample_dictionary() -> FieldDictionary {
    FieldDictionary::new(vec![
        CanonicalField {
            name: "note_date".to_string(),
            entity: EntityKind::ShiftNote,
            semantic_type: SemanticType::Date,
            mandatory: true,
            values: Vec::new(),
        },
        CanonicalField {
            name: "shift_window".to_string(),
            entity: EntityKind::ShiftNote,
            semantic_type: SemanticType::Enum,
            mandatory: false,
            values: vec!["Morning".to_string(), "unknown".to_string()],
        },
    ])
}

#[test]
fn dictionary_lookup_is_entity_scoped() {
    let dictionary = sample_dictionary();
    assert!(
        dictionary
            .field(EntityKind::ShiftNote, "note_date")
            .is_some()
    );
    assert!(
        dictionary
            .field(EntityKind::IncidentReport, "note_date")
            .is_none()
    );
    let mandatory: Vec<&str> = dictionary
        .mandatory_fields(EntityKind::ShiftNote)
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(mandatory, vec!["note_date"]);
}

#[test]
fn template_lookup_normalizes_labels() {
    let mut labels = BTreeMap::new();
    labels.insert("written by".to_string(), "author_name".to_string());
    let template = TemplateDefinition {
        id: "automated_daily_shift_note".to_string(),
        entity: EntityKind::ShiftNote,
        body: BodyKind::Text,
        subject_contains: vec!["automated daily shift note".to_string()],
        header_probes: Vec::new(),
        labels,
    };
    assert_eq!(template.field_for("Written by;"), Some("author_name"));
    assert_eq!(template.field_for("  WRITTEN   BY: "), Some("author_name"));
    assert_eq!(template.field_for("Prepared by"), None);
}

#[test]
fn catalog_templates_keep_manifest_order() {
    let make = |id: &str| TemplateDefinition {
        id: id.to_string(),
        entity: EntityKind::ShiftNote,
        body: BodyKind::Text,
        subject_contains: Vec::new(),
        header_probes: Vec::new(),
        labels: BTreeMap::new(),
    };
    let catalog = Catalog::new(
        vec![make("zulu"), make("alpha")],
        FieldDictionary::default(),
    );
    let ids: Vec<&str> = catalog.templates().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["zulu", "alpha"]);
    assert!(catalog.template("alpha").is_some());
    assert!(catalog.template("missing").is_none());
}

#[test]
fn record_serde_round_trip() {
    let mut fields = BTreeMap::new();
    fields.insert(
        "author_name".to_string(),
        FieldValue::Text("Jane Doe".to_string()),
    );
    fields.insert(
        "shift_window".to_string(),
        FieldValue::Enum(EnumValue::Known("Morning".to_string())),
    );
    fields.insert("kilometres_walked".to_string(), FieldValue::Unparsed);
    let mut additional_fields = OverflowMap::new();
    additional_fields.insert("kilometres_walked#raw", "a fair way");
    additional_fields.insert("weather", "sunny");

    let record = ExtractedRecord {
        entity: EntityKind::ShiftNote,
        template: Some("automated_daily_shift_note".to_string()),
        fields,
        additional_fields,
        attachments: vec![AttachmentRef {
            filename: "photo.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            byte_len: 1024,
        }],
        incomplete: true,
        missing_fields: vec!["note_date".to_string()],
        enum_review: Vec::new(),
    };

    let json = serde_json::to_string(&record).expect("serialize record");
    let back: ExtractedRecord = serde_json::from_str(&json).expect("deserialize record");
    assert_eq!(back.entity, EntityKind::ShiftNote);
    assert_eq!(back.field("author_name"), Some(&FieldValue::Text("Jane Doe".to_string())));
    assert!(back.field("kilometres_walked").is_some_and(FieldValue::is_unparsed));
    assert_eq!(back.additional_fields.get("weather"), Some("sunny"));
    assert!(back.incomplete);
    assert_eq!(back.attachments.len(), 1);
}
