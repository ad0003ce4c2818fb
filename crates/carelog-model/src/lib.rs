pub mod catalog;
pub mod entity;
pub mod envelope;
pub mod error;
pub mod field;
pub mod label;
pub mod overflow;
pub mod record;
pub mod template;
pub mod value;

pub use catalog::{Catalog, FieldDictionary};
pub use entity::EntityKind;
pub use envelope::{
    AttachmentRef, BodyKind, MailEnvelope, RawField, RawValue, UNLABELED_TRAILING_TEXT,
};
pub use error::ModelError;
pub use field::{CanonicalField, SemanticType};
pub use label::normalize_label;
pub use overflow::OverflowMap;
pub use record::{EnumReview, ExtractedRecord};
pub use template::TemplateDefinition;
pub use value::{EnumValue, FieldValue};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_kind_round_trips_through_str() {
        for kind in [
            EntityKind::ShiftNote,
            EntityKind::IncidentReport,
            EntityKind::IncidentInvestigation,
            EntityKind::Unclassified,
        ] {
            assert_eq!(kind.as_str().parse::<EntityKind>().ok(), Some(kind));
        }
    }

    #[test]
    fn semantic_type_spellings_parse() {
        assert_eq!(
            "string[]".parse::<SemanticType>().ok(),
            Some(SemanticType::StringList)
        );
        assert_eq!(
            "time_range".parse::<SemanticType>().ok(),
            Some(SemanticType::TimeRange)
        );
        assert!("str".parse::<SemanticType>().is_err());
    }
}
