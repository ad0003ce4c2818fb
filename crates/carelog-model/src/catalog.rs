use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::field::CanonicalField;
use crate::template::TemplateDefinition;

/// The data dictionary: canonical fields grouped by owning entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldDictionary {
    by_entity: BTreeMap<EntityKind, BTreeMap<String, CanonicalField>>,
}

impl FieldDictionary {
    pub fn new(fields: Vec<CanonicalField>) -> Self {
        let mut by_entity: BTreeMap<EntityKind, BTreeMap<String, CanonicalField>> = BTreeMap::new();
        for field in fields {
            by_entity
                .entry(field.entity)
                .or_default()
                .insert(field.name.clone(), field);
        }
        Self { by_entity }
    }

    pub fn field(&self, entity: EntityKind, name: &str) -> Option<&CanonicalField> {
        self.by_entity.get(&entity).and_then(|m| m.get(name))
    }

    /// All fields of an entity, in name order.
    pub fn fields_of(&self, entity: EntityKind) -> impl Iterator<Item = &CanonicalField> {
        self.by_entity.get(&entity).into_iter().flat_map(BTreeMap::values)
    }

    pub fn mandatory_fields(&self, entity: EntityKind) -> impl Iterator<Item = &CanonicalField> {
        self.fields_of(entity).filter(|f| f.mandatory)
    }

    pub fn len(&self) -> usize {
        self.by_entity.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_entity.is_empty()
    }
}

/// The read-only catalogue: template definitions in classification priority
/// order plus the field dictionary. Loaded once at startup, shared across
/// workers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    templates: Vec<TemplateDefinition>,
    dictionary: FieldDictionary,
}

impl Catalog {
    pub fn new(templates: Vec<TemplateDefinition>, dictionary: FieldDictionary) -> Self {
        Self {
            templates,
            dictionary,
        }
    }

    /// Templates in manifest order, which is also classification priority.
    pub fn templates(&self) -> &[TemplateDefinition] {
        &self.templates
    }

    pub fn template(&self, id: &str) -> Option<&TemplateDefinition> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn dictionary(&self) -> &FieldDictionary {
        &self.dictionary
    }
}
