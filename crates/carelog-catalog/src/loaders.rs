use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use csv::ReaderBuilder;

use carelog_model::{
    Catalog, CanonicalField, EntityKind, FieldDictionary, TemplateDefinition, normalize_label,
};

use crate::error::{CatalogError, Result};
use crate::manifest::CatalogManifest;
use crate::paths::catalog_root;

const MANIFEST_FILE: &str = "templates.toml";
const FIELDS_FILE: &str = "fields.csv";

/// Loads the catalogue from the default root (see [`catalog_root`]).
pub fn load_default_catalog() -> Result<Catalog> {
    load_catalog(&catalog_root())
}

/// Loads and cross-validates the full catalogue from `root`.
///
/// Any problem here is fatal: the catalogue is configuration, and a broken
/// one must abort the run rather than degrade per email.
pub fn load_catalog(root: &Path) -> Result<Catalog> {
    let manifest = load_manifest(&root.join(MANIFEST_FILE))?;
    let fields = load_field_dictionary(&root.join(FIELDS_FILE))?;
    let dictionary = FieldDictionary::new(fields);

    let mut seen_ids = BTreeSet::new();
    let mut templates = Vec::with_capacity(manifest.templates.len());
    for entry in &manifest.templates {
        if !seen_ids.insert(entry.id.clone()) {
            return Err(CatalogError::DuplicateTemplate {
                id: entry.id.clone(),
            });
        }
        let manifest_path = root.join(MANIFEST_FILE);
        let entity: EntityKind = entry.entity.parse().map_err(|_| CatalogError::InvalidValue {
            path: manifest_path.clone(),
            column: "entity".to_string(),
            value: entry.entity.clone(),
            message: format!("template {}", entry.id),
        })?;
        let body = entry.body.parse().map_err(|_| CatalogError::InvalidValue {
            path: manifest_path.clone(),
            column: "body".to_string(),
            value: entry.body.clone(),
            message: format!("template {}", entry.id),
        })?;

        let labels_path = root.join(&entry.labels);
        let mut labels = BTreeMap::new();
        for (raw_label, field_name) in load_labels(&labels_path)? {
            if dictionary.field(entity, &field_name).is_none() {
                return Err(CatalogError::UnknownField {
                    template: entry.id.clone(),
                    label: raw_label,
                    field: field_name,
                    entity: entity.to_string(),
                });
            }
            // First alias wins when two raw labels collapse to one key.
            labels
                .entry(normalize_label(&raw_label))
                .or_insert(field_name);
        }

        templates.push(TemplateDefinition {
            id: entry.id.clone(),
            entity,
            body,
            subject_contains: entry
                .subject_contains
                .iter()
                .map(|s| s.trim().to_lowercase())
                .collect(),
            header_probes: entry
                .header_probes
                .iter()
                .map(|s| s.trim().to_lowercase())
                .collect(),
            labels,
        });
    }

    Ok(Catalog::new(templates, dictionary))
}

fn load_manifest(path: &Path) -> Result<CatalogManifest> {
    let raw = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    toml::from_str(&raw).map_err(|source| CatalogError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads `fields.csv`: Entity, Field Name, Type, Mandatory, Values.
pub fn load_field_dictionary(path: &Path) -> Result<Vec<CanonicalField>> {
    let rows = read_csv_rows(path)?;
    let mut seen = BTreeSet::new();
    let mut fields = Vec::with_capacity(rows.len());
    for row in rows {
        let entity_raw = require(&row, path, "Entity")?;
        let name = require(&row, path, "Field Name")?.to_string();
        if name.is_empty() {
            continue;
        }
        let entity: EntityKind =
            entity_raw
                .parse()
                .map_err(|_| CatalogError::InvalidValue {
                    path: path.to_path_buf(),
                    column: "Entity".to_string(),
                    value: entity_raw.to_string(),
                    message: format!("field {name}"),
                })?;
        let type_raw = require(&row, path, "Type")?;
        let semantic_type = type_raw.parse().map_err(|_| CatalogError::InvalidValue {
            path: path.to_path_buf(),
            column: "Type".to_string(),
            value: type_raw.to_string(),
            message: format!("field {name}"),
        })?;
        if !seen.insert((entity, name.clone())) {
            return Err(CatalogError::DuplicateField {
                path: path.to_path_buf(),
                entity: entity.to_string(),
                field: name,
            });
        }
        let mandatory = row
            .get("Mandatory")
            .map(|v| v.eq_ignore_ascii_case("yes"))
            .unwrap_or(false);
        let values = row
            .get("Values")
            .map(|raw| {
                raw.split(';')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();
        fields.push(CanonicalField {
            name,
            entity,
            semantic_type,
            mandatory,
            values,
        });
    }
    Ok(fields)
}

/// Loads a label alias CSV: Label, Field Name. Labels are verbatim question
/// text; normalization happens when the template map is built.
pub fn load_labels(path: &Path) -> Result<Vec<(String, String)>> {
    let rows = read_csv_rows(path)?;
    let mut labels = Vec::with_capacity(rows.len());
    for row in rows {
        let label = require(&row, path, "Label")?.to_string();
        let field = require(&row, path, "Field Name")?.to_string();
        if label.is_empty() || field.is_empty() {
            continue;
        }
        labels.push((label, field));
    }
    Ok(labels)
}

fn require<'a>(
    row: &'a BTreeMap<String, String>,
    path: &Path,
    column: &str,
) -> Result<&'a String> {
    row.get(column).ok_or_else(|| CatalogError::MissingColumn {
        path: path.to_path_buf(),
        column: column.to_string(),
    })
}

fn read_csv_rows(path: &Path) -> Result<Vec<BTreeMap<String, String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| CatalogError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    let headers = reader
        .headers()
        .map_err(|e| CatalogError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| CatalogError::Csv {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let mut row = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            let key = headers
                .get(idx)
                .unwrap_or("")
                .trim_matches('\u{feff}')
                .to_string();
            row.insert(key, value.trim().to_string());
        }
        rows.push(row);
    }
    Ok(rows)
}
