#![deny(unsafe_code)]

use std::path::PathBuf;

/// Catalogue problems are configuration errors: they abort the run at
/// startup instead of degrading per-email.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML manifest {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("missing column {column:?} in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("invalid value {value:?} for {column} in {path}: {message}")]
    InvalidValue {
        path: PathBuf,
        column: String,
        value: String,
        message: String,
    },

    #[error("duplicate template id in manifest: {id}")]
    DuplicateTemplate { id: String },

    #[error(
        "label {label:?} in template {template} maps to undeclared field {field} of entity {entity}"
    )]
    UnknownField {
        template: String,
        label: String,
        field: String,
        entity: String,
    },

    #[error("duplicate field {field} for entity {entity} in {path}")]
    DuplicateField {
        path: PathBuf,
        entity: String,
        field: String,
    },
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
