use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::error::ModelError;

/// Semantic type of a canonical field, as declared in the data dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticType {
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "datetime")]
    DateTime,
    #[serde(rename = "time")]
    Time,
    #[serde(rename = "time_range")]
    TimeRange,
    #[serde(rename = "bool")]
    Bool,
    #[serde(rename = "integer")]
    Integer,
    #[serde(rename = "float")]
    Float,
    /// Single-line string, whitespace-normalized.
    #[serde(rename = "string")]
    String,
    /// Multi-line narrative, line breaks preserved.
    #[serde(rename = "text")]
    Text,
    /// Open value set: declared members match exactly, novel literals are
    /// retained and flagged for catalogue review.
    #[serde(rename = "enum")]
    Enum,
    #[serde(rename = "string[]")]
    StringList,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "json")]
    Json,
    /// Opaque attachment references; carried at record level, never
    /// populated from a labelled field.
    #[serde(rename = "attachment[]")]
    AttachmentList,
}

impl SemanticType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticType::Date => "date",
            SemanticType::DateTime => "datetime",
            SemanticType::Time => "time",
            SemanticType::TimeRange => "time_range",
            SemanticType::Bool => "bool",
            SemanticType::Integer => "integer",
            SemanticType::Float => "float",
            SemanticType::String => "string",
            SemanticType::Text => "text",
            SemanticType::Enum => "enum",
            SemanticType::StringList => "string[]",
            SemanticType::Email => "email",
            SemanticType::Json => "json",
            SemanticType::AttachmentList => "attachment[]",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SemanticType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "date" => Ok(SemanticType::Date),
            "datetime" => Ok(SemanticType::DateTime),
            "time" => Ok(SemanticType::Time),
            "time_range" => Ok(SemanticType::TimeRange),
            "bool" => Ok(SemanticType::Bool),
            "integer" => Ok(SemanticType::Integer),
            "float" => Ok(SemanticType::Float),
            "string" => Ok(SemanticType::String),
            "text" => Ok(SemanticType::Text),
            "enum" => Ok(SemanticType::Enum),
            "string[]" => Ok(SemanticType::StringList),
            "email" => Ok(SemanticType::Email),
            "json" => Ok(SemanticType::Json),
            "attachment[]" => Ok(SemanticType::AttachmentList),
            other => Err(ModelError::UnknownSemanticType(other.to_string())),
        }
    }
}

/// One row of the data dictionary: a named, typed field owned by an entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalField {
    pub name: String,
    pub entity: EntityKind,
    pub semantic_type: SemanticType,
    pub mandatory: bool,
    /// Declared members for `enum` fields; empty otherwise.
    #[serde(default)]
    pub values: Vec<String>,
}
