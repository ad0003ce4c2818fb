use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Overflow key for plain-text body content that never matched a label line.
pub const UNLABELED_TRAILING_TEXT: &str = "unlabeled_trailing_text";

/// Body representation a template expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Text,
    Html,
}

impl BodyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyKind::Text => "text",
            BodyKind::Html => "html",
        }
    }
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BodyKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "text" => Ok(BodyKind::Text),
            "html" => Ok(BodyKind::Html),
            other => Err(ModelError::UnknownBodyKind(other.to_string())),
        }
    }
}

/// Opaque reference to an extracted attachment.
///
/// Payload storage belongs to the upstream MIME collaborator; the engine
/// only carries the handle through to the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub filename: String,
    pub content_type: String,
    pub byte_len: u64,
}

/// A pre-parsed email as handed over by the MIME collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MailEnvelope {
    /// Stable identifier of the source message, when the producer has one.
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub sent_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub text_body: Option<String>,
    #[serde(default)]
    pub html_body: Option<String>,
    #[serde(default)]
    pub attachments: Vec<AttachmentRef>,
}

impl MailEnvelope {
    /// Returns the body of the requested kind, if present.
    pub fn body_of(&self, kind: BodyKind) -> Option<&str> {
        match kind {
            BodyKind::Text => self.text_body.as_deref(),
            BodyKind::Html => self.html_body.as_deref(),
        }
    }
}

/// A value as extracted by a body parser, before mapping and coercion.
///
/// HTML pill groups arrive as `List`; everything else is `Text` with
/// internal line breaks preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    List(Vec<String>),
}

impl RawValue {
    /// Flattens to a single string; list elements join with newlines.
    pub fn flatten(&self) -> String {
        match self {
            RawValue::Text(v) => v.clone(),
            RawValue::List(items) => items.join("\n"),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Text(v) => v.is_empty(),
            RawValue::List(items) => items.is_empty(),
        }
    }
}

/// One labelled value in document order, as produced by a body parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawField {
    pub label: String,
    pub value: RawValue,
}

impl RawField {
    pub fn text(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: RawValue::Text(value.into()),
        }
    }

    pub fn list(label: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            label: label.into(),
            value: RawValue::List(items),
        }
    }
}
