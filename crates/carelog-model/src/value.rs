use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A value of an open enum field.
///
/// Declared members become `Known` (with the catalogue casing); anything
/// else is retained verbatim as `Other` rather than rejected, so novel form
/// options survive until the catalogue catches up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum EnumValue {
    Known(String),
    Other(String),
}

impl EnumValue {
    pub fn as_str(&self) -> &str {
        match self {
            EnumValue::Known(v) | EnumValue::Other(v) => v,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, EnumValue::Known(_))
    }
}

/// A typed canonical field value.
///
/// `Unparsed` is the total-coercion sentinel: the source value did not match
/// the declared semantic type. The raw string is preserved alongside in the
/// record's overflow map under a `<field>#raw` shadow key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
    TimeRange { start: NaiveTime, end: NaiveTime },
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
    Enum(EnumValue),
    Email(String),
    Json(serde_json::Value),
    Unparsed,
}

impl FieldValue {
    pub fn is_unparsed(&self) -> bool {
        matches!(self, FieldValue::Unparsed)
    }

    /// Text content for `Text`/`Email` variants and enum literals.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(v) | FieldValue::Email(v) => Some(v),
            FieldValue::Enum(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(v) => Some(*v),
            FieldValue::DateTime(v) => Some(v.date()),
            _ => None,
        }
    }
}
