//! Semantic-type coercion.
//!
//! Coercion is total: a value that does not match its declared type yields
//! the [`FieldValue::Unparsed`] sentinel instead of an error, and the mapper
//! keeps the raw string in the overflow under a shadow key. Formats are
//! fixed ordered lists; the first match wins.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use carelog_model::{CanonicalField, EnumValue, FieldValue, RawValue, SemanticType};

const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %I:%M %p",
    "%Y-%m-%d %I:%M%p",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%d/%m/%Y %H:%M",
    "%d/%m/%Y %I:%M %p",
    "%Y-%m-%d %H:%M:%S",
];

const TIME_FORMATS: [&str; 5] = ["%H:%M:%S", "%H:%M", "%I:%M %p", "%I:%M%p", "%I %p"];

const RANGE_SEPARATORS: [&str; 5] = [" - ", " \u{2013} ", " to ", "-", "\u{2013}"];

/// Result of coercing one raw value.
#[derive(Debug, Clone, PartialEq)]
pub struct Coercion {
    pub value: FieldValue,
    /// Open-enum literal outside the declared set, for catalogue review.
    pub enum_review: Option<String>,
}

impl Coercion {
    fn plain(value: FieldValue) -> Self {
        Self {
            value,
            enum_review: None,
        }
    }

    fn unparsed() -> Self {
        Self::plain(FieldValue::Unparsed)
    }
}

/// Coerces a raw parser value to the field's declared semantic type.
pub fn coerce(raw: &RawValue, field: &CanonicalField) -> Coercion {
    let flat = raw.flatten();
    match field.semantic_type {
        SemanticType::String => Coercion::plain(FieldValue::Text(collapse_whitespace(&flat))),
        SemanticType::Text => Coercion::plain(FieldValue::Text(flat.trim().to_string())),
        SemanticType::Bool => match parse_bool(&flat) {
            Some(v) => Coercion::plain(FieldValue::Bool(v)),
            None => Coercion::unparsed(),
        },
        SemanticType::Date => match parse_date(&flat) {
            Some(v) => Coercion::plain(FieldValue::Date(v)),
            None => Coercion::unparsed(),
        },
        SemanticType::DateTime => match parse_datetime(&flat) {
            Some(v) => Coercion::plain(FieldValue::DateTime(v)),
            None => Coercion::unparsed(),
        },
        SemanticType::Time => match parse_time(&flat) {
            Some(v) => Coercion::plain(FieldValue::Time(v)),
            None => Coercion::unparsed(),
        },
        SemanticType::TimeRange => match parse_time_range(&flat) {
            Some((start, end)) => Coercion::plain(FieldValue::TimeRange { start, end }),
            None => Coercion::unparsed(),
        },
        SemanticType::Integer => match parse_integer(&flat) {
            Some(v) => Coercion::plain(FieldValue::Integer(v)),
            None => Coercion::unparsed(),
        },
        SemanticType::Float => match parse_float(&flat) {
            Some(v) => Coercion::plain(FieldValue::Float(v)),
            None => Coercion::unparsed(),
        },
        SemanticType::StringList => Coercion::plain(FieldValue::List(coerce_list(raw))),
        SemanticType::Email => match parse_email(&flat) {
            Some(v) => Coercion::plain(FieldValue::Email(v)),
            None => Coercion::unparsed(),
        },
        SemanticType::Json => match serde_json::from_str(flat.trim()) {
            Ok(v) => Coercion::plain(FieldValue::Json(v)),
            Err(_) => Coercion::unparsed(),
        },
        SemanticType::Enum => coerce_enum(&flat, &field.values),
        // Attachment references are record-level, never labelled values.
        SemanticType::AttachmentList => Coercion::unparsed(),
    }
}

/// Case-insensitive affirmative/negative lexicon, tolerant of trailing
/// elaboration ("Yes - twice this morning").
pub fn parse_bool(value: &str) -> Option<bool> {
    let lowered = value.trim().to_lowercase();
    if lowered == "y" || lowered == "true" || lowered == "1" || lowered.starts_with("yes") {
        return Some(true);
    }
    if lowered == "n" || lowered == "false" || lowered == "0" || lowered.starts_with("no") {
        return Some(false);
    }
    None
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
}

pub fn parse_time(value: &str) -> Option<NaiveTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
}

/// Parses "start - end" windows such as "3:00 PM - 3:30 PM".
pub fn parse_time_range(value: &str) -> Option<(NaiveTime, NaiveTime)> {
    let trimmed = value.trim();
    for separator in RANGE_SEPARATORS {
        if let Some((left, right)) = trimmed.split_once(separator)
            && let Some(start) = parse_time(left)
            && let Some(end) = parse_time(right)
        {
            return Some((start, end));
        }
    }
    None
}

/// Extracts the first digit run, ignoring units and digit grouping
/// ("Type 4" -> 4, "2,100 steps" -> 2100).
pub fn parse_integer(value: &str) -> Option<i64> {
    let cleaned = value.replace(',', "");
    let digits: String = cleaned
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Extracts the first numeric token, ignoring units ("3.7 km" -> 3.7).
pub fn parse_float(value: &str) -> Option<f64> {
    let cleaned = value.replace(',', "");
    let start = cleaned.find(|c: char| c.is_ascii_digit())?;
    let mut end = start;
    let mut seen_dot = false;
    for (idx, ch) in cleaned[start..].char_indices() {
        if ch.is_ascii_digit() {
            end = start + idx + 1;
        } else if ch == '.' && !seen_dot {
            seen_dot = true;
            end = start + idx + 1;
        } else {
            break;
        }
    }
    cleaned[start..end].trim_end_matches('.').parse().ok()
}

/// Accepts a plausible addr-spec; anything else is unparsed.
pub fn parse_email(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let (local, domain) = trimmed.split_once('@')?;
    if local.is_empty()
        || domain.is_empty()
        || !domain.contains('.')
        || domain.contains('@')
        || trimmed.chars().any(char::is_whitespace)
    {
        return None;
    }
    Some(trimmed.to_string())
}

/// Splits a raw value into an ordered list, preserving duplicates.
///
/// Pill groups are already lists and only get trimmed. Text values accept a
/// JSON array literal; multi-line text splits on lines with bullet markers
/// stripped (bullet items may contain commas); single-line text splits on
/// commas and semicolons (the meals case).
pub fn coerce_list(raw: &RawValue) -> Vec<String> {
    match raw {
        RawValue::List(items) => items
            .iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect(),
        RawValue::Text(text) => split_list_text(text),
    }
}

fn split_list_text(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if trimmed.starts_with('[')
        && let Ok(serde_json::Value::Array(items)) = serde_json::from_str(trimmed)
    {
        return items
            .iter()
            .map(|item| match item {
                serde_json::Value::String(s) => s.trim().to_string(),
                other => other.to_string(),
            })
            .filter(|item| !item.is_empty())
            .collect();
    }
    if trimmed.contains('\n') {
        return trimmed
            .lines()
            .map(strip_bullet)
            .filter(|line| !line.is_empty())
            .collect();
    }
    trimmed
        .replace(';', ",")
        .split(',')
        .map(strip_bullet)
        .filter(|item| !item.is_empty())
        .collect()
}

fn strip_bullet(line: &str) -> String {
    line.trim()
        .trim_start_matches(['-', '*', '\u{2022}'])
        .trim()
        .to_string()
}

fn coerce_enum(value: &str, declared: &[String]) -> Coercion {
    let literal = collapse_whitespace(value);
    for member in declared {
        if member.eq_ignore_ascii_case(&literal) {
            return Coercion::plain(FieldValue::Enum(EnumValue::Known(member.clone())));
        }
    }
    Coercion {
        value: FieldValue::Enum(EnumValue::Other(literal.clone())),
        enum_review: Some(literal),
    }
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_lexicon_is_prefix_tolerant() {
        assert_eq!(parse_bool("Yes"), Some(true));
        assert_eq!(parse_bool("yes - twice this morning"), Some(true));
        assert_eq!(parse_bool("Y"), Some(true));
        assert_eq!(parse_bool("No"), Some(false));
        assert_eq!(parse_bool("FALSE"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn date_formats_first_match_wins() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 26).expect("valid date");
        assert_eq!(parse_date("2024-03-26"), Some(expected));
        assert_eq!(parse_date("26/03/2024"), Some(expected));
        assert_eq!(parse_date("26 Mar 2024"), Some(expected));
        assert_eq!(parse_date("March 26, 2024"), Some(expected));
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn datetime_accepts_twelve_hour_clock() {
        let parsed = parse_datetime("2024-08-24 3:00 PM").expect("parses");
        assert_eq!(parsed.format("%Y-%m-%dT%H:%M").to_string(), "2024-08-24T15:00");
    }

    #[test]
    fn time_range_splits_on_dash() {
        let (start, end) = parse_time_range("3:00 PM - 3:30 PM").expect("parses");
        assert_eq!(start.format("%H:%M").to_string(), "15:00");
        assert_eq!(end.format("%H:%M").to_string(), "15:30");
        assert!(parse_time_range("all afternoon").is_none());
    }

    #[test]
    fn numbers_shed_units_and_grouping() {
        assert_eq!(parse_integer("Type 4"), Some(4));
        assert_eq!(parse_integer("2,100 steps"), Some(2100));
        assert_eq!(parse_integer("none"), None);
        assert_eq!(parse_float("3.7 km"), Some(3.7));
        assert_eq!(parse_float("approx 2"), Some(2.0));
        assert_eq!(parse_float("a lot"), None);
    }

    #[test]
    fn email_requires_plausible_addr_spec() {
        assert_eq!(
            parse_email(" jane@example.org "),
            Some("jane@example.org".to_string())
        );
        assert_eq!(parse_email("not an email"), None);
        assert_eq!(parse_email("jane@localhost"), None);
    }

    #[test]
    fn list_accepts_json_arrays() {
        let raw = RawValue::Text("[\"Toast\", \"Soup\", \"Roast dinner\"]".to_string());
        assert_eq!(coerce_list(&raw), vec!["Toast", "Soup", "Roast dinner"]);
    }

    #[test]
    fn multiline_lists_split_on_lines_only() {
        let raw = RawValue::Text(
            "- Moved residents to a safe place, away from Will\n- Called the manager".to_string(),
        );
        assert_eq!(
            coerce_list(&raw),
            vec![
                "Moved residents to a safe place, away from Will",
                "Called the manager"
            ]
        );
    }

    #[test]
    fn single_line_lists_split_on_commas_and_semicolons() {
        let raw = RawValue::Text("Weet-Bix, ham sandwich; roast dinner".to_string());
        assert_eq!(
            coerce_list(&raw),
            vec!["Weet-Bix", "ham sandwich", "roast dinner"]
        );
    }

    #[test]
    fn pill_lists_keep_order_and_duplicates() {
        let raw = RawValue::List(vec![
            " Frustrated ".to_string(),
            "Tired".to_string(),
            "Tired".to_string(),
        ]);
        assert_eq!(coerce_list(&raw), vec!["Frustrated", "Tired", "Tired"]);
    }

    #[test]
    fn json_fields_accept_any_document() {
        let field = CanonicalField {
            name: "form_payload".to_string(),
            entity: carelog_model::EntityKind::ShiftNote,
            semantic_type: SemanticType::Json,
            mandatory: false,
            values: Vec::new(),
        };
        let ok = coerce(&RawValue::Text("{\"steps\": 2100}".to_string()), &field);
        match ok.value {
            FieldValue::Json(value) => assert_eq!(value["steps"], 2100),
            other => panic!("unexpected value: {other:?}"),
        }
        let bad = coerce(&RawValue::Text("not json".to_string()), &field);
        assert!(bad.value.is_unparsed());
    }

    #[test]
    fn enum_matches_declared_casing() {
        let declared = vec!["Morning".to_string(), "Afternoon".to_string()];
        let known = coerce_enum("morning", &declared);
        assert_eq!(
            known.value,
            FieldValue::Enum(EnumValue::Known("Morning".to_string()))
        );
        assert!(known.enum_review.is_none());

        let other = coerce_enum("Split shift", &declared);
        assert_eq!(
            other.value,
            FieldValue::Enum(EnumValue::Other("Split shift".to_string()))
        );
        assert_eq!(other.enum_review.as_deref(), Some("Split shift"));
    }
}
