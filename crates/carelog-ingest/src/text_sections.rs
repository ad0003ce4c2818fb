//! Labelled-section extraction from plain-text bodies.
//!
//! A line shaped like `<label><delimiter><value>` (delimiter `:` or `;`)
//! opens a field; following lines that do not open a new field accumulate
//! into the open field's value, which supports multi-line narratives.
//! Content that never falls under a label is kept under the synthetic
//! [`UNLABELED_TRAILING_TEXT`] key rather than discarded.

use std::sync::LazyLock;

use regex::Regex;

use carelog_model::{RawField, UNLABELED_TRAILING_TEXT};

/// A plausible label: starts with a letter, stays short, and runs up to the
/// first `:` or `;` on the line.
static LABEL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<label>[A-Za-z][^:;]{0,78}?)\s*[:;]\s*(?P<rest>.*)$")
        .expect("label line pattern compiles")
});

/// Splits a flat text body into labelled fields in document order.
pub fn parse_sections(text: &str) -> Vec<RawField> {
    let mut fields: Vec<RawField> = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;
    let mut unlabeled: Vec<String> = Vec::new();

    for raw_line in text.replace("\r\n", "\n").split('\n') {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(captures) = LABEL_LINE.captures(line) {
            let label = captures["label"].trim().to_string();
            let rest = captures["rest"].trim().to_string();
            // "https://..." is a value, not a label line.
            if !rest.starts_with("//") {
                if let Some((open_label, lines)) = current.take() {
                    fields.push(close_field(open_label, lines));
                }
                let mut lines = Vec::new();
                if !rest.is_empty() {
                    lines.push(rest);
                }
                current = Some((label, lines));
                continue;
            }
        }

        match &mut current {
            Some((_, lines)) => lines.push(line.to_string()),
            None => unlabeled.push(line.to_string()),
        }
    }

    if let Some((open_label, lines)) = current.take() {
        fields.push(close_field(open_label, lines));
    }
    if !unlabeled.is_empty() {
        fields.push(RawField::text(UNLABELED_TRAILING_TEXT, unlabeled.join("\n")));
    }
    fields
}

fn close_field(label: String, lines: Vec<String>) -> RawField {
    RawField::text(label, lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use carelog_model::RawValue;

    #[test]
    fn splits_colon_and_semicolon_labels() {
        let body = "Date: 2024-03-26\nWritten by; Jane Doe\n";
        let fields = parse_sections(body);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], RawField::text("Date", "2024-03-26"));
        assert_eq!(fields[1], RawField::text("Written by", "Jane Doe"));
    }

    #[test]
    fn accumulates_multiline_values() {
        let body = "Description of activities:\nWent to the park.\nPlayed cards after dinner.\n\nDate: 2024-03-26\n";
        let fields = parse_sections(body);
        assert_eq!(
            fields[0],
            RawField::text(
                "Description of activities",
                "Went to the park.\nPlayed cards after dinner."
            )
        );
        assert_eq!(fields[1], RawField::text("Date", "2024-03-26"));
    }

    #[test]
    fn preamble_lands_in_unlabeled_trailing_text() {
        let body = "Good morning team\nDate: 2024-03-26\n";
        let fields = parse_sections(body);
        assert_eq!(fields[0], RawField::text("Date", "2024-03-26"));
        assert_eq!(
            fields[1],
            RawField::text(UNLABELED_TRAILING_TEXT, "Good morning team")
        );
    }

    #[test]
    fn body_without_labels_is_retained_whole() {
        let body = "just a note\nno structure here\n";
        let fields = parse_sections(body);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].label, UNLABELED_TRAILING_TEXT);
        assert_eq!(
            fields[0].value,
            RawValue::Text("just a note\nno structure here".to_string())
        );
    }

    #[test]
    fn urls_do_not_open_fields() {
        let body = "Notes: see link\nhttps://example.org/form\n";
        let fields = parse_sections(body);
        assert_eq!(fields.len(), 1);
        assert_eq!(
            fields[0],
            RawField::text("Notes", "see link\nhttps://example.org/form")
        );
    }

    #[test]
    fn empty_body_yields_nothing() {
        assert!(parse_sections("").is_empty());
        assert!(parse_sections("\n \n").is_empty());
    }
}
