//! Per-envelope extraction.
//!
//! classify -> parse -> map -> assemble. Every step is total: an envelope
//! that cannot be classified, or whose expected body is missing or
//! unreadable, still yields a record carrying the overflow and attachments.

use tracing::{debug, warn};

use carelog_ingest::{classify, parse_question_rows, parse_sections};
use carelog_map::{apply, overflow_only};
use carelog_model::{BodyKind, Catalog, ExtractedRecord, MailEnvelope, RawField};

use crate::assemble::assemble;

/// Extracts one canonical record from one envelope. Never fails.
pub fn extract_envelope(catalog: &Catalog, envelope: &MailEnvelope) -> ExtractedRecord {
    let template = classify(catalog.templates(), envelope);

    let mapped = match template {
        Some(template) => match envelope.body_of(template.body) {
            Some(body) => {
                let raws = parse_body(template.body, body);
                debug!(
                    template = %template.id,
                    rows = raws.len(),
                    "parsed labelled fields"
                );
                apply(template, catalog.dictionary(), &raws)
            }
            None => {
                // Expected body part is absent; salvage whatever the other
                // part holds into the overflow.
                warn!(
                    template = %template.id,
                    expected = %template.body,
                    "expected body part missing, salvaging"
                );
                overflow_only(&salvage(envelope))
            }
        },
        None => overflow_only(&salvage(envelope)),
    };

    assemble(catalog, template, mapped, envelope)
}

fn parse_body(kind: BodyKind, body: &str) -> Vec<RawField> {
    match kind {
        BodyKind::Text => parse_sections(body),
        BodyKind::Html => parse_question_rows(body),
    }
}

/// Best-effort row extraction for envelopes with no usable template.
fn salvage(envelope: &MailEnvelope) -> Vec<RawField> {
    if let Some(html) = envelope.html_body.as_deref() {
        let raws = parse_question_rows(html);
        if !raws.is_empty() {
            return raws;
        }
    }
    if let Some(text) = envelope.text_body.as_deref() {
        return parse_sections(text);
    }
    Vec::new()
}
