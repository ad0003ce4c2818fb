//! Template classification.
//!
//! Subjects are the most stable signal across form revisions, so subject
//! rules run first over the whole template list; structural body probes are
//! only consulted when no subject rule matched. Classification is a pure
//! function of the envelope and the template list and never fails: an
//! envelope nothing matches is simply unclassified.

use tracing::debug;

use carelog_model::{BodyKind, MailEnvelope, TemplateDefinition};

use crate::html_tables::ROW_MARKER_CLASS;

/// Picks the template for an envelope, or `None` when nothing matches.
///
/// Templates are evaluated in slice order (catalogue manifest order); the
/// first match wins.
pub fn classify<'a>(
    templates: &'a [TemplateDefinition],
    envelope: &MailEnvelope,
) -> Option<&'a TemplateDefinition> {
    let subject = envelope.subject.to_lowercase();
    for template in templates {
        if template
            .subject_contains
            .iter()
            .any(|keyword| !keyword.is_empty() && subject.contains(keyword))
        {
            debug!(template = %template.id, "classified by subject");
            return Some(template);
        }
    }

    for template in templates {
        if template.header_probes.is_empty() {
            continue;
        }
        let Some(body) = envelope.body_of(template.body) else {
            continue;
        };
        if template.body == BodyKind::Html && !body.contains(ROW_MARKER_CLASS) {
            continue;
        }
        let body_lower = body.to_lowercase();
        if template
            .header_probes
            .iter()
            .any(|probe| !probe.is_empty() && body_lower.contains(probe))
        {
            debug!(template = %template.id, "classified by structural probe");
            return Some(template);
        }
    }

    debug!(subject = %envelope.subject, "no template rule matched");
    None
}
