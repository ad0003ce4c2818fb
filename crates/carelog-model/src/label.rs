//! Label normalization.
//!
//! Raw labels drift across senders and form revisions ("Written by;" vs
//! "Written by:"). Normalization canonicalizes case, whitespace and trailing
//! punctuation so that per-template alias tables can use one stable key per
//! question. Anything semantic (synonyms, rewordings) stays in the alias
//! tables; the normalizer never reorders or rewrites question text.

/// Punctuation stripped from the end of a label.
const TRAILING_PUNCTUATION: [char; 4] = [':', ';', '.', '?'];

/// Canonicalizes a raw field label into a stable lookup key.
///
/// Lower-cases, collapses internal whitespace runs to single spaces, strips
/// leading/trailing whitespace and trailing punctuation in `{:;.?}`.
/// Idempotent: `normalize_label(normalize_label(l)) == normalize_label(l)`.
pub fn normalize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending_space = false;
    for ch in label.trim().chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        for lower in ch.to_lowercase() {
            out.push(lower);
        }
    }
    while let Some(last) = out.chars().last() {
        if TRAILING_PUNCTUATION.contains(&last) || last.is_whitespace() {
            out.pop();
        } else {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_collapses_whitespace() {
        assert_eq!(normalize_label("  Written   by\t"), "written by");
    }

    #[test]
    fn strips_trailing_punctuation_runs() {
        assert_eq!(normalize_label("Written by;"), "written by");
        assert_eq!(normalize_label("Written by:"), "written by");
        assert_eq!(
            normalize_label("Did Will have a Bowel Movement today?."),
            "did will have a bowel movement today"
        );
    }

    #[test]
    fn keeps_internal_punctuation() {
        assert_eq!(
            normalize_label("Date & time you became aware of the incident"),
            "date & time you became aware of the incident"
        );
    }

    #[test]
    fn idempotent_on_already_normalized_input() {
        let once = normalize_label("Which shift are you reporting on?");
        assert_eq!(normalize_label(&once), once);
    }
}
