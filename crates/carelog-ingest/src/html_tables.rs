//! Label/value extraction from table-layout HTML bodies.
//!
//! Form exports mark each question as a `tr.questionRow` with a
//! `td.questionColumn` label cell and a `td.valueColumn` value cell.
//! Multi-select "pill" choices arrive as small nested tables inside the
//! value cell; each nested table is one pill, and two or more pills flatten
//! to an ordered list. `<br>` becomes a real newline because downstream
//! bullet extraction depends on line breaks surviving.
//!
//! The walk is total: form markup is not XML, so the tokenizer runs with
//! end-name checking off, and a tokenizer error simply ends the walk with
//! the rows collected so far.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use carelog_model::{RawField, RawValue};

/// Class attribute marking a label/value table row.
pub const ROW_MARKER_CLASS: &str = "questionRow";
/// Class attribute of the label cell.
const QUESTION_CELL_CLASS: &str = "questionColumn";
/// Class attribute of the value cell.
const VALUE_CELL_CLASS: &str = "valueColumn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Question,
    Value,
}

#[derive(Default)]
struct RowState {
    tr_depth: usize,
    cell_stack: Vec<Option<Cell>>,
    saw_question_cell: bool,
    saw_value_cell: bool,
    question: Vec<String>,
    plain: Vec<String>,
    pills: Vec<String>,
    pill_depth: usize,
    pill_chunks: Vec<String>,
}

impl RowState {
    fn capture(&self) -> Option<Cell> {
        self.cell_stack.last().copied().flatten()
    }

    fn push_text(&mut self, text: &str) {
        match self.capture() {
            Some(Cell::Question) => self.question.push(text.to_string()),
            Some(Cell::Value) => {
                if self.pill_depth > 0 {
                    self.pill_chunks.push(text.to_string());
                } else {
                    self.plain.push(text.to_string());
                }
            }
            None => {}
        }
    }

    fn close_pill(&mut self) {
        let pill = collapse_whitespace(&self.pill_chunks.join(""));
        if !pill.is_empty() {
            self.pills.push(pill);
        }
        self.pill_chunks.clear();
    }

    fn finish(mut self) -> Option<RawField> {
        if self.pill_depth > 0 {
            self.close_pill();
        }
        if !self.saw_question_cell || !self.saw_value_cell {
            return None;
        }
        let label = collapse_whitespace(&self.question.join(""));
        if label.is_empty() {
            return None;
        }
        let plain = clean_multiline(&self.plain.join(""));
        let value = match (plain.is_empty(), self.pills.len()) {
            (true, 0) => RawValue::Text(String::new()),
            (true, 1) => RawValue::Text(self.pills.remove(0)),
            (true, _) => RawValue::List(std::mem::take(&mut self.pills)),
            (false, 0) => RawValue::Text(plain),
            // Mixed free text and pills: keep everything as lines.
            (false, _) => RawValue::Text(format!("{plain}\n{}", self.pills.join("\n"))),
        };
        Some(RawField { label, value })
    }
}

/// Walks the table rows of an HTML body in document order.
pub fn parse_question_rows(html: &str) -> Vec<RawField> {
    let mut reader = Reader::from_str(html);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.check_comments = false;

    let mut fields = Vec::new();
    let mut row: Option<RowState> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                let name = e.local_name();
                let name = name.as_ref();
                if name.eq_ignore_ascii_case(b"tr") {
                    if element_classes(&e).any(|c| c == ROW_MARKER_CLASS) {
                        // A marker row while one is open closes the old row.
                        if let Some(open) = row.take()
                            && let Some(field) = open.finish()
                        {
                            fields.push(field);
                        }
                        row = Some(RowState::default());
                    } else if let Some(state) = &mut row {
                        state.tr_depth += 1;
                    }
                } else if name.eq_ignore_ascii_case(b"td") {
                    if let Some(state) = &mut row {
                        let cell = if element_classes(&e).any(|c| c == QUESTION_CELL_CLASS) {
                            state.saw_question_cell = true;
                            Some(Cell::Question)
                        } else if element_classes(&e).any(|c| c == VALUE_CELL_CLASS) {
                            state.saw_value_cell = true;
                            Some(Cell::Value)
                        } else {
                            // Nested cells inherit the enclosing capture.
                            state.capture()
                        };
                        state.cell_stack.push(cell);
                    }
                } else if name.eq_ignore_ascii_case(b"br") {
                    if let Some(state) = &mut row {
                        state.push_text("\n");
                    }
                } else if name.eq_ignore_ascii_case(b"table")
                    && let Some(state) = &mut row
                    && state.capture() == Some(Cell::Value)
                {
                    state.pill_depth += 1;
                }
            }
            Ok(Event::End(e)) => {
                let name = e.local_name();
                let name = name.as_ref();
                if name.eq_ignore_ascii_case(b"tr") {
                    let closes_row = matches!(&row, Some(state) if state.tr_depth == 0);
                    if closes_row {
                        if let Some(field) = row.take().and_then(RowState::finish) {
                            fields.push(field);
                        }
                    } else if let Some(state) = &mut row {
                        state.tr_depth -= 1;
                    }
                } else if name.eq_ignore_ascii_case(b"td") {
                    if let Some(state) = &mut row {
                        state.cell_stack.pop();
                    }
                } else if name.eq_ignore_ascii_case(b"table")
                    && let Some(state) = &mut row
                    && state.pill_depth > 0
                {
                    state.pill_depth -= 1;
                    if state.pill_depth == 0 {
                        state.close_pill();
                    }
                }
            }
            Ok(Event::Text(t)) => {
                if let Some(state) = &mut row
                    && state.capture().is_some()
                {
                    let text = match std::str::from_utf8(&t)
                        .ok()
                        .and_then(|raw| {
                            quick_xml::escape::unescape_with(raw, resolve_named_entity).ok()
                        }) {
                        Some(cow) => cow.into_owned(),
                        None => String::from_utf8_lossy(&t).into_owned(),
                    };
                    state.push_text(&text.replace('\u{a0}', " "));
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if let Some(state) = &mut row
                    && state.capture().is_some()
                {
                    let name = String::from_utf8_lossy(&e).into_owned();
                    let resolved = resolve_entity_ref(&name);
                    state.push_text(&resolved.replace('\u{a0}', " "));
                }
            }
            Ok(Event::Eof) => break,
            Err(error) => {
                debug!(%error, "stopping table walk on malformed markup");
                break;
            }
            Ok(_) => {}
        }
    }

    // Salvage a row left open by truncated markup.
    if let Some(open) = row.take()
        && let Some(field) = open.finish()
    {
        fields.push(field);
    }

    fields
}

fn element_classes<'a, 'b>(e: &'a BytesStart<'b>) -> impl Iterator<Item = String> + 'a {
    e.attributes()
        .flatten()
        .filter(|attr| attr.key.as_ref().eq_ignore_ascii_case(b"class"))
        .flat_map(|attr| {
            String::from_utf8_lossy(&attr.value)
                .split_whitespace()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
        })
}

/// Entity names common in form-export HTML beyond the XML predefined set.
fn resolve_named_entity(entity: &str) -> Option<&'static str> {
    match entity {
        "nbsp" => Some("\u{a0}"),
        "rsquo" => Some("\u{2019}"),
        "lsquo" => Some("\u{2018}"),
        "rdquo" => Some("\u{201d}"),
        "ldquo" => Some("\u{201c}"),
        "ndash" => Some("\u{2013}"),
        "mdash" => Some("\u{2014}"),
        "hellip" => Some("\u{2026}"),
        _ => None,
    }
}

/// Resolves a general entity reference (named or numeric) to text,
/// falling back to the literal reference so nothing is dropped.
fn resolve_entity_ref(name: &str) -> String {
    if let Some(rest) = name.strip_prefix('#') {
        let parsed = if let Some(hex) = rest.strip_prefix('x').or_else(|| rest.strip_prefix('X')) {
            u32::from_str_radix(hex, 16).ok()
        } else {
            rest.parse::<u32>().ok()
        };
        if let Some(ch) = parsed.and_then(char::from_u32) {
            return ch.to_string();
        }
        return format!("&{name};");
    }
    match name {
        "amp" => "&".to_string(),
        "lt" => "<".to_string(),
        "gt" => ">".to_string(),
        "quot" => "\"".to_string(),
        "apos" => "'".to_string(),
        _ => resolve_named_entity(name)
            .map(ToString::to_string)
            .unwrap_or_else(|| format!("&{name};")),
    }
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trims each line, drops empty ones and keeps internal breaks.
fn clean_multiline(raw: &str) -> String {
    raw.replace('\r', "\n")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(collapse_whitespace)
        .collect::<Vec<_>>()
        .join("\n")
}
