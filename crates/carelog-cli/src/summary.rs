use std::collections::BTreeMap;
use std::path::PathBuf;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use carelog_model::EntityKind;

/// Counts reported after an `extract` run.
pub struct ExtractSummary {
    pub input_dir: PathBuf,
    /// `None` for dry runs.
    pub output_dir: Option<PathBuf>,
    pub total: usize,
    pub per_entity: BTreeMap<EntityKind, usize>,
    pub incomplete: usize,
    pub enum_review: usize,
    pub errors: Vec<String>,
}

impl ExtractSummary {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

pub fn print_summary(summary: &ExtractSummary) {
    println!("Input: {}", summary.input_dir.display());
    match &summary.output_dir {
        Some(dir) => println!("Output: {}", dir.display()),
        None => println!("Output: (dry run)"),
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Entity"), header_cell("Records")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (entity, count) in &summary.per_entity {
        let entity_cell = if *entity == EntityKind::Unclassified {
            Cell::new(entity.to_string()).fg(Color::Yellow)
        } else {
            Cell::new(entity.to_string())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold)
        };
        table.add_row(vec![entity_cell, Cell::new(count)]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.total).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    println!(
        "Incomplete: {}   Enum literals for review: {}",
        summary.incomplete, summary.enum_review
    );

    if !summary.errors.is_empty() {
        eprintln!("Skipped envelopes:");
        for error in &summary.errors {
            eprintln!("- {error}");
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
