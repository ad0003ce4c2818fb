use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span, warn};

use carelog_catalog::load_default_catalog;
use carelog_core::extract_batch;
use carelog_model::{EntityKind, MailEnvelope};

use crate::cli::ExtractArgs;
use crate::discovery::list_envelope_files;
use crate::summary::{ExtractSummary, apply_table_style, header_cell};

pub fn run_templates() -> Result<()> {
    let catalog = load_default_catalog().context("load catalogue")?;

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Template"),
        header_cell("Entity"),
        header_cell("Body"),
        header_cell("Labels"),
    ]);
    apply_table_style(&mut table);
    for template in catalog.templates() {
        table.add_row(vec![
            template.id.clone(),
            template.entity.to_string(),
            template.body.to_string(),
            template.labels.len().to_string(),
        ]);
    }
    println!("{table}");

    let mut fields = Table::new();
    fields.set_header(vec![
        header_cell("Entity"),
        header_cell("Fields"),
        header_cell("Mandatory"),
    ]);
    apply_table_style(&mut fields);
    for entity in [
        EntityKind::ShiftNote,
        EntityKind::IncidentReport,
        EntityKind::IncidentInvestigation,
    ] {
        fields.add_row(vec![
            entity.to_string(),
            catalog.dictionary().fields_of(entity).count().to_string(),
            catalog
                .dictionary()
                .mandatory_fields(entity)
                .count()
                .to_string(),
        ]);
    }
    println!("{fields}");
    Ok(())
}

pub fn run_extract(args: &ExtractArgs) -> Result<ExtractSummary> {
    let span = info_span!("extract", input = %args.input_dir.display());
    let _guard = span.enter();
    let started = Instant::now();

    let catalog = load_default_catalog().context("load catalogue")?;

    let mut files = list_envelope_files(&args.input_dir)?;
    if let Some(limit) = args.limit {
        files.truncate(limit);
    }
    info!(files = files.len(), "discovered envelope files");

    let mut errors = Vec::new();
    let mut sources: Vec<PathBuf> = Vec::new();
    let mut envelopes: Vec<MailEnvelope> = Vec::new();
    for path in files {
        match read_envelope(&path) {
            Ok(envelope) => {
                sources.push(path);
                envelopes.push(envelope);
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "skipping unreadable envelope");
                errors.push(format!("{}: {error:#}", path.display()));
            }
        }
    }

    let workers = args.workers.unwrap_or_else(default_workers);
    let records = extract_batch(&catalog, &envelopes, workers);

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.input_dir.join("records"));
    if !args.dry_run {
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("create output directory {}", output_dir.display()))?;
    }

    let mut per_entity: BTreeMap<EntityKind, usize> = BTreeMap::new();
    let mut incomplete = 0usize;
    let mut enum_review = 0usize;
    for (source, record) in sources.iter().zip(&records) {
        *per_entity.entry(record.entity).or_insert(0) += 1;
        if record.incomplete {
            incomplete += 1;
        }
        enum_review += record.enum_review.len();

        if !args.dry_run {
            let stem = source
                .file_stem()
                .and_then(|v| v.to_str())
                .unwrap_or("record");
            let target = output_dir.join(format!("{stem}.record.json"));
            let json = serde_json::to_string_pretty(record)
                .with_context(|| format!("serialize record for {}", source.display()))?;
            std::fs::write(&target, json)
                .with_context(|| format!("write record {}", target.display()))?;
        }
    }

    info!(
        records = records.len(),
        incomplete,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "batch finished"
    );

    Ok(ExtractSummary {
        input_dir: args.input_dir.clone(),
        output_dir: (!args.dry_run).then_some(output_dir),
        total: records.len(),
        per_entity,
        incomplete,
        enum_review,
        errors,
    })
}

fn read_envelope(path: &Path) -> Result<MailEnvelope> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read envelope {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse envelope {}", path.display()))
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(4)
}
