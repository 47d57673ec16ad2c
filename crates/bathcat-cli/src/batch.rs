//! Batch driver for the `export` and `inspect` commands.
//!
//! Documents are processed one at a time in input order. A document that
//! cannot be exported is recorded in the [`BatchReport`] and the batch moves
//! on; only setup failures (bad vocabulary file, unwritable output) abort.

use std::path::{Path, PathBuf};

use anyhow::Context;
use bathcat_core::{ExportConfig, IdAllocator};
use bathcat_export::{
    export_product, inspect_attributes, write_csv_file, CombinationRow, ExportSettings,
    ProductRow,
};
use serde_json::Value;

use crate::publish::{publish_all, OutboxSink};

const PRODUCTS_FILE_SUFFIX: &str = "products_import.csv";
const COMBINATIONS_FILE_SUFFIX: &str = "combinations_import.csv";

#[derive(Debug, Clone)]
pub(crate) struct ExportOptions {
    pub output_dir: PathBuf,
    pub category: Option<String>,
    pub first_id: Option<u64>,
    pub outbox: Option<PathBuf>,
    pub dry_run: bool,
}

/// A document (or whole file) that produced no rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SkippedDocument {
    pub file: PathBuf,
    /// Position inside a JSON array file; `None` when the file itself failed.
    pub index: Option<usize>,
    pub reason: String,
}

#[derive(Debug, Default)]
pub(crate) struct BatchReport {
    pub exported: usize,
    pub skipped: Vec<SkippedDocument>,
    pub skipped_options: usize,
    pub product_rows: Vec<ProductRow>,
    pub combination_rows: Vec<CombinationRow>,
}

/// Reads a snapshot file holding either one document or an array of them.
pub(crate) fn load_documents(path: &Path) -> anyhow::Result<Vec<Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    Ok(match value {
        Value::Array(documents) => documents,
        document => vec![document],
    })
}

/// Exports every document of every input file.
pub(crate) fn run_batch(
    inputs: &[PathBuf],
    ids: &mut IdAllocator,
    settings: &ExportSettings,
) -> BatchReport {
    let mut report = BatchReport::default();

    for file in inputs {
        let documents = match load_documents(file) {
            Ok(documents) => documents,
            Err(e) => {
                let reason = format!("{e:#}");
                tracing::warn!(file = %file.display(), error = %reason, "skipping input file");
                report.skipped.push(SkippedDocument {
                    file: file.clone(),
                    index: None,
                    reason,
                });
                continue;
            }
        };

        for (index, document) in documents.iter().enumerate() {
            match export_product(document, ids, settings) {
                Ok(export) => {
                    report.exported += 1;
                    report.skipped_options += export.skipped_options.len();
                    report.product_rows.push(export.product);
                    report.combination_rows.extend(export.combinations);
                }
                Err(e) => {
                    tracing::warn!(file = %file.display(), index, error = %e, "skipping product");
                    report.skipped.push(SkippedDocument {
                        file: file.clone(),
                        index: Some(index),
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    tracing::info!(
        exported = report.exported,
        skipped = report.skipped.len(),
        skipped_options = report.skipped_options,
        combinations = report.combination_rows.len(),
        "batch complete"
    );
    report
}

/// Writes the non-empty row sets as `{timestamp}-{prefix}-…_import.csv` and
/// returns the paths written.
pub(crate) fn write_outputs(
    report: &BatchReport,
    dir: &Path,
    prefix: &str,
    timestamp: &str,
) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    let mut written = Vec::new();

    if !report.product_rows.is_empty() {
        let path = dir.join(format!("{timestamp}-{prefix}-{PRODUCTS_FILE_SUFFIX}"));
        write_csv_file(&path, &report.product_rows)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }

    if !report.combination_rows.is_empty() {
        let path = dir.join(format!("{timestamp}-{prefix}-{COMBINATIONS_FILE_SUFFIX}"));
        write_csv_file(&path, &report.combination_rows)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}

fn settings_for(config: &ExportConfig, category: Option<&str>) -> anyhow::Result<ExportSettings> {
    let vocabulary = config
        .load_vocabulary()
        .context("failed to load attribute vocabulary")?;
    let mut settings = ExportSettings::from_config(config, vocabulary);
    if let Some(category) = category {
        settings.category_id = category.to_string();
    }
    Ok(settings)
}

/// `export` command.
///
/// # Errors
///
/// Returns an error if the vocabulary cannot be loaded or an output file
/// cannot be written or published. Per-document failures are reported, not
/// propagated.
pub(crate) fn run_export(
    config: &ExportConfig,
    inputs: &[PathBuf],
    options: &ExportOptions,
) -> anyhow::Result<()> {
    let settings = settings_for(config, options.category.as_deref())?;
    let mut ids = IdAllocator::new(
        options.first_id.unwrap_or(config.first_product_id),
        config.product_id_step,
    );

    let report = run_batch(inputs, &mut ids, &settings);

    for skipped in &report.skipped {
        match skipped.index {
            Some(index) => println!(
                "skipped {} [{index}]: {}",
                skipped.file.display(),
                skipped.reason
            ),
            None => println!("skipped {}: {}", skipped.file.display(), skipped.reason),
        }
    }

    if options.dry_run {
        println!(
            "dry-run: would export {} products and {} combinations ({} skipped)",
            report.product_rows.len(),
            report.combination_rows.len(),
            report.skipped.len()
        );
        return Ok(());
    }

    let timestamp = chrono::Local::now().format("%Y%m%d%H%M%S").to_string();
    let written = write_outputs(&report, &options.output_dir, &config.file_prefix, &timestamp)?;
    if written.is_empty() {
        println!("nothing to export ({} skipped)", report.skipped.len());
        return Ok(());
    }
    for path in &written {
        println!("wrote {}", path.display());
    }

    if let Some(outbox) = &options.outbox {
        let sink = OutboxSink::new(outbox.clone());
        let published = publish_all(&sink, &written)?;
        println!("published {} files to {}", published.len(), outbox.display());
    }

    Ok(())
}

/// `inspect` command: prints one attribute report per document.
///
/// # Errors
///
/// Returns an error if the file or vocabulary cannot be loaded, or the report
/// cannot be serialized.
pub(crate) fn run_inspect(config: &ExportConfig, file: &Path) -> anyhow::Result<()> {
    let settings = settings_for(config, None)?;
    let documents = load_documents(file)?;

    let mut reports = Vec::with_capacity(documents.len());
    for (index, document) in documents.iter().enumerate() {
        match inspect_attributes(document, &settings) {
            Ok(report) => reports.push(report),
            Err(e) => tracing::warn!(file = %file.display(), index, error = %e, "skipping product"),
        }
    }

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod tests;
