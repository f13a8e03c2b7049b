//! Batch classification over a narration table.
//!
//! Rows are independent, so the parallel path just maps the classifier over
//! the rayon pool; `collect` keeps input order.

use anyhow::{Context, Result};
use cashlens_core::{Classifier, TransactionRecord};
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info};

use crate::reader::read_narrations;
use crate::types::{BatchSummary, CleanOptions, NarrationTable};
use crate::writer::write_classified;

/// Classify every row; `result[i]` belongs to `table.rows[i]`.
pub fn classify_table(
    classifier: &Classifier,
    table: &NarrationTable,
    parallel: bool,
) -> Vec<TransactionRecord> {
    let texts: Vec<&str> = table.texts().collect();
    let classify_row = |i: usize, text: &str| {
        let record = classifier.classify(text);
        debug!(
            "row {}: {} / {} / {} ({})",
            i, record.category, record.sub_category, record.merchant, record.direction
        );
        record
    };

    if parallel {
        texts
            .par_iter()
            .enumerate()
            .map(|(i, t)| classify_row(i, *t))
            .collect()
    } else {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| classify_row(i, *t))
            .collect()
    }
}

pub fn summarize(records: &[TransactionRecord]) -> BatchSummary {
    let mut summary = BatchSummary {
        rows: records.len(),
        ..Default::default()
    };
    for r in records {
        *summary.by_category.entry(r.category).or_insert(0) += 1;
        *summary.by_direction.entry(r.direction).or_insert(0) += 1;
        if r.amount.is_none() {
            summary.missing_amount += 1;
        }
    }
    summary
}

/// Read `input`, classify, write `output`. Returns the classified table so
/// callers can preview it.
pub fn clean_file(
    classifier: &Classifier,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &CleanOptions,
) -> Result<(NarrationTable, Vec<TransactionRecord>, BatchSummary)> {
    let input = input.as_ref();
    let output = output.as_ref();

    let table = read_narrations(input, &options.text_column)
        .with_context(|| format!("reading {}", input.display()))?;
    info!(
        "classifying {} rows from {} (parallel: {})",
        table.len(),
        input.display(),
        options.parallel
    );

    let records = classify_table(classifier, &table, options.parallel);
    write_classified(output, &table, &records)?;

    let summary = summarize(&records);
    info!(
        "wrote {} rows to {} ({} without amount)",
        summary.rows,
        output.display(),
        summary.missing_amount
    );
    Ok((table, records, summary))
}
