//! Write classified tables back to CSV.

use anyhow::{bail, Context, Result};
use cashlens_core::TransactionRecord;
use std::path::Path;

use crate::types::{NarrationTable, OUTPUT_COLUMNS};

/// Write the original table with the six classification columns appended.
/// `records[i]` belongs to `table.rows[i]`.
pub fn write_classified(
    path: impl AsRef<Path>,
    table: &NarrationTable,
    records: &[TransactionRecord],
) -> Result<()> {
    let path = path.as_ref();
    if records.len() != table.len() {
        bail!(
            "record count {} does not match row count {}",
            records.len(),
            table.len()
        );
    }

    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    let header = table
        .headers
        .iter()
        .map(String::as_str)
        .chain(OUTPUT_COLUMNS);
    wtr.write_record(header)?;

    for (row, record) in table.rows.iter().zip(records) {
        let mut out: Vec<String> = row.clone();
        out.extend(record_cells(record));
        wtr.write_record(&out)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    wtr.flush()
        .with_context(|| format!("flushing {}", path.display()))?;
    Ok(())
}

/// Cells in `OUTPUT_COLUMNS` order; a missing amount is an empty cell.
pub fn record_cells(record: &TransactionRecord) -> [String; 6] {
    [
        record.date.clone(),
        record.amount.map(format_amount).unwrap_or_default(),
        record.merchant.clone(),
        record.category.to_string(),
        record.sub_category.clone(),
        record.direction.to_string(),
    ]
}

/// Whole amounts keep one decimal (`450.0`) so the column reads as numeric.
fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.1}", amount)
    } else {
        amount.to_string()
    }
}
