//! Read narration CSVs.
//!
//! Expected layout: a header row, then one transaction per row. Only the
//! narration column is interpreted; every other cell (including `id`) is
//! carried through untouched.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::types::NarrationTable;

pub fn read_narrations(path: impl AsRef<Path>, text_column: &str) -> Result<NarrationTable> {
    let path = path.as_ref();
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers: Vec<String> = rdr
        .headers()
        .with_context(|| format!("reading header of {}", path.display()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let text_index = match headers.iter().position(|h| h.trim() == text_column) {
        Some(i) => i,
        None => bail!(
            "{} has no `{}` column (found: {})",
            path.display(),
            text_column,
            headers.join(", ")
        ),
    };

    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("{}: row {}", path.display(), i + 1))?;
        let mut row: Vec<String> = record.iter().map(|c| c.to_string()).collect();
        // Short rows are padded, long rows truncated to the header width
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    Ok(NarrationTable {
        headers,
        rows,
        text_index,
    })
}
