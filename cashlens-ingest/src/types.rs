use cashlens_core::{Category, Direction};
use serde::Serialize;
use std::collections::BTreeMap;

/// Columns appended to every output row, in this order
pub const OUTPUT_COLUMNS: [&str; 6] = [
    "date",
    "amount",
    "merchant",
    "category",
    "sub_category",
    "direction",
];

/// Raw input table. Every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrationTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Index of the narration column within `headers`
    pub text_index: usize,
}

impl NarrationTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Narration text of each row, in row order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r[self.text_index].as_str())
    }
}

/// Knobs for a batch run
#[derive(Debug, Clone, PartialEq)]
pub struct CleanOptions {
    /// Header name of the narration column
    pub text_column: String,
    /// Spread classification over the rayon pool
    pub parallel: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            text_column: "text".to_string(),
            parallel: true,
        }
    }
}

/// Aggregate counts over one batch
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub rows: usize,
    pub by_category: BTreeMap<Category, usize>,
    pub by_direction: BTreeMap<Direction, usize>,
    pub missing_amount: usize,
}
