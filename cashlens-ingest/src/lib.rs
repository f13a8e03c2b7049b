//! cashlens-ingest: batch driver that classifies every narration in a CSV
//! file and writes the augmented table.

pub mod batch;
pub mod reader;
pub mod types;
pub mod writer;

pub use batch::{classify_table, clean_file, summarize};
pub use reader::read_narrations;
pub use types::{BatchSummary, CleanOptions, NarrationTable, OUTPUT_COLUMNS};
pub use writer::write_classified;
