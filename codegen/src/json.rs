//! JSON rendering for consumers outside Rust and C++.

use anyhow::{Context, Result};
use serde::Serialize;

use fingerprint_poly::{GeneratedTables, ModulusConfig, TableData, FOLD_POSITIONS};

/// Output file name for [`crate::Format::Json`].
pub const FILE_NAME: &str = "fingerprint_tables.json";

#[derive(Serialize)]
struct Document<'a> {
    config: &'a ModulusConfig,
    tables: Vec<Width<'a>>,
}

#[derive(Serialize)]
struct Width<'a> {
    bits: u32,
    words: usize,
    poly: &'a [u64],
    /// `[position][byte][word]`.
    table: Vec<Vec<&'a [u64]>>,
}

impl<'a> Width<'a> {
    fn from_table(width: &'a dyn TableData) -> Self {
        let table = (0..FOLD_POSITIONS)
            .map(move |position| {
                (0..=u8::MAX)
                    .map(move |x| width.entry_words(position, x))
                    .collect()
            })
            .collect();
        Self {
            bits: width.bits(),
            words: width.word_count(),
            poly: width.poly_words(),
            table,
        }
    }
}

/// Renders all widths as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render(tables: &GeneratedTables) -> Result<String> {
    let doc = Document {
        config: &tables.config,
        tables: tables.widths().into_iter().map(Width::from_table).collect(),
    };
    let mut out = serde_json::to_string_pretty(&doc).context("Failed to serialize tables to JSON")?;
    out.push('\n');
    Ok(out)
}
