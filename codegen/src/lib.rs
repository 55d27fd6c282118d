//! Fingerprint table code generator.
//!
//! Renders tables produced by `fingerprint_poly::generate` as source text
//! and writes them atomically. Consumers compile the emitted arrays in
//! directly, so the values and dimensions are a fixed format: a renderer
//! may change layout whitespace only together with every consumer.
//!
//! # Formats
//!
//! | Format | File | Literals |
//! |--------|------|----------|
//! | [`Format::Rust`] | `fingerprint_tables.rs` | hexadecimal |
//! | [`Format::Cpp`]  | `FingerprintTables.cpp` | decimal `LU` (legacy layout) |
//! | [`Format::Json`] | `fingerprint_tables.json` | JSON numbers |

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod cpp;
pub mod emit;
pub mod json;
pub mod rust;

use std::fmt;
use std::path::Path;

use anyhow::Result;
use fingerprint_poly::{GeneratedTables, FOLD_POSITIONS};

/// Output format of the generated tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// A Rust module with `const`/`static` arrays.
    Rust,
    /// The legacy `FingerprintTables.cpp` translation unit.
    Cpp,
    /// A JSON document.
    Json,
}

impl Format {
    /// Every format, in emission order.
    pub const ALL: [Format; 3] = [Format::Rust, Format::Cpp, Format::Json];

    /// File name written for this format.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Rust => rust::FILE_NAME,
            Self::Cpp => cpp::FILE_NAME,
            Self::Json => json::FILE_NAME,
        }
    }

    /// Renders `tables` in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON serializer fails.
    pub fn render(self, tables: &GeneratedTables) -> Result<String> {
        match self {
            Self::Rust => Ok(rust::render(tables)),
            Self::Cpp => Ok(cpp::render(tables)),
            Self::Json => json::render(tables),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rust => "rust",
            Self::Cpp => "cpp",
            Self::Json => "json",
        })
    }
}

/// Report of what was generated.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Number of width tables emitted per file.
    pub table_count: usize,
    /// Number of table entries emitted per file.
    pub entry_count: usize,
    /// Number of words emitted per file, moduli included.
    pub word_count: usize,
    /// Files written, relative to the output directory.
    pub files: Vec<String>,
}

/// Renders `tables` in each of `formats` and writes the files into `out_dir`.
///
/// Every file is rendered and staged before any is renamed into place, and
/// a failed rename rolls back the files already replaced, so a failed run
/// leaves the output directory as it was.
///
/// # Errors
///
/// Returns an error if rendering fails or any file cannot be written.
pub fn generate(
    tables: &GeneratedTables,
    formats: &[Format],
    out_dir: &Path,
) -> Result<GenerationReport> {
    let mut report = GenerationReport::default();
    for width in tables.widths() {
        report.table_count += 1;
        report.entry_count += FOLD_POSITIONS * 256;
        report.word_count += (FOLD_POSITIONS * 256 + 1) * width.word_count();
    }

    let rendered = formats
        .iter()
        .map(|&format| Ok((format, format.render(tables)?)))
        .collect::<Result<Vec<_>>>()?;

    let mut batch = emit::FileBatch::new();
    for (format, content) in &rendered {
        batch.stage(&out_dir.join(format.file_name()), content)?;
    }
    batch.commit()?;

    report.files = rendered
        .iter()
        .map(|(format, _)| format.file_name().to_string())
        .collect();
    Ok(report)
}
