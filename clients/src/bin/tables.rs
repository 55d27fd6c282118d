//! `fingerprint-tables` — Generates the Rabin fingerprint fold tables.
//!
//! Builds the 64-, 96- and 128-bit tables from the configured moduli and
//! writes them to the output directory.
//!
//! **Outputs:**
//! - `<out>/fingerprint_tables.rs` — Rust module (`--format rust`)
//! - `<out>/FingerprintTables.cpp` — legacy C++ tables (`--format cpp`)
//! - `<out>/fingerprint_tables.json` — JSON (`--format json`)
//!
//! **Usage:**
//! ```
//! fingerprint-tables [--out <path>] [--format <rust|cpp|json>]...
//!                    [--poly64 <hex>] [--poly96-m <hex>] [--poly96-l <hex>]
//!                    [--poly128-m <hex>] [--poly128-l <hex>]
//! ```
//!
//! The default moduli must not be changed: every stored fingerprint was
//! computed with them.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fingerprint_codegen::Format;
use fingerprint_poly::{generate, ModulusConfig, TableData};

/// Output format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Rust module with `const`/`static` arrays.
    Rust,
    /// Legacy `FingerprintTables.cpp`.
    Cpp,
    /// JSON document.
    Json,
}

impl From<OutputFormat> for Format {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Rust => Format::Rust,
            OutputFormat::Cpp => Format::Cpp,
            OutputFormat::Json => Format::Json,
        }
    }
}

/// Generate 64-, 96- and 128-bit Rabin fingerprint fold tables.
#[derive(Parser)]
#[command(
    name = "fingerprint-tables",
    about = "Generate Rabin fingerprint fold tables"
)]
struct Args {
    /// Directory to place output files in.
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Output format; repeat to emit several.
    #[arg(long = "format", value_enum, default_values_t = [OutputFormat::Rust])]
    formats: Vec<OutputFormat>,

    /// Generate 64-bit tables using this polynomial [default: historical].
    #[arg(long, value_parser = parse_hex_u64)]
    poly64: Option<u64>,

    /// Generate 96-bit tables using this polynomial (most significant 64 bits)
    /// [default: historical].
    #[arg(long, value_parser = parse_hex_u64)]
    poly96_m: Option<u64>,

    /// Generate 96-bit tables using this polynomial (least significant 32 bits)
    /// [default: historical].
    #[arg(long, value_parser = parse_hex_u32)]
    poly96_l: Option<u32>,

    /// Generate 128-bit tables using this polynomial (most significant 64 bits)
    /// [default: historical].
    #[arg(long, value_parser = parse_hex_u64)]
    poly128_m: Option<u64>,

    /// Generate 128-bit tables using this polynomial (least significant 64 bits)
    /// [default: historical].
    #[arg(long, value_parser = parse_hex_u64)]
    poly128_l: Option<u64>,
}

impl Args {
    /// Moduli from the flags; an omitted flag keeps its historical value.
    fn config(&self) -> ModulusConfig {
        let h = ModulusConfig::HISTORICAL;
        ModulusConfig {
            poly64: self.poly64.unwrap_or(h.poly64),
            poly96_m: self.poly96_m.unwrap_or(h.poly96_m),
            poly96_l: self.poly96_l.unwrap_or(h.poly96_l),
            poly128_m: self.poly128_m.unwrap_or(h.poly128_m),
            poly128_l: self.poly128_l.unwrap_or(h.poly128_l),
        }
    }
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

fn parse_hex_u64(s: &str) -> Result<u64, String> {
    u64::from_str_radix(strip_hex_prefix(s), 16)
        .map_err(|e| format!("invalid 64-bit hex value `{s}`: {e}"))
}

fn parse_hex_u32(s: &str) -> Result<u32, String> {
    u32::from_str_radix(strip_hex_prefix(s), 16)
        .map_err(|e| format!("invalid 32-bit hex value `{s}`: {e}"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let out = &args.out;
    let config = args.config();

    fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output directory: {}", out.display()))?;

    let tables = generate(&config).context("Invalid modulus configuration")?;
    println!(
        "Moduli: poly64={}, poly96={}, poly128={}",
        tables.bits64.modulus(),
        tables.bits96.modulus(),
        tables.bits128.modulus()
    );
    if !config.is_historical() {
        println!("  Warning: non-default moduli; fingerprints will not match existing ones");
    }

    for width in tables.widths() {
        println!(
            "  {}-bit: 8 x 256 x {} words",
            width.bits(),
            width.word_count()
        );
    }

    let formats: Vec<Format> = args.formats.iter().copied().map(Format::from).collect();
    let report = fingerprint_codegen::generate(&tables, &formats, out)?;

    println!(
        "Generated {} tables, {} entries, {} words per file",
        report.table_count, report.entry_count, report.word_count
    );
    for file in &report.files {
        println!("  Written: {}", out.join(file).display());
    }

    println!("Generation complete.");
    Ok(())
}
