//! Rust module rendering.
//!
//! Emits one `POLY_<bits>` constant and one `TABLE_<bits>` static per width,
//! with every word as a fixed-width hexadecimal literal.

use std::fmt::Write as FmtWrite;

use fingerprint_poly::{GeneratedTables, TableData, FOLD_POSITIONS};

use crate::emit::{word_list, RustFile, GENERATED_BANNER};

/// Output file name for [`crate::Format::Rust`].
pub const FILE_NAME: &str = "fingerprint_tables.rs";

fn hex(word: u64) -> String {
    format!("{word:#018x}")
}

/// Renders the Rust module for all widths.
pub fn render(tables: &GeneratedTables) -> String {
    let mut f = RustFile::new(&format!(
        "Fingerprint tables for 64-, 96-, and 128-bit Rabin fingerprints.\n\
         //!\n\
         //! {GENERATED_BANNER}\n\
         //!\n\
         //! `TABLE_N[i][q]` is `Q(x) * x^(N + 8*i) mod P(x)`, where `Q` is the\n\
         //! degree-7 polynomial whose coefficients are the bits of `q` and `P`\n\
         //! is `x^N + POLY_N`. Words are most-significant first, coefficients\n\
         //! left-aligned."
    ));
    f.line("#![allow(clippy::unreadable_literal)]");
    f.blank();

    for width in tables.widths() {
        render_width(&mut f, width);
    }
    f.finish()
}

fn render_width(f: &mut RustFile, width: &dyn TableData) {
    let bits = width.bits();
    let words = width.word_count();

    f.doc_comment(&format!(
        "Modulus of the {bits}-bit fingerprint, without its leading `x^{bits}` term."
    ));
    let _ = writeln!(
        f.buf,
        "pub const POLY_{bits}: [u64; {words}] = {};",
        word_list(width.poly_words(), "[", "]", hex)
    );
    f.blank();

    f.doc_comment(&format!("Fold tables of the {bits}-bit fingerprint."));
    let _ = writeln!(
        f.buf,
        "pub static TABLE_{bits}: [[[u64; {words}]; 256]; {FOLD_POSITIONS}] = ["
    );
    for position in 0..FOLD_POSITIONS {
        let _ = writeln!(f.buf, "    // Table {position}");
        f.line("    [");
        for x in 0..=u8::MAX {
            let _ = writeln!(
                f.buf,
                "        {},",
                word_list(width.entry_words(position, x), "[", "]", hex)
            );
        }
        f.line("    ],");
    }
    f.line("];");
    f.blank();
}

#[cfg(test)]
mod tests {
    use super::*;
    use fingerprint_poly::{generate, ModulusConfig};

    #[test]
    fn renders_poly_constants() {
        let out = render(&generate(&ModulusConfig::default()).unwrap());
        assert!(out.contains("pub const POLY_64: [u64; 1] = [0xbf3736b51869e9b7];"));
        assert!(out.contains(
            "pub const POLY_96: [u64; 2] = [0x51555cb0aa8d39c3, 0xb679ec3700000000];"
        ));
        assert!(out.contains(
            "pub const POLY_128: [u64; 2] = [0xc91bff9b8768b51b, 0x8c5d5853bd77b0d3];"
        ));
    }

    #[test]
    fn renders_table_shapes_and_rows() {
        let out = render(&generate(&ModulusConfig::default()).unwrap());
        assert!(out.starts_with("//! Fingerprint tables"));
        assert!(out.contains("pub static TABLE_64: [[[u64; 1]; 256]; 8] = ["));
        assert!(out.contains("pub static TABLE_128: [[[u64; 2]; 256]; 8] = ["));
        assert_eq!(out.matches("    // Table ").count(), 3 * FOLD_POSITIONS);
        // 64-bit table: position 0, byte 2.
        assert!(out.contains("        [0xc1595bdf28ba3ad9],"));
        let rows = out
            .lines()
            .filter(|l| l.starts_with("        [") && l.ends_with("],"))
            .count();
        assert_eq!(rows, 3 * FOLD_POSITIONS * 256);
    }

    #[test]
    fn rows_parse_back_to_table_entries() {
        let tables = generate(&ModulusConfig::default()).unwrap();
        let out = render(&tables);
        let mut rows = out
            .lines()
            .filter_map(|l| l.strip_prefix("        [")?.strip_suffix("],"));

        for width in tables.widths() {
            for position in 0..FOLD_POSITIONS {
                for x in 0..=u8::MAX {
                    let row = rows.next().unwrap();
                    let parsed: Vec<u64> = row
                        .split(", ")
                        .map(|w| u64::from_str_radix(w.strip_prefix("0x").unwrap(), 16).unwrap())
                        .collect();
                    assert_eq!(
                        parsed,
                        width.entry_words(position, x),
                        "{}-bit table {position}, byte {x}",
                        width.bits()
                    );
                }
            }
        }
        assert_eq!(rows.next(), None);
    }
}
