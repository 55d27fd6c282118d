//! Legacy C++ rendering (`FingerprintTables.cpp`).
//!
//! Reproduces the historical layout byte for byte: decimal `LU` literals,
//! `FingerprintTable<N>` explicit specializations, and the `folly::detail`
//! namespace.

use std::fmt::Write as FmtWrite;

use fingerprint_poly::{GeneratedTables, TableData, FOLD_POSITIONS};

use crate::emit::{word_list, GENERATED_BANNER};

/// Output file name for [`crate::Format::Cpp`].
pub const FILE_NAME: &str = "FingerprintTables.cpp";

fn decimal(word: u64) -> String {
    format!("{word}LU")
}

/// Renders the C++ translation unit for all widths.
pub fn render(tables: &GeneratedTables) -> String {
    let mut out = String::with_capacity(256 * 1024);
    let _ = write!(
        out,
        "/**\n \
         * Fingerprint tables for 64-, 96-, and 128-bit Rabin fingerprints.\n \
         *\n \
         * {GENERATED_BANNER}\n \
         */\n\
         \n\
         #include <folly/Fingerprint.h>\n\
         \n\
         namespace folly {{\n\
         namespace detail {{\n\
         \n"
    );
    for width in tables.widths() {
        render_width(&mut out, width);
    }
    out.push_str("}  // namespace detail\n}  // namespace folly\n");
    out
}

fn render_width(out: &mut String, width: &dyn TableData) {
    let bits = width.bits();
    let words = width.word_count();

    let _ = write!(
        out,
        "template <>\nconst uint64_t FingerprintTable<{bits}>::poly[{words}] = {};\n\n",
        word_list(width.poly_words(), "{", "}", decimal)
    );

    let _ = writeln!(
        out,
        "template <>\nconst uint64_t FingerprintTable<{bits}>::table[{FOLD_POSITIONS}][256][{words}] = {{"
    );
    for position in 0..FOLD_POSITIONS {
        let _ = write!(out, "  // Table {position}\n  {{\n");
        for x in 0..=u8::MAX {
            let _ = writeln!(
                out,
                "    {},",
                word_list(width.entry_words(position, x), "{", "}", decimal)
            );
        }
        out.push_str("  },\n");
    }
    out.push_str("\n};\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use fingerprint_poly::{generate, ModulusConfig};

    #[test]
    fn header_and_footer() {
        let out = render(&generate(&ModulusConfig::default()).unwrap());
        assert!(out.starts_with(
            "/**\n * Fingerprint tables for 64-, 96-, and 128-bit Rabin fingerprints.\n *\n \
             * AUTOMATICALLY GENERATED.  DO NOT EDIT.\n */\n\n#include <folly/Fingerprint.h>\n\n\
             namespace folly {\nnamespace detail {\n\ntemplate <>\n"
        ));
        assert!(out.ends_with("\n};\n\n}  // namespace detail\n}  // namespace folly\n"));
    }

    #[test]
    fn poly_declarations_use_decimal_literals() {
        let out = render(&generate(&ModulusConfig::default()).unwrap());
        assert!(out.contains(
            "template <>\nconst uint64_t FingerprintTable<64>::poly[1] = {13778541736389896631LU};\n\n"
        ));
        assert!(out.contains("const uint64_t FingerprintTable<96>::poly[2] = {5860692403937950147LU, 13148800308052230144LU};"));
        assert!(out.contains("const uint64_t FingerprintTable<128>::table[8][256][2] = {\n  // Table 0\n  {\n    {0LU, 0LU},\n"));
    }

    #[test]
    fn table_rows() {
        let out = render(&generate(&ModulusConfig::default()).unwrap());
        let rows = out.lines().filter(|l| l.starts_with("    {")).count();
        assert_eq!(rows, 3 * FOLD_POSITIONS * 256);
        assert_eq!(out.matches("  },\n").count(), 3 * FOLD_POSITIONS);
    }

    #[test]
    fn rows_parse_back_to_table_entries() {
        let tables = generate(&ModulusConfig::default()).unwrap();
        let out = render(&tables);
        let mut rows = out
            .lines()
            .filter_map(|l| l.strip_prefix("    {")?.strip_suffix("},"));

        for width in tables.widths() {
            for position in 0..FOLD_POSITIONS {
                for x in 0..=u8::MAX {
                    let row = rows.next().unwrap();
                    let parsed: Vec<u64> = row
                        .split(", ")
                        .map(|w| w.strip_suffix("LU").unwrap().parse().unwrap())
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
