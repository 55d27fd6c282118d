//! GF(2) polynomial engine and fold-table builder for Rabin fingerprints.
//!
//! A Rabin fingerprint of width `BITS` is a message's bit polynomial reduced
//! modulo a fixed irreducible polynomial `P` of degree `BITS`. A fast
//! fingerprint routine folds a whole 64-bit word per step using eight
//! precomputed 256-entry tables; this crate computes those tables.
//!
//! # Widths
//!
//! | Width | Type | Words | Modulus |
//! |-------|------|-------|---------|
//! | 64  | [`Poly64`]  | 1 | `poly64` |
//! | 96  | [`Poly96`]  | 2 | `poly96_m`, `poly96_l << 32` |
//! | 128 | [`Poly128`] | 2 | `poly128_m`, `poly128_l` |
//!
//! Irreducibility of a modulus is not checked.
//!
//! # Example
//!
//! ```
//! use fingerprint_poly::{generate, ModulusConfig, TableData};
//!
//! let tables = generate(&ModulusConfig::default())?;
//! for width in tables.widths() {
//!     assert_eq!(width.entry_words(3, 0).iter().copied().max(), Some(0));
//! }
//! assert_eq!(tables.bits64.table().get(0, 1), &[ModulusConfig::DEFAULT_POLY64]);
//! # Ok::<(), fingerprint_poly::PolynomialError>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod config;
pub mod error;
pub mod polynomial;
pub mod table;

pub use config::ModulusConfig;
pub use error::PolynomialError;
pub use polynomial::{Poly128, Poly64, Poly96, Polynomial, WORD_BITS};
pub use table::{
    FingerprintTable, FoldTable, TableData, TableEntries, BYTE_VALUES, FOLD_POSITIONS, FOLD_SHIFT,
};

/// 64-bit fingerprint tables.
pub type Table64 = FingerprintTable<1, 64>;

/// 96-bit fingerprint tables.
pub type Table96 = FingerprintTable<2, 96>;

/// 128-bit fingerprint tables.
pub type Table128 = FingerprintTable<2, 128>;

/// Tables for all three widths, plus the configuration they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTables {
    /// Moduli used for generation.
    pub config: ModulusConfig,
    /// 64-bit tables.
    pub bits64: Table64,
    /// 96-bit tables.
    pub bits96: Table96,
    /// 128-bit tables.
    pub bits128: Table128,
}

impl GeneratedTables {
    /// The three widths in emission order (64, 96, 128).
    #[must_use]
    pub fn widths(&self) -> [&dyn TableData; 3] {
        [&self.bits64, &self.bits96, &self.bits128]
    }
}

/// Generates the fold tables for every width in `config`.
///
/// The widths share no state; changing one modulus leaves the other
/// tables untouched.
///
/// # Errors
///
/// Returns [`PolynomialError`] if a modulus does not fit its width.
pub fn generate(config: &ModulusConfig) -> Result<GeneratedTables, PolynomialError> {
    Ok(GeneratedTables {
        config: *config,
        bits64: FingerprintTable::new(config.modulus64()?),
        bits96: FingerprintTable::new(config.modulus96()?),
        bits128: FingerprintTable::new(config.modulus128()?),
    })
}
