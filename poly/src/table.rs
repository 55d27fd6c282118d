//! Fold-table construction.
//!
//! `table[i][x]` holds `Q_x(x) * x^(BITS + 8*i) mod P(x)`, where `Q_x` is the
//! degree-7 polynomial whose coefficients are the bits of the byte `x`.
//! A fingerprint routine uses the eight tables to multiply its state by
//! `x^64` with eight lookups instead of 64 single-bit reductions; see
//! [`FoldTable::mul_x64_mod`].
//!
//! # Example
//!
//! ```
//! use fingerprint_poly::{FingerprintTable, Poly64};
//!
//! let p = Poly64::new([0xbf37_36b5_1869_e9b7]);
//! let table = FingerprintTable::new(p);
//!
//! assert_eq!(table.table().get(0, 1), &[0xbf37_36b5_1869_e9b7]);
//! assert_eq!(table.table().get(7, 0), &[0]);
//! ```

use crate::polynomial::Polynomial;

/// Number of fold positions (bytes folded per 64-bit step).
pub const FOLD_POSITIONS: usize = 8;

/// Number of byte values indexed by each fold position.
pub const BYTE_VALUES: usize = 256;

/// Degree shift between consecutive fold positions.
pub const FOLD_SHIFT: u32 = 8;

/// Entries of one width: `[position][byte][word]`.
pub type TableEntries<const WORDS: usize> = [[[u64; WORDS]; BYTE_VALUES]; FOLD_POSITIONS];

/// The eight 256-entry fold tables for one modulus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldTable<const WORDS: usize, const BITS: u32> {
    entries: Box<TableEntries<WORDS>>,
}

impl<const WORDS: usize, const BITS: u32> FoldTable<WORDS, BITS> {
    /// Builds the fold tables for `modulus`.
    ///
    /// Each byte's polynomial is multiplied by `x^8` cumulatively, so entry
    /// `i` is the running product after `i + 1` steps.
    #[must_use]
    pub fn build(modulus: &Polynomial<WORDS, BITS>) -> Self {
        let mut entries = Box::new([[[0u64; WORDS]; BYTE_VALUES]; FOLD_POSITIONS]);
        let mut t = Polynomial::<WORDS, BITS>::zero();
        for x in 0..=u8::MAX {
            t.set_high8_bits(x);
            for row in entries.iter_mut() {
                t.mul_xk_mod(FOLD_SHIFT, modulus);
                t.write(&mut row[usize::from(x)]);
            }
        }
        Self { entries }
    }

    /// Words of `table[position][byte]`.
    ///
    /// # Panics
    ///
    /// Panics if `position >= FOLD_POSITIONS`.
    #[inline]
    #[must_use]
    pub fn get(&self, position: usize, byte: u8) -> &[u64; WORDS] {
        &self.entries[position][usize::from(byte)]
    }

    /// `table[position][byte]` as a polynomial.
    ///
    /// # Panics
    ///
    /// Panics if `position >= FOLD_POSITIONS`.
    #[inline]
    #[must_use]
    pub fn entry(&self, position: usize, byte: u8) -> Polynomial<WORDS, BITS> {
        Polynomial::new(*self.get(position, byte))
    }

    /// All entries, `[position][byte][word]`.
    #[must_use]
    pub fn entries(&self) -> &TableEntries<WORDS> {
        &self.entries
    }

    /// Computes `t * x^64 mod P` with one lookup per byte of `t`'s top word.
    ///
    /// The top word is split into bytes `b_0` (most significant) to `b_7`;
    /// `b_j` contributes `table[7 - j][b_j]`. The lower words move up by
    /// one word, which is exact because they stay below `x^BITS`.
    #[must_use]
    pub fn mul_x64_mod(&self, t: &Polynomial<WORDS, BITS>) -> Polynomial<WORDS, BITS> {
        let words = t.as_words();
        let mut shifted = [0u64; WORDS];
        shifted[..WORDS - 1].copy_from_slice(&words[1..]);
        let mut acc = Polynomial::new(shifted);
        for (j, byte) in words[0].to_be_bytes().into_iter().enumerate() {
            acc ^= self.entry(FOLD_POSITIONS - 1 - j, byte);
        }
        acc
    }
}

/// A modulus together with its fold tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintTable<const WORDS: usize, const BITS: u32> {
    modulus: Polynomial<WORDS, BITS>,
    table: FoldTable<WORDS, BITS>,
}

impl<const WORDS: usize, const BITS: u32> FingerprintTable<WORDS, BITS> {
    /// Generates the fold tables for `modulus`.
    #[must_use]
    pub fn new(modulus: Polynomial<WORDS, BITS>) -> Self {
        let table = FoldTable::build(&modulus);
        Self { modulus, table }
    }

    /// The modulus, without its implicit leading term.
    #[must_use]
    pub const fn modulus(&self) -> &Polynomial<WORDS, BITS> {
        &self.modulus
    }

    /// The fold tables.
    #[must_use]
    pub const fn table(&self) -> &FoldTable<WORDS, BITS> {
        &self.table
    }
}

/// Width-erased read access to a generated table, for renderers.
pub trait TableData {
    /// Fingerprint width in bits (`DEG + 1`).
    fn bits(&self) -> u32;

    /// Words per table entry.
    fn word_count(&self) -> usize;

    /// Serialized modulus words, most-significant first.
    fn poly_words(&self) -> &[u64];

    /// Words of `table[position][byte]`.
    fn entry_words(&self, position: usize, byte: u8) -> &[u64];
}

impl<const WORDS: usize, const BITS: u32> TableData for FingerprintTable<WORDS, BITS> {
    fn bits(&self) -> u32 {
        BITS
    }

    fn word_count(&self) -> usize {
        WORDS
    }

    fn poly_words(&self) -> &[u64] {
        self.modulus.as_words()
    }

    fn entry_words(&self, position: usize, byte: u8) -> &[u64] {
        self.table.get(position, byte)
    }
}
