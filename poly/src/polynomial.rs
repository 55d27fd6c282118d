//! Fixed-width polynomials over GF(2).
//!
//! A `Polynomial<WORDS, BITS>` holds the `BITS` coefficients of a polynomial
//! of degree `< BITS` in `WORDS` 64-bit words, most-significant word first.
//! Coefficients are left-aligned: bit 63 of word 0 is the coefficient of
//! `x^(BITS-1)`. When `BITS` is not a multiple of 64 the unused padding bits
//! are the low bits of the last word, and they are always zero.
//!
//! # Layout
//!
//! ```text
//! Poly64   word 0: x^63 ........................... x^0
//! Poly96   word 0: x^95 ........................... x^32
//!          word 1: x^31 ........ x^0 | 32 padding bits
//! Poly128  word 0: x^127 .......................... x^64
//!          word 1: x^63 ........................... x^0
//! ```
//!
//! A modulus `P(x)` of degree exactly `BITS` is stored in the same type with
//! its leading coefficient `x^BITS` left implicit.
//!
//! # Example
//!
//! ```
//! use fingerprint_poly::Poly64;
//!
//! let p = Poly64::new([0xbf37_36b5_1869_e9b7]);
//! let mut t = Poly64::zero();
//! t.set_high8_bits(1); // x^56
//! t.mul_xk_mod(8, &p); // x^64 mod P
//! assert_eq!(t, p);
//! ```

use core::fmt;
use core::ops::{BitXor, BitXorAssign};

use crate::error::PolynomialError;

/// Number of coefficient bits held by one storage word.
pub const WORD_BITS: u32 = 64;

/// A polynomial over GF(2) with `BITS` coefficients stored in `WORDS` words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Polynomial<const WORDS: usize, const BITS: u32> {
    words: [u64; WORDS],
}

/// Polynomials backing 64-bit fingerprints (degree `< 64`).
pub type Poly64 = Polynomial<1, 64>;

/// Polynomials backing 96-bit fingerprints (degree `< 96`).
pub type Poly96 = Polynomial<2, 96>;

/// Polynomials backing 128-bit fingerprints (degree `< 128`).
pub type Poly128 = Polynomial<2, 128>;

impl<const WORDS: usize, const BITS: u32> Polynomial<WORDS, BITS> {
    const SHAPE: () = assert!(
        BITS >= 8 && WORDS == (BITS as usize).div_ceil(WORD_BITS as usize),
        "WORDS must equal ceil(BITS / 64) and BITS must hold at least one byte"
    );

    /// Highest representable degree (`BITS - 1`).
    pub const DEGREE: u32 = BITS - 1;

    /// Number of always-zero padding bits at the bottom of the last word.
    pub const PADDING: u32 = WORDS as u32 * WORD_BITS - BITS;

    /// Mask of the coefficient-carrying bits of the last word.
    pub const LAST_WORD_MASK: u64 = u64::MAX << Self::PADDING;

    /// The zero polynomial.
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        let () = Self::SHAPE;
        Self { words: [0; WORDS] }
    }

    /// Builds a polynomial from its coefficient words, most-significant first.
    ///
    /// # Panics
    ///
    /// Panics if any padding bit of the last word is set. Use
    /// [`Polynomial::try_new`] to handle this case without panicking.
    #[inline]
    #[must_use]
    pub const fn new(words: [u64; WORDS]) -> Self {
        let () = Self::SHAPE;
        assert!(
            words[WORDS - 1] & !Self::LAST_WORD_MASK == 0,
            "polynomial has padding bits set below x^0"
        );
        Self { words }
    }

    /// Fallible counterpart of [`Polynomial::new`].
    ///
    /// # Errors
    ///
    /// Returns [`PolynomialError::PaddingBitsSet`] if the last word carries
    /// bits outside the `BITS` coefficient positions.
    pub fn try_new(words: [u64; WORDS]) -> Result<Self, PolynomialError> {
        let () = Self::SHAPE;
        let last = words[WORDS - 1];
        if last & !Self::LAST_WORD_MASK != 0 {
            return Err(PolynomialError::PaddingBitsSet {
                bits: BITS,
                word: last,
                mask: Self::LAST_WORD_MASK,
            });
        }
        Ok(Self { words })
    }

    /// Word count of the representation.
    #[inline]
    #[must_use]
    pub const fn size() -> usize {
        WORDS
    }

    /// Number of coefficients (`BITS`).
    #[inline]
    #[must_use]
    pub const fn bits() -> u32 {
        BITS
    }

    /// The coefficient words, most-significant first.
    #[inline]
    #[must_use]
    pub const fn words(&self) -> [u64; WORDS] {
        self.words
    }

    /// Borrowed view of the coefficient words.
    #[inline]
    #[must_use]
    pub const fn as_words(&self) -> &[u64; WORDS] {
        &self.words
    }

    /// Returns `true` for the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Degree of the polynomial, or `None` for the zero polynomial.
    #[must_use]
    pub fn degree(&self) -> Option<u32> {
        let (index, word) = self.words.iter().enumerate().find(|(_, &w)| w != 0)?;
        let position = index as u32 * WORD_BITS + word.leading_zeros();
        Some(Self::DEGREE - position)
    }

    /// Resets `self` to the byte polynomial `Q_x` placed in the eight
    /// highest coefficient positions, i.e. `Q_x(x) * x^(BITS-8)`.
    ///
    /// Bit 7 of `x` becomes the coefficient of `x^(BITS-1)`.
    #[inline]
    pub fn set_high8_bits(&mut self, x: u8) {
        self.words = [0; WORDS];
        self.words[0] = u64::from(x) << (WORD_BITS - 8);
    }

    /// Multiplies by `x` without reduction.
    ///
    /// Returns the coefficient shifted out past `x^(BITS-1)`.
    #[inline]
    pub fn mul_x(&mut self) -> bool {
        let mut carry = 0u64;
        for word in self.words.iter_mut().rev() {
            let next = *word >> (WORD_BITS - 1);
            *word = (*word << 1) | carry;
            carry = next;
        }
        carry == 1
    }

    /// Computes `self * x mod P`, where `modulus` holds `P` without its
    /// implicit leading `x^BITS` term.
    #[inline]
    pub fn mul_x_mod(&mut self, modulus: &Self) {
        if self.mul_x() {
            *self ^= *modulus;
        }
    }

    /// Computes `self * x^k mod P` by `k` single-step reductions.
    pub fn mul_xk_mod(&mut self, k: u32, modulus: &Self) {
        for _ in 0..k {
            self.mul_x_mod(modulus);
        }
    }

    /// GF(2) addition (coefficient-wise XOR).
    #[inline]
    pub fn add(&mut self, other: &Self) {
        *self ^= *other;
    }

    /// Copies the coefficient words into `out`, most-significant first.
    ///
    /// # Panics
    ///
    /// Panics if `out.len()` differs from [`Polynomial::size`].
    pub fn write(&self, out: &mut [u64]) {
        assert_eq!(
            out.len(),
            WORDS,
            "output buffer must hold exactly {WORDS} words"
        );
        out.copy_from_slice(&self.words);
    }
}

impl<const WORDS: usize, const BITS: u32> Default for Polynomial<WORDS, BITS> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const WORDS: usize, const BITS: u32> BitXorAssign for Polynomial<WORDS, BITS> {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        for (a, b) in self.words.iter_mut().zip(rhs.words) {
            *a ^= b;
        }
    }
}

impl<const WORDS: usize, const BITS: u32> BitXor for Polynomial<WORDS, BITS> {
    type Output = Self;

    #[inline]
    fn bitxor(mut self, rhs: Self) -> Self {
        self ^= rhs;
        self
    }
}

/// Formats the words as `0x<word0>_<word1>...` in fixed-width hex.
impl<const WORDS: usize, const BITS: u32> fmt::Display for Polynomial<WORDS, BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str("_")?;
            }
            write!(f, "{word:016x}")?;
        }
        Ok(())
    }
}
