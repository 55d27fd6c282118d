//! Modulus configuration.
//!
//! The default moduli are irreducible polynomials chosen once, offline.
//! They must never be replaced: every fingerprint ever computed depends on
//! them, and a fingerprint taken under a different modulus is not
//! comparable.

use crate::error::PolynomialError;
use crate::polynomial::{Poly128, Poly64, Poly96};

/// The modulus constants for the three fingerprint widths.
///
/// Each value is the modulus without its implicit leading `x^BITS` term.
/// The 96- and 128-bit moduli are split into a most-significant 64-bit half
/// (`_m`) and a least-significant half (`_l`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModulusConfig {
    /// 64-bit modulus.
    pub poly64: u64,
    /// 96-bit modulus, coefficients `x^95..x^32`.
    pub poly96_m: u64,
    /// 96-bit modulus, coefficients `x^31..x^0`.
    pub poly96_l: u32,
    /// 128-bit modulus, coefficients `x^127..x^64`.
    pub poly128_m: u64,
    /// 128-bit modulus, coefficients `x^63..x^0`.
    pub poly128_l: u64,
}

impl ModulusConfig {
    /// Historical 64-bit modulus.
    pub const DEFAULT_POLY64: u64 = 0xbf37_36b5_1869_e9b7;
    /// Historical 96-bit modulus, high 64 bits.
    pub const DEFAULT_POLY96_M: u64 = 0x5155_5cb0_aa8d_39c3;
    /// Historical 96-bit modulus, low 32 bits.
    pub const DEFAULT_POLY96_L: u32 = 0xb679_ec37;
    /// Historical 128-bit modulus, high 64 bits.
    pub const DEFAULT_POLY128_M: u64 = 0xc91b_ff9b_8768_b51b;
    /// Historical 128-bit modulus, low 64 bits.
    pub const DEFAULT_POLY128_L: u64 = 0x8c5d_5853_bd77_b0d3;

    /// The historical moduli every existing fingerprint was computed with.
    pub const HISTORICAL: Self = Self {
        poly64: Self::DEFAULT_POLY64,
        poly96_m: Self::DEFAULT_POLY96_M,
        poly96_l: Self::DEFAULT_POLY96_L,
        poly128_m: Self::DEFAULT_POLY128_M,
        poly128_l: Self::DEFAULT_POLY128_L,
    };

    /// Returns `true` if every field equals its historical default.
    #[must_use]
    pub fn is_historical(&self) -> bool {
        *self == Self::HISTORICAL
    }

    /// The 64-bit modulus.
    ///
    /// # Errors
    ///
    /// Never fails for a 64-bit word; the signature matches the split widths.
    pub fn modulus64(&self) -> Result<Poly64, PolynomialError> {
        Poly64::try_new([self.poly64])
    }

    /// The 96-bit modulus; the low half fills the top of the second word.
    ///
    /// # Errors
    ///
    /// Returns [`PolynomialError::PaddingBitsSet`] if the words do not fit
    /// the 96-bit layout.
    pub fn modulus96(&self) -> Result<Poly96, PolynomialError> {
        Poly96::try_new([self.poly96_m, u64::from(self.poly96_l) << 32])
    }

    /// The 128-bit modulus.
    ///
    /// # Errors
    ///
    /// Never fails for two full words; the signature matches the 96-bit width.
    pub fn modulus128(&self) -> Result<Poly128, PolynomialError> {
        Poly128::try_new([self.poly128_m, self.poly128_l])
    }
}

impl Default for ModulusConfig {
    fn default() -> Self {
        Self::HISTORICAL
    }
}
