//! Error types for polynomial construction.

use thiserror::Error;

/// A coefficient vector that does not describe a polynomial of the
/// configured width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolynomialError {
    /// The last word has bits set in its padding region, below `x^0`.
    #[error("{bits}-bit polynomial has padding bits set: last word {word:#018x}, allowed mask {mask:#018x}")]
    PaddingBitsSet {
        /// Coefficient count of the target width.
        bits: u32,
        /// The offending last word.
        word: u64,
        /// Bits of the last word that may carry coefficients.
        mask: u64,
    },
}
