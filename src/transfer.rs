//! Vectorized transfer granularity
//!
//! Every global-memory access issued by a kernel thread moves a fixed number
//! of bytes (16 on current hardware, matching the widest vectorized
//! load/store). [`TransferGranularity`] converts that byte width into element
//! counts per type; resolvers only size buffers with it, they never implement
//! the transfer arithmetic itself.

use crate::dtype::DType;
use crate::error::{Error, Result};

/// Byte width of one vectorized memory transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransferGranularity {
    bytes: usize,
}

impl TransferGranularity {
    /// The bus-efficient default: one 128-bit load/store per thread
    pub const DEFAULT_BYTES: usize = 16;

    /// Create a granularity with an explicit byte width
    #[inline]
    pub const fn new(bytes: usize) -> Self {
        Self { bytes }
    }

    /// Bytes moved per transaction
    #[inline]
    pub const fn bytes(self) -> usize {
        self.bytes
    }

    /// Elements of `dtype` moved per transaction
    ///
    /// Fails if the transfer width is zero or is not a whole number of
    /// elements.
    pub fn elements(self, dtype: DType) -> Result<usize> {
        if self.bytes == 0 {
            return Err(Error::InvalidArgument {
                arg: "bytes_per_transfer",
                reason: "must be positive",
            });
        }
        let elem = dtype.size_in_bytes();
        if self.bytes % elem != 0 {
            return Err(Error::Indivisible {
                what: "bytes_per_transfer",
                value: self.bytes,
                unit: elem,
            });
        }
        Ok(self.bytes / elem)
    }
}

impl Default for TransferGranularity {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BYTES)
    }
}

/// Per-type vector widths of one transfer
///
/// All four lanes use the element count derived from the input type: the
/// type-size ordering enforced by the main resolver guarantees the same
/// count fits the output and weight transfers too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VectorLanes {
    /// Elements per input load
    pub input: usize,
    /// Elements per output store
    pub output: usize,
    /// Elements per weight load
    pub weight: usize,
    /// Elements per compute-type vector
    pub compute: usize,
}

impl VectorLanes {
    /// Uniform lane count across all four type slots
    #[inline]
    pub const fn uniform(elements: usize) -> Self {
        Self {
            input: elements,
            output: elements,
            weight: elements,
            compute: elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elements_per_transfer() {
        let t = TransferGranularity::default();
        assert_eq!(t.elements(DType::F32).unwrap(), 4);
        assert_eq!(t.elements(DType::F16).unwrap(), 8);
        assert_eq!(t.elements(DType::FP8E4M3).unwrap(), 16);
    }

    #[test]
    fn test_indivisible_width_rejected() {
        let t = TransferGranularity::new(6);
        assert!(matches!(
            t.elements(DType::F32),
            Err(Error::Indivisible { value: 6, unit: 4, .. })
        ));
    }

    #[test]
    fn test_zero_width_rejected() {
        let t = TransferGranularity::new(0);
        assert!(matches!(
            t.elements(DType::F32),
            Err(Error::InvalidArgument { arg: "bytes_per_transfer", .. })
        ));
    }
}
