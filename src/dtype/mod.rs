//! Data type tags for normalization kernels
//!
//! Layout resolution never touches element values; it only needs the byte
//! width of each type slot. `DType` is therefore a pure tag enum covering the
//! types the normalization kernels are actually instantiated with: narrow
//! floats for data and weights, F32 for accumulation, unsigned integers for
//! indexing.

use std::fmt;

/// Data types a normalization kernel can be instantiated with
///
/// Using an enum (rather than generics) keeps layout resolution a plain
/// runtime-value computation: the build layer can enumerate candidate
/// configurations and resolve each one without monomorphizing anything.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum DType {
    /// 32-bit floating point (compute/accumulation type)
    F32,
    /// 16-bit floating point (IEEE 754)
    F16,
    /// 16-bit brain floating point
    BF16,
    /// 8-bit floating point (1 sign + 4 exp + 3 mant), for weights/activations
    FP8E4M3,
    /// 8-bit floating point (1 sign + 5 exp + 2 mant), for gradients
    FP8E5M2,
    /// 32-bit unsigned integer (index type)
    U32,
    /// 64-bit unsigned integer (index type)
    U64,
}

impl DType {
    /// Size of one element in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::U64 => 8,
            Self::F32 | Self::U32 => 4,
            Self::F16 | Self::BF16 => 2,
            Self::FP8E4M3 | Self::FP8E5M2 => 1,
        }
    }

    /// Returns true if this is a floating point type
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(
            self,
            Self::F32 | Self::F16 | Self::BF16 | Self::FP8E4M3 | Self::FP8E5M2
        )
    }

    /// Returns true if this is an index type
    #[inline]
    pub const fn is_index(self) -> bool {
        matches!(self, Self::U32 | Self::U64)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::F32 => "f32",
            Self::F16 => "f16",
            Self::BF16 => "bf16",
            Self::FP8E4M3 => "fp8e4m3",
            Self::FP8E5M2 => "fp8e5m2",
            Self::U32 => "u32",
            Self::U64 => "u64",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_size() {
        assert_eq!(DType::F32.size_in_bytes(), 4);
        assert_eq!(DType::F16.size_in_bytes(), 2);
        assert_eq!(DType::BF16.size_in_bytes(), 2);
        assert_eq!(DType::FP8E4M3.size_in_bytes(), 1);
        assert_eq!(DType::FP8E5M2.size_in_bytes(), 1);
        assert_eq!(DType::U32.size_in_bytes(), 4);
        assert_eq!(DType::U64.size_in_bytes(), 8);
    }

    #[test]
    fn test_dtype_categories() {
        assert!(DType::F32.is_float());
        assert!(DType::FP8E5M2.is_float());
        assert!(!DType::U32.is_float());
        assert!(DType::U32.is_index());
        assert!(DType::U64.is_index());
        assert!(!DType::BF16.is_index());
    }

    #[test]
    fn test_dtype_display() {
        assert_eq!(DType::BF16.to_string(), "bf16");
        assert_eq!(DType::FP8E4M3.to_string(), "fp8e4m3");
    }
}
