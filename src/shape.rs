//! Problem shape description
//!
//! A [`ShapeDescriptor`] aggregates everything a resolver needs to know about
//! one normalization problem: the hidden size, the finalize-pass thread
//! count, and the five type slots. It performs no derivation and no
//! validation; the resolvers in [`crate::layout`] do both.

use crate::dtype::DType;

/// Fixed width of the minimal synchronous execution unit (a warp)
pub const THREADS_PER_WARP: usize = 32;

/// The five type slots of a normalization kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KernelTypes {
    /// Weight (gamma/beta) element type
    pub weight: DType,
    /// Input activation element type
    pub input: DType,
    /// Output activation element type
    pub output: DType,
    /// Accumulation type for statistics and gradients
    pub compute: DType,
    /// Index type used for addressing
    pub index: DType,
}

impl KernelTypes {
    /// Uniform F32 throughout, U32 indexing
    #[inline]
    pub const fn all_f32() -> Self {
        Self {
            weight: DType::F32,
            input: DType::F32,
            output: DType::F32,
            compute: DType::F32,
            index: DType::U32,
        }
    }

    /// Half-precision data with F32 accumulation, the common training setup
    #[inline]
    pub const fn mixed(data: DType) -> Self {
        Self {
            weight: data,
            input: data,
            output: data,
            compute: DType::F32,
            index: DType::U32,
        }
    }
}

/// Elemental problem shape consumed by both layout resolvers
///
/// `threads_per_group` parameterizes the finalize pass; the main pass derives
/// its own group width from the parallel decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeDescriptor {
    /// Elements per normalized row (the hidden dimension)
    pub hidden_size: usize,
    /// Threads per execution group for the finalize pass
    pub threads_per_group: usize,
    /// The five type slots
    pub types: KernelTypes,
}

impl ShapeDescriptor {
    /// Create a new shape descriptor
    #[inline]
    pub const fn new(hidden_size: usize, threads_per_group: usize, types: KernelTypes) -> Self {
        Self {
            hidden_size,
            threads_per_group,
            types,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_types() {
        let t = KernelTypes::mixed(DType::BF16);
        assert_eq!(t.input, DType::BF16);
        assert_eq!(t.output, DType::BF16);
        assert_eq!(t.weight, DType::BF16);
        assert_eq!(t.compute, DType::F32);
        assert_eq!(t.index, DType::U32);
    }

    #[test]
    fn test_descriptor_is_plain_data() {
        let shape = ShapeDescriptor::new(2048, 128, KernelTypes::all_f32());
        assert_eq!(shape.hidden_size, 2048);
        assert_eq!(shape.threads_per_group, 128);
        // Copy semantics: descriptors are value objects
        let copy = shape;
        assert_eq!(copy, shape);
    }
}
