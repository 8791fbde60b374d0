//! Reduction-tree shared-memory cost model
//!
//! The main-pass kernels fold per-thread partials through a fixed tree:
//! lane shuffles within a warp, a shared-memory stage across warps, and a
//! global workspace exchange across execution groups. Only the inter-warp
//! stage consumes shared memory, and the resolvers must fold that cost into
//! their per-group budgets before launch.
//!
//! [`SmemRequirement`] is the seam: alternative reduction trees can be sized
//! by the resolvers as long as they can state their static cost.

use crate::decomp::ParallelDecomposition;
use crate::dtype::DType;

/// Static shared-memory cost of a collaborator, in bytes
pub trait SmemRequirement {
    /// Shared-memory bytes this collaborator needs per execution group
    fn smem_bytes(&self) -> usize;
}

/// Reduction tree over values of a fixed element width
///
/// - `warps_n == 1`: the whole row reduction stays inside one warp and runs
///   on lane shuffles, no shared memory.
/// - `warps_n > 1`: each warp stages one partial per row in shared memory,
///   `warps_m * warps_n` slots.
/// - `ctas_per_row > 1`: partials cross groups through a global workspace,
///   which adds nothing to the per-group shared-memory budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reducer {
    /// Width of one reduced element in bytes
    pub elem_bytes: usize,
    /// The decomposition the tree spans
    pub decomp: ParallelDecomposition,
}

impl Reducer {
    /// Reduction tree over single values of `dtype`
    #[inline]
    pub const fn new(dtype: DType, decomp: ParallelDecomposition) -> Self {
        Self {
            elem_bytes: dtype.size_in_bytes(),
            decomp,
        }
    }

    /// Reduction tree over `(a, b)` pairs of `dtype`
    ///
    /// The data-gradient reduction folds two running sums at once, so its
    /// element is a pair of the compute type.
    #[inline]
    pub const fn for_pairs(dtype: DType, decomp: ParallelDecomposition) -> Self {
        Self {
            elem_bytes: 2 * dtype.size_in_bytes(),
            decomp,
        }
    }

    /// Shared-memory bytes for the inter-warp stage
    #[inline]
    pub const fn smem_bytes(&self) -> usize {
        if self.decomp.warps_n == 1 {
            0
        } else {
            self.decomp.warps_m * self.decomp.warps_n * self.elem_bytes
        }
    }
}

impl SmemRequirement for Reducer {
    fn smem_bytes(&self) -> usize {
        Reducer::smem_bytes(self)
    }
}

/// Streaming mean/variance statistics for the forward pass
///
/// Statistics merge `(mean, m2)` pairs with a pairwise update, so the tree
/// is sized exactly like a reducer over pairs of the compute type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stats {
    reducer: Reducer,
}

impl Stats {
    /// Statistics tree accumulating in `compute` over `decomp`
    #[inline]
    pub const fn new(compute: DType, decomp: ParallelDecomposition) -> Self {
        Self {
            reducer: Reducer::for_pairs(compute, decomp),
        }
    }

    /// Shared-memory bytes for the statistics merge
    #[inline]
    pub const fn smem_bytes(&self) -> usize {
        self.reducer.smem_bytes()
    }
}

impl SmemRequirement for Stats {
    fn smem_bytes(&self) -> usize {
        Stats::smem_bytes(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_warp_row_needs_no_smem() {
        let d = ParallelDecomposition::new(4, 1, 1);
        assert_eq!(Reducer::new(DType::F32, d).smem_bytes(), 0);
        assert_eq!(Stats::new(DType::F32, d).smem_bytes(), 0);
    }

    #[test]
    fn test_inter_warp_staging() {
        // 1 row, 4 warps per row: 4 slots of one f32 each
        let d = ParallelDecomposition::new(1, 4, 1);
        assert_eq!(Reducer::new(DType::F32, d).smem_bytes(), 16);
        // pairs double the slot width
        assert_eq!(Reducer::for_pairs(DType::F32, d).smem_bytes(), 32);
        assert_eq!(Stats::new(DType::F32, d).smem_bytes(), 32);
    }

    #[test]
    fn test_cross_group_adds_no_smem() {
        let single = ParallelDecomposition::new(1, 4, 1);
        let multi = ParallelDecomposition::new(1, 4, 4);
        assert_eq!(
            Reducer::for_pairs(DType::F32, single).smem_bytes(),
            Reducer::for_pairs(DType::F32, multi).smem_bytes()
        );
    }
}
