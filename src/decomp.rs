//! Parallel decomposition of one normalization problem
//!
//! Work is split two ways inside an execution group (`warps_m` rows times
//! `warps_n` column slices) and optionally across groups (`ctas_per_row`
//! groups cooperating on one row). The two row splits are mutually
//! exclusive: a group either holds several whole rows, or several groups
//! share a single row.

use crate::error::{Error, Result};
use crate::shape::THREADS_PER_WARP;

/// How one row's work is distributed over warps and execution groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParallelDecomposition {
    /// Rows handled per execution group (row axis within a group)
    pub warps_m: usize,
    /// Warps cooperating on one row within a group (column axis)
    pub warps_n: usize,
    /// Execution groups cooperating on one row
    pub ctas_per_row: usize,
}

impl ParallelDecomposition {
    /// Create a decomposition
    #[inline]
    pub const fn new(warps_m: usize, warps_n: usize, ctas_per_row: usize) -> Self {
        Self {
            warps_m,
            warps_n,
            ctas_per_row,
        }
    }

    /// Single group, single warp row, `warps_n` column warps
    #[inline]
    pub const fn single_group(warps_n: usize) -> Self {
        Self::new(1, warps_n, 1)
    }

    /// Threads cooperating on one row within one group
    #[inline]
    pub const fn threads_per_row(&self) -> usize {
        self.warps_n * THREADS_PER_WARP
    }

    /// Threads per execution group
    #[inline]
    pub const fn threads_per_group(&self) -> usize {
        self.warps_m * self.threads_per_row()
    }

    /// Check the decomposition for structural validity
    ///
    /// Rejects zero extents and the illegal combination of multi-row-per-group
    /// with multi-group-per-row.
    pub fn validate(&self) -> Result<()> {
        if self.warps_m == 0 {
            return Err(Error::InvalidArgument {
                arg: "warps_m",
                reason: "must be positive",
            });
        }
        if self.warps_n == 0 {
            return Err(Error::InvalidArgument {
                arg: "warps_n",
                reason: "must be positive",
            });
        }
        if self.ctas_per_row == 0 {
            return Err(Error::InvalidArgument {
                arg: "ctas_per_row",
                reason: "must be positive",
            });
        }
        if self.warps_m != 1 && self.ctas_per_row != 1 {
            return Err(Error::IllegalDecomposition {
                warps_m: self.warps_m,
                ctas_per_row: self.ctas_per_row,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_thread_counts() {
        let d = ParallelDecomposition::new(4, 1, 1);
        assert_eq!(d.threads_per_row(), 32);
        assert_eq!(d.threads_per_group(), 128);

        let d = ParallelDecomposition::single_group(4);
        assert_eq!(d.threads_per_row(), 128);
        assert_eq!(d.threads_per_group(), 128);
    }

    #[test]
    fn test_exclusive_row_splits() {
        assert!(ParallelDecomposition::new(1, 4, 2).validate().is_ok());
        assert!(ParallelDecomposition::new(4, 1, 1).validate().is_ok());
        assert!(matches!(
            ParallelDecomposition::new(2, 1, 2).validate(),
            Err(Error::IllegalDecomposition {
                warps_m: 2,
                ctas_per_row: 2
            })
        ));
    }

    #[test]
    fn test_zero_extents_rejected() {
        assert!(ParallelDecomposition::new(0, 1, 1).validate().is_err());
        assert!(ParallelDecomposition::new(1, 0, 1).validate().is_err());
        assert!(ParallelDecomposition::new(1, 1, 0).validate().is_err());
    }
}
