//! Finalize-pass layout resolution
//!
//! When a row is split across execution groups, each group leaves a partial
//! weight-gradient row in a global workspace. The finalize pass transposes
//! those partials through shared memory (so the subsequent reduction reads
//! coalesced columns), folds them, and stores the final weight gradients.
//! This resolver sizes that kernel: one warp per reduction row, double
//! buffering for both the transpose and the coalesced output.

use crate::error::{Error, Result};
use crate::shape::{ShapeDescriptor, THREADS_PER_WARP};
use crate::transfer::TransferGranularity;

/// Resolved layout for the cross-group weight-gradient reduction kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FinalizeLayout {
    /// Reduction rows handled per execution group (one warp each)
    pub rows_per_group: usize,
    /// Compute elements moved per vectorized load
    pub elements_per_transfer: usize,
    /// Bytes per vectorized store of final weights
    pub bytes_per_store: usize,
    /// Transfer-wide columns in one hidden vector
    pub total_columns: usize,
    /// Execution groups launched per reduction row
    pub groups_per_row: usize,
    /// One transpose buffer, bytes
    pub smem_transpose_bytes: usize,
    /// One output-coalescing buffer, bytes
    pub smem_output_bytes: usize,
    /// Total shared memory per execution group, bytes
    pub smem_bytes: usize,
}

impl FinalizeLayout {
    /// Derive the finalize-pass layout for `shape`
    ///
    /// Fails if the thread count is not a whole number of warps, if a group
    /// would need more rows than one warp can cover, if the compute type is
    /// not 4 bytes wide (the conflict-free transpose requires it), or if the
    /// hidden vector is not transfer- and warp-aligned.
    pub fn resolve(shape: &ShapeDescriptor, transfer: TransferGranularity) -> Result<Self> {
        if shape.hidden_size == 0 {
            return Err(Error::InvalidArgument {
                arg: "hidden_size",
                reason: "must be positive",
            });
        }
        if shape.threads_per_group == 0 {
            return Err(Error::InvalidArgument {
                arg: "threads_per_group",
                reason: "must be positive",
            });
        }

        let rows_per_group = shape.threads_per_group / THREADS_PER_WARP;
        if shape.threads_per_group != rows_per_group * THREADS_PER_WARP {
            return Err(Error::PartialWarp {
                threads_per_group: shape.threads_per_group,
            });
        }
        if rows_per_group > THREADS_PER_WARP {
            return Err(Error::RowsPerGroupExceedWarp { rows_per_group });
        }

        let compute = shape.types.compute;
        if compute.size_in_bytes() != 4 {
            return Err(Error::UnsupportedComputeType { dtype: compute });
        }
        let elements_per_transfer = transfer.elements(compute)?;
        let bytes_per_store = elements_per_transfer * shape.types.weight.size_in_bytes();

        let row_bytes = shape.hidden_size * compute.size_in_bytes();
        if row_bytes % transfer.bytes() != 0 {
            return Err(Error::Indivisible {
                what: "hidden row bytes",
                value: row_bytes,
                unit: transfer.bytes(),
            });
        }
        let total_columns = row_bytes / transfer.bytes();

        // Every warp must see a full tile, otherwise part of the group would
        // sit out the barrier.
        if total_columns % THREADS_PER_WARP != 0 {
            return Err(Error::Indivisible {
                what: "transfer columns",
                value: total_columns,
                unit: THREADS_PER_WARP,
            });
        }
        let groups_per_row = total_columns / THREADS_PER_WARP;

        let smem_transpose_bytes = shape.threads_per_group * transfer.bytes();
        let smem_output_bytes = THREADS_PER_WARP * transfer.bytes();
        let smem_bytes = 2 * smem_transpose_bytes + 2 * smem_output_bytes;

        Ok(Self {
            rows_per_group,
            elements_per_transfer,
            bytes_per_store,
            total_columns,
            groups_per_row,
            smem_transpose_bytes,
            smem_output_bytes,
            smem_bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtype::DType;
    use crate::shape::KernelTypes;

    fn shape(hidden: usize, threads: usize) -> ShapeDescriptor {
        ShapeDescriptor::new(hidden, threads, KernelTypes::mixed(DType::F16))
    }

    #[test]
    fn test_smem_budget_128_threads() {
        let layout =
            FinalizeLayout::resolve(&shape(2048, 128), TransferGranularity::default()).unwrap();
        assert_eq!(layout.rows_per_group, 4);
        assert_eq!(layout.smem_transpose_bytes, 2048);
        assert_eq!(layout.smem_output_bytes, 512);
        assert_eq!(layout.smem_bytes, 5120);
    }

    #[test]
    fn test_partial_warp_rejected() {
        let err = FinalizeLayout::resolve(&shape(2048, 100), TransferGranularity::default());
        assert!(matches!(
            err,
            Err(Error::PartialWarp {
                threads_per_group: 100
            })
        ));
    }

    #[test]
    fn test_oversubscribed_group_rejected() {
        // 2048 threads = 64 rows, more than one warp can cover
        let err = FinalizeLayout::resolve(&shape(2048, 2048), TransferGranularity::default());
        assert!(matches!(
            err,
            Err(Error::RowsPerGroupExceedWarp { rows_per_group: 64 })
        ));
    }

    #[test]
    fn test_non_4byte_compute_rejected() {
        let mut types = KernelTypes::mixed(DType::F16);
        types.compute = DType::F16;
        let s = ShapeDescriptor::new(2048, 128, types);
        assert!(matches!(
            FinalizeLayout::resolve(&s, TransferGranularity::default()),
            Err(Error::UnsupportedComputeType { dtype: DType::F16 })
        ));
    }

    #[test]
    fn test_unaligned_hidden_rejected() {
        // 1000 * 4 = 4000 bytes, not divisible by 16... it is (4000/16=250),
        // but 250 columns are not a whole number of warps.
        let err = FinalizeLayout::resolve(&shape(1000, 128), TransferGranularity::default());
        assert!(matches!(
            err,
            Err(Error::Indivisible {
                value: 250,
                unit: 32,
                ..
            })
        ));

        // 1001 * 4 = 4004 bytes fails already at the transfer width.
        let err = FinalizeLayout::resolve(&shape(1001, 128), TransferGranularity::default());
        assert!(matches!(err, Err(Error::Indivisible { unit: 16, .. })));
    }

    #[test]
    fn test_store_width_follows_weight_type() {
        let layout =
            FinalizeLayout::resolve(&shape(2048, 128), TransferGranularity::default()).unwrap();
        // 4 f32 elements per load, stored as 4 f16 weights
        assert_eq!(layout.elements_per_transfer, 4);
        assert_eq!(layout.bytes_per_store, 8);
    }
}
