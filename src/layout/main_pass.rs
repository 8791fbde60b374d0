//! Main-pass layout resolution
//!
//! Sizes the forward, data-gradient, and weight-gradient kernels for one
//! `(shape, decomposition, transfer)` configuration: how many rows each
//! execution group owns, how many vectorized loads each thread issues per
//! row, and how much shared memory the group must reserve for the reduction
//! tree, the forward statistics, and the per-row weight-gradient accumulator.

use crate::decomp::ParallelDecomposition;
use crate::error::{Error, Result};
use crate::reduce::{Reducer, Stats};
use crate::shape::ShapeDescriptor;
use crate::transfer::{TransferGranularity, VectorLanes};

/// Resolved layout for the forward and backward compute kernels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MainLayout {
    /// Rows handled per execution group
    pub rows_per_group: usize,
    /// Threads cooperating on one row within a group
    pub threads_per_row: usize,
    /// Threads per execution group
    pub threads_per_group: usize,
    /// Input elements moved per vectorized transfer
    pub elements_per_transfer: usize,
    /// Per-type vector widths of one transfer
    pub lanes: VectorLanes,
    /// Transfer-wide columns in one hidden vector
    pub vector_columns: usize,
    /// Vectorized loads each thread issues per row
    pub loads_per_thread: usize,
    /// Bytes of input in one row
    pub bytes_per_row: usize,
    /// Bytes of one row covered by one group per load sweep
    pub bytes_per_row_per_group: usize,
    /// Weight-gradient per-row accumulator, bytes of shared memory
    pub smem_wgrad_bytes: usize,
    /// Data-gradient reduction tree, bytes of shared memory
    pub smem_dgrad_bytes: usize,
    /// Forward-pass statistics, bytes of shared memory
    pub smem_fwd_bytes: usize,
    /// Total backward-pass shared memory (reduction tree + accumulator)
    pub smem_bwd_bytes: usize,
}

impl MainLayout {
    /// Derive the main-pass layout for one configuration
    ///
    /// The execution-group width is derived from `decomp`; the descriptor's
    /// `threads_per_group` parameterizes only the finalize pass.
    pub fn resolve(
        shape: &ShapeDescriptor,
        decomp: ParallelDecomposition,
        transfer: TransferGranularity,
    ) -> Result<Self> {
        decomp.validate()?;
        if shape.hidden_size == 0 {
            return Err(Error::InvalidArgument {
                arg: "hidden_size",
                reason: "must be positive",
            });
        }

        let types = &shape.types;
        if types.input.size_in_bytes() < types.output.size_in_bytes() {
            return Err(Error::InputNarrowerThan {
                input: types.input,
                role: "output",
                other: types.output,
            });
        }
        if types.input.size_in_bytes() < types.weight.size_in_bytes() {
            return Err(Error::InputNarrowerThan {
                input: types.input,
                role: "weight",
                other: types.weight,
            });
        }

        let threads_per_row = decomp.threads_per_row();
        let threads_per_group = decomp.threads_per_group();
        let rows_per_group = decomp.warps_m;

        let elements_per_transfer = transfer.elements(types.input)?;
        let lanes = VectorLanes::uniform(elements_per_transfer);

        let bytes_per_row = shape.hidden_size * types.input.size_in_bytes();
        let bytes_per_row_per_group = threads_per_row * transfer.bytes();

        if shape.hidden_size % elements_per_transfer != 0 {
            return Err(Error::Indivisible {
                what: "hidden_size",
                value: shape.hidden_size,
                unit: elements_per_transfer,
            });
        }
        let vector_columns = shape.hidden_size / elements_per_transfer;

        // One column per thread per load, across all cooperating groups.
        let columns_per_load = decomp.ctas_per_row * threads_per_row;
        if vector_columns % columns_per_load != 0 {
            return Err(Error::Indivisible {
                what: "vector columns",
                value: vector_columns,
                unit: columns_per_load,
            });
        }
        let loads_per_thread = vector_columns / columns_per_load;

        // A group that shares its row with other groups cannot accumulate
        // weight gradients locally; the finalize pass owns that reduction.
        let smem_wgrad_bytes = if decomp.ctas_per_row > 1 {
            0
        } else {
            rows_per_group * shape.hidden_size * types.compute.size_in_bytes()
        };

        let smem_dgrad_bytes = Reducer::for_pairs(types.compute, decomp).smem_bytes();
        let smem_fwd_bytes = Stats::new(types.compute, decomp).smem_bytes();
        let smem_bwd_bytes = smem_dgrad_bytes + smem_wgrad_bytes;

        Ok(Self {
            rows_per_group,
            threads_per_row,
            threads_per_group,
            elements_per_transfer,
            lanes,
            vector_columns,
            loads_per_thread,
            bytes_per_row,
            bytes_per_row_per_group,
            smem_wgrad_bytes,
            smem_dgrad_bytes,
            smem_fwd_bytes,
            smem_bwd_bytes,
        })
    }
}
