//! Error types for normr
//!
//! Every error is a static configuration error: a rejected configuration is
//! simply never materialized, there is no runtime recovery path.

use crate::dtype::DType;
use thiserror::Error;

/// Result type alias using normr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving a kernel layout
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input type is narrower than the output or weight type
    ///
    /// The per-thread element count is computed from the input type, so the
    /// input must be at least as wide as every other transferred type.
    #[error("input type {input} is narrower than {role} type {other}")]
    InputNarrowerThan {
        /// The input dtype
        input: DType,
        /// Which type violated the ordering ("output" or "weight")
        role: &'static str,
        /// The wider dtype
        other: DType,
    },

    /// A derivation step required exact divisibility and did not get it
    #[error("{what} ({value}) is not divisible by {unit}")]
    Indivisible {
        /// The quantity being divided
        what: &'static str,
        /// Its value
        value: usize,
        /// The required divisor
        unit: usize,
    },

    /// Compute type unusable on the finalize transpose path
    ///
    /// The conflict-free shared-memory transpose is defined only for 4-byte
    /// elements.
    #[error("unsupported compute type {dtype} for conflict-free transpose (4-byte types only)")]
    UnsupportedComputeType {
        /// The offending compute dtype
        dtype: DType,
    },

    /// Multi-row-per-group combined with multi-group-per-row
    #[error(
        "illegal decomposition: warps_m = {warps_m} and ctas_per_row = {ctas_per_row} \
         (a row may be split across groups only when each group holds a single row)"
    )]
    IllegalDecomposition {
        /// Rows per execution group
        warps_m: usize,
        /// Execution groups per row
        ctas_per_row: usize,
    },

    /// Finalize pass would need more rows per group than one warp can cover
    #[error("{rows_per_group} rows per group exceed the warp width 32")]
    RowsPerGroupExceedWarp {
        /// Derived rows per execution group
        rows_per_group: usize,
    },

    /// Thread count is not a whole number of warps
    #[error("thread count {threads_per_group} is not a whole number of 32-lane warps")]
    PartialWarp {
        /// Threads per execution group
        threads_per_group: usize,
    },

    /// Invalid argument provided to a resolver
    #[error("invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: &'static str,
    },
}
