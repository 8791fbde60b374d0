//! # normr
//!
//! **Build-time layout derivation for GPU normalization kernels.**
//!
//! normr sizes the LayerNorm/RMSNorm kernel family before anything runs on a
//! device: given a problem shape (hidden size plus the input/weight/output/
//! compute/index types) and a parallel decomposition (warps per row axis,
//! warps per column axis, execution groups per row), it derives the static
//! tiling, vectorization widths, and per-group shared-memory budgets for the
//! forward pass, both backward passes, and the cross-group weight-gradient
//! finalize pass - or rejects the configuration outright.
//!
//! ## Why normr?
//!
//! - **Fail at build time**: every alignment and capacity invariant is
//!   checked before a kernel is ever materialized; there is no runtime
//!   fallback
//! - **Pure values**: resolvers are total, deterministic functions over
//!   `Copy` value objects - no I/O, no state, no allocation
//! - **Composable costs**: reduction-tree collaborators report their own
//!   shared-memory needs through a trait seam and the resolvers fold them in
//!
//! ## Quick Start
//!
//! ```rust
//! use normr::prelude::*;
//!
//! let shape = ShapeDescriptor::new(1024, 128, KernelTypes::mixed(DType::F16));
//! let decomp = ParallelDecomposition::single_group(4);
//!
//! let main = MainLayout::resolve(&shape, decomp, TransferGranularity::default())?;
//! assert_eq!(main.loads_per_thread, 1);
//!
//! let finalize = FinalizeLayout::resolve(&shape, TransferGranularity::default())?;
//! assert_eq!(finalize.smem_bytes, 5120);
//! # Ok::<(), normr::error::Error>(())
//! ```
//!
//! Kernel bodies, launch plumbing, and memory management live elsewhere:
//! normr only validates and sizes one fully specified configuration.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod decomp;
pub mod dtype;
pub mod error;
pub mod layout;
pub mod reduce;
pub mod shape;
pub mod transfer;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::decomp::ParallelDecomposition;
    pub use crate::dtype::DType;
    pub use crate::error::{Error, Result};
    pub use crate::layout::{FinalizeLayout, MainLayout};
    pub use crate::reduce::{Reducer, SmemRequirement, Stats};
    pub use crate::shape::{KernelTypes, ShapeDescriptor, THREADS_PER_WARP};
    pub use crate::transfer::{TransferGranularity, VectorLanes};
}
