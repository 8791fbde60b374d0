//! Layout resolvers for the normalization kernel family
//!
//! Two independent resolvers, both deterministic pure functions from
//! `(shape, decomposition, transfer)` to an immutable layout or a
//! configuration error:
//!
//! - [`MainLayout`] - forward, data-gradient, and weight-gradient kernels
//! - [`FinalizeLayout`] - the cross-group weight-gradient reduction kernel

mod finalize;
mod main_pass;

pub use finalize::FinalizeLayout;
pub use main_pass::MainLayout;
