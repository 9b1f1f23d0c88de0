//! HiGHS adapter for the oxlp model.
//!
//! [`HighsLp`] owns an engine handle, an incremental [`oxlp_core::LpModel`],
//! and the solve-state caches. Model edits accumulate on the adapter; each
//! [`HighsLp::solve`] lowers the current model into the engine, runs the
//! simplex algorithm once, and exposes the result vectors (primal values,
//! dual values, and the unboundedness/infeasibility certificates) through
//! lazily filled caches.

pub mod ffi;
mod solution;
pub mod solver;
mod status;

pub use ffi::{highs_version, EngineError, EngineStatus, HighsEngine, SolutionSnapshot};
pub use solver::HighsLp;
