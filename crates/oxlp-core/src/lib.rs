//! Engine-independent building blocks for LP solver adapters.
//!
//! This crate holds the parts of a solver adapter that do not depend on any
//! particular simplex engine:
//!
//! - [`LpModel`]: an incrementally editable LP model with a dense 0-based
//!   index space for columns and rows, compacted by swap-with-last on erase.
//! - [`NameIndex`]: a bidirectional name table (dense names plus reverse
//!   lookup) that tracks the same index space.
//! - [`solver`]: the solver-agnostic vocabulary (solve outcomes, problem
//!   types, basis statuses, message levels) and the [`LpSolver`] trait that
//!   engine backends implement.
//! - [`SolveOptions`]: engine configuration collected up front and applied
//!   at the next solve.

pub mod config;
pub mod model;
pub mod solver;

pub use config::SolveOptions;
pub use model::{LpModel, NameIndex};
pub use solver::{LpSolver, MessageLevel, ProblemType, SolveOutcome, VarStatus};
