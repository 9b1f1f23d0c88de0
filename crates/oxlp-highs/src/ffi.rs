//! Raw bindings to the HiGHS engine.
//!
//! This module contains unsafe code for interacting with the C library.
//! Everything above it talks to [`HighsEngine`], which owns the engine
//! handle for its whole lifetime: construction acquires it, `Drop` releases
//! it exactly once on every path.
#![allow(unsafe_code)]

use std::ffi::{c_void, CStr, CString};
use std::fmt;

use highs_sys::{
    kHighsMatrixFormatRowwise, kHighsModelStatusInfeasible, kHighsModelStatusIterationLimit,
    kHighsModelStatusModelEmpty, kHighsModelStatusOptimal, kHighsModelStatusTimeLimit,
    kHighsModelStatusUnbounded, kHighsModelStatusUnboundedOrInfeasible, HighsInt,
    Highs_clearModel, Highs_clearSolver, Highs_create, Highs_destroy, Highs_getBasis,
    Highs_getDualRay, Highs_getInfinity, Highs_getModelStatus, Highs_getNumCols,
    Highs_getNumRows, Highs_getObjectiveValue, Highs_getPrimalRay, Highs_getSolution,
    Highs_passLp, Highs_run, Highs_setBoolOptionValue, Highs_setDoubleOptionValue,
    Highs_setIntOptionValue, Highs_setStringOptionValue, Highs_version,
    OBJECTIVE_SENSE_MAXIMIZE, STATUS_ERROR, STATUS_OK,
};
use tracing::{debug, warn};

/// Termination status reported by the engine after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// Optimal solution found.
    Optimal,
    /// Problem is infeasible.
    Infeasible,
    /// Problem is unbounded.
    Unbounded,
    /// The engine could not tell unboundedness and infeasibility apart.
    UnboundedOrInfeasible,
    /// The engine hit its time limit.
    ReachedTimeLimit,
    /// The engine hit its iteration limit.
    ReachedIterationLimit,
    /// The loaded model was empty.
    ModelEmpty,
    /// Any other termination.
    Unknown,
}

/// Errors returned by engine calls.
#[derive(Debug, Clone)]
pub enum EngineError {
    /// An engine entry point returned an error status.
    CallFailed {
        call: &'static str,
        status: HighsInt,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::CallFailed { call, status } => {
                write!(f, "engine call {} failed with status {}", call, status)
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// A model lowered into the dense/sparse arrays the engine ingests,
/// row-wise.
///
/// Bounds are already in the engine's native infinity representation.
#[derive(Debug, Clone, Default)]
pub struct EngineLp {
    pub col_cost: Vec<f64>,
    pub col_lower: Vec<f64>,
    pub col_upper: Vec<f64>,
    pub row_lower: Vec<f64>,
    pub row_upper: Vec<f64>,
    pub a_start: Vec<HighsInt>,
    pub a_index: Vec<HighsInt>,
    pub a_value: Vec<f64>,
}

impl EngineLp {
    pub fn num_cols(&self) -> usize {
        self.col_cost.len()
    }

    pub fn num_rows(&self) -> usize {
        self.row_lower.len()
    }

    pub fn num_nz(&self) -> usize {
        self.a_value.len()
    }
}

/// Snapshot of primal and dual solution values extracted from the engine.
///
/// The engine keeps no reference to these vectors after extraction.
#[derive(Debug, Clone)]
pub struct SolutionSnapshot {
    pub(crate) col_values: Vec<f64>,
    pub(crate) col_duals: Vec<f64>,
    pub(crate) row_values: Vec<f64>,
    pub(crate) row_duals: Vec<f64>,
}

impl SolutionSnapshot {
    /// Primal values for columns.
    pub fn col_values(&self) -> &[f64] {
        &self.col_values
    }

    /// Dual values for columns (reduced costs).
    pub fn col_duals(&self) -> &[f64] {
        &self.col_duals
    }

    /// Row activity values.
    pub fn row_values(&self) -> &[f64] {
        &self.row_values
    }

    /// Dual values for rows (shadow prices).
    pub fn row_duals(&self) -> &[f64] {
        &self.row_duals
    }
}

/// The sense every lowered model is solved under. The adapter never
/// forwards a sense; min/max semantics belong to the generic layer.
const LOWERED_SENSE: HighsInt = OBJECTIVE_SENSE_MAXIMIZE;

/// Owned wrapper around the engine handle.
pub struct HighsEngine {
    highs: *mut c_void,
}

impl HighsEngine {
    /// Acquire a fresh engine handle, with all engine output suppressed
    /// until a message level is pushed at solve time.
    pub fn new() -> Self {
        let highs = unsafe { Highs_create() };
        assert!(!highs.is_null(), "engine handle allocation failed");
        let mut engine = HighsEngine { highs };
        if let Err(err) = engine.set_bool_option("output_flag", false) {
            warn!(
                component = "engine",
                operation = "init",
                status = "warn",
                error = %err,
                "Failed to silence engine output"
            );
        }
        debug!(
            component = "engine",
            operation = "init",
            status = "success",
            version = ?highs_version(),
            "Created engine handle"
        );
        engine
    }

    /// The engine's native infinity value.
    pub fn infinity(&self) -> f64 {
        unsafe { Highs_getInfinity(self.highs) }
    }

    /// Number of columns currently loaded in the engine.
    pub fn num_cols(&self) -> usize {
        (unsafe { Highs_getNumCols(self.highs) }).max(0) as usize
    }

    /// Number of rows currently loaded in the engine.
    pub fn num_rows(&self) -> usize {
        (unsafe { Highs_getNumRows(self.highs) }).max(0) as usize
    }

    /// Set a boolean engine option.
    pub fn set_bool_option(&mut self, option: &'static str, value: bool) -> Result<(), EngineError> {
        let name = c_name(option);
        let status =
            unsafe { Highs_setBoolOptionValue(self.highs, name.as_ptr(), HighsInt::from(value)) };
        check("Highs_setBoolOptionValue", status)
    }

    /// Set an integer engine option.
    pub fn set_int_option(&mut self, option: &'static str, value: i32) -> Result<(), EngineError> {
        let name = c_name(option);
        let status = unsafe { Highs_setIntOptionValue(self.highs, name.as_ptr(), value) };
        check("Highs_setIntOptionValue", status)
    }

    /// Set a floating-point engine option.
    pub fn set_double_option(
        &mut self,
        option: &'static str,
        value: f64,
    ) -> Result<(), EngineError> {
        let name = c_name(option);
        let status = unsafe { Highs_setDoubleOptionValue(self.highs, name.as_ptr(), value) };
        check("Highs_setDoubleOptionValue", status)
    }

    /// Set a string engine option.
    pub fn set_string_option(
        &mut self,
        option: &'static str,
        value: &str,
    ) -> Result<(), EngineError> {
        let name = c_name(option);
        let value = CString::new(value).expect("option value contains NUL");
        let status =
            unsafe { Highs_setStringOptionValue(self.highs, name.as_ptr(), value.as_ptr()) };
        check("Highs_setStringOptionValue", status)
    }

    /// Replace the engine's incumbent model with a lowered one.
    pub fn load(&mut self, lp: &EngineLp) -> Result<(), EngineError> {
        check("Highs_clearModel", unsafe { Highs_clearModel(self.highs) })?;
        let status = unsafe {
            Highs_passLp(
                self.highs,
                lp.num_cols() as HighsInt,
                lp.num_rows() as HighsInt,
                lp.num_nz() as HighsInt,
                kHighsMatrixFormatRowwise,
                LOWERED_SENSE,
                0.0,
                lp.col_cost.as_ptr(),
                lp.col_lower.as_ptr(),
                lp.col_upper.as_ptr(),
                lp.row_lower.as_ptr(),
                lp.row_upper.as_ptr(),
                lp.a_start.as_ptr(),
                lp.a_index.as_ptr(),
                lp.a_value.as_ptr(),
            )
        };
        check("Highs_passLp", status)?;
        debug!(
            component = "engine",
            operation = "load",
            status = "success",
            num_cols = lp.num_cols(),
            num_rows = lp.num_rows(),
            nnz = lp.num_nz(),
            "Loaded model into engine"
        );
        Ok(())
    }

    /// Run the solve once.
    pub fn run(&mut self) -> Result<(), EngineError> {
        check("Highs_run", unsafe { Highs_run(self.highs) })
    }

    /// Termination status of the last run.
    pub fn termination(&self) -> EngineStatus {
        map_status(unsafe { Highs_getModelStatus(self.highs) })
    }

    /// Objective value at the engine's current basis.
    pub fn objective_value(&self) -> f64 {
        unsafe { Highs_getObjectiveValue(self.highs) }
    }

    /// Extract primal and dual values for all columns and rows.
    pub fn solution(&self) -> Result<SolutionSnapshot, EngineError> {
        let mut col_values = vec![0.0; self.num_cols()];
        let mut col_duals = vec![0.0; self.num_cols()];
        let mut row_values = vec![0.0; self.num_rows()];
        let mut row_duals = vec![0.0; self.num_rows()];
        let status = unsafe {
            Highs_getSolution(
                self.highs,
                col_values.as_mut_ptr(),
                col_duals.as_mut_ptr(),
                row_values.as_mut_ptr(),
                row_duals.as_mut_ptr(),
            )
        };
        check("Highs_getSolution", status)?;
        Ok(SolutionSnapshot {
            col_values,
            col_duals,
            row_values,
            row_duals,
        })
    }

    /// Raw basis status codes for all columns and rows.
    pub fn basis(&self) -> Result<(Vec<HighsInt>, Vec<HighsInt>), EngineError> {
        let mut col_status = vec![0; self.num_cols()];
        let mut row_status = vec![0; self.num_rows()];
        let status = unsafe {
            Highs_getBasis(self.highs, col_status.as_mut_ptr(), row_status.as_mut_ptr())
        };
        check("Highs_getBasis", status)?;
        Ok((col_status, row_status))
    }

    /// Unbounded-direction certificate, one entry per column, if the engine
    /// stored one.
    pub fn primal_ray(&self) -> Result<Option<Vec<f64>>, EngineError> {
        let mut has_ray: HighsInt = 0;
        let mut ray = vec![0.0; self.num_cols()];
        let status =
            unsafe { Highs_getPrimalRay(self.highs, &mut has_ray, ray.as_mut_ptr()) };
        if status == STATUS_ERROR {
            warn!(
                component = "engine",
                operation = "primal_ray",
                status = "warn",
                code = status,
                "Primal ray query failed"
            );
            return Ok(None);
        }
        Ok((has_ray != 0).then_some(ray))
    }

    /// Infeasibility (Farkas) certificate, one entry per row, if the engine
    /// stored one.
    pub fn dual_ray(&self) -> Result<Option<Vec<f64>>, EngineError> {
        let mut has_ray: HighsInt = 0;
        let mut ray = vec![0.0; self.num_rows()];
        let status = unsafe { Highs_getDualRay(self.highs, &mut has_ray, ray.as_mut_ptr()) };
        if status == STATUS_ERROR {
            warn!(
                component = "engine",
                operation = "dual_ray",
                status = "warn",
                code = status,
                "Dual ray query failed"
            );
            return Ok(None);
        }
        Ok((has_ray != 0).then_some(ray))
    }

    /// Reset the engine's solver state, including its basis.
    pub fn clear_solver(&mut self) -> Result<(), EngineError> {
        check("Highs_clearSolver", unsafe { Highs_clearSolver(self.highs) })
    }
}

impl Default for HighsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for HighsEngine {
    fn drop(&mut self) {
        unsafe { Highs_destroy(self.highs) }
    }
}

impl fmt::Debug for HighsEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HighsEngine")
            .field("num_cols", &self.num_cols())
            .field("num_rows", &self.num_rows())
            .field("termination", &self.termination())
            .finish_non_exhaustive()
    }
}

/// Return the engine's version string, if available.
pub fn highs_version() -> Option<String> {
    unsafe {
        let ptr = Highs_version();
        if ptr.is_null() {
            None
        } else {
            CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
        }
    }
}

fn c_name(option: &'static str) -> CString {
    CString::new(option).expect("option name contains NUL")
}

fn check(call: &'static str, status: HighsInt) -> Result<(), EngineError> {
    if status == STATUS_ERROR {
        warn!(
            component = "engine",
            operation = "call",
            status = "error",
            call,
            code = status,
            "Engine call failed"
        );
        return Err(EngineError::CallFailed { call, status });
    }
    if status != STATUS_OK {
        warn!(
            component = "engine",
            operation = "call",
            status = "warn",
            call,
            "Engine call returned a warning"
        );
    }
    Ok(())
}

#[allow(non_upper_case_globals)]
fn map_status(status: HighsInt) -> EngineStatus {
    match status {
        kHighsModelStatusOptimal => EngineStatus::Optimal,
        kHighsModelStatusInfeasible => EngineStatus::Infeasible,
        kHighsModelStatusUnbounded => EngineStatus::Unbounded,
        kHighsModelStatusUnboundedOrInfeasible => EngineStatus::UnboundedOrInfeasible,
        kHighsModelStatusTimeLimit => EngineStatus::ReachedTimeLimit,
        kHighsModelStatusIterationLimit => EngineStatus::ReachedIterationLimit,
        kHighsModelStatusModelEmpty => EngineStatus::ModelEmpty,
        _ => EngineStatus::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_reports_native_infinity() {
        let engine = HighsEngine::new();
        let infinity = engine.infinity();
        assert!(infinity.is_finite());
        assert!(infinity >= 1e30);
    }

    #[test]
    fn fresh_engine_is_empty() {
        let engine = HighsEngine::new();
        assert_eq!(engine.num_cols(), 0);
        assert_eq!(engine.num_rows(), 0);
    }

    #[test]
    fn map_status_covers_terminal_codes() {
        assert_eq!(map_status(kHighsModelStatusOptimal), EngineStatus::Optimal);
        assert_eq!(
            map_status(kHighsModelStatusInfeasible),
            EngineStatus::Infeasible
        );
        assert_eq!(
            map_status(kHighsModelStatusUnbounded),
            EngineStatus::Unbounded
        );
        assert_eq!(map_status(-42), EngineStatus::Unknown);
    }
}
