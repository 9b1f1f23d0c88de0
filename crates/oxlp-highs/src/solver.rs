//! The HiGHS-backed solver adapter.

use std::time::Instant;

use oxlp_core::{
    LpModel, LpSolver, MessageLevel, ProblemType, SolveOptions, SolveOutcome, VarStatus,
};
use tracing::{debug, warn};

use crate::ffi::{highs_version, EngineError, EngineLp, EngineStatus, HighsEngine};
use crate::solution::{ResultCaches, SolveState};
use crate::status::{outcome_from, problem_type_from, var_status_from};

/// Adapter between the incremental [`LpModel`] and the HiGHS engine.
///
/// The adapter owns the engine handle for its whole lifetime. Model edits
/// accumulate locally; [`HighsLp::solve`] lowers the current model into the
/// engine and runs the simplex algorithm once. Every mutating call resets
/// the solve state, so result queries can only observe vectors extracted
/// from the model they were solved against.
///
/// Result queries (`primal_value`, `dual_value`, `primal_ray`, `dual_ray`)
/// panic unless the last solve returned [`SolveOutcome::Solved`]; callers
/// gate access on [`HighsLp::primal_type`] / [`HighsLp::dual_type`].
pub struct HighsLp {
    engine: HighsEngine,
    model: LpModel,
    state: SolveState,
    options: SolveOptions,
}

impl HighsLp {
    /// Create an adapter with an empty model and a fresh engine handle.
    pub fn new() -> Self {
        HighsLp {
            engine: HighsEngine::new(),
            model: LpModel::new(),
            state: SolveState::Unsolved,
            options: SolveOptions::new(),
        }
    }

    /// Static identifier of this backend.
    pub fn solver_name(&self) -> &'static str {
        "highs"
    }

    /// Fresh, empty adapter of the same backend.
    pub fn new_solver(&self) -> Self {
        Self::new()
    }

    /// Independent adapter with a new engine handle and a copy of the model
    /// and name tables. The solve state starts out `Unsolved` and the
    /// pending options reset to their construction defaults.
    pub fn clone_solver(&self) -> Self {
        HighsLp {
            engine: HighsEngine::new(),
            model: self.model.clone(),
            state: SolveState::Unsolved,
            options: SolveOptions::new(),
        }
    }

    /// Read access to the underlying model.
    pub fn model(&self) -> &LpModel {
        &self.model
    }

    /// The pending options applied at the next solve.
    pub fn options(&self) -> &SolveOptions {
        &self.options
    }

    fn invalidate(&mut self) {
        self.state = SolveState::Unsolved;
    }

    // --- model mutation, each call invalidating the solve state ---

    /// Append a column with default bounds `(-inf, +inf)` and no objective
    /// coefficient. Returns the new dense index.
    pub fn add_col(&mut self) -> usize {
        self.invalidate();
        self.model.add_col()
    }

    /// Append a row with default bounds `(-inf, +inf)` and no coefficients.
    pub fn add_row(&mut self) -> usize {
        self.invalidate();
        self.model.add_row()
    }

    /// Append a row with the given bounds and `(column index, value)`
    /// coefficient pairs.
    pub fn add_row_with(&mut self, lower: f64, coeffs: &[(usize, f64)], upper: f64) -> usize {
        self.invalidate();
        self.model.add_row_with(lower, coeffs, upper)
    }

    /// Remove a column, compacting the index space by swap-with-last.
    pub fn erase_col(&mut self, col: usize) {
        self.invalidate();
        self.model.erase_col(col);
    }

    /// Remove a row, compacting the index space by swap-with-last.
    pub fn erase_row(&mut self, row: usize) {
        self.invalidate();
        self.model.erase_row(row);
    }

    /// Replace every coefficient of a row.
    pub fn set_row_coeffs(&mut self, row: usize, coeffs: &[(usize, f64)]) {
        self.invalidate();
        self.model.set_row_coeffs(row, coeffs);
    }

    /// Replace every coefficient of a column.
    pub fn set_col_coeffs(&mut self, col: usize, coeffs: &[(usize, f64)]) {
        self.invalidate();
        self.model.set_col_coeffs(col, coeffs);
    }

    /// Set a single coefficient.
    pub fn set_coeff(&mut self, row: usize, col: usize, value: f64) {
        self.invalidate();
        self.model.set_coeff(row, col, value);
    }

    /// Set the lower bound of a column.
    pub fn set_col_lower(&mut self, col: usize, value: f64) {
        self.invalidate();
        self.model.set_col_lower(col, value);
    }

    /// Set the upper bound of a column.
    pub fn set_col_upper(&mut self, col: usize, value: f64) {
        self.invalidate();
        self.model.set_col_upper(col, value);
    }

    /// Set the lower bound of a row.
    pub fn set_row_lower(&mut self, row: usize, value: f64) {
        self.invalidate();
        self.model.set_row_lower(row, value);
    }

    /// Set the upper bound of a row.
    pub fn set_row_upper(&mut self, row: usize, value: f64) {
        self.invalidate();
        self.model.set_row_upper(row, value);
    }

    /// Replace the whole objective.
    pub fn set_obj_coeffs(&mut self, coeffs: &[(usize, f64)]) {
        self.invalidate();
        self.model.set_obj_coeffs(coeffs);
    }

    /// Set one objective coefficient.
    pub fn set_obj_coeff(&mut self, col: usize, value: f64) {
        self.invalidate();
        self.model.set_obj_coeff(col, value);
    }

    /// Reset to the just-constructed state short of re-creating the engine
    /// handle: empties the model and both name tables, resets the engine's
    /// solver state, and drops all cached results. Idempotent.
    pub fn clear(&mut self) {
        self.model.clear();
        self.state = SolveState::Unsolved;
        if let Err(err) = self.engine.clear_solver() {
            warn!(
                component = "solver",
                operation = "clear",
                status = "warn",
                error = %err,
                "Failed to reset engine solver state"
            );
        }
    }

    // --- naming (does not touch the solve state) ---

    /// Set the name of a column; an empty string clears naming.
    pub fn set_col_name(&mut self, col: usize, name: &str) {
        self.model.set_col_name(col, name);
    }

    /// Name of a column; the empty string if unnamed.
    pub fn col_name(&self, col: usize) -> &str {
        self.model.col_name(col)
    }

    /// Look up a column by name; `None` if the name is absent.
    pub fn col_by_name(&self, name: &str) -> Option<usize> {
        self.model.col_by_name(name)
    }

    /// Set the name of a row; an empty string clears naming.
    pub fn set_row_name(&mut self, row: usize, name: &str) {
        self.model.set_row_name(row, name);
    }

    /// Name of a row; the empty string if unnamed.
    pub fn row_name(&self, row: usize) -> &str {
        self.model.row_name(row)
    }

    /// Look up a row by name; `None` if the name is absent.
    pub fn row_by_name(&self, name: &str) -> Option<usize> {
        self.model.row_by_name(name)
    }

    // --- read-only model access ---

    /// Number of columns.
    pub fn num_cols(&self) -> usize {
        self.model.num_cols()
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.model.num_rows()
    }

    /// Nonzero coefficients of a row.
    pub fn row_coeffs(&self, row: usize) -> Vec<(usize, f64)> {
        self.model.row_coeffs(row)
    }

    /// Nonzero coefficients of a column.
    pub fn col_coeffs(&self, col: usize) -> Vec<(usize, f64)> {
        self.model.col_coeffs(col)
    }

    /// Coefficient at `(row, col)`.
    pub fn coeff(&self, row: usize, col: usize) -> f64 {
        self.model.coeff(row, col)
    }

    /// Lower bound of a column.
    pub fn col_lower(&self, col: usize) -> f64 {
        self.model.col_lower(col)
    }

    /// Upper bound of a column.
    pub fn col_upper(&self, col: usize) -> f64 {
        self.model.col_upper(col)
    }

    /// Lower bound of a row.
    pub fn row_lower(&self, row: usize) -> f64 {
        self.model.row_lower(row)
    }

    /// Upper bound of a row.
    pub fn row_upper(&self, row: usize) -> f64 {
        self.model.row_upper(row)
    }

    /// Nonzero objective coefficients.
    pub fn obj_coeffs(&self) -> Vec<(usize, f64)> {
        self.model.obj_coeffs()
    }

    /// Objective coefficient of a column.
    pub fn obj_coeff(&self, col: usize) -> f64 {
        self.model.obj_coeff(col)
    }

    // --- configuration, pending until the next solve ---

    /// Store the message level to apply at the next solve.
    pub fn set_message_level(&mut self, level: MessageLevel) {
        self.options.message_level = level;
    }

    /// Store a wall-clock limit for subsequent solves, in seconds.
    pub fn set_time_limit(&mut self, seconds: f64) {
        self.options.time_limit = Some(seconds);
    }

    /// Store a simplex iteration limit for subsequent solves.
    pub fn set_iteration_limit(&mut self, count: i32) {
        self.options.iteration_limit = Some(count);
    }

    // --- solve & result extraction ---

    /// Lower the current model into the engine and run the simplex
    /// algorithm once.
    ///
    /// All cached result vectors are dropped unconditionally on entry, even
    /// if the previous solve's results were never read. A definite engine
    /// answer (optimal, infeasible, unbounded) yields `Solved`; any other
    /// termination or failed engine call yields `Failed`.
    pub fn solve(&mut self) -> SolveOutcome {
        self.state = SolveState::Unsolved;
        let started = Instant::now();
        debug!(
            component = "solver",
            operation = "solve",
            status = "success",
            solver = "highs",
            solver_version = ?highs_version(),
            num_cols = self.model.num_cols(),
            num_rows = self.model.num_rows(),
            nnz = self.model.num_coeffs(),
            "Starting solve"
        );

        let termination = match self.run_engine() {
            Ok(termination) => termination,
            Err(err) => {
                warn!(
                    component = "solver",
                    operation = "solve",
                    status = "error",
                    error = %err,
                    "Engine call failed during solve"
                );
                return SolveOutcome::Failed;
            }
        };

        let outcome = outcome_from(termination);
        if outcome.is_solved() {
            self.state = SolveState::Solved(ResultCaches::new());
        }
        debug!(
            component = "solver",
            operation = "solve",
            status = "success",
            engine_status = ?termination,
            outcome = ?outcome,
            objective_value = self.engine.objective_value(),
            duration_ms = started.elapsed().as_secs_f64() * 1000.0,
            "Solve finished"
        );
        outcome
    }

    fn run_engine(&mut self) -> Result<EngineStatus, EngineError> {
        self.apply_options()?;
        let lp = lower_model(&self.model, self.engine.infinity());
        self.engine.load(&lp)?;
        self.engine.run()?;
        Ok(self.engine.termination())
    }

    /// Push the pending options and the fixed engine parameters.
    ///
    /// Basis statuses and certificates stay well-defined only when the
    /// simplex algorithm runs on the original model, so the solver and
    /// presolve settings are not configurable.
    fn apply_options(&mut self) -> Result<(), EngineError> {
        self.engine.set_string_option("solver", "simplex")?;
        self.engine.set_string_option("presolve", "off")?;
        let (output, dev_level) = match self.options.message_level {
            MessageLevel::Nothing => (false, 0),
            MessageLevel::Error | MessageLevel::Warning => (true, 0),
            MessageLevel::Normal => (true, 1),
            MessageLevel::Verbose => (true, 3),
        };
        self.engine.set_bool_option("output_flag", output)?;
        self.engine.set_int_option("log_dev_level", dev_level)?;
        if let Some(limit) = self.options.time_limit {
            self.engine.set_double_option("time_limit", limit)?;
        }
        if let Some(limit) = self.options.iteration_limit {
            self.engine.set_int_option("simplex_iteration_limit", limit)?;
        }
        Ok(())
    }

    /// Primal value of a column. Valid only after a `Solved` outcome.
    pub fn primal_value(&self, col: usize) -> f64 {
        self.caches("primal_value")
            .primal_values(|| self.extract_primal_values())[col]
    }

    /// Dual value (shadow price) of a row. Valid only after a `Solved`
    /// outcome.
    pub fn dual_value(&self, row: usize) -> f64 {
        self.caches("dual_value")
            .dual_values(|| self.extract_dual_values())[row]
    }

    /// Component of the unbounded-direction certificate for a column.
    /// Valid only after a `Solved` outcome.
    pub fn primal_ray(&self, col: usize) -> f64 {
        self.caches("primal_ray")
            .primal_ray(|| self.extract_primal_ray())[col]
    }

    /// Component of the infeasibility (Farkas) certificate for a row.
    /// Valid only after a `Solved` outcome.
    pub fn dual_ray(&self, row: usize) -> f64 {
        self.caches("dual_ray").dual_ray(|| self.extract_dual_ray())[row]
    }

    /// Objective value at the engine's current basis. Direct passthrough,
    /// not cached.
    pub fn objective_value(&self) -> f64 {
        self.engine.objective_value()
    }

    /// Basis status of a column.
    pub fn col_status(&self, col: usize) -> VarStatus {
        let (col_codes, _) = self.basis_codes();
        var_status_from(
            col_codes[col],
            self.model.col_lower(col),
            self.model.col_upper(col),
        )
    }

    /// Basis status of a row.
    pub fn row_status(&self, row: usize) -> VarStatus {
        let (_, row_codes) = self.basis_codes();
        var_status_from(
            row_codes[row],
            self.model.row_lower(row),
            self.model.row_upper(row),
        )
    }

    /// Classification of the primal problem from the last engine status.
    pub fn primal_type(&self) -> ProblemType {
        problem_type_from(self.engine.termination())
    }

    /// Classification of the dual problem from the last engine status.
    pub fn dual_type(&self) -> ProblemType {
        problem_type_from(self.engine.termination())
    }

    fn caches(&self, operation: &'static str) -> &ResultCaches {
        match &self.state {
            SolveState::Solved(caches) => caches,
            SolveState::Unsolved => {
                panic!("{operation} requires a solve with a Solved outcome")
            }
        }
    }

    fn basis_codes(&self) -> (Vec<highs_sys::HighsInt>, Vec<highs_sys::HighsInt>) {
        match self.engine.basis() {
            Ok(codes) => codes,
            Err(err) => panic!("engine basis query failed: {err}"),
        }
    }

    fn extract_primal_values(&self) -> Vec<f64> {
        match self.engine.solution() {
            Ok(snapshot) => snapshot.col_values,
            Err(err) => {
                warn!(
                    component = "solver",
                    operation = "primal_values",
                    status = "warn",
                    error = %err,
                    "Primal extraction failed; returning zeros"
                );
                vec![0.0; self.model.num_cols()]
            }
        }
    }

    fn extract_dual_values(&self) -> Vec<f64> {
        match self.engine.solution() {
            Ok(snapshot) => snapshot.row_duals,
            Err(err) => {
                warn!(
                    component = "solver",
                    operation = "dual_values",
                    status = "warn",
                    error = %err,
                    "Dual extraction failed; returning zeros"
                );
                vec![0.0; self.model.num_rows()]
            }
        }
    }

    fn extract_primal_ray(&self) -> Vec<f64> {
        match self.engine.primal_ray() {
            Ok(Some(ray)) => ray,
            Ok(None) => {
                warn!(
                    component = "solver",
                    operation = "primal_ray",
                    status = "warn",
                    "Engine stored no primal ray; returning zeros"
                );
                vec![0.0; self.model.num_cols()]
            }
            Err(err) => {
                warn!(
                    component = "solver",
                    operation = "primal_ray",
                    status = "warn",
                    error = %err,
                    "Primal ray extraction failed; returning zeros"
                );
                vec![0.0; self.model.num_cols()]
            }
        }
    }

    fn extract_dual_ray(&self) -> Vec<f64> {
        match self.engine.dual_ray() {
            Ok(Some(ray)) => ray,
            Ok(None) => {
                warn!(
                    component = "solver",
                    operation = "dual_ray",
                    status = "warn",
                    "Engine stored no dual ray; returning zeros"
                );
                vec![0.0; self.model.num_rows()]
            }
            Err(err) => {
                warn!(
                    component = "solver",
                    operation = "dual_ray",
                    status = "warn",
                    error = %err,
                    "Dual ray extraction failed; returning zeros"
                );
                vec![0.0; self.model.num_rows()]
            }
        }
    }
}

impl Default for HighsLp {
    fn default() -> Self {
        Self::new()
    }
}

impl LpSolver for HighsLp {
    fn solver_name(&self) -> &'static str {
        self.solver_name()
    }

    fn solve(&mut self) -> SolveOutcome {
        self.solve()
    }

    fn primal_value(&self, col: usize) -> f64 {
        self.primal_value(col)
    }

    fn dual_value(&self, row: usize) -> f64 {
        self.dual_value(row)
    }

    fn primal_ray(&self, col: usize) -> f64 {
        self.primal_ray(col)
    }

    fn dual_ray(&self, row: usize) -> f64 {
        self.dual_ray(row)
    }

    fn objective_value(&self) -> f64 {
        self.objective_value()
    }

    fn col_status(&self, col: usize) -> VarStatus {
        self.col_status(col)
    }

    fn row_status(&self, row: usize) -> VarStatus {
        self.row_status(row)
    }

    fn primal_type(&self) -> ProblemType {
        self.primal_type()
    }

    fn dual_type(&self) -> ProblemType {
        self.dual_type()
    }

    fn set_message_level(&mut self, level: MessageLevel) {
        self.set_message_level(level);
    }
}

/// Lower the model into the engine's row-wise arrays, substituting the
/// engine's native infinity for the `±inf` bound sentinels.
fn lower_model(model: &LpModel, native_infinity: f64) -> EngineLp {
    let num_cols = model.num_cols();
    let num_rows = model.num_rows();

    let mut lp = EngineLp {
        col_cost: Vec::with_capacity(num_cols),
        col_lower: Vec::with_capacity(num_cols),
        col_upper: Vec::with_capacity(num_cols),
        row_lower: Vec::with_capacity(num_rows),
        row_upper: Vec::with_capacity(num_rows),
        a_start: Vec::with_capacity(num_rows),
        a_index: Vec::new(),
        a_value: Vec::new(),
    };

    for col in 0..num_cols {
        lp.col_cost.push(model.obj_coeff(col));
        lp.col_lower
            .push(engine_bound(model.col_lower(col), native_infinity));
        lp.col_upper
            .push(engine_bound(model.col_upper(col), native_infinity));
    }

    for row in 0..num_rows {
        lp.row_lower
            .push(engine_bound(model.row_lower(row), native_infinity));
        lp.row_upper
            .push(engine_bound(model.row_upper(row), native_infinity));
        lp.a_start.push(lp.a_index.len() as highs_sys::HighsInt);
        for (col, value) in model.row_coeffs(row) {
            lp.a_index.push(col as highs_sys::HighsInt);
            lp.a_value.push(value);
        }
    }

    lp
}

fn engine_bound(value: f64, native_infinity: f64) -> f64 {
    if value == f64::INFINITY {
        native_infinity
    } else if value == f64::NEG_INFINITY {
        -native_infinity
    } else {
        value
    }
}
