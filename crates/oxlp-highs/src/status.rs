//! Status translation between the engine and the solver-agnostic
//! vocabulary.

use highs_sys::{
    kHighsBasisStatusBasic, kHighsBasisStatusLower, kHighsBasisStatusUpper, kHighsBasisStatusZero,
    HighsInt,
};
use oxlp_core::{ProblemType, SolveOutcome, VarStatus};

use crate::ffi::EngineStatus;

/// Collapse an engine termination into the two-valued solve outcome.
///
/// Optimal, infeasible, and unbounded are all definite answers; every other
/// termination means the engine produced nothing usable.
pub(crate) fn outcome_from(status: EngineStatus) -> SolveOutcome {
    match status {
        EngineStatus::Optimal | EngineStatus::Infeasible | EngineStatus::Unbounded => {
            SolveOutcome::Solved
        }
        _ => SolveOutcome::Failed,
    }
}

/// LP-theoretic classification from an engine termination. Everything
/// outside the three definite answers is `Undefined`, including failure
/// states.
pub(crate) fn problem_type_from(status: EngineStatus) -> ProblemType {
    match status {
        EngineStatus::Optimal => ProblemType::Optimal,
        EngineStatus::Unbounded => ProblemType::Unbounded,
        EngineStatus::Infeasible => ProblemType::Infeasible,
        _ => ProblemType::Undefined,
    }
}

/// Translate a raw engine basis code.
///
/// The engine folds the fixed case into its at-bound codes, so an at-bound
/// code with equal bounds reports `Fixed`. A code outside the translation
/// table means an engine/adapter version mismatch and is fatal.
#[allow(non_upper_case_globals)]
pub(crate) fn var_status_from(code: HighsInt, lower: f64, upper: f64) -> VarStatus {
    match code {
        kHighsBasisStatusBasic => VarStatus::Basic,
        kHighsBasisStatusLower | kHighsBasisStatusUpper if lower == upper => VarStatus::Fixed,
        kHighsBasisStatusLower => VarStatus::AtLower,
        kHighsBasisStatusUpper => VarStatus::AtUpper,
        kHighsBasisStatusZero => VarStatus::Free,
        other => panic!("unmapped engine basis status {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definite_answers_are_solved() {
        assert_eq!(outcome_from(EngineStatus::Optimal), SolveOutcome::Solved);
        assert_eq!(outcome_from(EngineStatus::Infeasible), SolveOutcome::Solved);
        assert_eq!(outcome_from(EngineStatus::Unbounded), SolveOutcome::Solved);
    }

    #[test]
    fn everything_else_is_failed() {
        assert_eq!(
            outcome_from(EngineStatus::UnboundedOrInfeasible),
            SolveOutcome::Failed
        );
        assert_eq!(
            outcome_from(EngineStatus::ReachedTimeLimit),
            SolveOutcome::Failed
        );
        assert_eq!(
            outcome_from(EngineStatus::ReachedIterationLimit),
            SolveOutcome::Failed
        );
        assert_eq!(outcome_from(EngineStatus::ModelEmpty), SolveOutcome::Failed);
        assert_eq!(outcome_from(EngineStatus::Unknown), SolveOutcome::Failed);
    }

    #[test]
    fn problem_type_mapping() {
        assert_eq!(problem_type_from(EngineStatus::Optimal), ProblemType::Optimal);
        assert_eq!(
            problem_type_from(EngineStatus::Unbounded),
            ProblemType::Unbounded
        );
        assert_eq!(
            problem_type_from(EngineStatus::Infeasible),
            ProblemType::Infeasible
        );
        assert_eq!(
            problem_type_from(EngineStatus::UnboundedOrInfeasible),
            ProblemType::Undefined
        );
        assert_eq!(
            problem_type_from(EngineStatus::Unknown),
            ProblemType::Undefined
        );
    }

    #[test]
    fn basis_code_translation() {
        assert_eq!(
            var_status_from(kHighsBasisStatusBasic, 0.0, 1.0),
            VarStatus::Basic
        );
        assert_eq!(
            var_status_from(kHighsBasisStatusLower, 0.0, 1.0),
            VarStatus::AtLower
        );
        assert_eq!(
            var_status_from(kHighsBasisStatusUpper, 0.0, 1.0),
            VarStatus::AtUpper
        );
        assert_eq!(
            var_status_from(kHighsBasisStatusZero, f64::NEG_INFINITY, f64::INFINITY),
            VarStatus::Free
        );
    }

    #[test]
    fn equal_bounds_report_fixed() {
        assert_eq!(
            var_status_from(kHighsBasisStatusLower, 4.0, 4.0),
            VarStatus::Fixed
        );
        assert_eq!(
            var_status_from(kHighsBasisStatusUpper, 4.0, 4.0),
            VarStatus::Fixed
        );
    }

    #[test]
    #[should_panic(expected = "unmapped engine basis status")]
    fn unknown_basis_code_is_fatal() {
        var_status_from(99, 0.0, 1.0);
    }
}
