//! Incremental LP model storage.
//!
//! The model keeps columns and rows in dense 0-based index spaces that
//! mirror an engine's internal arrays. Erasing an element compacts its
//! index space by moving the last element into the freed slot
//! (swap-with-last), never by shifting; callers holding stable external
//! identifiers are expected to remap the formerly-last element.
//!
//! # Module organization
//!
//! - [`builder`]: adding and erasing columns and rows
//! - [`storage`]: coefficient, bound, and objective access
//! - [`names`]: the bidirectional name tables
//!
//! Bounds use `f64::INFINITY` / `f64::NEG_INFINITY` as the unbounded
//! sentinels. A lower bound of `+inf` or an upper bound of `-inf` can never
//! describe a meaningful interval, so the setters treat that (and NaN) as a
//! caller bug and panic rather than returning an error.

mod builder;
mod names;
mod storage;

use std::collections::BTreeMap;

use tracing::debug;

pub use names::NameIndex;

/// One column: bounds plus its objective coefficient.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Column {
    pub(crate) lower: f64,
    pub(crate) upper: f64,
    pub(crate) objective: f64,
}

impl Column {
    fn unbounded() -> Self {
        Column {
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
            objective: 0.0,
        }
    }
}

/// One row: bounds plus its sparse coefficient map, keyed by column index.
///
/// Zero coefficients are never stored; an absent key reads as zero.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Row {
    pub(crate) lower: f64,
    pub(crate) upper: f64,
    pub(crate) coeffs: BTreeMap<usize, f64>,
}

impl Row {
    fn new(lower: f64, upper: f64) -> Self {
        Row {
            lower,
            upper,
            coeffs: BTreeMap::new(),
        }
    }
}

/// An incrementally editable LP model.
///
/// Columns and rows are addressed by dense index; indices are reassigned on
/// every erase (see the module docs). The model carries one [`NameIndex`]
/// per dimension for optional human-readable identification.
#[derive(Debug, Clone, Default)]
pub struct LpModel {
    pub(crate) cols: Vec<Column>,
    pub(crate) rows: Vec<Row>,
    pub(crate) col_names: NameIndex,
    pub(crate) row_names: NameIndex,
}

impl LpModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of columns.
    pub fn num_cols(&self) -> usize {
        self.cols.len()
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of stored (nonzero) coefficients.
    pub fn num_coeffs(&self) -> usize {
        self.rows.iter().map(|row| row.coeffs.len()).sum()
    }

    /// Remove every column, row, coefficient, and name.
    ///
    /// Calling this on an already-empty model is a no-op.
    pub fn clear(&mut self) {
        self.cols.clear();
        self.rows.clear();
        self.col_names.clear();
        self.row_names.clear();
        debug!(
            component = "model",
            operation = "clear",
            status = "success",
            "Cleared model"
        );
    }
}

pub(crate) fn check_lower_bound(value: f64) {
    assert!(
        value != f64::INFINITY && !value.is_nan(),
        "invalid lower bound {value}: must be finite or -inf"
    );
}

pub(crate) fn check_upper_bound(value: f64) {
    assert!(
        value != f64::NEG_INFINITY && !value.is_nan(),
        "invalid upper bound {value}: must be finite or +inf"
    );
}
