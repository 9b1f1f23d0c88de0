//! Coefficient, bound, and objective access.

use crate::model::{check_lower_bound, check_upper_bound, LpModel};

impl LpModel {
    /// Replace every coefficient of `row` with the given
    /// `(column index, value)` pairs.
    ///
    /// Existing entries across all columns are zeroed first, so unlisted
    /// coefficients end up at zero. O(existing entries + pairs); callers
    /// needing sparse incremental edits should use [`LpModel::set_coeff`].
    pub fn set_row_coeffs(&mut self, row: usize, coeffs: &[(usize, f64)]) {
        self.rows[row].coeffs.clear();
        for &(col, value) in coeffs {
            self.set_coeff(row, col, value);
        }
    }

    /// Nonzero coefficients of `row` as `(column index, value)` pairs, in
    /// ascending column order.
    pub fn row_coeffs(&self, row: usize) -> Vec<(usize, f64)> {
        self.rows[row]
            .coeffs
            .iter()
            .map(|(&col, &value)| (col, value))
            .collect()
    }

    /// Replace every coefficient of `col` with the given
    /// `(row index, value)` pairs.
    ///
    /// Existing entries across all rows are zeroed first. O(rows + pairs).
    pub fn set_col_coeffs(&mut self, col: usize, coeffs: &[(usize, f64)]) {
        assert!(col < self.cols.len(), "column index {col} out of range");
        for row in &mut self.rows {
            row.coeffs.remove(&col);
        }
        for &(row, value) in coeffs {
            self.set_coeff(row, col, value);
        }
    }

    /// Nonzero coefficients of `col` as `(row index, value)` pairs, in
    /// ascending row order.
    pub fn col_coeffs(&self, col: usize) -> Vec<(usize, f64)> {
        assert!(col < self.cols.len(), "column index {col} out of range");
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(row, data)| data.coeffs.get(&col).map(|&value| (row, value)))
            .collect()
    }

    /// Set a single coefficient. A zero value removes the stored entry.
    pub fn set_coeff(&mut self, row: usize, col: usize, value: f64) {
        assert!(col < self.cols.len(), "column index {col} out of range");
        if value == 0.0 {
            self.rows[row].coeffs.remove(&col);
        } else {
            self.rows[row].coeffs.insert(col, value);
        }
    }

    /// Coefficient at `(row, col)`; zero if no entry is stored.
    pub fn coeff(&self, row: usize, col: usize) -> f64 {
        assert!(col < self.cols.len(), "column index {col} out of range");
        self.rows[row].coeffs.get(&col).copied().unwrap_or(0.0)
    }

    /// Set the lower bound of a column. Panics on `+inf` or NaN.
    pub fn set_col_lower(&mut self, col: usize, value: f64) {
        check_lower_bound(value);
        self.cols[col].lower = value;
    }

    /// Lower bound of a column.
    pub fn col_lower(&self, col: usize) -> f64 {
        self.cols[col].lower
    }

    /// Set the upper bound of a column. Panics on `-inf` or NaN.
    pub fn set_col_upper(&mut self, col: usize, value: f64) {
        check_upper_bound(value);
        self.cols[col].upper = value;
    }

    /// Upper bound of a column.
    pub fn col_upper(&self, col: usize) -> f64 {
        self.cols[col].upper
    }

    /// Set the lower bound of a row. Panics on `+inf` or NaN.
    pub fn set_row_lower(&mut self, row: usize, value: f64) {
        check_lower_bound(value);
        self.rows[row].lower = value;
    }

    /// Lower bound of a row.
    pub fn row_lower(&self, row: usize) -> f64 {
        self.rows[row].lower
    }

    /// Set the upper bound of a row. Panics on `-inf` or NaN.
    pub fn set_row_upper(&mut self, row: usize, value: f64) {
        check_upper_bound(value);
        self.rows[row].upper = value;
    }

    /// Upper bound of a row.
    pub fn row_upper(&self, row: usize) -> f64 {
        self.rows[row].upper
    }

    /// Replace the whole objective with the given `(column index, value)`
    /// pairs; every unlisted coefficient becomes zero.
    pub fn set_obj_coeffs(&mut self, coeffs: &[(usize, f64)]) {
        for col in &mut self.cols {
            col.objective = 0.0;
        }
        for &(col, value) in coeffs {
            self.set_obj_coeff(col, value);
        }
    }

    /// Nonzero objective coefficients as `(column index, value)` pairs, in
    /// ascending column order.
    pub fn obj_coeffs(&self) -> Vec<(usize, f64)> {
        self.cols
            .iter()
            .enumerate()
            .filter(|(_, col)| col.objective != 0.0)
            .map(|(index, col)| (index, col.objective))
            .collect()
    }

    /// Set one objective coefficient.
    pub fn set_obj_coeff(&mut self, col: usize, value: f64) {
        self.cols[col].objective = value;
    }

    /// Objective coefficient of a column.
    pub fn obj_coeff(&self, col: usize) -> f64 {
        self.cols[col].objective
    }
}
