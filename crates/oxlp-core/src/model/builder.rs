//! Adding and erasing columns and rows.

use tracing::trace;

use crate::model::{check_lower_bound, check_upper_bound, Column, LpModel, Row};

impl LpModel {
    /// Append a column with default bounds `(-inf, +inf)`, no objective
    /// coefficient, and no constraint entries.
    ///
    /// Returns the new dense index, which equals the previous column count.
    pub fn add_col(&mut self) -> usize {
        self.cols.push(Column::unbounded());
        self.col_names.push_unnamed();
        let col = self.cols.len() - 1;
        trace!(
            component = "model",
            operation = "add_col",
            status = "success",
            col,
            "Added column"
        );
        col
    }

    /// Append a row with default bounds `(-inf, +inf)` and no coefficients.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(Row::new(f64::NEG_INFINITY, f64::INFINITY));
        self.row_names.push_unnamed();
        let row = self.rows.len() - 1;
        trace!(
            component = "model",
            operation = "add_row",
            status = "success",
            row,
            "Added row"
        );
        row
    }

    /// Append a row with the given bounds and `(column index, value)`
    /// coefficient pairs. Unlisted coefficients are zero.
    ///
    /// The bounds may describe an empty interval (`lower > upper`); that is
    /// a legal, infeasible row. A lower bound of `+inf` or an upper bound
    /// of `-inf` panics.
    pub fn add_row_with(&mut self, lower: f64, coeffs: &[(usize, f64)], upper: f64) -> usize {
        check_lower_bound(lower);
        check_upper_bound(upper);
        let row = self.add_row();
        self.rows[row].lower = lower;
        self.rows[row].upper = upper;
        for &(col, value) in coeffs {
            self.set_coeff(row, col, value);
        }
        row
    }

    /// Remove the column at `col`, moving the last column into its slot.
    pub fn erase_col(&mut self, col: usize) {
        assert!(col < self.cols.len(), "column index {col} out of range");
        let last = self.cols.len() - 1;
        self.cols.swap_remove(col);
        for row in &mut self.rows {
            let moved = row.coeffs.remove(&last);
            row.coeffs.remove(&col);
            if col != last {
                if let Some(value) = moved {
                    row.coeffs.insert(col, value);
                }
            }
        }
        self.col_names.remove_swap_last(col);
        trace!(
            component = "model",
            operation = "erase_col",
            status = "success",
            col,
            moved_from = last,
            "Erased column"
        );
    }

    /// Remove the row at `row`, moving the last row into its slot.
    pub fn erase_row(&mut self, row: usize) {
        assert!(row < self.rows.len(), "row index {row} out of range");
        let last = self.rows.len() - 1;
        self.rows.swap_remove(row);
        self.row_names.remove_swap_last(row);
        trace!(
            component = "model",
            operation = "erase_row",
            status = "success",
            row,
            moved_from = last,
            "Erased row"
        );
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn add_col_returns_dense_indices() {
        let mut model = LpModel::new();
        assert_eq!(model.add_col(), 0);
        assert_eq!(model.add_col(), 1);
        assert_eq!(model.add_col(), 2);
        assert_eq!(model.num_cols(), 3);
    }

    #[test]
    fn add_row_with_sets_bounds_and_coeffs() {
        let mut model = LpModel::new();
        let x = model.add_col();
        let y = model.add_col();
        let row = model.add_row_with(1.0, &[(x, 2.0), (y, -3.0)], 4.0);
        assert_eq!(model.row_lower(row), 1.0);
        assert_eq!(model.row_upper(row), 4.0);
        assert_eq!(model.coeff(row, x), 2.0);
        assert_eq!(model.coeff(row, y), -3.0);
    }

    #[test]
    fn add_row_with_accepts_empty_interval() {
        let mut model = LpModel::new();
        let x = model.add_col();
        let row = model.add_row_with(1.0, &[(x, 1.0)], -1.0);
        assert_eq!(model.row_lower(row), 1.0);
        assert_eq!(model.row_upper(row), -1.0);
    }

    #[test]
    #[should_panic(expected = "invalid lower bound")]
    fn add_row_with_rejects_plus_inf_lower() {
        let mut model = LpModel::new();
        model.add_row_with(f64::INFINITY, &[], 0.0);
    }

    #[test]
    fn erase_col_moves_last_into_slot() {
        let mut model = LpModel::new();
        let a = model.add_col();
        let b = model.add_col();
        let c = model.add_col();
        model.set_col_name(a, "a");
        model.set_col_name(b, "b");
        model.set_col_name(c, "c");
        model.set_col_lower(c, 7.0);
        let row = model.add_row();
        model.set_coeff(row, a, 1.0);
        model.set_coeff(row, b, 2.0);
        model.set_coeff(row, c, 3.0);

        model.erase_col(a);

        assert_eq!(model.num_cols(), 2);
        // c moved into slot 0; b untouched at slot 1
        assert_eq!(model.col_name(0), "c");
        assert_eq!(model.col_by_name("c"), Some(0));
        assert_eq!(model.col_by_name("a"), None);
        assert_eq!(model.col_lower(0), 7.0);
        assert_eq!(model.coeff(row, 0), 3.0);
        assert_eq!(model.coeff(row, 1), 2.0);
    }

    #[test]
    fn erase_last_col_shrinks_without_moving() {
        let mut model = LpModel::new();
        let a = model.add_col();
        let b = model.add_col();
        model.set_col_name(a, "a");
        model.set_col_name(b, "b");
        let row = model.add_row();
        model.set_coeff(row, a, 1.0);
        model.set_coeff(row, b, 2.0);

        model.erase_col(b);

        assert_eq!(model.num_cols(), 1);
        assert_eq!(model.col_name(0), "a");
        assert_eq!(model.coeff(row, 0), 1.0);
        assert_eq!(model.row_coeffs(row), vec![(0, 1.0)]);
    }

    #[test]
    fn lifo_erase_restores_prior_state() {
        let mut model = LpModel::new();
        let x = model.add_col();
        model.set_col_name(x, "x");
        model.set_col_lower(x, 0.0);
        model.set_col_upper(x, 5.0);
        let row = model.add_row_with(0.0, &[(x, 2.5)], 10.0);

        let extra_a = model.add_col();
        let extra_b = model.add_col();
        model.set_coeff(row, extra_a, 9.0);
        model.erase_col(extra_b);
        model.erase_col(extra_a);

        assert_eq!(model.num_cols(), 1);
        assert_eq!(model.col_name(x), "x");
        assert_eq!(model.col_by_name("x"), Some(x));
        assert_eq!(model.col_lower(x), 0.0);
        assert_eq!(model.col_upper(x), 5.0);
        assert_eq!(model.row_coeffs(row), vec![(x, 2.5)]);
    }

    #[test]
    fn erase_row_moves_last_into_slot() {
        let mut model = LpModel::new();
        let x = model.add_col();
        let r0 = model.add_row_with(0.0, &[(x, 1.0)], 1.0);
        let _r1 = model.add_row_with(0.0, &[(x, 2.0)], 2.0);
        let r2 = model.add_row_with(0.0, &[(x, 3.0)], 3.0);
        model.set_row_name(r0, "first");
        model.set_row_name(r2, "last");

        model.erase_row(r0);

        assert_eq!(model.num_rows(), 2);
        assert_eq!(model.row_name(0), "last");
        assert_eq!(model.row_by_name("last"), Some(0));
        assert_eq!(model.row_by_name("first"), None);
        assert_eq!(model.coeff(0, x), 3.0);
        assert_eq!(model.coeff(1, x), 2.0);
    }
}
