//! Dense GF(2) matrices.
//!
//! Rows are stored as `u32` bitmasks, so a matrix may have at most 32
//! columns; the row count is unbounded. This covers both uses in the
//! engine: square linear-reversible transforms (rows = columns = qubits)
//! and parity tables (one row per parity term, one column per qubit).

use std::fmt;

/// A dense matrix over GF(2) with at most 32 columns.
///
/// The matrix is the live scratch space for Gaussian elimination: every
/// [`row_xor`](BitMatrix::row_xor) applied during synthesis corresponds
/// 1:1 to a recorded `(control, target)` candidate gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    rows: Vec<u32>,
    num_cols: usize,
}

impl BitMatrix {
    /// Create a zero matrix.
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        assert!(num_cols <= 32, "BitMatrix supports at most 32 columns");
        Self {
            rows: vec![0; num_rows],
            num_cols,
        }
    }

    /// Create an `n × n` identity matrix.
    pub fn identity(n: usize) -> Self {
        assert!(n <= 32, "BitMatrix supports at most 32 columns");
        Self {
            rows: (0..n).map(|i| 1u32 << i).collect(),
            num_cols: n,
        }
    }

    /// Create a matrix from row bitmasks (bit `j` of a mask is column `j`).
    pub fn from_rows(rows: Vec<u32>, num_cols: usize) -> Self {
        assert!(num_cols <= 32, "BitMatrix supports at most 32 columns");
        assert!(
            num_cols == 32 || rows.iter().all(|row| row >> num_cols == 0),
            "row bitmask exceeds column count"
        );
        Self { rows, num_cols }
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Check whether the matrix is square.
    pub fn is_square(&self) -> bool {
        self.rows.len() == self.num_cols
    }

    /// Read the element at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(col < self.num_cols, "column index out of range");
        (self.rows[row] >> col) & 1 == 1
    }

    /// Write the element at `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        assert!(col < self.num_cols, "column index out of range");
        if value {
            self.rows[row] |= 1 << col;
        } else {
            self.rows[row] &= !(1 << col);
        }
    }

    /// The row bitmask at `row`.
    #[inline]
    pub fn row(&self, row: usize) -> u32 {
        self.rows[row]
    }

    /// Destructive row XOR: `row[target] ^= row[source]`.
    #[inline]
    pub fn row_xor(&mut self, target: usize, source: usize) {
        debug_assert!(target != source);
        self.rows[target] ^= self.rows[source];
    }

    /// The column bitmask at `col` (bit `i` is row `i`; requires ≤ 32 rows).
    pub fn column(&self, col: usize) -> u32 {
        assert!(self.rows.len() <= 32, "column view requires at most 32 rows");
        self.rows
            .iter()
            .enumerate()
            .fold(0, |acc, (i, row)| acc | (((row >> col) & 1) << i))
    }

    /// Transpose the matrix in place (requires ≤ 32 rows).
    pub fn transpose(&mut self) {
        assert!(self.rows.len() <= 32, "transpose requires at most 32 rows");
        let transposed: Vec<u32> = (0..self.num_cols).map(|col| self.column(col)).collect();
        self.num_cols = self.rows.len();
        self.rows = transposed;
    }
}

impl fmt::Display for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for col in 0..self.num_cols {
                write!(f, "{}", (row >> col) & 1)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
