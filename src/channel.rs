//! Channel transition matrices and their marginals.
//!
//! A [`TransitionMatrix`] is an `m × n` array of non-negative weights relating
//! input symbol `i` (row) to output symbol `j` (column). It is validated once
//! at construction and immutable afterwards.
//!
//! Rows are not required to sum to 1: the solver accepts unnormalised
//! weights and treats them exactly as given.

use alloc::vec::Vec;

use crate::error::CapacityError;
use crate::matrix::Matrix;

/// Validated, immutable channel transition matrix.
///
/// Serialises as its underlying [`Matrix`]; deserialisation re-runs validation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Matrix", into = "Matrix")
)]
pub struct TransitionMatrix {
    inner: Matrix,
}

/// Row and column sums of a [`TransitionMatrix`].
///
/// Diagnostic only; the capacity iteration never reads them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marginals {
    /// `marginal_x[j] = Σ_i P[i][j]`, length `n`.
    pub marginal_x: Vec<f64>,
    /// `marginal_y[i] = Σ_j P[i][j]`, length `m`.
    pub marginal_y: Vec<f64>,
}

impl TransitionMatrix {
    /// Build from a slice of rows.
    ///
    /// # Errors
    /// - [`CapacityError::EmptyMatrix`] if there are no rows or row 0 is empty.
    /// - [`CapacityError::RaggedRows`] if any row length differs from row 0.
    /// - [`CapacityError::InvalidEntry`] for a negative or non-finite entry.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, CapacityError> {
        let m = rows.len();
        let n = rows.first().map_or(0, |r| r.as_ref().len());
        if m == 0 || n == 0 {
            return Err(CapacityError::EmptyMatrix { rows: m, cols: n });
        }

        let mut data = Vec::with_capacity(m * n);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(CapacityError::RaggedRows { row: i, expected: n, found: row.len() });
            }
            for (j, &value) in row.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(CapacityError::InvalidEntry { row: i, col: j, value });
                }
            }
            data.extend_from_slice(row);
        }

        let len = data.len();
        let inner = Matrix::from_vec(m, n, data)
            .ok_or(CapacityError::ShapeMismatch { rows: m, cols: n, len })?;
        Ok(Self { inner })
    }

    /// Noiseless `n × n` channel: `P[i][j] = 1` iff `i == j`.
    ///
    /// # Errors
    /// [`CapacityError::EmptyMatrix`] if `n == 0`.
    pub fn noiseless(n: usize) -> Result<Self, CapacityError> {
        if n == 0 {
            return Err(CapacityError::EmptyMatrix { rows: 0, cols: 0 });
        }
        let mut inner = Matrix::zeros(n, n);
        for i in 0..n {
            inner.set(i, i, 1.0);
        }
        Ok(Self { inner })
    }

    /// Binary symmetric channel with crossover probability `p`.
    ///
    /// ```text
    /// [[1-p, p  ],
    ///  [p,   1-p]]
    /// ```
    pub fn binary_symmetric(p: f64) -> Result<Self, CapacityError> {
        check_probability(p)?;
        Self::from_rows(&[[1.0 - p, p], [p, 1.0 - p]])
    }

    /// Binary erasure channel with erasure probability `e`. Output columns
    /// are `0`, erasure, `1`.
    ///
    /// ```text
    /// [[1-e, e, 0  ],
    ///  [0,   e, 1-e]]
    /// ```
    pub fn binary_erasure(e: f64) -> Result<Self, CapacityError> {
        check_probability(e)?;
        Self::from_rows(&[[1.0 - e, e, 0.0], [0.0, e, 1.0 - e]])
    }

    /// Number of input symbols `m`.
    #[inline]
    pub fn rows(&self) -> usize {
        self.inner.rows()
    }

    /// Number of output symbols `n`.
    #[inline]
    pub fn cols(&self) -> usize {
        self.inner.cols()
    }

    /// `P[i][j]`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.inner.get(i, j)
    }

    /// Row `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        self.inner.row(i)
    }

    /// Underlying dense matrix.
    pub fn as_matrix(&self) -> &Matrix {
        &self.inner
    }

    /// Compute row and column sums.
    pub fn marginals(&self) -> Marginals {
        Marginals {
            marginal_x: self.inner.column_sums(),
            marginal_y: self.inner.row_sums(),
        }
    }
}

impl TryFrom<Matrix> for TransitionMatrix {
    type Error = CapacityError;

    /// Validate an arbitrary dense matrix as a channel.
    fn try_from(m: Matrix) -> Result<Self, Self::Error> {
        if m.rows() == 0 || m.cols() == 0 {
            return Err(CapacityError::EmptyMatrix { rows: m.rows(), cols: m.cols() });
        }
        let len = m.as_slice().len();
        if m.rows().checked_mul(m.cols()) != Some(len) {
            return Err(CapacityError::ShapeMismatch { rows: m.rows(), cols: m.cols(), len });
        }
        for (k, &value) in m.as_slice().iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(CapacityError::InvalidEntry { row: k / m.cols(), col: k % m.cols(), value });
            }
        }
        Ok(Self { inner: m })
    }
}

impl From<TransitionMatrix> for Matrix {
    fn from(t: TransitionMatrix) -> Self {
        t.inner
    }
}

fn check_probability(p: f64) -> Result<(), CapacityError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(CapacityError::InvalidProbability { value: p })
    }
}
