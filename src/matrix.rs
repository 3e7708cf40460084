//! Dense row-major `f64` matrix and the element-wise operations used by the
//! Blahut-Arimoto iteration.
//!
//! Every operation here is a pure function: it either borrows its inputs and
//! returns a fresh [`Matrix`], or consumes an exclusively-owned buffer and
//! hands it back transformed. No buffer is ever shared between the stored
//! transition matrix and the iteration's scratch space.
//!
//! # Degenerate inputs
//!
//! [`column_normalize`] divides by the raw column sum. A column summing to
//! exactly `0.0` produces `NaN` entries; callers that care use
//! [`BlahutArimoto::try_solve`](crate::solver::BlahutArimoto::try_solve).

use alloc::vec;
use alloc::vec::Vec;

/// Dense `rows × cols` matrix stored row-major.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawMatrix")
)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

/// Unchecked wire form; shape is verified on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMatrix> for Matrix {
    type Error = &'static str;

    fn try_from(raw: RawMatrix) -> Result<Self, Self::Error> {
        Matrix::from_vec(raw.rows, raw.cols, raw.data).ok_or("data length does not match rows * cols")
    }
}

impl Matrix {
    /// All-zero matrix.
    ///
    /// # Panics
    /// If `rows * cols` overflows `usize`.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        let len = rows.checked_mul(cols).expect("matrix size overflows usize");
        Self { rows, cols, data: vec![0.0; len] }
    }

    /// Build from a row-major buffer. Returns `None` if `rows * cols`
    /// overflows or does not match the buffer length.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Option<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return None;
        }
        Some(Self { rows, cols, data })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Entry at `(i, j)`.
    ///
    /// # Panics
    /// If `i >= rows` or `j >= cols`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of bounds");
        self.data[i * self.cols + j]
    }

    /// Overwrite the entry at `(i, j)`.
    ///
    /// # Panics
    /// If `i >= rows` or `j >= cols`.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of bounds");
        self.data[i * self.cols + j] = value;
    }

    /// Row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterate over rows.
    ///
    /// A `rows × 0` matrix yields `rows` empty slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.rows).map(move |i| self.row(i))
    }

    /// Row-major backing buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// `Σ_i M[i][j]` for every column `j`.
    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.cols];
        for row in self.iter_rows() {
            for (s, &x) in sums.iter_mut().zip(row) {
                *s += x;
            }
        }
        sums
    }

    /// `Σ_j M[i][j]` for every row `i`.
    pub fn row_sums(&self) -> Vec<f64> {
        self.iter_rows().map(|row| row.iter().sum()).collect()
    }
}

/// `result[i][j] = weights[i] * p[i][j]`.
///
/// # Panics
/// If `weights.len() != p.rows()`.
pub fn row_weighted_multiply(weights: &[f64], p: &Matrix) -> Matrix {
    assert_eq!(weights.len(), p.rows(), "one weight per row required");
    let mut data = Vec::with_capacity(p.rows() * p.cols());
    for (&w, row) in weights.iter().zip(p.iter_rows()) {
        data.extend(row.iter().map(|&x| w * x));
    }
    Matrix { rows: p.rows(), cols: p.cols(), data }
}

/// Scale every column to sum to 1.
///
/// The sum is taken as-is; a zero column yields `NaN` (0/0) and is not
/// special-cased.
pub fn column_normalize(mut m: Matrix) -> Matrix {
    let sums = m.column_sums();
    let cols = m.cols;
    for (k, x) in m.data.iter_mut().enumerate() {
        *x /= sums[k % cols];
    }
    m
}

/// `result[i][j] = base[i][j] ^ exponent[i][j]`, with `0^0 = 1`.
///
/// # Panics
/// If the shapes differ.
pub fn elementwise_power(base: &Matrix, exponent: &Matrix) -> Matrix {
    assert!(
        base.rows == exponent.rows && base.cols == exponent.cols,
        "shape mismatch: {}x{} vs {}x{}",
        base.rows,
        base.cols,
        exponent.rows,
        exponent.cols
    );
    let data = base
        .data
        .iter()
        .zip(&exponent.data)
        .map(|(&b, &e)| libm::pow(b, e))
        .collect();
    Matrix { rows: base.rows, cols: base.cols, data }
}

/// `Π_j M[i][j]` for every row. An empty row yields 1.
pub fn row_products(m: &Matrix) -> Vec<f64> {
    m.iter_rows().map(|row| row.iter().product()).collect()
}

/// Divide every entry by the total so the vector sums to 1.
pub fn normalize_sum(mut v: Vec<f64>) -> Vec<f64> {
    let total: f64 = v.iter().sum();
    for x in v.iter_mut() {
        *x /= total;
    }
    v
}

/// Euclidean norm of `a - b` (the Frobenius norm of the difference taken as
/// a column vector).
///
/// # Panics
/// If the lengths differ.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len(), "length mismatch");
    let sq: f64 = a.iter().zip(b).map(|(&x, &y)| (x - y) * (x - y)).sum();
    libm::sqrt(sq)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: usize, cols: usize, data: &[f64]) -> Matrix {
        Matrix::from_vec(rows, cols, data.to_vec()).unwrap()
    }

    #[test]
    fn from_vec_rejects_wrong_length() {
        assert!(Matrix::from_vec(2, 2, vec![1.0; 3]).is_none());
        assert!(Matrix::from_vec(2, 3, vec![1.0; 6]).is_some());
    }

    #[test]
    fn from_vec_rejects_overflowing_shape() {
        assert!(Matrix::from_vec(usize::MAX, 2, Vec::new()).is_none());
        assert!(Matrix::from_vec(usize::MAX / 2 + 1, 2, Vec::new()).is_none());
    }

    #[test]
    fn zero_column_matrix_still_has_rows() {
        let e = Matrix::zeros(3, 0);
        assert_eq!(e.iter_rows().count(), 3);
        assert_eq!(e.row_sums(), vec![0.0; 3]);
        assert!(e.column_sums().is_empty());
    }

    #[test]
    fn sums_follow_row_major_layout() {
        let a = m(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(a.row_sums(), vec![6.0, 15.0]);
        assert_eq!(a.column_sums(), vec![5.0, 7.0, 9.0]);
        assert_eq!(a.row(1), &[4.0, 5.0, 6.0]);
        assert_eq!(a.get(0, 2), 3.0);
    }

    #[test]
    fn row_weighted_multiply_scales_each_row() {
        let p = m(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let q = row_weighted_multiply(&[0.5, 2.0], &p);
        assert_eq!(q.as_slice(), &[0.5, 1.0, 6.0, 8.0]);
    }

    #[test]
    fn column_normalize_makes_columns_stochastic() {
        let q = column_normalize(m(3, 2, &[1.0, 0.0, 1.0, 3.0, 2.0, 1.0]));
        for s in q.column_sums() {
            assert!((s - 1.0).abs() < 1e-15, "column sum = {s}");
        }
        assert!((q.get(2, 0) - 0.5).abs() < 1e-15);
        assert!((q.get(1, 1) - 0.75).abs() < 1e-15);
    }

    #[test]
    fn column_normalize_zero_column_is_nan() {
        let q = column_normalize(m(2, 2, &[1.0, 0.0, 1.0, 0.0]));
        assert!(q.get(0, 1).is_nan());
        assert!(q.get(1, 1).is_nan());
        assert_eq!(q.get(0, 0), 0.5);
    }

    #[test]
    fn elementwise_power_zero_to_zero_is_one() {
        let base = m(1, 3, &[0.0, 0.5, 0.0]);
        let exp = m(1, 3, &[0.0, 2.0, 1.0]);
        let w = elementwise_power(&base, &exp);
        assert_eq!(w.as_slice(), &[1.0, 0.25, 0.0]);
    }

    #[test]
    fn row_products_of_empty_rows_are_one() {
        let e = Matrix::zeros(3, 0);
        assert_eq!(row_products(&e), vec![1.0; 3]);
        let a = m(2, 2, &[2.0, 3.0, 0.5, 4.0]);
        assert_eq!(row_products(&a), vec![6.0, 2.0]);
    }

    #[test]
    fn normalize_sum_and_distance() {
        let v = normalize_sum(vec![1.0, 3.0]);
        assert_eq!(v, vec![0.25, 0.75]);
        let d = euclidean_distance(&[0.0, 3.0], &[4.0, 0.0]);
        assert!((d - 5.0).abs() < 1e-15);
    }
}
