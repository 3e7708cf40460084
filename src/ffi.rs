//! Python FFI bindings via PyO3.
//!
//! Exposes the capacity solver to Python. Matrices cross the boundary as
//! lists of lists of floats.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from dmc_capacity import ChannelCapacity
//!
//! cc = ChannelCapacity([[0.9, 0.1], [0.1, 0.9]])
//! print(cc.compute_capacity())          # 0.531...
//! bits, r, iterations, converged, residuals, degenerate_at = cc.solve()
//!
//! # raises ValueError instead of returning NaN for a degenerate channel
//! bits, r, iterations, converged, residuals, _ = cc.try_solve()
//! marginal_x, marginal_y = cc.marginals()
//!
//! # more iterations, tighter threshold
//! cc = ChannelCapacity(matrix, max_iterations=500, threshold=1e-14)
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::channel::TransitionMatrix;
use crate::error::CapacityError;
use crate::solver::{
    BlahutArimoto, CapacityReport, SolverConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_THRESHOLD,
};

/// `(capacity_bits, distribution, iterations, converged, residuals, degenerate_at)`.
type ReportTuple = (f64, Vec<f64>, u32, bool, Vec<f64>, Option<u32>);

fn to_py_err(e: CapacityError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn report_tuple(report: CapacityReport) -> ReportTuple {
    (
        report.capacity_bits,
        report.input_distribution,
        report.iterations,
        report.converged,
        report.residuals,
        report.degenerate_at,
    )
}

/// Blahut-Arimoto channel capacity solver.
///
/// Args:
///     matrix:         list of rows of non-negative floats; at least 1×1
///     max_iterations: iteration cap (default 10)
///     threshold:      convergence threshold on the distribution change (default 1e-12)
///
/// Raises:
///     ValueError: empty or ragged matrix, negative/non-finite entry, invalid config
#[pyclass(name = "ChannelCapacity")]
pub struct PyChannelCapacity {
    inner: BlahutArimoto,
}

#[pymethods]
impl PyChannelCapacity {
    /// Build a solver over `matrix`.
    #[new]
    #[pyo3(signature = (matrix, max_iterations=DEFAULT_MAX_ITERATIONS, threshold=DEFAULT_THRESHOLD))]
    pub fn new(matrix: Vec<Vec<f64>>, max_iterations: u32, threshold: f64) -> PyResult<Self> {
        let channel = TransitionMatrix::from_rows(&matrix).map_err(to_py_err)?;
        let inner = BlahutArimoto::with_config(channel, SolverConfig::new(max_iterations, threshold))
            .map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Estimated capacity in bits.
    pub fn compute_capacity(&self) -> f64 {
        self.inner.compute_capacity()
    }

    /// Run the solver and return
    /// `(capacity_bits, distribution, iterations, converged, residuals, degenerate_at)`.
    ///
    /// A degenerate channel yields NaN values and a non-`None` `degenerate_at`.
    pub fn solve(&self) -> ReportTuple {
        report_tuple(self.inner.solve())
    }

    /// Like `solve`, but raises `ValueError` if the distribution or the
    /// capacity goes non-finite.
    pub fn try_solve(&self) -> PyResult<ReportTuple> {
        self.inner.try_solve().map(report_tuple).map_err(to_py_err)
    }

    /// Column sums and row sums of the matrix: `(marginal_x, marginal_y)`.
    pub fn marginals(&self) -> (Vec<f64>, Vec<f64>) {
        let mg = self.inner.marginals();
        (mg.marginal_x.clone(), mg.marginal_y.clone())
    }

    /// Number of input symbols (rows).
    #[getter]
    pub fn rows(&self) -> usize {
        self.inner.channel().rows()
    }

    /// Number of output symbols (columns).
    #[getter]
    pub fn cols(&self) -> usize {
        self.inner.channel().cols()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        let cfg = self.inner.config();
        format!(
            "ChannelCapacity({}x{}, max_iterations={}, threshold={:e})",
            self.rows(),
            self.cols(),
            cfg.max_iterations,
            cfg.threshold,
        )
    }
}

// ── Module entry point ────────────────────────────────────────────────────────

/// Discrete memoryless channel capacity via Blahut-Arimoto.
#[pymodule]
pub fn dmc_capacity(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyChannelCapacity>()?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("DEFAULT_MAX_ITERATIONS", DEFAULT_MAX_ITERATIONS)?;
    m.add("DEFAULT_THRESHOLD", DEFAULT_THRESHOLD)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_tuple_keeps_every_field() {
        let solver = BlahutArimoto::new(&[[1.0, 0.0], [0.5, 0.5]]).unwrap();
        let report = solver.solve();
        let (bits, r, iterations, converged, residuals, degenerate_at) = report_tuple(report.clone());
        assert_eq!(bits, report.capacity_bits);
        assert_eq!(r, report.input_distribution);
        assert_eq!(iterations, report.iterations);
        assert_eq!(converged, report.converged);
        assert_eq!(residuals.len(), iterations as usize);
        assert_eq!(degenerate_at, None);
    }
}
