//! Error taxonomy for capacity computation.
//!
//! Two classes of failure exist:
//!
//! - **Invalid argument** — raised synchronously while building a
//!   [`TransitionMatrix`](crate::channel::TransitionMatrix) or a
//!   [`SolverConfig`](crate::solver::SolverConfig). Fatal; the caller must
//!   supply different input.
//! - **Numerical degeneracy** — a zero column sum or zero row-product total
//!   turns the distribution into `NaN`/`Inf`. The default solve path lets this
//!   propagate into the result. Only [`BlahutArimoto::try_solve`] reports it.
//!
//! [`BlahutArimoto::try_solve`]: crate::solver::BlahutArimoto::try_solve

/// Errors produced by this crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CapacityError {
    /// The matrix has no rows or no columns.
    #[error("matrix size cannot be 0 (got {rows}x{cols})")]
    EmptyMatrix {
        /// Number of rows supplied.
        rows: usize,
        /// Number of columns in the first row (0 when there are no rows).
        cols: usize,
    },

    /// A row's length differs from the first row's.
    #[error("row {row} has {found} entries, expected {expected}")]
    RaggedRows {
        /// Offending row index.
        row: usize,
        /// Length of row 0.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },

    /// `rows * cols` overflows or disagrees with the number of entries.
    #[error("shape {rows}x{cols} does not match {len} entries")]
    ShapeMismatch {
        /// Declared rows.
        rows: usize,
        /// Declared columns.
        cols: usize,
        /// Entries actually present.
        len: usize,
    },

    /// An entry is negative, NaN or infinite.
    #[error("entry ({row}, {col}) = {value} is not a finite non-negative weight")]
    InvalidEntry {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// The rejected value.
        value: f64,
    },

    /// A channel parameter meant to be a probability lies outside `[0, 1]`.
    #[error("probability {value} is outside [0, 1]")]
    InvalidProbability {
        /// The rejected value.
        value: f64,
    },

    /// Solver configuration cannot drive an iteration.
    #[error("invalid solver config: max_iterations = {max_iterations}, threshold = {threshold}")]
    InvalidConfig {
        /// Configured iteration cap.
        max_iterations: u32,
        /// Configured convergence threshold.
        threshold: f64,
    },

    /// The iteration produced a non-finite distribution or capacity.
    #[error("numerical degeneracy at iteration {iteration}")]
    NumericalDegeneracy {
        /// 1-based iteration at which the first non-finite value appeared.
        /// Equal to the executed iteration count when only the final
        /// capacity is non-finite.
        iteration: u32,
    },
}

impl CapacityError {
    /// `true` for the variants raised at construction time.
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(self, Self::NumericalDegeneracy { .. })
    }
}
