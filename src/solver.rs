//! Blahut-Arimoto fixed-point iteration for discrete memoryless channel capacity.
//!
//! Alternates between two updates until the input distribution stops moving
//! or the iteration budget runs out:
//!
//! ```text
//! q[i][j] ∝ r[i] · P[i][j]                   (column-normalised posterior)
//! r'[i]   ∝ Π_j q[i][j] ^ P[i][j]            (sum-normalised input update)
//! ```
//!
//! Each iteration computes `‖r' − r‖₂`, commits `r := r'` unconditionally and
//! only then stops if the norm fell below the threshold. The last posterior
//! and the committed `r` feed [`mutual_information_nats`], reported in bits.
//!
//! # State
//!
//! The solver holds only the immutable channel, its marginals and the
//! config. `r`, `q` and the scratch buffers live inside [`BlahutArimoto::solve`],
//! so repeated calls on one instance return identical results.
//!
//! # Degenerate channels
//!
//! A column of zeros or a row-product total of zero turns the distribution
//! into `NaN`/`Inf`. [`BlahutArimoto::solve`] and
//! [`BlahutArimoto::compute_capacity`] let that propagate;
//! [`BlahutArimoto::try_solve`] turns it into
//! [`CapacityError::NumericalDegeneracy`].

use alloc::vec;
use alloc::vec::Vec;

use tracing::{debug, trace, warn};

use crate::channel::{Marginals, TransitionMatrix};
use crate::error::CapacityError;
use crate::info::{mutual_information_nats, nats_to_bits};
use crate::matrix::{
    column_normalize, elementwise_power, euclidean_distance, normalize_sum, row_products,
    row_weighted_multiply,
};

/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: u32 = 10;

/// Default convergence threshold on `‖r' − r‖₂`.
pub const DEFAULT_THRESHOLD: f64 = 1e-12;

/// Iteration budget and stopping tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Maximum number of fixed-point iterations (default: 10). Must be ≥ 1.
    pub max_iterations: u32,
    /// Stop once the successive-difference norm is below this (default: 1e-12).
    /// Must be finite and positive.
    pub threshold: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { max_iterations: DEFAULT_MAX_ITERATIONS, threshold: DEFAULT_THRESHOLD }
    }
}

impl SolverConfig {
    /// Create a config with the given iteration cap and threshold.
    pub fn new(max_iterations: u32, threshold: f64) -> Self {
        Self { max_iterations, threshold }
    }

    /// Check that the config can drive an iteration.
    ///
    /// # Errors
    /// [`CapacityError::InvalidConfig`] if `max_iterations == 0` or the
    /// threshold is not a finite positive number.
    pub fn validate(&self) -> Result<(), CapacityError> {
        if self.max_iterations == 0 || !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(CapacityError::InvalidConfig {
                max_iterations: self.max_iterations,
                threshold: self.threshold,
            });
        }
        Ok(())
    }
}

/// Outcome of one capacity computation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CapacityReport {
    /// Estimated capacity in bits.
    pub capacity_bits: f64,
    /// Final input distribution `r` (length `m`).
    pub input_distribution: Vec<f64>,
    /// Number of iterations executed.
    pub iterations: u32,
    /// Whether the threshold was met before the cap.
    pub converged: bool,
    /// `‖r' − r‖₂` for each executed iteration, in order.
    pub residuals: Vec<f64>,
    /// First iteration (1-based) whose updated distribution held a
    /// non-finite entry, if any.
    pub degenerate_at: Option<u32>,
}

impl CapacityReport {
    /// `true` if the residual sequence never increased.
    ///
    /// Expected for well-conditioned channels but not guaranteed; a `false`
    /// here is worth a look, not an error.
    pub fn is_monotone(&self) -> bool {
        self.residuals.windows(2).all(|w| w[1] <= w[0])
    }
}

/// Channel capacity solver.
///
/// ```
/// use dmc_capacity::solver::BlahutArimoto;
///
/// let solver = BlahutArimoto::new(&[[0.9, 0.1], [0.1, 0.9]]).unwrap();
/// let bits = solver.compute_capacity();
/// assert!((bits - 0.531_004_406_410_719).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct BlahutArimoto {
    channel: TransitionMatrix,
    marginals: Marginals,
    config: SolverConfig,
}

impl BlahutArimoto {
    /// Build a solver over `rows` with the default config.
    ///
    /// # Errors
    /// Any invalid-argument variant of [`CapacityError`] from
    /// [`TransitionMatrix::from_rows`].
    pub fn new<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, CapacityError> {
        Ok(Self::from_channel(TransitionMatrix::from_rows(rows)?))
    }

    /// Build a solver over an already-validated channel with the default config.
    pub fn from_channel(channel: TransitionMatrix) -> Self {
        let marginals = channel.marginals();
        Self { channel, marginals, config: SolverConfig::default() }
    }

    /// Build a solver with an explicit config.
    ///
    /// # Errors
    /// [`CapacityError::InvalidConfig`] if the config fails
    /// [`SolverConfig::validate`].
    pub fn with_config(channel: TransitionMatrix, config: SolverConfig) -> Result<Self, CapacityError> {
        config.validate()?;
        let marginals = channel.marginals();
        Ok(Self { channel, marginals, config })
    }

    /// The channel this solver runs over.
    pub fn channel(&self) -> &TransitionMatrix {
        &self.channel
    }

    /// Row and column sums computed at construction.
    pub fn marginals(&self) -> &Marginals {
        &self.marginals
    }

    /// Active config.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Estimated channel capacity in bits.
    pub fn compute_capacity(&self) -> f64 {
        self.solve().capacity_bits
    }

    /// Run the iteration and return the full report.
    ///
    /// Never fails; numerical degeneracy shows up as non-finite values and
    /// in [`CapacityReport::degenerate_at`].
    pub fn solve(&self) -> CapacityReport {
        let p = self.channel.as_matrix();
        let m = p.rows();
        let max_iterations = self.config.max_iterations;
        debug!(
            rows = m,
            cols = p.cols(),
            max_iterations,
            threshold = self.config.threshold,
            "starting Blahut-Arimoto"
        );

        let mut r = vec![1.0 / m as f64; m];
        let mut residuals = Vec::with_capacity(max_iterations.min(1024) as usize);
        let mut iterations = 0u32;
        let mut converged = false;
        let mut degenerate_at = None;
        let mut q;

        loop {
            q = column_normalize(row_weighted_multiply(&r, p));
            let powered = elementwise_power(&q, p);
            let r1 = normalize_sum(row_products(&powered));

            let tolerance = euclidean_distance(&r1, &r);
            trace!(iteration = iterations + 1, tolerance, "residual");
            if let Some(&previous) = residuals.last() {
                if tolerance > previous {
                    warn!(iteration = iterations + 1, previous, tolerance, "residual increased");
                }
            }
            residuals.push(tolerance);

            if degenerate_at.is_none() && r1.iter().any(|x| !x.is_finite()) {
                degenerate_at = Some(iterations + 1);
            }

            for (i, (old, &new)) in r.iter_mut().zip(&r1).enumerate() {
                trace!(index = i, from = *old, to = new, "updating input distribution");
                *old = new;
            }

            if tolerance < self.config.threshold {
                converged = true;
            }
            iterations += 1;

            if converged || iterations >= max_iterations {
                break;
            }
        }

        if !converged {
            warn!(iterations, "iteration cap reached before convergence");
        }

        let capacity_bits = nats_to_bits(mutual_information_nats(p, &r, &q));
        debug!(iterations, converged, capacity_bits, "Blahut-Arimoto finished");

        CapacityReport {
            capacity_bits,
            input_distribution: r,
            iterations,
            converged,
            residuals,
            degenerate_at,
        }
    }

    /// Like [`solve`](Self::solve) but reports numerical degeneracy as an error.
    ///
    /// # Errors
    /// [`CapacityError::NumericalDegeneracy`] if any updated distribution held
    /// a non-finite entry or the final capacity is not finite.
    pub fn try_solve(&self) -> Result<CapacityReport, CapacityError> {
        let report = self.solve();
        if let Some(iteration) = report.degenerate_at {
            return Err(CapacityError::NumericalDegeneracy { iteration });
        }
        if !report.capacity_bits.is_finite() {
            return Err(CapacityError::NumericalDegeneracy { iteration: report.iterations });
        }
        Ok(report)
    }
}
