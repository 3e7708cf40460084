//! Mutual-information accumulation for the final capacity estimate.
//!
//! Given the channel `P`, the input distribution `r` and the column-stochastic
//! posterior `q` from the last iteration:
//!
//! ```text
//! I = Σ_{i : r_i > 0} Σ_j  r_i · P[i][j] · ln( q[i][j] / r_i + ε )
//! ```
//!
//! with `ε = LOG_STABILIZER` keeping `ln(0)` out of the sum. Rows whose
//! weight is not strictly positive contribute nothing.

use crate::matrix::Matrix;

/// Additive stabiliser inside the logarithm.
pub const LOG_STABILIZER: f64 = 1e-16;

/// Mutual information in nats.
///
/// # Panics
/// If `r.len() != p.rows()` or `q` and `p` have different shapes.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn mutual_information_nats(p: &Matrix, r: &[f64], q: &Matrix) -> f64 {
    assert_eq!(r.len(), p.rows(), "one probability per row required");
    assert!(
        q.rows() == p.rows() && q.cols() == p.cols(),
        "posterior shape must match the channel"
    );

    let mut c = 0.0;
    for (i, &r_i) in r.iter().enumerate() {
        // Only strictly positive weights count; NaN fails the test and is skipped too.
        if !(r_i > 0.0) {
            continue;
        }
        for (&p_ij, &q_ij) in p.row(i).iter().zip(q.row(i)) {
            c += r_i * p_ij * libm::log(q_ij / r_i + LOG_STABILIZER);
        }
    }
    c
}

/// Convert nats to bits.
#[inline]
pub fn nats_to_bits(nats: f64) -> f64 {
    nats / core::f64::consts::LN_2
}
