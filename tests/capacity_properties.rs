//! Integration tests for channel capacity estimation.
//!
//! Each test exercises the public API end to end: build a channel, run the
//! solver, check the capacity against a closed form, a bound or a golden value.

use dmc_capacity::{BlahutArimoto, CapacityError, SolverConfig, TransitionMatrix};

// ─── helpers ─────────────────────────────────────────────────────────────────

const THIRD: f64 = 1.0 / 3.0;

fn reference_rows() -> [[f64; 3]; 3] {
    [
        [2.0 * THIRD, THIRD, 0.0],
        [THIRD, THIRD, THIRD],
        [0.0, THIRD, 2.0 * THIRD],
    ]
}

fn capacity<R: AsRef<[f64]>>(rows: &[R]) -> f64 {
    BlahutArimoto::new(rows).unwrap().compute_capacity()
}

fn capacity_with_budget<R: AsRef<[f64]>>(rows: &[R], max_iterations: u32) -> f64 {
    let channel = TransitionMatrix::from_rows(rows).unwrap();
    BlahutArimoto::with_config(channel, SolverConfig::new(max_iterations, 1e-12))
        .unwrap()
        .compute_capacity()
}

/// Binary entropy in bits.
fn h2(p: f64) -> f64 {
    if p == 0.0 || p == 1.0 {
        return 0.0;
    }
    -p * p.log2() - (1.0 - p) * (1.0 - p).log2()
}

fn assert_close(got: f64, want: f64, tol: f64) {
    assert!((got - want).abs() < tol, "got {got}, want {want} (tol {tol})");
}

// ─── golden value ────────────────────────────────────────────────────────────

/// The 3×3 reference channel runs the full 10-iteration budget and lands on
/// a fixed value short of the true capacity (2/3 bit).
#[test]
fn test_reference_channel_golden_value() {
    let report = BlahutArimoto::new(&reference_rows()).unwrap().solve();
    assert_eq!(report.iterations, 10);
    assert!(!report.converged);
    assert_close(report.capacity_bits, 0.662_522_315_740_855_5, 1e-12);
    assert!(report.capacity_bits > 0.0 && report.capacity_bits < 3f64.log2());
}

#[test]
fn test_reference_channel_reaches_true_capacity_with_larger_budget() {
    assert_close(capacity_with_budget(&reference_rows(), 1_000), 2.0 / 3.0, 1e-9);
}

// ─── closed forms ────────────────────────────────────────────────────────────

/// Noiseless n×n channel: capacity is log2(n), reached on the first iteration.
#[test]
fn test_noiseless_channel_has_full_capacity() {
    for n in 1..=6 {
        let solver = BlahutArimoto::from_channel(TransitionMatrix::noiseless(n).unwrap());
        let report = solver.solve();
        assert!(report.converged, "n = {n}");
        assert_eq!(report.iterations, 1, "n = {n}");
        assert_close(report.capacity_bits, (n as f64).log2(), 1e-12);
    }
}

/// Output independent of input: nothing gets through.
#[test]
fn test_identical_rows_have_zero_capacity() {
    assert_close(capacity(&[[0.3, 0.3, 0.4]; 3]), 0.0, 1e-12);
    assert_close(capacity(&[[0.5, 0.5], [0.5, 0.5]]), 0.0, 1e-12);
}

#[test]
fn test_binary_symmetric_channel_matches_one_minus_entropy() {
    for p in [0.0, 0.05, 0.1, 0.25, 0.5, 0.75, 1.0] {
        let bsc = BlahutArimoto::from_channel(TransitionMatrix::binary_symmetric(p).unwrap());
        assert_close(bsc.compute_capacity(), 1.0 - h2(p), 1e-12);
    }
}

#[test]
fn test_binary_erasure_channel_matches_one_minus_erasure() {
    for e in [0.1, 0.5, 0.9] {
        let bec = BlahutArimoto::from_channel(TransitionMatrix::binary_erasure(e).unwrap());
        assert_close(bec.compute_capacity(), 1.0 - e, 1e-12);
    }
}

/// Z-channel with p = 1/2: capacity is log2(5/4), achieved at r = (3/5, 2/5).
#[test]
fn test_z_channel_converges_to_closed_form() {
    let channel = TransitionMatrix::from_rows(&[[1.0, 0.0], [0.5, 0.5]]).unwrap();
    let report = BlahutArimoto::with_config(channel, SolverConfig::new(1_000, 1e-12))
        .unwrap()
        .solve();
    assert!(report.converged);
    assert_close(report.capacity_bits, 1.25f64.log2(), 1e-9);
    assert_close(report.input_distribution[0], 0.6, 1e-9);
}

// ─── bounds ──────────────────────────────────────────────────────────────────

/// 0 ≤ C ≤ log2(min(m, n)) for row-stochastic channels, square or not.
#[test]
fn test_capacity_is_bounded_by_smaller_alphabet() {
    let channels: Vec<Vec<Vec<f64>>> = vec![
        reference_rows().iter().map(|r| r.to_vec()).collect(),
        vec![vec![0.6, 0.3, 0.1], vec![0.2, 0.5, 0.3]],
        vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]],
        vec![vec![0.7, 0.2, 0.1], vec![0.1, 0.8, 0.1], vec![0.25, 0.25, 0.5], vec![0.0, 0.1, 0.9]],
        vec![vec![1.0]],
    ];
    for rows in &channels {
        let m = rows.len();
        let n = rows[0].len();
        let c = capacity(rows);
        let upper = (m.min(n) as f64).log2();
        assert!(c.is_finite(), "{rows:?}");
        assert!(c >= -1e-12, "capacity {c} negative for {rows:?}");
        assert!(c <= upper + 1e-12, "capacity {c} above {upper} for {rows:?}");
    }
}

/// Three inputs into two outputs: the third input is redundant, so the
/// capacity is one bit.
#[test]
fn test_rectangular_channel_with_redundant_input() {
    let c = capacity_with_budget(&[[1.0, 0.0], [0.0, 1.0], [0.5, 0.5]], 200);
    assert_close(c, 1.0, 1e-9);
}

// ─── symmetry and statelessness ──────────────────────────────────────────────

/// Relabelling input symbols does not change the capacity.
#[test]
fn test_row_permutation_invariance() {
    let rows = [[0.7, 0.2, 0.1], [0.1, 0.8, 0.1], [0.25, 0.25, 0.5]];
    let base = capacity(&rows);
    for perm in [[0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]] {
        let permuted: Vec<[f64; 3]> = perm.iter().map(|&i| rows[i]).collect();
        assert_close(capacity(&permuted), base, 1e-12);
    }

    let reference = reference_rows();
    let swapped = [reference[2], reference[1], reference[0]];
    assert_close(capacity(&swapped), capacity(&reference), 1e-12);
}

/// Two calls on one solver produce identical reports.
#[test]
fn test_repeated_solves_are_identical() {
    let solver = BlahutArimoto::new(&reference_rows()).unwrap();
    let first = solver.solve();
    let second = solver.solve();
    assert_eq!(first, second);
    assert_eq!(solver.compute_capacity(), first.capacity_bits);
}

/// Residuals shrink from one iteration to the next on a well-conditioned channel.
#[test]
fn test_residuals_are_monotone_on_reference_channel() {
    let report = BlahutArimoto::new(&reference_rows()).unwrap().solve();
    assert!(report.is_monotone(), "{:?}", report.residuals);
    assert!(report.residuals[0] > report.residuals[9]);
}

// ─── construction errors ─────────────────────────────────────────────────────

#[test]
fn test_zero_dimension_is_invalid_argument() {
    let no_rows: Vec<Vec<f64>> = Vec::new();
    let err = BlahutArimoto::new(&no_rows).unwrap_err();
    assert_eq!(err, CapacityError::EmptyMatrix { rows: 0, cols: 0 });
    assert!(err.is_invalid_argument());

    let no_cols: Vec<Vec<f64>> = vec![Vec::new()];
    let err = BlahutArimoto::new(&no_cols).unwrap_err();
    assert_eq!(err, CapacityError::EmptyMatrix { rows: 1, cols: 0 });
}

#[test]
fn test_ragged_rows_are_invalid_argument() {
    let rows = vec![vec![0.5, 0.5], vec![0.2, 0.3, 0.5]];
    let err = BlahutArimoto::new(&rows).unwrap_err();
    assert_eq!(err, CapacityError::RaggedRows { row: 1, expected: 2, found: 3 });
}

#[test]
fn test_error_messages_are_readable() {
    let err = BlahutArimoto::new(&[[0.5, -0.5]]).unwrap_err();
    assert_eq!(err.to_string(), "entry (0, 1) = -0.5 is not a finite non-negative weight");
}
