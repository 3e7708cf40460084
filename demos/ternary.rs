//! # Ternary channel capacity
//!
//! Runs Blahut-Arimoto on a three-symbol channel where the outer symbols are
//! mostly preserved and the middle symbol is pure noise:
//!
//! ```text
//!        y0    y1    y2
//! x0  [ 2/3,  1/3,  0   ]
//! x1  [ 1/3,  1/3,  1/3 ]
//! x2  [ 0,    1/3,  2/3 ]
//! ```
//!
//! Run with:
//!
//! ```bash
//! cargo run --example ternary
//! ```

use dmc_capacity::{BlahutArimoto, SolverConfig, TransitionMatrix};

fn main() {
    println!("Blahut-Arimoto — ternary channel");
    println!("================================\n");

    let size_of_alphabet = 3;
    let channel = match TransitionMatrix::from_rows(&[
        [2.0 / 3.0, 1.0 / 3.0, 0.0],
        [1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0],
        [0.0, 1.0 / 3.0, 2.0 / 3.0],
    ]) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("invalid channel: {e}");
            std::process::exit(1);
        }
    };

    let marginals = channel.marginals();
    println!("  marginal_x: {:?}", marginals.marginal_x);
    println!("  marginal_y: {:?}\n", marginals.marginal_y);

    // ── Default budget (10 iterations) ───────────────────────────────────────
    let solver = BlahutArimoto::from_channel(channel.clone());
    let report = solver.solve();
    for (k, residual) in report.residuals.iter().enumerate() {
        println!("  iter {:>2}  |r' - r| = {:.3e}", k + 1, residual);
    }
    println!("\n  r = {:?}", report.input_distribution);
    println!("  converged: {}", report.converged);
    println!("Computed capacity is {}", report.capacity_bits);

    // ── Run to convergence ───────────────────────────────────────────────────
    let long = match BlahutArimoto::with_config(channel, SolverConfig::new(1_000, 1e-12)) {
        Ok(s) => s.solve(),
        Err(e) => {
            eprintln!("invalid config: {e}");
            std::process::exit(1);
        }
    };
    println!(
        "\nWith a 1000-iteration budget: {} bits after {} iterations (upper bound log2({}) = {:.4})",
        long.capacity_bits,
        long.iterations,
        size_of_alphabet,
        (size_of_alphabet as f64).log2(),
    );
}
