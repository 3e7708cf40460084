//! # dmc-capacity
//!
//! Channel capacity of discrete memoryless channels via the Blahut-Arimoto
//! algorithm.
//!
//! ---
//!
//! Given a fixed `m × n` transition matrix `P` (rows = input symbols,
//! columns = output symbols), the capacity is the largest mutual information
//! between input and output over every input distribution `r`. Blahut-Arimoto
//! finds it by alternating two closed-form updates:
//!
//! 1. the posterior `q(i | j)` implied by the current `r`,
//! 2. a new `r` proportional to `Π_j q(i | j) ^ P[i][j]`,
//!
//! until `r` stops moving or the iteration budget runs out. The mutual
//! information at the final `(r, q)` is the capacity estimate, in bits.
//!
//! ## The pipeline
//!
//! ```text
//! rows ─► TransitionMatrix ─► BlahutArimoto ─► solve() ─► CapacityReport
//!                │                  ↑              │
//!            Marginals         SolverConfig    matrix::* helpers
//!                                                  │
//!                                       info::mutual_information_nats
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`channel`] | [`TransitionMatrix`], [`Marginals`] | Validated channel matrix, diagnostic marginals, standard channels |
//! | [`matrix`] | [`Matrix`] | Dense matrix plus row-weighted multiply, column normalisation, element-wise power |
//! | [`info`] | [`info::mutual_information_nats`] | Final mutual-information accumulation |
//! | [`solver`] | [`BlahutArimoto`], [`SolverConfig`], [`CapacityReport`] | The fixed-point iteration |
//! | [`error`] | [`CapacityError`] | Invalid-argument and numerical-degeneracy errors |
//!
//! ## Example
//!
//! ```
//! use dmc_capacity::BlahutArimoto;
//!
//! let solver = BlahutArimoto::new(&[
//!     [2.0 / 3.0, 1.0 / 3.0, 0.0],
//!     [1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0],
//!     [0.0, 1.0 / 3.0, 2.0 / 3.0],
//! ])
//! .unwrap();
//!
//! let bits = solver.compute_capacity();
//! assert!(bits > 0.0 && bits < 3f64.log2());
//! ```
//!
//! ## Logging
//!
//! The solver emits `tracing` events: `debug` at start and finish, `trace`
//! for every residual and every distribution update, `warn` when the residual
//! grows or the iteration cap is hit. Install a subscriber to see them.
//!
//! ## `no_std`
//!
//! This crate is `#![no_std]` by default and needs only `alloc`. Enable the
//! `std` feature for `std::error::Error` integration and `tracing/std`.
//! Enable `serde` for (de)serialisation of matrices, configs and reports, and
//! `python-ffi` for the PyO3 bindings.

#![cfg_attr(not(any(feature = "std", feature = "python-ffi")), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

pub mod channel;
pub mod error;
pub mod info;
pub mod matrix;
pub mod solver;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use channel::{Marginals, TransitionMatrix};
pub use error::CapacityError;
pub use matrix::Matrix;
pub use solver::{BlahutArimoto, CapacityReport, SolverConfig};
