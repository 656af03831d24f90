//! Alsvid Circuit Synthesis
//!
//! This crate turns abstract specifications — invertible GF(2) matrices,
//! parity/angle tables, diagonal phase vectors — into concrete
//! {CNOT, phase} gate networks over the [`alsvid_ir`] circuit IR.
//!
//! # Overview
//!
//! Each synthesizer targets one class of unitaries:
//!
//! | Synthesizer | Input | Output |
//! |-------------|-------|--------|
//! | [`cnot_patel`] | Invertible GF(2) matrix | CNOT-only network (Patel–Markov–Hayes) |
//! | [`linear_synth`] | Parity/angle table, every parity enumerated | {CNOT, phase} network |
//! | [`gray_synth`] | Sparse parity/angle table | {CNOT, phase} network (Amy–Azimzadeh–Mosca) |
//! | [`diagonal_synth`] | Phase vector of a diagonal unitary | {CNOT, phase} network |
//!
//! Every synthesizer comes in two variants: the in-place form takes a
//! slice of existing qubits of the sink, while the `_alloc` form creates
//! the register itself. Both write through the
//! [`CircuitSink`](alsvid_ir::CircuitSink) trait, so anything from a
//! plain [`Circuit`](alsvid_ir::Circuit) to a custom builder can receive
//! the gates.
//!
//! # Example: Synthesizing a linear reversible function
//!
//! ```rust
//! use alsvid_ir::Circuit;
//! use alsvid_synth::{BitMatrix, CnotPatelParams, cnot_patel_alloc};
//!
//! // Rows are parity bitmasks: row 0 computes x0 ^ x1.
//! let matrix = BitMatrix::from_rows(vec![0b011, 0b010, 0b100], 3);
//!
//! let mut circuit = Circuit::new("linear_fn");
//! let params = CnotPatelParams {
//!     best_partition_size: true,
//!     partition_size: 1,
//! };
//! let qubits = cnot_patel_alloc(&mut circuit, &matrix, params).unwrap();
//!
//! assert_eq!(qubits.len(), 3);
//! assert!(circuit.num_cx() >= 1);
//! ```
//!
//! # Example: Synthesizing a diagonal unitary
//!
//! ```rust
//! use alsvid_ir::Circuit;
//! use alsvid_synth::diagonal_synth_alloc;
//! use std::f64::consts::PI;
//!
//! // diag(1, 1, 1, e^{iπ}): a controlled-Z up to global phase.
//! let mut circuit = Circuit::new("cz");
//! diagonal_synth_alloc(&mut circuit, &[0.0, 0.0, 0.0, PI]).unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//! ```

pub mod bit_matrix;
pub mod cnot_patel;
pub mod diagonal_synth;
pub mod gray_synth;
pub mod linear_synth;
pub mod parity_map;

pub use bit_matrix::BitMatrix;
pub use cnot_patel::{CnotPatelParams, cnot_patel, cnot_patel_alloc};
pub use diagonal_synth::{PolarizedQubit, diagonal_synth, diagonal_synth_alloc};
pub use gray_synth::{GraySynthParams, gray_synth, gray_synth_alloc};
pub use linear_synth::{LinearSynthParams, Strategy, linear_synth, linear_synth_alloc};
pub use parity_map::ParityMap;
