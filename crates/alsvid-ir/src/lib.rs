//! Alsvid Circuit Intermediate Representation
//!
//! This crate provides the minimal circuit surface consumed by the
//! synthesis engine: qubit identifiers, the {CNOT, phase-rotation} gate
//! vocabulary, a flat append-only [`Circuit`], and the [`CircuitSink`]
//! capability trait that the synthesizers are generic over.
//!
//! The synthesis algorithms in `alsvid-synth` never depend on a concrete
//! circuit representation; they only require a sink that can allocate
//! qubits and append operations in program order. [`Circuit`] is the
//! reference implementation of that capability.
//!
//! # Example
//!
//! ```rust
//! use alsvid_ir::{Circuit, CircuitSink, Gate, QubitId};
//!
//! let mut circuit = Circuit::new("example");
//! let q0 = circuit.add_qubit();
//! let q1 = circuit.add_qubit();
//!
//! circuit.cx(q0, q1).unwrap();
//! circuit.p(std::f64::consts::FRAC_PI_4, q1).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.num_ops(), 2);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod sink;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::Gate;
pub use instruction::Instruction;
pub use qubit::QubitId;
pub use sink::CircuitSink;
