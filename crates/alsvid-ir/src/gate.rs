//! Gate vocabulary of the synthesis engine.
//!
//! The engine emits exactly two kinds of operations: the two-qubit CNOT
//! and single-qubit phase rotations. The named gates `Z`, `S`, `Sdg`,
//! `T`, `Tdg` are fixed-angle members of the phase family, kept distinct
//! so that synthesis can label recognizable rotations.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// A gate the synthesis engine can emit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// Pauli-Z gate, `P(π)`.
    Z,
    /// S gate (sqrt(Z)), `P(π/2)`.
    S,
    /// S-dagger gate, `P(-π/2)`.
    Sdg,
    /// T gate (fourth root of Z), `P(π/4)`.
    T,
    /// T-dagger gate, `P(-π/4)`.
    Tdg,
    /// Generic phase rotation `diag(1, e^{iθ})`.
    P(f64),
    /// Controlled-X (CNOT) gate.
    CX,
}

impl Gate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Gate::Z => "z",
            Gate::S => "s",
            Gate::Sdg => "sdg",
            Gate::T => "t",
            Gate::Tdg => "tdg",
            Gate::P(_) => "p",
            Gate::CX => "cx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            Gate::CX => 2,
            _ => 1,
        }
    }

    /// Check if this gate belongs to the phase-rotation family.
    #[inline]
    pub fn is_phase(&self) -> bool {
        !matches!(self, Gate::CX)
    }

    /// The rotation angle for phase-family gates, `None` for CNOT.
    pub fn phase_angle(&self) -> Option<f64> {
        match self {
            Gate::Z => Some(PI),
            Gate::S => Some(FRAC_PI_2),
            Gate::Sdg => Some(-FRAC_PI_2),
            Gate::T => Some(FRAC_PI_4),
            Gate::Tdg => Some(-FRAC_PI_4),
            Gate::P(theta) => Some(*theta),
            Gate::CX => None,
        }
    }
}
