//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::gate::Gate;
use crate::qubit::QubitId;

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate applied.
    pub gate: Gate,
    /// Qubits this instruction operates on. For two-qubit gates the
    /// control comes first.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create an instruction from a gate and its operands.
    pub fn new(gate: Gate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            gate,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: Gate, qubit: QubitId) -> Self {
        Self::new(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: Gate, control: QubitId, target: QubitId) -> Self {
        Self::new(gate, [control, target])
    }

    /// The control qubit, if this is a two-qubit instruction.
    pub fn control(&self) -> Option<QubitId> {
        (self.qubits.len() == 2).then(|| self.qubits[0])
    }

    /// The target qubit (the last operand).
    pub fn target(&self) -> Option<QubitId> {
        self.qubits.last().copied()
    }
}
