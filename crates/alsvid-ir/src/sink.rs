//! Circuit-sink capability consumed by the synthesizers.

use crate::circuit::Circuit;
use crate::error::IrResult;
use crate::gate::Gate;
use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// Append-only circuit capability.
///
/// Every synthesizer is generic over this trait rather than over a
/// concrete circuit representation. A sink is exclusively owned by the
/// synthesis call for its duration; operations are appended in program
/// order by a single writer.
pub trait CircuitSink {
    /// Allocate a fresh qubit and return its identifier.
    fn create_qubit(&mut self) -> QubitId;

    /// Number of qubits the sink currently owns.
    fn num_qubits(&self) -> usize;

    /// Append an operation.
    fn create_op(&mut self, gate: Gate, qubits: &[QubitId]) -> IrResult<()>;

    /// Append a CNOT gate.
    fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<()> {
        self.create_op(Gate::CX, &[control, target])
    }

    /// Append a phase-family gate on a single target.
    fn phase(&mut self, gate: Gate, target: QubitId) -> IrResult<()> {
        debug_assert!(gate.is_phase());
        self.create_op(gate, &[target])
    }
}

impl CircuitSink for Circuit {
    fn create_qubit(&mut self) -> QubitId {
        self.add_qubit()
    }

    fn num_qubits(&self) -> usize {
        Circuit::num_qubits(self)
    }

    fn create_op(&mut self, gate: Gate, qubits: &[QubitId]) -> IrResult<()> {
        self.apply(Instruction::new(gate, qubits.iter().copied()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circuit_as_sink() {
        let mut circuit = Circuit::new("sink");
        let q0 = CircuitSink::create_qubit(&mut circuit);
        let q1 = CircuitSink::create_qubit(&mut circuit);
        assert_eq!(CircuitSink::num_qubits(&circuit), 2);

        circuit.cx(q0, q1).unwrap();
        circuit.phase(Gate::T, q0).unwrap();
        assert_eq!(circuit.num_ops(), 2);
        assert_eq!(circuit.instructions()[0].gate, Gate::CX);
        assert_eq!(circuit.instructions()[1].gate, Gate::T);
    }
}
