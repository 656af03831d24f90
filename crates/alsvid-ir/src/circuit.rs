//! Flat circuit builder API.

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// A quantum circuit stored as a flat, append-only instruction list.
///
/// Operations appear in program order; there is no graph structure here.
/// This is the reference implementation of the
/// [`CircuitSink`](crate::sink::CircuitSink) capability.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits allocated so far.
    num_qubits: u32,
    /// Instructions in program order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_qubits: 0,
            instructions: vec![],
        }
    }

    /// Create a circuit with a given number of qubits.
    pub fn with_qubits(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            instructions: vec![],
        }
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.num_qubits);
        self.num_qubits += 1;
        id
    }

    /// Append an instruction, validating its operands.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<()> {
        let gate_name = instruction.gate.name();
        let expected = instruction.gate.num_qubits();
        let got = u32::try_from(instruction.qubits.len()).unwrap_or(u32::MAX);
        if expected != got {
            return Err(IrError::QubitCountMismatch {
                gate_name,
                expected,
                got,
            });
        }
        for &qubit in &instruction.qubits {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound { qubit, gate_name });
            }
        }
        if instruction.qubits.len() == 2 && instruction.qubits[0] == instruction.qubits[1] {
            return Err(IrError::DuplicateQubit {
                qubit: instruction.qubits[0],
                gate_name,
            });
        }
        self.instructions.push(instruction);
        Ok(())
    }

    // =========================================================================
    // Gate helpers
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(Gate::CX, control, target))?;
        Ok(self)
    }

    /// Apply phase rotation gate.
    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(Gate::P(theta), qubit))?;
        Ok(self)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(Gate::Z, qubit))?;
        Ok(self)
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(Gate::S, qubit))?;
        Ok(self)
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(Gate::Sdg, qubit))?;
        Ok(self)
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(Gate::T, qubit))?;
        Ok(self)
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(Gate::Tdg, qubit))?;
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the number of operations.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Get the instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Count the CNOT operations.
    pub fn num_cx(&self) -> usize {
        self.instructions
            .iter()
            .filter(|inst| inst.gate == Gate::CX)
            .count()
    }

    /// Count the phase-rotation operations.
    pub fn num_phase(&self) -> usize {
        self.instructions
            .iter()
            .filter(|inst| inst.gate.is_phase())
            .count()
    }
}
