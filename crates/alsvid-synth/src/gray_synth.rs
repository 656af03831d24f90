//! Sparse synthesis of {CNOT, phase} networks (Amy–Azimzadeh–Mosca).
//!
//! Unlike [`linear_synth`](crate::linear_synth), this does not enumerate
//! every parity: a backtracking cofactor search visits only the terms
//! actually present, so the CNOT count scales with the number of terms
//! rather than with `2^n`. The recorded network is made phase-only by
//! resynthesizing its residual linear transform through
//! [`cnot_patel`](crate::cnot_patel).

use alsvid_ir::{CircuitSink, Gate, IrResult, QubitId};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use tracing::debug;

use crate::bit_matrix::BitMatrix;
use crate::cnot_patel::{CnotPatelParams, cnot_patel};
use crate::parity_map::ParityMap;

/// Angle tolerance for recognizing named phase gates.
const EPSILON: f64 = 1e-10;

/// Parameters for [`gray_synth`].
#[derive(Debug, Clone, Copy)]
pub struct GraySynthParams {
    /// Parameters passed through to the residual CNOT-Patel synthesis.
    pub cnot_patel: CnotPatelParams,
    /// Emit rotations whose angle matches a recognizable constant as the
    /// named gate (`Z`, `S`, `Sdg`, `T`, `Tdg`) instead of a generic
    /// rotation. Purely cosmetic.
    pub try_identify_r1: bool,
}

impl Default for GraySynthParams {
    fn default() -> Self {
        Self {
            cnot_patel: CnotPatelParams {
                best_partition_size: true,
                partition_size: 1,
            },
            try_identify_r1: true,
        }
    }
}

/// One branch of the cofactor search.
struct Frame {
    /// Indices into the term table still covered by this branch.
    selected: Vec<usize>,
    /// Bitset of qubits not yet used as split points on this branch.
    remaining_rows: u32,
    /// Output qubit assigned to this branch, if any.
    qid: Option<usize>,
}

/// Pick the remaining qubit whose restricted column is most unbalanced:
/// maximizing `max(ones, zeros)` bounds the depth of the search.
fn select_row(matrix: &BitMatrix, selected: &[usize], remaining_rows: u32) -> usize {
    debug_assert!(remaining_rows != 0);
    let mut best = 0;
    let mut best_score = 0;
    for qubit in 0..matrix.num_cols() {
        if remaining_rows & (1 << qubit) == 0 {
            continue;
        }
        let ones = selected.iter().filter(|&&term| matrix.get(term, qubit)).count();
        let score = ones.max(selected.len() - ones);
        if score > best_score {
            best_score = score;
            best = qubit;
        }
    }
    best
}

fn identify_phase(angle: f64, try_identify: bool) -> Gate {
    if try_identify {
        let named = [
            (PI, Gate::Z),
            (FRAC_PI_2, Gate::S),
            (-FRAC_PI_2, Gate::Sdg),
            (FRAC_PI_4, Gate::T),
            (-FRAC_PI_4, Gate::Tdg),
        ];
        for (value, gate) in named {
            if (angle - value).abs() < EPSILON {
                return gate;
            }
        }
    }
    Gate::P(angle)
}

/// Gray synthesis of a sparse parity/angle set.
///
/// This is the in-place variant; `qubits` maps parity bit positions onto
/// existing qubits of the sink. The emitted sequence is phase-only
/// relative to the input basis: its CNOTs net to the identity transform,
/// and every pending term is emitted exactly once.
pub fn gray_synth<S: CircuitSink>(
    sink: &mut S,
    qubits: &[QubitId],
    mut parities: ParityMap<u32>,
    params: GraySynthParams,
) -> IrResult<()> {
    let n = qubits.len();
    assert!(n <= 32, "gray_synth supports at most 32 qubits");
    assert!(
        sink.num_qubits() >= n,
        "sink does not own the requested qubits"
    );
    if parities.is_empty() {
        return Ok(());
    }

    // Live parity table: one row per term, one column per qubit.
    let mut matrix = BitMatrix::from_rows(parities.iter().map(|(term, _)| term).collect(), n);
    let mut gates: Vec<(usize, usize)> = Vec::new();

    let all_rows = if n == 32 { u32::MAX } else { (1u32 << n) - 1 };
    let mut stack = vec![Frame {
        selected: (0..matrix.num_rows()).collect(),
        remaining_rows: all_rows,
        qid: None,
    }];

    while let Some(mut frame) = stack.pop() {
        // Collapse: fold every qubit whose restricted column is all ones
        // into the branch's output qubit.
        if let Some(qid) = frame.qid {
            for j in 0..n {
                if j == qid {
                    continue;
                }
                if !frame.selected.iter().all(|&term| matrix.get(term, j)) {
                    continue;
                }
                for term in 0..matrix.num_rows() {
                    if matrix.get(term, qid) {
                        let bit = matrix.get(term, j);
                        matrix.set(term, j, !bit);
                    }
                }
                gates.push((j, qid));
            }
        }

        if frame.selected.len() == 1 && matrix.row(frame.selected[0]).count_ones() <= 1 {
            continue;
        }
        if frame.remaining_rows == 0 {
            continue;
        }

        let row = select_row(&matrix, &frame.selected, frame.remaining_rows);
        let (cofactor1, cofactor0): (Vec<usize>, Vec<usize>) = frame
            .selected
            .iter()
            .partition(|&&term| matrix.get(term, row));
        frame.remaining_rows &= !(1 << row);

        if !cofactor1.is_empty() {
            stack.push(Frame {
                selected: cofactor1,
                remaining_rows: frame.remaining_rows,
                qid: Some(frame.qid.unwrap_or(row)),
            });
        }
        if !cofactor0.is_empty() {
            stack.push(Frame {
                selected: cofactor0,
                remaining_rows: frame.remaining_rows,
                qid: frame.qid,
            });
        }
    }

    debug!(
        num_terms = matrix.num_rows(),
        num_gates = gates.len(),
        "cofactor search complete"
    );

    // Emit the pending single-variable rotations, then replay the
    // recorded network, emitting each remaining term the moment its
    // parity is live.
    let mut states: Vec<u32> = Vec::with_capacity(n);
    for (i, &qubit) in qubits.iter().enumerate() {
        states.push(1u32 << i);
        let angle = parities.extract_term(states[i]);
        if angle != 0.0 {
            sink.phase(identify_phase(angle, params.try_identify_r1), qubit)?;
        }
    }
    for &(control, target) in &gates {
        states[target] ^= states[control];
        sink.cx(qubits[control], qubits[target])?;
        let angle = parities.extract_term(states[target]);
        if angle != 0.0 {
            sink.phase(identify_phase(angle, params.try_identify_r1), qubits[target])?;
        }
    }

    // The replayed CNOTs leave a residual linear transform; undo it so
    // the whole emitted sequence is phase-only.
    let mut residual = BitMatrix::identity(n);
    for &(control, target) in gates.iter().rev() {
        residual.row_xor(target, control);
    }
    cnot_patel(sink, qubits, &residual, params.cnot_patel)
}

/// Convenience form of [`gray_synth`] that allocates the register
/// itself. An empty parity map allocates nothing and emits nothing.
pub fn gray_synth_alloc<S: CircuitSink>(
    sink: &mut S,
    num_qubits: usize,
    parities: ParityMap<u32>,
    params: GraySynthParams,
) -> IrResult<Vec<QubitId>> {
    assert!(num_qubits <= 32, "gray_synth supports at most 32 qubits");
    if parities.is_empty() {
        return Ok(vec![]);
    }
    let qubits: Vec<QubitId> = (0..num_qubits).map(|_| sink.create_qubit()).collect();
    gray_synth(sink, &qubits, parities, params)?;
    Ok(qubits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::Circuit;

    /// Walk the circuit tracking live wire parities; collect each phase
    /// gate against its parity and return the final wire states.
    fn simulate(circuit: &Circuit, n: usize) -> (ParityMap<u32>, Vec<u32>) {
        let mut states: Vec<u32> = (0..n).map(|i| 1 << i).collect();
        let mut observed = ParityMap::new();
        for inst in circuit.instructions() {
            match inst.gate.phase_angle() {
                Some(angle) => {
                    let target = inst.target().unwrap().index();
                    observed.add_term(states[target], angle);
                }
                None => {
                    let control = inst.control().unwrap().index();
                    let target = inst.target().unwrap().index();
                    states[target] ^= states[control];
                }
            }
        }
        (observed, states)
    }

    #[test]
    fn test_amy_paper_example() {
        let mut parities = ParityMap::new();
        for term in [0b0110u32, 0b0001, 0b1001, 0b0111, 0b1011, 0b0011] {
            parities.add_term(term, FRAC_PI_4);
        }
        let mut circuit = Circuit::new("gray");
        let qubits =
            gray_synth_alloc(&mut circuit, 4, parities, GraySynthParams::default()).unwrap();
        assert_eq!(qubits.len(), 4);

        let (mut observed, states) = simulate(&circuit, 4);
        // Phase-only: the CNOTs net to the identity.
        assert_eq!(states, vec![1, 2, 4, 8]);
        assert_eq!(observed.num_terms(), 6);
        for term in [0b0110u32, 0b0001, 0b1001, 0b0111, 0b1011, 0b0011] {
            let angle = observed.extract_term(term);
            assert!((angle - FRAC_PI_4).abs() < 1e-12, "term {term:#06b}");
        }
    }

    #[test]
    fn test_empty_parities_emit_nothing() {
        let mut circuit = Circuit::with_qubits("gray", 4);
        let qubits: Vec<QubitId> = (0u32..4).map(QubitId).collect();
        gray_synth(&mut circuit, &qubits, ParityMap::new(), GraySynthParams::default()).unwrap();
        assert_eq!(circuit.num_ops(), 0);

        // The allocating form does not touch the register either.
        let mut fresh = Circuit::new("gray");
        let allocated =
            gray_synth_alloc(&mut fresh, 4, ParityMap::new(), GraySynthParams::default()).unwrap();
        assert!(allocated.is_empty());
        assert_eq!(fresh.num_qubits(), 0);
    }

    #[test]
    fn test_identified_gates() {
        let mut parities = ParityMap::new();
        parities.add_term(0b11u32, PI);
        parities.add_term(0b01u32, FRAC_PI_4);
        let mut circuit = Circuit::new("gray");
        gray_synth_alloc(&mut circuit, 2, parities, GraySynthParams::default()).unwrap();

        let named: Vec<Gate> = circuit
            .instructions()
            .iter()
            .filter(|inst| inst.gate.is_phase())
            .map(|inst| inst.gate)
            .collect();
        assert!(named.contains(&Gate::Z));
        assert!(named.contains(&Gate::T));
    }

    #[test]
    fn test_generic_rotations_without_identification() {
        let mut parities = ParityMap::new();
        parities.add_term(0b11u32, PI);
        let mut circuit = Circuit::new("gray");
        let params = GraySynthParams {
            try_identify_r1: false,
            ..GraySynthParams::default()
        };
        gray_synth_alloc(&mut circuit, 2, parities, params).unwrap();

        assert!(
            circuit
                .instructions()
                .iter()
                .filter(|inst| inst.gate.is_phase())
                .all(|inst| matches!(inst.gate, Gate::P(_)))
        );
    }

    #[test]
    fn test_single_dense_term() {
        let mut parities = ParityMap::new();
        parities.add_term(0b111u32, 0.5);
        let mut circuit = Circuit::new("gray");
        gray_synth_alloc(&mut circuit, 3, parities, GraySynthParams::default()).unwrap();

        let (mut observed, states) = simulate(&circuit, 3);
        assert_eq!(states, vec![1, 2, 4]);
        assert!((observed.extract_term(0b111) - 0.5).abs() < 1e-12);
        assert!(observed.is_empty());
    }
}
