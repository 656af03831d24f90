//! Exhaustive synthesis of small {CNOT, phase} networks.
//!
//! Both strategies drive every possible parity over the register through
//! some qubit's wire, emitting the pending rotation the moment its parity
//! is live. Practical up to roughly 20 qubits; the circuit size is
//! exponential in the register width by construction.

use alsvid_ir::{CircuitSink, Gate, IrResult, QubitId};

use crate::parity_map::ParityMap;

/// Parity enumeration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Ascending binary counting with a final restore cascade.
    Binary,
    /// Reflected Gray code walk per target qubit; self-restoring.
    #[default]
    Gray,
}

/// Parameters for [`linear_synth`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearSynthParams {
    /// Which enumeration order to use.
    pub strategy: Strategy,
}

/// Emit the pending single-variable rotations and initialize the live
/// parity of each qubit's wire to its unit bitmask.
fn init_qubit_states<S: CircuitSink>(
    sink: &mut S,
    qubits: &[QubitId],
    parities: &mut ParityMap<u32>,
) -> IrResult<Vec<u32>> {
    let mut states = Vec::with_capacity(qubits.len());
    for (i, &qubit) in qubits.iter().enumerate() {
        states.push(1u32 << i);
        let angle = parities.extract_term(states[i]);
        if angle != 0.0 {
            sink.phase(Gate::P(angle), qubit)?;
        }
    }
    Ok(states)
}

fn synth_binary<S: CircuitSink>(
    sink: &mut S,
    qubits: &[QubitId],
    mut parities: ParityMap<u32>,
) -> IrResult<()> {
    let n = qubits.len();
    let mut states = init_qubit_states(sink, qubits, &mut parities)?;

    for value in 1u64..(1u64 << n) {
        // Unit parities were handled during initialization.
        if value.is_power_of_two() {
            continue;
        }
        let value = value as u32;
        let msb = (31 - value.leading_zeros()) as usize;
        for j in 0..n {
            if j != msb && states[j] ^ states[msb] == value {
                states[msb] ^= states[j];
                sink.cx(qubits[j], qubits[msb])?;
                let angle = parities.extract_term(states[msb]);
                if angle != 0.0 {
                    sink.phase(Gate::P(angle), qubits[msb])?;
                }
            }
        }
    }

    // Return every wire to its unit parity.
    for i in (1..n).rev() {
        states[i] ^= states[i - 1];
        sink.cx(qubits[i - 1], qubits[i])?;
    }
    debug_assert!(states.iter().enumerate().all(|(i, &s)| s == 1 << i));
    Ok(())
}

/// The reflected Gray code for `index`.
#[inline]
fn gray_code(index: u64) -> u32 {
    ((index >> 1) ^ index) as u32
}

fn synth_gray<S: CircuitSink>(
    sink: &mut S,
    qubits: &[QubitId],
    mut parities: ParityMap<u32>,
) -> IrResult<()> {
    let n = qubits.len();
    let mut states = init_qubit_states(sink, qubits, &mut parities)?;

    // Walk the Gray codes with bit i set, folding the flipped bit's wire
    // into target i at every step. Each level is a cycle, so the target
    // wire ends back at its unit parity.
    for i in (1..n).rev() {
        let level_start = 1u64 << i;
        let level_end = (1u64 << (i + 1)) - 1;
        let mut fold = |sink: &mut S, flipped: u32| -> IrResult<()> {
            let t = flipped.trailing_zeros() as usize;
            states[i] ^= states[t];
            sink.cx(qubits[t], qubits[i])?;
            let angle = parities.extract_term(states[i]);
            if angle != 0.0 {
                sink.phase(Gate::P(angle), qubits[i])?;
            }
            Ok(())
        };
        for j in ((level_start + 1)..=level_end).rev() {
            fold(sink, gray_code(j) ^ gray_code(j - 1))?;
        }
        fold(sink, gray_code(level_start) ^ gray_code(level_end))?;
    }
    debug_assert!(states.iter().enumerate().all(|(i, &s)| s == 1 << i));
    Ok(())
}

/// Linear synthesis for small {CNOT, phase} networks.
///
/// Every term pending in `parities` is emitted exactly once as a phase
/// gate, and the emitted CNOTs net to the identity transform. This is
/// the in-place variant; `qubits` maps parity bit positions onto
/// existing qubits of the sink.
pub fn linear_synth<S: CircuitSink>(
    sink: &mut S,
    qubits: &[QubitId],
    parities: ParityMap<u32>,
    params: LinearSynthParams,
) -> IrResult<()> {
    assert!(qubits.len() <= 32, "linear_synth supports at most 32 qubits");
    assert!(
        sink.num_qubits() >= qubits.len(),
        "sink does not own the requested qubits"
    );
    match params.strategy {
        Strategy::Binary => synth_binary(sink, qubits, parities),
        Strategy::Gray => synth_gray(sink, qubits, parities),
    }
}

/// Convenience form of [`linear_synth`] that allocates the register
/// itself.
pub fn linear_synth_alloc<S: CircuitSink>(
    sink: &mut S,
    num_qubits: usize,
    parities: ParityMap<u32>,
    params: LinearSynthParams,
) -> IrResult<Vec<QubitId>> {
    assert!(num_qubits <= 32, "linear_synth supports at most 32 qubits");
    let qubits: Vec<QubitId> = (0..num_qubits).map(|_| sink.create_qubit()).collect();
    linear_synth(sink, &qubits, parities, params)?;
    Ok(qubits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alsvid_ir::Circuit;
    use std::f64::consts::FRAC_PI_4;

    fn run(strategy: Strategy, num_qubits: usize, parities: ParityMap<u32>) -> Circuit {
        let mut circuit = Circuit::new("linear");
        linear_synth_alloc(&mut circuit, num_qubits, parities, LinearSynthParams { strategy })
            .unwrap();
        circuit
    }

    /// Accumulate the emitted phase angles against the live parity of
    /// their wire, and return them with the net linear transform.
    fn simulate(circuit: &Circuit, n: usize) -> (Vec<(u32, f64)>, Vec<u32>) {
        let mut states: Vec<u32> = (0..n).map(|i| 1 << i).collect();
        let mut phases = vec![];
        for inst in circuit.instructions() {
            match inst.gate.phase_angle() {
                Some(angle) => {
                    let target = inst.target().unwrap().index();
                    phases.push((states[target], angle));
                }
                None => {
                    let control = inst.control().unwrap().index();
                    let target = inst.target().unwrap().index();
                    states[target] ^= states[control];
                }
            }
        }
        (phases, states)
    }

    #[test]
    fn test_single_term_emits_one_phase_gate() {
        for strategy in [Strategy::Binary, Strategy::Gray] {
            let mut parities = ParityMap::new();
            parities.add_term(3u32, FRAC_PI_4);
            let circuit = run(strategy, 3, parities);

            assert_eq!(circuit.num_phase(), 1, "{strategy:?}");
            let (phases, states) = simulate(&circuit, 3);
            assert_eq!(phases, vec![(3, FRAC_PI_4)]);
            // Representation restore: every wire back at its unit parity.
            assert_eq!(states, vec![1, 2, 4]);
        }
    }

    #[test]
    fn test_full_coverage_three_qubits() {
        // One term for every parity over 3 qubits.
        for strategy in [Strategy::Binary, Strategy::Gray] {
            let parities: ParityMap<u32> =
                (1u32..8).map(|term| (term, term as f64)).collect();
            let circuit = run(strategy, 3, parities);

            let (phases, states) = simulate(&circuit, 3);
            assert_eq!(states, vec![1, 2, 4], "{strategy:?}");
            assert_eq!(phases.len(), 7);
            let mut seen: Vec<u32> = phases.iter().map(|&(term, _)| term).collect();
            seen.sort_unstable();
            assert_eq!(seen, (1..8).collect::<Vec<_>>());
            for (term, angle) in phases {
                assert_eq!(angle, term as f64);
            }
        }
    }

    #[test]
    fn test_empty_map_binary_still_restores() {
        let circuit = run(Strategy::Binary, 2, ParityMap::new());
        let (phases, states) = simulate(&circuit, 2);
        assert!(phases.is_empty());
        assert_eq!(states, vec![1, 2]);
    }

    #[test]
    fn test_single_qubit_register() {
        let mut parities = ParityMap::new();
        parities.add_term(1u32, 0.75);
        let circuit = run(Strategy::Gray, 1, parities);
        assert_eq!(circuit.num_ops(), 1);
        assert_eq!(circuit.num_cx(), 0);
    }
}
