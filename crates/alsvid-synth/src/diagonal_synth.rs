//! Synthesis of diagonal unitary matrices.
//!
//! A diagonal unitary is fully described by one phase angle per basis
//! state. A fast Walsh–Hadamard transform converts that phase vector
//! into parity-spectrum coefficients, which are then synthesized as a
//! {CNOT, phase} network: densely populated spectra go through
//! [`linear_synth`](crate::linear_synth), sparse ones through
//! [`gray_synth`](crate::gray_synth).

use alsvid_ir::{CircuitSink, IrResult, QubitId};
use tracing::debug;

use crate::gray_synth::{GraySynthParams, gray_synth};
use crate::linear_synth::{LinearSynthParams, linear_synth};
use crate::parity_map::ParityMap;

/// A qubit handle carrying control polarity.
///
/// A complemented qubit acts as a negative control: the diagonal is
/// applied with that qubit's basis value flipped. Converting from a bare
/// [`QubitId`] yields positive polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolarizedQubit {
    /// The underlying qubit.
    pub id: QubitId,
    /// Negative-control polarity flag.
    pub complemented: bool,
}

impl PolarizedQubit {
    /// A positive-polarity qubit.
    pub fn new(id: QubitId) -> Self {
        Self {
            id,
            complemented: false,
        }
    }

    /// A negative-control (complemented) qubit.
    pub fn complemented(id: QubitId) -> Self {
        Self {
            id,
            complemented: true,
        }
    }
}

impl From<QubitId> for PolarizedQubit {
    fn from(id: QubitId) -> Self {
        Self::new(id)
    }
}

/// In-place fast Walsh–Hadamard transform (unnormalized butterfly).
fn fast_hadamard_transform(angles: &mut [f64]) {
    let mut half = 1;
    while half < angles.len() {
        let mut block = 0;
        while block < angles.len() {
            for i in block..block + half {
                let a = angles[i];
                let b = angles[i + half];
                angles[i] = a + b;
                angles[i + half] = a - b;
            }
            block += half << 1;
        }
        half <<= 1;
    }
}

/// Synthesis of a diagonal unitary from its phase vector.
///
/// `angles[b]` is the phase applied to basis state `b`, with `angles[0]`
/// conventionally zero (a global-phase offset is not realized). Qubit
/// `i` of the register owns bit `i` of the basis index. This is the
/// in-place variant; the register maps onto existing qubits of the sink.
pub fn diagonal_synth<S: CircuitSink>(
    sink: &mut S,
    qubits: &[PolarizedQubit],
    angles: &[f64],
) -> IrResult<()> {
    assert!(
        !angles.is_empty() && angles.len().is_power_of_two(),
        "the number of angles must be a power of two"
    );
    assert!(
        !qubits.is_empty() && qubits.len() <= 32,
        "diagonal_synth supports 1 to 32 qubits"
    );
    assert_eq!(
        1usize << qubits.len(),
        angles.len(),
        "expected one angle per basis state"
    );

    let n = qubits.len();
    let mut spectrum: Vec<f64> = angles.iter().map(|&a| -a).collect();

    // Normalize negative-control polarity, highest bit first: each swap
    // pairs the half-blocks at that qubit's bit-weight.
    for q in (0..n).rev() {
        if !qubits[q].complemented {
            continue;
        }
        let weight = 1usize << q;
        for b in 0..spectrum.len() {
            if b & weight == 0 {
                spectrum.swap(b, b | weight);
            }
        }
    }

    fast_hadamard_transform(&mut spectrum);

    // Index 0 is the global phase; it is dropped, which fixes the dense
    // threshold at 2^n - 1 populated parities.
    let factor = (1u64 << (n - 1)) as f64;
    let mut parities: ParityMap<u32> = ParityMap::new();
    for (term, &coefficient) in spectrum.iter().enumerate().skip(1) {
        if coefficient != 0.0 {
            parities.add_term(term as u32, coefficient / factor);
        }
    }

    let register: Vec<QubitId> = qubits.iter().map(|q| q.id).collect();
    let dense = parities.num_terms() == spectrum.len() - 1;
    debug!(
        num_terms = parities.num_terms(),
        dense, "dispatching parity spectrum"
    );
    if dense {
        linear_synth(sink, &register, parities, LinearSynthParams::default())
    } else {
        gray_synth(sink, &register, parities, GraySynthParams::default())
    }
}

/// Convenience form of [`diagonal_synth`] that allocates the register
/// itself (all positive polarity).
pub fn diagonal_synth_alloc<S: CircuitSink>(
    sink: &mut S,
    angles: &[f64],
) -> IrResult<Vec<QubitId>> {
    assert!(
        !angles.is_empty() && angles.len().is_power_of_two(),
        "the number of angles must be a power of two"
    );
    let n = angles.len().trailing_zeros() as usize;
    let register: Vec<QubitId> = (0..n).map(|_| sink.create_qubit()).collect();
    let qubits: Vec<PolarizedQubit> = register.iter().map(|&id| id.into()).collect();
    diagonal_synth(sink, &qubits, angles)?;
    Ok(register)
}
