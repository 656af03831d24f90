//! Gaussian-elimination synthesis of linear reversible circuits
//! (Patel–Markov–Hayes).
//!
//! Realizes an arbitrary invertible GF(2) matrix as a CNOT network. The
//! matrix columns are partitioned into blocks; within each block,
//! repeated sub-row patterns are eliminated before standard Gaussian
//! elimination runs, which is what keeps the gate count sub-quadratic.

use alsvid_ir::{CircuitSink, IrResult, QubitId};
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use tracing::debug;

use crate::bit_matrix::BitMatrix;

/// Parameters for [`cnot_patel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CnotPatelParams {
    /// Search for the best partition size instead of using
    /// `partition_size`.
    pub best_partition_size: bool,
    /// Partition (column block) size, in `1..=min(32, n)`.
    pub partition_size: usize,
}

impl Default for CnotPatelParams {
    fn default() -> Self {
        Self {
            best_partition_size: false,
            partition_size: 1,
        }
    }
}

/// Recorded row operations; each entry is one `(control, target)` CNOT
/// candidate.
type GateList = Vec<(usize, usize)>;

fn block_mask(width: usize) -> u32 {
    if width == 32 { u32::MAX } else { (1 << width) - 1 }
}

/// Reduce the lower-triangular part of `matrix` to the identity,
/// recording one gate per row XOR.
fn lower_triangular_pass(matrix: &mut BitMatrix, partition_size: usize) -> GateList {
    let mut gates = GateList::new();
    let num_cols = matrix.num_cols();
    let num_sections = (num_cols - 1) / partition_size + 1;

    for section in 0..num_sections {
        let start = section * partition_size;
        let end = (start + partition_size).min(num_cols);

        // Use row operations to eliminate sub-row patterns that repeat
        // within this section.
        let mut patterns: FxHashMap<u32, usize> = FxHashMap::default();
        for row in start..matrix.num_rows() {
            let pattern = (matrix.row(row) >> start) & block_mask(end - start);
            if pattern == 0 {
                continue;
            }
            match patterns.entry(pattern) {
                Entry::Occupied(found) => {
                    let earlier = *found.get();
                    matrix.row_xor(row, earlier);
                    gates.push((earlier, row));
                }
                Entry::Vacant(slot) => {
                    slot.insert(row);
                }
            }
        }

        // Gaussian elimination within the section.
        for column in start..end {
            let mut diagonal_one = matrix.get(column, column);
            for row in column + 1..matrix.num_rows() {
                if !matrix.get(row, column) {
                    continue;
                }
                if !diagonal_one {
                    diagonal_one = true;
                    matrix.row_xor(column, row);
                    gates.push((row, column));
                }
                matrix.row_xor(row, column);
                gates.push((column, row));
            }
        }
    }
    gates
}

/// Run the two-pass reduction on a scratch copy of `matrix`, returning
/// the recorded lower- and upper-part gate lists without emitting.
fn record_gates(matrix: &BitMatrix, partition_size: usize) -> (GateList, GateList) {
    let mut scratch = matrix.clone();
    let lower = lower_triangular_pass(&mut scratch, partition_size);
    scratch.transpose();
    let upper = lower_triangular_pass(&mut scratch, partition_size);
    (lower, upper)
}

/// CNOT-Patel synthesis of a linear reversible circuit.
///
/// This is the in-place variant: the sink may already contain gates, and
/// `qubits` maps matrix rows onto existing qubits. Panics on contract
/// violations: non-square or non-invertible input is not detected beyond
/// the square check, and the partition size must lie in
/// `[1, min(32, n)]` unless `best_partition_size` is set.
pub fn cnot_patel<S: CircuitSink>(
    sink: &mut S,
    qubits: &[QubitId],
    matrix: &BitMatrix,
    params: CnotPatelParams,
) -> IrResult<()> {
    let n = matrix.num_rows();
    assert!(matrix.is_square(), "cnot_patel requires a square matrix");
    assert_eq!(
        qubits.len(),
        n,
        "qubit register size must match the matrix dimension"
    );
    assert!(
        sink.num_qubits() >= qubits.len(),
        "sink does not own the requested qubits"
    );
    if n == 0 {
        return Ok(());
    }
    assert!(
        params.best_partition_size
            || (1..=n.min(32)).contains(&params.partition_size),
        "partition size must lie in [1, min(32, n)]"
    );

    let partition_size = if params.best_partition_size {
        // Count-only sweep over every block width; gates are recorded but
        // nothing reaches the sink.
        let mut best_count = usize::MAX;
        let mut best_size = 1;
        for size in 1..=n {
            let (lower, upper) = record_gates(matrix, size);
            let count = lower.len() + upper.len();
            if count < best_count {
                best_count = count;
                best_size = size;
            }
        }
        debug!(
            partition_size = best_size,
            num_gates = best_count,
            "selected best partition size"
        );
        best_size
    } else {
        params.partition_size
    };

    let (lower, upper) = record_gates(matrix, partition_size);

    // The upper pass ran on the transposed matrix: its gates apply here
    // with control and target swapped, in discovered order.
    for &(control, target) in &upper {
        sink.cx(qubits[target], qubits[control])?;
    }
    // The lower pass reduced the matrix to the identity; realizing the
    // matrix itself means undoing those operations in reverse.
    for &(control, target) in lower.iter().rev() {
        sink.cx(qubits[control], qubits[target])?;
    }
    Ok(())
}

/// Convenience form of [`cnot_patel`] that allocates the register itself.
pub fn cnot_patel_alloc<S: CircuitSink>(
    sink: &mut S,
    matrix: &BitMatrix,
    params: CnotPatelParams,
) -> IrResult<Vec<QubitId>> {
    assert!(matrix.is_square(), "cnot_patel requires a square matrix");
    let qubits: Vec<QubitId> = (0..matrix.num_rows()).map(|_| sink.create_qubit()).collect();
    cnot_patel(sink, &qubits, matrix, params)?;
    Ok(qubits)
}
