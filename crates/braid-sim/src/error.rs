//! Error types for the executor crate.

use braid_ir::IrError;
use thiserror::Error;

/// Errors produced while executing circuits against a state vector.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Circuit IR error (flattening, control extension, width checks).
    #[error("circuit IR error: {0}")]
    Ir(#[from] IrError),

    /// A block is wider than the state it is being applied to.
    #[error("block '{block}' spans {block_width} qubits but the state has only {num_qubits}")]
    WidthMismatch {
        /// Name of the block.
        block: String,
        /// Declared width of the block.
        block_width: u32,
        /// Number of qubits in the state.
        num_qubits: u32,
    },

    /// A gate references a qubit outside the state.
    #[error("gate '{gate}' references qubit q{qubit} but the state has only {num_qubits} qubits")]
    QubitOutOfRange {
        /// Name of the gate.
        gate: String,
        /// The offending qubit index.
        qubit: u32,
        /// Number of qubits in the state.
        num_qubits: u32,
    },

    /// Requested state is too large to allocate.
    #[error("cannot allocate a state vector for {0} qubits (limit is 30)")]
    TooManyQubits(u32),

    /// A basis value does not fit the state's qubit count.
    #[error("basis value {value} does not fit in {num_qubits} qubits")]
    BasisOutOfRange {
        /// The requested basis value.
        value: u64,
        /// Number of qubits in the state.
        num_qubits: u32,
    },
}

/// Result type for executor operations.
pub type SimResult<T> = Result<T, SimError>;
