//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur while assembling or transforming circuits.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A gate references a qubit index outside its enclosing block's width.
    #[error("block '{block}' step {step}: gate '{gate}' references qubit q{qubit} but block width is {width}")]
    IndexOutOfRange {
        /// Name of the enclosing block.
        block: String,
        /// Position of the offending step within the block.
        step: usize,
        /// Name of the offending gate.
        gate: String,
        /// The out-of-range qubit index.
        qubit: u32,
        /// Declared width of the block.
        width: u32,
    },

    /// Caller-supplied register ranges violate a documented layout precondition.
    #[error("register layout violation: {reason}")]
    RegisterLayoutViolation {
        /// The concrete relation that was violated.
        reason: String,
    },

    /// Inversion was requested on a primitive with no defined adjoint.
    #[error("gate '{gate}' has no defined adjoint")]
    Uninvertible {
        /// Name of the gate that cannot be inverted.
        gate: String,
    },

    /// A composite left its ancilla qubit in a nonzero state.
    ///
    /// The IR itself never inspects qubit values; this variant is produced
    /// by executors that verify a composite's ancilla postcondition.
    #[error("block '{block}' left ancilla qubit q{qubit} in a nonzero state")]
    AncillaNotReset {
        /// Name of the offending block.
        block: String,
        /// The ancilla qubit index.
        qubit: u32,
    },

    /// A gate has no defined multiply-controlled form.
    #[error("gate '{gate}' has no defined multiply-controlled form")]
    ControlExtension {
        /// Name of the gate that cannot be control-extended.
        gate: String,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
