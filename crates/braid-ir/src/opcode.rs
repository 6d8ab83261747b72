//! Transport opcode catalog.
//!
//! The classical-control transport for remote quantum-network nodes speaks a
//! small fixed catalog of commands, each identified by a one-byte opcode.
//! The catalog is mirrored here so any flattened block can be played over
//! such a session gate-by-gate; the wire protocol itself (headers, framing,
//! blocking acknowledgements) lives outside this crate.

use serde::{Deserialize, Serialize};

/// A command in the transport's opcode catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TransportOp {
    /// Allocate a fresh qubit on the node.
    New = 1,
    /// Measure a qubit.
    Measure = 2,
    /// Pauli-X.
    X = 10,
    /// Pauli-Z.
    Z = 11,
    /// Pauli-Y.
    Y = 12,
    /// Hadamard.
    H = 17,
    /// Two-qubit controlled-not.
    Cnot = 20,
    /// Release a qubit back to the node.
    Release = 23,
}

impl TransportOp {
    /// The wire byte for this command.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Decode a wire byte, if it names a known command.
    pub fn from_code(code: u8) -> Option<TransportOp> {
        match code {
            1 => Some(TransportOp::New),
            2 => Some(TransportOp::Measure),
            10 => Some(TransportOp::X),
            11 => Some(TransportOp::Z),
            12 => Some(TransportOp::Y),
            17 => Some(TransportOp::H),
            20 => Some(TransportOp::Cnot),
            23 => Some(TransportOp::Release),
            _ => None,
        }
    }

    /// Get the name of this command.
    pub fn name(self) -> &'static str {
        match self {
            TransportOp::New => "new",
            TransportOp::Measure => "measure",
            TransportOp::X => "x",
            TransportOp::Z => "z",
            TransportOp::Y => "y",
            TransportOp::H => "h",
            TransportOp::Cnot => "cnot",
            TransportOp::Release => "release",
        }
    }
}
