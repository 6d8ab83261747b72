//! The executor boundary.

use crate::block::Block;
use crate::gate::Gate;

/// Something that applies finished circuits to quantum state.
///
/// The IR does not care how execution happens — a local state-vector
/// engine and a remote transport session are equally valid implementors.
/// Execution is logically sequential: implementations must walk a block's
/// steps strictly in program order, since later steps may depend on qubit
/// states set by earlier ones.
pub trait Executor {
    /// Failure type reported by this executor.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Apply a single gate.
    fn apply_gate(&mut self, gate: &Gate) -> Result<(), Self::Error>;

    /// Execute a finished block, steps strictly in order.
    fn run_block(&mut self, block: &Block) -> Result<(), Self::Error>;
}
