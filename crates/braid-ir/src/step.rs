//! Timestep groupings of gates.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::IrResult;
use crate::gate::Gate;
use crate::qubit::QubitId;

/// A set of gates intended to execute together at one logical timestep.
///
/// The gates are kept in insertion order for determinism. Gates within one
/// step should act on disjoint qubit indices; the model does not enforce
/// this structurally (see [`Step::targets_disjoint`]), but the parallel
/// semantics of a step depend on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    gates: Vec<Gate>,
}

impl Step {
    /// Create an empty step.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a step holding the given gates.
    pub fn with_gates(gates: impl IntoIterator<Item = Gate>) -> Self {
        Self {
            gates: gates.into_iter().collect(),
        }
    }

    /// Append a gate to the step.
    pub fn push(&mut self, gate: Gate) -> &mut Self {
        self.gates.push(gate);
        self
    }

    /// The gates in this step, in insertion order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Number of gates in the step.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Whether the step holds no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Highest qubit index referenced by any gate in the step.
    pub fn max_qubit(&self) -> Option<QubitId> {
        self.gates.iter().filter_map(Gate::max_qubit).max()
    }

    /// Whether the gates in this step touch pairwise-disjoint qubits.
    ///
    /// Diagnostic only; a `false` result means the step's parallel
    /// semantics are ill-defined.
    pub fn targets_disjoint(&self) -> bool {
        let mut seen = FxHashSet::default();
        for gate in &self.gates {
            for qubit in gate.qubits() {
                if !seen.insert(qubit) {
                    return false;
                }
            }
        }
        true
    }

    /// Invert every gate in the step.
    ///
    /// Gates within a step are simultaneous, so inversion is element-wise;
    /// only the enclosing block reverses ordering.
    pub fn inverse(&self) -> IrResult<Step> {
        let gates = self
            .gates
            .iter()
            .map(Gate::inverse)
            .collect::<IrResult<Vec<_>>>()?;
        Ok(Step { gates })
    }
}

impl From<Gate> for Step {
    fn from(gate: Gate) -> Self {
        Step { gates: vec![gate] }
    }
}

impl FromIterator<Gate> for Step {
    fn from_iter<I: IntoIterator<Item = Gate>>(iter: I) -> Self {
        Step::with_gates(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order_preserved() {
        let step = Step::with_gates([Gate::x(0u32), Gate::h(1u32), Gate::z(2u32)]);
        let names: Vec<_> = step.gates().iter().map(Gate::name).collect();
        assert_eq!(names, ["x", "h", "z"]);
    }

    #[test]
    fn test_disjointness_diagnostic() {
        let ok = Step::with_gates([Gate::x(0u32), Gate::cx(1u32, 2u32)]);
        assert!(ok.targets_disjoint());

        let clash = Step::with_gates([Gate::x(0u32), Gate::cx(0u32, 1u32)]);
        assert!(!clash.targets_disjoint());
    }

    #[test]
    fn test_step_inverse_is_elementwise() {
        let x = crate::register::QubitRange::new(0u32, 1u32).unwrap();
        let y = crate::register::QubitRange::new(2u32, 3u32).unwrap();
        let step = Step::with_gates([Gate::h(4u32), Gate::add(x, y)]);
        let inv = step.inverse().unwrap();
        assert_eq!(inv.gates()[0], Gate::h(4u32));
        assert_eq!(inv.gates()[1], Gate::sub(x, y));
    }

    #[test]
    fn test_step_inverse_propagates_uninvertible() {
        let step = Step::from(Gate::measure(0u32));
        assert!(step.inverse().is_err());
    }
}
