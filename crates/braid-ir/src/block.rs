//! Named, fixed-width sub-circuits.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{CompositeGate, Gate};
use crate::qubit::QubitId;
use crate::step::Step;

/// A named, fixed-width, ordered sequence of [`Step`]s — the unit of reuse
/// and composition.
///
/// The width is declared at construction and never inferred from the gates
/// added; appending a step whose gates reach past the width fails
/// immediately with [`IrError::IndexOutOfRange`]. Steps execute strictly in
/// the order they were added — no reordering or optimization is performed,
/// because reversible-circuit correctness depends on exact sequencing.
///
/// A block is built by sequential [`Block::add_step`] calls and treated as
/// immutable once it is wrapped into a [`CompositeGate`] for nesting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    name: String,
    width: u32,
    steps: Vec<Step>,
}

impl Block {
    /// Create an empty block defined over `width` qubits.
    pub fn new(name: impl Into<String>, width: u32) -> Self {
        Self {
            name: name.into(),
            width,
            steps: vec![],
        }
    }

    /// Append a step to the block's program.
    ///
    /// Order is preserved exactly as authored. Every qubit index referenced
    /// by the step must be below the block's width.
    pub fn add_step(&mut self, step: Step) -> IrResult<&mut Self> {
        if let Some(max) = step.max_qubit() {
            if max.0 >= self.width {
                // Identify the offending gate for the error message.
                let gate = step
                    .gates()
                    .iter()
                    .find(|g| g.max_qubit() == Some(max))
                    .map(|g| g.name().to_string())
                    .unwrap_or_default();
                return Err(IrError::IndexOutOfRange {
                    block: self.name.clone(),
                    step: self.steps.len(),
                    gate,
                    qubit: max.0,
                    width: self.width,
                });
            }
        }
        self.steps.push(step);
        Ok(self)
    }

    /// Append a step holding a single gate.
    pub fn add_gate(&mut self, gate: Gate) -> IrResult<&mut Self> {
        self.add_step(Step::from(gate))
    }

    /// Diagnostic name of the block.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of qubits the block is defined over.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The block's steps, in program order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps in the block.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the block holds no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Produce the block that undoes this one.
    ///
    /// Step order is reversed and every gate inside each step is replaced
    /// by its own adjoint. The law holds recursively through nested
    /// composites: a controlled sub-circuit inverts to the control applied
    /// to the sub-circuit's inverse.
    pub fn inverse(&self) -> IrResult<Block> {
        let steps = self
            .steps
            .iter()
            .rev()
            .map(Step::inverse)
            .collect::<IrResult<Vec<_>>>()?;
        Ok(Block {
            name: format!("{}_dg", self.name),
            width: self.width,
            steps,
        })
    }

    /// Expand every nested composite into primitive steps.
    ///
    /// Composites are replaced by their wrapped block's steps, shifted into
    /// this block's qubit space and control-extended where a control is
    /// present. Primitive gates pass through untouched. The result contains
    /// no [`Gate::Composite`] and is what executors and transports walk.
    pub fn flatten(&self) -> IrResult<Block> {
        let mut out = Block::new(self.name.clone(), self.width);
        for step in &self.steps {
            let mut plain = Step::new();
            for gate in step.gates() {
                match gate {
                    Gate::Composite(c) => {
                        if !plain.is_empty() {
                            out.add_step(std::mem::take(&mut plain))?;
                        }
                        for expanded in c.expanded_steps()? {
                            out.add_step(expanded)?;
                        }
                    }
                    g => {
                        plain.push(g.clone());
                    }
                }
            }
            if !plain.is_empty() {
                out.add_step(plain)?;
            }
        }
        Ok(out)
    }

    /// Wrap this block as a gate placed at qubit offset `offset`.
    pub fn as_gate(self, offset: u32) -> Gate {
        Gate::Composite(CompositeGate::new(self, offset))
    }

    /// Wrap this block as a gate at `offset`, conditioned on `control`.
    ///
    /// `control` is an index in the parent's qubit space and must not
    /// overlap the qubits the block itself occupies.
    pub fn as_controlled_gate(self, offset: u32, control: QubitId) -> IrResult<Gate> {
        Ok(Gate::Composite(
            CompositeGate::new(self, offset).with_control(control)?,
        ))
    }
}
