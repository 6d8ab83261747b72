//! Quantum gate types.
//!
//! [`Gate`] is a closed tagged enum over the primitive catalog plus one open
//! extension point, [`Gate::Composite`], which wraps an entire [`Block`] so
//! that sub-circuits can be nested wherever a single gate is expected.
//! Gates are immutable value-like descriptors; they carry no simulation
//! state, and their qubit indices are meaningful only relative to the block
//! they are placed in.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::block::Block;
use crate::error::{IrError, IrResult};
use crate::opcode::TransportOp;
use crate::qubit::QubitId;
use crate::register::QubitRange;
use crate::step::Step;

/// A single quantum operation acting on one or more qubit indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// Pauli-X (bit flip).
    X {
        /// Target qubit.
        target: QubitId,
    },
    /// Pauli-Y.
    Y {
        /// Target qubit.
        target: QubitId,
    },
    /// Pauli-Z.
    Z {
        /// Target qubit.
        target: QubitId,
    },
    /// Hadamard.
    H {
        /// Target qubit.
        target: QubitId,
    },
    /// Controlled-X (CNOT).
    Cx {
        /// Control qubit.
        control: QubitId,
        /// Target qubit.
        target: QubitId,
    },
    /// Multiply-controlled X: flips `target` when every control is set.
    ///
    /// This is the explicit control-extension ladder above [`Gate::Cx`];
    /// extending it again simply grows the control list.
    Mcx {
        /// Control qubits (all must be set).
        controls: Vec<QubitId>,
        /// Target qubit.
        target: QubitId,
    },
    /// Exchange two qubits.
    Swap {
        /// First qubit.
        a: QubitId,
        /// Second qubit.
        b: QubitId,
    },
    /// Computational-basis measurement. The one genuinely irreversible leaf.
    Measure {
        /// Measured qubit.
        target: QubitId,
    },
    /// In-place register addition: `x ← x + y mod 2^len`, `y` unchanged.
    ///
    /// A black-box reversible arithmetic primitive. Like [`Gate::Mcx`], it
    /// carries an explicit control ladder: extending an already-controlled
    /// adder grows the list.
    Add {
        /// Accumulator register.
        x: QubitRange,
        /// Addend register.
        y: QubitRange,
        /// Control qubits (all must be set).
        controls: Vec<QubitId>,
    },
    /// In-place register subtraction: `x ← x - y mod 2^len`. Adjoint of [`Gate::Add`].
    Sub {
        /// Accumulator register.
        x: QubitRange,
        /// Subtrahend register.
        y: QubitRange,
        /// Control qubits (all must be set).
        controls: Vec<QubitId>,
    },
    /// In-place constant addition: `reg ← reg + value mod 2^len`.
    ///
    /// A negative `value` subtracts, which is how the adjoint is expressed.
    AddConst {
        /// Target register.
        reg: QubitRange,
        /// Signed constant to add.
        value: i64,
        /// Control qubits (all must be set).
        controls: Vec<QubitId>,
    },
    /// A whole sub-circuit used as a single gate, optionally controlled.
    Composite(CompositeGate),
}

impl Gate {
    /// Pauli-X on `target`.
    pub fn x(target: impl Into<QubitId>) -> Self {
        Gate::X {
            target: target.into(),
        }
    }

    /// Pauli-Y on `target`.
    pub fn y(target: impl Into<QubitId>) -> Self {
        Gate::Y {
            target: target.into(),
        }
    }

    /// Pauli-Z on `target`.
    pub fn z(target: impl Into<QubitId>) -> Self {
        Gate::Z {
            target: target.into(),
        }
    }

    /// Hadamard on `target`.
    pub fn h(target: impl Into<QubitId>) -> Self {
        Gate::H {
            target: target.into(),
        }
    }

    /// CNOT with the given control and target.
    pub fn cx(control: impl Into<QubitId>, target: impl Into<QubitId>) -> Self {
        Gate::Cx {
            control: control.into(),
            target: target.into(),
        }
    }

    /// Multiply-controlled X.
    pub fn mcx(controls: impl IntoIterator<Item = QubitId>, target: impl Into<QubitId>) -> Self {
        Gate::Mcx {
            controls: controls.into_iter().collect(),
            target: target.into(),
        }
    }

    /// SWAP of two qubits.
    pub fn swap(a: impl Into<QubitId>, b: impl Into<QubitId>) -> Self {
        Gate::Swap {
            a: a.into(),
            b: b.into(),
        }
    }

    /// Measurement of `target`.
    pub fn measure(target: impl Into<QubitId>) -> Self {
        Gate::Measure {
            target: target.into(),
        }
    }

    /// In-place register adder `x ← x + y`.
    pub fn add(x: QubitRange, y: QubitRange) -> Self {
        Gate::Add {
            x,
            y,
            controls: vec![],
        }
    }

    /// In-place register subtractor `x ← x - y`.
    pub fn sub(x: QubitRange, y: QubitRange) -> Self {
        Gate::Sub {
            x,
            y,
            controls: vec![],
        }
    }

    /// In-place constant adder `reg ← reg + value`.
    pub fn add_const(reg: QubitRange, value: i64) -> Self {
        Gate::AddConst {
            reg,
            value,
            controls: vec![],
        }
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        match self {
            Gate::X { .. } => "x",
            Gate::Y { .. } => "y",
            Gate::Z { .. } => "z",
            Gate::H { .. } => "h",
            Gate::Cx { .. } => "cx",
            Gate::Mcx { .. } => "mcx",
            Gate::Swap { .. } => "swap",
            Gate::Measure { .. } => "measure",
            Gate::Add { .. } => "add",
            Gate::Sub { .. } => "sub",
            Gate::AddConst { .. } => "add_const",
            Gate::Composite(c) => c.block.name(),
        }
    }

    /// The primary qubit index of this gate.
    ///
    /// For a composite this is the offset at which the wrapped block is
    /// placed inside its parent.
    pub fn main_qubit(&self) -> QubitId {
        match self {
            Gate::X { target }
            | Gate::Y { target }
            | Gate::Z { target }
            | Gate::H { target }
            | Gate::Cx { target, .. }
            | Gate::Mcx { target, .. }
            | Gate::Measure { target } => *target,
            Gate::Swap { a, .. } => *a,
            Gate::Add { x, .. } | Gate::Sub { x, .. } => x.start(),
            Gate::AddConst { reg, .. } => reg.start(),
            Gate::Composite(c) => QubitId(c.offset),
        }
    }

    /// Every qubit index this gate touches.
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::X { target }
            | Gate::Y { target }
            | Gate::Z { target }
            | Gate::H { target }
            | Gate::Measure { target } => vec![*target],
            Gate::Cx { control, target } => vec![*control, *target],
            Gate::Mcx { controls, target } => {
                let mut qs = controls.clone();
                qs.push(*target);
                qs
            }
            Gate::Swap { a, b } => vec![*a, *b],
            Gate::Add { x, y, controls } | Gate::Sub { x, y, controls } => {
                let mut qs: Vec<_> = x.iter().chain(y.iter()).collect();
                qs.extend_from_slice(controls);
                qs
            }
            Gate::AddConst { reg, controls, .. } => {
                let mut qs: Vec<_> = reg.iter().collect();
                qs.extend_from_slice(controls);
                qs
            }
            Gate::Composite(c) => {
                let mut qs: Vec<_> = (c.offset..c.offset + c.block.width())
                    .map(QubitId)
                    .collect();
                qs.extend(c.control);
                qs
            }
        }
    }

    /// Highest qubit index this gate touches, if it touches any.
    ///
    /// `None` only for an uncontrolled composite wrapping a zero-width
    /// block; every other gate acts on at least one qubit.
    pub fn max_qubit(&self) -> Option<QubitId> {
        self.qubits().into_iter().max()
    }

    /// Produce the adjoint of this gate.
    ///
    /// Self-inverse primitives return themselves; arithmetic primitives
    /// supply their semantically negated counterpart; a composite inverts
    /// its wrapped block (reversed steps, each gate inverted) while keeping
    /// offset and control. [`Gate::Measure`] rejects with
    /// [`IrError::Uninvertible`].
    pub fn inverse(&self) -> IrResult<Gate> {
        match self {
            Gate::X { .. }
            | Gate::Y { .. }
            | Gate::Z { .. }
            | Gate::H { .. }
            | Gate::Cx { .. }
            | Gate::Mcx { .. }
            | Gate::Swap { .. } => Ok(self.clone()),
            Gate::Measure { .. } => Err(IrError::Uninvertible {
                gate: self.name().to_string(),
            }),
            Gate::Add { x, y, controls } => Ok(Gate::Sub {
                x: *x,
                y: *y,
                controls: controls.clone(),
            }),
            Gate::Sub { x, y, controls } => Ok(Gate::Add {
                x: *x,
                y: *y,
                controls: controls.clone(),
            }),
            Gate::AddConst {
                reg,
                value,
                controls,
            } => Ok(Gate::AddConst {
                reg: *reg,
                value: -value,
                controls: controls.clone(),
            }),
            Gate::Composite(c) => Ok(Gate::Composite(c.inverse()?)),
        }
    }

    /// Produce the control-extended form of this gate.
    ///
    /// Each variant defines its multiply-controlled form explicitly:
    /// X grows to CNOT, CNOT to MCX, and MCX and the arithmetic primitives
    /// gain one more entry on their control ladder. Variants with no
    /// defined form reject with [`IrError::ControlExtension`]. Callers are
    /// responsible for keeping `control` disjoint from the qubits the gate
    /// acts on.
    pub fn controlled(&self, control: QubitId) -> IrResult<Gate> {
        match self {
            Gate::X { target } => Ok(Gate::Cx {
                control,
                target: *target,
            }),
            Gate::Cx {
                control: c0,
                target,
            } => Ok(Gate::Mcx {
                controls: vec![*c0, control],
                target: *target,
            }),
            Gate::Mcx { controls, target } => {
                let mut controls = controls.clone();
                controls.push(control);
                Ok(Gate::Mcx {
                    controls,
                    target: *target,
                })
            }
            Gate::Add { x, y, controls } => {
                let mut controls = controls.clone();
                controls.push(control);
                Ok(Gate::Add {
                    x: *x,
                    y: *y,
                    controls,
                })
            }
            Gate::Sub { x, y, controls } => {
                let mut controls = controls.clone();
                controls.push(control);
                Ok(Gate::Sub {
                    x: *x,
                    y: *y,
                    controls,
                })
            }
            Gate::AddConst {
                reg,
                value,
                controls,
            } => {
                let mut controls = controls.clone();
                controls.push(control);
                Ok(Gate::AddConst {
                    reg: *reg,
                    value: *value,
                    controls,
                })
            }
            Gate::Composite(c) if c.control.is_none() => {
                Ok(Gate::Composite(c.clone().with_control(control)?))
            }
            _ => Err(IrError::ControlExtension {
                gate: self.name().to_string(),
            }),
        }
    }

    /// This gate with every qubit index shifted up by `offset`.
    pub fn shifted(&self, offset: u32) -> Gate {
        match self {
            Gate::X { target } => Gate::X {
                target: target.shifted(offset),
            },
            Gate::Y { target } => Gate::Y {
                target: target.shifted(offset),
            },
            Gate::Z { target } => Gate::Z {
                target: target.shifted(offset),
            },
            Gate::H { target } => Gate::H {
                target: target.shifted(offset),
            },
            Gate::Cx { control, target } => Gate::Cx {
                control: control.shifted(offset),
                target: target.shifted(offset),
            },
            Gate::Mcx { controls, target } => Gate::Mcx {
                controls: controls.iter().map(|c| c.shifted(offset)).collect(),
                target: target.shifted(offset),
            },
            Gate::Swap { a, b } => Gate::Swap {
                a: a.shifted(offset),
                b: b.shifted(offset),
            },
            Gate::Measure { target } => Gate::Measure {
                target: target.shifted(offset),
            },
            Gate::Add { x, y, controls } => Gate::Add {
                x: x.shifted(offset),
                y: y.shifted(offset),
                controls: controls.iter().map(|c| c.shifted(offset)).collect(),
            },
            Gate::Sub { x, y, controls } => Gate::Sub {
                x: x.shifted(offset),
                y: y.shifted(offset),
                controls: controls.iter().map(|c| c.shifted(offset)).collect(),
            },
            Gate::AddConst {
                reg,
                value,
                controls,
            } => Gate::AddConst {
                reg: reg.shifted(offset),
                value: *value,
                controls: controls.iter().map(|c| c.shifted(offset)).collect(),
            },
            Gate::Composite(c) => Gate::Composite(CompositeGate {
                block: Arc::clone(&c.block),
                offset: c.offset + offset,
                control: c.control.map(|q| q.shifted(offset)),
            }),
        }
    }

    /// The transport opcode this primitive maps to, if any.
    ///
    /// Composites and arithmetic gates return `None`; they must be
    /// flattened to primitives before being played over a transport.
    pub fn transport_opcode(&self) -> Option<TransportOp> {
        match self {
            Gate::X { .. } => Some(TransportOp::X),
            Gate::Y { .. } => Some(TransportOp::Y),
            Gate::Z { .. } => Some(TransportOp::Z),
            Gate::H { .. } => Some(TransportOp::H),
            Gate::Cx { .. } => Some(TransportOp::Cnot),
            Gate::Measure { .. } => Some(TransportOp::Measure),
            _ => None,
        }
    }
}

impl From<CompositeGate> for Gate {
    fn from(composite: CompositeGate) -> Self {
        Gate::Composite(composite)
    }
}

/// A sub-circuit adapted for use as a single gate.
///
/// Unifies the "block as gate" and "controlled block as gate" shapes: the
/// positional mapping sends qubit `i` of the wrapped block to qubit
/// `offset + i` of the parent, and when `control` is present the whole
/// sub-circuit is conditioned on that qubit (an index in the *parent's*
/// space). The wrapped block is held behind an [`Arc`] so several parents
/// can reuse one child without copying; it must not be mutated once wrapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeGate {
    pub(crate) block: Arc<Block>,
    pub(crate) offset: u32,
    pub(crate) control: Option<QubitId>,
}

impl CompositeGate {
    /// Wrap `block` so it executes at qubit offset `offset` of its parent.
    pub fn new(block: impl Into<Arc<Block>>, offset: u32) -> Self {
        Self {
            block: block.into(),
            offset,
            control: None,
        }
    }

    /// Condition the whole sub-circuit on `control`.
    ///
    /// Conceptually the block executes iff `control` is set; structurally
    /// every primitive inside is rewritten into its control-extended form
    /// when the composite is expanded. The rewrite is validated here, at
    /// construction, so a block containing a primitive with no controlled
    /// form is rejected eagerly rather than at execution. Disjointness of
    /// `control` from the block's own qubits is a documented precondition,
    /// not validated here.
    pub fn with_control(mut self, control: QubitId) -> IrResult<Self> {
        self.control = Some(control);
        self.expanded_steps()?;
        Ok(self)
    }

    /// The wrapped block.
    pub fn block(&self) -> &Block {
        &self.block
    }

    /// Offset of the wrapped block inside the parent's qubit space.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Control qubit, if the sub-circuit is conditioned.
    pub fn control(&self) -> Option<QubitId> {
        self.control
    }

    /// Width footprint of the wrapped block.
    pub fn width(&self) -> u32 {
        self.block.width()
    }

    /// Adjoint: the control applied to the wrapped block's inverse.
    pub fn inverse(&self) -> IrResult<CompositeGate> {
        Ok(CompositeGate {
            block: Arc::new(self.block.inverse()?),
            offset: self.offset,
            control: self.control,
        })
    }

    /// Expand into offset-mapped, control-extended primitive steps.
    ///
    /// This is the structural transform behind controlled sub-circuits:
    /// the wrapped block is flattened recursively, every gate is shifted
    /// into the parent's qubit space, and when a control is present each
    /// gate is replaced by its controlled form.
    pub fn expanded_steps(&self) -> IrResult<Vec<Step>> {
        let flat = self.block.flatten()?;
        let mut steps = Vec::with_capacity(flat.steps().len());
        for step in flat.steps() {
            let mut out = Step::new();
            for gate in step.gates() {
                let mut gate = gate.shifted(self.offset);
                if let Some(control) = self.control {
                    gate = gate.controlled(control)?;
                }
                out.push(gate);
            }
            steps.push(out);
        }
        Ok(steps)
    }
}
