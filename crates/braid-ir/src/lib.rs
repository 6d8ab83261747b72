//! Braid Circuit Intermediate Representation
//!
//! This crate provides the circuit IR and composition algebra for building
//! large reversible quantum circuits out of small, individually verified
//! reversible primitives.
//!
//! # Overview
//!
//! Circuits are built structurally, with no execution involved: leaf
//! [`Gate`]s are grouped into [`Step`]s (one timestep each), steps are
//! ordered into named fixed-width [`Block`]s, and blocks are wrapped back
//! into gates — optionally conditioned on a control qubit — so they can be
//! nested inside larger blocks. Every gate and block can produce its
//! adjoint, which is what makes scratch-qubit uncomputation mechanical.
//!
//! # Core Components
//!
//! - **Addressing**: [`QubitId`] indices and [`QubitRange`] register ranges
//!   with constructor-checked layout predicates
//! - **Gates**: the closed [`Gate`] enum — primitives, black-box reversible
//!   arithmetic, and [`CompositeGate`] for nesting whole blocks
//! - **Steps and Blocks**: [`Step`] timestep groupings ordered into
//!   [`Block`] sub-circuits with width enforced at assembly
//! - **Inversion**: `inverse()` on every gate and block; blocks invert by
//!   reversing step order and inverting each element, recursively
//! - **Arithmetic composites**: [`arith::mod_add`] and friends
//! - **Boundaries**: the [`Executor`] trait and the [`TransportOp`] opcode
//!   catalog primitive gates map onto
//!
//! # Example: compose, control, invert
//!
//! ```rust
//! use braid_ir::{Block, Gate, Step};
//!
//! // A two-qubit sub-circuit.
//! let mut bell = Block::new("bell", 2);
//! bell.add_step(Step::from(Gate::h(0u32))).unwrap();
//! bell.add_step(Step::from(Gate::cx(0u32, 1u32))).unwrap();
//!
//! // Nest it at qubit offset 1 of a wider block.
//! let mut outer = Block::new("outer", 3);
//! outer.add_gate(bell.clone().as_gate(1)).unwrap();
//!
//! // Mechanical uncomputation: reversed steps, each gate inverted.
//! let undo = bell.inverse().unwrap();
//! assert_eq!(undo.steps()[0].gates()[0], Gate::cx(0u32, 1u32));
//! assert_eq!(undo.steps()[1].gates()[0], Gate::h(0u32));
//! ```
//!
//! # Example: a controlled sub-circuit
//!
//! ```rust
//! use braid_ir::{Block, Gate, QubitId};
//!
//! let mut body = Block::new("body", 1);
//! body.add_gate(Gate::x(0u32)).unwrap();
//!
//! // Conditioning is structural: when expanded, the X becomes a CNOT
//! // from the control — there is no runtime branching.
//! let mut outer = Block::new("outer", 2);
//! outer
//!     .add_gate(body.as_controlled_gate(0, QubitId(1)).unwrap())
//!     .unwrap();
//!
//! let flat = outer.flatten().unwrap();
//! assert_eq!(flat.steps()[0].gates()[0], Gate::cx(1u32, 0u32));
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `H` | 1 | Hadamard gate |
//! | `Cx` | 2 | Controlled-NOT |
//! | `Mcx` | 1+k | Multiply-controlled X |
//! | `Swap` | 2 | SWAP gate |
//! | `Measure` | 1 | Basis measurement (uninvertible) |
//! | `Add`, `Sub` | 2n | In-place register adder and its adjoint |
//! | `AddConst` | n | In-place constant adder |
//! | `Composite` | n | A whole block, optionally controlled |

pub mod arith;
pub mod block;
pub mod error;
pub mod executor;
pub mod gate;
pub mod opcode;
pub mod qubit;
pub mod register;
pub mod step;

pub use block::Block;
pub use error::{IrError, IrResult};
pub use executor::Executor;
pub use gate::{CompositeGate, Gate};
pub use opcode::TransportOp;
pub use qubit::QubitId;
pub use register::QubitRange;
pub use step::Step;
