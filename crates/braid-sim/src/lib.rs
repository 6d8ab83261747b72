//! `braid-sim` — dense state-vector executor for Braid circuits.
//!
//! Implements the [`braid_ir::Executor`] boundary: takes finished
//! [`braid_ir::Block`]s, flattens their nested composites, and applies each
//! step strictly in program order to a [`StateVector`]. The IR stays purely
//! structural; everything that actually touches amplitudes lives here.
//!
//! # Quick start
//!
//! ```rust
//! use braid_ir::QubitRange;
//! use braid_ir::arith::mod_add;
//! use braid_sim::StateVector;
//!
//! // (3 + 4) mod 5 on two 4-qubit registers plus one ancilla.
//! let x = QubitRange::new(0u32, 3u32).unwrap();
//! let y = QubitRange::new(4u32, 7u32).unwrap();
//! let block = mod_add(x, y, 5).unwrap();
//!
//! let mut state = StateVector::from_basis(9, 3 | (4 << 4)).unwrap();
//! state.run(&block).unwrap();
//!
//! assert_eq!(state.basis_value(), Some(2 | (4 << 4))); // x' = 2, y' = 4
//! ```

pub mod error;
pub mod statevector;

pub use error::{SimError, SimResult};
pub use statevector::StateVector;
