//! Composite reversible arithmetic circuits.
//!
//! Builders here assemble [`Block`]s out of the black-box arithmetic
//! primitives ([`Gate::Add`], [`Gate::AddConst`]) plus controlled and
//! inverted sub-circuits. They are the stress test of the composition
//! algebra: getting step ordering, inversion, or ancilla bookkeeping wrong
//! here produces circuits that are numerically wrong rather than visibly
//! broken.

use crate::block::Block;
use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::qubit::QubitId;
use crate::register::QubitRange;
use crate::step::Step;

/// Build the in-place register adder `x ← x + y mod 2^len` as a block.
///
/// The block spans `2 * len` qubits in local coordinates: `x` at
/// `[0, len)`, `y` at `[len, 2*len)`. `y` is unchanged.
pub fn add_block(len: u32) -> IrResult<Block> {
    if len == 0 {
        return Err(IrError::RegisterLayoutViolation {
            reason: "adder register length must be at least 1".into(),
        });
    }
    let x = QubitRange::new(0u32, len - 1)?;
    let y = QubitRange::new(len, 2 * len - 1)?;
    let mut block = Block::new("add", 2 * len);
    block.add_step(Step::from(Gate::add(x, y)))?;
    Ok(block)
}

/// Build the in-place constant adder `reg ← reg + value mod 2^len` as a
/// block spanning `len` qubits in local coordinates.
pub fn add_const_block(len: u32, value: i64) -> IrResult<Block> {
    if len == 0 {
        return Err(IrError::RegisterLayoutViolation {
            reason: "adder register length must be at least 1".into(),
        });
    }
    let reg = QubitRange::new(0u32, len - 1)?;
    let mut block = Block::new("add_const", len);
    block.add_step(Step::from(Gate::add_const(reg, value)))?;
    Ok(block)
}

/// Build the modular adder: `x ← (x + y) mod modulus`, `y` unchanged.
///
/// `x` and `y` are same-length registers with `y` beginning immediately
/// after `x` ends; the qubit immediately after `y` is the overflow ancilla,
/// required to be `0` on entry and guaranteed to be `0` again on exit. Both
/// operands must lie in `[0, modulus)`, which together with the modulus
/// bound below keeps each register's top qubit clear on entry.
///
/// The returned block is expressed in local coordinates (qubit 0 is
/// `x.start()`) and spans `y.end() - x.start() + 2` qubits, the ancilla
/// last; place it at `x.start()` via [`Block::as_gate`] when the registers
/// do not start at qubit 0.
///
/// Layout preconditions, rejected eagerly with
/// [`IrError::RegisterLayoutViolation`] before any step is built:
/// - `y` must begin immediately after `x` (`y0 = x1 + 1`),
/// - the registers must have equal length `n`,
/// - `modulus` must satisfy `1 <= modulus <= 2^(n-1)`, so that the
///   underflow sign is readable from the register's top qubit.
///
/// # Example
///
/// ```rust
/// use braid_ir::arith::mod_add;
/// use braid_ir::QubitRange;
///
/// let x = QubitRange::new(0u32, 3u32).unwrap();
/// let y = QubitRange::new(4u32, 7u32).unwrap();
/// let block = mod_add(x, y, 5).unwrap();
/// assert_eq!(block.width(), 9); // both registers plus the ancilla
/// assert_eq!(block.len(), 8);   // the eight-step sequence
/// ```
pub fn mod_add(x: QubitRange, y: QubitRange, modulus: u64) -> IrResult<Block> {
    if !y.follows(&x) {
        return Err(IrError::RegisterLayoutViolation {
            reason: format!(
                "register y {y} must begin immediately after register x {x} ends",
            ),
        });
    }
    if x.len() != y.len() {
        return Err(IrError::RegisterLayoutViolation {
            reason: format!(
                "registers must have equal length, got x {} and y {}",
                x.len(),
                y.len(),
            ),
        });
    }
    let n = x.len();
    let fits = modulus <= i64::MAX as u64
        && match 1u128.checked_shl(n - 1) {
            Some(limit) => u128::from(modulus) <= limit,
            None => true,
        };
    if modulus == 0 || !fits {
        return Err(IrError::RegisterLayoutViolation {
            reason: format!(
                "modulus {modulus} does not fit a {n}-qubit register (need 1 <= modulus <= 2^{})",
                n - 1,
            ),
        });
    }

    // Local coordinates: x at [0, n), y at [n, 2n), ancilla last.
    let lx = QubitRange::new(0u32, n - 1)?;
    let ly = QubitRange::new(n, 2 * n - 1)?;
    let width = 2 * n + 1;
    let ancilla = QubitId(width - 1);
    let constant = modulus as i64;

    let mut block = Block::new("mod_add", width);

    // x ← x + y; may exceed the modulus.
    block.add_step(Step::from(Gate::add(lx, ly)))?;
    // x ← x - N; underflows below zero exactly when x + y < N.
    block.add_step(Step::from(Gate::add_const(lx, constant).inverse()?))?;
    // Copy the sign (top qubit of x) into the ancilla.
    block.add_step(Step::from(Gate::cx(lx.end(), ancilla)))?;
    // Underflowed: add N back, conditioned on the ancilla.
    block.add_step(Step::from(
        add_const_block(n, constant)?.as_controlled_gate(0, ancilla)?,
    ))?;
    // Uncompute step 1 so the ancilla condition becomes readable from x:
    // x - y is negative exactly when x + y >= N held originally.
    block.add_step(Step::from(Gate::add(lx, ly).inverse()?))?;
    // Flip the ancilla polarity; now it is set in the x + y >= N branch.
    block.add_step(Step::from(Gate::x(ancilla)))?;
    // Reset: flip the ancilla back, conditioned on the top qubit of x,
    // which is set in exactly the same branch.
    let mut flip = Block::new("ancilla_flip", 1);
    flip.add_step(Step::from(Gate::x(0u32)))?;
    block.add_step(Step::from(
        flip.as_controlled_gate(ancilla.0, lx.end())?,
    ))?;
    // Redo step 1, leaving x = (x + y) mod N.
    block.add_step(Step::from(Gate::add(lx, ly)))?;

    Ok(block)
}
