//! Dense state-vector execution of flattened blocks.

use num_complex::Complex64;
use rand::Rng;
use std::f64::consts::FRAC_1_SQRT_2;
use tracing::{debug, trace};

use braid_ir::{Block, Executor, Gate, IrError, QubitId, QubitRange};

use crate::error::{SimError, SimResult};

/// Amplitude tolerance for basis-state and ancilla checks.
const EPS: f64 = 1e-9;

/// Largest state we are willing to allocate (2^30 amplitudes).
const MAX_QUBITS: u32 = 30;

/// A dense state vector over `num_qubits` qubits.
///
/// Basis convention: qubit `i` is bit `i` of the basis index, so a
/// register range's `start` qubit is its least significant bit. Global
/// phase is not tracked beyond what the amplitudes themselves carry.
#[derive(Debug, Clone)]
pub struct StateVector {
    num_qubits: u32,
    amps: Vec<Complex64>,
}

impl StateVector {
    /// Create the all-zeros state |0…0⟩.
    pub fn new(num_qubits: u32) -> SimResult<Self> {
        Self::from_basis(num_qubits, 0)
    }

    /// Create the computational basis state |value⟩.
    pub fn from_basis(num_qubits: u32, value: u64) -> SimResult<Self> {
        if num_qubits > MAX_QUBITS {
            return Err(SimError::TooManyQubits(num_qubits));
        }
        if num_qubits < 64 && value >= 1u64 << num_qubits {
            return Err(SimError::BasisOutOfRange { value, num_qubits });
        }
        let mut amps = vec![Complex64::ZERO; 1usize << num_qubits];
        amps[value as usize] = Complex64::ONE;
        Ok(Self { num_qubits, amps })
    }

    /// Number of qubits in the state.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// The raw amplitudes, indexed by basis value.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amps
    }

    /// Probability of measuring `qubit` as 1.
    pub fn probability(&self, qubit: QubitId) -> f64 {
        let mask = 1usize << qubit.0;
        self.amps
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum()
    }

    /// If the state is a computational basis state (up to phase), its value.
    pub fn basis_value(&self) -> Option<u64> {
        self.amps
            .iter()
            .position(|a| a.norm_sqr() > 1.0 - EPS)
            .map(|i| i as u64)
    }

    /// Verify a composite's ancilla postcondition: `qubit` must be 0.
    ///
    /// Reports [`IrError::AncillaNotReset`] naming the offending block
    /// when the qubit carries any weight on 1.
    pub fn check_ancilla(&self, qubit: QubitId, block: &str) -> SimResult<()> {
        if self.probability(qubit) > EPS {
            return Err(SimError::Ir(IrError::AncillaNotReset {
                block: block.to_string(),
                qubit: qubit.0,
            }));
        }
        Ok(())
    }

    fn check_qubit(&self, gate: &Gate, qubit: QubitId) -> SimResult<()> {
        if qubit.0 >= self.num_qubits {
            return Err(SimError::QubitOutOfRange {
                gate: gate.name().to_string(),
                qubit: qubit.0,
                num_qubits: self.num_qubits,
            });
        }
        Ok(())
    }

    /// Apply a single gate to the state.
    pub fn apply(&mut self, gate: &Gate) -> SimResult<()> {
        for qubit in gate.qubits() {
            self.check_qubit(gate, qubit)?;
        }
        trace!(gate = gate.name(), "apply gate");

        match gate {
            Gate::X { target } => self.apply_x(*target),
            Gate::Y { target } => self.apply_y(*target),
            Gate::Z { target } => self.apply_z(*target),
            Gate::H { target } => self.apply_h(*target),
            Gate::Cx { control, target } => self.apply_mcx(&[*control], *target),
            Gate::Mcx { controls, target } => self.apply_mcx(controls, *target),
            Gate::Swap { a, b } => self.apply_swap(*a, *b),
            Gate::Measure { target } => {
                self.apply_measure(*target);
            }
            Gate::Add { x, y, controls } => self.permute_register(*x, controls, |xv, i| {
                let yv = range_value(i, y);
                xv.wrapping_add(yv)
            }),
            Gate::Sub { x, y, controls } => self.permute_register(*x, controls, |xv, i| {
                let yv = range_value(i, y);
                xv.wrapping_sub(yv)
            }),
            Gate::AddConst {
                reg,
                value,
                controls,
            } => {
                let span = 1u64 << reg.len();
                let delta = value.rem_euclid(span as i64) as u64;
                self.permute_register(*reg, controls, |v, _| v.wrapping_add(delta));
            }
            Gate::Composite(c) => {
                for step in c.expanded_steps().map_err(SimError::Ir)? {
                    for gate in step.gates() {
                        self.apply(gate)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Execute a finished block: flatten, then apply steps strictly in
    /// program order.
    pub fn run(&mut self, block: &Block) -> SimResult<()> {
        if block.width() > self.num_qubits {
            return Err(SimError::WidthMismatch {
                block: block.name().to_string(),
                block_width: block.width(),
                num_qubits: self.num_qubits,
            });
        }
        let flat = block.flatten().map_err(SimError::Ir)?;
        debug!(
            block = block.name(),
            width = block.width(),
            steps = flat.len(),
            "executing block"
        );
        for step in flat.steps() {
            for gate in step.gates() {
                self.apply(gate)?;
            }
        }
        Ok(())
    }

    fn apply_x(&mut self, target: QubitId) {
        let mask = 1usize << target.0;
        for i in 0..self.amps.len() {
            if i & mask == 0 {
                self.amps.swap(i, i | mask);
            }
        }
    }

    fn apply_y(&mut self, target: QubitId) {
        let mask = 1usize << target.0;
        let im = Complex64::I;
        for i in 0..self.amps.len() {
            if i & mask == 0 {
                let a = self.amps[i];
                let b = self.amps[i | mask];
                self.amps[i] = -im * b;
                self.amps[i | mask] = im * a;
            }
        }
    }

    fn apply_z(&mut self, target: QubitId) {
        let mask = 1usize << target.0;
        for (i, amp) in self.amps.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp = -*amp;
            }
        }
    }

    fn apply_h(&mut self, target: QubitId) {
        let mask = 1usize << target.0;
        for i in 0..self.amps.len() {
            if i & mask == 0 {
                let a = self.amps[i];
                let b = self.amps[i | mask];
                self.amps[i] = (a + b) * FRAC_1_SQRT_2;
                self.amps[i | mask] = (a - b) * FRAC_1_SQRT_2;
            }
        }
    }

    fn apply_mcx(&mut self, controls: &[QubitId], target: QubitId) {
        let cmask: usize = controls.iter().map(|c| 1usize << c.0).sum();
        let tmask = 1usize << target.0;
        for i in 0..self.amps.len() {
            if i & cmask == cmask && i & tmask == 0 {
                self.amps.swap(i, i | tmask);
            }
        }
    }

    fn apply_swap(&mut self, a: QubitId, b: QubitId) {
        let ma = 1usize << a.0;
        let mb = 1usize << b.0;
        for i in 0..self.amps.len() {
            if i & ma != 0 && i & mb == 0 {
                self.amps.swap(i, i ^ (ma | mb));
            }
        }
    }

    /// Measure `target` in the computational basis, collapsing the state.
    pub fn apply_measure(&mut self, target: QubitId) -> bool {
        let p_one = self.probability(target);
        let outcome = rand::thread_rng().gen_range(0.0..1.0) < p_one;
        debug!(qubit = %target, outcome, p_one, "measurement");

        let mask = 1usize << target.0;
        let keep_set = outcome;
        let norm = (if outcome { p_one } else { 1.0 - p_one }).sqrt();
        for (i, amp) in self.amps.iter_mut().enumerate() {
            if (i & mask != 0) == keep_set {
                *amp /= norm;
            } else {
                *amp = Complex64::ZERO;
            }
        }
        outcome
    }

    /// Apply a register permutation `xv ← f(xv, index)` on the basis
    /// states where every control qubit is set. `f` must be a bijection on
    /// the register's value space for the result to stay unitary.
    fn permute_register(
        &mut self,
        reg: QubitRange,
        controls: &[QubitId],
        f: impl Fn(u64, usize) -> u64,
    ) {
        let span_mask = (1u64 << reg.len()) - 1;
        let cmask: usize = controls.iter().map(|c| 1usize << c.0).sum();
        let mut out = vec![Complex64::ZERO; self.amps.len()];
        for (i, amp) in self.amps.iter().enumerate() {
            let j = if i & cmask == cmask {
                let v = range_value(i, &reg);
                with_range_value(i, &reg, f(v, i) & span_mask)
            } else {
                i
            };
            out[j] = *amp;
        }
        self.amps = out;
    }
}

impl Executor for StateVector {
    type Error = SimError;

    fn apply_gate(&mut self, gate: &Gate) -> Result<(), Self::Error> {
        self.apply(gate)
    }

    fn run_block(&mut self, block: &Block) -> Result<(), Self::Error> {
        self.run(block)
    }
}

/// Value held by `range` within basis index `index`.
fn range_value(index: usize, range: &QubitRange) -> u64 {
    ((index as u64) >> range.start().0) & ((1u64 << range.len()) - 1)
}

/// Basis index `index` with `range`'s bits replaced by `value`.
fn with_range_value(index: usize, range: &QubitRange, value: u64) -> usize {
    let mask = ((1u64 << range.len()) - 1) << range.start().0;
    ((index as u64 & !mask) | (value << range.start().0)) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use braid_ir::Step;

    #[test]
    fn test_basis_construction() {
        let sv = StateVector::from_basis(3, 5).unwrap();
        assert_eq!(sv.basis_value(), Some(5));
        assert!(StateVector::from_basis(3, 8).is_err());
    }

    #[test]
    fn test_x_flips_basis() {
        let mut sv = StateVector::new(2).unwrap();
        sv.apply(&Gate::x(0u32)).unwrap();
        assert_eq!(sv.basis_value(), Some(1));
        sv.apply(&Gate::x(1u32)).unwrap();
        assert_eq!(sv.basis_value(), Some(3));
    }

    #[test]
    fn test_h_is_self_inverse() {
        let mut sv = StateVector::from_basis(1, 1).unwrap();
        sv.apply(&Gate::h(0u32)).unwrap();
        assert!(sv.basis_value().is_none());
        sv.apply(&Gate::h(0u32)).unwrap();
        assert_eq!(sv.basis_value(), Some(1));
    }

    #[test]
    fn test_cx_and_mcx() {
        let mut sv = StateVector::from_basis(3, 0b011).unwrap();
        sv.apply(&Gate::cx(0u32, 2u32)).unwrap();
        assert_eq!(sv.basis_value(), Some(0b111));

        let mut sv = StateVector::from_basis(3, 0b011).unwrap();
        sv.apply(&Gate::mcx([QubitId(0), QubitId(1)], 2u32)).unwrap();
        assert_eq!(sv.basis_value(), Some(0b111));

        // One control clear: no-op.
        let mut sv = StateVector::from_basis(3, 0b001).unwrap();
        sv.apply(&Gate::mcx([QubitId(0), QubitId(1)], 2u32)).unwrap();
        assert_eq!(sv.basis_value(), Some(0b001));
    }

    #[test]
    fn test_swap() {
        let mut sv = StateVector::from_basis(2, 0b01).unwrap();
        sv.apply(&Gate::swap(0u32, 1u32)).unwrap();
        assert_eq!(sv.basis_value(), Some(0b10));
    }

    #[test]
    fn test_register_addition() {
        let x = QubitRange::new(0u32, 2u32).unwrap();
        let y = QubitRange::new(3u32, 5u32).unwrap();

        // x = 3, y = 4 → x = 7.
        let mut sv = StateVector::from_basis(6, 3 | (4 << 3)).unwrap();
        sv.apply(&Gate::add(x, y)).unwrap();
        assert_eq!(sv.basis_value(), Some(7 | (4 << 3)));

        // Wraps mod 2^3.
        sv.apply(&Gate::add(x, y)).unwrap();
        assert_eq!(sv.basis_value(), Some(3 | (4 << 3)));

        // Subtraction undoes addition.
        sv.apply(&Gate::add(x, y)).unwrap();
        sv.apply(&Gate::sub(x, y)).unwrap();
        assert_eq!(sv.basis_value(), Some(3 | (4 << 3)));
    }

    #[test]
    fn test_constant_addition_and_negative_values() {
        let reg = QubitRange::new(0u32, 3u32).unwrap();
        let mut sv = StateVector::from_basis(4, 9).unwrap();
        sv.apply(&Gate::add_const(reg, 5)).unwrap();
        assert_eq!(sv.basis_value(), Some(14));
        sv.apply(&Gate::add_const(reg, -5)).unwrap();
        assert_eq!(sv.basis_value(), Some(9));
        // Negative wrap.
        sv.apply(&Gate::add_const(reg, -12)).unwrap();
        assert_eq!(sv.basis_value(), Some(13));
    }

    #[test]
    fn test_controlled_arithmetic_gated_on_control() {
        let reg = QubitRange::new(0u32, 2u32).unwrap();
        let gate = Gate::add_const(reg, 3).controlled(QubitId(3)).unwrap();

        let mut off = StateVector::from_basis(4, 1).unwrap();
        off.apply(&gate).unwrap();
        assert_eq!(off.basis_value(), Some(1));

        let mut on = StateVector::from_basis(4, 1 | (1 << 3)).unwrap();
        on.apply(&gate).unwrap();
        assert_eq!(on.basis_value(), Some(4 | (1 << 3)));
    }

    #[test]
    fn test_multiply_controlled_arithmetic() {
        let reg = QubitRange::new(0u32, 2u32).unwrap();
        let gate = Gate::add_const(reg, 3)
            .controlled(QubitId(3))
            .unwrap()
            .controlled(QubitId(4))
            .unwrap();

        // One control clear: no-op.
        let mut one = StateVector::from_basis(5, 1 | (1 << 3)).unwrap();
        one.apply(&gate).unwrap();
        assert_eq!(one.basis_value(), Some(1 | (1 << 3)));

        // Both controls set: the addition fires.
        let mut both = StateVector::from_basis(5, 1 | (1 << 3) | (1 << 4)).unwrap();
        both.apply(&gate).unwrap();
        assert_eq!(both.basis_value(), Some(4 | (1 << 3) | (1 << 4)));
    }

    #[test]
    fn test_measure_is_deterministic_on_basis_state() {
        let mut sv = StateVector::from_basis(2, 0b10).unwrap();
        assert!(!sv.apply_measure(QubitId(0)));
        assert!(sv.apply_measure(QubitId(1)));
        assert_eq!(sv.basis_value(), Some(0b10));
    }

    #[test]
    fn test_run_rejects_oversized_block() {
        let block = Block::new("wide", 5);
        let mut sv = StateVector::new(3).unwrap();
        assert!(matches!(
            sv.run(&block),
            Err(SimError::WidthMismatch { .. })
        ));
    }

    #[test]
    fn test_qubit_bounds_checked() {
        let mut sv = StateVector::new(2).unwrap();
        assert!(matches!(
            sv.apply(&Gate::x(2u32)),
            Err(SimError::QubitOutOfRange { .. })
        ));
    }

    #[test]
    fn test_block_execution_in_order() {
        let mut block = Block::new("seq", 2);
        block.add_step(Step::from(Gate::x(0u32))).unwrap();
        block.add_step(Step::from(Gate::cx(0u32, 1u32))).unwrap();

        let mut sv = StateVector::new(2).unwrap();
        sv.run(&block).unwrap();
        assert_eq!(sv.basis_value(), Some(0b11));
    }
}
