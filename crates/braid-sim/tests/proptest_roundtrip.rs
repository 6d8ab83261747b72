//! Property-based tests for execution round trips.
//!
//! Applying a block followed by its inverse must return any input state
//! unchanged (up to floating-point noise), for random gate sequences and
//! random initial basis states.

use braid_ir::{Block, Gate, Step};
use braid_sim::StateVector;
use proptest::prelude::*;

const WIDTH: u32 = 5;
const TOLERANCE: f64 = 1e-9;

/// Gate operations that can be applied to a generated block.
#[derive(Debug, Clone)]
enum GateOp {
    X(u32),
    Y(u32),
    Z(u32),
    H(u32),
    Cx(u32, u32),
    Swap(u32, u32),
}

impl GateOp {
    fn build(&self) -> Gate {
        match *self {
            GateOp::X(q) => Gate::x(q % WIDTH),
            GateOp::Y(q) => Gate::y(q % WIDTH),
            GateOp::Z(q) => Gate::z(q % WIDTH),
            GateOp::H(q) => Gate::h(q % WIDTH),
            GateOp::Cx(c, t) => {
                let c = c % WIDTH;
                let t = (c + 1 + t % (WIDTH - 1)) % WIDTH;
                Gate::cx(c, t)
            }
            GateOp::Swap(a, b) => {
                let a = a % WIDTH;
                let b = (a + 1 + b % (WIDTH - 1)) % WIDTH;
                Gate::swap(a, b)
            }
        }
    }
}

fn arb_gate_op() -> impl Strategy<Value = GateOp> {
    prop_oneof![
        any::<u32>().prop_map(GateOp::X),
        any::<u32>().prop_map(GateOp::Y),
        any::<u32>().prop_map(GateOp::Z),
        any::<u32>().prop_map(GateOp::H),
        (any::<u32>(), any::<u32>()).prop_map(|(c, t)| GateOp::Cx(c, t)),
        (any::<u32>(), any::<u32>()).prop_map(|(a, b)| GateOp::Swap(a, b)),
    ]
}

fn arb_block() -> impl Strategy<Value = Block> {
    prop::collection::vec(arb_gate_op(), 1..=16).prop_map(|ops| {
        let mut block = Block::new("generated", WIDTH);
        for op in ops {
            block.add_step(Step::from(op.build())).unwrap();
        }
        block
    })
}

proptest! {
    #[test]
    fn block_then_inverse_restores_state(
        block in arb_block(),
        input in 0u64..(1 << WIDTH),
    ) {
        let initial = StateVector::from_basis(WIDTH, input).unwrap();
        let mut state = initial.clone();

        state.run(&block).unwrap();
        state.run(&block.inverse().unwrap()).unwrap();

        for (got, want) in state.amplitudes().iter().zip(initial.amplitudes()) {
            prop_assert!((got - want).norm() < TOLERANCE);
        }
    }

    #[test]
    fn controlled_block_is_identity_on_clear_control(
        block in arb_block(),
        input in 0u64..(1 << WIDTH),
    ) {
        // Strip gates with no controlled form down to the controllable set.
        let mut body = Block::new("body", WIDTH);
        for step in block.steps() {
            for gate in step.gates() {
                if matches!(gate, Gate::X { .. } | Gate::Cx { .. }) {
                    body.add_gate(gate.clone()).unwrap();
                }
            }
        }

        let control = braid_ir::QubitId(WIDTH);
        let mut outer = Block::new("outer", WIDTH + 1);
        outer
            .add_gate(body.as_controlled_gate(0, control).unwrap())
            .unwrap();

        // Control clear: all other qubits untouched.
        let mut state = StateVector::from_basis(WIDTH + 1, input).unwrap();
        state.run(&outer).unwrap();
        prop_assert_eq!(state.basis_value(), Some(input));
    }
}
