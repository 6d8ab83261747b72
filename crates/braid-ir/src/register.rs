//! Register ranges over a shared qubit index space.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// An inclusive range of qubit indices forming a logical register.
///
/// Layout invariants (adjacency, disjointness) that composite circuits
/// depend on are expressed as predicates here and checked once at
/// composite-construction time, instead of being scattered as assertions.
///
/// Bit order: `start` is the least significant bit of the register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QubitRange {
    start: QubitId,
    end: QubitId,
}

impl QubitRange {
    /// Create a range covering qubits `start..=end`.
    ///
    /// Rejects `start > end` with [`IrError::RegisterLayoutViolation`].
    pub fn new(start: impl Into<QubitId>, end: impl Into<QubitId>) -> IrResult<Self> {
        let (start, end) = (start.into(), end.into());
        if start > end {
            return Err(IrError::RegisterLayoutViolation {
                reason: format!("range start {start} is above range end {end}"),
            });
        }
        Ok(Self { start, end })
    }

    /// First (least significant) qubit of the register.
    #[inline]
    pub fn start(&self) -> QubitId {
        self.start
    }

    /// Last (most significant) qubit of the register.
    #[inline]
    pub fn end(&self) -> QubitId {
        self.end
    }

    /// Number of qubits in the register, always at least 1.
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u32 {
        self.end.0 - self.start.0 + 1
    }

    /// Whether `qubit` lies inside this range.
    pub fn contains(&self, qubit: QubitId) -> bool {
        self.start <= qubit && qubit <= self.end
    }

    /// Whether this range begins immediately after `other` ends.
    pub fn follows(&self, other: &QubitRange) -> bool {
        self.start == other.end.next()
    }

    /// Whether this range shares any qubit with `other`.
    pub fn overlaps(&self, other: &QubitRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// This range shifted up by `offset` positions.
    pub fn shifted(&self, offset: u32) -> QubitRange {
        QubitRange {
            start: self.start.shifted(offset),
            end: self.end.shifted(offset),
        }
    }

    /// Iterate over the qubits in the range, LSB first.
    pub fn iter(&self) -> impl Iterator<Item = QubitId> + use<> {
        (self.start.0..=self.end.0).map(QubitId)
    }
}

impl fmt::Display for QubitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{}]", self.start, self.end)
    }
}
