//! Qubit addressing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Positional identifier of a qubit within a circuit's declared width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// The qubit immediately after this one.
    #[inline]
    pub fn next(self) -> QubitId {
        QubitId(self.0 + 1)
    }

    /// This index shifted up by `offset` positions.
    #[inline]
    pub fn shifted(self, offset: u32) -> QubitId {
        QubitId(self.0 + offset)
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

impl From<usize> for QubitId {
    fn from(id: usize) -> Self {
        QubitId(u32::try_from(id).expect("QubitId overflow: exceeds u32::MAX"))
    }
}
