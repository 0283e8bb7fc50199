//! Hole-aware sequence container
//!
//! An ordered, index-addressable collection of slots. A slot is either a
//! hole (absent) or holds a value; a hole is distinct from a present slot
//! holding `undefined`. The flatten operation reads sequences without ever
//! mutating them.

use std::fmt;

use crate::value::{deep_equals, Value};

/// A single sequence slot
#[derive(Debug, Clone, Default)]
pub enum Slot {
    /// Absent slot, contributes nothing when flattened
    #[default]
    Hole,
    /// Present slot holding a value
    Value(Value),
}

impl Slot {
    /// Check if this slot is a hole
    pub fn is_hole(&self) -> bool {
        matches!(self, Slot::Hole)
    }
}

/// Ordered, index-addressable collection of slots, possibly with holes
#[derive(Debug, Clone, Default)]
pub struct Sequence {
    slots: Vec<Slot>,
}

impl Sequence {
    /// Create an empty sequence
    pub fn new() -> Self {
        Sequence { slots: Vec::new() }
    }

    /// Create an empty sequence with reserved capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Sequence {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Create a sequence holding the given values, without holes
    pub fn from_values(values: Vec<Value>) -> Self {
        Sequence {
            slots: values.into_iter().map(Slot::Value).collect(),
        }
    }

    /// Number of slots, counting holes
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the sequence has no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Append a value slot
    pub fn push(&mut self, value: Value) {
        self.slots.push(Slot::Value(value));
    }

    /// Append a hole
    pub fn push_hole(&mut self) {
        self.slots.push(Slot::Hole);
    }

    /// Get the value at an index
    ///
    /// Returns `None` for holes and out-of-range indices; use [`is_hole`]
    /// to tell the two apart.
    ///
    /// [`is_hole`]: Sequence::is_hole
    pub fn get(&self, index: usize) -> Option<&Value> {
        match self.slots.get(index) {
            Some(Slot::Value(value)) => Some(value),
            _ => None,
        }
    }

    /// Check if the slot at an index is a hole (false for out of range)
    pub fn is_hole(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Slot::Hole))
    }

    /// Iterate slots in index order
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    /// Order-sensitive structural equality against another sequence
    ///
    /// Slot counts must match; holes only match holes, values compare with
    /// [`deep_equals`].
    pub fn structurally_equals(&self, other: &Sequence) -> bool {
        self.slots.len() == other.slots.len()
            && self
                .slots
                .iter()
                .zip(other.slots.iter())
                .all(|(a, b)| match (a, b) {
                    (Slot::Hole, Slot::Hole) => true,
                    (Slot::Value(x), Slot::Value(y)) => deep_equals(x, y),
                    _ => false,
                })
    }
}

impl FromIterator<Value> for Sequence {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Sequence {
            slots: iter.into_iter().map(Slot::Value).collect(),
        }
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match slot {
                Slot::Hole => write!(f, "<hole>")?,
                Slot::Value(value) => write!(f, "{value}")?,
            }
        }
        write!(f, "]")
    }
}
