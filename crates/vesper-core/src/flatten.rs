//! The flatten operation
//!
//! Given a sequence and a requested depth, produce a new sequence with
//! nested sequence levels expanded up to that depth. The input and any
//! nested sequences it references are never mutated; the output is freshly
//! allocated and owned by the caller.

use crate::convert::{to_integer_or_infinity, to_number, Depth};
use crate::sequence::{Sequence, Slot};
use crate::value::Value;
use crate::CoercionError;

/// Flatten `source` up to the depth described by `depth_arg`
///
/// An absent or undefined depth argument defaults to one level. Any other
/// argument goes through ToNumber then ToIntegerOrInfinity: NaN and values
/// ≤ 0 yield no flattening, positive infinity is unbounded. Coercion
/// failure (a symbol, or an object with no conversion protocol) aborts
/// before any traversal with a TypeError-class error and no partial output.
///
/// Slots are read in index order, once each. Holes are elided entirely:
/// they contribute nothing to the output, not even a hole.
pub fn flatten(source: &Sequence, depth_arg: Option<&Value>) -> Result<Sequence, CoercionError> {
    let depth = match depth_arg {
        None | Some(Value::Undefined) => Depth::Finite(1),
        Some(value) => to_integer_or_infinity(to_number(value)?),
    };
    let mut output = Sequence::with_capacity(source.len());
    flatten_into(&mut output, source, depth);
    Ok(output)
}

fn flatten_into(output: &mut Sequence, source: &Sequence, depth: Depth) {
    for slot in source.slots() {
        let Slot::Value(element) = slot else {
            continue;
        };
        match element {
            Value::Sequence(inner) if !depth.is_exhausted() => {
                flatten_into(output, inner, depth.decrement());
            }
            _ => output.push(element.clone()),
        }
    }
}
