mod model;

use std::cmp::Ordering;

use bigstring::Span;
use libfuzzer_sys::arbitrary::{Arbitrary, Result, Unstructured};

pub use crate::model::Model;

/// What applying an action to a [`bigstring::Bigstring`] must produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpectedValue {
    /// The action succeeded and the region now holds these bytes.
    Region(Vec<u8>),
    /// The action succeeded and wrote these bytes to the output sequence.
    Sequence(Vec<u8>),
    /// The comparison returned this ordering.
    Ordering(Ordering),
    /// The action was rejected for exceeding a region.
    OutOfBounds,
    /// The action was rejected for operands of different lengths.
    LengthMismatch,
}

#[derive(Debug)]
pub struct FuzzBigstringAction {
    pub initial: Vec<u8>,
    pub actions: Vec<(Action, ExpectedValue)>,
}

#[derive(Debug, Clone)]
pub enum Action {
    CopyWithin { src: Span, dst: Span },
    BlitFromBytes { bytes: Vec<u8>, src_offset: usize, dst: Span },
    BlitToBytes { src: Span, dst_len: usize, dst_offset: usize },
    Compare { lhs: Span, rhs: Span },
    SetU32Le { offset: usize, value: u32 },
}

impl<'a> Arbitrary<'a> for FuzzBigstringAction {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        let initial: Vec<u8> = u.arbitrary()?;
        let mut model = Model::new(initial.clone());

        let mut actions = Vec::new();
        let action_count = u.int_in_range(1..=8)?;
        for _ in 0..action_count {
            let capacity = model.capacity();
            let action = match u.int_in_range(0..=4)? {
                0 => Action::CopyWithin {
                    src: random_span(u, capacity)?,
                    dst: random_span(u, capacity)?,
                },
                1 => {
                    let bytes: Vec<u8> = u.arbitrary()?;
                    let src_offset = u.int_in_range(0..=bytes.len())?;
                    Action::BlitFromBytes {
                        bytes,
                        src_offset,
                        dst: random_span(u, capacity)?,
                    }
                }
                2 => {
                    let src = random_span(u, capacity)?;
                    let dst_len = u.int_in_range(0..=capacity + 4)?;
                    Action::BlitToBytes {
                        src,
                        dst_len,
                        dst_offset: u.int_in_range(0..=dst_len)?,
                    }
                }
                3 => Action::Compare {
                    lhs: random_span(u, capacity)?,
                    rhs: random_span(u, capacity)?,
                },
                4 => Action::SetU32Le {
                    offset: u.int_in_range(0..=capacity)?,
                    value: u.arbitrary()?,
                },
                _ => unreachable!(),
            };
            let expected = model.apply(&action);
            actions.push((action, expected));
        }

        Ok(Self { initial, actions })
    }
}

/// A span that mostly fits in `capacity`, but may overhang it by a few bytes.
fn random_span(u: &mut Unstructured<'_>, capacity: usize) -> Result<Span> {
    let offset = u.int_in_range(0..=capacity + 2)?;
    let len = u.int_in_range(0..=capacity.saturating_sub(offset) + 2)?;
    Ok(Span::new(offset, len))
}
