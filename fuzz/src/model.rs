use std::ops::Range;

use bigstring::Span;

use crate::{Action, ExpectedValue};

/// A plain `Vec<u8>` reference for every bigstring operation.
pub struct Model {
    bytes: Vec<u8>,
}

impl Model {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    pub fn apply(&mut self, action: &Action) -> ExpectedValue {
        let capacity = self.capacity();
        match action {
            Action::CopyWithin { src, dst } => {
                let (Some(src), Some(dst)) = (range(src, capacity), range(dst, capacity)) else {
                    return ExpectedValue::OutOfBounds;
                };
                if src.len() != dst.len() {
                    return ExpectedValue::LengthMismatch;
                }
                let staged = self.bytes[src].to_vec();
                self.bytes[dst].copy_from_slice(&staged);
                ExpectedValue::Region(self.bytes.clone())
            }
            Action::BlitFromBytes {
                bytes,
                src_offset,
                dst,
            } => {
                let Some(dst) = range(dst, capacity) else {
                    return ExpectedValue::OutOfBounds;
                };
                let Some(src) = range(&Span::new(*src_offset, dst.len()), bytes.len()) else {
                    return ExpectedValue::OutOfBounds;
                };
                self.bytes[dst].copy_from_slice(&bytes[src]);
                ExpectedValue::Region(self.bytes.clone())
            }
            Action::BlitToBytes {
                src,
                dst_len,
                dst_offset,
            } => {
                let Some(src) = range(src, capacity) else {
                    return ExpectedValue::OutOfBounds;
                };
                let Some(dst) = range(&Span::new(*dst_offset, src.len()), *dst_len) else {
                    return ExpectedValue::OutOfBounds;
                };
                let mut out = vec![0u8; *dst_len];
                out[dst].copy_from_slice(&self.bytes[src]);
                ExpectedValue::Sequence(out)
            }
            Action::Compare { lhs, rhs } => {
                let (Some(lhs), Some(rhs)) = (range(lhs, capacity), range(rhs, capacity)) else {
                    return ExpectedValue::OutOfBounds;
                };
                if lhs.len() != rhs.len() {
                    return ExpectedValue::LengthMismatch;
                }
                ExpectedValue::Ordering(self.bytes[lhs].cmp(&self.bytes[rhs]))
            }
            Action::SetU32Le { offset, value } => {
                let Some(dst) = range(&Span::new(*offset, 4), capacity) else {
                    return ExpectedValue::OutOfBounds;
                };
                self.bytes[dst].copy_from_slice(&value.to_le_bytes());
                ExpectedValue::Region(self.bytes.clone())
            }
        }
    }
}

fn range(span: &Span, capacity: usize) -> Option<Range<usize>> {
    let end = span.offset.checked_add(span.len)?;
    (end <= capacity).then_some(span.offset..end)
}
