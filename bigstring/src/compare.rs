//! Lexicographic comparison of equal-length byte ranges.

use std::cmp::Ordering;

use bigstring_error::{BigstringResult, bigstring_bail, bigstring_err};

use crate::Bigstring;
use crate::view::{Origin, Span, View};

/// Compare two views byte by byte.
///
/// Both views must have the same length. The result follows the first differing byte, or is
/// [`Ordering::Equal`] if every byte matches. Comparison never mutates either operand.
pub fn compare(lhs: &View<'_>, rhs: &View<'_>) -> BigstringResult<Ordering> {
    if lhs.len() != rhs.len() {
        let err = bigstring_err!(LengthMismatch: lhs.len(), rhs.len());
        log::debug!("compare rejected: {err}");
        return Err(err);
    }
    log::trace!("compare: {} bytes", lhs.len());
    Ok(lhs.as_slice().cmp(rhs.as_slice()))
}

/// Compare a view over a [`Bigstring`] with a view over a byte sequence.
///
/// Same contract as [`compare`]. `buffer` must come from [`Bigstring::view`] and `sequence` from
/// [`View::of_sequence`].
pub fn compare_with_sequence(buffer: &View<'_>, sequence: &View<'_>) -> BigstringResult<Ordering> {
    if buffer.origin() != Origin::Bigstring {
        bigstring_bail!("Expected a bigstring view, got a view over {:?}", buffer.origin());
    }
    if sequence.origin() != Origin::Sequence {
        bigstring_bail!("Expected a sequence view, got a view over {:?}", sequence.origin());
    }
    compare(buffer, sequence)
}

impl Bigstring<'_> {
    /// Compare `len` bytes of this region at `offset` with `len` bytes of `other` at
    /// `other_offset`.
    pub fn memcmp(
        &self,
        offset: usize,
        other: &Bigstring<'_>,
        other_offset: usize,
        len: usize,
    ) -> BigstringResult<Ordering> {
        let lhs = self.view(Span::new(offset, len))?;
        let rhs = other.view(Span::new(other_offset, len))?;
        compare(&lhs, &rhs)
    }

    /// Compare `len` bytes of this region at `offset` with `len` bytes of a byte sequence at
    /// `other_offset`.
    pub fn memcmp_bytes(
        &self,
        offset: usize,
        other: &[u8],
        other_offset: usize,
        len: usize,
    ) -> BigstringResult<Ordering> {
        let lhs = self.view(Span::new(offset, len))?;
        let rhs = View::of_sequence(other, other_offset, len)?;
        compare_with_sequence(&lhs, &rhs)
    }
}
