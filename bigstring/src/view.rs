use std::fmt::{Debug, Formatter};
use std::ops::{Deref, DerefMut, Range};

use bigstring_error::{BigstringResult, bigstring_bail};

use crate::debug::TruncatedDebug;

/// An unvalidated `(offset, len)` pair addressing a range of bytes.
///
/// A span says nothing about the region it will be applied to. It only becomes a [`View`] or
/// [`ViewMut`] once [`Span::check`] has accepted it against a capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Offset of the first byte, measured from the region's base.
    pub offset: usize,
    /// Number of bytes.
    pub len: usize,
}

impl Span {
    /// Create a span of `len` bytes starting at `offset`.
    pub const fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// A span covering all of a region with the given capacity.
    pub const fn full(capacity: usize) -> Self {
        Self::new(0, capacity)
    }

    /// One past the last byte of the span, or `None` if `offset + len` overflows.
    pub const fn end(&self) -> Option<usize> {
        self.offset.checked_add(self.len)
    }

    /// Returns whether the span covers no bytes.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Validate the span against a region of `capacity` bytes and return the byte range.
    ///
    /// This is the single place where `offset + len <= capacity` is enforced. Every view
    /// constructor goes through it; nothing is ever clamped.
    pub fn check(&self, capacity: usize) -> BigstringResult<Range<usize>> {
        match self.end() {
            Some(end) if end <= capacity => Ok(self.offset..end),
            _ => bigstring_bail!(OutOfBounds: self.offset, self.len, capacity),
        }
    }

    /// Returns whether the two spans share at least one byte.
    pub fn overlaps(&self, other: &Span) -> bool {
        match (self.end(), other.end()) {
            (Some(a_end), Some(b_end)) => {
                !self.is_empty()
                    && !other.is_empty()
                    && self.offset < b_end
                    && other.offset < a_end
            }
            _ => false,
        }
    }
}

/// Where the bytes behind a [`View`] live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// The view borrows a [`crate::Bigstring`].
    Bigstring,
    /// The view borrows an external byte sequence such as a `Vec<u8>` or `&str`.
    Sequence,
}

/// A validated, read-only range of bytes.
///
/// The view borrows its region, so it can never outlive it.
#[derive(Clone, Copy)]
pub struct View<'a> {
    bytes: &'a [u8],
    offset: usize,
    origin: Origin,
}

impl<'a> View<'a> {
    pub(crate) fn new(region: &'a [u8], span: Span, origin: Origin) -> BigstringResult<Self> {
        let range = span.check(region.len())?;
        Ok(Self {
            bytes: &region[range],
            offset: span.offset,
            origin,
        })
    }

    pub(crate) fn whole(bytes: &'a [u8], origin: Origin) -> Self {
        Self {
            bytes,
            offset: 0,
            origin,
        }
    }

    /// Create a view of `len` bytes starting at `offset` over an external byte sequence.
    pub fn of_sequence(
        sequence: &'a (impl AsRef<[u8]> + ?Sized),
        offset: usize,
        len: usize,
    ) -> BigstringResult<Self> {
        Self::new(sequence.as_ref(), Span::new(offset, len), Origin::Sequence)
    }

    /// Offset of the view from the base of the region it was created from.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the view in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns whether the view is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The kind of storage the view borrows.
    #[inline]
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// The span this view covers within its region.
    pub fn span(&self) -> Span {
        Span::new(self.offset, self.len())
    }

    /// Access the viewed bytes, with the lifetime of the underlying region.
    #[inline]
    pub fn as_slice(&self) -> &'a [u8] {
        self.bytes
    }

    /// Return a nested view. The span is relative to the start of this view.
    pub fn slice(&self, span: Span) -> BigstringResult<View<'a>> {
        let range = span.check(self.len())?;
        Ok(Self {
            bytes: &self.bytes[range],
            offset: self.offset + span.offset,
            origin: self.origin,
        })
    }

    /// Copy the viewed bytes into a new `Vec<u8>`.
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }
}

impl Debug for View<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("offset", &self.offset)
            .field("len", &self.len())
            .field("origin", &self.origin)
            .field("bytes", &TruncatedDebug(self.bytes))
            .finish()
    }
}

impl Deref for View<'_> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.bytes
    }
}

impl AsRef<[u8]> for View<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl PartialEq for View<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for View<'_> {}

/// A validated, writable range of bytes within a [`crate::Bigstring`].
///
/// Holding a `ViewMut` borrows the region exclusively.
pub struct ViewMut<'a> {
    bytes: &'a mut [u8],
    offset: usize,
}

impl<'a> ViewMut<'a> {
    pub(crate) fn new(region: &'a mut [u8], span: Span) -> BigstringResult<Self> {
        let range = span.check(region.len())?;
        Ok(Self {
            bytes: &mut region[range],
            offset: span.offset,
        })
    }

    /// Offset of the view from the base of its region.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the view in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns whether the view is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The span this view covers within its region.
    pub fn span(&self) -> Span {
        Span::new(self.offset, self.len())
    }

    /// Access the viewed bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        self.bytes
    }

    /// Mutably access the viewed bytes.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        self.bytes
    }

    /// Reborrow as a read-only [`View`].
    pub fn as_view(&self) -> View<'_> {
        View {
            bytes: self.bytes,
            offset: self.offset,
            origin: Origin::Bigstring,
        }
    }

    /// Return a nested mutable view. The span is relative to the start of this view.
    pub fn slice_mut(&mut self, span: Span) -> BigstringResult<ViewMut<'_>> {
        let range = span.check(self.len())?;
        Ok(ViewMut {
            bytes: &mut self.bytes[range],
            offset: self.offset + span.offset,
        })
    }

    /// Consume the view, returning the bytes with the lifetime of the region.
    pub fn into_mut_slice(self) -> &'a mut [u8] {
        self.bytes
    }
}

impl Debug for ViewMut<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewMut")
            .field("offset", &self.offset)
            .field("len", &self.len())
            .field("bytes", &TruncatedDebug(self.bytes))
            .finish()
    }
}

impl Deref for ViewMut<'_> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.bytes
    }
}

impl DerefMut for ViewMut<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.bytes
    }
}

impl AsRef<[u8]> for ViewMut<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl AsMut<[u8]> for ViewMut<'_> {
    fn as_mut(&mut self) -> &mut [u8] {
        self.bytes
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Span::new(0, 10), 10, Some(0..10))]
    #[case(Span::new(10, 0), 10, Some(10..10))]
    #[case(Span::new(4, 3), 10, Some(4..7))]
    #[case(Span::new(8, 3), 10, None)]
    #[case(Span::new(11, 0), 10, None)]
    #[case(Span::new(usize::MAX, 2), 10, None)]
    fn check(#[case] span: Span, #[case] capacity: usize, #[case] expected: Option<Range<usize>>) {
        match expected {
            Some(range) => assert_eq!(span.check(capacity).unwrap(), range),
            None => assert!(span.check(capacity).unwrap_err().is_out_of_bounds()),
        }
    }

    #[rstest]
    #[case(Span::new(0, 6), Span::new(2, 6), true)]
    #[case(Span::new(0, 2), Span::new(2, 2), false)]
    #[case(Span::new(3, 0), Span::new(0, 10), false)]
    #[case(Span::new(5, 5), Span::new(0, 6), true)]
    fn overlaps(#[case] a: Span, #[case] b: Span, #[case] expected: bool) {
        assert_eq!(a.overlaps(&b), expected);
        assert_eq!(b.overlaps(&a), expected);
    }

    #[test]
    fn sequence_view() {
        let view = View::of_sequence("helloworld", 5, 5).unwrap();
        assert_eq!(view.as_slice(), b"world");
        assert_eq!(view.offset(), 5);
        assert_eq!(view.origin(), Origin::Sequence);
    }

    #[test]
    fn sequence_view_out_of_bounds() {
        let err = View::of_sequence(b"hello".as_slice(), 3, 3).unwrap_err();
        assert!(err.is_out_of_bounds());
    }

    #[test]
    fn nested_slice() {
        let data = [0u8, 1, 2, 3, 4, 5, 6, 7];
        let view = View::of_sequence(&data, 2, 5).unwrap();
        let inner = view.slice(Span::new(1, 3)).unwrap();
        assert_eq!(inner.as_slice(), &[3, 4, 5]);
        assert_eq!(inner.offset(), 3);
        assert_eq!(inner.span(), Span::new(3, 3));
        assert!(view.slice(Span::new(3, 3)).unwrap_err().is_out_of_bounds());
    }

    #[test]
    fn nested_slice_mut() {
        let mut data = [0u8; 8];
        let mut view = ViewMut::new(&mut data, Span::new(2, 4)).unwrap();
        view.slice_mut(Span::new(1, 2)).unwrap().fill(9);
        assert!(view.slice_mut(Span::new(3, 2)).is_err());
        assert_eq!(view.as_view().as_slice(), &[0, 9, 9, 0]);
        assert_eq!(data, [0, 0, 0, 9, 9, 0, 0, 0]);
    }
}
