use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};
use std::ops::Deref;
use std::ptr::NonNull;

use bigstring_error::BigstringResult;
use bytes::{Bytes, BytesMut};

use crate::debug::TruncatedDebug;
use crate::view::{Origin, Span, View, ViewMut};

/// A contiguous region of bytes with a fixed capacity.
///
/// A `Bigstring` either owns its storage, in which case the storage is released when the
/// `Bigstring` is dropped, or borrows it from an external owner for the lifetime `'a`.
/// The capacity is fixed at construction: no operation grows, shrinks or reallocates a region.
///
/// Sub-ranges are accessed through [`View`] and [`ViewMut`], which can only be created through
/// [`Bigstring::view`] and [`Bigstring::view_mut`]. Those constructors are where bounds are
/// checked, so every operation downstream of a view can assume its range is valid.
pub struct Bigstring<'a> {
    storage: Storage<'a>,
}

/// A [`Bigstring`] that owns its storage.
pub type OwnedBigstring = Bigstring<'static>;

enum Storage<'a> {
    Owned(BytesMut),
    Borrowed(&'a mut [u8]),
    #[cfg(feature = "memmap2")]
    Mapped(memmap2::MmapMut),
}

impl Bigstring<'static> {
    /// Allocate a new region of `capacity` bytes, all set to `0u8`.
    pub fn zeroed(capacity: usize) -> Self {
        Self::from(BytesMut::zeroed(capacity))
    }

    /// Create a region of `capacity` bytes, all set to `byte`.
    pub fn full(byte: u8, capacity: usize) -> Self {
        let mut bytes = BytesMut::zeroed(capacity);
        bytes.fill(byte);
        Self::from(bytes)
    }

    /// Create an empty region. Does not allocate.
    pub fn empty() -> Self {
        Self::from(BytesMut::new())
    }

    /// Allocate a new region holding a copy of the given bytes.
    pub fn copy_from(values: impl AsRef<[u8]>) -> Self {
        Self::from(BytesMut::from(values.as_ref()))
    }
}

impl<'a> Bigstring<'a> {
    /// Wrap externally-owned memory. The region is released by its owner, not by this value.
    pub fn borrowed(bytes: &'a mut [u8]) -> Self {
        Self {
            storage: Storage::Borrowed(bytes),
        }
    }

    /// Wrap a raw pointer handed over by an external owner.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads and writes of `len` bytes for the whole of `'a`, and no
    /// other reference to that memory may be used while the returned `Bigstring` is alive.
    pub unsafe fn from_raw_parts(ptr: NonNull<u8>, len: usize) -> Self {
        // SAFETY: upheld by the caller.
        let bytes = unsafe { std::slice::from_raw_parts_mut(ptr.as_ptr(), len) };
        Self::borrowed(bytes)
    }

    /// The fixed number of bytes in the region.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns whether the region has zero capacity.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.capacity() == 0
    }

    /// Returns whether the region releases its storage when dropped.
    pub fn is_owned(&self) -> bool {
        !matches!(self.storage, Storage::Borrowed(_))
    }

    /// Access the whole region as a byte slice.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        match &self.storage {
            Storage::Owned(b) => &b[..],
            Storage::Borrowed(b) => &b[..],
            #[cfg(feature = "memmap2")]
            Storage::Mapped(m) => &m[..],
        }
    }

    /// Mutably access the whole region as a byte slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match &mut self.storage {
            Storage::Owned(b) => &mut b[..],
            Storage::Borrowed(b) => &mut b[..],
            #[cfg(feature = "memmap2")]
            Storage::Mapped(m) => &mut m[..],
        }
    }

    /// Create a read-only view over `span`.
    ///
    /// Fails with `OutOfBounds` if `span.offset + span.len` exceeds the capacity.
    pub fn view(&self, span: Span) -> BigstringResult<View<'_>> {
        View::new(self.as_slice(), span, Origin::Bigstring)
    }

    /// Create a writable view over `span`.
    ///
    /// Fails with `OutOfBounds` if `span.offset + span.len` exceeds the capacity.
    pub fn view_mut(&mut self, span: Span) -> BigstringResult<ViewMut<'_>> {
        ViewMut::new(self.as_mut_slice(), span)
    }

    /// A read-only view over the whole region.
    pub fn full_view(&self) -> View<'_> {
        View::whole(self.as_slice(), Origin::Bigstring)
    }

    /// Read the byte at `index`.
    pub fn get(&self, index: usize) -> BigstringResult<u8> {
        Ok(self.view(Span::new(index, 1))?[0])
    }

    /// Overwrite the byte at `index`.
    pub fn set(&mut self, index: usize, byte: u8) -> BigstringResult<()> {
        self.view_mut(Span::new(index, 1))?[0] = byte;
        Ok(())
    }

    /// Allocate a new owned region holding a copy of the bytes in `span`.
    pub fn copy(&self, span: Span) -> BigstringResult<OwnedBigstring> {
        Ok(Bigstring::copy_from(self.view(span)?))
    }

    /// Copy the bytes in `span` into a new `Vec<u8>`.
    pub fn substring(&self, span: Span) -> BigstringResult<Vec<u8>> {
        Ok(self.view(span)?.to_vec())
    }

    /// Find the first occurrence of `byte` within `span`.
    ///
    /// The returned index is measured from the base of the region, not from `span.offset`.
    pub fn memchr(&self, span: Span, byte: u8) -> BigstringResult<Option<usize>> {
        let view = self.view(span)?;
        Ok(view
            .iter()
            .position(|b| *b == byte)
            .map(|idx| span.offset + idx))
    }

    /// Convert the region into an immutable [`Bytes`].
    ///
    /// This is zero-copy for owned regions. Borrowed regions are copied since the returned
    /// `Bytes` must not depend on the external owner.
    pub fn freeze(self) -> Bytes {
        match self.storage {
            Storage::Owned(b) => b.freeze(),
            Storage::Borrowed(b) => {
                #[cfg(feature = "warn-copy")]
                log::warn!("Copying {} borrowed bytes to freeze a bigstring", b.len());
                Bytes::copy_from_slice(b)
            }
            #[cfg(feature = "memmap2")]
            Storage::Mapped(m) => Bytes::from_owner(m),
        }
    }

    /// Return a region that owns its storage, copying if this one is borrowed.
    pub fn into_owned(self) -> OwnedBigstring {
        match self.storage {
            Storage::Owned(b) => Bigstring::from(b),
            Storage::Borrowed(b) => {
                #[cfg(feature = "warn-copy")]
                log::warn!("Copying {} borrowed bytes into an owned bigstring", b.len());
                Bigstring::copy_from(b)
            }
            #[cfg(feature = "memmap2")]
            Storage::Mapped(m) => Bigstring {
                storage: Storage::Mapped(m),
            },
        }
    }
}

#[cfg(feature = "memmap2")]
impl From<memmap2::MmapMut> for OwnedBigstring {
    fn from(value: memmap2::MmapMut) -> Self {
        Self {
            storage: Storage::Mapped(value),
        }
    }
}

impl From<BytesMut> for OwnedBigstring {
    fn from(value: BytesMut) -> Self {
        Self {
            storage: Storage::Owned(value),
        }
    }
}

impl From<Vec<u8>> for OwnedBigstring {
    fn from(value: Vec<u8>) -> Self {
        Self::from(BytesMut::from(Bytes::from(value)))
    }
}

impl<'a> From<&'a mut [u8]> for Bigstring<'a> {
    fn from(value: &'a mut [u8]) -> Self {
        Self::borrowed(value)
    }
}

impl Debug for Bigstring<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mode = match self.storage {
            Storage::Owned(_) => "owned",
            Storage::Borrowed(_) => "borrowed",
            #[cfg(feature = "memmap2")]
            Storage::Mapped(_) => "mapped",
        };
        f.debug_struct("Bigstring")
            .field("capacity", &self.capacity())
            .field("storage", &mode)
            .field("bytes", &TruncatedDebug(self.as_slice()))
            .finish()
    }
}

impl Deref for Bigstring<'_> {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl AsRef<[u8]> for Bigstring<'_> {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsMut<[u8]> for Bigstring<'_> {
    fn as_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl PartialEq for Bigstring<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Bigstring<'_> {}

impl PartialOrd for Bigstring<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Bigstring<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

#[cfg(test)]
mod test {
    use bytes::Bytes;

    use crate::{Bigstring, Span, bigstring};

    #[test]
    fn zeroed() {
        let region = Bigstring::zeroed(16);
        assert_eq!(region.capacity(), 16);
        assert!(region.is_owned());
        assert!(region.iter().all(|b| *b == 0));
    }

    #[test]
    fn empty() {
        let region = Bigstring::empty();
        assert!(region.is_empty());
        assert!(region.view(Span::new(0, 0)).unwrap().is_empty());
        assert!(region.view(Span::new(0, 1)).unwrap_err().is_out_of_bounds());
    }

    #[test]
    fn borrowed_writes_through() {
        let mut backing = [0u8; 4];
        {
            let mut region = Bigstring::borrowed(&mut backing);
            assert!(!region.is_owned());
            region.set(2, 0xAB).unwrap();
            assert!(region.set(4, 0xAB).unwrap_err().is_out_of_bounds());
        }
        assert_eq!(backing, [0, 0, 0xAB, 0]);
    }

    #[test]
    fn from_vec_takes_allocation() {
        let values = vec![4u8, 5, 6];
        let ptr = values.as_ptr();
        let region = Bigstring::from(values);
        assert!(region.is_owned());
        assert_eq!(region.as_slice().as_ptr(), ptr);
        assert_eq!(region.as_slice(), &[4, 5, 6]);
    }

    #[test]
    fn raw_parts() {
        let mut backing = vec![1u8, 2, 3];
        let len = backing.len();
        let ptr = std::ptr::NonNull::new(backing.as_mut_ptr()).unwrap();
        // SAFETY: `backing` outlives `region` and is not accessed until `region` is dropped.
        let mut region = unsafe { Bigstring::from_raw_parts(ptr, len) };
        region.set(0, 9).unwrap();
        assert_eq!(region.as_slice(), &[9, 2, 3]);
        drop(region);
        assert_eq!(backing, vec![9, 2, 3]);
    }

    #[test]
    fn get_set() {
        let mut region = bigstring![1, 2, 3];
        assert_eq!(region.get(1).unwrap(), 2);
        region.set(1, 5).unwrap();
        assert_eq!(region.get(1).unwrap(), 5);
        assert!(region.get(3).unwrap_err().is_out_of_bounds());
    }

    #[test]
    fn view_does_not_clamp() {
        let region = Bigstring::zeroed(10);
        assert_eq!(region.view(Span::new(4, 6)).unwrap().len(), 6);
        assert!(region.view(Span::new(4, 7)).unwrap_err().is_out_of_bounds());
        assert!(
            region
                .view(Span::new(usize::MAX, 1))
                .unwrap_err()
                .is_out_of_bounds()
        );
    }

    #[test]
    fn copy_and_substring() {
        let region = Bigstring::copy_from("helloworld");
        let copy = region.copy(Span::new(5, 5)).unwrap();
        assert_eq!(copy.as_slice(), b"world");
        assert!(copy.is_owned());
        assert_eq!(region.substring(Span::new(0, 5)).unwrap(), b"hello".to_vec());
        assert!(region.copy(Span::new(5, 6)).is_err());
    }

    #[test]
    fn memchr() {
        let region = Bigstring::copy_from("abcabc");
        assert_eq!(region.memchr(Span::full(6), b'c').unwrap(), Some(2));
        assert_eq!(region.memchr(Span::new(3, 3), b'a').unwrap(), Some(3));
        assert_eq!(region.memchr(Span::new(0, 2), b'c').unwrap(), None);
        assert!(region.memchr(Span::new(4, 3), b'a').is_err());
    }

    #[test]
    fn freeze_owned() {
        let region = Bigstring::copy_from("abc");
        assert_eq!(region.freeze(), Bytes::from_static(b"abc"));
    }

    #[test]
    fn freeze_borrowed_copies() {
        let mut backing = *b"xyz";
        let frozen = Bigstring::borrowed(&mut backing).freeze();
        backing[0] = b'a';
        assert_eq!(&backing, b"ayz");
        assert_eq!(frozen, Bytes::from_static(b"xyz"));
    }

    #[test]
    fn into_owned() {
        let mut backing = *b"xyz";
        let owned = Bigstring::borrowed(&mut backing).into_owned();
        assert!(owned.is_owned());
        assert_eq!(owned.as_slice(), b"xyz");
    }

    #[test]
    fn ordering() {
        assert!(bigstring![1, 2, 3] < bigstring![1, 2, 4]);
        assert_eq!(bigstring![1, 2, 3], Bigstring::from(vec![1, 2, 3]));
    }

    #[test]
    fn debug_output() {
        let out = format!("{:?}", bigstring![1, 2]);
        assert_eq!(
            out,
            "Bigstring { capacity: 2, storage: \"owned\", bytes: [1, 2] }"
        );
    }

    #[cfg(feature = "memmap2")]
    #[test]
    fn mapped() {
        let mut map = memmap2::MmapMut::map_anon(8).unwrap();
        map[0] = 42;
        let mut region = Bigstring::from(map);
        assert!(region.is_owned());
        assert_eq!(region.capacity(), 8);
        region.set(7, 1).unwrap();
        let frozen = region.freeze();
        assert_eq!(frozen[0], 42);
        assert_eq!(frozen[7], 1);
    }
}
