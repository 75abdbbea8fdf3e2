//! Bulk byte transfer between regions and byte sequences.
//!
//! Copies between two regions use move semantics and are correct for any overlap. Copies across
//! storage classes, between a region and an external byte sequence, require disjoint operands and
//! check for it instead of assuming it.

use std::ops::Range;

use bigstring_error::{BigstringResult, bigstring_bail, bigstring_err};

use crate::Bigstring;
use crate::view::{Span, View, ViewMut};

/// Copy every byte of `src` into `dst` starting at `dst_offset`.
///
/// Fails with `OutOfBounds` if `dst_offset + src.len()` exceeds `dst.len()`. Nothing is written
/// on failure.
pub fn copy_to_sequence(src: &View<'_>, dst: &mut [u8], dst_offset: usize) -> BigstringResult<()> {
    let range = Span::new(dst_offset, src.len())
        .check(dst.len())
        .inspect_err(|e| log::debug!("copy_to_sequence rejected: {e}"))?;
    let dst = &mut dst[range];
    ensure_disjoint(src.as_slice(), dst)?;
    log::trace!("copy_to_sequence: {} bytes at {}", src.len(), dst_offset);
    dst.copy_from_slice(src.as_slice());
    Ok(())
}

/// Copy `dst.len()` bytes from `src` starting at `src_offset` into `dst`.
///
/// Fails with `OutOfBounds` if `src_offset + dst.len()` exceeds `src.len()`. Nothing is written
/// on failure.
pub fn copy_from_sequence(
    src: &[u8],
    src_offset: usize,
    dst: &mut ViewMut<'_>,
) -> BigstringResult<()> {
    let range = Span::new(src_offset, dst.len())
        .check(src.len())
        .inspect_err(|e| log::debug!("copy_from_sequence rejected: {e}"))?;
    let src = &src[range];
    ensure_disjoint(src, dst.as_slice())?;
    log::trace!("copy_from_sequence: {} bytes from {}", src.len(), src_offset);
    dst.as_mut_slice().copy_from_slice(src);
    Ok(())
}

/// Copy every byte of `src` into `dst`, which must have the same length.
///
/// The copy has move semantics: it is correct even if the two views address overlapping memory.
/// To copy between overlapping ranges of a single region, see [`Bigstring::copy_within`].
pub fn copy_between_regions(src: &View<'_>, dst: &mut ViewMut<'_>) -> BigstringResult<()> {
    if src.len() != dst.len() {
        let err = bigstring_err!(LengthMismatch: dst.len(), src.len());
        log::debug!("copy_between_regions rejected: {err}");
        return Err(err);
    }
    log::trace!("copy_between_regions: {} bytes", src.len());
    let dst = dst.as_mut_slice();
    // SAFETY: both pointers come from slices that are valid for `src.len()` bytes, and
    // `ptr::copy` permits the ranges to overlap.
    unsafe { std::ptr::copy(src.as_slice().as_ptr(), dst.as_mut_ptr(), src.len()) };
    Ok(())
}

impl Bigstring<'_> {
    /// Copy the bytes in `src` to `dst` within this region.
    ///
    /// The spans may overlap; the result is as if `src` were first copied to a temporary buffer.
    pub fn copy_within(&mut self, src: Span, dst: Span) -> BigstringResult<()> {
        let src_range = check_within(self.capacity(), src, dst)
            .inspect_err(|e| log::debug!("copy_within rejected: {e}"))?;
        log::trace!(
            "copy_within: {} bytes {} -> {} (overlapping: {})",
            src.len,
            src.offset,
            dst.offset,
            src.overlaps(&dst)
        );
        self.as_mut_slice().copy_within(src_range, dst.offset);
        Ok(())
    }

    /// Copy `len` bytes starting at `src_offset` in this region into `dst` at `dst_offset`.
    pub fn blit(
        &self,
        src_offset: usize,
        dst: &mut Bigstring<'_>,
        dst_offset: usize,
        len: usize,
    ) -> BigstringResult<()> {
        let src = self.view(Span::new(src_offset, len))?;
        let mut dst = dst.view_mut(Span::new(dst_offset, len))?;
        copy_between_regions(&src, &mut dst)
    }

    /// Copy `len` bytes starting at `src_offset` in this region into a byte sequence.
    pub fn blit_to_bytes(
        &self,
        src_offset: usize,
        dst: &mut [u8],
        dst_offset: usize,
        len: usize,
    ) -> BigstringResult<()> {
        let src = self.view(Span::new(src_offset, len))?;
        copy_to_sequence(&src, dst, dst_offset)
    }

    /// Copy `len` bytes from a byte sequence into this region at `dst_offset`.
    pub fn blit_from_bytes(
        &mut self,
        src: &[u8],
        src_offset: usize,
        dst_offset: usize,
        len: usize,
    ) -> BigstringResult<()> {
        let mut dst = self.view_mut(Span::new(dst_offset, len))?;
        copy_from_sequence(src, src_offset, &mut dst)
    }
}

fn check_within(capacity: usize, src: Span, dst: Span) -> BigstringResult<Range<usize>> {
    let src_range = src.check(capacity)?;
    dst.check(capacity)?;
    if src.len != dst.len {
        bigstring_bail!(LengthMismatch: dst.len, src.len);
    }
    Ok(src_range)
}

/// Cross-storage copies are implemented as non-overlapping copies. Reject operands that share
/// memory, which can only happen if a region was built from raw parts that alias a sequence.
fn ensure_disjoint(a: &[u8], b: &[u8]) -> BigstringResult<()> {
    if a.is_empty() || b.is_empty() {
        return Ok(());
    }
    let a_range = a.as_ptr_range();
    let b_range = b.as_ptr_range();
    if a_range.start < b_range.end && b_range.start < a_range.end {
        bigstring_bail!(
            "Cannot copy between a bigstring and a byte sequence that share memory ({:p}, {:p})",
            a_range.start,
            b_range.start
        );
    }
    Ok(())
}
