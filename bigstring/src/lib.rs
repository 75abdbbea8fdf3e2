#![deny(missing_docs)]

//! A bounds-checked, explicitly-owned byte buffer.
//!
//! A [`Bigstring`] is a contiguous region of bytes with a fixed capacity. It either owns its
//! storage or borrows it from an external owner. Sub-ranges are addressed through [`View`] and
//! [`ViewMut`], whose constructors are the only place bounds are checked.
//!
//! The crate provides bulk transfer and comparison over those ranges:
//!
//! * [`copy_between_regions`] and [`Bigstring::copy_within`] copy between regions with move
//!   semantics, so overlapping ranges are handled correctly.
//! * [`copy_to_sequence`] and [`copy_from_sequence`] copy between a region and an external byte
//!   sequence. These operands never alias.
//! * [`compare`] and [`compare_with_sequence`] compare equal-length ranges lexicographically.
//!
//! Every operation validates its operands before touching any byte. A failed operation leaves
//! the destination unchanged.
//!
//! # Concurrency
//!
//! Nothing here locks or allocates during a copy. A [`ViewMut`] borrows its region exclusively,
//! so the borrow checker enforces a single writer or any number of readers per region.

pub use bigstring::*;
pub use blit::*;
pub use compare::*;
pub use view::*;

mod bigstring;
mod blit;
mod compare;
mod debug;
mod int;
mod macros;
mod view;

static_assertions::assert_impl_all!(OwnedBigstring: Send, Sync);
static_assertions::assert_impl_all!(View<'static>: Send, Sync, Copy);
static_assertions::assert_impl_all!(ViewMut<'static>: Send, Sync);
