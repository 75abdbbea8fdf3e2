use bigstring_error::BigstringResult;
use bytes::{Buf, BufMut};

use crate::Bigstring;
use crate::view::Span;

macro_rules! int_accessors {
    ($($ty:ty => $get:ident / $set:ident via $buf_get:ident / $buf_put:ident, $endian:literal;)*) => {
        impl Bigstring<'_> {
            $(
            #[doc = concat!("Read a ", $endian, " `", stringify!($ty), "` starting at `offset`.")]
            pub fn $get(&self, offset: usize) -> BigstringResult<$ty> {
                let mut src = self.view(Span::new(offset, size_of::<$ty>()))?.as_slice();
                Ok(src.$buf_get())
            }

            #[doc = concat!("Write a ", $endian, " `", stringify!($ty), "` starting at `offset`.")]
            pub fn $set(&mut self, offset: usize, value: $ty) -> BigstringResult<()> {
                let mut dst = self
                    .view_mut(Span::new(offset, size_of::<$ty>()))?
                    .into_mut_slice();
                dst.$buf_put(value);
                Ok(())
            }
            )*
        }
    };
}

int_accessors! {
    u16 => get_u16_le / set_u16_le via get_u16_le / put_u16_le, "little-endian";
    u16 => get_u16_be / set_u16_be via get_u16 / put_u16, "big-endian";
    i16 => get_i16_le / set_i16_le via get_i16_le / put_i16_le, "little-endian";
    i16 => get_i16_be / set_i16_be via get_i16 / put_i16, "big-endian";
    u32 => get_u32_le / set_u32_le via get_u32_le / put_u32_le, "little-endian";
    u32 => get_u32_be / set_u32_be via get_u32 / put_u32, "big-endian";
    i32 => get_i32_le / set_i32_le via get_i32_le / put_i32_le, "little-endian";
    i32 => get_i32_be / set_i32_be via get_i32 / put_i32, "big-endian";
    u64 => get_u64_le / set_u64_le via get_u64_le / put_u64_le, "little-endian";
    u64 => get_u64_be / set_u64_be via get_u64 / put_u64, "big-endian";
    i64 => get_i64_le / set_i64_le via get_i64_le / put_i64_le, "little-endian";
    i64 => get_i64_be / set_i64_be via get_i64 / put_i64, "big-endian";
}
