/// A macro for constructing owned bigstrings akin to `vec![..]`.
#[macro_export]
macro_rules! bigstring {
    () => (
        $crate::Bigstring::empty()
    );
    ($elem:expr; $n:expr) => (
        $crate::Bigstring::full($elem, $n)
    );
    ($($x:expr),+ $(,)?) => {{
        let bytes: &[u8] = &[$($x),+];
        $crate::Bigstring::copy_from(bytes)
    }};
}
