#![deny(missing_docs)]

//! Error handling for bigstring.
//!
//! Every fallible operation in the `bigstring` crate returns a [`BigstringResult`]. Errors are
//! deterministic precondition failures: an offset/length pair that does not fit inside a region,
//! or two operands that were required to have equal length. None of them are transient.

use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Deref;

/// A string that can be used as an error message.
#[derive(Debug)]
pub struct ErrString(Cow<'static, str>);

impl<T> From<T> for ErrString
where
    T: Into<Cow<'static, str>>,
{
    fn from(msg: T) -> Self {
        Self(msg.into())
    }
}

impl AsRef<str> for ErrString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for ErrString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ErrString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// The top-level error type for bigstring.
#[derive(thiserror::Error)]
#[non_exhaustive]
pub enum BigstringError {
    /// A range of `len` bytes starting at `offset` does not fit inside a region of `capacity`.
    #[error("range {0}+{1} out of bounds for capacity {2}\nBacktrace:\n{3}")]
    OutOfBounds(usize, usize, usize, Box<Backtrace>),
    /// Two operands that must have the same length do not.
    #[error("length mismatch: expected {0} bytes, got {1}\nBacktrace:\n{2}")]
    LengthMismatch(usize, usize, Box<Backtrace>),
    /// An operand is not valid for the requested operation.
    #[error("{0}\nBacktrace:\n{1}")]
    InvalidArgument(ErrString, Box<Backtrace>),
    /// An assertion failed.
    #[error("{0}\nBacktrace:\n{1}")]
    AssertionFailed(ErrString, Box<Backtrace>),
    /// A wrapped error with additional context.
    #[error("{0}: {1}")]
    Context(ErrString, Box<BigstringError>),
}

impl BigstringError {
    /// Adds additional context to an error.
    pub fn with_context<T: Into<ErrString>>(self, msg: T) -> Self {
        BigstringError::Context(msg.into(), Box::new(self))
    }

    /// Returns the innermost error, skipping over any layers of context.
    pub fn root(&self) -> &BigstringError {
        match self {
            BigstringError::Context(_, inner) => inner.root(),
            other => other,
        }
    }

    /// Returns true if the root cause is [`BigstringError::OutOfBounds`].
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self.root(), BigstringError::OutOfBounds(..))
    }

    /// Returns true if the root cause is [`BigstringError::LengthMismatch`].
    pub fn is_length_mismatch(&self) -> bool {
        matches!(self.root(), BigstringError::LengthMismatch(..))
    }
}

impl Debug for BigstringError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

/// A type alias for Results that return [`BigstringError`]s as their error type.
pub type BigstringResult<T> = Result<T, BigstringError>;

/// A trait for expect-ing a BigstringResult or an Option.
pub trait BigstringExpect {
    /// The type of the value being expected.
    type Output;

    /// Returns the value of the result if it is Ok, otherwise panics with the error.
    /// Should be used only in cases where the invariant is guaranteed by the caller.
    fn bigstring_expect(self, msg: &str) -> Self::Output;
}

impl<T, E> BigstringExpect for Result<T, E>
where
    E: Into<BigstringError>,
{
    type Output = T;

    #[inline(always)]
    fn bigstring_expect(self, msg: &str) -> Self::Output {
        self.map_err(|err| err.into())
            .unwrap_or_else(|e| bigstring_panic!(e.with_context(msg.to_string())))
    }
}

impl<T> BigstringExpect for Option<T> {
    type Output = T;

    #[inline(always)]
    fn bigstring_expect(self, msg: &str) -> Self::Output {
        self.unwrap_or_else(|| {
            let err = BigstringError::AssertionFailed(
                msg.to_string().into(),
                Box::new(Backtrace::capture()),
            );
            bigstring_panic!(err)
        })
    }
}

/// A convenient macro for creating a [`BigstringError`].
#[macro_export]
macro_rules! bigstring_err {
    (OutOfBounds: $offset:expr, $len:expr, $capacity:expr) => {{
        use std::backtrace::Backtrace;
        $crate::__private::must_use($crate::BigstringError::OutOfBounds(
            $offset,
            $len,
            $capacity,
            Box::new(Backtrace::capture()),
        ))
    }};
    (LengthMismatch: $expected:expr, $actual:expr) => {{
        use std::backtrace::Backtrace;
        $crate::__private::must_use($crate::BigstringError::LengthMismatch(
            $expected,
            $actual,
            Box::new(Backtrace::capture()),
        ))
    }};
    ($variant:ident: $fmt:literal $(, $arg:expr)* $(,)?) => {{
        use std::backtrace::Backtrace;
        $crate::__private::must_use($crate::BigstringError::$variant(
            format!($fmt, $($arg),*).into(),
            Box::new(Backtrace::capture()),
        ))
    }};
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::bigstring_err!(InvalidArgument: $fmt, $($arg),*)
    };
}

/// A convenient macro for returning a [`BigstringError`].
#[macro_export]
macro_rules! bigstring_bail {
    ($($tt:tt)+) => {
        return Err($crate::bigstring_err!($($tt)+))
    };
}

/// A convenient macro for panicking with a [`BigstringError`] in the presence of a programmer
/// error (e.g., an invariant has been violated).
#[macro_export]
macro_rules! bigstring_panic {
    (OutOfBounds: $offset:expr, $len:expr, $capacity:expr) => {{
        $crate::bigstring_panic!($crate::bigstring_err!(OutOfBounds: $offset, $len, $capacity))
    }};
    ($variant:ident: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::bigstring_panic!($crate::bigstring_err!($variant: $fmt, $($arg),*))
    };
    ($err:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {{
        let err: $crate::BigstringError = $err;
        panic!("{}", err.with_context(format!($fmt, $($arg),*)))
    }};
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::bigstring_panic!($crate::bigstring_err!($fmt, $($arg),*))
    };
    ($err:expr) => {{
        let err: $crate::BigstringError = $err;
        panic!("{}", err)
    }};
}

#[doc(hidden)]
pub mod __private {
    #[doc(hidden)]
    #[inline]
    #[must_use]
    pub const fn must_use(error: crate::BigstringError) -> crate::BigstringError {
        error
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn bail_out_of_bounds() -> BigstringResult<()> {
        bigstring_bail!(OutOfBounds: 8, 4, 10)
    }

    #[test]
    fn out_of_bounds_message() {
        let err = bail_out_of_bounds().unwrap_err();
        assert!(err.is_out_of_bounds());
        assert!(err.to_string().starts_with("range 8+4 out of bounds for capacity 10"));
    }

    #[test]
    fn context_keeps_root() {
        let err = bigstring_err!(LengthMismatch: 3, 4).with_context("comparing views");
        assert!(err.is_length_mismatch());
        assert!(!err.is_out_of_bounds());
        assert!(err.to_string().starts_with("comparing views: length mismatch"));
    }

    #[test]
    fn formatted_invalid_argument() {
        let err = bigstring_err!("operands alias at {:#x}", 16);
        assert!(matches!(err, BigstringError::InvalidArgument(..)));
        assert!(err.to_string().starts_with("operands alias at 0x10"));
    }

    #[test]
    fn boxed_backtrace() {
        let err = bigstring_err!(LengthMismatch: 1, 2);
        let source: &dyn std::error::Error = &err;
        assert!(source.source().is_none());
        let BigstringError::LengthMismatch(_, _, backtrace) = err else {
            unreachable!("constructed as a length mismatch")
        };
        let backtrace: &Backtrace = &backtrace;
        assert!(!format!("{backtrace}").contains("length mismatch"));
    }

    #[test]
    fn expect_some() {
        assert_eq!(Some(7u8).bigstring_expect("present"), 7);
    }

    #[test]
    #[should_panic(expected = "index must exist")]
    fn expect_none_panics() {
        let value: Option<u8> = None;
        value.bigstring_expect("index must exist");
    }

    #[test]
    #[should_panic(expected = "validated range")]
    fn expect_err_panics_with_context() {
        let result: BigstringResult<()> = Err(bigstring_err!(OutOfBounds: 0, 1, 0));
        result.bigstring_expect("validated range");
    }
}
