use std::fmt::{Debug, Formatter};

/// A wrapper around a byte slice that truncates the debug output if it is too long.
pub(crate) struct TruncatedDebug<'a>(pub(crate) &'a [u8]);

impl Debug for TruncatedDebug<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        const TRUNC_SIZE: usize = 32;
        if self.0.len() <= TRUNC_SIZE {
            write!(f, "{:?}", self.0)
        } else {
            write!(f, "[")?;
            for byte in self.0.iter().take(TRUNC_SIZE) {
                write!(f, "{byte}, ")?;
            }
            write!(f, "... {} more]", self.0.len() - TRUNC_SIZE)
        }
    }
}

#[cfg(test)]
mod test {
    use super::TruncatedDebug;

    #[test]
    fn short() {
        assert_eq!(format!("{:?}", TruncatedDebug(&[1, 2, 3])), "[1, 2, 3]");
    }

    #[test]
    fn truncated() {
        let bytes = [7u8; 40];
        let out = format!("{:?}", TruncatedDebug(&bytes));
        assert!(out.starts_with("[7, 7, "));
        assert!(out.ends_with("... 8 more]"));
    }
}
