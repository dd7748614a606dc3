// Error reporting for the field engine. Every fallible operation returns a
// tagged `Error` rather than aborting; see `ErrorKind` for the kinds raised.
//
// We want a few things here:
// 1. A way to create a new error with a backtrace
// 2. A stable, matchable kind so callers can distinguish e.g. a bad hex
//    string from a non-invertible element without parsing message text
// 3. A way to log errors into the tracing system at the point they're raised

use std::borrow::Cow;
use std::fmt;

use backtrace_error::DynBacktraceError;
use tracing::error;

/// The reason an operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A hex string was malformed or too wide, or an Elligator input was
    /// outside `[0, (q-1)/2]`.
    InvalidInput,
    /// A division or generic-modulus reduction was asked to divide by zero.
    DivisionByZero,
    /// `inv`/`egcd` found gcd(a, m) != 1.
    NotInvertible,
    /// A left shift would have produced a result wider than `CAPACITY`.
    Overflow,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::InvalidInput => "invalid input",
            ErrorKind::DivisionByZero => "division by zero",
            ErrorKind::NotInvertible => "value has no modular inverse",
            ErrorKind::Overflow => "shift result exceeds capacity",
        };
        write!(f, "{s}")
    }
}

struct FieldError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
}

impl fmt::Debug for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)
    }
}
impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)
    }
}
impl std::error::Error for FieldError {}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    inner: DynBacktraceError,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    fn new(kind: ErrorKind, msg: impl Into<Cow<'static, str>>) -> Error {
        let field_err = FieldError { kind, msg: msg.into() };
        error!(target: "curve1174", kind = ?kind, "{}", field_err);
        Error { kind, inner: DynBacktraceError::from(field_err) }
    }

    /// The kind of failure, for callers that want to branch on it.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.inner)
    }
}

pub(crate) fn invalid_input(msg: impl Into<Cow<'static, str>>) -> Error {
    Error::new(ErrorKind::InvalidInput, msg)
}

pub(crate) fn division_by_zero() -> Error {
    Error::new(ErrorKind::DivisionByZero, "divisor is zero")
}

pub(crate) fn not_invertible() -> Error {
    Error::new(ErrorKind::NotInvertible, "gcd(a, m) != 1")
}

pub(crate) fn overflow(msg: impl Into<Cow<'static, str>>) -> Error {
    Error::new(ErrorKind::Overflow, msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn kinds_are_distinguishable() {
        assert_eq!(invalid_input("bad hex").kind(), ErrorKind::InvalidInput);
        assert_eq!(division_by_zero().kind(), ErrorKind::DivisionByZero);
        assert_eq!(not_invertible().kind(), ErrorKind::NotInvertible);
        assert_eq!(overflow("too wide").kind(), ErrorKind::Overflow);
    }

    #[test]
    fn display_includes_message() {
        let e = invalid_input("t out of range");
        let s = format!("{e}");
        assert!(s.contains("t out of range"));
    }
}
