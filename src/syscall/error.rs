//! Syscall Layer Errors

use core::fmt;

use crate::config::SYSCALL_FAILURE;

/// Why a user argument could not be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchError {
    /// Address or address + length outside `[0, size)`, or the arithmetic wrapped.
    OutOfRange,
    /// No terminator between the string start and the end of the image.
    Unterminated,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange => write!(f, "address out of range"),
            Self::Unterminated => write!(f, "unterminated string"),
        }
    }
}

/// Failures surfaced to the calling process.
///
/// Every variant maps to the same return value: user mode sees a single
/// failure contract regardless of cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyscallError {
    /// An argument failed validation.
    Fetch(FetchError),
    /// The call number is out of range or has no handler.
    UnknownCall(i32),
}

impl SyscallError {
    /// Value written to the return register.
    #[inline]
    pub const fn as_return(self) -> i32 {
        SYSCALL_FAILURE
    }
}

impl From<FetchError> for SyscallError {
    fn from(err: FetchError) -> Self {
        Self::Fetch(err)
    }
}

impl fmt::Display for SyscallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(err) => write!(f, "bad argument: {}", err),
            Self::UnknownCall(num) => write!(f, "unknown sys call {}", num),
        }
    }
}
