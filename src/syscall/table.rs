//! System Call Table
//!
//! A dense array of optional handlers indexed by call number. Slot 0 is
//! never bound. Out-of-range numbers and unbound slots both look up as
//! `None`, so neither can reach undefined behaviour.

use core::fmt;

use crate::proc::Process;

use super::SyscallNumber;

/// A kernel service registered under a call number.
///
/// Handlers take their arguments from the process themselves, via the
/// fetch functions, and return the value for `%eax`. A negative value is
/// the conventional failure signal.
pub type Handler = fn(&mut Process<'_>) -> i32;

/// Error for runtime table updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    /// The number is 0 or at least the table length.
    InvalidNumber,
    /// A handler is already bound to this number.
    SlotOccupied,
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber => write!(f, "invalid syscall number"),
            Self::SlotOccupied => write!(f, "syscall slot already bound"),
        }
    }
}

/// Map from call number to handler, with `N` slots.
#[derive(Clone, Copy)]
pub struct SyscallTable<const N: usize> {
    slots: [Option<Handler>; N],
}

impl<const N: usize> SyscallTable<N> {
    /// Create a table with every slot unbound.
    pub const fn new() -> Self {
        Self { slots: [None; N] }
    }

    /// Bind `handler` to `num` while building a table in a const context.
    ///
    /// # Panics
    /// Panics (at compile time when used in a `const`/`static`) if `num`
    /// is 0 or not below `N`.
    pub const fn with(mut self, num: usize, handler: Handler) -> Self {
        assert!(num > 0 && num < N, "syscall number outside table");
        self.slots[num] = Some(handler);
        self
    }

    /// Number of slots, including the unused slot 0.
    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        N <= 1
    }

    /// Bind `handler` to `num` at run time.
    pub fn bind(&mut self, num: usize, handler: Handler) -> Result<(), TableError> {
        if num == 0 {
            return Err(TableError::InvalidNumber);
        }
        let slot = self.slots.get_mut(num).ok_or(TableError::InvalidNumber)?;
        if slot.is_some() {
            return Err(TableError::SlotOccupied);
        }
        *slot = Some(handler);
        Ok(())
    }

    /// Bind a handler to a known call.
    pub fn bind_call(&mut self, call: SyscallNumber, handler: Handler) -> Result<(), TableError> {
        self.bind(call.index(), handler)
    }

    /// Remove the handler for `num`, returning it if one was bound.
    pub fn unbind(&mut self, num: usize) -> Option<Handler> {
        self.slots.get_mut(num).and_then(Option::take)
    }

    /// Resolve a raw call number read from user registers.
    pub fn lookup(&self, num: i32) -> Option<Handler> {
        let idx = usize::try_from(num).ok().filter(|&i| i > 0)?;
        self.slots.get(idx).copied().flatten()
    }

    /// Numbers that currently have a handler.
    pub fn bound(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(num, slot)| slot.map(|_| num))
    }
}

impl<const N: usize> Default for SyscallTable<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for SyscallTable<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyscallTable")
            .field("len", &N)
            .field("bound", &self.bound().count())
            .finish()
    }
}
