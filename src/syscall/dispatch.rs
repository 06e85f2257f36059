//! System Call Dispatch
//!
//! Single entry point for a trapped system call: read the number from the
//! saved registers, run the bound handler or report an unknown call, and
//! write the result back to `%eax`.
//!
//! # Security Considerations
//! - Only numbers with a bound handler run anything
//! - An unknown number is reported and returned as a failure, never fatal
//! - Handlers validate their own arguments through the fetch functions

use core::fmt::Write;

use crate::console::Console;
use crate::cprintln;
use crate::proc::Process;

use super::{SyscallError, SyscallTable};
#[cfg(feature = "trace")]
use super::SyscallNumber;

/// What happened to one system call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The handler for `num` ran and returned `ret`.
    Completed { num: i32, ret: i32 },
    /// No handler is bound to `num`.
    Unknown { num: i32 },
}

impl Outcome {
    /// Value written to the calling process's return register.
    pub fn return_value(&self) -> i32 {
        match *self {
            Self::Completed { ret, .. } => ret,
            Self::Unknown { num } => SyscallError::UnknownCall(num).as_return(),
        }
    }

    /// The requested call number.
    pub fn number(&self) -> i32 {
        match *self {
            Self::Completed { num, .. } | Self::Unknown { num } => num,
        }
    }
}

/// Routes system calls through a handler table.
pub struct Dispatcher<'k, W: Write, const N: usize> {
    table: &'k SyscallTable<N>,
    console: &'k Console<W>,
}

impl<'k, W: Write, const N: usize> Dispatcher<'k, W, N> {
    pub const fn new(table: &'k SyscallTable<N>, console: &'k Console<W>) -> Self {
        Self { table, console }
    }

    /// Handle the system call `proc` trapped with.
    ///
    /// The return register in `proc.tf` is written exactly once, after the
    /// handler (if any) has finished.
    pub fn syscall(&self, proc: &mut Process<'_>) -> Outcome {
        let num = proc.tf.syscall_number();

        let outcome = match self.table.lookup(num) {
            Some(handler) => {
                log::trace!("pid {}: syscall {}", proc.pid, num);
                let ret = handler(proc);
                #[cfg(feature = "trace")]
                self.trace(proc, num, ret);
                Outcome::Completed { num, ret }
            }
            None => {
                cprintln!(
                    self.console,
                    "{} {}: unknown sys call {}",
                    proc.pid,
                    proc.name,
                    num
                );
                Outcome::Unknown { num }
            }
        };

        proc.tf.set_return(outcome.return_value());
        outcome
    }

    /// Report a completed call if the process asked for it.
    #[cfg(feature = "trace")]
    fn trace(&self, proc: &Process<'_>, num: i32, ret: i32) {
        if !proc.trace.traces(num) {
            return;
        }
        let name = SyscallNumber::try_from(num).map_or("?", SyscallNumber::name);
        cprintln!(self.console, "{}: syscall {} -> {}", proc.pid, name, ret);
    }
}
