//! Sysgate - System Call Boundary
//!
//! The trusted/untrusted boundary of the kernel's system-call layer.
//!
//! # Layers
//! - `mm`: user addresses, the per-process address space, validated spans
//! - `trap`: the saved register image built by the trap entry stub
//! - `proc`: the explicit process context handed to every operation
//! - `syscall`: argument fetching, numbering, the handler table, dispatch
//!
//! # Security Model
//! - Every user-supplied address is validated against the declared image size
//! - Address arithmetic is overflow-checked; a wrapped sum is a failure
//! - Failures become a sentinel return value, never a kernel fault
//! - There is no ambient "current process": callers pass the context explicitly

#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod console;
pub mod mm;
pub mod proc;
pub mod syscall;
pub mod trap;

pub use console::Console;
pub use mm::{AddressSpace, UserAddr, UserSpan, UserSpanMut, UserStr};
pub use proc::{Pid, ProcName, Process};
pub use syscall::{Dispatcher, FetchError, Handler, Outcome, SyscallNumber, SyscallTable};
pub use trap::TrapFrame;
