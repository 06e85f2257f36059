//! Built-in Services
//!
//! Calls that only touch state owned by the syscall layer itself. The
//! file, process, and memory services are registered by their own
//! subsystems.

use crate::proc::Process;

use super::fetch::arg_int;
use super::{SyscallError, SyscallMask, SyscallNumber, SyscallTable, NSYSCALL};

/// getpid() - return the caller's process id.
pub fn sys_getpid(proc: &mut Process<'_>) -> i32 {
    proc.pid.as_i32()
}

/// trace(mask) - select which of the caller's calls are reported.
///
/// Bit `n` of `mask` selects call number `n`.
pub fn sys_trace(proc: &mut Process<'_>) -> i32 {
    match arg_int(proc, 0) {
        Ok(mask) => {
            proc.trace = SyscallMask::from_bits_retain(mask as u32);
            0
        }
        Err(e) => SyscallError::from(e).as_return(),
    }
}

/// Table covering the full numbering, with the built-in services bound.
pub const fn kernel_table() -> SyscallTable<NSYSCALL> {
    SyscallTable::new()
        .with(SyscallNumber::Getpid.index(), sys_getpid)
        .with(SyscallNumber::Trace.index(), sys_trace)
}
