//! Process Context
//!
//! The explicit handle the syscall layer works on. Whoever enters the
//! kernel on behalf of a process builds (or looks up) its `Process` and
//! passes it down; nothing here consults a global "current process".

use core::fmt;

use crate::config::PROC_NAME_LEN;
use crate::mm::AddressSpace;
use crate::syscall::SyscallMask;
use crate::trap::TrapFrame;

/// Process identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(transparent)]
pub struct Pid(i32);

impl Pid {
    #[inline]
    pub const fn new(pid: i32) -> Self {
        Self(pid)
    }

    #[inline]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-readable process name, stored inline and nul-padded.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ProcName {
    bytes: [u8; PROC_NAME_LEN],
    len: usize,
}

impl ProcName {
    /// Build a name, truncating on a character boundary if it is too long.
    pub fn new(name: &str) -> Self {
        let mut len = name.len().min(PROC_NAME_LEN);
        while !name.is_char_boundary(len) {
            len -= 1;
        }
        let mut bytes = [0u8; PROC_NAME_LEN];
        bytes[..len].copy_from_slice(&name.as_bytes()[..len]);
        Self { bytes, len }
    }

    pub fn as_str(&self) -> &str {
        // Built from a `&str` prefix that ends on a char boundary.
        core::str::from_utf8(&self.bytes[..self.len]).unwrap_or("")
    }
}

impl fmt::Debug for ProcName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for ProcName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of a process that is relevant to one system call.
#[derive(Debug)]
pub struct Process<'m> {
    pub pid: Pid,
    pub name: ProcName,
    /// The process image and its declared size.
    pub space: AddressSpace<'m>,
    /// Register image saved at trap entry.
    pub tf: TrapFrame,
    /// Calls to report on the console when they return.
    pub trace: SyscallMask,
}

impl<'m> Process<'m> {
    pub fn new(pid: Pid, name: &str, space: AddressSpace<'m>, tf: TrapFrame) -> Self {
        Self {
            pid,
            name: ProcName::new(name),
            space,
            tf,
            trace: SyscallMask::empty(),
        }
    }
}
