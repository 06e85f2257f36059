//! System Call Numbers
//!
//! The numbering user mode is built against. Numbers are dense from 1;
//! 0 is never a valid call.

use bitflags::bitflags;

/// Length of a table covering every number below.
pub const NSYSCALL: usize = 23;

/// A known system call number.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyscallNumber {
    Fork = 1,
    Exit = 2,
    Wait = 3,
    Pipe = 4,
    Read = 5,
    Kill = 6,
    Exec = 7,
    Fstat = 8,
    Chdir = 9,
    Dup = 10,
    Getpid = 11,
    Sbrk = 12,
    Sleep = 13,
    Uptime = 14,
    Open = 15,
    Write = 16,
    Mknod = 17,
    Unlink = 18,
    Link = 19,
    Mkdir = 20,
    Close = 21,
    Trace = 22,
}

impl SyscallNumber {
    /// Every call, in numeric order.
    pub const ALL: [Self; NSYSCALL - 1] = [
        Self::Fork,
        Self::Exit,
        Self::Wait,
        Self::Pipe,
        Self::Read,
        Self::Kill,
        Self::Exec,
        Self::Fstat,
        Self::Chdir,
        Self::Dup,
        Self::Getpid,
        Self::Sbrk,
        Self::Sleep,
        Self::Uptime,
        Self::Open,
        Self::Write,
        Self::Mknod,
        Self::Unlink,
        Self::Link,
        Self::Mkdir,
        Self::Close,
        Self::Trace,
    ];

    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Index of this call in a syscall table.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Name as used in traces.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fork => "fork",
            Self::Exit => "exit",
            Self::Wait => "wait",
            Self::Pipe => "pipe",
            Self::Read => "read",
            Self::Kill => "kill",
            Self::Exec => "exec",
            Self::Fstat => "fstat",
            Self::Chdir => "chdir",
            Self::Dup => "dup",
            Self::Getpid => "getpid",
            Self::Sbrk => "sbrk",
            Self::Sleep => "sleep",
            Self::Uptime => "uptime",
            Self::Open => "open",
            Self::Write => "write",
            Self::Mknod => "mknod",
            Self::Unlink => "unlink",
            Self::Link => "link",
            Self::Mkdir => "mkdir",
            Self::Close => "close",
            Self::Trace => "trace",
        }
    }

    /// Trace-mask bit for this call.
    #[inline]
    pub const fn mask(self) -> SyscallMask {
        SyscallMask::from_bits_retain(1 << self.as_i32())
    }
}

impl TryFrom<i32> for SyscallNumber {
    type Error = i32;

    fn try_from(num: i32) -> Result<Self, Self::Error> {
        let idx = usize::try_from(num).map_err(|_| num)?;
        idx.checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(num)
    }
}

bitflags! {
    /// Set of calls selected for tracing, one bit per call number.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SyscallMask: u32 {
        const FORK = 1 << 1;
        const EXIT = 1 << 2;
        const WAIT = 1 << 3;
        const PIPE = 1 << 4;
        const READ = 1 << 5;
        const KILL = 1 << 6;
        const EXEC = 1 << 7;
        const FSTAT = 1 << 8;
        const CHDIR = 1 << 9;
        const DUP = 1 << 10;
        const GETPID = 1 << 11;
        const SBRK = 1 << 12;
        const SLEEP = 1 << 13;
        const UPTIME = 1 << 14;
        const OPEN = 1 << 15;
        const WRITE = 1 << 16;
        const MKNOD = 1 << 17;
        const UNLINK = 1 << 18;
        const LINK = 1 << 19;
        const MKDIR = 1 << 20;
        const CLOSE = 1 << 21;
        const TRACE = 1 << 22;
    }
}

impl SyscallMask {
    /// Check whether raw call number `num` is selected.
    ///
    /// Numbers with no bit in the mask (negative, or 32 and up) never are.
    pub fn traces(self, num: i32) -> bool {
        u32::try_from(num)
            .ok()
            .and_then(|n| 1u32.checked_shl(n))
            .map_or(false, |bit| self.bits() & bit != 0)
    }
}
