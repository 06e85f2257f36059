//! Saved Register Image
//!
//! The trap frame built on the kernel stack when user mode executes
//! `int $T_SYSCALL`. Entry and exit stubs live outside this crate; the
//! syscall layer only reads the call number and stack pointer and writes
//! the return register.
//!
//! # Calling Convention
//! - `%eax`: system call number on entry, return value on exit
//! - `%esp`: user stack, pointing at the return address of the libc stub
//! - Arguments follow the return address, one word each

use crate::mm::UserAddr;

/// Trap vector used for system calls.
pub const T_SYSCALL: u32 = 64;

/// Register state saved by the trap entry stub.
///
/// Layout matches the push order of `pushal`, the segment pushes, the
/// vector stub, and the hardware-pushed frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrapFrame {
    // registers as pushed by pushal
    pub edi: u32,
    pub esi: u32,
    pub ebp: u32,
    /// Useless, ignored by popal.
    pub oesp: u32,
    pub ebx: u32,
    pub edx: u32,
    pub ecx: u32,
    pub eax: u32,

    // rest of trap frame
    pub gs: u16,
    pub padding1: u16,
    pub fs: u16,
    pub padding2: u16,
    pub es: u16,
    pub padding3: u16,
    pub ds: u16,
    pub padding4: u16,
    pub trapno: u32,

    // below here defined by x86 hardware
    pub err: u32,
    pub eip: u32,
    pub cs: u16,
    pub padding5: u16,
    pub eflags: u32,

    // below here only when crossing rings
    pub esp: u32,
    pub ss: u16,
    pub padding6: u16,
}

impl TrapFrame {
    /// Build a frame as it looks on entry to a system call.
    pub fn for_syscall(num: i32, esp: u32) -> Self {
        Self {
            eax: num as u32,
            esp,
            trapno: T_SYSCALL,
            ..Self::default()
        }
    }

    /// Requested system call number.
    #[inline]
    pub fn syscall_number(&self) -> i32 {
        self.eax as i32
    }

    /// Saved user stack pointer.
    #[inline]
    pub fn user_stack(&self) -> UserAddr {
        UserAddr::new(self.esp)
    }

    /// Value the process will see in `%eax` after the call.
    #[inline]
    pub fn return_value(&self) -> i32 {
        self.eax as i32
    }

    /// Store the call's result for the return to user mode.
    #[inline]
    pub fn set_return(&mut self, value: i32) {
        self.eax = value as u32;
    }
}
