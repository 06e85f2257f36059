//! Compile-time kernel parameters for the syscall layer.

/// Size of a machine word on the user stack (32-bit x86).
pub const WORD_SIZE: u32 = 4;

/// Size of an `int` fetched from user memory.
pub const INT_SIZE: u32 = 4;

/// Value written to the return register when a call fails.
pub const SYSCALL_FAILURE: i32 = -1;

/// Maximum length of a process name, including padding.
pub const PROC_NAME_LEN: usize = 16;
