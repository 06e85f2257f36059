//! System Call Interface
//!
//! The boundary between untrusted user mode and kernel services.
//!
//! # Security Model
//! - Whitelist approach: only numbers with a bound handler run anything
//! - All arguments are validated against the caller's image before use
//! - Invalid inputs return a failure value, never panic
//!
//! # Flow
//! trap entry -> `Dispatcher::syscall` -> handler -> `fetch::arg_*` -> result in `%eax`

mod builtin;
mod dispatch;
mod error;
pub mod fetch;
mod numbers;
mod table;

pub use builtin::{kernel_table, sys_getpid, sys_trace};
pub use dispatch::{Dispatcher, Outcome};
pub use error::{FetchError, SyscallError};
pub use fetch::{arg_int, arg_ptr, arg_ptr_mut, arg_str, fetch_int, fetch_str};
pub use numbers::{SyscallMask, SyscallNumber, NSYSCALL};
pub use table::{Handler, SyscallTable, TableError};
