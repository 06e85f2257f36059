//! User memory access for the syscall layer
//!
//! Provides:
//! - `UserAddr`: untrusted user virtual addresses
//! - `AddressSpace`: one process image and its declared size
//! - `UserSpan`/`UserSpanMut`/`UserStr`: windows that exist only after validation
//!
//! # Security Principles
//! - No raw user address is dereferenced outside `AddressSpace`
//! - All bound checks are overflow-checked
//! - Unsafe code is confined to building an address space from a raw mapping

mod address;
mod space;
mod span;

pub use address::UserAddr;
pub use space::{AddressSpace, SpaceError};
pub use span::{UserSpan, UserSpanMut, UserStr};
