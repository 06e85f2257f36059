//! Validated User Spans
//!
//! Handles onto process memory that can only be produced by
//! `AddressSpace` after bounds validation. Holding one is proof that
//! `[addr, addr + len)` lies inside the declared image.
//!
//! Spans borrow process memory directly; nothing is copied. This is sound
//! only while no other execution context can mutate the image, which the
//! surrounding kernel guarantees for the duration of a system call.

use core::str::Utf8Error;

use super::UserAddr;

/// A validated read-only window into user memory.
#[derive(Debug, Clone, Copy)]
pub struct UserSpan<'a> {
    addr: UserAddr,
    bytes: &'a [u8],
}

impl<'a> UserSpan<'a> {
    pub(crate) fn new(addr: UserAddr, bytes: &'a [u8]) -> Self {
        Self { addr, bytes }
    }

    /// User address of the first byte.
    #[inline]
    pub fn addr(&self) -> UserAddr {
        self.addr
    }

    /// Length of the window in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The window contents.
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

/// A validated read/write window into user memory.
#[derive(Debug)]
pub struct UserSpanMut<'a> {
    addr: UserAddr,
    bytes: &'a mut [u8],
}

impl<'a> UserSpanMut<'a> {
    pub(crate) fn new(addr: UserAddr, bytes: &'a mut [u8]) -> Self {
        Self { addr, bytes }
    }

    /// User address of the first byte.
    #[inline]
    pub fn addr(&self) -> UserAddr {
        self.addr
    }

    /// Length of the window in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bytes
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.bytes
    }
}

/// A validated nul-terminated user string, terminator excluded.
#[derive(Debug, Clone, Copy)]
pub struct UserStr<'a> {
    addr: UserAddr,
    bytes: &'a [u8],
}

impl<'a> UserStr<'a> {
    pub(crate) fn new(addr: UserAddr, bytes: &'a [u8]) -> Self {
        Self { addr, bytes }
    }

    /// User address of the first character.
    #[inline]
    pub fn addr(&self) -> UserAddr {
        self.addr
    }

    /// Length in bytes, not counting the terminator.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Interpret the string as UTF-8.
    ///
    /// User strings are arbitrary bytes; callers that need text must be
    /// prepared for this to fail.
    pub fn to_str(&self) -> Result<&'a str, Utf8Error> {
        core::str::from_utf8(self.bytes)
    }
}
