//! User Virtual Address Type
//!
//! A newtype for addresses supplied by user mode. The process image is a
//! single flat range starting at address 0, so a user address is simply an
//! offset into that range.
//!
//! # Security Properties
//! - Arithmetic is only available in checked form
//! - Conversion to a kernel pointer happens inside `AddressSpace`, never here

use core::fmt;

/// An untrusted 32-bit user virtual address.
///
/// Holding a `UserAddr` says nothing about validity. It only keeps user
/// addresses from being mixed with kernel values or lengths.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct UserAddr(u32);

impl UserAddr {
    /// The lowest user address.
    pub const NULL: Self = Self(0);

    /// Wrap a raw user address.
    #[inline]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Reinterpret a signed word fetched from user memory as an address.
    ///
    /// Negative values become addresses at the top of the 32-bit range,
    /// which no address space of declared size can contain.
    #[inline]
    pub const fn from_word(word: i32) -> Self {
        Self(word as u32)
    }

    /// Get the raw address value.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Get the address as an index into the backing image.
    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Add an offset, returning `None` if the result wraps past `u32::MAX`.
    #[inline]
    pub const fn checked_add(self, offset: u32) -> Option<Self> {
        match self.0.checked_add(offset) {
            Some(addr) => Some(Self(addr)),
            None => None,
        }
    }
}

impl From<u32> for UserAddr {
    fn from(addr: u32) -> Self {
        Self(addr)
    }
}

impl fmt::Debug for UserAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserAddr({:#010x})", self.0)
    }
}

impl fmt::Display for UserAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_add_wraps_to_none() {
        assert_eq!(UserAddr::new(u32::MAX - 3).checked_add(4), None);
        assert_eq!(
            UserAddr::new(u32::MAX - 4).checked_add(4),
            Some(UserAddr::new(u32::MAX))
        );
    }

    #[test]
    fn test_negative_word_is_high_address() {
        assert_eq!(UserAddr::from_word(-1).as_u32(), u32::MAX);
        assert_eq!(UserAddr::from_word(-4096).as_u32(), 0xFFFF_F000);
    }

    #[test]
    fn test_display() {
        use std::format;
        assert_eq!(format!("{}", UserAddr::new(0x1000)), "0x00001000");
        assert_eq!(format!("{:?}", UserAddr::new(0x10)), "UserAddr(0x00000010)");
    }
}
