//! Per-Process Address Space
//!
//! The kernel's view of one process image: a flat range of user addresses
//! `[0, size)` backed by memory the kernel can reach directly.
//!
//! # Security Checks
//! 1. The start address lies inside the image (half-open: `size` itself is out)
//! 2. Start + length does not wrap past `u32::MAX`
//! 3. The end address does not pass `size`
//! 4. Slicing of the backing memory is itself checked, so a broken
//!    invariant yields an error rather than a panic

use core::fmt;
use core::ops::Range;

use super::{UserAddr, UserSpan, UserSpanMut, UserStr};
use crate::config::INT_SIZE;
use crate::syscall::FetchError;

/// Errors from managing the image itself (as opposed to validating user input).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceError {
    /// The declared size is larger than the memory backing the image.
    SizeExceedsBacking,
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeExceedsBacking => write!(f, "declared size exceeds backing memory"),
        }
    }
}

/// The address space of one process.
pub struct AddressSpace<'m> {
    /// Kernel mapping of user addresses `[0, mem.len())`.
    mem: &'m mut [u8],
    /// Exclusive upper bound of valid user addresses.
    size: u32,
}

impl<'m> AddressSpace<'m> {
    /// Create an address space over `mem` with `size` bytes declared valid.
    ///
    /// The backing may be larger than the declared size (an image is
    /// usually mapped in whole pages); only `[0, size)` is ever exposed.
    pub fn new(mem: &'m mut [u8], size: u32) -> Result<Self, SpaceError> {
        if size as usize > mem.len() {
            return Err(SpaceError::SizeExceedsBacking);
        }
        Ok(Self { mem, size })
    }

    /// Create an address space over a raw kernel mapping of the image.
    ///
    /// # Safety
    /// - `base` must be valid for reads and writes of `size` bytes for `'m`
    /// - No other reference to that memory may be used during `'m`
    pub unsafe fn from_raw_parts(base: *mut u8, size: u32) -> Self {
        // SAFETY: the caller guarantees `base..base + size` is a live,
        // exclusively borrowed mapping for 'm.
        let mem = unsafe { core::slice::from_raw_parts_mut(base, size as usize) };
        Self { mem, size }
    }

    /// Exclusive upper bound of valid user addresses.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Change the declared size, e.g. after the image grows or shrinks.
    pub fn set_size(&mut self, size: u32) -> Result<(), SpaceError> {
        if size as usize > self.mem.len() {
            return Err(SpaceError::SizeExceedsBacking);
        }
        self.size = size;
        Ok(())
    }

    /// Check whether `addr` is inside the image.
    #[inline]
    pub fn contains(&self, addr: UserAddr) -> bool {
        addr.as_u32() < self.size
    }

    /// Validate `[addr, addr + len)` and return it as an index range.
    fn check(&self, addr: UserAddr, len: u32) -> Result<Range<usize>, FetchError> {
        if !self.contains(addr) {
            return Err(FetchError::OutOfRange);
        }
        let end = addr.checked_add(len).ok_or(FetchError::OutOfRange)?;
        if end.as_u32() > self.size {
            return Err(FetchError::OutOfRange);
        }
        Ok(addr.as_usize()..end.as_usize())
    }

    /// Validate a read-only window of `len` bytes at `addr`.
    pub fn span(&self, addr: UserAddr, len: u32) -> Result<UserSpan<'_>, FetchError> {
        let range = self.check(addr, len)?;
        let bytes = self.mem.get(range).ok_or(FetchError::OutOfRange)?;
        Ok(UserSpan::new(addr, bytes))
    }

    /// Validate a read/write window of `len` bytes at `addr`.
    pub fn span_mut(&mut self, addr: UserAddr, len: u32) -> Result<UserSpanMut<'_>, FetchError> {
        let range = self.check(addr, len)?;
        let bytes = self.mem.get_mut(range).ok_or(FetchError::OutOfRange)?;
        Ok(UserSpanMut::new(addr, bytes))
    }

    /// Read a native-endian 32-bit integer at `addr`.
    pub fn read_i32(&self, addr: UserAddr) -> Result<i32, FetchError> {
        let span = self.span(addr, INT_SIZE)?;
        let word: [u8; 4] = span
            .as_bytes()
            .try_into()
            .map_err(|_| FetchError::OutOfRange)?;
        Ok(i32::from_ne_bytes(word))
    }

    /// Find the nul-terminated string starting at `addr`.
    ///
    /// The scan never looks at or past `size`. The returned view excludes
    /// the terminator and points into the image; nothing is copied.
    pub fn scan_str(&self, addr: UserAddr) -> Result<UserStr<'_>, FetchError> {
        if !self.contains(addr) {
            return Err(FetchError::OutOfRange);
        }
        let tail = self
            .mem
            .get(addr.as_usize()..self.size as usize)
            .ok_or(FetchError::OutOfRange)?;
        match tail.iter().position(|&b| b == 0) {
            Some(len) => Ok(UserStr::new(addr, &tail[..len])),
            None => Err(FetchError::Unterminated),
        }
    }
}

impl fmt::Debug for AddressSpace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AddressSpace")
            .field("size", &self.size)
            .field("backing", &self.mem.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_size_must_fit_backing() {
        let mut mem = [0u8; 64];
        assert_eq!(
            AddressSpace::new(&mut mem, 65).err(),
            Some(SpaceError::SizeExceedsBacking)
        );
        let mut space = AddressSpace::new(&mut mem, 32).unwrap();
        assert!(space.set_size(64).is_ok());
        assert_eq!(space.set_size(128), Err(SpaceError::SizeExceedsBacking));
        assert_eq!(space.size(), 64);
    }

    #[test]
    fn test_half_open_bounds() {
        let mut mem = [0u8; 64];
        let space = AddressSpace::new(&mut mem, 32).unwrap();
        assert!(space.contains(UserAddr::new(31)));
        assert!(!space.contains(UserAddr::new(32)));
        assert!(space.span(UserAddr::new(28), 4).is_ok());
        assert_eq!(space.span(UserAddr::new(29), 4).err(), Some(FetchError::OutOfRange));
        // Bytes past the declared size stay hidden even though they are mapped.
        assert_eq!(space.span(UserAddr::new(32), 0).err(), Some(FetchError::OutOfRange));
    }

    #[test]
    fn test_wrapping_length_rejected() {
        let mut mem = [0u8; 64];
        let space = AddressSpace::new(&mut mem, 64).unwrap();
        assert_eq!(
            space.span(UserAddr::new(16), u32::MAX).err(),
            Some(FetchError::OutOfRange)
        );
    }

    #[test]
    fn test_span_mut_writes_through() {
        let mut mem = [0u8; 16];
        {
            let mut space = AddressSpace::new(&mut mem, 16).unwrap();
            let mut span = space.span_mut(UserAddr::new(4), 3).unwrap();
            span.as_bytes_mut().copy_from_slice(b"abc");
        }
        assert_eq!(&mem[4..7], b"abc");
    }

    #[test]
    fn test_scan_stops_at_declared_size() {
        let mut mem = *b"hi\0xyzw\0";
        let space = AddressSpace::new(&mut mem, 7).unwrap();
        assert_eq!(space.scan_str(UserAddr::new(0)).unwrap().as_bytes(), b"hi");
        // Terminator at index 7 lies outside the declared image.
        assert_eq!(
            space.scan_str(UserAddr::new(3)).err(),
            Some(FetchError::Unterminated)
        );
    }

    #[test]
    fn test_raw_parts() {
        let mut mem = [0u8; 8];
        mem[..4].copy_from_slice(&7i32.to_ne_bytes());
        // SAFETY: `mem` outlives `space` and is not otherwise touched meanwhile.
        let space = unsafe { AddressSpace::from_raw_parts(mem.as_mut_ptr(), 8) };
        assert_eq!(space.read_i32(UserAddr::new(0)), Ok(7));
    }
}
