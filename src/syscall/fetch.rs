//! System Call Argument Fetching
//!
//! Pulls integer, pointer, and string arguments out of the calling
//! process's memory. User mode passes arguments on its stack: the saved
//! `%esp` points at the return address of the libc stub, followed by
//! argument 0, argument 1, and so on, one word each.
//!
//! # Security Principles
//! - Every address is checked against the declared image size
//! - Every address computation is overflow-checked
//! - Failures are returned to the handler, never defaulted or faulted
//!
//! Pointer and string results borrow process memory without copying. The
//! process cannot change that memory while its own call is being handled,
//! so a validated view stays valid until the handler returns.

use crate::config::WORD_SIZE;
use crate::mm::{UserAddr, UserSpan, UserSpanMut, UserStr};
use crate::proc::Process;
use crate::trap::TrapFrame;

use super::FetchError;

/// Fetch the int at `addr` from the process.
pub fn fetch_int(proc: &Process<'_>, addr: UserAddr) -> Result<i32, FetchError> {
    proc.space.read_i32(addr)
}

/// Fetch the nul-terminated string at `addr` from the process.
///
/// The string is not copied; the view points into the process image and
/// its length excludes the terminator.
pub fn fetch_str<'a>(proc: &'a Process<'_>, addr: UserAddr) -> Result<UserStr<'a>, FetchError> {
    proc.space.scan_str(addr)
}

/// Address of the `n`th argument slot on the user stack.
fn arg_addr(tf: &TrapFrame, n: usize) -> Result<UserAddr, FetchError> {
    u32::try_from(n)
        .ok()
        .and_then(|n| n.checked_add(1))
        .and_then(|slot| slot.checked_mul(WORD_SIZE))
        .and_then(|offset| tf.user_stack().checked_add(offset))
        .ok_or(FetchError::OutOfRange)
}

/// Fetch the `n`th 32-bit system call argument.
pub fn arg_int(proc: &Process<'_>, n: usize) -> Result<i32, FetchError> {
    arg_addr(&proc.tf, n)
        .and_then(|addr| fetch_int(proc, addr))
        .inspect_err(|e| log::debug!("pid {}: arg {} int: {}", proc.pid, n, e))
}

/// Fetch the `n`th argument as an address, then check `size` bytes there.
fn arg_window(proc: &Process<'_>, n: usize, size: i32) -> Result<(UserAddr, u32), FetchError> {
    let len = u32::try_from(size).map_err(|_| FetchError::OutOfRange)?;
    let addr = UserAddr::from_word(arg_int(proc, n)?);
    Ok((addr, len))
}

/// Fetch the `n`th argument as a pointer to a block of `size` bytes.
///
/// Fails for negative sizes, addresses outside the image (including
/// negative words, which land at the top of the 32-bit range), and blocks
/// that would run past the end of the image.
pub fn arg_ptr<'a>(proc: &'a Process<'_>, n: usize, size: i32) -> Result<UserSpan<'a>, FetchError> {
    let (addr, len) = arg_window(proc, n, size)?;
    proc.space
        .span(addr, len)
        .inspect_err(|e| log::debug!("pid {}: arg {} ptr {} +{}: {}", proc.pid, n, addr, len, e))
}

/// Like [`arg_ptr`], for a block the handler will write into.
pub fn arg_ptr_mut<'a>(
    proc: &'a mut Process<'_>,
    n: usize,
    size: i32,
) -> Result<UserSpanMut<'a>, FetchError> {
    let (addr, len) = arg_window(proc, n, size)?;
    let pid = proc.pid;
    proc.space
        .span_mut(addr, len)
        .inspect_err(|e| log::debug!("pid {}: arg {} ptr {} +{}: {}", pid, n, addr, len, e))
}

/// Fetch the `n`th argument as a nul-terminated string.
pub fn arg_str<'a>(proc: &'a Process<'_>, n: usize) -> Result<UserStr<'a>, FetchError> {
    let addr = UserAddr::from_word(arg_int(proc, n)?);
    fetch_str(proc, addr)
        .inspect_err(|e| log::debug!("pid {}: arg {} str {}: {}", proc.pid, n, addr, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mm::AddressSpace;
    use crate::proc::Pid;

    const S: u32 = 4096;

    fn process(mem: &mut [u8], size: u32, esp: u32) -> Process<'_> {
        let space = AddressSpace::new(mem, size).unwrap();
        Process::new(Pid::new(1), "test", space, TrapFrame::for_syscall(0, esp))
    }

    fn put_word(mem: &mut [u8], addr: usize, word: i32) {
        mem[addr..addr + 4].copy_from_slice(&word.to_ne_bytes());
    }

    #[test]
    fn test_fetch_int_at_boundary() {
        let mut mem = [0u8; S as usize];
        put_word(&mut mem, 4092, 0x1234_5678);
        let p = process(&mut mem, S, 0);
        assert_eq!(fetch_int(&p, UserAddr::new(4092)), Ok(0x1234_5678));
        assert_eq!(fetch_int(&p, UserAddr::new(4094)), Err(FetchError::OutOfRange));
        assert_eq!(fetch_int(&p, UserAddr::new(4096)), Err(FetchError::OutOfRange));
    }

    #[test]
    fn test_fetch_int_iff_in_bounds() {
        let mut mem = [0u8; 64];
        let p = process(&mut mem, 64, 0);
        let probes = (0..80u32).chain(u32::MAX - 8..=u32::MAX);
        for a in probes {
            let fits = a < 64 && a.checked_add(4).map_or(false, |end| end <= 64);
            assert_eq!(fetch_int(&p, UserAddr::new(a)).is_ok(), fits, "addr {}", a);
        }
    }

    #[test]
    fn test_fetch_int_no_wraparound_success() {
        // Near the top of the range `a + 4` wraps to a small value below `size`.
        let mut mem = [0u8; 16];
        let p = process(&mut mem, 16, 0);
        for a in [u32::MAX, u32::MAX - 1, u32::MAX - 2, u32::MAX - 3] {
            assert_eq!(fetch_int(&p, UserAddr::new(a)), Err(FetchError::OutOfRange));
        }
    }

    #[test]
    fn test_fetch_str_last_byte() {
        let mut mem = [b'x'; S as usize];
        mem[4095] = 0;
        let p = process(&mut mem, S, 0);
        let s = fetch_str(&p, UserAddr::new(4095)).unwrap();
        assert_eq!(s.len(), 0);
        assert!(s.is_empty());
        assert_eq!(s.addr(), UserAddr::new(4095));
    }

    #[test]
    fn test_fetch_str_unterminated_at_end() {
        let mut mem = [b'x'; S as usize];
        let p = process(&mut mem, S, 0);
        assert_eq!(fetch_str(&p, UserAddr::new(4095)).err(), Some(FetchError::Unterminated));
        assert_eq!(fetch_str(&p, UserAddr::new(4096)).err(), Some(FetchError::OutOfRange));
    }

    #[test]
    fn test_fetch_str_length_is_first_nul() {
        let mut mem = [0u8; 32];
        mem[8..20].copy_from_slice(b"echo\0hello\0\0");
        let p = process(&mut mem, 32, 0);
        let s = fetch_str(&p, UserAddr::new(8)).unwrap();
        assert_eq!(s.as_bytes(), b"echo");
        assert_eq!(s.to_str(), Ok("echo"));
        assert_eq!(fetch_str(&p, UserAddr::new(13)).unwrap().len(), 5);
    }

    #[test]
    fn test_fetch_is_idempotent() {
        let mut mem = [0u8; 64];
        put_word(&mut mem, 8, 77);
        mem[20..24].copy_from_slice(b"abc\0");
        let p = process(&mut mem, 64, 0);
        for _ in 0..3 {
            assert_eq!(fetch_int(&p, UserAddr::new(8)), Ok(77));
            assert_eq!(fetch_str(&p, UserAddr::new(20)).unwrap().as_bytes(), b"abc");
            assert_eq!(fetch_int(&p, UserAddr::new(62)), Err(FetchError::OutOfRange));
        }
    }

    #[test]
    fn test_arg_int_reads_after_return_address() {
        let mut mem = [0u8; 128];
        let esp = 64;
        put_word(&mut mem, 64, -559); // return address
        put_word(&mut mem, 68, 10);
        put_word(&mut mem, 72, 20);
        let p = process(&mut mem, 128, esp);
        assert_eq!(arg_int(&p, 0), Ok(10));
        assert_eq!(arg_int(&p, 1), Ok(20));
    }

    #[test]
    fn test_arg_int_slot_overflow() {
        let mut mem = [0u8; 16];
        let p = process(&mut mem, 16, u32::MAX - 2);
        assert_eq!(arg_int(&p, 0), Err(FetchError::OutOfRange));
        let p = process(&mut mem, 16, 0);
        assert_eq!(arg_int(&p, usize::MAX), Err(FetchError::OutOfRange));
        assert_eq!(arg_int(&p, 1 << 30), Err(FetchError::OutOfRange));
    }

    #[test]
    fn test_arg_ptr_negative_size() {
        let mut mem = [0u8; 64];
        put_word(&mut mem, 4, 16);
        let p = process(&mut mem, 64, 0);
        for size in [-1, -4, i32::MIN] {
            assert_eq!(arg_ptr(&p, 0, size).err(), Some(FetchError::OutOfRange));
        }
        assert_eq!(arg_ptr(&p, 0, 8).unwrap().len(), 8);
    }

    #[test]
    fn test_arg_ptr_bounds() {
        let mut mem = [0u8; 64];
        put_word(&mut mem, 4, 60);
        put_word(&mut mem, 8, -1);
        put_word(&mut mem, 12, 64);
        let p = process(&mut mem, 64, 0);
        assert!(arg_ptr(&p, 0, 4).is_ok());
        assert_eq!(arg_ptr(&p, 0, 5).err(), Some(FetchError::OutOfRange));
        assert_eq!(arg_ptr(&p, 0, i32::MAX).err(), Some(FetchError::OutOfRange));
        // Negative word: top of the 32-bit range.
        assert_eq!(arg_ptr(&p, 1, 0).err(), Some(FetchError::OutOfRange));
        // Zero-length block still needs its address inside the image.
        assert_eq!(arg_ptr(&p, 2, 0).err(), Some(FetchError::OutOfRange));
        assert!(arg_ptr(&p, 0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_arg_ptr_mut_writes_process_memory() {
        let mut mem = [0u8; 64];
        put_word(&mut mem, 4, 32);
        {
            let mut p = process(&mut mem, 64, 0);
            let mut buf = arg_ptr_mut(&mut p, 0, 4).unwrap();
            buf.as_bytes_mut().copy_from_slice(b"ok!\0");
        }
        assert_eq!(&mem[32..36], b"ok!\0");
    }

    #[test]
    fn test_arg_str() {
        let mut mem = [0u8; 64];
        put_word(&mut mem, 4, 40);
        put_word(&mut mem, 8, 64);
        mem[40..47].copy_from_slice(b"/bin/s\0");
        let p = process(&mut mem, 64, 0);
        assert_eq!(arg_str(&p, 0).unwrap().as_bytes(), b"/bin/s");
        assert_eq!(arg_str(&p, 1).err(), Some(FetchError::OutOfRange));
    }

    #[test]
    fn test_arg_str_unterminated() {
        let mut mem = [b'z'; 32];
        mem[4..8].copy_from_slice(&24i32.to_ne_bytes());
        let p = process(&mut mem, 32, 0);
        assert_eq!(arg_str(&p, 0).err(), Some(FetchError::Unterminated));
    }
}
