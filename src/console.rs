//! Diagnostic Console
//!
//! The channel for lines the kernel prints about a process, such as an
//! unknown system call. The sink is any `fmt::Write` (a UART driver on
//! hardware, a `String` under test) behind a spinlock, so several CPUs
//! dispatching calls at once never interleave within a line.
//!
//! Internal tracing goes through the `log` facade instead; this console is
//! reserved for output that is part of the kernel's observable behaviour.

use core::fmt::{self, Write};
use spin::Mutex;

/// A spinlock-protected text sink.
pub struct Console<W: Write> {
    sink: Mutex<W>,
}

impl<W: Write> Console<W> {
    pub const fn new(sink: W) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    /// Write formatted text while holding the lock.
    ///
    /// Sink errors are dropped: a diagnostic that cannot be printed must
    /// not turn into a failure of the call being reported.
    pub fn write_fmt(&self, args: fmt::Arguments<'_>) {
        let mut sink = self.sink.lock();
        let _ = sink.write_fmt(args);
    }

    /// Run `f` with exclusive access to the sink.
    pub fn with_sink<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.sink.lock())
    }

    /// Consume the console and return the sink.
    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }
}

/// Print to a console.
#[macro_export]
macro_rules! cprint {
    ($console:expr, $($arg:tt)*) => {{
        $console.write_fmt(format_args!($($arg)*));
    }};
}

/// Print a line to a console.
///
/// The text and newline are written under a single lock acquisition.
#[macro_export]
macro_rules! cprintln {
    ($console:expr) => {
        $crate::cprint!($console, "\n")
    };
    ($console:expr, $($arg:tt)*) => {{
        $console.write_fmt(format_args!("{}\n", format_args!($($arg)*)));
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::String;

    #[test]
    fn test_lines() {
        let console = Console::new(String::new());
        cprintln!(console, "{} {}: unknown sys call {}", 1, "init", 99);
        cprint!(console, "x");
        cprintln!(console);
        assert_eq!(console.into_inner(), "1 init: unknown sys call 99\nx\n");
    }

    #[test]
    fn test_with_sink() {
        let console = Console::new(String::from("abc"));
        assert_eq!(console.with_sink(|s| s.len()), 3);
    }
}
