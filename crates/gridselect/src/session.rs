#![forbid(unsafe_code)]

//! Raw terminal mode as a scoped resource.
//!
//! Enabling raw/no-echo input mutates a shared external device, so it is
//! held as an RAII guard: the original termios settings are restored on
//! every exit path. `Drop` covers normal returns and panics (via
//! unwinding), a panic hook covers panic with a non-unwinding profile,
//! and a dedicated signal thread covers SIGINT/SIGTERM.
//!
//! The guard owns its own `/dev/tty` handle, so stdin redirection does
//! not affect which device is switched into raw mode.

use std::fs::File;
use std::io::{self, Write};
use std::sync::{Mutex, OnceLock};

use nix::sys::termios::{self, SetArg, Termios};
use signal_hook::consts::signal::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;

/// Saved pre-raw termios, readable from the panic hook and the signal
/// thread. `None` whenever no guard is live.
static SAVED_TERMIOS: Mutex<Option<Termios>> = Mutex::new(None);

/// RAII guard that saves the original termios and restores it on drop.
#[derive(Debug)]
pub struct RawModeGuard {
    original_termios: Termios,
    tty: File,
    signal_guard: Option<SignalGuard>,
}

impl RawModeGuard {
    /// Enter raw mode on the controlling terminal, returning a guard that
    /// restores the original termios on drop.
    pub fn enter() -> io::Result<Self> {
        let tty = File::open("/dev/tty")?;
        let original_termios = termios::tcgetattr(&tty).map_err(io::Error::other)?;

        if let Ok(mut saved) = SAVED_TERMIOS.lock() {
            *saved = Some(original_termios.clone());
        }
        install_panic_hook();
        let signal_guard = SignalGuard::new()?;

        let mut raw = original_termios.clone();
        termios::cfmakeraw(&mut raw);
        termios::tcsetattr(&tty, SetArg::TCSAFLUSH, &raw).map_err(io::Error::other)?;
        #[cfg(feature = "tracing")]
        tracing::debug!("terminal raw mode enabled");

        Ok(Self {
            original_termios,
            tty,
            signal_guard: Some(signal_guard),
        })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Best-effort restore — ignore errors during cleanup.
        let _ = termios::tcsetattr(&self.tty, SetArg::TCSAFLUSH, &self.original_termios);
        let _ = io::stdout().flush();
        if let Ok(mut saved) = SAVED_TERMIOS.lock() {
            *saved = None;
        }
        let _ = self.signal_guard.take();
        #[cfg(feature = "tracing")]
        tracing::debug!("terminal raw mode restored");
    }
}

/// Restore the saved termios on a freshly opened handle. Used from the
/// panic hook and the signal thread, where the guard itself is
/// unreachable.
fn restore_saved_termios() {
    let Ok(saved) = SAVED_TERMIOS.lock() else {
        return;
    };
    if let Some(original) = saved.as_ref() {
        if let Ok(tty) = File::open("/dev/tty") {
            let _ = termios::tcsetattr(&tty, SetArg::TCSAFLUSH, original);
        }
    }
}

fn install_panic_hook() {
    static HOOK: OnceLock<()> = OnceLock::new();
    HOOK.get_or_init(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_saved_termios();
            previous(info);
        }));
    });
}

/// Owns a thread that restores the terminal and exits on SIGINT/SIGTERM.
#[derive(Debug)]
struct SignalGuard {
    handle: signal_hook::iterator::Handle,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl SignalGuard {
    fn new() -> io::Result<Self> {
        let mut signals = Signals::new([SIGINT, SIGTERM]).map_err(io::Error::other)?;
        let handle = signals.handle();
        let thread = std::thread::spawn(move || {
            if let Some(signal) = signals.forever().next() {
                #[cfg(feature = "tracing")]
                tracing::warn!(signal, "termination signal received, restoring terminal");
                restore_saved_termios();
                std::process::exit(128 + signal);
            }
        });
        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
