#![forbid(unsafe_code)]

//! Byte-level key decoding.
//!
//! Raw mode delivers keystrokes byte by byte, and arrow keys arrive as
//! three-byte CSI sequences (`ESC [ A/B/C/D`) that share their first byte
//! with a bare Escape press. The decoder reads one byte blocking, then —
//! only after an ESC — issues short bounded-timeout reads to tell "the
//! rest of the sequence is already buffered" (arrow key) from "nothing
//! more is coming" (lone Escape).

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

#[cfg(unix)]
use std::fs::File;
#[cfg(unix)]
use std::io::Read;
#[cfg(unix)]
use std::os::fd::AsFd;

/// How long to wait for the remainder of an ESC-prefixed sequence.
///
/// Arrow-key bytes are transmitted in one burst, so anything above the
/// poll(2) granularity of 1 ms is already generous.
pub const ESC_TIMEOUT: Duration = Duration::from_millis(1);

/// One decoded key event per read cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A single alphanumeric key.
    Char(char),
    /// `ESC [ A`
    Up,
    /// `ESC [ B`
    Down,
    /// `ESC [ C`
    Right,
    /// `ESC [ D`
    Left,
    /// Carriage return / line feed.
    Enter,
    /// A lone ESC with no further bytes before the timeout.
    Escape,
    /// Anything unrecognized: unmatched CSI, partial sequence, control byte.
    Other,
    /// The input stream is closed.
    Eof,
}

/// Source of raw input bytes.
///
/// The two methods mirror the widget's two suspension points: an
/// unbounded blocking read between frames, and a bounded read used only
/// for ESC disambiguation.
pub trait ByteSource {
    /// Read one byte, blocking indefinitely. `Ok(None)` means EOF.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Read one byte if it arrives within `timeout`. `Ok(None)` means the
    /// timeout elapsed (or the stream ended) with nothing to read.
    fn read_byte_timeout(&mut self, timeout: Duration) -> io::Result<Option<u8>>;
}

/// Decode the next key event from `src`.
pub fn read_key<S: ByteSource>(src: &mut S) -> io::Result<Key> {
    let Some(byte) = src.read_byte()? else {
        return Ok(Key::Eof);
    };
    let key = match byte {
        b'\r' | b'\n' => Key::Enter,
        0x1b => {
            let Some(first) = src.read_byte_timeout(ESC_TIMEOUT)? else {
                return Ok(Key::Escape);
            };
            let Some(second) = src.read_byte_timeout(ESC_TIMEOUT)? else {
                // Partial sequence; matches no navigation command.
                return Ok(Key::Other);
            };
            match (first, second) {
                (b'[', b'A') => Key::Up,
                (b'[', b'B') => Key::Down,
                (b'[', b'C') => Key::Right,
                (b'[', b'D') => Key::Left,
                _ => Key::Other,
            }
        }
        b if b.is_ascii_alphanumeric() => Key::Char(b as char),
        _ => Key::Other,
    };
    Ok(key)
}

/// Live byte source over the controlling terminal.
///
/// Blocking reads come straight from the fd; timeout reads go through
/// `poll(2)` with `POLLIN`, treating `EINTR` as a timeout.
#[cfg(unix)]
#[derive(Debug)]
pub struct TtyInput {
    tty: File,
}

#[cfg(unix)]
impl TtyInput {
    /// Open `/dev/tty` for reading.
    pub fn open() -> io::Result<Self> {
        Ok(Self {
            tty: File::open("/dev/tty")?,
        })
    }

    /// Wrap an arbitrary file descriptor. Primarily useful for testing
    /// with pipes or socket pairs.
    #[must_use]
    pub fn from_reader(reader: File) -> Self {
        Self { tty: reader }
    }

    fn poll_readable(&self, timeout: Duration) -> io::Result<bool> {
        let mut poll_fds = [nix::poll::PollFd::new(
            self.tty.as_fd(),
            nix::poll::PollFlags::POLLIN,
        )];
        let timeout_ms: u16 = timeout.as_millis().try_into().unwrap_or(u16::MAX);
        match nix::poll::poll(&mut poll_fds, nix::poll::PollTimeout::from(timeout_ms)) {
            Ok(n) => Ok(n > 0),
            Err(nix::errno::Errno::EINTR) => Ok(false),
            Err(e) => Err(io::Error::other(e)),
        }
    }
}

#[cfg(unix)]
impl ByteSource for TtyInput {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.tty.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    fn read_byte_timeout(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        if !self.poll_readable(timeout)? {
            return Ok(None);
        }
        self.read_byte()
    }
}

/// Deterministic byte source for tests and headless runs.
///
/// Input is a sequence of bursts. Within a burst, bytes are always
/// "already buffered": a timeout read returns the next byte. At a burst
/// boundary a timeout read reports the timeout instead, reproducing the
/// pause between a lone ESC press and whatever the user types next.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    bursts: VecDeque<VecDeque<u8>>,
}

impl ScriptedInput {
    /// Build from a list of byte bursts.
    #[must_use]
    pub fn from_bursts(bursts: &[&[u8]]) -> Self {
        Self {
            bursts: bursts
                .iter()
                .map(|burst| burst.iter().copied().collect())
                .collect(),
        }
    }
}

impl ByteSource for ScriptedInput {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        while let Some(front) = self.bursts.front_mut() {
            if let Some(byte) = front.pop_front() {
                return Ok(Some(byte));
            }
            self.bursts.pop_front();
        }
        Ok(None)
    }

    fn read_byte_timeout(&mut self, _timeout: Duration) -> io::Result<Option<u8>> {
        let Some(front) = self.bursts.front_mut() else {
            return Ok(None);
        };
        if let Some(byte) = front.pop_front() {
            return Ok(Some(byte));
        }
        // Exhausted burst: the next byte belongs to a later keystroke.
        self.bursts.pop_front();
        Ok(None)
    }
}
