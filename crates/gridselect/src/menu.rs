#![forbid(unsafe_code)]

//! The menu driver: render → read key → update, until confirm or cancel.

use std::io::{self, Write};

#[cfg(unix)]
use std::io::IsTerminal;

use crate::input::{ByteSource, read_key};
use crate::layout::{DEFAULT_MAX_ROWS, GridLayout};
use crate::render::FrameRenderer;
use crate::state::{CursorState, Status};

#[cfg(unix)]
use crate::input::TtyInput;
#[cfg(unix)]
use crate::session::RawModeGuard;

/// A single blocking menu invocation.
///
/// All state (cursor, first-frame flag) is created by [`Menu::run`] and
/// discarded when it returns; nothing persists across invocations, and
/// the prompt is an explicit per-call parameter.
///
/// ```no_run
/// let shells: &[&str] = &["bash", "zsh", "fish"];
/// let picked = gridselect::Menu::new("Select a shell:", shells).run()?;
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct Menu<'a, S: AsRef<str>> {
    prompt: &'a str,
    options: &'a [S],
    max_rows: usize,
}

impl<'a, S: AsRef<str>> Menu<'a, S> {
    /// A menu over `options` with the default row bound.
    #[must_use]
    pub fn new(prompt: &'a str, options: &'a [S]) -> Self {
        Self {
            prompt,
            options,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }

    /// Override the maximum rows per column.
    ///
    /// # Panics
    ///
    /// Panics if `max_rows` is zero.
    #[must_use]
    pub fn max_rows(mut self, max_rows: usize) -> Self {
        assert!(max_rows >= 1, "max_rows must be at least 1");
        self.max_rows = max_rows;
        self
    }

    /// Run the menu on the controlling terminal.
    ///
    /// Returns the index of the confirmed option, or `None` when the
    /// option list is empty, the user cancels (`q`/`Q`), the input
    /// stream ends, or stdin is not an interactive terminal.
    ///
    /// The gate is deliberately on stdin, even though keys are read
    /// from `/dev/tty`: a caller whose stdin is piped is being scripted
    /// and must never hang on an unbounded key read, regardless of
    /// whether a controlling terminal happens to exist.
    ///
    /// Raw mode is held for exactly the duration of the call and
    /// restored on every exit path.
    #[cfg(unix)]
    pub fn run(&self) -> io::Result<Option<usize>> {
        if self.options.is_empty() {
            return Ok(None);
        }
        if !io::stdin().is_terminal() {
            #[cfg(feature = "tracing")]
            tracing::debug!("stdin is not a terminal, cancelling menu");
            return Ok(None);
        }

        let _guard = RawModeGuard::enter()?;
        let mut input = TtyInput::open()?;
        let mut out = io::stdout().lock();
        let picked = self.run_with(&mut input, &mut out);
        #[cfg(feature = "tracing")]
        match &picked {
            Ok(Some(idx)) => tracing::info!(index = idx, "menu confirmed"),
            Ok(None) => tracing::info!("menu cancelled"),
            Err(e) => tracing::error!(error = %e, "menu failed"),
        }
        picked
    }

    /// The render/read/update loop over explicit input and output.
    ///
    /// This is the whole widget minus terminal acquisition, so tests and
    /// headless callers can drive it with a scripted byte source and a
    /// byte-vector sink.
    pub fn run_with<I, W>(&self, input: &mut I, out: &mut W) -> io::Result<Option<usize>>
    where
        I: ByteSource,
        W: Write,
    {
        if self.options.is_empty() {
            return Ok(None);
        }

        let layout = GridLayout::compute(self.options, self.max_rows);
        let mut renderer = FrameRenderer::new(self.options, layout);
        let mut state = CursorState::new(&layout);

        loop {
            renderer.draw(out, self.prompt, state.cursor())?;
            match state.apply(read_key(input)?) {
                Status::Running => {}
                Status::Confirmed => return Ok(Some(state.cursor())),
                Status::Cancelled => return Ok(None),
            }
        }
    }
}

/// Run a menu and return the chosen option itself.
///
/// `Ok(Some(_))` is always one element of `options`, verbatim; `Ok(None)`
/// means no selection was made (empty list, cancel, or closed input).
#[cfg(unix)]
pub fn select<'a, S: AsRef<str>>(prompt: &str, options: &'a [S]) -> io::Result<Option<&'a str>> {
    let picked = Menu::new(prompt, options).run()?;
    Ok(picked.map(|idx| options[idx].as_ref()))
}
