#![forbid(unsafe_code)]

//! Inline keyboard-driven grid selection menu for Unix terminals.
//!
//! Given a prompt and an ordered list of options, the menu renders a
//! multi-column bordered grid in place (no alternate screen, no
//! scrolling), moves a reverse-video cursor with arrow keys, and returns
//! the chosen option on Enter or `None` on `q`/`Q`:
//!
//! ```no_run
//! let editors: &[&str] = &["helix", "neovim", "kakoune", "emacs", "nano"];
//! match gridselect::select("Select an editor:", editors)? {
//!     Some(editor) => println!("picked {editor}"),
//!     None => println!("no selection"),
//! }
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! Options fill the grid column-major, `max_rows` per column (default 4).
//! Up/Down wrap at the list ends; Right/Left jump a column with the
//! classic modulo/clamp wraparound at the edges. The terminal is held in
//! raw mode only for the duration of the call and restored on every exit
//! path, including panics and SIGINT/SIGTERM.
//!
//! An empty option list, a cancelled menu, a closed input stream, and a
//! non-interactive stdin all report "no selection"; only a confirmed
//! choice produces `Some`.

pub mod input;
pub mod layout;
pub mod menu;
pub mod render;
pub mod state;

#[cfg(unix)]
pub mod session;

pub use input::{ByteSource, ESC_TIMEOUT, Key, ScriptedInput, read_key};
pub use layout::{DEFAULT_MAX_ROWS, GridLayout};
pub use menu::Menu;
pub use render::FrameRenderer;
pub use state::{CursorState, Status};

#[cfg(unix)]
pub use input::TtyInput;
#[cfg(unix)]
pub use menu::select;
#[cfg(unix)]
pub use session::RawModeGuard;
