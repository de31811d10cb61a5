#![forbid(unsafe_code)]

//! Grid geometry derived from an option list.
//!
//! The menu lays options out column-major: the list index advances down
//! each column before moving to the next column. All widths are measured
//! in terminal display columns (via `unicode-width`), never in encoded
//! bytes, so labels containing wide characters pad correctly.

use unicode_width::UnicodeWidthStr;

/// Default bound on rows per column.
pub const DEFAULT_MAX_ROWS: usize = 4;

/// Extra display columns per cell around the label: one framing space on
/// each side plus the two-column `"> "` selection marker slot.
pub(crate) const CELL_PADDING: usize = 4;

/// Read-only grid geometry for one menu invocation.
///
/// Computed once per invocation from the option list; never built for an
/// empty list (the menu driver rejects that before layout).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Number of options.
    pub len: usize,
    /// Rows per column bound this layout was computed with.
    pub max_rows: usize,
    /// Rendered rows: `min(len, max_rows)`.
    pub rows: usize,
    /// Rendered columns: `ceil(len / max_rows)`.
    pub cols: usize,
    /// Widest label, in display columns.
    pub content_width: usize,
    /// Fixed cell width: `content_width + CELL_PADDING`.
    pub cell_width: usize,
    /// Total content width between the borders: `cols * cell_width`.
    pub inner_width: usize,
}

impl GridLayout {
    /// Compute the layout for `options` with at most `max_rows` rows per
    /// column.
    #[must_use]
    pub fn compute<S: AsRef<str>>(options: &[S], max_rows: usize) -> Self {
        debug_assert!(!options.is_empty(), "layout requires at least one option");
        debug_assert!(max_rows >= 1, "max_rows must be at least 1");

        let len = options.len();
        let rows = len.min(max_rows);
        let cols = len.div_ceil(max_rows);
        let content_width = options
            .iter()
            .map(|opt| opt.as_ref().width())
            .max()
            .unwrap_or(0);
        let cell_width = content_width + CELL_PADDING;

        Self {
            len,
            max_rows,
            rows,
            cols,
            content_width,
            cell_width,
            inner_width: cols * cell_width,
        }
    }

    /// List index of the cell at `(col, row)`. May be `>= len` for blank
    /// cells in a ragged final column.
    #[inline]
    #[must_use]
    pub const fn index_at(&self, col: usize, row: usize) -> usize {
        col * self.max_rows + row
    }

    /// Printed lines per frame: top border + rows + bottom border.
    ///
    /// Every frame occupies exactly this many lines; the in-place redraw
    /// moves the terminal cursor up by this amount before repainting.
    #[inline]
    #[must_use]
    pub const fn lines_per_frame(&self) -> usize {
        self.rows + 2
    }
}
