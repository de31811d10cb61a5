#![forbid(unsafe_code)]

//! Frame drawing and in-place redraw.
//!
//! Every frame occupies exactly `rows + 2` printed lines regardless of
//! cursor position. That invariant is what makes the redraw strategy
//! correct: after the first frame, the renderer moves the terminal
//! cursor up by that fixed amount and repaints over the previous frame
//! instead of scrolling. Each frame is built in memory and pushed in a
//! single write/flush so a redraw never flickers.
//!
//! Raw mode disables output post-processing, so lines end with `\r\n`.

use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

use crate::layout::GridLayout;

const REVERSE_VIDEO: &str = "\x1b[7m";
const STYLE_RESET: &str = "\x1b[0m";

/// Draws the bordered option grid for successive cursor positions.
#[derive(Debug)]
pub struct FrameRenderer<'a, S: AsRef<str>> {
    layout: GridLayout,
    options: &'a [S],
    first_frame: bool,
}

impl<'a, S: AsRef<str>> FrameRenderer<'a, S> {
    /// Renderer over `options` with a precomputed layout.
    #[must_use]
    pub fn new(options: &'a [S], layout: GridLayout) -> Self {
        debug_assert_eq!(options.len(), layout.len);
        Self {
            layout,
            options,
            first_frame: true,
        }
    }

    /// Draw one frame with the cell at `cursor` highlighted.
    ///
    /// The first call prints the prompt followed by the frame; every
    /// later call first moves the terminal cursor up over the previous
    /// frame (the prompt line stays in place).
    pub fn draw(&mut self, out: &mut impl Write, prompt: &str, cursor: usize) -> io::Result<()> {
        let mut frame = String::new();

        if self.first_frame {
            frame.push_str(prompt);
            frame.push_str("\r\n");
            self.first_frame = false;
        } else {
            frame.push_str(&format!("\x1b[{}A", self.layout.lines_per_frame()));
        }

        let border = format!("+{}+\r\n", "-".repeat(self.layout.inner_width));
        frame.push_str(&border);
        for row in 0..self.layout.rows {
            frame.push('|');
            for col in 0..self.layout.cols {
                let idx = self.layout.index_at(col, row);
                if idx >= self.layout.len {
                    frame.push_str(&" ".repeat(self.layout.cell_width));
                } else {
                    self.push_cell(&mut frame, idx, idx == cursor);
                }
            }
            frame.push_str("|\r\n");
        }
        frame.push_str(&border);

        out.write_all(frame.as_bytes())?;
        out.flush()
    }

    /// One fixed-width cell. Escape codes are zero-width, so both forms
    /// occupy exactly `cell_width` visible columns.
    fn push_cell(&self, frame: &mut String, idx: usize, highlighted: bool) {
        let label = self.options[idx].as_ref();
        let pad = " ".repeat(self.layout.content_width - label.width());
        if highlighted {
            frame.push(' ');
            frame.push_str(REVERSE_VIDEO);
            frame.push_str("> ");
            frame.push_str(label);
            frame.push_str(&pad);
            frame.push_str(STYLE_RESET);
            frame.push(' ');
        } else {
            frame.push_str("   ");
            frame.push_str(label);
            frame.push_str(&pad);
            frame.push(' ');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_to_string<S: AsRef<str>>(
        renderer: &mut FrameRenderer<'_, S>,
        prompt: &str,
        cursor: usize,
    ) -> String {
        let mut out = Vec::new();
        renderer.draw(&mut out, prompt, cursor).unwrap();
        String::from_utf8(out).unwrap()
    }

    /// Remove SGR/cursor escape sequences, leaving visible characters.
    fn strip_escapes(line: &str) -> String {
        let mut visible = String::new();
        let mut chars = line.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                // Skip "[" plus everything through the final byte.
                for e in chars.by_ref() {
                    if e.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                visible.push(c);
            }
        }
        visible
    }

    fn renderer<'a>(options: &'a [&'a str], max_rows: usize) -> FrameRenderer<'a, &'a str> {
        let layout = GridLayout::compute(options, max_rows);
        FrameRenderer::new(options, layout)
    }

    #[test]
    fn first_frame_prints_prompt_then_grid() {
        let opts = ["Alpha", "Beta", "Gamma"];
        let mut r = renderer(&opts, 4);
        let frame = draw_to_string(&mut r, "Pick one:", 0);
        let lines: Vec<&str> = frame.split("\r\n").collect();
        assert_eq!(lines[0], "Pick one:");
        assert!(lines[1].starts_with('+'));
        assert!(!frame.starts_with('\x1b'));
    }

    #[test]
    fn every_frame_is_rows_plus_two_lines() {
        let opts = ["Alpha", "Beta", "Gamma"];
        let mut r = renderer(&opts, 4);
        // 5 grid lines + prompt on the first frame.
        let first = draw_to_string(&mut r, "Pick one:", 0);
        assert_eq!(first.matches("\r\n").count(), 6);
        for cursor in [1, 2, 0] {
            let next = draw_to_string(&mut r, "Pick one:", cursor);
            assert_eq!(next.matches("\r\n").count(), 5);
        }
    }

    #[test]
    fn repeat_frames_move_the_cursor_up_lines_per_frame() {
        let opts = ["Alpha", "Beta", "Gamma"];
        let mut r = renderer(&opts, 4);
        let _ = draw_to_string(&mut r, "Pick one:", 0);
        let second = draw_to_string(&mut r, "Pick one:", 1);
        assert!(second.starts_with("\x1b[5A"), "got {second:?}");
    }

    #[test]
    fn all_lines_share_the_border_width() {
        let opts: Vec<String> = (0..14).map(|i| format!("opt {i}")).collect();
        let layout = GridLayout::compute(&opts, 4);
        let mut r = FrameRenderer::new(&opts, layout);
        let frame = draw_to_string(&mut r, "Pick:", 5);
        for line in frame.split("\r\n").skip(1).filter(|l| !l.is_empty()) {
            assert_eq!(
                strip_escapes(line).chars().count(),
                layout.inner_width + 2,
                "line {line:?}"
            );
        }
    }

    #[test]
    fn highlighted_cell_is_reverse_video_with_marker() {
        let opts = ["Alpha", "Beta", "Gamma"];
        let mut r = renderer(&opts, 4);
        let frame = draw_to_string(&mut r, "Pick:", 1);
        let beta_line = frame
            .split("\r\n")
            .find(|l| l.contains("Beta"))
            .unwrap();
        // "Beta" is one column narrower than "Alpha"/"Gamma", so the
        // width padding sits inside the reverse-video span.
        assert!(beta_line.contains(&format!("{REVERSE_VIDEO}> Beta {STYLE_RESET}")));
        // Unhighlighted neighbors carry no marker and no styling.
        let alpha_line = frame
            .split("\r\n")
            .find(|l| l.contains("Alpha"))
            .unwrap();
        assert!(!alpha_line.contains('>'));
        assert!(!alpha_line.contains('\x1b'));
    }

    #[test]
    fn wide_labels_pad_by_display_width() {
        let opts = ["ja", "日本語"];
        let layout = GridLayout::compute(&opts, 4);
        let mut r = FrameRenderer::new(&opts, layout);
        let frame = draw_to_string(&mut r, "Locale:", 0);
        for line in frame.split("\r\n").skip(1).filter(|l| !l.is_empty()) {
            assert_eq!(strip_escapes(line).width(), layout.inner_width + 2);
        }
    }

    #[test]
    fn ragged_final_column_renders_blank_cells() {
        let opts: Vec<String> = (0..5).map(|i| format!("o{i}")).collect();
        let layout = GridLayout::compute(&opts, 4);
        let mut r = FrameRenderer::new(&opts, layout);
        let frame = draw_to_string(&mut r, "Pick:", 0);
        // Rows 1..3 have an empty second column: cell_width spaces.
        let blank = " ".repeat(layout.cell_width);
        let lines: Vec<&str> = frame.split("\r\n").collect();
        for line in &lines[3..=5] {
            assert!(line.ends_with(&format!("{blank}|")), "line {line:?}");
        }
    }
}
