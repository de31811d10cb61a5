#![forbid(unsafe_code)]

//! Cursor navigation over the column-major grid.

use crate::input::Key;
use crate::layout::GridLayout;

/// Loop control after applying a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Keep looping; the frame is redrawn.
    Running,
    /// Enter was pressed; the option under the cursor is the result.
    Confirmed,
    /// `q`/`Q` was pressed, or the input stream ended.
    Cancelled,
}

/// The highlighted index plus the grid dimensions needed to move it.
///
/// Up/Down walk the list order with wraparound at both ends. Right/Left
/// jump a whole column (`max_rows`); their wraparound keeps the original
/// modulo/clamp behavior, which on a ragged final column does not always
/// land on the same row — see the crate docs on navigation.
#[derive(Debug, Clone, Copy)]
pub struct CursorState {
    cursor: usize,
    len: usize,
    max_rows: usize,
    cols: usize,
}

impl CursorState {
    /// Start at index 0 for the given layout.
    #[must_use]
    pub fn new(layout: &GridLayout) -> Self {
        Self {
            cursor: 0,
            len: layout.len,
            max_rows: layout.max_rows,
            cols: layout.cols,
        }
    }

    /// Currently highlighted index, always `< len`.
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Apply one key event and report whether the loop continues.
    pub fn apply(&mut self, key: Key) -> Status {
        match key {
            Key::Up => {
                self.cursor = if self.cursor == 0 {
                    self.len - 1
                } else {
                    self.cursor - 1
                };
            }
            Key::Down => {
                self.cursor = if self.cursor + 1 >= self.len {
                    0
                } else {
                    self.cursor + 1
                };
            }
            Key::Right => {
                let mut next = self.cursor + self.max_rows;
                if next >= self.len {
                    // Wrap back into the first column.
                    next %= self.max_rows;
                }
                self.cursor = next;
            }
            Key::Left => {
                self.cursor = if self.cursor >= self.max_rows {
                    self.cursor - self.max_rows
                } else {
                    // Wrap to the last column; clamp when that column is
                    // shorter than the current row.
                    let wrapped = self.cursor + self.max_rows * (self.cols - 1);
                    wrapped.min(self.len - 1)
                };
            }
            Key::Enter => return Status::Confirmed,
            Key::Char('q' | 'Q') => return Status::Cancelled,
            Key::Eof => return Status::Cancelled,
            Key::Char(_) | Key::Escape | Key::Other => {}
        }
        Status::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn state(len: usize, max_rows: usize) -> CursorState {
        let options: Vec<String> = (0..len).map(|i| i.to_string()).collect();
        CursorState::new(&GridLayout::compute(&options, max_rows))
    }

    #[test]
    fn up_from_first_wraps_to_last() {
        let mut s = state(5, 4);
        assert_eq!(s.apply(Key::Up), Status::Running);
        assert_eq!(s.cursor(), 4);
    }

    #[test]
    fn down_from_last_wraps_to_first() {
        let mut s = state(5, 4);
        for _ in 0..4 {
            s.apply(Key::Down);
        }
        assert_eq!(s.cursor(), 4);
        s.apply(Key::Down);
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn three_rights_across_fourteen_options() {
        let mut s = state(14, 4);
        s.apply(Key::Right);
        s.apply(Key::Right);
        s.apply(Key::Right);
        assert_eq!(s.cursor(), 12);
    }

    #[test]
    fn right_past_the_end_wraps_into_first_column() {
        let mut s = state(14, 4);
        // To index 12, then right again: 16 >= 14, 16 % 4 = 0.
        for _ in 0..3 {
            s.apply(Key::Right);
        }
        s.apply(Key::Right);
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn right_within_a_short_list_stays_put() {
        let mut s = state(3, 4);
        s.apply(Key::Right);
        // 0 + 4 >= 3, and 4 % 4 = 0: a single column cannot move sideways.
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn left_from_first_column_wraps_to_last_column() {
        let mut s = state(14, 4);
        s.apply(Key::Down); // cursor 1
        s.apply(Key::Left); // 1 - 4 underflows; 1 + 12 = 13
        assert_eq!(s.cursor(), 13);
    }

    #[test]
    fn left_wrap_clamps_on_ragged_final_column() {
        let mut s = state(14, 4);
        s.apply(Key::Down);
        s.apply(Key::Down); // cursor 2
        // 2 + 12 = 14 is out of range; clamps to 13 (a different row —
        // the documented inherited approximation).
        s.apply(Key::Left);
        assert_eq!(s.cursor(), 13);
    }

    #[test]
    fn enter_confirms_at_current_cursor() {
        let mut s = state(3, 4);
        s.apply(Key::Down);
        assert_eq!(s.apply(Key::Enter), Status::Confirmed);
        assert_eq!(s.cursor(), 1);
    }

    #[test]
    fn q_and_shift_q_cancel() {
        let mut s = state(3, 4);
        assert_eq!(s.apply(Key::Char('q')), Status::Cancelled);
        let mut s = state(3, 4);
        assert_eq!(s.apply(Key::Char('Q')), Status::Cancelled);
    }

    #[test]
    fn eof_cancels() {
        let mut s = state(3, 4);
        assert_eq!(s.apply(Key::Eof), Status::Cancelled);
    }

    #[test]
    fn unmatched_keys_leave_cursor_alone() {
        let mut s = state(3, 4);
        s.apply(Key::Down);
        for key in [Key::Char('x'), Key::Escape, Key::Other] {
            assert_eq!(s.apply(key), Status::Running);
            assert_eq!(s.cursor(), 1);
        }
    }

    #[test]
    fn single_option_wraps_to_itself() {
        let mut s = state(1, 4);
        s.apply(Key::Up);
        assert_eq!(s.cursor(), 0);
        s.apply(Key::Down);
        assert_eq!(s.cursor(), 0);
    }

    proptest! {
        #[test]
        fn cursor_stays_in_range(
            len in 1usize..50,
            max_rows in 1usize..8,
            keys in proptest::collection::vec(0u8..4, 0..64),
        ) {
            let mut s = state(len, max_rows);
            for k in keys {
                let key = match k {
                    0 => Key::Up,
                    1 => Key::Down,
                    2 => Key::Right,
                    _ => Key::Left,
                };
                prop_assert_eq!(s.apply(key), Status::Running);
                prop_assert!(s.cursor() < len);
            }
        }

        #[test]
        fn up_then_down_is_identity(len in 2usize..50, max_rows in 1usize..8) {
            let mut s = state(len, max_rows);
            s.apply(Key::Down);
            s.apply(Key::Down);
            let before = s.cursor();
            s.apply(Key::Up);
            s.apply(Key::Down);
            prop_assert_eq!(s.cursor(), before);
        }
    }
}
