//! Table row selection state.
//!
//! Tracks the cursor row and the set of rows marked for deletion.

use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct RowSelection {
    /// Row under the cursor
    cursor: usize,
    /// Rows marked for deletion (HashSet for O(1) lookup)
    marked: HashSet<usize>,
}

impl RowSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor down, wrapping to the top
    pub fn next(&mut self, len: usize) {
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    /// Move the cursor up, wrapping to the bottom
    pub fn prev(&mut self, len: usize) {
        if len > 0 {
            self.cursor = self.cursor.checked_sub(1).unwrap_or(len - 1);
        }
    }

    /// Toggle the mark on the cursor row. Returns true if it is now marked.
    pub fn toggle_cursor(&mut self) -> bool {
        if self.marked.remove(&self.cursor) {
            false
        } else {
            self.marked.insert(self.cursor);
            true
        }
    }

    #[allow(dead_code)] // Used in tests
    pub fn is_marked(&self, row: usize) -> bool {
        self.marked.contains(&row)
    }

    pub fn marked(&self) -> &HashSet<usize> {
        &self.marked
    }

    /// Rows a delete should act on: the marked rows, or the cursor row when
    /// nothing is marked
    pub fn targets(&self, len: usize) -> Vec<usize> {
        if !self.marked.is_empty() {
            let mut rows: Vec<usize> = self.marked.iter().copied().collect();
            rows.sort_unstable();
            rows
        } else if self.cursor < len {
            vec![self.cursor]
        } else {
            Vec::new()
        }
    }

    pub fn clear_marks(&mut self) {
        self.marked.clear();
    }

    /// Drop marks past the end and pull the cursor back into range
    pub fn clamp(&mut self, len: usize) {
        self.marked.retain(|&row| row < len);
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }
}
