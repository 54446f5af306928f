//! Screen buffer types
//!
//! Provides a character grid mirroring a text-mode display.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

/// Character grid of `rows × cols` cells, space-filled by default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenBuffer {
    rows: usize,
    cols: usize,
    cells: Vec<char>,
}

impl ScreenBuffer {
    /// Create a blank screen
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![' '; rows * cols],
        }
    }

    /// Fill every cell with spaces
    pub fn clear(&mut self) {
        self.cells.fill(' ');
    }

    /// Write `text` starting at `(row, col)`
    ///
    /// Returns `false` and leaves the screen untouched if the text does not
    /// fit on the row.
    pub fn put_str(&mut self, row: usize, col: usize, text: &str) -> bool {
        let len = text.chars().count();
        if row >= self.rows || col + len > self.cols {
            return false;
        }

        let start = row * self.cols + col;
        for (cell, ch) in self.cells[start..start + len].iter_mut().zip(text.chars()) {
            *cell = ch;
        }
        true
    }

    /// Write one character; ignored outside the grid
    pub fn put_char(&mut self, row: usize, col: usize, ch: char) {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = ch;
        }
    }

    /// Character at a cell
    pub fn cell(&self, row: usize, col: usize) -> Option<char> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    /// Content of a row, padded with spaces to the full width
    pub fn line(&self, row: usize) -> Option<String> {
        self.row_cells(row).map(|cells| cells.iter().collect())
    }

    /// All rows as padded strings
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.cells.chunks(self.cols.max(1)).map(|row| row.iter().collect())
    }

    /// Check if every cell is a space
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|&c| c == ' ')
    }

    /// Get number of rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Get number of columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    fn row_cells(&self, row: usize) -> Option<&[char]> {
        if row < self.rows {
            let start = row * self.cols;
            self.cells.get(start..start + self.cols)
        } else {
            None
        }
    }
}
