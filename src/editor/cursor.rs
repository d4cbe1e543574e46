use super::Buffer;

/// Cursor position in the buffer (0-indexed)
///
/// `col` counts characters and may equal the line length (the
/// end-of-line insertion point).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number (0-indexed, in characters)
    pub col: usize,
}

impl Cursor {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// Move up one line, clamping the column to the new line
    pub fn move_up(&mut self, buffer: &Buffer) {
        if self.line > 0 {
            self.line -= 1;
            self.clamp_col(buffer);
        }
    }

    /// Move down one line, clamping the column to the new line
    pub fn move_down(&mut self, buffer: &Buffer) {
        if self.line + 1 < buffer.len_lines() {
            self.line += 1;
            self.clamp_col(buffer);
        }
    }

    /// Move left, wrapping to the end of the previous line
    pub fn move_left(&mut self, buffer: &Buffer) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.line > 0 {
            self.line -= 1;
            self.col = buffer.line_len(self.line);
        }
    }

    /// Move right, wrapping to the start of the next line
    pub fn move_right(&mut self, buffer: &Buffer) {
        if self.col < buffer.line_len(self.line) {
            self.col += 1;
        } else if self.line + 1 < buffer.len_lines() {
            self.line += 1;
            self.col = 0;
        }
    }

    /// Set cursor to a specific position
    pub fn set(&mut self, line: usize, col: usize) {
        self.line = line;
        self.col = col;
    }

    fn clamp_col(&mut self, buffer: &Buffer) {
        self.col = self.col.min(buffer.line_len(self.line));
    }
}
