use std::path::{Path, PathBuf};

use super::Cursor;
use crate::error::{EditorError, Result};

/// A text buffer stored as an ordered list of lines.
///
/// Lines never carry their trailing `\n`; the separator is implied between
/// consecutive lines. The list always holds at least one line, so an empty
/// document is a single zero-length line.
///
/// Columns are character indices, not byte offsets or display widths.
#[derive(Debug, Clone)]
pub struct Buffer {
    /// Line contents, without separators
    lines: Vec<String>,
    /// File path (None if unsaved new buffer)
    pub path: Option<PathBuf>,
    /// Whether the buffer has unsaved changes
    pub dirty: bool,
    /// Monotonic version for change tracking
    version: u64,
}

impl Buffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            path: None,
            dirty: false,
            version: 0,
        }
    }

    /// Create a buffer by splitting text on `\n`
    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.lines = split_lines(text);
        buffer
    }

    /// Create a buffer from a file on disk
    pub fn from_file(path: PathBuf) -> Result<Self> {
        let text = std::fs::read_to_string(&path).map_err(|source| EditorError::FileRead {
            path: path.clone(),
            source,
        })?;

        let mut buffer = Self::from_text(&text);
        buffer.path = Some(path);
        Ok(buffer)
    }

    /// Save buffer to its file path
    pub fn save(&mut self) -> Result<()> {
        let path = self.path.as_ref().ok_or(EditorError::NoFileName)?;
        write_text(path, &self.content())?;
        self.dirty = false;
        Ok(())
    }

    /// Get total number of lines
    pub fn len_lines(&self) -> usize {
        self.lines.len()
    }

    /// Get a specific line (0-indexed)
    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    /// All lines in order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Length of a line in characters (0 for out-of-range lines)
    pub fn line_len(&self, idx: usize) -> usize {
        self.line(idx).map(|l| l.chars().count()).unwrap_or(0)
    }

    /// Get the current version of the buffer
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Serialize the buffer, joining lines with `\n` and no trailing newline
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    /// Check if buffer is a single empty line
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Insert a character at the given line and column
    pub fn insert_char(&mut self, line: usize, col: usize, ch: char) {
        let Some(text) = self.lines.get_mut(line) else {
            return;
        };
        let idx = byte_index(text, col);
        text.insert(idx, ch);
        self.touch();
    }

    /// Split a line at `col`; the tail becomes a new line right after it
    pub fn split_line(&mut self, line: usize, col: usize) {
        let Some(text) = self.lines.get_mut(line) else {
            return;
        };
        let idx = byte_index(text, col);
        let tail = text.split_off(idx);
        self.lines.insert(line + 1, tail);
        self.touch();
    }

    /// Backspace at (line, col), returning where the cursor ends up.
    ///
    /// At column 0 the line is joined onto the previous one. At the very
    /// start of the document nothing changes.
    pub fn delete_char_before(&mut self, line: usize, col: usize) -> Cursor {
        if line >= self.lines.len() {
            return Cursor::new(line, col);
        }

        if col > 0 {
            let text = &mut self.lines[line];
            let idx = byte_index(text, col - 1);
            if idx < text.len() {
                text.remove(idx);
                self.touch();
            }
            Cursor::new(line, col - 1)
        } else if line > 0 {
            let joined = self.lines.remove(line);
            let prev = &mut self.lines[line - 1];
            let prev_len = prev.chars().count();
            prev.push_str(&joined);
            self.touch();
            Cursor::new(line - 1, prev_len)
        } else {
            Cursor::new(0, 0)
        }
    }

    /// Replace the whole content; an empty list becomes one empty line
    pub fn replace_all(&mut self, lines: Vec<String>) {
        self.lines = if lines.is_empty() {
            vec![String::new()]
        } else {
            lines
        };
        self.touch();
    }

    /// Get the display name for the buffer
    pub fn display_name(&self) -> String {
        self.path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "[New File]".to_string())
    }

    fn touch(&mut self) {
        self.dirty = true;
        self.version = self.version.wrapping_add(1);
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Write text to `path`, replacing any existing content
pub fn write_text(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).map_err(|source| EditorError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Split on `\n` only. Splitting "" yields one empty line.
fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(String::from).collect()
}

/// Byte offset of the `col`-th character, or the end of the string
fn byte_index(text: &str, col: usize) -> usize {
    text.char_indices()
        .nth(col)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(buffer: &Buffer) -> Vec<&str> {
        buffer.lines().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_new_buffer_has_one_empty_line() {
        let buffer = Buffer::new();
        assert_eq!(buffer.len_lines(), 1);
        assert!(buffer.is_empty());
        assert_eq!(buffer.content(), "");
    }

    #[test]
    fn test_from_text_splits_on_newline_only() {
        let buffer = Buffer::from_text("a\r\nb\n\nc");
        assert_eq!(lines(&buffer), vec!["a\r", "b", "", "c"]);
    }

    #[test]
    fn test_trailing_newline_becomes_empty_line() {
        let buffer = Buffer::from_text("one\ntwo\n");
        assert_eq!(lines(&buffer), vec!["one", "two", ""]);
        assert_eq!(buffer.content(), "one\ntwo\n");
    }

    #[test]
    fn test_insert_char_uses_char_columns() {
        let mut buffer = Buffer::from_text("héllo");
        buffer.insert_char(0, 2, 'X');
        assert_eq!(buffer.line(0), Some("héXllo"));
        assert_eq!(buffer.line_len(0), 6);
        assert!(buffer.dirty);
    }

    #[test]
    fn test_insert_char_at_end_of_line() {
        let mut buffer = Buffer::from_text("ab");
        buffer.insert_char(0, 2, 'c');
        assert_eq!(buffer.line(0), Some("abc"));
    }

    #[test]
    fn test_split_line_middle() {
        let mut buffer = Buffer::from_text("hello world\nnext");
        buffer.split_line(0, 5);
        assert_eq!(lines(&buffer), vec!["hello", " world", "next"]);
    }

    #[test]
    fn test_split_line_at_ends() {
        let mut buffer = Buffer::from_text("abc");
        buffer.split_line(0, 3);
        assert_eq!(lines(&buffer), vec!["abc", ""]);
        buffer.split_line(0, 0);
        assert_eq!(lines(&buffer), vec!["", "abc", ""]);
    }

    #[test]
    fn test_delete_char_before_within_line() {
        let mut buffer = Buffer::from_text("abc");
        let cursor = buffer.delete_char_before(0, 2);
        assert_eq!(buffer.line(0), Some("ac"));
        assert_eq!(cursor, Cursor::new(0, 1));
    }

    #[test]
    fn test_delete_char_before_multibyte() {
        let mut buffer = Buffer::from_text("a日b");
        let cursor = buffer.delete_char_before(0, 2);
        assert_eq!(buffer.line(0), Some("ab"));
        assert_eq!(cursor, Cursor::new(0, 1));
    }

    #[test]
    fn test_delete_char_before_joins_lines() {
        let mut buffer = Buffer::from_text("ab\ncd");
        let cursor = buffer.delete_char_before(1, 0);
        assert_eq!(lines(&buffer), vec!["abcd"]);
        assert_eq!(cursor, Cursor::new(0, 2));
    }

    #[test]
    fn test_delete_char_before_document_start_is_noop() {
        let mut buffer = Buffer::from_text("abc");
        let version = buffer.version();
        let cursor = buffer.delete_char_before(0, 0);
        assert_eq!(lines(&buffer), vec!["abc"]);
        assert_eq!(cursor, Cursor::new(0, 0));
        assert_eq!(buffer.version(), version);
        assert!(!buffer.dirty);
    }

    #[test]
    fn test_replace_all_never_empty() {
        let mut buffer = Buffer::from_text("abc");
        buffer.replace_all(Vec::new());
        assert_eq!(lines(&buffer), vec![""]);

        buffer.replace_all(vec!["x".to_string(), "y".to_string()]);
        assert_eq!(buffer.content(), "x\ny");
    }

    #[test]
    fn test_save_without_path_fails() {
        let mut buffer = Buffer::from_text("abc");
        assert!(matches!(buffer.save(), Err(EditorError::NoFileName)));
    }

    #[test]
    fn test_from_missing_file_is_read_error() {
        let err = Buffer::from_file(PathBuf::from("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, EditorError::FileRead { .. }));
    }

    #[test]
    fn test_display_name() {
        let mut buffer = Buffer::new();
        assert_eq!(buffer.display_name(), "[New File]");
        buffer.path = Some(PathBuf::from("notes.txt"));
        assert_eq!(buffer.display_name(), "notes.txt");
    }
}
