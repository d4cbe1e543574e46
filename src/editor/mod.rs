mod buffer;
mod cursor;

pub use buffer::{write_text, Buffer};
pub use cursor::Cursor;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::commands::CommandLine;
use crate::config::Settings;
use crate::error::Result;
use crate::tree::project_tree;

/// The current mode of the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Keystrokes edit the buffer
    #[default]
    Editing,
    /// Keystrokes build up a command line
    CommandEntry,
}

/// The editor session: one buffer, one cursor, one command line
pub struct Editor {
    buffer: Buffer,
    pub cursor: Cursor,
    pub mode: Mode,
    pub command_line: CommandLine,
    /// First buffer line shown in the text area
    pub viewport_offset: usize,
    pub term_width: u16,
    pub term_height: u16,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub settings: Settings,
}

impl Editor {
    pub fn new(settings: Settings) -> Self {
        Self {
            buffer: Buffer::new(),
            cursor: Cursor::default(),
            mode: Mode::default(),
            command_line: CommandLine::new(),
            viewport_offset: 0,
            term_width: 80,
            term_height: 24,
            should_quit: false,
            status_message: None,
            settings,
        }
    }

    // ============================================
    // Read-only accessors
    // ============================================

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn lines(&self) -> &[String] {
        self.buffer.lines()
    }

    /// The path bound to the buffer, if any
    pub fn document_path(&self) -> Option<&Path> {
        self.buffer.path.as_deref()
    }

    /// Text typed so far in command mode
    pub fn pending_command(&self) -> &str {
        &self.command_line.input
    }

    // ============================================
    // Layout
    // ============================================

    /// Set terminal size
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.term_width = width;
        self.term_height = height;
        self.scroll_to_cursor();
    }

    /// Number of rows available for text (excluding header and footer)
    pub fn text_rows(&self) -> usize {
        self.term_height.saturating_sub(2) as usize
    }

    /// Ensure cursor is visible by adjusting viewport
    pub fn scroll_to_cursor(&mut self) {
        let text_rows = self.text_rows().max(1);

        if self.cursor.line < self.viewport_offset {
            self.viewport_offset = self.cursor.line;
        }

        if self.cursor.line >= self.viewport_offset + text_rows {
            self.viewport_offset = self.cursor.line + 1 - text_rows;
        }
    }

    // ============================================
    // Editing
    // ============================================

    /// Insert a character at the cursor; `\n` splits the line
    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.insert_newline();
            return;
        }
        self.buffer.insert_char(self.cursor.line, self.cursor.col, ch);
        self.cursor.col += 1;
        self.scroll_to_cursor();
    }

    /// Split the current line at the cursor
    pub fn insert_newline(&mut self) {
        self.buffer.split_line(self.cursor.line, self.cursor.col);
        self.cursor.set(self.cursor.line + 1, 0);
        self.scroll_to_cursor();
    }

    /// Backspace: delete before the cursor, joining lines at column 0
    pub fn delete_char_before(&mut self) {
        self.cursor = self
            .buffer
            .delete_char_before(self.cursor.line, self.cursor.col);
        self.scroll_to_cursor();
    }

    pub fn move_up(&mut self) {
        self.cursor.move_up(&self.buffer);
        self.scroll_to_cursor();
    }

    pub fn move_down(&mut self) {
        self.cursor.move_down(&self.buffer);
        self.scroll_to_cursor();
    }

    pub fn move_left(&mut self) {
        self.cursor.move_left(&self.buffer);
        self.scroll_to_cursor();
    }

    pub fn move_right(&mut self) {
        self.cursor.move_right(&self.buffer);
        self.scroll_to_cursor();
    }

    // ============================================
    // Modes
    // ============================================

    /// Enter command mode with the command line pre-filled with `seed`
    pub fn enter_command_mode(&mut self, seed: &str) {
        self.mode = Mode::CommandEntry;
        self.command_line.seed(seed);
    }

    /// Exit command mode back to editing, discarding pending input
    pub fn exit_command_mode(&mut self) {
        self.mode = Mode::Editing;
        self.command_line.clear();
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    // ============================================
    // Documents
    // ============================================

    /// Replace the buffer with a file's content.
    ///
    /// On failure nothing changes: buffer, cursor, and path stay as they were.
    pub fn open_file(&mut self, path: PathBuf) -> Result<()> {
        let buffer = Buffer::from_file(path)?;
        info!(target: "io", path = %buffer.display_name(), lines = buffer.len_lines(), "file_opened");
        self.replace_buffer(buffer);
        Ok(())
    }

    /// Start an empty buffer bound to `path` without touching the disk
    pub fn new_file(&mut self, path: PathBuf) {
        let mut buffer = Buffer::new();
        buffer.path = Some(path);
        debug!(target: "io", path = %buffer.display_name(), "new_file");
        self.replace_buffer(buffer);
    }

    /// Open `path` if it can be read, otherwise start a new file bound to it
    pub fn open_or_create(&mut self, path: PathBuf) -> Result<()> {
        if path.exists() {
            self.open_file(path)
        } else {
            self.new_file(path);
            Ok(())
        }
    }

    /// Save the current buffer to its own path
    pub fn save(&mut self) -> Result<()> {
        self.buffer.save()?;
        info!(target: "io", path = %self.buffer.display_name(), "file_written");
        self.set_status(format!("\"{}\" written", self.buffer.display_name()));
        Ok(())
    }

    /// Save to a specific file and bind the buffer to it.
    ///
    /// The binding only changes once the write succeeds.
    pub fn save_as(&mut self, path: PathBuf) -> Result<()> {
        write_text(&path, &self.buffer.content())?;
        info!(target: "io", path = %path.display(), "file_written");
        self.buffer.path = Some(path);
        self.buffer.dirty = false;
        self.set_status(format!("\"{}\" written", self.buffer.display_name()));
        Ok(())
    }

    /// Replace the buffer content with the project tree under `root`.
    ///
    /// The document path is kept, so a following bare `save` writes the
    /// listing over the current file.
    pub fn show_project_tree(&mut self, root: &Path) -> Result<()> {
        let lines = project_tree(root, &self.settings.tree)?;
        self.buffer.replace_all(lines);
        self.reset_view();
        Ok(())
    }

    fn replace_buffer(&mut self, buffer: Buffer) {
        self.buffer = buffer;
        self.reset_view();
    }

    fn reset_view(&mut self) {
        self.cursor = Cursor::default();
        self.viewport_offset = 0;
    }

    // ============================================
    // Status line
    // ============================================

    /// Set a status message (dropped when status messages are disabled)
    pub fn set_status(&mut self, msg: impl Into<String>) {
        if self.settings.editor.status_messages {
            self.status_message = Some(msg.into());
        }
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(text: &str) -> Editor {
        let mut editor = Editor::new(Settings::default());
        editor.buffer = Buffer::from_text(text);
        editor
    }

    fn type_str(editor: &mut Editor, text: &str) {
        for ch in text.chars() {
            editor.insert_char(ch);
        }
    }

    #[test]
    fn test_type_lines() {
        let mut editor = Editor::new(Settings::default());
        type_str(&mut editor, "hi\nthere");
        assert_eq!(editor.lines(), &["hi".to_string(), "there".to_string()]);
        assert_eq!(editor.cursor, Cursor::new(1, 5));
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut editor = editor_with("ab\ncd");
        editor.cursor.set(1, 0);
        editor.delete_char_before();
        assert_eq!(editor.lines(), &["abcd".to_string()]);
        assert_eq!(editor.cursor, Cursor::new(0, 2));
    }

    #[test]
    fn test_new_file_resets_buffer() {
        let mut editor = editor_with("some\ntext");
        editor.cursor.set(1, 2);
        editor.new_file(PathBuf::from("draft.txt"));
        assert!(editor.buffer().is_empty());
        assert_eq!(editor.cursor, Cursor::default());
        assert_eq!(editor.document_path(), Some(Path::new("draft.txt")));
    }

    #[test]
    fn test_open_missing_file_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with("keep me");
        editor.buffer.path = Some(PathBuf::from("current.txt"));
        editor.cursor.set(0, 4);

        assert!(editor.open_file(dir.path().join("missing.txt")).is_err());
        assert_eq!(editor.lines(), &["keep me".to_string()]);
        assert_eq!(editor.document_path(), Some(Path::new("current.txt")));
        assert_eq!(editor.cursor, Cursor::new(0, 4));
    }

    #[test]
    fn test_save_as_then_open_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let mut editor = editor_with("alpha\n\nbeta");

        editor.save_as(path.clone()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "alpha\n\nbeta");
        assert_eq!(editor.status_message.as_deref(), Some(&*format!("\"{}\" written", path.display())));

        let mut other = Editor::new(Settings::default());
        other.open_file(path.clone()).unwrap();
        assert_eq!(other.lines(), editor.lines());
        assert_eq!(other.document_path(), Some(path.as_path()));
    }

    #[test]
    fn test_failed_save_as_keeps_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut editor = editor_with("x");
        editor.buffer.path = Some(PathBuf::from("current.txt"));
        let bad = dir.path().join("no/such/dir/out.txt");
        assert!(editor.save_as(bad).is_err());
        assert_eq!(editor.document_path(), Some(Path::new("current.txt")));
    }

    #[test]
    fn test_open_or_create() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("a.txt");
        std::fs::write(&existing, "one\ntwo").unwrap();

        let mut editor = Editor::new(Settings::default());
        editor.open_or_create(existing).unwrap();
        assert_eq!(editor.buffer().len_lines(), 2);

        let fresh = dir.path().join("b.txt");
        editor.open_or_create(fresh.clone()).unwrap();
        assert!(editor.buffer().is_empty());
        assert_eq!(editor.document_path(), Some(fresh.as_path()));
        assert!(!fresh.exists());
    }

    #[test]
    fn test_command_mode_seed_and_exit() {
        let mut editor = Editor::new(Settings::default());
        editor.enter_command_mode("open ");
        assert_eq!(editor.mode, Mode::CommandEntry);
        assert_eq!(editor.pending_command(), "open ");
        editor.exit_command_mode();
        assert_eq!(editor.mode, Mode::Editing);
        assert_eq!(editor.pending_command(), "");
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let text = (0..50).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let mut editor = editor_with(&text);
        editor.set_size(80, 12);
        assert_eq!(editor.text_rows(), 10);

        for _ in 0..15 {
            editor.move_down();
        }
        assert_eq!(editor.cursor.line, 15);
        assert_eq!(editor.viewport_offset, 6);

        for _ in 0..12 {
            editor.move_up();
        }
        assert_eq!(editor.viewport_offset, 3);
    }

    #[test]
    fn test_status_messages_can_be_disabled() {
        let mut settings = Settings::default();
        settings.editor.status_messages = false;
        let mut editor = Editor::new(settings);
        editor.set_status("hello");
        assert!(editor.status_message.is_none());
    }
}
