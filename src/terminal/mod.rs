use crossterm::{
    cursor,
    event::{self, Event},
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Stdout, Write};
use std::sync::Once;
use unicode_width::UnicodeWidthChar;

use crate::editor::{Editor, Mode};

pub const EDITOR_NAME: &str = "CAFFEETERIA";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Terminal handler responsible for rendering and input
///
/// Raw mode and the alternate screen are held for the lifetime of this
/// value and released on drop.
pub struct Terminal {
    stdout: Stdout,
}

impl Terminal {
    pub fn new() -> anyhow::Result<Self> {
        let mut stdout = io::stdout();

        install_panic_hook();

        // Enter raw mode and alternate screen
        terminal::enable_raw_mode()?;
        enter_screen(&mut stdout, restore_terminal)?;

        Ok(Self { stdout })
    }

    /// Get terminal size
    pub fn size() -> anyhow::Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    /// Wipe the screen so the next render starts from a clean grid
    pub fn sync(&mut self) -> anyhow::Result<()> {
        crossterm::execute!(self.stdout, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    /// Render the editor state to the terminal
    pub fn render(&mut self, editor: &Editor) -> anyhow::Result<()> {
        queue!(self.stdout, cursor::Hide, cursor::MoveTo(0, 0))?;

        let width = editor.term_width as usize;
        let height = editor.term_height;

        self.render_header(editor, width)?;

        for row in 0..editor.text_rows() {
            let file_line = editor.viewport_offset + row;
            queue!(self.stdout, cursor::MoveTo(0, row as u16 + 1))?;
            if let Some(line) = editor.buffer().line(file_line) {
                queue!(self.stdout, Print(clip_to_width(line, width)))?;
            }
            queue!(self.stdout, terminal::Clear(ClearType::UntilNewLine))?;
        }

        if height > 1 {
            self.render_footer(editor, width, height - 1)?;
        }

        let (x, y) = screen_cursor(editor);
        queue!(self.stdout, cursor::MoveTo(x, y), cursor::Show)?;
        self.stdout.flush()?;
        Ok(())
    }

    fn render_header(&mut self, editor: &Editor, width: usize) -> anyhow::Result<()> {
        let modified = if editor.buffer().dirty { " [+]" } else { "" };
        let header = format!(
            " {} v{} | File: {}{} | :cmd, Ctrl+S: Save",
            EDITOR_NAME,
            VERSION,
            editor.buffer().display_name(),
            modified
        );

        queue!(
            self.stdout,
            SetBackgroundColor(Color::White),
            SetForegroundColor(Color::Black),
            Print(pad_to_width(&header, width)),
            ResetColor
        )?;
        Ok(())
    }

    fn render_footer(&mut self, editor: &Editor, width: usize, row: u16) -> anyhow::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(0, row),
            terminal::Clear(ClearType::CurrentLine)
        )?;

        if editor.mode == Mode::CommandEntry {
            // Show command line input
            queue!(
                self.stdout,
                SetBackgroundColor(Color::DarkBlue),
                SetForegroundColor(Color::White),
                Print(pad_to_width(&editor.command_line.display(), width)),
                ResetColor
            )?;
        } else if let Some(ref msg) = editor.status_message {
            // Show status message
            queue!(self.stdout, Print(clip_to_width(msg, width)))?;
        }

        Ok(())
    }

    /// Read the next key or resize event (blocking)
    pub fn read_event(&self) -> anyhow::Result<Event> {
        loop {
            match event::read()? {
                ev @ (Event::Key(_) | Event::Resize(_, _)) => return Ok(ev),
                _ => {}
            }
        }
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Switch to the alternate screen, running `on_error` if that fails.
///
/// Raw mode is already on at this point and no `Terminal` exists yet to
/// undo it on drop.
fn enter_screen<W: Write>(out: &mut W, on_error: impl FnOnce()) -> io::Result<()> {
    let result = crossterm::execute!(out, terminal::EnterAlternateScreen, cursor::Hide);
    if result.is_err() {
        on_error();
    }
    result
}

/// Best-effort terminal restore, safe to call more than once
fn restore_terminal() {
    let mut stdout = io::stdout();
    let _ = crossterm::execute!(
        stdout,
        ResetColor,
        cursor::Show,
        terminal::LeaveAlternateScreen
    );
    let _ = terminal::disable_raw_mode();
}

/// Restore the terminal before the default panic message is printed
fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_terminal();
            tracing::error!(target: "runtime.panic", %info, "panic");
            default_panic(info);
        }));
    });
}

/// Where the terminal cursor goes for the current mode
pub fn screen_cursor(editor: &Editor) -> (u16, u16) {
    let max_x = editor.term_width.saturating_sub(1) as usize;

    if editor.mode == Mode::CommandEntry {
        let x = text_width(editor.pending_command()) + 1;
        return (x.min(max_x) as u16, editor.term_height.saturating_sub(1));
    }

    let line = editor.buffer().line(editor.cursor.line).unwrap_or("");
    let x = prefix_width(line, editor.cursor.col).min(max_x);
    let y = editor.cursor.line.saturating_sub(editor.viewport_offset) + 1;
    (x as u16, y as u16)
}

/// Display width of the first `col` characters of `line`
pub fn prefix_width(line: &str, col: usize) -> usize {
    line.chars().take(col).map(char_width).sum()
}

/// Longest prefix of `text` that fits in `width` columns
pub fn clip_to_width(text: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        let w = char_width(ch);
        if used + w > width {
            return &text[..idx];
        }
        used += w;
    }
    text
}

/// Clip `text` to `width` columns and pad with spaces to fill them
fn pad_to_width(text: &str, width: usize) -> String {
    let clipped = clip_to_width(text, width);
    let used = text_width(clipped);
    format!("{}{:pad$}", clipped, "", pad = width.saturating_sub(used))
}

/// Display width of a whole string
pub fn text_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Zero-width and control characters still take one cell
fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1).max(1)
}
