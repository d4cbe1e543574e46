//! Key dispatch for the two input modes and command execution

use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, warn};

use crate::commands::{Command, CommandResult};
use crate::editor::{Editor, Mode};

/// Logical key after decoding a terminal key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Ctrl+X
    Quit,
    /// Ctrl+S
    Save,
    /// Ctrl+O - command line pre-filled with "open "
    OpenPrompt,
    /// Ctrl+P - empty command line
    CommandPrompt,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Backspace,
    Escape,
    /// A printable character
    Char(char),
    /// Anything else (function keys, Tab, key releases, ...)
    Ignore,
}

/// Decode a crossterm key event
pub fn key_action(key: KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }

    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('x')) => KeyAction::Quit,
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => KeyAction::Save,
        (KeyModifiers::CONTROL, KeyCode::Char('o')) => KeyAction::OpenPrompt,
        (KeyModifiers::CONTROL, KeyCode::Char('p')) => KeyAction::CommandPrompt,

        (_, KeyCode::Up) => KeyAction::Up,
        (_, KeyCode::Down) => KeyAction::Down,
        (_, KeyCode::Left) => KeyAction::Left,
        (_, KeyCode::Right) => KeyAction::Right,

        (_, KeyCode::Enter) => KeyAction::Enter,
        (_, KeyCode::Backspace) => KeyAction::Backspace,
        (_, KeyCode::Esc) => KeyAction::Escape,

        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => KeyAction::Char(c),

        _ => KeyAction::Ignore,
    }
}

/// Handle a key event and update editor state
pub fn handle_key(editor: &mut Editor, key: KeyEvent) {
    let action = key_action(key);
    if action == KeyAction::Ignore {
        return;
    }

    match editor.mode {
        Mode::Editing => handle_editing_mode(editor, action),
        Mode::CommandEntry => handle_command_mode(editor, action),
    }
}

fn handle_editing_mode(editor: &mut Editor, action: KeyAction) {
    editor.clear_status();

    match action {
        KeyAction::Quit => {
            debug!(target: "input", "quit");
            editor.quit();
        }

        KeyAction::Save => {
            if let Err(e) = editor.save() {
                warn!(target: "io", error = %e, "save_failed");
                editor.set_status(format!("E: {}", e));
            }
        }

        KeyAction::OpenPrompt => editor.enter_command_mode("open "),
        KeyAction::CommandPrompt | KeyAction::Char(':') => editor.enter_command_mode(""),

        KeyAction::Up => editor.move_up(),
        KeyAction::Down => editor.move_down(),
        KeyAction::Left => editor.move_left(),
        KeyAction::Right => editor.move_right(),

        KeyAction::Enter => editor.insert_newline(),
        KeyAction::Backspace => editor.delete_char_before(),
        KeyAction::Char(c) => editor.insert_char(c),

        KeyAction::Escape | KeyAction::Ignore => {}
    }
}

fn handle_command_mode(editor: &mut Editor, action: KeyAction) {
    match action {
        // Cancel command
        KeyAction::Escape => editor.exit_command_mode(),

        // Execute command
        KeyAction::Enter => {
            let cmd = editor.command_line.execute();
            editor.mode = Mode::Editing;
            execute_command(editor, cmd);
        }

        // Backspace past the start cancels
        KeyAction::Backspace => {
            if editor.command_line.is_empty() {
                editor.exit_command_mode();
            } else {
                editor.command_line.delete_char_before();
            }
        }

        KeyAction::Char(c) => editor.command_line.insert_char(c),

        _ => {}
    }
}

/// Run a parsed command against the editor
pub fn execute_command(editor: &mut Editor, cmd: Command) {
    debug!(target: "command", ?cmd, "execute");

    let result = match cmd {
        Command::Open(Some(path)) => match editor.open_file(path) {
            Ok(()) => CommandResult::Message(format!("\"{}\"", editor.buffer().display_name())),
            Err(e) => CommandResult::Error(e.to_string()),
        },

        Command::New(Some(path)) => {
            editor.new_file(path);
            CommandResult::Message(format!("\"{}\" [New]", editor.buffer().display_name()))
        }

        // save_as/save set their own "written" status
        Command::Save(Some(path)) => match editor.save_as(path) {
            Ok(()) => CommandResult::Ok,
            Err(e) => CommandResult::Error(e.to_string()),
        },
        Command::Save(None) => match editor.save() {
            Ok(()) => CommandResult::Ok,
            Err(e) => CommandResult::Error(e.to_string()),
        },

        Command::FileTree => match editor.show_project_tree(Path::new(".")) {
            Ok(()) => CommandResult::Ok,
            Err(e) => CommandResult::Error(e.to_string()),
        },

        Command::Open(None) | Command::New(None) | Command::Empty | Command::Unknown(_) => {
            CommandResult::Ok
        }
    };

    // Handle the result
    match result {
        CommandResult::Ok => {}
        CommandResult::Message(msg) => {
            editor.set_status(msg);
        }
        CommandResult::Error(err) => {
            warn!(target: "command", error = %err, "command_failed");
            editor.set_status(format!("E: {}", err));
        }
    }
}
