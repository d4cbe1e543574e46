use std::path::PathBuf;

/// Parsed command from command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// open <path> - Replace the buffer with a file's content
    Open(Option<PathBuf>),
    /// new <path> - Start an empty buffer bound to a path
    New(Option<PathBuf>),
    /// save [path] - Write buffer to the given path or the current one
    Save(Option<PathBuf>),
    /// file_txt - Replace the buffer with the project tree
    FileTree,
    /// Empty input
    Empty,
    /// Unknown command
    Unknown(String),
}

/// Result of executing a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Command executed successfully
    Ok,
    /// Command executed with a message to display
    Message(String),
    /// Command failed with an error
    Error(String),
}

/// Parse a command string into a Command
///
/// Tokens are split on whitespace with no quoting, so paths containing
/// spaces cannot be expressed. Arguments past the first are ignored.
pub fn parse_command(input: &str) -> Command {
    let mut parts = input.split_whitespace();
    let Some(cmd) = parts.next() else {
        return Command::Empty;
    };
    let arg = parts.next().map(PathBuf::from);

    match cmd {
        "open" => Command::Open(arg),
        "new" => Command::New(arg),
        "save" => Command::Save(arg),
        "file_txt" => Command::FileTree,
        _ => Command::Unknown(cmd.to_string()),
    }
}

/// Command line state
#[derive(Debug, Clone, Default)]
pub struct CommandLine {
    /// The current input buffer
    pub input: String,
}

impl CommandLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the command line
    pub fn clear(&mut self) {
        self.input.clear();
    }

    /// Replace the input with pre-seeded text
    pub fn seed(&mut self, text: &str) {
        self.input.clear();
        self.input.push_str(text);
    }

    /// Append a character
    pub fn insert_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    /// Delete the last character (backspace)
    pub fn delete_char_before(&mut self) {
        self.input.pop();
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Take the input, clear the line, and parse it
    pub fn execute(&mut self) -> Command {
        let input = std::mem::take(&mut self.input);
        parse_command(&input)
    }

    /// Get display string (with ':' prefix)
    pub fn display(&self) -> String {
        format!(":{}", self.input)
    }
}
