pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod input;
pub mod logging;
pub mod terminal;
pub mod tree;

pub use commands::{parse_command, Command, CommandLine, CommandResult};
pub use config::{load_config, Settings};
pub use editor::{Buffer, Cursor, Editor, Mode};
pub use error::EditorError;
pub use input::{execute_command, handle_key, KeyAction};
pub use terminal::Terminal;
