use std::env;
use std::path::PathBuf;

use crossterm::event::Event;
use tracing::{info, warn};

use caffeeteria::logging::init_logging;
use caffeeteria::{handle_key, load_config, Editor, Terminal};

fn main() -> anyhow::Result<()> {
    // Load configuration
    let (settings, config_warning) = load_config();

    // Logging is best effort; the editor runs without it
    let (_log_guard, log_warning) = match init_logging(&settings.log) {
        Ok(guard) => (guard, None),
        Err(e) => (None, Some(format!("E: logging disabled: {:#}", e))),
    };
    info!(target: "runtime", version = env!("CARGO_PKG_VERSION"), "startup");

    let mut editor = Editor::new(settings);

    if let Some(warning) = config_warning {
        warn!(target: "runtime", %warning, "config_fallback");
        editor.set_status(warning);
    }
    if let Some(warning) = log_warning {
        editor.set_status(warning);
    }

    // Open file from command line argument if provided
    if let Some(path) = env::args().nth(1).map(PathBuf::from) {
        if let Err(e) = editor.open_or_create(path) {
            warn!(target: "io", error = %e, "initial_open_failed");
            editor.set_status(format!("E: {}", e));
        }
    }

    // Initialize terminal; failing here is fatal
    let mut terminal = Terminal::new()?;

    let (width, height) = Terminal::size()?;
    editor.set_size(width, height);

    // Main event loop
    loop {
        terminal.render(&editor)?;

        match terminal.read_event()? {
            Event::Key(key) => handle_key(&mut editor, key),
            Event::Resize(width, height) => {
                editor.set_size(width, height);
                terminal.sync()?;
            }
            _ => {}
        }

        if editor.should_quit {
            break;
        }
    }

    // Release the terminal before exiting
    drop(terminal);
    info!(target: "runtime", "shutdown");

    Ok(())
}
