//! The interactive session: settings, wiring, and the REPL loop.
//!
//! The loop is strictly cooperative. Each iteration polls
//! `should_advance` once (that is the only driver of automatic track
//! advancement), then blocks on the line editor for the next command.

use std::path::PathBuf;

use rustyline::{Editor, error::ReadlineError, history::DefaultHistory};

use crate::audio::RodioEngine;
use crate::config;
use crate::library::LoftyReader;
use crate::macros::MacroStore;
use crate::prompt::StdinPrompt;
use crate::shell::Shell;

mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = settings::load_settings();
    settings::check_directories(&mut settings);

    let macros_path =
        config::default_macros_path().unwrap_or_else(|| PathBuf::from("macros.json"));
    let (macros, macros_err) = MacroStore::open(macros_path);
    if let Some(e) = macros_err {
        eprintln!("attacca: starting with an empty macro set: {e}");
    }

    let engine = RodioEngine::new()?;
    let mut shell = Shell::new(
        settings,
        Box::new(engine),
        Box::new(LoftyReader),
        Box::new(StdinPrompt),
        macros,
    );

    let mut rl = Editor::<(), DefaultHistory>::new()?;
    loop {
        if shell.should_advance() {
            shell.queue_play();
        }

        let prompt = shell.settings.shell.prompt.clone();
        match rl.readline(&prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                rl.add_history_entry(line.as_str())?;
                shell.dispatch_line(&line);
                if shell.should_quit() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("attacca: readline error: {err}");
                break;
            }
        }
    }

    Ok(())
}
