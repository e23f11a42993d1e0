//! The command dispatcher and the `Shell` it drives.
//!
//! A `Shell` owns the session context plus the ports (audio engine,
//! metadata reader, interactive prompt). `dispatch_line` takes one line of
//! input, splits it into `;`-separated statements, expands macros, and
//! routes each statement through the prefix resolver into the matching
//! command handler. The handlers themselves live next to their state:
//! queue commands in `queue::ops`, macro commands in `macros::ops`.

use crate::audio::AudioEngine;
use crate::config::Settings;
use crate::library::{self, MetadataReader};
use crate::macros::MacroStore;
use crate::prompt::Prompt;
use crate::resolver::{self, AmbiguityPolicy, Subject};
use crate::session::Session;

/// The reserved top-level command set. Macro names may not shadow these.
pub const COMMANDS: &[&str] = &["exit", "macro", "queue", "quit"];

pub(crate) const QUEUE_COMMANDS: &[&str] = &[
    "add",
    "clear",
    "find",
    "insert",
    "load",
    "loop",
    "next",
    "play",
    "prev",
    "randomize",
    "remove",
    "save",
    "shuffle",
    "status",
    "swap",
];

pub(crate) const MACRO_COMMANDS: &[&str] = &["add", "delete", "save"];

pub struct Shell {
    pub session: Session,
    pub settings: Settings,
    pub engine: Box<dyn AudioEngine>,
    pub reader: Box<dyn MetadataReader>,
    pub prompt: Box<dyn Prompt>,
    quit: bool,
}

impl Shell {
    pub fn new(
        settings: Settings,
        engine: Box<dyn AudioEngine>,
        reader: Box<dyn MetadataReader>,
        prompt: Box<dyn Prompt>,
        macros: MacroStore,
    ) -> Self {
        Self {
            session: Session::new(macros),
            settings,
            engine,
            reader,
            prompt,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Process one line of user input to completion.
    pub fn dispatch_line(&mut self, line: &str) {
        let mut expanding: Vec<String> = Vec::new();
        for stmt in statements(line) {
            let tokens = tokenize(stmt);
            if tokens.is_empty() {
                continue;
            }
            self.dispatch_tokens(&tokens, &mut expanding);
            if self.quit {
                break;
            }
        }
    }

    /// Dispatch one tokenized statement. `expanding` carries the names of
    /// macros currently being expanded up the call stack, so a store that
    /// somehow holds a cycle can't recurse us into the ground.
    fn dispatch_tokens(&mut self, tokens: &[String], expanding: &mut Vec<String>) {
        let head = tokens[0].as_str();

        if self.session.macros.contains(head) {
            if expanding.iter().any(|n| n == head) {
                println!("Macro {head} expands into itself, skipping");
                return;
            }
            expanding.push(head.to_string());
            // Expansion output is re-dispatched exactly as if the user had
            // typed it, statement delimiters included.
            let expanded = self.session.macros.expand(tokens).join(" ");
            for stmt in expanded.split(';') {
                let sub = tokenize(stmt);
                if sub.is_empty() {
                    continue;
                }
                self.dispatch_tokens(&sub, expanding);
                if self.quit {
                    break;
                }
            }
            expanding.pop();
            return;
        }

        let Some(command) = self.resolve_sub(head, COMMANDS) else {
            return;
        };
        let args = &tokens[1..];
        match command {
            "exit" | "quit" => self.quit = true,
            "queue" => self.queue_command(args),
            "macro" => self.macro_command(args),
            _ => {}
        }
    }

    pub(crate) fn policy(&self) -> AmbiguityPolicy {
        self.settings.shell.autocomplete
    }

    /// Resolve a command name against a fixed registry table.
    pub(crate) fn resolve_sub<'a>(&mut self, input: &str, table: &[&'a str]) -> Option<&'a str> {
        let policy = self.policy();
        resolver::resolve(policy, input, table, Subject::Command, self.prompt.as_mut())
    }

    /// Resolve a song name against the current music-directory listing.
    pub(crate) fn resolve_track(&mut self, input: &str) -> Option<String> {
        let files = library::list_tracks(&self.settings.library);
        let refs: Vec<&str> = files.iter().map(String::as_str).collect();
        let policy = self.policy();
        resolver::resolve(policy, input, &refs, Subject::Track, self.prompt.as_mut())
            .map(str::to_string)
    }
}

/// Split a line into `;`-separated statements.
///
/// A `macro add` line is kept whole: the expansion being defined may
/// itself contain the delimiter.
fn statements(line: &str) -> Vec<&str> {
    let mut tokens = line.split_whitespace();
    if tokens.next() == Some("macro") && tokens.next() == Some("add") {
        return vec![line];
    }
    line.split(';').collect()
}

fn tokenize(stmt: &str) -> Vec<String> {
    stmt.split_whitespace().map(str::to_string).collect()
}
