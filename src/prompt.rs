//! Interactive prompt port.
//!
//! Commands that need to stop and ask the user something (ambiguous-match
//! selection, overwrite confirmation) go through [`Prompt`] instead of
//! reading stdin directly, so tests can drive them with scripted input.

use std::io::{self, BufRead, Write};

pub trait Prompt {
    /// Show `prompt` and block for one line of input.
    ///
    /// Returns `None` on end-of-input; callers treat that as a cancel and
    /// abandon the pending operation without mutating state.
    fn read_line(&mut self, prompt: &str) -> Option<String>;
}

/// Stdin-backed prompt used by the real shell.
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::Prompt;
    use std::collections::VecDeque;

    /// Prompt fed from a fixed script; yields `None` (EOF) once drained.
    pub struct ScriptedPrompt {
        replies: VecDeque<String>,
    }

    impl ScriptedPrompt {
        pub fn new<I, S>(replies: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                replies: replies.into_iter().map(Into::into).collect(),
            }
        }

        pub fn empty() -> Self {
            Self {
                replies: VecDeque::new(),
            }
        }
    }

    impl Prompt for ScriptedPrompt {
        fn read_line(&mut self, _prompt: &str) -> Option<String> {
            self.replies.pop_front()
        }
    }
}
