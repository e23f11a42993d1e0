use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::PathBuf;

use crate::error::{MacroError, MacroFileError};
use crate::prompt::Prompt;

/// Name -> expansion-token mappings.
///
/// The session set lives in memory; the persisted set is a JSON object of
/// name -> space-joined expansion at `path`, read back fresh on every
/// persisting operation so concurrent shells at least converge on
/// last-writer-wins.
pub struct MacroStore {
    session: BTreeMap<String, Vec<String>>,
    path: PathBuf,
}

impl MacroStore {
    /// Open the store, seeding the session set from the persisted file.
    /// An unreadable file is reported by the caller; the store still works
    /// in memory.
    pub fn open(path: PathBuf) -> (Self, Option<MacroFileError>) {
        let mut store = Self {
            session: BTreeMap::new(),
            path,
        };
        match store.load_persisted() {
            Ok(saved) => {
                for (name, expansion) in saved {
                    let tokens: Vec<String> =
                        expansion.split_whitespace().map(str::to_string).collect();
                    store.session.insert(name, tokens);
                }
                (store, None)
            }
            Err(e) => (store, Some(e)),
        }
    }

    #[cfg(test)]
    pub fn in_memory(path: PathBuf) -> Self {
        Self {
            session: BTreeMap::new(),
            path,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.session.contains_key(name)
    }

    pub fn expansion(&self, name: &str) -> Option<&[String]> {
        self.session.get(name).map(Vec::as_slice)
    }

    /// Iterate definitions in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.session
            .iter()
            .map(|(name, tokens)| (name.as_str(), tokens.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.session.is_empty()
    }

    /// Define (or overwrite) a session macro.
    ///
    /// Rejects reserved names, empty expansions and self-references. When
    /// an expansion token is an existing macro that transitively reaches
    /// back to `name`, that older macro is pruned instead of this one
    /// being rejected; the pruned names are returned for reporting.
    pub fn define(
        &mut self,
        name: &str,
        tokens: &[String],
        reserved: &[&str],
    ) -> Result<Vec<String>, MacroError> {
        if reserved.contains(&name) {
            return Err(MacroError::ReservedName);
        }
        if tokens.is_empty() {
            return Err(MacroError::EmptyExpansion);
        }
        if tokens.iter().any(|t| t == name) {
            return Err(MacroError::Recursive);
        }

        let mut pruned = Vec::new();
        for token in tokens {
            if self.session.contains_key(token) && self.reaches(token, name) {
                self.session.remove(token);
                pruned.push(token.clone());
            }
        }

        self.session.insert(name.to_string(), tokens.to_vec());
        Ok(pruned)
    }

    /// Whether expanding `from` can transitively produce the token
    /// `target`. Iterative walk with a visited set, so an already-broken
    /// store can't recurse us to death.
    fn reaches(&self, from: &str, target: &str) -> bool {
        let mut stack = vec![from.to_string()];
        let mut seen: HashSet<String> = HashSet::new();
        while let Some(cur) = stack.pop() {
            if !seen.insert(cur.clone()) {
                continue;
            }
            let Some(tokens) = self.session.get(&cur) else {
                continue;
            };
            for token in tokens {
                if token == target {
                    return true;
                }
                if self.session.contains_key(token) {
                    stack.push(token.clone());
                }
            }
        }
        false
    }

    /// One-level expansion: every token naming a macro is replaced by that
    /// macro's tokens, in place. The dispatcher re-resolves the output.
    pub fn expand(&self, tokens: &[String]) -> Vec<String> {
        let mut out = Vec::with_capacity(tokens.len());
        for token in tokens {
            match self.session.get(token) {
                Some(expansion) => out.extend(expansion.iter().cloned()),
                None => out.push(token.clone()),
            }
        }
        out
    }

    /// Copy session macros into the persisted set (`macro save`).
    ///
    /// Unknown names are reported; an already-persisted name asks for
    /// confirmation and is only overwritten on `y`. The file is rewritten
    /// once at the end.
    pub fn persist(
        &mut self,
        names: &[String],
        prompt: &mut dyn Prompt,
    ) -> Result<(), MacroFileError> {
        let mut saved = self.load_persisted()?;
        for name in names {
            let Some(tokens) = self.session.get(name) else {
                println!("Macro not found");
                continue;
            };
            let joined = tokens.join(" ");
            if saved.contains_key(name) {
                let answer = prompt
                    .read_line("This macro already exists. Do you want to replace it? (y/n) ");
                match answer {
                    Some(a) if a.trim().eq_ignore_ascii_case("y") => {
                        saved.insert(name.clone(), joined);
                    }
                    _ => {}
                }
            } else {
                saved.insert(name.clone(), joined);
            }
        }
        self.write_persisted(&saved)
    }

    /// Drop macros from the session set and, when present, the persisted
    /// set (`macro delete`). The file is rewritten once at the end.
    pub fn forget(&mut self, names: &[String]) -> Result<(), MacroFileError> {
        let mut saved = self.load_persisted()?;
        for name in names {
            if self.session.remove(name).is_some() {
                saved.remove(name);
            } else {
                println!("Macro not found");
            }
        }
        self.write_persisted(&saved)
    }

    /// Read the persisted map, creating an empty `{}` file on first access.
    fn load_persisted(&self) -> Result<BTreeMap<String, String>, MacroFileError> {
        if !self.path.exists() {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&self.path, "{}")?;
            return Ok(BTreeMap::new());
        }
        let text = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn write_persisted(&self, saved: &BTreeMap<String, String>) -> Result<(), MacroFileError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(saved)?)?;
        Ok(())
    }
}
