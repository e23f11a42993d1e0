//! The `macro` command surface.

use crate::shell::{COMMANDS, MACRO_COMMANDS, Shell};

impl Shell {
    pub fn macro_command(&mut self, args: &[String]) {
        if args.is_empty() {
            for (name, tokens) in self.session.macros.iter() {
                println!("{name} -> {}", tokens.join(" "));
            }
            return;
        }
        let Some(sub) = self.resolve_sub(&args[0], MACRO_COMMANDS) else {
            return;
        };
        let rest = &args[1..];
        match sub {
            "add" => self.macro_add(rest),
            "delete" => self.macro_delete(rest),
            "save" => self.macro_save(rest),
            _ => {}
        }
    }

    /// `macro add <name> <expansion...>`: define a session macro.
    fn macro_add(&mut self, args: &[String]) {
        let Some((name, expansion)) = args.split_first() else {
            println!("Usage: macro add <name> <expansion...>");
            return;
        };
        match self.session.macros.define(name, expansion, COMMANDS) {
            Ok(pruned) => {
                for stale in pruned {
                    println!("Cyclical macros are not allowed, removing {stale}");
                }
            }
            Err(e) => println!("{e}"),
        }
    }

    /// `macro save <names...>`: copy session macros into the persisted set.
    fn macro_save(&mut self, args: &[String]) {
        if args.is_empty() {
            println!("Usage: macro save <names...>");
            return;
        }
        if let Err(e) = self.session.macros.persist(args, self.prompt.as_mut()) {
            println!("{e}");
        }
    }

    /// `macro delete <names...>`: drop macros from both sets.
    fn macro_delete(&mut self, args: &[String]) {
        if args.is_empty() {
            println!("Usage: macro delete <names...>");
            return;
        }
        if let Err(e) = self.session.macros.forget(args) {
            println!("{e}");
        }
    }
}
